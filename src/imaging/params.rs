//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which decides which files to write) and the [`backend`](super::backend)
//! (which does the actual pixel work). Keeping them separate lets tests swap
//! in a mock backend without touching the planning logic.
//!
//! ## Types
//!
//! - [`Quality`]: Lossy encoding quality (1–100). Clamped on construction.
//! - [`ResizePolicy`]: Fit inside without enlarging, or cover-crop to exact size.
//! - [`OutputFormat`]: The two encodings every variant is written in.
//! - [`ResizeParams`]: Everything needed for one resize + encode.

use serde::Deserialize;
use std::path::PathBuf;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

/// How a source is mapped onto a variant's target box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizePolicy {
    /// Preserve aspect ratio, fit inside the box, never upscale.
    #[default]
    Inside,
    /// Scale to fill the box exactly, cropping the overflow around the center.
    Cover,
}

/// Encodings produced for every variant, in write order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Lossy WebP, keeps the alpha channel when the source has one.
    WebP,
    /// Progressive JPEG. Alpha is dropped.
    Jpeg,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 2] = [OutputFormat::WebP, OutputFormat::Jpeg];

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::WebP => "webp",
            OutputFormat::Jpeg => "jpg",
        }
    }
}

/// Parameters for a single resize + encode.
///
/// `width` × `height` are the final output dimensions, already resolved
/// against the source by [`calculations`](super::calculations).
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub policy: ResizePolicy,
    pub format: OutputFormat,
    pub quality: Quality,
}
