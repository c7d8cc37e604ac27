//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take configuration, compute parameters, and call the backend.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::{crop_height, fit_inside_dimensions};
use super::params::{OutputFormat, Quality, ResizeParams, ResizePolicy};
use crate::naming::variant_file_name;
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    let dims = backend.identify(path)?;
    Ok((dims.width, dims.height))
}

/// Encoding quality per output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatQuality {
    pub webp: Quality,
    pub jpeg: Quality,
}

impl FormatQuality {
    pub fn for_format(&self, format: OutputFormat) -> Quality {
        match format {
            OutputFormat::WebP => self.webp,
            OutputFormat::Jpeg => self.jpeg,
        }
    }
}

/// Requested shape of one variant, before it is resolved against a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRequest {
    pub width: u32,
    pub height: Option<u32>,
    pub policy: ResizePolicy,
}

/// Final output dimensions of a variant for a given source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantGeometry {
    pub width: u32,
    pub height: u32,
    pub policy: ResizePolicy,
}

/// Resolve a variant request against the source dimensions.
///
/// - `Inside`: the source is fitted into `width` × `height` (height unbounded
///   when absent) and never enlarged.
/// - `Cover`: output is exactly `width` × `height`; a missing height comes from
///   `crop_aspect`.
pub fn resolve_geometry(
    source: (u32, u32),
    request: &VariantRequest,
    crop_aspect: (u32, u32),
) -> VariantGeometry {
    let (width, height) = match request.policy {
        ResizePolicy::Inside => fit_inside_dimensions(source, request.width, request.height),
        ResizePolicy::Cover => (
            request.width,
            request
                .height
                .unwrap_or_else(|| crop_height(request.width, crop_aspect)),
        ),
    };
    VariantGeometry {
        width,
        height,
        policy: request.policy,
    }
}

/// Plan the encodes of one variant without executing them.
///
/// Returns one [`ResizeParams`] per [`OutputFormat`], WebP first.
pub fn plan_variant(
    source: &Path,
    output_dir: &Path,
    base_name: &str,
    suffix: &str,
    geometry: VariantGeometry,
    quality: &FormatQuality,
) -> Vec<ResizeParams> {
    OutputFormat::ALL
        .iter()
        .map(|&format| ResizeParams {
            source: source.to_path_buf(),
            output: output_dir.join(variant_file_name(base_name, suffix, format)),
            width: geometry.width,
            height: geometry.height,
            policy: geometry.policy,
            format,
            quality: quality.for_format(format),
        })
        .collect()
}

/// Execute one planned encode.
pub fn encode_variant(backend: &impl ImageBackend, params: &ResizeParams) -> Result<Dimensions> {
    backend.resize(params)
}
