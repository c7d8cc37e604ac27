//! Pure Rust decode/resample pipeline with native-quality encoders.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP) | `image` crate |
//! | Identify | `ImageReader::into_dimensions` (content-sniffed, header only) |
//! | Resize | `image::DynamicImage::resize_exact` with `Lanczos3` |
//! | Cover crop | fill dimensions + `crop_imm` around the center |
//! | Encode → WebP (lossy) | `webp::Encoder` (libwebp) |
//! | Encode → JPEG (progressive) | `jpeg_encoder::Encoder` |
//!
//! The `image` crate only ships a lossless WebP encoder and a baseline JPEG
//! encoder, hence the two dedicated encoders.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::calculate_fill_dimensions;
use super::params::{OutputFormat, ResizeParams, ResizePolicy};
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageReader};
use std::path::Path;

/// Pure Rust backend built on the `image` crate plus WebP/JPEG encoders.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .with_guessed_format()
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// Bring the decoded image to the requested output geometry.
fn apply_geometry(img: DynamicImage, params: &ResizeParams) -> DynamicImage {
    let (w, h) = (params.width, params.height);
    match params.policy {
        ResizePolicy::Inside => {
            if img.dimensions() == (w, h) {
                img
            } else {
                img.resize_exact(w, h, FilterType::Lanczos3)
            }
        }
        ResizePolicy::Cover => {
            let (fill_w, fill_h) = calculate_fill_dimensions(img.dimensions(), (w, h));
            let filled = if img.dimensions() == (fill_w, fill_h) {
                img
            } else {
                img.resize_exact(fill_w, fill_h, FilterType::Lanczos3)
            };
            let x = (fill_w - w) / 2;
            let y = (fill_h - h) / 2;
            filled.crop_imm(x, y, w, h)
        }
    }
}

/// Encode as lossy WebP, keeping alpha when the image has it.
fn save_webp(img: &DynamicImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    let (w, h) = img.dimensions();
    let result = if img.color().has_alpha() {
        let rgba = img.to_rgba8();
        webp::Encoder::from_rgba(rgba.as_raw(), w, h).encode_simple(false, quality as f32)
    } else {
        let rgb = img.to_rgb8();
        webp::Encoder::from_rgb(rgb.as_raw(), w, h).encode_simple(false, quality as f32)
    };
    let encoded = result
        .map_err(|e| BackendError::ProcessingFailed(format!("WebP encode failed: {e:?}")))?;

    std::fs::write(path, &*encoded)?;
    Ok(())
}

/// Encode as progressive JPEG. Alpha is dropped.
fn save_jpeg(img: &DynamicImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    let rgb = img.to_rgb8();
    let (w, h) = rgb.dimensions();
    let (w16, h16) = match (u16::try_from(w), u16::try_from(h)) {
        (Ok(w16), Ok(h16)) => (w16, h16),
        _ => {
            return Err(BackendError::ProcessingFailed(format!(
                "JPEG dimensions out of range: {w}x{h}"
            )));
        }
    };

    let file = std::fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);
    let mut encoder = jpeg_encoder::Encoder::new(writer, quality.clamp(1, 100) as u8);
    encoder.set_progressive(true);
    encoder
        .encode(rgb.as_raw(), w16, h16, jpeg_encoder::ColorType::Rgb)
        .map_err(|e| BackendError::ProcessingFailed(format!("JPEG encode failed: {}", e)))
}

fn save_image(
    img: &DynamicImage,
    path: &Path,
    format: OutputFormat,
    quality: u32,
) -> Result<(), BackendError> {
    match format {
        OutputFormat::WebP => save_webp(img, path, quality),
        OutputFormat::Jpeg => save_jpeg(img, path, quality),
    }
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = ImageReader::open(path)
            .map_err(BackendError::Io)?
            .with_guessed_format()
            .map_err(BackendError::Io)?
            .into_dimensions()
            .map_err(|e| {
                BackendError::ProcessingFailed(format!(
                    "Failed to read dimensions of {}: {}",
                    path.display(),
                    e
                ))
            })?;
        Ok(Dimensions { width, height })
    }

    fn resize(&self, params: &ResizeParams) -> Result<Dimensions, BackendError> {
        let img = load_image(&params.source)?;
        let resized = apply_geometry(img, params);
        save_image(
            &resized,
            &params.output,
            params.format,
            params.quality.value(),
        )?;
        let (width, height) = resized.dimensions();
        Ok(Dimensions { width, height })
    }
}
