//! Image processing: identify, resize, encode.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `ImageReader::into_dimensions`, format sniffed from content |
//! | **Resize** | Lanczos3 via `image`, fit-inside or cover-crop |
//! | **Encode** | lossy WebP (`webp`), progressive JPEG (`jpeg-encoder`) |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
pub mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use operations::{
    FormatQuality, VariantGeometry, VariantRequest, encode_variant, get_dimensions, plan_variant,
    resolve_geometry,
};
pub use params::{OutputFormat, Quality, ResizeParams, ResizePolicy};
pub use rust_backend::RustBackend;
