//! # Site Images
//!
//! Batch generator for a static site's responsive images. A config table
//! groups source photographs into categories; every category lists the
//! widths it needs. For each source and width the tool writes a lossy WebP
//! and a progressive JPEG next to the source (or into an override directory),
//! ready for `<picture>`/`srcset` markup.
//!
//! ```text
//! images.toml  →  assets/img/<name>-<suffix>.webp
//!                 assets/img/<name>-<suffix>.jpg
//! ```
//!
//! The same config also describes the site's image sliders, rendered into a
//! small Swiper init script by the `carousel` command.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `images.toml` loading, validation, and the stock table |
//! | [`process`] | Per-entry variant generation, run driver, source check |
//! | [`imaging`] | Dimension math, backend trait, pure-Rust resize + encode |
//! | [`naming`] | `<name>-<suffix>.<ext>` file names and output directories |
//! | [`carousel`] | Typed slider options and init script rendering |
//! | [`output`] | CLI output formatting for progress, summary, and check |
//!
//! # Design Decisions
//!
//! ## Two Formats Per Size
//!
//! WebP is the primary format; the progressive JPEG is the fallback for
//! clients without WebP. Both share the stem, so markup can derive one name
//! from the other by swapping the extension.
//!
//! ## Failures Are Counted, Not Raised
//!
//! A broken or missing photo must not stop the rest of the site from being
//! regenerated. Only an unreadable config aborts; everything else shows up in
//! the closing `Errors:` / `Skipped:` counters.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding and resampling use the `image` crate (Lanczos3). WebP goes through
//! libwebp via the `webp` crate and JPEG through `jpeg-encoder`, both built
//! from source by cargo, so there is no ImageMagick or system library to
//! install.

pub mod carousel;
pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod process;
