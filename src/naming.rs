//! Output file naming and directory resolution.
//!
//! Every variant lands at `<dir>/<name>-<suffix>.<ext>`:
//!
//! ```text
//! assets/img/mapa-google.jpg   (source, no override)
//! → assets/img/mapa-google-1200w.webp
//! → assets/img/mapa-google-1200w.jpg
//!
//! assets/img/portfolio/fullsize/1.jpeg   (output_dir = "assets/img/portfolio")
//! → assets/img/portfolio/portfolio-1-800w.webp
//! ```

use crate::imaging::OutputFormat;
use std::path::{Path, PathBuf};

/// Stem shared by both formats of a variant, e.g. `mapa-google-800w`.
pub fn variant_stem(base_name: &str, suffix: &str) -> String {
    format!("{}-{}", base_name, suffix)
}

/// Full file name of one variant in one format.
pub fn variant_file_name(base_name: &str, suffix: &str, format: OutputFormat) -> String {
    format!("{}.{}", variant_stem(base_name, suffix), format.extension())
}

/// Default suffix for a width when none is configured.
pub fn default_suffix(width: u32) -> String {
    format!("{}w", width)
}

/// Directory the variants of an entry are written to.
///
/// An explicit override wins; otherwise the source's own directory.
/// Both are resolved against `root`.
pub fn resolve_output_dir(root: &Path, source: &Path, output_dir: Option<&Path>) -> PathBuf {
    match output_dir {
        Some(dir) => root.join(dir),
        None => root.join(source.parent().unwrap_or_else(|| Path::new(""))),
    }
}
