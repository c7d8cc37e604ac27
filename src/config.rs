//! Image table configuration.
//!
//! Handles loading and validating `images.toml`: the ordered list of image
//! categories, each with its responsive sizes, per-format quality, and source
//! entries, plus the carousel definitions.
//!
//! ## Config File Location
//!
//! The file is looked up at `<root>/images.toml` unless `--config` points
//! elsewhere. When it does not exist, the stock table embedded in the binary
//! is used (print it with `site-images gen-config`).
//!
//! ## Configuration Options
//!
//! ```toml
//! crop_aspect_ratio = [16, 9]   # height of `fit = "cover"` sizes without an explicit height
//!
//! [[categories]]
//! name = "hero"
//! quality = { webp = 85, jpg = 80 }
//! sizes = [
//!     { width = 1920, fit = "cover" },           # suffix defaults to "1920w"
//!     { width = 768, suffix = "tablet" },        # fit defaults to "inside"
//! ]
//! images = [
//!     { source = "assets/img/bg.jpeg", name = "bg" },
//!     { source = "assets/img/p/1.jpeg", name = "p-1", output_dir = "assets/img" },
//! ]
//!
//! [[carousels]]
//! selector = ".items"
//! slides_per_view = 4
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::carousel::{SliderConfig, stock_carousels};
use crate::imaging::calculations::crop_height;
use crate::imaging::{FormatQuality, Quality, ResizePolicy, VariantRequest};
use crate::naming::default_suffix;
use serde::Deserialize;
use std::borrow::Cow;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file name, relative to the project root.
pub const CONFIG_FILE_NAME: &str = "images.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Root of `images.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageConfig {
    /// Aspect ratio `[width, height]` for cover sizes without an explicit height.
    pub crop_aspect_ratio: [u32; 2],
    /// Categories in processing order.
    pub categories: Vec<Category>,
    /// Slider instances for the carousel init script.
    pub carousels: Vec<SliderConfig>,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            crop_aspect_ratio: [16, 9],
            categories: Vec::new(),
            carousels: stock_carousels(),
        }
    }
}

/// A group of images sharing sizes and quality.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Category {
    pub name: String,
    pub sizes: Vec<SizeVariant>,
    #[serde(default)]
    pub quality: QualityConfig,
    #[serde(default)]
    pub images: Vec<ImageEntry>,
}

/// One responsive size.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SizeVariant {
    pub width: u32,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub suffix: Option<String>,
    #[serde(default)]
    pub fit: ResizePolicy,
}

impl SizeVariant {
    /// Configured suffix, or `<width>w`.
    pub fn suffix(&self) -> Cow<'_, str> {
        match &self.suffix {
            Some(s) => Cow::Borrowed(s.as_str()),
            None => Cow::Owned(default_suffix(self.width)),
        }
    }

    pub fn request(&self) -> VariantRequest {
        VariantRequest {
            width: self.width,
            height: self.height,
            policy: self.fit,
        }
    }
}

/// Encoding quality per output format (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QualityConfig {
    pub webp: u32,
    pub jpg: u32,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self { webp: 85, jpg: 80 }
    }
}

impl QualityConfig {
    pub fn format_quality(&self) -> FormatQuality {
        FormatQuality {
            webp: Quality::new(self.webp),
            jpeg: Quality::new(self.jpg),
        }
    }
}

/// One source photograph.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageEntry {
    /// Source path relative to the project root.
    pub source: PathBuf,
    /// Output base name; variants are `<name>-<suffix>.<ext>`.
    pub name: String,
    /// Write variants here instead of next to the source.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl ImageConfig {
    /// The site's own table, embedded in the binary.
    pub fn stock() -> Result<Self, ConfigError> {
        parse_config(stock_config_toml())
    }

    pub fn crop_aspect(&self) -> (u32, u32) {
        (self.crop_aspect_ratio[0], self.crop_aspect_ratio[1])
    }

    /// Total number of image entries across categories.
    pub fn entry_count(&self) -> usize {
        self.categories.iter().map(|c| c.images.len()).sum()
    }

    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.crop_aspect_ratio[0] == 0 || self.crop_aspect_ratio[1] == 0 {
            return Err(ConfigError::Validation(
                "crop_aspect_ratio values must be non-zero".into(),
            ));
        }

        let mut names = HashSet::new();
        for category in &self.categories {
            if category.name.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "category name must not be empty".into(),
                ));
            }
            if !names.insert(category.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate category: {}",
                    category.name
                )));
            }
            category.validate(self.crop_aspect())?;
        }

        for slider in &self.carousels {
            slider.validate().map_err(ConfigError::Validation)?;
        }
        Ok(())
    }
}

impl Category {
    fn validate(&self, crop_aspect: (u32, u32)) -> Result<(), ConfigError> {
        let name = &self.name;
        if self.sizes.is_empty() {
            return Err(ConfigError::Validation(format!(
                "{name}: sizes must not be empty"
            )));
        }

        let mut suffixes = HashSet::new();
        for size in &self.sizes {
            if size.width == 0 || size.height == Some(0) {
                return Err(ConfigError::Validation(format!(
                    "{name}: size dimensions must be non-zero"
                )));
            }
            if size.fit == ResizePolicy::Cover
                && size.height.is_none()
                && crop_height(size.width, crop_aspect) == 0
            {
                return Err(ConfigError::Validation(format!(
                    "{name}: width {} is too small for crop_aspect_ratio {}:{}",
                    size.width, crop_aspect.0, crop_aspect.1
                )));
            }
            let suffix = size.suffix();
            if suffix.is_empty() || suffix.contains(['/', '\\']) {
                return Err(ConfigError::Validation(format!(
                    "{name}: invalid size suffix {suffix:?}"
                )));
            }
            if !suffixes.insert(suffix.into_owned()) {
                return Err(ConfigError::Validation(format!(
                    "{name}: duplicate size suffix {}",
                    size.suffix()
                )));
            }
        }

        for (label, value) in [("webp", self.quality.webp), ("jpg", self.quality.jpg)] {
            if !(1..=100).contains(&value) {
                return Err(ConfigError::Validation(format!(
                    "{name}: quality.{label} must be 1-100"
                )));
            }
        }

        for entry in &self.images {
            if entry.source.as_os_str().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{name}: image source must not be empty"
                )));
            }
            if entry.name.is_empty() || entry.name.contains(['/', '\\']) {
                return Err(ConfigError::Validation(format!(
                    "{name}: invalid output name {:?} for {}",
                    entry.name,
                    entry.source.display()
                )));
            }
        }
        Ok(())
    }
}

// =============================================================================
// Config loading and validation
// =============================================================================

/// Parse and validate a config document.
pub fn parse_config(content: &str) -> Result<ImageConfig, ConfigError> {
    let config: ImageConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load the config file at `path`.
///
/// Falls back to the stock table when the file does not exist.
/// Returns `Err` if the file exists but is invalid.
pub fn load_config(path: &Path) -> Result<ImageConfig, ConfigError> {
    if !path.exists() {
        return ImageConfig::stock();
    }
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Returns the stock `images.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command and as the built-in table.
pub fn stock_config_toml() -> &'static str {
    r##"# site-images configuration
# =========================
# Each category lists the responsive sizes to generate and the source images
# they apply to. Every size is written twice: lossy WebP and progressive JPEG,
# named <name>-<suffix>.webp / .jpg next to the source (or in output_dir).
#
# Size keys:
#   width   target width in pixels (required)
#   height  optional; box height for "inside", exact height for "cover"
#   suffix  optional; defaults to "<width>w"
#   fit     "inside" (keep aspect, never enlarge; default) or "cover" (crop)
#
# Unknown keys will cause an error.

# Height of "cover" sizes without an explicit height.
crop_aspect_ratio = [16, 9]

# ---------------------------------------------------------------------------
# Hero images (full-width backgrounds), cropped to landscape
# ---------------------------------------------------------------------------
[[categories]]
name = "hero"
quality = { webp = 85, jpg = 80 }
sizes = [
    { width = 1920, fit = "cover" },
    { width = 1200, fit = "cover" },
    { width = 768, fit = "cover" },
    { width = 480, fit = "cover" },
]
images = [
    { source = "assets/img/bg-masthead.jpeg", name = "bg-masthead" },
    { source = "assets/img/bg-masthead_1.jpeg", name = "bg-masthead_1" },
    { source = "assets/img/14.jpg", name = "14" },
]

# ---------------------------------------------------------------------------
# Content images (50/50 split, max 75% width)
# ---------------------------------------------------------------------------
[[categories]]
name = "content"
quality = { webp = 85, jpg = 80 }
sizes = [{ width = 800 }, { width = 600 }, { width = 400 }]
images = [
    { source = "assets/img/marketa.jpg", name = "marketa" },
    { source = "assets/img/julie.jpeg", name = "julie" },
    { source = "assets/img/martin_0.jpg", name = "martin_0" },
    { source = "assets/img/janka.jpg", name = "janka" },
    { source = "assets/img/12.jpg", name = "12" },
    { source = "assets/img/5.jpg", name = "5" },
    { source = "assets/img/13.jpg", name = "13" },
    { source = "assets/img/13(1).jpg", name = "13(1)" },
    { source = "assets/img/13(2).jpg", name = "13(2)" },
]

# ---------------------------------------------------------------------------
# Gallery images (3-column grid)
# ---------------------------------------------------------------------------
[[categories]]
name = "gallery"
quality = { webp = 85, jpg = 80 }
sizes = [{ width = 1200 }, { width = 800 }, { width = 600 }, { width = 400 }]
images = [
    { source = "assets/img/mostovani.jpg", name = "mostovani" },
    { source = "assets/img/komunita_2.jpeg", name = "komunita_2" },
    { source = "assets/img/komunita_3.jpg", name = "komunita_3" },
    { source = "assets/img/tym_0.jpg", name = "tym_0" },
    { source = "assets/img/tym_4.jpg", name = "tym_4" },
    { source = "assets/img/tym_2.jpg", name = "tym_2" },
    { source = "assets/img/vzdelani_0.jpg", name = "vzdelani_0" },
    { source = "assets/img/vzdelani_3.jpg", name = "vzdelani_3" },
    { source = "assets/img/vzdelani_2.jpg", name = "vzdelani_2" },
    { source = "assets/img/vybaveni_2.jpg", name = "vybaveni_2" },
    { source = "assets/img/vybaveni_0.jpg", name = "vybaveni_0" },
    { source = "assets/img/vybaveni_1.jpg", name = "vybaveni_1" },
]

# ---------------------------------------------------------------------------
# Portfolio carousel images
# ---------------------------------------------------------------------------
[[categories]]
name = "portfolio"
quality = { webp = 85, jpg = 80 }
sizes = [{ width = 1200 }, { width = 800 }, { width = 600 }]
images = [
    { source = "assets/img/1.jpg", name = "1" },
    { source = "assets/img/portfolio/fullsize/1.jpeg", name = "portfolio-1", output_dir = "assets/img/portfolio" },
    { source = "assets/img/portfolio/fullsize/2.jpeg", name = "portfolio-2", output_dir = "assets/img/portfolio" },
    { source = "assets/img/portfolio/fullsize/3.jpeg", name = "portfolio-3", output_dir = "assets/img/portfolio" },
    { source = "assets/img/portfolio/fullsize/4.jpeg", name = "portfolio-4", output_dir = "assets/img/portfolio" },
    { source = "assets/img/portfolio/fullsize/5.jpeg", name = "portfolio-5", output_dir = "assets/img/portfolio" },
    { source = "assets/img/portfolio/fullsize/6.jpeg", name = "portfolio-6", output_dir = "assets/img/portfolio" },
    { source = "assets/img/portfolio/fullsize/7.jpeg", name = "portfolio-7", output_dir = "assets/img/portfolio" },
    { source = "assets/img/portfolio/fullsize/8.jpeg", name = "portfolio-8", output_dir = "assets/img/portfolio" },
]

# ---------------------------------------------------------------------------
# Map image
# ---------------------------------------------------------------------------
[[categories]]
name = "map"
quality = { webp = 85, jpg = 80 }
sizes = [{ width = 1200 }, { width = 800 }, { width = 600 }]
images = [
    { source = "assets/img/mapa-google.jpg", name = "mapa-google" },
]

# ---------------------------------------------------------------------------
# Carousels (Swiper options, rendered by `site-images carousel`)
# ---------------------------------------------------------------------------
[[carousels]]
selector = ".items"
loop = true
speed = 800
slides_per_view = 4
slides_per_group = 4
autoplay = { delay = 2000, disable_on_interaction = false }
pagination = { el = ".swiper-pagination", clickable = true }
breakpoints = [
    { min_width = 1024, slides_per_view = 3, slides_per_group = 3 },
    { min_width = 600, slides_per_view = 2, slides_per_group = 2 },
    { min_width = 480, slides_per_view = 1, slides_per_group = 1 },
]

[[carousels]]
selector = ".references-swiper"
loop = true
speed = 800
space_between = 0
autoplay = { delay = 5000, disable_on_interaction = false, pause_on_mouse_enter = true }
navigation = { next_el = ".swiper-button-next", prev_el = ".swiper-button-prev" }
pagination = { el = ".swiper-pagination", clickable = true, dynamic_bullets = true }
breakpoints = [
    { min_width = 320, slides_per_view = 1, space_between = 0 },
    { min_width = 768, slides_per_view = 2, space_between = 0 },
    { min_width = 1024, slides_per_view = 3, space_between = 0 },
]
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MINIMAL: &str = r#"
[[categories]]
name = "map"
sizes = [{ width = 1200 }, { width = 800 }, { width = 600 }]
images = [{ source = "assets/img/mapa-google.jpg", name = "mapa-google" }]
"#;

    #[test]
    fn default_config_values() {
        let config = ImageConfig::default();
        assert_eq!(config.crop_aspect(), (16, 9));
        assert!(config.categories.is_empty());
        assert_eq!(config.carousels.len(), 2);
    }

    #[test]
    fn stock_config_parses_and_validates() {
        let config = ImageConfig::stock().unwrap();
        let names: Vec<&str> = config.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["hero", "content", "gallery", "portfolio", "map"]);
        assert_eq!(config.entry_count(), 3 + 9 + 12 + 9 + 1);
    }

    #[test]
    fn stock_hero_sizes_crop_others_fit() {
        let config = ImageConfig::stock().unwrap();
        for category in &config.categories {
            let expected = if category.name == "hero" {
                ResizePolicy::Cover
            } else {
                ResizePolicy::Inside
            };
            assert!(
                category.sizes.iter().all(|s| s.fit == expected),
                "{}",
                category.name
            );
        }
    }

    #[test]
    fn stock_portfolio_overrides_output_dir() {
        let config = ImageConfig::stock().unwrap();
        let portfolio = config
            .categories
            .iter()
            .find(|c| c.name == "portfolio")
            .unwrap();
        assert_eq!(portfolio.images[0].output_dir, None);
        assert!(portfolio.images[1..].iter().all(|e| {
            e.output_dir.as_deref() == Some(Path::new("assets/img/portfolio"))
        }));
    }

    #[test]
    fn stock_carousels_match_builtin() {
        let config = ImageConfig::stock().unwrap();
        assert_eq!(config.carousels, stock_carousels());
    }

    #[test]
    fn minimal_config_gets_defaults() {
        let config = parse_config(MINIMAL).unwrap();
        let map = &config.categories[0];
        assert_eq!(map.quality, QualityConfig { webp: 85, jpg: 80 });
        assert_eq!(map.sizes[0].suffix(), "1200w");
        assert_eq!(map.sizes[0].fit, ResizePolicy::Inside);
        assert_eq!(config.crop_aspect(), (16, 9));
        assert_eq!(config.carousels, stock_carousels());
    }

    #[test]
    fn explicit_suffix_and_height() {
        let config = parse_config(
            r#"
[[categories]]
name = "thumbs"
sizes = [{ width = 300, height = 300, suffix = "sq", fit = "cover" }]
"#,
        )
        .unwrap();
        let size = &config.categories[0].sizes[0];
        assert_eq!(size.suffix(), "sq");
        assert_eq!(
            size.request(),
            VariantRequest {
                width: 300,
                height: Some(300),
                policy: ResizePolicy::Cover,
            }
        );
    }

    #[test]
    fn quality_config_maps_to_formats() {
        let q = QualityConfig { webp: 90, jpg: 75 }.format_quality();
        assert_eq!(q.webp.value(), 90);
        assert_eq!(q.jpeg.value(), 75);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = parse_config(
            r#"
[[categories]]
name = "map"
sizes = [{ width = 800, maintainAspect = true }]
"#,
        );
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_fit_is_rejected() {
        let result = parse_config(
            r#"
[[categories]]
name = "map"
sizes = [{ width = 800, fit = "stretch" }]
"#,
        );
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    fn validation_error(toml: &str) -> String {
        match parse_config(toml) {
            Err(ConfigError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn empty_sizes_rejected() {
        let msg = validation_error(
            r#"
[[categories]]
name = "map"
sizes = []
"#,
        );
        assert!(msg.contains("sizes must not be empty"));
    }

    #[test]
    fn zero_width_rejected() {
        validation_error(
            r#"
[[categories]]
name = "map"
sizes = [{ width = 0 }]
"#,
        );
    }

    #[test]
    fn duplicate_suffix_rejected() {
        let msg = validation_error(
            r#"
[[categories]]
name = "map"
sizes = [{ width = 800 }, { width = 600, suffix = "800w" }]
"#,
        );
        assert!(msg.contains("duplicate size suffix"));
    }

    #[test]
    fn out_of_range_quality_rejected() {
        let msg = validation_error(
            r#"
[[categories]]
name = "map"
quality = { jpg = 101 }
sizes = [{ width = 800 }]
"#,
        );
        assert!(msg.contains("quality.jpg"));
    }

    #[test]
    fn duplicate_category_rejected() {
        let msg = validation_error(
            r#"
[[categories]]
name = "map"
sizes = [{ width = 800 }]

[[categories]]
name = "map"
sizes = [{ width = 600 }]
"#,
        );
        assert!(msg.contains("duplicate category"));
    }

    #[test]
    fn output_name_with_separator_rejected() {
        validation_error(
            r#"
[[categories]]
name = "map"
sizes = [{ width = 800 }]
images = [{ source = "a.jpg", name = "sub/a" }]
"#,
        );
    }

    #[test]
    fn zero_crop_aspect_rejected() {
        let msg = validation_error("crop_aspect_ratio = [16, 0]\n");
        assert!(msg.contains("crop_aspect_ratio"));
    }

    #[test]
    fn cover_width_too_small_for_aspect_rejected() {
        let msg = validation_error(
            r#"
crop_aspect_ratio = [100, 1]

[[categories]]
name = "strip"
sizes = [{ width = 10, fit = "cover" }]
"#,
        );
        assert!(msg.contains("too small for crop_aspect_ratio 100:1"));
    }

    #[test]
    fn narrow_cover_with_explicit_height_or_inside_fit_accepted() {
        parse_config(
            r#"
crop_aspect_ratio = [100, 1]

[[categories]]
name = "strip"
sizes = [
    { width = 10, height = 4, fit = "cover" },
    { width = 20 },
]
"#,
        )
        .unwrap();
    }

    #[test]
    fn invalid_carousel_rejected() {
        validation_error(
            r#"
[[carousels]]
selector = ""
"#,
        );
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_falls_back_to_stock_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config.categories.len(), 5);
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, MINIMAL).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.categories.len(), 1);
        assert_eq!(config.categories[0].images[0].name, "mapa-google");
    }

    #[test]
    fn load_config_invalid_toml_errors() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[[categories]\nname = ").unwrap();

        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }
}
