//! Responsive variant generation.
//!
//! Walks the configured categories in order and, for every image entry,
//! writes one WebP and one JPEG per size variant.
//!
//! ## Output Structure
//!
//! ```text
//! assets/img/
//! ├── mapa-google.jpg            # source
//! ├── mapa-google-1200w.webp
//! ├── mapa-google-1200w.jpg
//! ├── mapa-google-800w.webp
//! ├── mapa-google-800w.jpg
//! ├── mapa-google-600w.webp
//! └── mapa-google-600w.jpg
//! ```
//!
//! ## Failure Granularity
//!
//! The unit of work is one (image, size, format) triple. A missing source is
//! *skipped*; a failed metadata read or encode is an *error*. Neither stops the
//! run: the failing unit is counted and the loop moves on. Counts are plain
//! values returned per entry and summed by [`run`], so there is no shared
//! mutable state.
//!
//! Everything runs sequentially on the calling thread. Progress is reported
//! through an optional channel of [`ProcessEvent`]s.

use crate::config::{Category, ImageConfig, ImageEntry};
use crate::imaging::{
    BackendError, ImageBackend, RustBackend, encode_variant, get_dimensions, plan_variant,
    resolve_geometry,
};
use crate::naming::{resolve_output_dir, variant_stem};
use std::ops::{Add, AddAssign};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Failure of a single unit of work. Never aborts the run.
#[derive(Error, Debug)]
pub enum ItemError {
    #[error("source not found: {}", .0.display())]
    MissingSource(PathBuf),
    #[error("{unit}: {source}")]
    EncodeFailure {
        unit: String,
        #[source]
        source: BackendError,
    },
}

/// Tally of one run, or of one entry within a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Output files written.
    pub processed: usize,
    /// Entries whose source did not exist.
    pub skipped: usize,
    /// Failed metadata reads and failed encodes.
    pub errors: usize,
    /// Output files a fully successful run would have written for the
    /// entries that could be read.
    pub expected: usize,
}

impl RunStats {
    pub fn skipped() -> Self {
        Self {
            skipped: 1,
            ..Self::default()
        }
    }

    pub fn error() -> Self {
        Self {
            errors: 1,
            ..Self::default()
        }
    }
}

impl Add for RunStats {
    type Output = RunStats;

    fn add(self, other: RunStats) -> RunStats {
        RunStats {
            processed: self.processed + other.processed,
            skipped: self.skipped + other.skipped,
            errors: self.errors + other.errors,
            expected: self.expected + other.expected,
        }
    }
}

impl AddAssign for RunStats {
    fn add_assign(&mut self, other: RunStats) {
        *self = *self + other;
    }
}

impl std::iter::Sum for RunStats {
    fn sum<I: Iterator<Item = RunStats>>(iter: I) -> RunStats {
        iter.fold(RunStats::default(), Add::add)
    }
}

/// Progress events emitted while processing.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessEvent {
    CategoryStarted {
        name: String,
        image_count: usize,
    },
    SourceMissing {
        source: PathBuf,
    },
    MetadataFailed {
        source: PathBuf,
        message: String,
    },
    ImageStarted {
        source: PathBuf,
        dimensions: (u32, u32),
    },
    VariantWritten {
        file_name: String,
        width: u32,
        height: u32,
    },
    VariantFailed {
        file_name: String,
        message: String,
    },
}

/// Fatal errors that abort the whole run.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
}

fn emit(progress: Option<&Sender<ProcessEvent>>, event: ProcessEvent) {
    if let Some(tx) = progress {
        // A closed receiver only means nobody is printing.
        tx.send(event).ok();
    }
}

/// Process every configured entry with the production backend.
pub fn run(
    root: &Path,
    config: &ImageConfig,
    progress: Option<Sender<ProcessEvent>>,
) -> Result<RunStats, ProcessError> {
    run_with_backend(&RustBackend::new(), root, config, progress)
}

/// Process every configured entry using a specific backend (allows testing with mock).
pub fn run_with_backend(
    backend: &impl ImageBackend,
    root: &Path,
    config: &ImageConfig,
    progress: Option<Sender<ProcessEvent>>,
) -> Result<RunStats, ProcessError> {
    config.validate()?;
    let crop_aspect = config.crop_aspect();
    let progress = progress.as_ref();

    let mut stats = RunStats::default();
    for category in &config.categories {
        emit(
            progress,
            ProcessEvent::CategoryStarted {
                name: category.name.clone(),
                image_count: category.images.len(),
            },
        );

        stats += category
            .images
            .iter()
            .map(|entry| process_entry(backend, root, entry, category, crop_aspect, progress))
            .sum::<RunStats>();
    }

    debug!(?stats, "run finished");
    Ok(stats)
}

/// Produce all variants of one entry and return its tally.
pub fn process_entry(
    backend: &impl ImageBackend,
    root: &Path,
    entry: &ImageEntry,
    category: &Category,
    crop_aspect: (u32, u32),
    progress: Option<&Sender<ProcessEvent>>,
) -> RunStats {
    let source_path = match check_source(root, entry) {
        Ok(path) => path,
        Err(e) => {
            warn!(category = %category.name, "{e}");
            emit(
                progress,
                ProcessEvent::SourceMissing {
                    source: entry.source.clone(),
                },
            );
            return RunStats::skipped();
        }
    };

    let dimensions = match get_dimensions(backend, &source_path) {
        Ok(dims) => dims,
        Err(e) => {
            error!(source = %entry.source.display(), "failed to read metadata: {e}");
            emit(
                progress,
                ProcessEvent::MetadataFailed {
                    source: entry.source.clone(),
                    message: e.to_string(),
                },
            );
            return RunStats::error();
        }
    };
    emit(
        progress,
        ProcessEvent::ImageStarted {
            source: entry.source.clone(),
            dimensions,
        },
    );

    let output_dir = resolve_output_dir(root, &entry.source, entry.output_dir.as_deref());
    if let Err(e) = std::fs::create_dir_all(&output_dir) {
        warn!(dir = %output_dir.display(), "cannot create output directory: {e}");
    }

    let quality = category.quality.format_quality();
    let mut stats = RunStats {
        expected: category.sizes.len() * 2,
        ..RunStats::default()
    };

    for size in &category.sizes {
        let suffix = size.suffix();
        let geometry = resolve_geometry(dimensions, &size.request(), crop_aspect);
        debug!(
            stem = %variant_stem(&entry.name, &suffix),
            width = geometry.width,
            height = geometry.height,
            policy = ?geometry.policy,
            "planned variant"
        );

        for params in plan_variant(
            &source_path,
            &output_dir,
            &entry.name,
            &suffix,
            geometry,
            &quality,
        ) {
            let file_name = params
                .output
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_default();

            match encode_variant(backend, &params) {
                Ok(dims) => {
                    stats.processed += 1;
                    emit(
                        progress,
                        ProcessEvent::VariantWritten {
                            file_name,
                            width: dims.width,
                            height: dims.height,
                        },
                    );
                }
                Err(source) => {
                    stats.errors += 1;
                    let message = source.to_string();
                    error!(
                        "{}",
                        ItemError::EncodeFailure {
                            unit: file_name.clone(),
                            source,
                        }
                    );
                    emit(progress, ProcessEvent::VariantFailed { file_name, message });
                }
            }
        }
    }

    stats
}

/// Resolve an entry's source against the root, failing if it does not exist.
pub fn check_source(root: &Path, entry: &ImageEntry) -> Result<PathBuf, ItemError> {
    let path = root.join(&entry.source);
    if path.is_file() {
        Ok(path)
    } else {
        Err(ItemError::MissingSource(entry.source.clone()))
    }
}

/// Source availability of one category, as reported by `check`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCheck {
    pub name: String,
    pub present: Vec<PathBuf>,
    pub missing: Vec<PathBuf>,
    /// Files a full run would write for the present sources.
    pub outputs: usize,
}

/// Report which sources exist without decoding or writing anything.
pub fn check(root: &Path, config: &ImageConfig) -> Result<Vec<CategoryCheck>, ProcessError> {
    config.validate()?;
    Ok(config
        .categories
        .iter()
        .map(|category| {
            let (present, missing): (Vec<_>, Vec<_>) = category
                .images
                .iter()
                .partition(|entry| check_source(root, entry).is_ok());
            CategoryCheck {
                name: category.name.clone(),
                outputs: present.len() * category.sizes.len() * 2,
                present: present.into_iter().map(|e| e.source.clone()).collect(),
                missing: missing.into_iter().map(|e| e.source.clone()).collect(),
            }
        })
        .collect())
}
