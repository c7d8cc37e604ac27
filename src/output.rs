//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output is grouped the way the config file is: category header, then one
//! block per source image, then its variants. Paths are shown relative to the
//! project root so the output reads as an inventory of the image table.
//!
//! # Output Format
//!
//! ## Process
//!
//! ```text
//! map (1 images)
//!     mapa-google.jpg
//!         Source: assets/img/mapa-google.jpg
//!         2400x1600, landscape, ratio 1.50
//!         mapa-google-1200w.webp: 1200x800
//!         mapa-google-1200w.jpg: failed (Processing failed: ...)
//!     Missing: assets/img/gone.jpg
//!
//! Processed: 5
//! Skipped: 1
//! Errors: 1
//! Total expected: 6
//! ```
//!
//! ## Check
//!
//! ```text
//! 001 hero (4 images, 32 outputs)
//!     ok      assets/img/bg.jpeg
//!     missing assets/img/bg-about.jpeg
//!
//! 3 of 4 sources present, 24 outputs
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::imaging::calculations::describe_orientation;
use crate::process::{CategoryCheck, ProcessEvent, RunStats};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Orientation and aspect line for a source image.
///
/// ```text
/// 1920x1080, landscape, ratio 1.78
/// ```
fn orientation_line(dimensions: (u32, u32)) -> String {
    let (label, ratio) = describe_orientation(dimensions);
    format!(
        "{}x{}, {}, ratio {:.2}",
        dimensions.0, dimensions.1, label, ratio
    )
}

// ============================================================================
// Process output
// ============================================================================

/// Format a single process progress event as display lines.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::CategoryStarted { name, image_count } => {
            vec![format!("{} ({} images)", name, image_count)]
        }
        ProcessEvent::SourceMissing { source } => {
            vec![format!("{}Missing: {}", indent(1), source.display())]
        }
        ProcessEvent::MetadataFailed { source, message } => vec![
            format!("{}{}", indent(1), file_name_of(source)),
            format!("{}Source: {}", indent(2), source.display()),
            format!("{}metadata: failed ({})", indent(2), message),
        ],
        ProcessEvent::ImageStarted { source, dimensions } => vec![
            format!("{}{}", indent(1), file_name_of(source)),
            format!("{}Source: {}", indent(2), source.display()),
            format!("{}{}", indent(2), orientation_line(*dimensions)),
        ],
        ProcessEvent::VariantWritten {
            file_name,
            width,
            height,
        } => vec![format!("{}{}: {}x{}", indent(2), file_name, width, height)],
        ProcessEvent::VariantFailed { file_name, message } => {
            vec![format!("{}{}: failed ({})", indent(2), file_name, message)]
        }
    }
}

/// Format the end-of-run summary.
pub fn format_summary(stats: &RunStats) -> Vec<String> {
    vec![
        String::new(),
        format!("Processed: {}", stats.processed),
        format!("Skipped: {}", stats.skipped),
        format!("Errors: {}", stats.errors),
        format!("Total expected: {}", stats.expected),
    ]
}

/// Print the end-of-run summary to stdout.
pub fn print_summary(stats: &RunStats) {
    for line in format_summary(stats) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format the `check` report: per category, which sources exist.
pub fn format_check_report(report: &[CategoryCheck]) -> Vec<String> {
    let mut lines = Vec::new();

    for (i, category) in report.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.push(format!(
            "{} {} ({} images, {} outputs)",
            format_index(i + 1),
            category.name,
            category.present.len() + category.missing.len(),
            category.outputs
        ));
        for source in &category.present {
            lines.push(format!("{}ok      {}", indent(1), source.display()));
        }
        for source in &category.missing {
            lines.push(format!("{}missing {}", indent(1), source.display()));
        }
    }

    let present: usize = report.iter().map(|c| c.present.len()).sum();
    let total: usize = present + report.iter().map(|c| c.missing.len()).sum::<usize>();
    let outputs: usize = report.iter().map(|c| c.outputs).sum();
    lines.push(String::new());
    lines.push(format!(
        "{} of {} sources present, {} outputs",
        present, total, outputs
    ));

    lines
}

/// Print the `check` report to stdout.
pub fn print_check_report(report: &[CategoryCheck]) {
    for line in format_check_report(report) {
        println!("{}", line);
    }
}
