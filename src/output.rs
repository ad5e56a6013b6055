//! CLI output formatting for both operations.
//!
//! Paths are shown relative to the optimizer root, `/`-joined, so the output
//! reads the same on every platform.
//!
//! # Output Format
//!
//! ## Optimize
//!
//! ```text
//! static/images
//! 001 logo.jpg → logo.webp (48.2 KB → 9.7 KB)
//! 002 small.jpg (kept original, WebP was 1.1 KB)
//!     Excluded: excluded_folder/exclude.jpg
//!     Skipped: banner.webp (already WebP)
//!     Skipped: hero.jpg (shares hero.webp with another source)
//! Converted 2 images, kept 1, saved 38.5 KB
//! Image optimization complete.
//! ```
//!
//! ## Delete
//!
//! ```text
//! static/images
//!     Deleted: logo.webp
//!     Deleted: subdirectory/subdirectory-logo.webp
//! Deleted 2 files
//! Optimized images have been deleted.
//! ```
//!
//! ## Errors
//!
//! ```text
//! Error: Set optimizer.root in the settings file
//! ```
//!
//! # Architecture
//!
//! Each operation has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::optimize::{Converted, DeleteReport, OptimizeReport, SizeCheck};
use std::path::Path;

pub const OPTIMIZE_DONE: &str = "Image optimization complete.";
pub const DELETE_DONE: &str = "Optimized images have been deleted.";

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `path` relative to `root`, `/`-joined. Falls back to the full path.
fn relative_display(path: &Path, root: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) => rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
        Err(_) => path.display().to_string(),
    }
}

fn file_name_display(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Byte count in B / KB / MB with one decimal above a kilobyte.
fn format_bytes(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KB {
        format!("{} B", bytes)
    } else if b < KB * KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{:.1} MB", b / (KB * KB))
    }
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{} {}", n, one)
    } else {
        format!("{} {}", n, many)
    }
}

fn converted_line(index: usize, item: &Converted, root: &Path) -> String {
    let source = relative_display(&item.source, root);
    match item.check {
        SizeCheck::Kept => format!(
            "{} {} \u{2192} {} ({} \u{2192} {})",
            format_index(index),
            source,
            file_name_display(&item.compressed),
            format_bytes(item.source_len),
            format_bytes(item.compressed_len)
        ),
        SizeCheck::Discarded => format!(
            "{} {} (kept original, WebP was {})",
            format_index(index),
            source,
            format_bytes(item.compressed_len)
        ),
    }
}

// ============================================================================
// Optimize
// ============================================================================

pub fn format_optimize_report(report: &OptimizeReport) -> Vec<String> {
    let root = &report.root;
    let mut lines = vec![root.display().to_string()];

    for (i, item) in report.converted.iter().enumerate() {
        lines.push(converted_line(i + 1, item, root));
    }
    for path in &report.excluded {
        lines.push(format!(
            "{}Excluded: {}",
            indent(1),
            relative_display(path, root)
        ));
    }
    for path in &report.self_targets {
        lines.push(format!(
            "{}Skipped: {} (already WebP)",
            indent(1),
            relative_display(path, root)
        ));
    }
    for path in &report.collisions {
        lines.push(format!(
            "{}Skipped: {} (shares {} with another source)",
            indent(1),
            relative_display(path, root),
            file_name_display(&crate::scan::compressed_sibling(path))
        ));
    }

    lines.push(format!(
        "Converted {}, kept {}, saved {}",
        plural(report.converted.len(), "image", "images"),
        report.kept().count(),
        format_bytes(report.saved_bytes())
    ));
    lines.push(OPTIMIZE_DONE.to_string());
    lines
}

pub fn print_optimize_report(report: &OptimizeReport) {
    for line in format_optimize_report(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Delete
// ============================================================================

pub fn format_delete_report(report: &DeleteReport) -> Vec<String> {
    let root = &report.root;
    let mut lines = vec![root.display().to_string()];
    for path in &report.deleted {
        lines.push(format!(
            "{}Deleted: {}",
            indent(1),
            relative_display(path, root)
        ));
    }
    lines.push(format!(
        "Deleted {}",
        plural(report.deleted.len(), "file", "files")
    ));
    lines.push(DELETE_DONE.to_string());
    lines
}

pub fn print_delete_report(report: &DeleteReport) {
    for line in format_delete_report(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Errors
// ============================================================================

/// One-line error for the operator, using the error's `Display` message.
pub fn format_error(err: &dyn std::error::Error) -> String {
    format!("Error: {}", err)
}

pub fn print_error(err: &dyn std::error::Error) {
    eprintln!("{}", format_error(err));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn converted(root: &Path, rel: &str, source_len: u64, compressed_len: u64) -> Converted {
        let source = root.join(rel);
        let compressed = source.with_extension("webp");
        let check = if compressed_len < source_len {
            SizeCheck::Kept
        } else {
            SizeCheck::Discarded
        };
        Converted {
            source,
            compressed,
            source_len,
            compressed_len,
            check,
        }
    }

    // =========================================================================
    // Helper tests
    // =========================================================================

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn format_bytes_units() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn relative_display_joins_with_slash() {
        let root = PathBuf::from("static").join("images");
        let path = root.join("subdirectory").join("logo.png");
        assert_eq!(relative_display(&path, &root), "subdirectory/logo.png");
    }

    #[test]
    fn relative_display_outside_root() {
        let path = PathBuf::from("elsewhere.jpg");
        assert_eq!(
            relative_display(&path, Path::new("static")),
            "elsewhere.jpg"
        );
    }

    // =========================================================================
    // Optimize
    // =========================================================================

    #[test]
    fn optimize_report_lines() {
        let root = PathBuf::from("static/images");
        let report = OptimizeReport {
            root: root.clone(),
            converted: vec![
                converted(&root, "logo.jpg", 4096, 1024),
                converted(&root, "small.jpg", 500, 600),
            ],
            excluded: vec![root.join("excluded_folder").join("exclude.jpg")],
            self_targets: vec![root.join("banner.webp")],
            collisions: vec![root.join("hero.jpg"), root.join("hero.png")],
        };

        let lines = format_optimize_report(&report);
        assert_eq!(
            lines,
            vec![
                "static/images",
                "001 logo.jpg \u{2192} logo.webp (4.0 KB \u{2192} 1.0 KB)",
                "002 small.jpg (kept original, WebP was 600 B)",
                "    Excluded: excluded_folder/exclude.jpg",
                "    Skipped: banner.webp (already WebP)",
                "    Skipped: hero.jpg (shares hero.webp with another source)",
                "    Skipped: hero.png (shares hero.webp with another source)",
                "Converted 2 images, kept 1, saved 3.0 KB",
                "Image optimization complete.",
            ]
        );
    }

    #[test]
    fn optimize_report_empty_run() {
        let report = OptimizeReport {
            root: PathBuf::from("static"),
            ..Default::default()
        };
        let lines = format_optimize_report(&report);
        assert_eq!(
            lines,
            vec![
                "static",
                "Converted 0 images, kept 0, saved 0 B",
                OPTIMIZE_DONE,
            ]
        );
    }

    #[test]
    fn optimize_report_singular() {
        let root = PathBuf::from("static");
        let report = OptimizeReport {
            root: root.clone(),
            converted: vec![converted(&root, "a.png", 2048, 1024)],
            ..Default::default()
        };
        let lines = format_optimize_report(&report);
        assert_eq!(lines[2], "Converted 1 image, kept 1, saved 1.0 KB");
    }

    // =========================================================================
    // Delete
    // =========================================================================

    #[test]
    fn delete_report_lines() {
        let root = PathBuf::from("static/images");
        let report = DeleteReport {
            root: root.clone(),
            deleted: vec![
                root.join("logo.webp"),
                root.join("subdirectory").join("subdirectory-logo.webp"),
            ],
        };
        assert_eq!(
            format_delete_report(&report),
            vec![
                "static/images",
                "    Deleted: logo.webp",
                "    Deleted: subdirectory/subdirectory-logo.webp",
                "Deleted 2 files",
                "Optimized images have been deleted.",
            ]
        );
    }

    #[test]
    fn delete_report_nothing_to_delete() {
        let report = DeleteReport {
            root: PathBuf::from("static"),
            deleted: vec![],
        };
        let lines = format_delete_report(&report);
        assert_eq!(lines[1], "Deleted 0 files");
        assert_eq!(lines.last().map(String::as_str), Some(DELETE_DONE));
    }

    // =========================================================================
    // Errors
    // =========================================================================

    #[test]
    fn config_error_shows_message_not_debug() {
        use crate::config::ConfigError;
        use crate::optimize::OptimizeError;

        let err = OptimizeError::from(ConfigError::MissingRoot);
        assert_eq!(
            format_error(&err),
            "Error: Set optimizer.root in the settings file"
        );

        let err = OptimizeError::from(ConfigError::RootNotFound(PathBuf::from("nope")));
        assert_eq!(
            format_error(&err),
            "Error: Optimizer root is not a directory: nope"
        );
    }
}
