//! Batch WebP optimization and cleanup.
//!
//! Runs out-of-band, before or independent of rendering. For every eligible
//! source under the optimizer root it writes a compressed sibling next to
//! it, then keeps that sibling only if it actually saved bytes:
//!
//! ```text
//! static/images/
//! ├── logo.jpg          48 KB
//! ├── logo.webp         11 KB   kept (strictly smaller)
//! ├── small.jpg          1 KB
//! └── (small.webp)       1 KB   written, then deleted (not smaller)
//! ```
//!
//! The sibling's existence on disk is the only record of optimization; the
//! markup helper probes for it at render time.
//!
//! ## Failure policy
//!
//! Configuration is validated before the walk, so a bad setting never touches
//! the filesystem. After that, the first decode, encode or filesystem error
//! aborts the run and propagates; files converted before the failure stay
//! converted.

use crate::config::{ConfigError, OptimizerConfig};
use crate::imaging::{BackendError, ConvertParams, ImageBackend};
use crate::scan::{self, Candidate, ScanError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum OptimizeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
}

/// What happened to one converted source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeCheck {
    /// Sibling is strictly smaller and stays on disk.
    Kept,
    /// Sibling was not smaller and has been deleted.
    Discarded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converted {
    pub source: PathBuf,
    pub compressed: PathBuf,
    pub source_len: u64,
    pub compressed_len: u64,
    pub check: SizeCheck,
}

impl Converted {
    pub fn saved_bytes(&self) -> u64 {
        match self.check {
            SizeCheck::Kept => self.source_len - self.compressed_len,
            SizeCheck::Discarded => 0,
        }
    }
}

/// Result of an [`optimize`] run.
#[derive(Debug, Default)]
pub struct OptimizeReport {
    pub root: PathBuf,
    /// Every source that went through the codec, in walk order.
    pub converted: Vec<Converted>,
    /// Eligible by extension but under an excluded folder.
    pub excluded: Vec<PathBuf>,
    /// Eligible sources already carrying the compressed extension.
    pub self_targets: Vec<PathBuf>,
    /// Eligible sources left alone because another source maps to the same
    /// compressed sibling.
    pub collisions: Vec<PathBuf>,
}

impl OptimizeReport {
    pub fn kept(&self) -> impl Iterator<Item = &Converted> {
        self.converted.iter().filter(|c| c.check == SizeCheck::Kept)
    }

    pub fn discarded(&self) -> impl Iterator<Item = &Converted> {
        self.converted
            .iter()
            .filter(|c| c.check == SizeCheck::Discarded)
    }

    pub fn saved_bytes(&self) -> u64 {
        self.converted.iter().map(Converted::saved_bytes).sum()
    }
}

/// Result of a [`delete_all`] run.
#[derive(Debug, Default)]
pub struct DeleteReport {
    pub root: PathBuf,
    pub deleted: Vec<PathBuf>,
}

/// Convert every eligible source under the configured root to WebP.
pub fn optimize(
    config: &OptimizerConfig,
    backend: &impl ImageBackend,
) -> Result<OptimizeReport, OptimizeError> {
    let root = config.validate()?;
    let quality = config.quality()?;

    let mut report = OptimizeReport {
        root: root.to_path_buf(),
        ..OptimizeReport::default()
    };

    for candidate in scan::scan(root, config)? {
        match candidate {
            Candidate::Eligible(source) => {
                let compressed = scan::compressed_sibling(&source);
                backend.convert(&ConvertParams {
                    source: source.clone(),
                    output: compressed.clone(),
                    quality,
                })?;
                let converted = apply_size_check(source, compressed)?;
                debug!(
                    source = %converted.source.display(),
                    source_len = converted.source_len,
                    compressed_len = converted.compressed_len,
                    check = ?converted.check,
                    "converted"
                );
                report.converted.push(converted);
            }
            Candidate::Excluded(source) => {
                debug!(source = %source.display(), "skipped: excluded folder");
                report.excluded.push(source);
            }
            Candidate::SelfTarget(source) => {
                warn!(
                    source = %source.display(),
                    "skipped: source already has the compressed extension"
                );
                report.self_targets.push(source);
            }
            Candidate::Collision(source) => {
                warn!(
                    source = %source.display(),
                    sibling = %scan::compressed_sibling(&source).display(),
                    "skipped: another source maps to the same compressed file"
                );
                report.collisions.push(source);
            }
            Candidate::Ignored(_) => {}
        }
    }

    Ok(report)
}

/// Keep `compressed` only if it is strictly smaller than `source`.
fn apply_size_check(source: PathBuf, compressed: PathBuf) -> Result<Converted, OptimizeError> {
    let source_len = fs::metadata(&source)?.len();
    let compressed_len = fs::metadata(&compressed)?.len();
    let check = if compressed_len < source_len {
        SizeCheck::Kept
    } else {
        fs::remove_file(&compressed)?;
        SizeCheck::Discarded
    };
    Ok(Converted {
        source,
        compressed,
        source_len,
        compressed_len,
        check,
    })
}

/// Delete every compressed file under the configured root.
///
/// Exclusion rules do not apply: siblings under excluded folders go too.
pub fn delete_all(config: &OptimizerConfig) -> Result<DeleteReport, OptimizeError> {
    let root = config.validate()?;
    delete_compressed_under(root)
}

fn delete_compressed_under(root: &Path) -> Result<DeleteReport, OptimizeError> {
    let mut report = DeleteReport {
        root: root.to_path_buf(),
        ..DeleteReport::default()
    };
    for path in scan::regular_files(root)? {
        if scan::is_compressed(&path) {
            fs::remove_file(&path)?;
            debug!(path = %path.display(), "deleted");
            report.deleted.push(path);
        }
    }
    Ok(report)
}
