//! Filesystem walking and source selection.
//!
//! Walks the optimizer root recursively and classifies every regular file.
//! Both operations share the walk:
//!
//! - `optimize` keeps [`Candidate::Eligible`] entries.
//! - `delete_all` keeps every file with the compressed extension, whatever
//!   its classification.
//!
//! ## Rules
//!
//! ```text
//! static/images/
//! ├── logo.jpg                 # eligible
//! ├── logo.webp                # compressed sibling (deleted by delete_all)
//! ├── notes.txt                # ineligible extension
//! ├── LOGO.JPG                 # ineligible: extensions are case-sensitive
//! ├── .cache/
//! │   └── hidden.png           # eligible: hidden directories are walked
//! ├── banner.jpg               # collision: banner.png maps to the same
//! ├── banner.png               #   banner.webp, so neither is converted
//! └── excluded_folder/
//!     ├── exclude.jpg          # excluded: parent folder name is listed
//!     └── nested/keep.jpg      # eligible: only the direct parent counts
//! ```
//!
//! Symbolic links are not followed and never classified.

use crate::config::OptimizerConfig;
use crate::imaging::WEBP_EXTENSION;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// How the optimizer treats one regular file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    /// Convert it.
    Eligible(PathBuf),
    /// Extension is eligible but the parent folder is excluded.
    Excluded(PathBuf),
    /// Extension is eligible but the file already has the compressed
    /// extension; converting would overwrite the source with itself.
    SelfTarget(PathBuf),
    /// Eligible, but another eligible source in the same directory maps to
    /// the same compressed sibling (`logo.jpg` and `logo.png`).
    Collision(PathBuf),
    /// Extension not in the eligible set.
    Ignored(PathBuf),
}

impl Candidate {
    pub fn path(&self) -> &Path {
        match self {
            Candidate::Eligible(p)
            | Candidate::Excluded(p)
            | Candidate::SelfTarget(p)
            | Candidate::Collision(p)
            | Candidate::Ignored(p) => p,
        }
    }
}

/// Extension of `path` exactly as written, without the dot.
pub fn extension_of(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}

/// Name of the directory directly containing `path`.
fn parent_folder_name(path: &Path) -> Option<&str> {
    path.parent()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
}

/// The compressed sibling of `source`: same directory and stem, `.webp`.
pub fn compressed_sibling(source: &Path) -> PathBuf {
    source.with_extension(WEBP_EXTENSION)
}

pub fn is_compressed(path: &Path) -> bool {
    extension_of(path) == Some(WEBP_EXTENSION)
}

/// Classify one regular file.
pub fn classify(path: &Path, config: &OptimizerConfig) -> Candidate {
    let owned = path.to_path_buf();
    let Some(ext) = extension_of(path).filter(|ext| config.is_eligible_extension(ext)) else {
        return Candidate::Ignored(owned);
    };
    if parent_folder_name(path).is_some_and(|name| config.is_excluded_folder(name)) {
        Candidate::Excluded(owned)
    } else if ext == WEBP_EXTENSION {
        Candidate::SelfTarget(owned)
    } else {
        Candidate::Eligible(owned)
    }
}

/// Every regular file under `root`, sorted per directory by file name.
///
/// The walk runs to completion before returning, so files written
/// afterwards are never revisited.
pub fn regular_files(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Walk `root` and classify every regular file.
///
/// Eligible sources sharing a compressed sibling are all demoted to
/// [`Candidate::Collision`]: one `.webp` cannot be checked against two
/// sources of different sizes.
pub fn scan(root: &Path, config: &OptimizerConfig) -> Result<Vec<Candidate>, ScanError> {
    let mut candidates: Vec<Candidate> = regular_files(root)?
        .iter()
        .map(|path| classify(path, config))
        .collect();

    let mut sharing: HashMap<PathBuf, usize> = HashMap::new();
    for candidate in &candidates {
        if let Candidate::Eligible(path) = candidate {
            *sharing.entry(compressed_sibling(path)).or_default() += 1;
        }
    }
    for candidate in &mut candidates {
        if let Candidate::Eligible(path) = candidate {
            if sharing.get(&compressed_sibling(path)).is_some_and(|&n| n > 1) {
                let path = std::mem::take(path);
                *candidate = Candidate::Collision(path);
            }
        }
    }
    Ok(candidates)
}
