//! Shared test utilities for the picture-optimizer test suite.
//!
//! Provides synthetic image writers and a small fixture tree that mirrors a
//! typical static images folder.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! create_fixture_tree(tmp.path());
//! // logo.jpg, logo-auto-attributes.jpg, small.jpg,
//! // subdirectory/subdirectory-logo.png, excluded_folder/exclude.jpg, notes.txt
//! ```

use image::{ImageEncoder, RgbImage, RgbaImage};
use std::path::Path;
use walkdir::WalkDir;

// =========================================================================
// Synthetic images
// =========================================================================

/// Write a gradient JPEG at maximum quality (large on disk, so WebP wins).
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new_with_quality(writer, 100)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Write a semi-transparent gradient PNG.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x % 256) as u8, (y % 256) as u8, 64, 200])
    });
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}

/// Write `len` filler bytes, creating parent directories.
pub fn write_bytes(path: &Path, len: usize) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, vec![0xAB; len]).unwrap();
}

// =========================================================================
// Fixture tree
// =========================================================================

/// Populate `root` with placeholder files (content is not a real image;
/// pair with a mock backend).
pub fn create_fixture_tree(root: &Path) {
    for rel in [
        "logo.jpg",
        "logo-auto-attributes.jpg",
        "small.jpg",
        "subdirectory/subdirectory-logo.png",
        "excluded_folder/exclude.jpg",
        "notes.txt",
    ] {
        write_bytes(&root.join(rel), 1000);
    }
}

/// Every file under `root`, as sorted `/`-joined relative paths.
pub fn file_names(root: &Path) -> Vec<String> {
    let mut names: Vec<String> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(root)
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().to_string())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect();
    names.sort();
    names
}
