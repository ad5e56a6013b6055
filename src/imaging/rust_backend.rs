//! Pure Rust decode + libwebp encode.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP) | `image::ImageReader` (format sniffed from content) |
//! | Encode → WebP | `webp::Encoder::encode_simple` (lossy, quality 0-100) |
//!
//! The `image` crate's own WebP encoder is lossless-only, which ignores the
//! quality setting entirely.

use super::backend::{BackendError, ImageBackend};
use super::params::ConvertParams;
use image::{DynamicImage, ImageReader};
use std::path::Path;

/// Backend using the `image` crate for decoding and `webp` for encoding.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .with_guessed_format()
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// Encode as lossy WebP and write to `path`.
///
/// libwebp only takes 8-bit RGB/RGBA, so everything else is converted first.
fn save_webp(img: &DynamicImage, path: &Path, quality: u8) -> Result<(), BackendError> {
    let converted;
    let img = match img {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => img,
        other if other.color().has_alpha() => {
            converted = DynamicImage::ImageRgba8(other.to_rgba8());
            &converted
        }
        other => {
            converted = DynamicImage::ImageRgb8(other.to_rgb8());
            &converted
        }
    };

    let encoder = webp::Encoder::from_image(img).map_err(|e| {
        BackendError::ProcessingFailed(format!("WebP encoder setup failed: {}", e))
    })?;
    let encoded = encoder
        .encode_simple(false, f32::from(quality))
        .map_err(|e| BackendError::ProcessingFailed(format!("WebP encode failed: {:?}", e)))?;
    std::fs::write(path, &*encoded)?;
    Ok(())
}

impl ImageBackend for RustBackend {
    fn convert(&self, params: &ConvertParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;
        save_webp(&img, &params.output, params.quality.value())
    }
}
