//! Image conversion.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** (JPEG, PNG, TIFF, WebP) | `image::ImageReader` |
//! | **Encode → WebP** (lossy, quality-driven) | `webp::Encoder` |
//!
//! The module is split into:
//! - **Parameters**: what to convert, where, and at which quality
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use params::{ConvertParams, Quality};
pub use rust_backend::RustBackend;

/// Extension of every compressed sibling, without the dot.
pub const WEBP_EXTENSION: &str = "webp";

/// MIME type advertised on the `<source>` element.
pub const WEBP_MIME: &str = "image/webp";
