//! Image conversion backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the single seam between the optimizer and
//! the codecs. The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend); tests use
//! [`tests::MockBackend`] to control output sizes exactly.

use super::params::ConvertParams;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Trait for image conversion backends.
pub trait ImageBackend {
    /// Decode `params.source` and write it to `params.output` as WebP,
    /// replacing any existing file there.
    fn convert(&self, params: &ConvertParams) -> Result<(), BackendError>;
}
