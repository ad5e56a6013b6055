//! Parameter types for image conversion.
//!
//! These structs describe *what* to do, not *how* to do it. They sit between
//! the optimizer (which decides which files to convert) and the
//! [`backend`](super::backend) (which does the pixel work), so the optimizer
//! can run against a mock in tests.

use std::path::PathBuf;

/// Lossy encoding quality (0-100). Out-of-range values are rejected, not clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: i64) -> Option<Self> {
        u8::try_from(value).ok().filter(|v| *v <= 100).map(Self)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(100)
    }
}

/// Parameters for one source → compressed sibling conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub quality: Quality,
}
