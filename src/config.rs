//! Settings module.
//!
//! Handles loading, validating, and merging the settings file. Stock defaults
//! are overridden by whatever the user file specifies; everything else keeps
//! its default.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional except optimizer.root - defaults shown below
//!
//! [optimizer]
//! root = "static/images"            # Directory to optimize (required)
//! quality = 100                     # WebP quality (0-100)
//! types = ["jpg", "jpeg", "png"]    # Eligible source extensions (exact case)
//! excluded_folders = []             # Folder names never optimized
//!
//! [static]
//! url = "/static/"                  # Public URL prefix for static files
//! dirs = []                         # Static search locations, in order
//! ```
//!
//! Relative paths are resolved against the directory holding the settings
//! file. Unknown keys are rejected to catch typos early.

use crate::imaging::Quality;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Set optimizer.root in the settings file")]
    MissingRoot,
    #[error("Optimizer root is not a directory: {0}")]
    RootNotFound(PathBuf),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Everything read from the settings file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Batch optimizer settings.
    pub optimizer: OptimizerConfig,
    /// Static-file resolution used by the markup helper.
    #[serde(rename = "static")]
    pub static_files: StaticConfig,
}

impl Settings {
    /// Rebase relative paths onto `base`.
    fn resolve_paths(mut self, base: &Path) -> Self {
        if let Some(root) = self.optimizer.root.take() {
            self.optimizer.root = Some(base.join(root));
        }
        self.static_files.dirs = self
            .static_files
            .dirs
            .into_iter()
            .map(|dir| base.join(dir))
            .collect();
        self
    }
}

/// Batch optimizer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptimizerConfig {
    /// Directory walked by `optimize` and `delete_all`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    /// WebP quality. Kept signed so negative values reach validation
    /// instead of failing as a type error.
    pub quality: i64,
    /// Eligible source extensions, without the dot. Compared case-sensitively.
    pub types: Vec<String>,
    /// Folder names whose direct children are never optimized.
    pub excluded_folders: Vec<String>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            root: None,
            quality: 100,
            types: vec!["jpg".into(), "jpeg".into(), "png".into()],
            excluded_folders: Vec::new(),
        }
    }
}

impl OptimizerConfig {
    /// Config rooted at `root` with every other value at its default.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            ..Self::default()
        }
    }

    /// Validate values before any file is touched.
    ///
    /// Returns the root directory on success.
    pub fn validate(&self) -> Result<&Path, ConfigError> {
        let root = self.root.as_deref().ok_or(ConfigError::MissingRoot)?;
        self.quality()?;
        if !root.is_dir() {
            return Err(ConfigError::RootNotFound(root.to_path_buf()));
        }
        Ok(root)
    }

    /// Encoding quality, or a validation error when outside 0-100.
    pub fn quality(&self) -> Result<Quality, ConfigError> {
        Quality::new(self.quality).ok_or_else(|| {
            ConfigError::Validation(format!(
                "optimizer.quality must be 0-100, got {}",
                self.quality
            ))
        })
    }

    pub fn is_eligible_extension(&self, ext: &str) -> bool {
        self.types.iter().any(|t| t == ext)
    }

    pub fn is_excluded_folder(&self, name: &str) -> bool {
        self.excluded_folders.iter().any(|f| f == name)
    }
}

/// Static-file resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticConfig {
    /// Public URL prefix, e.g. `/static/` or `https://cdn.example.com/`.
    pub url: String,
    /// Directories searched in order when probing for a file.
    pub dirs: Vec<PathBuf>,
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            url: "/static/".to_string(),
            dirs: Vec::new(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default settings as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(Settings::default())
        .map_err(|e| ConfigError::Validation(format!("stock defaults: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a settings file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_settings(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load settings from `path`, merged over stock defaults.
///
/// A missing file yields the defaults. Range checks on the optimizer section
/// happen in [`OptimizerConfig::validate`], right before the optimizer runs,
/// so the markup helper can still be used with an incomplete file.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match load_raw_settings(path)? {
        Some(overlay) => merge_toml(base, overlay),
        None => base,
    };
    let settings: Settings = merged.try_into()?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(settings.resolve_paths(base_dir))
}
