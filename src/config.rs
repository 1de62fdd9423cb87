//! Normalizer configuration.
//!
//! Handles loading, validating, and layering `imgnorm.toml`. Values are
//! resolved in three layers, each overriding the previous:
//!
//! ```text
//! stock defaults  →  imgnorm.toml  →  command-line flags
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [resize]
//! image_size = 256              # Target size in pixels
//! resize_mode = "border"        # no | keep_ratio | center_crop | border
//! resize_only_if_bigger = false # Leave images that already fit untouched
//!
//! [processing]
//! max_processes = 4             # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::ResizeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid option for resize_mode: {0}")]
    UnknownResizeMode(String),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `imgnorm.toml`.
///
/// All fields have defaults; a config file only needs the values it changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// How every image is resized.
    pub resize: ResizeConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl Config {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resize.image_size == 0 {
            return Err(ConfigError::Validation(
                "resize.image_size must be greater than 0".into(),
            ));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// Resize policy settings; maps one-to-one onto a [`Normalizer`](crate::Normalizer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizeConfig {
    /// Target size in pixels (square side, or short side for `keep_ratio`).
    pub image_size: u32,
    /// Resize policy.
    pub resize_mode: ResizeMode,
    /// Only resize images larger than `image_size` (short side for
    /// `keep_ratio`/`center_crop`, long side for `border`).
    pub resize_only_if_bigger: bool,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            image_size: 256,
            resize_mode: ResizeMode::Border,
            resize_only_if_bigger: false,
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer that the config file and CLI flags merge onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(Config::default()).expect("default config must serialize")
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

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge overlays onto a base value in order, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlays: impl IntoIterator<Item = toml::Value>,
) -> Result<Config, ConfigError> {
    let merged = overlays.into_iter().fold(base, merge_toml);
    let config: Config = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config: stock defaults, then the file at `path` (if it exists), then `overrides`.
pub fn load_config(path: &Path, overrides: Option<toml::Value>) -> Result<Config, ConfigError> {
    let base = stock_defaults_value();
    let file = load_raw_config(path)?;
    resolve_config(base, file.into_iter().chain(overrides))
}

/// Returns a fully-commented stock `imgnorm.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# imgnorm configuration
# =====================
# All options are optional. Remove or comment out anything you don't need
# to change; missing values fall back to the defaults shown here.
# Command-line flags override values from this file.

# ---------------------------------------------------------------------------
# Resizing
# ---------------------------------------------------------------------------
[resize]
# Target size in pixels.
image_size = 256

# How images are brought to the target size:
#   "no"          - keep the original size
#   "keep_ratio"  - scale so the short side equals image_size
#   "center_crop" - keep_ratio, then crop a centered image_size square
#   "border"      - scale so the long side equals image_size, then pad
#                   with white to an image_size square
resize_mode = "border"

# Leave images alone unless they are bigger than image_size
# (short side for keep_ratio/center_crop, long side for border).
resize_only_if_bigger = false

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel workers. Omit to use all CPU cores.
# Values above the core count are clamped down.
# max_processes = 4
"##
}
