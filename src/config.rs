//! Job configuration module.
//!
//! Handles loading, validating, and merging the `variants.toml` file that
//! tells the variant generator what to produce. Stock defaults are overridden
//! by the user file, and command-line flags override both.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! # Variant string; absent means one default variant at the original size.
//! # variants = "name=small,w=96,h=64;name=large,w=500,h=500"
//!
//! # Output encoder by extension; absent means "same as the source".
//! # output_format = "webp"
//!
//! name_separator = "_"      # Between the source stem and the variant name
//! output_dir = "variants"   # Where variant files are written
//!
//! [processing]
//! max_processes = 4         # Max parallel render workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early. The variant string itself
//! is not interpreted here; it is handed to
//! [`parse_variants`](crate::variants::parse_variants) as-is.

use crate::naming::DEFAULT_NAME_SEPARATOR;
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
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Variant generation settings loaded from `variants.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobConfig {
    /// Raw variant configuration string.
    pub variants: Option<String>,
    /// Output extension overriding the source's (e.g. `"webp"`).
    pub output_format: Option<String>,
    /// Separator between the source stem and the variant name.
    pub name_separator: String,
    /// Directory variant files are written to.
    pub output_dir: String,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            variants: None,
            output_format: None,
            name_separator: DEFAULT_NAME_SEPARATOR.to_string(),
            output_dir: "variants".to_string(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl JobConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name_separator.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "name_separator must not contain path separators".into(),
            ));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel render workers.
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
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(JobConfig::default())?)
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

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<JobConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: JobConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the given file.
///
/// A missing file yields the stock defaults. Otherwise user values are merged
/// on top of the defaults, unknown keys rejected, and the result validated.
pub fn load_config(path: &Path) -> Result<JobConfig, ConfigError> {
    resolve_config(load_raw_config(path)?)
}

/// Returns a fully-commented stock `variants.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Blob Variants Configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Variants
# ---------------------------------------------------------------------------
# One segment per variant, terminated by ';'. Options are separated by ','
# and written as key=value:
#   name  suffix of the output file name
#   w     target width in pixels
#   h     target height in pixels
# Give only one of w/h to keep the aspect ratio. Images are never upscaled.
# Whitespace is ignored. A repeated name ends the list.
# Omit to produce a single copy of the source at its original size.
# variants = "name=small,w=96,h=64;name=large,w=500,h=500"

# ---------------------------------------------------------------------------
# Output
# ---------------------------------------------------------------------------
# Encoder for every variant: png, jpg, jpeg, gif or webp.
# Omit to keep the source's format.
# output_format = "webp"

# Output files are named <source stem><separator><variant name>.<extension>
name_separator = "_"

# Directory variant files are written to.
output_dir = "variants"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel render workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
