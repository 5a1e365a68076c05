//! Driver configuration
//!
//! Read from `config.json` in the platform config directory; a missing file
//! or missing keys fall back to defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Defaults for the command-line driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Feed file used when `--listings` is not given
    pub listings_path: Option<PathBuf>,
    /// Search limit used when `--limit` is not given; 0 keeps every match
    pub default_limit: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listings_path: None,
            default_limit: 0,
        }
    }
}

/// Get the path to the configuration file
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Cannot determine config directory")?;

    Ok(config_dir.join("listing-filter").join("config.json"))
}

/// Load the configuration from its default location
pub fn load_config() -> Result<Config> {
    let path = config_path()?;
    load_config_from(&path)
}

/// Load the configuration from `path`; a missing file yields the defaults
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let config: Config = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;

    Ok(config)
}
