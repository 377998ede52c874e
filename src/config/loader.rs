//! Configuration loading from file system
//!
//! Handles loading and parsing ~/.sticky/config.json.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use super::types::SizingConfig;
use crate::error::{Result, StickyError};

/// Default config location: ~/.sticky/config.json
pub fn default_config_path() -> PathBuf {
    PathBuf::from(shellexpand::tilde("~/.sticky/config.json").as_ref())
}

/// Load configuration from ~/.sticky/config.json
///
/// Returns SizingConfig::default() if the file is missing, unreadable, unparsable
/// or fails validation.
#[instrument(name = "load_config")]
pub fn load_config() -> SizingConfig {
    let config_path = default_config_path();
    if !config_path.exists() {
        info!(path = %config_path.display(), "Config file not found, using defaults");
        return SizingConfig::default();
    }

    match load_config_from(&config_path) {
        Ok(config) => {
            info!(path = %config_path.display(), "Successfully loaded config");
            config
        }
        Err(e) => {
            warn!(
                error = %e,
                path = %config_path.display(),
                "Failed to load config, using defaults"
            );
            SizingConfig::default()
        }
    }
}

/// Load and validate a config file at an explicit path
pub fn load_config_from(path: &Path) -> Result<SizingConfig> {
    let contents = fs::read_to_string(path).map_err(|source| StickyError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let config: SizingConfig = serde_json::from_str(&contents)?;
    config.validate().map_err(StickyError::Config)?;
    Ok(config)
}
