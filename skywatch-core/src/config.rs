//! API key configuration.
//!
//! Resolution order: explicit value (CLI flag) > `OPENWEATHER_API_KEY`
//! environment variable > `api_key` in the config file. A missing key is not
//! an error here; the client reports it as the fixed fetch failure instead.

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Environment variable consulted for the provider API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// On-disk configuration.
///
/// ```toml
/// api_key = "..."
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub api_key: Option<String>,
}

impl Config {
    /// Load from disk; a missing file is an empty config, an unreadable or
    /// malformed file is an error worth reporting at startup.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skywatch", "skywatch")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Resolve the API key from the three sources, highest priority first.
    pub fn resolve_api_key(explicit: Option<String>) -> Result<Option<String>> {
        if let Some(key) = explicit {
            return Ok(Some(key));
        }
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                return Ok(Some(key));
            }
        }
        Ok(Self::load()?.api_key)
    }
}
