//! Configuration management for badmap.
//!
//! This module handles the layered configuration with the following
//! precedence:
//! 1. Environment variables (highest priority)
//! 2. JSON config file
//! 3. Default values (lowest priority)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{BadmapError, Result};
use crate::registry::CollisionPolicy;

/// Environment variable overriding the colormap source directory.
pub const DATA_DIR_ENV: &str = "BADMAP_DATA_DIR";

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the colormap source files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// What to do when a registered name already exists in the shared
    /// namespace
    #[serde(default)]
    pub collision_policy: CollisionPolicy,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Build a configuration for a specific source directory, defaults
    /// elsewhere.
    pub fn for_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Load configuration from defaults and the environment.
    pub fn from_env() -> Self {
        let mut config = Config::default();
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            config.data_dir = PathBuf::from(dir);
        }
        config
    }

    /// Load configuration from a JSON file, then apply environment
    /// overrides.
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = serde_json::from_str(&content)?;
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            config.data_dir = PathBuf::from(dir);
        }
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(BadmapError::Config {
                message: "Colormap data directory cannot be empty".to_string(),
            });
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(BadmapError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            collision_policy: CollisionPolicy::default(),
            log_level: default_log_level(),
        }
    }
}

// Default value functions for serde
fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_log_level() -> String {
    "info".to_string()
}
