use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not locate a config directory")]
    NoConfigDir,

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Main configuration structure
///
/// Loaded from the config file when one exists, with the environment taking
/// precedence: `BOOKSTAND_API_URL` overrides whatever the file says.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api: ApiConfig,
}

impl Config {
    /// Load config from the default location, falling back to defaults when
    /// no file exists yet.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        let mut config = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?
        } else {
            Self::default()
        };

        if let Ok(url) = std::env::var("BOOKSTAND_API_URL") {
            config.api.base_url = url;
        }

        Ok(config)
    }

    /// Save config to disk
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        std::fs::write(&config_path, contents)?;

        Ok(())
    }

    /// XDG config dir on Unix-like systems, AppData on Windows
    fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NoConfigDir)?
            .join("bookstand");

        Ok(config_dir.join("config.toml"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the book/review API server
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:12345".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}
