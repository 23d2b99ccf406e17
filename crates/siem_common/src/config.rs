//! Configuration for the console.
//!
//! Loads settings from ~/.config/siemplus/config.toml or uses defaults.
//! The manager URL resolves flag > $SIEMPLUS_URL > config file > default.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the manager API
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_server_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Default config file location under the user config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("siemplus").join("config.toml"))
    }

    /// Load the config file if present, then apply the $SIEMPLUS_URL
    /// override. An unreadable file logs a warning and falls back to
    /// defaults rather than aborting the command.
    pub fn load() -> Self {
        let mut config = match Self::default_path() {
            Some(path) if path.exists() => match Self::load_from(&path) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Ignoring config at {:?}: {:#}", path, e);
                    Self::default()
                }
            },
            _ => Self::default(),
        };

        if let Ok(url) = std::env::var("SIEMPLUS_URL") {
            if !url.is_empty() {
                config.server_url = url;
            }
        }

        config
    }

    /// Parse a config file at an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {:?}", path))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {:?}", path))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_gets_field_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "server_url = \"https://siem.example.com\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.server_url, "https://siem.example.com");
        assert_eq!(config.timeout_secs, default_timeout_secs());
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "server_url = [not toml").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 10);
    }
}
