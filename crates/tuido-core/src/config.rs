//! Configuration management for tuido.
//!
//! Loads configuration from ${TUIDO_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the todo API server.
    pub api_url: String,

    /// HTTP request timeout in seconds (0 disables).
    pub request_timeout_secs: u64,
}

impl Config {
    const DEFAULT_API_URL: &str = "http://localhost:3000";
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Loads configuration from the default config path, applying env
    /// overrides (`TUIDO_API_URL`).
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&paths::config_path())?;
        if let Ok(url) = std::env::var("TUIDO_API_URL")
            && !url.is_empty()
        {
            config.api_url = url;
        }
        Ok(config)
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// The base URL with any trailing slash stripped, so request paths can
    /// always be appended with a single `/`.
    pub fn api_base(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.request_timeout_secs))
        }
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path)
            .with_context(|| format!("Failed to move config into place at {}", path.display()))?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: Self::DEFAULT_API_URL.to_string(),
            request_timeout_secs: Self::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

fn default_config_template() -> &'static str {
    r#"# tuido configuration

# Base URL of the todo API server
api_url = "http://localhost:3000"

# HTTP request timeout in seconds (0 disables)
request_timeout_secs = 30
"#
}

pub mod paths {
    //! Path resolution for tuido configuration and data directories.
    //!
    //! TUIDO_HOME resolution order:
    //! 1. TUIDO_HOME environment variable (if set)
    //! 2. ~/.config/tuido (default)

    use std::path::PathBuf;

    /// Returns the tuido home directory.
    ///
    /// Checks TUIDO_HOME env var first, falls back to ~/.config/tuido
    pub fn tuido_home() -> PathBuf {
        if let Ok(home) = std::env::var("TUIDO_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("tuido"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        tuido_home().join("config.toml")
    }

    /// Returns the path to the log directory.
    pub fn logs_dir() -> PathBuf {
        tuido_home().join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.api_url, "http://localhost:3000");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, r#"api_url = "https://todos.example.com/""#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_url, "https://todos.example.com/");
        assert_eq!(config.api_base(), "https://todos.example.com");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_url = [not toml").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn init_writes_template_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        Config::init(&path).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("api_url ="));

        // Template must parse back into a valid config.
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_url, "http://localhost:3000");

        assert!(Config::init(&path).is_err());
    }

    #[test]
    fn zero_timeout_disables() {
        let config = Config {
            request_timeout_secs: 0,
            ..Config::default()
        };
        assert!(config.request_timeout().is_none());
    }
}
