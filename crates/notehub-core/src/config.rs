//! Configuration management for notehub.
//!
//! Loads configuration from ${NOTEHUB_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Returns the default config template with comments.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for notehub configuration and data directories.
    //!
    //! NOTEHUB_HOME resolution order:
    //! 1. NOTEHUB_HOME environment variable (if set)
    //! 2. ~/.config/notehub (default)

    use std::path::PathBuf;

    /// Returns the notehub home directory.
    pub fn notehub_home() -> PathBuf {
        if let Ok(home) = std::env::var("NOTEHUB_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".notehub"),
            |h| h.join(".config").join("notehub"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        notehub_home().join("config.toml")
    }

    /// Returns the path to the persisted session file.
    pub fn session_path() -> PathBuf {
        notehub_home().join("session.json")
    }

    /// Returns the directory that holds rolling log files.
    pub fn logs_dir() -> PathBuf {
        notehub_home().join("logs")
    }

    /// Fallback download directory when the config leaves it empty.
    pub fn default_download_dir() -> PathBuf {
        dirs::download_dir().unwrap_or_else(|| notehub_home().join("downloads"))
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the notes server.
    pub server_url: String,

    /// Request timeout in seconds (0 disables)
    pub request_timeout_secs: u32,

    /// Where downloaded notes land (empty means the platform default)
    pub download_dir: String,
}

impl Config {
    pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
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

    /// Returns the configured request timeout, if any.
    pub fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(u64::from(self.request_timeout_secs)))
        }
    }

    /// Resolves the directory downloaded notes are written to.
    pub fn effective_download_dir(&self) -> PathBuf {
        let trimmed = self.download_dir.trim();
        if trimmed.is_empty() {
            paths::default_download_dir()
        } else {
            PathBuf::from(trimmed)
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

    /// Saves only the `server_url` field to the default config path.
    pub fn save_server_url(url: &str) -> Result<()> {
        Self::save_server_url_to(&paths::config_path(), url)
    }

    /// Saves only the `server_url` field to a specific config file path.
    ///
    /// Creates the file from the template if missing; otherwise edits the
    /// existing document in place so user comments survive.
    pub fn save_server_url_to(path: &Path, url: &str) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        let existing = if path.exists() {
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?
        } else {
            default_config_template().to_string()
        };

        let mut doc: DocumentMut = existing
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        doc["server_url"] = value(url);

        Self::write_config(path, &doc.to_string())
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
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: Self::DEFAULT_SERVER_URL.to_string(),
            request_timeout_secs: 0,
            download_dir: String::new(),
        }
    }
}
