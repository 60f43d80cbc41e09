//! Panel configuration persisted as JSON.
//!
//! The file lives in the standard configuration directory
//! (`~/.config/propanel/config.json` on most platforms) unless
//! `PROPANEL_CONFIG_PATH` points elsewhere. A missing file yields defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dirs_next::{config_dir, home_dir};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Environment variable allowing callers to override the config file path.
pub const CONFIG_PATH_ENV: &str = "PROPANEL_CONFIG_PATH";

/// Default filename for the JSON payload.
pub const CONFIG_FILE_NAME: &str = "config.json";

pub const DEFAULT_UNDO_LIMIT: usize = 100;

/// Error surfaced when reading or writing the configuration fails.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure (for example, permissions or missing directory).
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization or deserialization failure.
    #[error("config serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Settings consumed by the panel and its command stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Hint passed to text entries telling the host to debounce keystrokes.
    pub debounce_input: bool,
    /// Maximum number of undo steps retained by the command stack.
    pub undo_limit: usize,
    /// Label overrides keyed by the source label.
    pub translations: IndexMap<String, String>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            debounce_input: true,
            undo_limit: DEFAULT_UNDO_LIMIT,
            translations: IndexMap::new(),
        }
    }
}

impl PanelConfig {
    /// Load from the default location. An unreadable or malformed file there
    /// falls back to defaults with a warning.
    pub fn load() -> Self {
        let path = default_config_path();
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(error) => {
                warn!(path = %path.display(), error = %error, "Failed to load panel config; using defaults");
                Self::default()
            }
        }
    }

    /// Load from an explicit path. A missing file yields defaults; malformed
    /// content is an error.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(data) => {
                let config = serde_json::from_str(&data)?;
                debug!(path = %path.display(), "panel config loaded");
                Ok(config)
            }
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(error) => Err(ConfigError::Io(error)),
        }
    }

    /// Write the configuration, creating parent directories as needed.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Resolve the config path from `PROPANEL_CONFIG_PATH` or the config directory.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = env::var(CONFIG_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return expand_tilde(trimmed);
        }
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("propanel")
        .join(CONFIG_FILE_NAME)
}

fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    match path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        Some(rest) => home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest),
        None => PathBuf::from(path),
    }
}
