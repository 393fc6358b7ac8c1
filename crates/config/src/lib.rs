//! Configuration management for linepad.
//!
//! TOML configuration under the XDG config directory. Every key has a
//! default, so partial files load and missing keys are filled in on save.

mod settings;
mod xdg;

pub use settings::{Config, EditorSettings, GeneralSettings, LoggingSettings};
pub use xdg::{get_cache_dir, get_config_dir};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Default values as constants
pub mod defaults {
    pub const THEME_NAME: &str = "default";
    pub const TAB_SIZE: usize = 4;
    pub const CHORD_TIMEOUT_MS: u64 = 500;
    pub const CELL_WIDTH: f64 = 9.0;
    pub const CELL_HEIGHT: f64 = 20.0;
    pub const MARGIN_TOP: f64 = 10.0;
    pub const MARGIN_BOTTOM: f64 = 10.0;
    pub const FOOTBAR_HEIGHT: f64 = 24.0;
    pub const MIN_LOG_LEVEL: &str = "info";
    pub const MAX_LOG_ENTRIES: usize = 1000;
    pub const LOG_FILE_NAME: &str = "linepad.log";
}

impl Config {
    /// Load configuration from the XDG config file.
    ///
    /// On first run, creates the file with default values.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;
        let config = Self::load_from(&config_path)?;
        if !config_path.exists() {
            config.save_to(&config_path)?;
        }
        Ok(config)
    }

    /// Load configuration from an explicit path.
    ///
    /// A missing file yields the defaults. A file that differs from its
    /// normalized form (missing keys, reordering) is rewritten.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let original_content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::validate_content(&original_content)?;

        let normalized_content = toml::to_string_pretty(&config)?;
        if original_content != normalized_content {
            config.save_to(path)?;
        }

        Ok(config)
    }

    /// Save configuration to the XDG config file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Get path to config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(get_config_dir()?.join("config.toml"))
    }

    /// Get path to themes directory.
    pub fn themes_dir() -> Result<PathBuf> {
        Ok(get_config_dir()?.join("themes"))
    }

    /// Resolved log file path: the configured one or the cache default.
    pub fn log_file_path(&self) -> Result<PathBuf> {
        match &self.logging.file_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => Ok(get_cache_dir()?.join(defaults::LOG_FILE_NAME)),
        }
    }

    /// Validate config content.
    pub fn validate_content(content: &str) -> Result<Config> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Invalid config: {}", e))
    }
}
