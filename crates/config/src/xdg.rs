//! Per-user directories for linepad.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "linepad";

fn app_dir(base: Option<PathBuf>, kind: &str) -> Result<PathBuf> {
    base.map(|p| p.join(APP_NAME))
        .with_context(|| format!("Failed to determine {} directory", kind))
}

/// `$XDG_CONFIG_HOME/linepad`, holding `config.toml` and `themes/`.
pub fn get_config_dir() -> Result<PathBuf> {
    app_dir(dirs::config_dir(), "config")
}

/// `$XDG_CACHE_HOME/linepad`. The default log file lives here.
pub fn get_cache_dir() -> Result<PathBuf> {
    app_dir(dirs::cache_dir(), "cache")
}
