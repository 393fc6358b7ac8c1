//! Configuration structures for linepad settings.

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Application configuration with nested sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// General application settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// Editor settings
    #[serde(default)]
    pub editor: EditorSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// General application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Selected theme name
    #[serde(default = "default_theme_name")]
    pub theme: String,
}

/// Editor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Spaces inserted by Tab
    #[serde(default = "default_tab_size")]
    pub tab_size: usize,

    /// How long a chord leader (`d`, `g`, `y`, `c`) waits for its second key
    #[serde(default = "default_chord_timeout_ms")]
    pub chord_timeout_ms: u64,

    /// Glyph cell width in pixels
    #[serde(default = "default_cell_width")]
    pub cell_width: f64,

    /// Glyph cell height in pixels
    #[serde(default = "default_cell_height")]
    pub cell_height: f64,

    /// Distance kept between the cursor line and the top edge when scrolling up
    #[serde(default = "default_margin_top")]
    pub margin_top: f64,

    /// Distance kept between the cursor line and the footbar when scrolling down
    #[serde(default = "default_margin_bottom")]
    pub margin_bottom: f64,

    /// Height reserved for the bottom bar
    #[serde(default = "default_footbar_height")]
    pub footbar_height: f64,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log file path (defaults to the cache directory)
    #[serde(default)]
    pub file_path: Option<String>,

    /// Minimum log level (debug, info, warn, error)
    #[serde(default = "default_min_level")]
    pub min_level: String,

    /// Entries kept in memory
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

// Default value functions for serde
fn default_theme_name() -> String {
    defaults::THEME_NAME.to_string()
}

fn default_tab_size() -> usize {
    defaults::TAB_SIZE
}

fn default_chord_timeout_ms() -> u64 {
    defaults::CHORD_TIMEOUT_MS
}

fn default_cell_width() -> f64 {
    defaults::CELL_WIDTH
}

fn default_cell_height() -> f64 {
    defaults::CELL_HEIGHT
}

fn default_margin_top() -> f64 {
    defaults::MARGIN_TOP
}

fn default_margin_bottom() -> f64 {
    defaults::MARGIN_BOTTOM
}

fn default_footbar_height() -> f64 {
    defaults::FOOTBAR_HEIGHT
}

fn default_min_level() -> String {
    defaults::MIN_LOG_LEVEL.to_string()
}

fn default_max_entries() -> usize {
    defaults::MAX_LOG_ENTRIES
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            theme: default_theme_name(),
        }
    }
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            tab_size: default_tab_size(),
            chord_timeout_ms: default_chord_timeout_ms(),
            cell_width: default_cell_width(),
            cell_height: default_cell_height(),
            margin_top: default_margin_top(),
            margin_bottom: default_margin_bottom(),
            footbar_height: default_footbar_height(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file_path: None,
            min_level: default_min_level(),
            max_entries: default_max_entries(),
        }
    }
}
