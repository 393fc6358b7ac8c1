use std::time::Duration;

use linepad_buffer::{CellSize, Point};
use linepad_config::{defaults, Config};

/// Height of the editing area when the surface has not reported one.
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 600.0;

/// Per-session editing parameters, resolved from [`Config`].
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub tab_size: usize,
    pub chord_timeout: Duration,
    pub cell: CellSize,
    /// Pixel offset of row 0, column 0
    pub origin: Point,
    pub viewport_height: f64,
    pub footbar_height: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
}

impl SessionSettings {
    pub fn from_config(config: &Config, viewport_height: f64) -> Self {
        let editor = &config.editor;
        Self {
            tab_size: editor.tab_size,
            chord_timeout: Duration::from_millis(editor.chord_timeout_ms),
            cell: CellSize::new(editor.cell_width, editor.cell_height),
            origin: Point::default(),
            viewport_height,
            footbar_height: editor.footbar_height,
            margin_top: editor.margin_top,
            margin_bottom: editor.margin_bottom,
        }
    }

    /// Spaces inserted by Tab.
    pub fn tab(&self) -> String {
        " ".repeat(self.tab_size)
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            tab_size: defaults::TAB_SIZE,
            chord_timeout: Duration::from_millis(defaults::CHORD_TIMEOUT_MS),
            cell: CellSize::new(defaults::CELL_WIDTH, defaults::CELL_HEIGHT),
            origin: Point::default(),
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            footbar_height: defaults::FOOTBAR_HEIGHT,
            margin_top: defaults::MARGIN_TOP,
            margin_bottom: defaults::MARGIN_BOTTOM,
        }
    }
}
