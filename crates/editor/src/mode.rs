use linepad_theme::{CursorStyle, CursorStyles};
use std::fmt;

/// Editing mode of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Normal,
    Insert,
    Command,
    /// The last command line was not understood
    CommandError,
    Selection,
}

impl Mode {
    /// Label shown in the status line.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Insert => "INSERT",
            Mode::Command => "COMMAND",
            Mode::CommandError => "COMMAND ERROR",
            Mode::Selection => "SELECTION",
        }
    }

    pub fn cursor_style(self, styles: &CursorStyles) -> CursorStyle {
        match self {
            Mode::Normal => styles.normal.clone(),
            Mode::Insert => styles.insert.clone(),
            Mode::Command => styles.command.clone(),
            Mode::CommandError => styles.command_error.clone(),
            Mode::Selection => styles.selection.clone(),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
