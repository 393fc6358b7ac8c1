//! Syntax color themes for linepad.
//!
//! A theme maps each language to the colors of its token categories and
//! carries the cursor style of every editing mode. Built-in themes are
//! embedded; user themes are TOML files in the config themes directory.

mod colors;
mod loader;

pub use colors::{CursorStyle, CursorStyles, TokenCategory, TokenColors};
pub use loader::{load_theme, load_theme_from_str};

use std::collections::HashMap;
use std::path::Path;

// Embed theme files at compile time
const THEME_DEFAULT_TOML: &str = include_str!("../themes/default.toml");
const THEME_MIDNIGHT_TOML: &str = include_str!("../themes/midnight.toml");

/// Names of the themes compiled into the binary.
pub const BUILTIN_THEMES: &[&str] = &["default", "midnight"];

/// Source of syntax colors and cursor styles.
///
/// A language without an entry has highlighting disabled: tokenizers
/// produce nothing for it and callers keep their previous rendering.
pub trait ThemeStore {
    /// Category colors for a language id, if the theme covers it.
    fn token_colors(&self, language: &str) -> Option<&TokenColors>;

    /// Cursor appearance per editing mode.
    fn cursor_styles(&self) -> &CursorStyles;
}

/// A named theme: per-language token colors plus cursor styles.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeSet {
    name: String,
    languages: HashMap<String, TokenColors>,
    cursor: CursorStyles,
}

impl ThemeSet {
    pub fn new(
        name: impl Into<String>,
        languages: HashMap<String, TokenColors>,
        cursor: CursorStyles,
    ) -> Self {
        Self {
            name: name.into(),
            languages,
            cursor,
        }
    }

    /// Theme name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Language ids covered by this theme, sorted.
    pub fn languages(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.languages.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Add or replace the colors of one language.
    pub fn set_language(&mut self, language: &str, colors: TokenColors) {
        self.languages.insert(language.to_lowercase(), colors);
    }

    /// Drop a language, disabling its highlighting.
    pub fn remove_language(&mut self, language: &str) -> Option<TokenColors> {
        self.languages.remove(&language.to_lowercase())
    }

    /// Get a theme by name.
    ///
    /// A user theme in `themes_dir` wins over a built-in one of the same
    /// name. Unknown or broken themes fall back to the built-in default.
    pub fn by_name(name: &str, themes_dir: Option<&Path>) -> Self {
        if let Some(dir) = themes_dir {
            let path = dir.join(format!("{}.toml", name));
            if path.exists() {
                match load_theme(&path) {
                    Ok(theme) => return theme,
                    Err(e) => log::warn!("Ignoring user theme '{}': {:#}", name, e),
                }
            }
        }

        match name {
            "default" => Self::builtin_default(),
            "midnight" => Self::from_embedded(THEME_MIDNIGHT_TOML, "midnight"),
            _ => {
                log::warn!("Unknown theme '{}', using default", name);
                Self::builtin_default()
            }
        }
    }

    /// The embedded default theme.
    pub fn builtin_default() -> Self {
        Self::from_embedded(THEME_DEFAULT_TOML, "default")
    }

    fn from_embedded(content: &str, name: &str) -> Self {
        match load_theme_from_str(content) {
            Ok(theme) => theme,
            Err(e) => {
                log::error!(
                    "Failed to parse built-in theme '{}': {}. Using fallback theme.",
                    name,
                    e
                );
                Self::hardcoded_fallback()
            }
        }
    }

    /// Fallback theme in case of parse errors.
    fn hardcoded_fallback() -> Self {
        let languages = ["javascript", "typescript", "python", "rust", "plain"]
            .into_iter()
            .map(|language| (language.to_string(), TokenColors::default()))
            .collect();
        Self::new("fallback", languages, CursorStyles::default())
    }
}

impl Default for ThemeSet {
    fn default() -> Self {
        Self::builtin_default()
    }
}

impl ThemeStore for ThemeSet {
    fn token_colors(&self, language: &str) -> Option<&TokenColors> {
        self.languages.get(language)
    }

    fn cursor_styles(&self) -> &CursorStyles {
        &self.cursor
    }
}
