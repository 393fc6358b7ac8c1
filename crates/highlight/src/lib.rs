//! Syntax highlighting for linepad.
//!
//! Every supported language has a hand-written single-pass lexer that
//! splits one line into colored tokens. Lexing is lossless: the token
//! values of a line always concatenate back to the line. Colors come from
//! a [`ThemeStore`] passed into every call, and a language the theme does
//! not cover is not highlighted at all.

pub mod languages;
mod markup;
mod scanner;
mod token;

pub use markup::{render_line, render_line_numbers, render_plain, EMPTY_LINE_MARKUP};
pub use token::{concat_values, Token};

use linepad_theme::{ThemeStore, TokenColors};
use std::fmt;
use std::path::Path;

/// Languages with a dedicated lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    JavaScript,
    TypeScript,
    Python,
    Rust,
    #[default]
    Plain,
}

impl Language {
    /// Theme key of the language.
    pub fn id(self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Python => "python",
            Language::Rust => "rust",
            Language::Plain => "plain",
        }
    }

    /// Language for a theme key; anything unknown is plain text.
    pub fn from_id(id: &str) -> Self {
        match id.to_lowercase().as_str() {
            "javascript" => Language::JavaScript,
            "typescript" => Language::TypeScript,
            "python" => Language::Python,
            "rust" => Language::Rust,
            _ => Language::Plain,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Supported languages list.
pub const SUPPORTED_LANGUAGES: &[Language] = &[
    Language::JavaScript,
    Language::TypeScript,
    Language::Python,
    Language::Rust,
    Language::Plain,
];

/// Detect language from file extension.
pub fn detect_language(path: &Path) -> Language {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return Language::Plain;
    };

    match ext.to_lowercase().as_str() {
        "js" | "mjs" | "cjs" => Language::JavaScript,
        "ts" | "mts" | "cts" => Language::TypeScript,
        "py" | "pyw" => Language::Python,
        "rs" => Language::Rust,
        _ => Language::Plain,
    }
}

/// Split a line into colored tokens.
///
/// Returns `None` when the theme has no colors for `language`.
pub fn tokenize(language: Language, line: &str, theme: &dyn ThemeStore) -> Option<Vec<Token>> {
    let colors = theme.token_colors(language.id())?;
    Some(tokenize_with_colors(language, line, colors))
}

/// Split a line with an explicit color set.
pub fn tokenize_with_colors(language: Language, line: &str, colors: &TokenColors) -> Vec<Token> {
    match language {
        Language::JavaScript => languages::javascript::tokenize(line, colors),
        Language::TypeScript => languages::typescript::tokenize(line, colors),
        Language::Python => languages::python::tokenize(line, colors),
        Language::Rust => languages::rust::tokenize(line, colors),
        Language::Plain => languages::plain::tokenize(line, colors),
    }
}

/// Tokenize and render in one step. `None` when the language has no theme.
pub fn highlight_line(language: Language, line: &str, theme: &dyn ThemeStore) -> Option<String> {
    let tokens = tokenize(language, line, theme)?;
    render_line(Some(&tokens[..]))
}
