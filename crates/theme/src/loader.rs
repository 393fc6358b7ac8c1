//! Theme loading from TOML files.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::colors::{CursorStyle, CursorStyles, TokenCategory, TokenColors};
use crate::ThemeSet;

const CATEGORIES: [TokenCategory; 11] = [
    TokenCategory::Keyword,
    TokenCategory::Identifier,
    TokenCategory::Number,
    TokenCategory::Operator,
    TokenCategory::Punctuation,
    TokenCategory::StringLiteral,
    TokenCategory::Whitespace,
    TokenCategory::Comment,
    TokenCategory::ClassName,
    TokenCategory::FunctionName,
    TokenCategory::Unknown,
];

/// Color representation in TOML.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TomlColor {
    Named(String),
    Rgb { rgb: [u8; 3] },
}

impl TomlColor {
    fn to_css(&self) -> String {
        match self {
            TomlColor::Named(name) => name.clone(),
            TomlColor::Rgb { rgb } => format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2]),
        }
    }
}

/// Category colors; every key optional so override tables can be partial.
#[derive(Debug, Clone, Default, Deserialize)]
struct TomlSyntax {
    keyword: Option<TomlColor>,
    identifier: Option<TomlColor>,
    number: Option<TomlColor>,
    operator: Option<TomlColor>,
    punctuation: Option<TomlColor>,
    string: Option<TomlColor>,
    whitespace: Option<TomlColor>,
    comment: Option<TomlColor>,
    class_name: Option<TomlColor>,
    function_name: Option<TomlColor>,
    unknown: Option<TomlColor>,
}

impl TomlSyntax {
    fn get(&self, category: TokenCategory) -> Option<&TomlColor> {
        match category {
            TokenCategory::Keyword => self.keyword.as_ref(),
            TokenCategory::Identifier => self.identifier.as_ref(),
            TokenCategory::Number => self.number.as_ref(),
            TokenCategory::Operator => self.operator.as_ref(),
            TokenCategory::Punctuation => self.punctuation.as_ref(),
            TokenCategory::StringLiteral => self.string.as_ref(),
            TokenCategory::Whitespace => self.whitespace.as_ref(),
            TokenCategory::Comment => self.comment.as_ref(),
            TokenCategory::ClassName => self.class_name.as_ref(),
            TokenCategory::FunctionName => self.function_name.as_ref(),
            TokenCategory::Unknown => self.unknown.as_ref(),
        }
    }

    fn apply_onto(&self, colors: &mut TokenColors) {
        for category in CATEGORIES {
            if let Some(color) = self.get(category) {
                *colors.color_mut(category) = color.to_css();
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct TomlCursorStyle {
    color: TomlColor,
    opacity: f32,
}

impl TomlCursorStyle {
    fn to_style(&self) -> CursorStyle {
        CursorStyle::new(self.color.to_css(), self.opacity.clamp(0.0, 1.0))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct TomlCursor {
    normal: Option<TomlCursorStyle>,
    insert: Option<TomlCursorStyle>,
    command: Option<TomlCursorStyle>,
    command_error: Option<TomlCursorStyle>,
    selection: Option<TomlCursorStyle>,
}

/// TOML theme structure.
#[derive(Debug, Clone, Deserialize)]
struct TomlTheme {
    name: String,
    #[serde(default)]
    languages: Vec<String>,
    #[serde(default)]
    syntax: TomlSyntax,
    #[serde(default)]
    overrides: HashMap<String, TomlSyntax>,
    #[serde(default)]
    cursor: TomlCursor,
}

impl TomlTheme {
    fn into_theme_set(self) -> ThemeSet {
        let mut base = TokenColors::default();
        self.syntax.apply_onto(&mut base);

        let mut languages = HashMap::new();
        for language in &self.languages {
            languages.insert(language.to_lowercase(), base.clone());
        }
        for (language, syntax) in &self.overrides {
            let colors = languages
                .entry(language.to_lowercase())
                .or_insert_with(|| base.clone());
            syntax.apply_onto(colors);
        }

        let defaults = CursorStyles::default();
        let pick = |style: &Option<TomlCursorStyle>, fallback: CursorStyle| {
            style.as_ref().map(TomlCursorStyle::to_style).unwrap_or(fallback)
        };
        let cursor = CursorStyles {
            normal: pick(&self.cursor.normal, defaults.normal),
            insert: pick(&self.cursor.insert, defaults.insert),
            command: pick(&self.cursor.command, defaults.command),
            command_error: pick(&self.cursor.command_error, defaults.command_error),
            selection: pick(&self.cursor.selection, defaults.selection),
        };

        ThemeSet::new(self.name, languages, cursor)
    }
}

/// Load theme from TOML file.
pub fn load_theme(path: &Path) -> Result<ThemeSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read theme {}", path.display()))?;
    load_theme_from_str(&content)
        .with_context(|| format!("Failed to parse theme {}", path.display()))
}

/// Load theme from TOML string.
pub fn load_theme_from_str(content: &str) -> Result<ThemeSet> {
    let toml_theme: TomlTheme = toml::from_str(content)?;
    Ok(toml_theme.into_theme_set())
}
