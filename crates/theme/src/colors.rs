//! Theme color definitions.

use serde::{Deserialize, Serialize};

/// Syntax category a token is colored by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenCategory {
    Keyword,
    Identifier,
    Number,
    Operator,
    Punctuation,
    StringLiteral,
    Whitespace,
    Comment,
    ClassName,
    FunctionName,
    Unknown,
}

impl TokenCategory {
    /// Key used for the category in theme files.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenCategory::Keyword => "keyword",
            TokenCategory::Identifier => "identifier",
            TokenCategory::Number => "number",
            TokenCategory::Operator => "operator",
            TokenCategory::Punctuation => "punctuation",
            TokenCategory::StringLiteral => "string",
            TokenCategory::Whitespace => "whitespace",
            TokenCategory::Comment => "comment",
            TokenCategory::ClassName => "class_name",
            TokenCategory::FunctionName => "function_name",
            TokenCategory::Unknown => "unknown",
        }
    }
}

/// Color for every token category of one language, as CSS color strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenColors {
    pub keyword: String,
    pub identifier: String,
    pub number: String,
    pub operator: String,
    pub punctuation: String,
    pub string: String,
    pub whitespace: String,
    pub comment: String,
    pub class_name: String,
    pub function_name: String,
    pub unknown: String,
}

impl TokenColors {
    /// Color assigned to a category.
    pub fn color(&self, category: TokenCategory) -> &str {
        match category {
            TokenCategory::Keyword => &self.keyword,
            TokenCategory::Identifier => &self.identifier,
            TokenCategory::Number => &self.number,
            TokenCategory::Operator => &self.operator,
            TokenCategory::Punctuation => &self.punctuation,
            TokenCategory::StringLiteral => &self.string,
            TokenCategory::Whitespace => &self.whitespace,
            TokenCategory::Comment => &self.comment,
            TokenCategory::ClassName => &self.class_name,
            TokenCategory::FunctionName => &self.function_name,
            TokenCategory::Unknown => &self.unknown,
        }
    }

    pub(crate) fn color_mut(&mut self, category: TokenCategory) -> &mut String {
        match category {
            TokenCategory::Keyword => &mut self.keyword,
            TokenCategory::Identifier => &mut self.identifier,
            TokenCategory::Number => &mut self.number,
            TokenCategory::Operator => &mut self.operator,
            TokenCategory::Punctuation => &mut self.punctuation,
            TokenCategory::StringLiteral => &mut self.string,
            TokenCategory::Whitespace => &mut self.whitespace,
            TokenCategory::Comment => &mut self.comment,
            TokenCategory::ClassName => &mut self.class_name,
            TokenCategory::FunctionName => &mut self.function_name,
            TokenCategory::Unknown => &mut self.unknown,
        }
    }
}

impl Default for TokenColors {
    fn default() -> Self {
        Self {
            keyword: "#bd00ff".to_string(),
            identifier: "#26ffd7".to_string(),
            number: "#ffb521".to_string(),
            operator: "white".to_string(),
            punctuation: "white".to_string(),
            string: "#70ff00".to_string(),
            whitespace: "white".to_string(),
            comment: "grey".to_string(),
            class_name: "#ffe000".to_string(),
            function_name: "#4bb5ff".to_string(),
            unknown: "#ff7cf9".to_string(),
        }
    }
}

/// Cursor box appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursorStyle {
    pub color: String,
    pub opacity: f32,
}

impl CursorStyle {
    pub fn new(color: impl Into<String>, opacity: f32) -> Self {
        Self {
            color: color.into(),
            opacity,
        }
    }
}

/// Cursor appearance for each editing mode.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorStyles {
    pub normal: CursorStyle,
    pub insert: CursorStyle,
    pub command: CursorStyle,
    pub command_error: CursorStyle,
    pub selection: CursorStyle,
}

impl Default for CursorStyles {
    fn default() -> Self {
        Self {
            normal: CursorStyle::new("white", 0.8),
            insert: CursorStyle::new("white", 0.4),
            command: CursorStyle::new("white", 0.8),
            command_error: CursorStyle::new("#ff5555", 0.8),
            selection: CursorStyle::new("white", 0.6),
        }
    }
}
