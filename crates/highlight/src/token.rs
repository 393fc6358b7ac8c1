use linepad_theme::TokenCategory;

/// A colored slice of a line.
///
/// `value` is the exact text covered, whitespace included, so the values of
/// a line's tokens concatenate back to the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub category: TokenCategory,
    pub color: String,
    pub value: String,
}

impl Token {
    pub fn new(category: TokenCategory, color: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            category,
            color: color.into(),
            value: value.into(),
        }
    }
}

/// Rebuild the source line from its tokens.
pub fn concat_values(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.value.as_str()).collect()
}
