//! JavaScript lexer. TypeScript reuses it with a wider keyword set.

use linepad_theme::{TokenCategory, TokenColors};

use crate::scanner::{classify_word, Scanner};
use crate::token::Token;

pub(crate) const KEYWORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "export", "extends", "finally", "for", "function", "if", "import", "in", "instanceof",
    "let", "new", "return", "super", "switch", "this", "throw", "try", "typeof", "var", "void",
    "while", "with", "yield", "await", "async", "of", "static", "get", "set", "true", "false",
    "null", "undefined",
];

pub(crate) const OPERATORS: &[&str] = &[
    "===", "!==", "**=", "...", "==", "!=", "=>", "<=", ">=", "&&", "||", "??", "?.", "++", "--",
    "+=", "-=", "*=", "/=", "%=", "**",
];

pub(crate) const OPERATOR_CHARS: &str = "+-*/%=<>!&|^~?";

pub(crate) const PUNCTUATION: &str = ",.:;()[]{}";

const QUOTES: [char; 3] = ['\'', '"', '`'];

/// Additions a JavaScript-family language makes on top of the base words.
pub(crate) struct Dialect {
    pub extra_keywords: &'static [&'static str],
    /// Builtin type names, colored as class names.
    pub type_names: &'static [&'static str],
}

const JAVASCRIPT: Dialect = Dialect {
    extra_keywords: &[],
    type_names: &[],
};

pub fn tokenize(line: &str, colors: &TokenColors) -> Vec<Token> {
    tokenize_dialect(line, colors, &JAVASCRIPT)
}

pub(crate) fn tokenize_dialect(line: &str, colors: &TokenColors, dialect: &Dialect) -> Vec<Token> {
    let mut s = Scanner::new(line, colors);

    while !s.is_done() {
        if s.scan_whitespace()
            || s.scan_line_comment("//")
            || s.scan_block_comment("/*", "*/")
            || s.scan_quoted(&QUOTES)
            || s.scan_number()
            || s.scan_operator(OPERATORS, OPERATOR_CHARS)
        {
            continue;
        }

        if let Some((start, end)) = s.word(&['$']) {
            let word = s.text(start, end);
            let word = word.as_str();
            let category = if dialect.type_names.contains(&word) {
                TokenCategory::ClassName
            } else {
                let is_keyword =
                    KEYWORDS.contains(&word) || dialect.extra_keywords.contains(&word);
                classify_word(word, s.char_at(end), is_keyword)
            };
            s.take(end - start, category);
            continue;
        }

        if !s.scan_punctuation(PUNCTUATION) {
            s.take_unknown();
        }
    }

    s.finish()
}
