use linepad_theme::{TokenCategory, TokenColors};

use crate::scanner::Scanner;
use crate::token::Token;

/// Fallback lexer for files without a dedicated language: words and
/// numbers only.
pub fn tokenize(line: &str, colors: &TokenColors) -> Vec<Token> {
    let mut s = Scanner::new(line, colors);

    while !s.is_done() {
        if s.scan_whitespace() || s.scan_number() {
            continue;
        }
        if let Some((start, end)) = s.word(&[]) {
            s.take(end - start, TokenCategory::Identifier);
            continue;
        }
        if s.peek().is_some_and(|c| c.is_ascii_punctuation()) {
            s.take(1, TokenCategory::Punctuation);
        } else {
            s.take_unknown();
        }
    }

    s.finish()
}
