use linepad_theme::{TokenCategory, TokenColors};

use crate::scanner::{classify_word, Scanner};
use crate::token::Token;

const KEYWORDS: &[&str] = &[
    "and", "as", "assert", "break", "class", "continue", "def", "del", "elif", "else", "except",
    "False", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda", "None",
    "nonlocal", "not", "or", "pass", "raise", "return", "True", "try", "while", "with", "yield",
    "async", "await", "self", "match", "case",
];

const OPERATORS: &[&str] = &[
    "**=", "//=", ">>=", "<<=", "->", "**", "//", "==", "!=", "<=", ">=", "+=", "-=", "*=", "/=",
    "%=", ":=", "<<", ">>",
];

const OPERATOR_CHARS: &str = "+-*/%=<>!&|^~@";

const PUNCTUATION: &str = ",.:;()[]{}";

const STRING_PREFIXES: &str = "rRbBfFuU";

pub fn tokenize(line: &str, colors: &TokenColors) -> Vec<Token> {
    let mut s = Scanner::new(line, colors);

    while !s.is_done() {
        if s.scan_whitespace()
            || s.scan_line_comment("#")
            || scan_string(&mut s)
            || s.scan_number()
            || s.scan_operator(OPERATORS, OPERATOR_CHARS)
        {
            continue;
        }

        if let Some((start, end)) = s.word(&[]) {
            let word = s.text(start, end);
            let category = if s.char_before(start) == Some('.') {
                // Attribute access reads as a method reference
                TokenCategory::FunctionName
            } else {
                classify_word(&word, s.char_at(end), KEYWORDS.contains(&word.as_str()))
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

/// Plain, prefixed (`r`, `b`, `f`, `u`, up to two letters) and
/// triple-quoted strings.
fn scan_string(s: &mut Scanner) -> bool {
    let mut prefix = 0;
    while prefix < 2 && s.peek_at(prefix).is_some_and(|c| STRING_PREFIXES.contains(c)) {
        prefix += 1;
    }
    let quote = match s.peek_at(prefix) {
        Some(q @ ('\'' | '"')) => q,
        _ => return false,
    };

    let triple = s.peek_at(prefix + 1) == Some(quote) && s.peek_at(prefix + 2) == Some(quote);
    if triple {
        let close: String = [quote; 3].iter().collect();
        s.scan_delimited(prefix + 3, &close, TokenCategory::StringLiteral);
    } else {
        s.scan_delimited(prefix + 1, &quote.to_string(), TokenCategory::StringLiteral);
    }
    true
}
