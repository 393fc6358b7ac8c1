use linepad_theme::{TokenCategory, TokenColors};

use crate::scanner::{classify_word, Scanner};
use crate::token::Token;

const KEYWORDS: &[&str] = &[
    "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn", "for",
    "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return",
    "self", "Self", "static", "struct", "super", "trait", "true", "type", "unsafe", "use", "where",
    "while", "async", "await", "dyn", "abstract", "final", "override",
];

const OPERATORS: &[&str] = &[
    "..=", "<<=", ">>=", "==", "!=", "<=", ">=", "=>", "->", "::", "&&", "||", "+=", "-=", "*=",
    "/=", "%=", "^=", "|=", "&=", "..", "<<", ">>",
];

const OPERATOR_CHARS: &str = "+-*/%=<>!&|^";

const PUNCTUATION: &str = ",.:;()[]{}?";

pub fn tokenize(line: &str, colors: &TokenColors) -> Vec<Token> {
    let mut s = Scanner::new(line, colors);

    while !s.is_done() {
        if s.scan_whitespace()
            || s.scan_line_comment("//")
            || s.scan_block_comment("/*", "*/")
            || scan_attribute(&mut s)
            || scan_raw_string(&mut s)
            || scan_byte_literal(&mut s)
            || s.scan_quoted(&['"'])
            || scan_char_or_lifetime(&mut s)
            || s.scan_number()
            || s.scan_operator(OPERATORS, OPERATOR_CHARS)
        {
            continue;
        }

        if let Some((start, end)) = s.word(&[]) {
            let word = s.text(start, end);
            let is_macro = s.char_at(end) == Some('!') && s.char_at(end + 1) != Some('=');
            let category = if is_macro {
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

/// `#[...]` and `#![...]`, up to the matching bracket or the end of line.
fn scan_attribute(s: &mut Scanner) -> bool {
    let open = if s.starts_with("#![") {
        3
    } else if s.starts_with("#[") {
        2
    } else {
        return false;
    };

    let mut len = open;
    let mut depth = 1;
    while let Some(c) = s.peek_at(len) {
        len += 1;
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            _ => {}
        }
    }
    s.take(len, TokenCategory::ClassName);
    true
}

/// `r"..."`, `r#"..."#` and their `br` byte forms. No escapes apply.
fn scan_raw_string(s: &mut Scanner) -> bool {
    let mut len = match (s.peek(), s.peek_at(1)) {
        (Some('r'), _) => 1,
        (Some('b'), Some('r')) => 2,
        _ => return false,
    };
    let mut hashes = 0;
    while s.peek_at(len) == Some('#') {
        hashes += 1;
        len += 1;
    }
    if s.peek_at(len) != Some('"') {
        return false;
    }
    len += 1;

    while let Some(c) = s.peek_at(len) {
        if c == '"' && (1..=hashes).all(|k| s.peek_at(len + k) == Some('#')) {
            len += 1 + hashes;
            break;
        }
        len += 1;
    }
    s.take(len, TokenCategory::StringLiteral);
    true
}

/// `b"..."` and `b'x'`.
fn scan_byte_literal(s: &mut Scanner) -> bool {
    if s.peek() != Some('b') {
        return false;
    }
    match s.peek_at(1) {
        Some(q @ ('"' | '\'')) => {
            s.scan_delimited(2, &q.to_string(), TokenCategory::StringLiteral);
            true
        }
        _ => false,
    }
}

/// A quote opens either a char literal (`'a'`, `'\n'`) or a lifetime
/// (`'a`, `'static`). Lifetimes take the keyword color.
fn scan_char_or_lifetime(s: &mut Scanner) -> bool {
    if s.peek() != Some('\'') {
        return false;
    }

    let is_char_literal = s.peek_at(1) == Some('\\') || s.peek_at(2) == Some('\'');
    let starts_lifetime = s.peek_at(1).is_some_and(|c| c.is_alphabetic() || c == '_');

    if !is_char_literal && starts_lifetime {
        let mut len = 2;
        while s.peek_at(len).is_some_and(|c| c.is_alphanumeric() || c == '_') {
            len += 1;
        }
        s.take(len, TokenCategory::Keyword);
    } else {
        s.scan_delimited(1, "'", TokenCategory::StringLiteral);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::concat_values;

    fn lex(line: &str) -> Vec<(TokenCategory, String)> {
        let tokens = tokenize(line, &TokenColors::default());
        assert_eq!(concat_values(&tokens), line);
        tokens.into_iter().map(|t| (t.category, t.value)).collect()
    }

    fn category_of(line: &str, value: &str) -> TokenCategory {
        lex(line)
            .into_iter()
            .find(|(_, v)| v == value)
            .map(|(c, _)| c)
            .unwrap_or_else(|| panic!("no token {:?}", value))
    }

    #[test]
    fn test_fn_signature() {
        let line = "pub fn parse<'a>(input: &'a str) -> Result<Self, Error> {";
        assert_eq!(category_of(line, "pub"), TokenCategory::Keyword);
        assert_eq!(category_of(line, "parse"), TokenCategory::Identifier);
        assert_eq!(category_of(line, "'a"), TokenCategory::Keyword);
        assert_eq!(category_of(line, "Self"), TokenCategory::Keyword);
        assert_eq!(category_of(line, "Result"), TokenCategory::ClassName);
        assert_eq!(category_of(line, "->"), TokenCategory::Operator);
    }

    #[test]
    fn test_char_literals() {
        assert_eq!(category_of("let c = 'x';", "'x'"), TokenCategory::StringLiteral);
        assert_eq!(category_of(r"let c = '\n';", r"'\n'"), TokenCategory::StringLiteral);
        assert_eq!(category_of(r"let c = b'\'';", r"b'\''"), TokenCategory::StringLiteral);
        assert_eq!(category_of("x: &'static str", "'static"), TokenCategory::Keyword);
    }

    #[test]
    fn test_raw_and_byte_strings() {
        let line = r###"let s = r#"say "hi""#; let b = b"bytes";"###;
        assert_eq!(category_of(line, r##"r#"say "hi""#"##), TokenCategory::StringLiteral);
        assert_eq!(category_of(line, r#"b"bytes""#), TokenCategory::StringLiteral);
        assert_eq!(category_of("let r = br;", "br"), TokenCategory::Identifier);
    }

    #[test]
    fn test_attributes() {
        assert_eq!(
            category_of("#[derive(Debug, Clone)] struct A;", "#[derive(Debug, Clone)]"),
            TokenCategory::ClassName
        );
        assert_eq!(
            category_of("#![cfg_attr(test, allow(x[0]))]", "#![cfg_attr(test, allow(x[0]))]"),
            TokenCategory::ClassName
        );
        assert_eq!(category_of("#[cfg(test", "#[cfg(test"), TokenCategory::ClassName);
    }

    #[test]
    fn test_macros() {
        let line = r#"println!("{}", a != b);"#;
        assert_eq!(category_of(line, "println"), TokenCategory::FunctionName);
        assert_eq!(category_of(line, "!"), TokenCategory::Operator);
        assert_eq!(category_of(line, "a"), TokenCategory::Identifier);
        assert_eq!(category_of(line, "!="), TokenCategory::Operator);
    }

    #[test]
    fn test_paths_and_ranges() {
        let line = "for i in 0..=n { std::mem::swap(x, y)? }";
        assert_eq!(category_of(line, "..="), TokenCategory::Operator);
        assert_eq!(category_of(line, "::"), TokenCategory::Operator);
        assert_eq!(category_of(line, "swap"), TokenCategory::FunctionName);
        assert_eq!(category_of(line, "?"), TokenCategory::Punctuation);
    }
}
