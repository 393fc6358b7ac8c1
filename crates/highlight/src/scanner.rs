//! Character cursor shared by the language lexers.
//!
//! Positions index Unicode scalar values, never bytes, so token boundaries
//! line up with cursor columns. Every `scan_*` helper either consumes at
//! least one character and emits exactly one token, or leaves the position
//! untouched and returns `false`.

use linepad_theme::{TokenCategory, TokenColors};

use crate::token::Token;

pub(crate) struct Scanner<'a> {
    chars: Vec<char>,
    pos: usize,
    colors: &'a TokenColors,
    tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    pub fn new(line: &str, colors: &'a TokenColors) -> Self {
        Self {
            chars: line.chars().collect(),
            pos: 0,
            colors,
            tokens: Vec::new(),
        }
    }

    pub fn is_done(&self) -> bool {
        self.pos >= self.chars.len()
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    pub fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    /// Character right before `index`.
    pub fn char_before(&self, index: usize) -> Option<char> {
        index.checked_sub(1).and_then(|i| self.chars.get(i).copied())
    }

    pub fn starts_with(&self, pattern: &str) -> bool {
        let mut i = self.pos;
        for expected in pattern.chars() {
            match self.chars.get(i) {
                Some(&c) if c == expected => i += 1,
                _ => return false,
            }
        }
        true
    }

    pub fn text(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }

    /// Emit everything from `start` to the current position as one token.
    pub fn emit_from(&mut self, start: usize, category: TokenCategory) {
        if start >= self.pos {
            return;
        }
        let value = self.text(start, self.pos);
        let color = self.colors.color(category).to_string();
        self.tokens.push(Token {
            category,
            color,
            value,
        });
    }

    /// Consume `len` characters as one token.
    pub fn take(&mut self, len: usize, category: TokenCategory) {
        let start = self.pos;
        self.pos = (self.pos + len).min(self.chars.len());
        self.emit_from(start, category);
    }

    /// Consume the rest of the line as one token.
    pub fn take_rest(&mut self, category: TokenCategory) {
        let len = self.chars.len() - self.pos;
        self.take(len, category);
    }

    pub fn scan_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.emit_from(start, TokenCategory::Whitespace);
        self.pos > start
    }

    pub fn scan_line_comment(&mut self, marker: &str) -> bool {
        if !self.starts_with(marker) {
            return false;
        }
        self.take_rest(TokenCategory::Comment);
        true
    }

    /// Block comment; unterminated runs to the end of the input.
    pub fn scan_block_comment(&mut self, open: &str, close: &str) -> bool {
        if !self.starts_with(open) {
            return false;
        }
        let start = self.pos;
        self.pos += open.chars().count();
        while !self.is_done() && !self.starts_with(close) {
            self.pos += 1;
        }
        if !self.is_done() {
            self.pos += close.chars().count();
        }
        self.emit_from(start, TokenCategory::Comment);
        true
    }

    /// Consume a literal whose opening delimiter is `open_len` characters
    /// long and which ends at `close`. Backslash escapes the next character.
    /// Unterminated literals run to the end of the line.
    pub fn scan_delimited(&mut self, open_len: usize, close: &str, category: TokenCategory) {
        let start = self.pos;
        self.pos = (self.pos + open_len).min(self.chars.len());
        while !self.is_done() {
            if self.peek() == Some('\\') {
                self.pos = (self.pos + 2).min(self.chars.len());
                continue;
            }
            if self.starts_with(close) {
                self.pos += close.chars().count();
                break;
            }
            self.pos += 1;
        }
        self.emit_from(start, category);
    }

    /// Quoted string opened by one of `quotes`.
    pub fn scan_quoted(&mut self, quotes: &[char]) -> bool {
        match self.peek() {
            Some(q) if quotes.contains(&q) => {
                let close = q.to_string();
                self.scan_delimited(1, &close, TokenCategory::StringLiteral);
                true
            }
            _ => false,
        }
    }

    /// Numeric literal: digit run plus the common radix prefixes, one
    /// fractional part and trailing alphanumeric suffixes (`1u8`, `2e10`).
    pub fn scan_number(&mut self) -> bool {
        if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
            return false;
        }
        let start = self.pos;
        let radix_prefix = self.peek() == Some('0')
            && matches!(self.peek_at(1), Some('x' | 'X' | 'b' | 'B' | 'o' | 'O'));
        if radix_prefix {
            self.pos += 2;
        } else {
            self.eat_digits();
            if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
                self.pos += 1;
                self.eat_digits();
            }
        }
        while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
            self.pos += 1;
        }
        self.emit_from(start, TokenCategory::Number);
        true
    }

    fn eat_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit() || c == '_') {
            self.pos += 1;
        }
    }

    /// Greedy longest match among `multi`, then a single char from `singles`.
    pub fn scan_operator(&mut self, multi: &[&str], singles: &str) -> bool {
        let longest = multi
            .iter()
            .filter(|op| self.starts_with(op))
            .map(|op| op.chars().count())
            .max();
        if let Some(len) = longest {
            self.take(len, TokenCategory::Operator);
            return true;
        }
        match self.peek() {
            Some(c) if singles.contains(c) => {
                self.take(1, TokenCategory::Operator);
                true
            }
            _ => false,
        }
    }

    pub fn scan_punctuation(&mut self, set: &str) -> bool {
        match self.peek() {
            Some(c) if set.contains(c) => {
                self.take(1, TokenCategory::Punctuation);
                true
            }
            _ => false,
        }
    }

    /// Word run at the current position. Returns its bounds without
    /// emitting, so the caller can classify it with lookahead.
    pub fn word(&self, extra: &[char]) -> Option<(usize, usize)> {
        let is_start = |c: char| c.is_alphabetic() || c == '_' || extra.contains(&c);
        let is_part = |c: char| c.is_alphanumeric() || c == '_' || extra.contains(&c);

        if !self.peek().is_some_and(is_start) {
            return None;
        }
        let mut end = self.pos + 1;
        while self.chars.get(end).copied().is_some_and(is_part) {
            end += 1;
        }
        Some((self.pos, end))
    }

    /// Character at an absolute index.
    pub fn char_at(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    /// Fallback for anything no rule matched.
    pub fn take_unknown(&mut self) {
        self.take(1, TokenCategory::Unknown);
    }

    pub fn finish(self) -> Vec<Token> {
        self.tokens
    }
}

/// Shared word classification.
///
/// Function name when directly followed by `(`, then keyword, then class
/// name for an uppercase initial, else identifier.
pub(crate) fn classify_word(word: &str, next: Option<char>, is_keyword: bool) -> TokenCategory {
    if next == Some('(') {
        TokenCategory::FunctionName
    } else if is_keyword {
        TokenCategory::Keyword
    } else if word.chars().next().is_some_and(char::is_uppercase) {
        TokenCategory::ClassName
    } else {
        TokenCategory::Identifier
    }
}
