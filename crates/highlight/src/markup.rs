//! Line renderer: tokens to display markup.

use crate::token::Token;

/// Markup of a zero-length line, so it keeps a height on screen.
pub const EMPTY_LINE_MARKUP: &str = r#"<span class="empty-line">A</span>"#;

const NBSP: &str = "&nbsp;";

/// Render one line's tokens.
///
/// `None` means the tokenizer had no theme; nothing is rendered and the
/// caller keeps whatever markup it already has.
pub fn render_line(tokens: Option<&[Token]>) -> Option<String> {
    let tokens = tokens?;
    if tokens.is_empty() {
        return Some(EMPTY_LINE_MARKUP.to_string());
    }

    let mut out = String::new();
    for token in tokens {
        out.push_str(r#"<span style="color: "#);
        push_escaped(&mut out, &token.color);
        out.push_str(r#"">"#);
        push_escaped(&mut out, &token.value);
        out.push_str("</span>");
    }
    Some(out)
}

/// Uncolored markup for a line no theme covers.
pub fn render_plain(text: &str) -> String {
    if text.is_empty() {
        return EMPTY_LINE_MARKUP.to_string();
    }
    let mut out = String::from("<span>");
    push_escaped(&mut out, text);
    out.push_str("</span>");
    out
}

/// Gutter markup with line numbers 1 through `count`.
pub fn render_line_numbers(count: usize) -> String {
    (1..=count)
        .map(|n| format!("<div><span>{}</span></div>", n))
        .collect()
}

fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            ' ' => out.push_str(NBSP),
            '\t' => {
                for _ in 0..4 {
                    out.push_str(NBSP);
                }
            }
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
