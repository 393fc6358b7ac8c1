//! Column and row targets of normal-mode motions.
//!
//! Columns count characters. Functions here only compute targets; the
//! session moves the cursor.

use linepad_buffer::Buffer;

fn is_blank(c: char) -> bool {
    c.is_whitespace()
}

/// `w`: the column after the next whitespace past `column`, if any.
pub fn word_forward(line: &str, column: usize) -> Option<usize> {
    line.chars()
        .enumerate()
        .skip(column + 1)
        .find(|&(_, c)| is_blank(c))
        .map(|(i, _)| i + 1)
}

/// `b`: start of the previous word.
///
/// Scans back to the whitespace before the cursor's word, then to the one
/// before that. Falls back to column 0. Column 0 itself is never examined.
pub fn word_backward(line: &str, column: usize) -> usize {
    let chars: Vec<char> = line.chars().collect();
    let column = column.min(chars.len());
    let blank_before = |from: usize| (1..from).rev().find(|&i| is_blank(chars[i]));

    match blank_before(column) {
        Some(gap) => blank_before(gap).map_or(0, |i| i + 1),
        None => 0,
    }
}

/// Column of the first non-whitespace character.
pub fn first_non_blank(line: &str) -> Option<usize> {
    line.chars().position(|c| !is_blank(c))
}

/// Number of leading whitespace characters.
pub fn leading_spaces(line: &str) -> usize {
    line.chars().take_while(|&c| is_blank(c)).count()
}

fn is_blank_line(buffer: &Buffer, row: usize) -> bool {
    buffer.line_text(row).is_some_and(|l| l.trim().is_empty())
}

/// `{`: nearest blank line above `row`. Row 0 counts.
pub fn prev_blank_row(buffer: &Buffer, row: usize) -> Option<usize> {
    (0..row).rev().find(|&r| is_blank_line(buffer, r))
}

/// `}`: nearest blank line below `row`.
pub fn next_blank_row(buffer: &Buffer, row: usize) -> Option<usize> {
    (row + 1..buffer.line_count()).find(|&r| is_blank_line(buffer, r))
}
