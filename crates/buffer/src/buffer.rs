use linepad_highlight::{highlight_line, render_plain, Language};
use linepad_theme::ThemeStore;
use thiserror::Error;

/// Why a buffer edit was refused. A refused edit changes nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    #[error("no theme colors for language '{language}'")]
    ThemeUnavailable { language: String },

    #[error("position {row}:{column} is outside the buffer")]
    OutOfBounds { row: usize, column: usize },
}

/// A row whose markup changed during an edit.
///
/// Rows are given in the numbering after the edit, except for `Removed`,
/// which names the row as it was before removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineChange {
    Updated(usize),
    Inserted(usize),
    Removed(usize),
}

pub type EditResult = Result<Vec<LineChange>, BufferError>;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Line {
    text: String,
    markup: String,
}

/// Editable text as parallel raw and rendered lines.
///
/// Every edit computes the new markup before touching anything, so the two
/// representations are always in step and the buffer never has zero lines.
#[derive(Debug, Clone)]
pub struct Buffer {
    lines: Vec<Line>,
    language: Language,
    modified: bool,
}

/// Replace non-breaking spaces and expand tabs to four spaces.
pub fn normalize_whitespace(text: &str) -> String {
    text.replace('\u{a0}', " ").replace('\t', "    ")
}

fn clean_line(text: &str) -> String {
    normalize_whitespace(text).replace(['\r', '\n'], "")
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn byte_index(text: &str, column: usize) -> usize {
    text.char_indices()
        .nth(column)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

impl Buffer {
    /// Build from raw lines. Lines the theme cannot color are rendered
    /// without colors so the file can still be shown.
    pub fn from_lines<I, S>(lines: I, language: Language, theme: &dyn ThemeStore) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut buffer = Self {
            lines: Vec::new(),
            language,
            modified: false,
        };
        for line in lines {
            let text = clean_line(line.as_ref());
            let markup = buffer.render_or_plain(&text, theme);
            buffer.lines.push(Line { text, markup });
        }
        if buffer.lines.is_empty() {
            let markup = buffer.render_or_plain("", theme);
            buffer.lines.push(Line {
                text: String::new(),
                markup,
            });
        }
        if theme.token_colors(language.id()).is_none() {
            log::warn!("No theme colors for {}, showing uncolored text", language);
        }
        buffer
    }

    /// Build from file content; `\n`, `\r\n` and `\r` all end a line.
    pub fn from_text(text: &str, language: Language, theme: &dyn ThemeStore) -> Self {
        let unified = text.replace("\r\n", "\n").replace('\r', "\n");
        Self::from_lines(unified.split('\n'), language, theme)
    }

    /// Adopt lines rendered elsewhere. Inconsistent input is re-rendered.
    pub fn from_rendered(
        raw: Vec<String>,
        markup: Vec<String>,
        language: Language,
        theme: &dyn ThemeStore,
    ) -> Self {
        if raw.is_empty() || raw.len() != markup.len() {
            log::debug!(
                "Re-rendering {} lines ({} markup lines supplied)",
                raw.len(),
                markup.len()
            );
            return Self::from_lines(raw, language, theme);
        }
        let lines = raw
            .into_iter()
            .zip(markup)
            .map(|(text, markup)| Line { text, markup })
            .collect();
        Self {
            lines,
            language,
            modified: false,
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Line length in characters; 0 for a missing row.
    pub fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map_or(0, |l| char_len(&l.text))
    }

    pub fn line_text(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|l| l.text.as_str())
    }

    pub fn line_markup(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|l| l.markup.as_str())
    }

    /// Raw lines in order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|l| l.text.as_str())
    }

    /// Rendered lines in order.
    pub fn markup(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|l| l.markup.as_str())
    }

    /// Whole text, lines joined with `\n`.
    pub fn text(&self) -> String {
        self.lines().collect::<Vec<_>>().join("\n")
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    /// Insert one character before `column`.
    pub fn insert_char(
        &mut self,
        row: usize,
        column: usize,
        ch: char,
        theme: &dyn ThemeStore,
    ) -> EditResult {
        let mut buf = [0u8; 4];
        self.insert_str(row, column, ch.encode_utf8(&mut buf), theme)
    }

    /// Insert text inside a line. Line breaks in `text` are dropped.
    pub fn insert_str(
        &mut self,
        row: usize,
        column: usize,
        text: &str,
        theme: &dyn ThemeStore,
    ) -> EditResult {
        let current = self.text_at(row, column)?;
        if column > char_len(current) {
            return Err(BufferError::OutOfBounds { row, column });
        }
        let mut updated = current.to_string();
        updated.insert_str(byte_index(current, column), &clean_line(text));
        self.store(row, updated, theme)
    }

    /// Delete the character before `column`. Column 0 has nothing before it.
    pub fn delete_char_before(
        &mut self,
        row: usize,
        column: usize,
        theme: &dyn ThemeStore,
    ) -> EditResult {
        let current = self.text_at(row, column)?;
        if column == 0 || column > char_len(current) {
            return Err(BufferError::OutOfBounds { row, column });
        }
        let start = byte_index(current, column - 1);
        let end = byte_index(current, column);
        let mut updated = current.to_string();
        updated.replace_range(start..end, "");
        self.store(row, updated, theme)
    }

    /// Break a line at `column`.
    ///
    /// At column 0 an empty line is opened above; at or past the end one is
    /// opened below. Otherwise the tail, trimmed, moves to a new next line.
    /// In every case the cursor belongs at the start of `row + 1`.
    pub fn split_line(&mut self, row: usize, column: usize, theme: &dyn ThemeStore) -> EditResult {
        let current = self.text_at(row, column)?;
        let len = char_len(current);

        if column == 0 {
            return self.insert_line(row, "", theme);
        }
        if column >= len {
            return self.insert_line(row + 1, "", theme);
        }

        let split_at = byte_index(current, column);
        let head = current[..split_at].to_string();
        let tail = current[split_at..].trim().to_string();
        let head_markup = self.render(&head, theme)?;
        let tail_markup = self.render(&tail, theme)?;

        self.lines[row] = Line {
            text: head,
            markup: head_markup,
        };
        self.lines.insert(
            row + 1,
            Line {
                text: tail,
                markup: tail_markup,
            },
        );
        self.modified = true;
        Ok(vec![LineChange::Updated(row), LineChange::Inserted(row + 1)])
    }

    /// Append `row`, trimmed, to the previous line and remove it.
    pub fn join_with_previous(&mut self, row: usize, theme: &dyn ThemeStore) -> EditResult {
        if row == 0 || row >= self.lines.len() {
            return Err(BufferError::OutOfBounds { row, column: 0 });
        }
        let merged = format!("{}{}", self.lines[row - 1].text, self.lines[row].text.trim());
        let markup = self.render(&merged, theme)?;

        self.lines[row - 1] = Line {
            text: merged,
            markup,
        };
        self.lines.remove(row);
        self.modified = true;
        Ok(vec![LineChange::Updated(row - 1), LineChange::Removed(row)])
    }

    /// Remove a line. The last remaining line is cleared instead.
    pub fn delete_line(&mut self, row: usize, theme: &dyn ThemeStore) -> EditResult {
        if row >= self.lines.len() {
            return Err(BufferError::OutOfBounds { row, column: 0 });
        }
        if self.lines.len() == 1 {
            return self.store(0, String::new(), theme);
        }
        self.lines.remove(row);
        self.modified = true;
        Ok(vec![LineChange::Removed(row)])
    }

    /// Insert a new line so that it becomes `row`; `row` may equal the
    /// line count to append.
    pub fn insert_line(&mut self, row: usize, text: &str, theme: &dyn ThemeStore) -> EditResult {
        if row > self.lines.len() {
            return Err(BufferError::OutOfBounds { row, column: 0 });
        }
        let text = clean_line(text);
        let markup = self.render(&text, theme)?;
        self.lines.insert(row, Line { text, markup });
        self.modified = true;
        Ok(vec![LineChange::Inserted(row)])
    }

    pub fn replace_line(&mut self, row: usize, text: &str, theme: &dyn ThemeStore) -> EditResult {
        if row >= self.lines.len() {
            return Err(BufferError::OutOfBounds { row, column: 0 });
        }
        self.store(row, clean_line(text), theme)
    }

    /// Switch language and re-render every line.
    pub fn set_language(&mut self, language: Language, theme: &dyn ThemeStore) -> EditResult {
        let previous = self.language;
        self.language = language;
        let result = self.rerender_all(theme);
        if result.is_err() {
            self.language = previous;
        }
        result
    }

    /// Re-render every line, e.g. after a theme change.
    pub fn rerender_all(&mut self, theme: &dyn ThemeStore) -> EditResult {
        let markup = self
            .lines
            .iter()
            .map(|l| self.render(&l.text, theme))
            .collect::<Result<Vec<_>, _>>()?;
        for (line, markup) in self.lines.iter_mut().zip(markup) {
            line.markup = markup;
        }
        Ok((0..self.lines.len()).map(LineChange::Updated).collect())
    }

    fn text_at(&self, row: usize, column: usize) -> Result<&str, BufferError> {
        self.line_text(row)
            .ok_or(BufferError::OutOfBounds { row, column })
    }

    fn store(&mut self, row: usize, text: String, theme: &dyn ThemeStore) -> EditResult {
        let markup = self.render(&text, theme)?;
        self.lines[row] = Line { text, markup };
        self.modified = true;
        Ok(vec![LineChange::Updated(row)])
    }

    fn render(&self, text: &str, theme: &dyn ThemeStore) -> Result<String, BufferError> {
        highlight_line(self.language, text, theme).ok_or_else(|| BufferError::ThemeUnavailable {
            language: self.language.id().to_string(),
        })
    }

    fn render_or_plain(&self, text: &str, theme: &dyn ThemeStore) -> String {
        highlight_line(self.language, text, theme).unwrap_or_else(|| render_plain(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linepad_highlight::EMPTY_LINE_MARKUP;
    use linepad_theme::ThemeSet;

    fn theme() -> ThemeSet {
        ThemeSet::default()
    }

    fn buffer(lines: &[&str]) -> Buffer {
        Buffer::from_lines(lines.iter().copied(), Language::JavaScript, &theme())
    }

    fn raw(buffer: &Buffer) -> Vec<&str> {
        buffer.lines().collect()
    }

    fn assert_in_sync(buffer: &Buffer, theme: &ThemeSet) {
        assert_eq!(buffer.lines().count(), buffer.markup().count());
        for (text, markup) in buffer.lines().zip(buffer.markup()) {
            let expected = highlight_line(buffer.language(), text, theme).unwrap();
            assert_eq!(markup, expected, "markup out of sync for {:?}", text);
        }
    }

    #[test]
    fn test_empty_input_has_one_line() {
        let b = Buffer::from_text("", Language::Rust, &theme());
        assert_eq!(b.line_count(), 1);
        assert_eq!(b.line_text(0), Some(""));
        assert_eq!(b.line_markup(0), Some(EMPTY_LINE_MARKUP));
        assert!(!b.is_modified());
    }

    #[test]
    fn test_from_text_normalizes() {
        let b = Buffer::from_text("a\tb\r\nc\u{a0}d\re", Language::Plain, &theme());
        assert_eq!(raw(&b), vec!["a    b", "c d", "e"]);
        assert_eq!(b.text(), "a    b\nc d\ne");
    }

    #[test]
    fn test_from_rendered_repairs_mismatch() {
        let t = theme();
        let b = Buffer::from_rendered(
            vec!["let a".to_string(), "b".to_string()],
            vec!["stale".to_string()],
            Language::JavaScript,
            &t,
        );
        assert_in_sync(&b, &t);

        let b = Buffer::from_rendered(vec!["x".into()], vec!["kept".into()], Language::Plain, &t);
        assert_eq!(b.line_markup(0), Some("kept"));

        let b = Buffer::from_rendered(Vec::new(), Vec::new(), Language::Plain, &t);
        assert_eq!(b.line_count(), 1);
    }

    #[test]
    fn test_insert_and_delete_char() {
        let t = theme();
        let mut b = buffer(&["ab"]);
        assert_eq!(
            b.insert_char(0, 1, 'é', &t),
            Ok(vec![LineChange::Updated(0)])
        );
        assert_eq!(b.line_text(0), Some("aéb"));
        assert_eq!(b.line_len(0), 3);
        assert!(b.is_modified());

        b.delete_char_before(0, 2, &t).unwrap();
        assert_eq!(b.line_text(0), Some("ab"));
        assert_in_sync(&b, &t);

        assert_eq!(
            b.delete_char_before(0, 0, &t),
            Err(BufferError::OutOfBounds { row: 0, column: 0 })
        );
        assert!(b.insert_char(0, 9, 'x', &t).is_err());
        assert!(b.insert_char(4, 0, 'x', &t).is_err());
    }

    #[test]
    fn test_split_inside_line_trims_tail() {
        let t = theme();
        let mut b = buffer(&["let x =   1;"]);
        let changes = b.split_line(0, 7, &t).unwrap();
        assert_eq!(changes, vec![LineChange::Updated(0), LineChange::Inserted(1)]);
        assert_eq!(raw(&b), vec!["let x =", "1;"]);
        assert_in_sync(&b, &t);
    }

    #[test]
    fn test_split_at_edges() {
        let t = theme();
        let mut b = buffer(&["abc"]);
        assert_eq!(b.split_line(0, 0, &t), Ok(vec![LineChange::Inserted(0)]));
        assert_eq!(raw(&b), vec!["", "abc"]);

        assert_eq!(b.split_line(1, 3, &t), Ok(vec![LineChange::Inserted(2)]));
        assert_eq!(raw(&b), vec!["", "abc", ""]);
        assert_eq!(b.line_markup(2), Some(EMPTY_LINE_MARKUP));
    }

    #[test]
    fn test_split_then_join_restores_line() {
        let t = theme();
        let original = "const value = compute(a, b);";
        for column in 1..original.len() {
            let mut b = buffer(&[original]);
            b.split_line(0, column, &t).unwrap();
            // The split trims the tail, so only spaceless boundaries are exact inverses.
            let head = b.line_text(0).unwrap().to_string();
            let tail = b.line_text(1).unwrap().to_string();
            b.join_with_previous(1, &t).unwrap();
            assert_eq!(b.line_count(), 1);
            assert_eq!(b.line_text(0).unwrap(), format!("{}{}", head, tail));
            if !original[column..].starts_with(' ') && !original[..column].ends_with(' ') {
                assert_eq!(b.line_text(0), Some(original));
            }
            assert_in_sync(&b, &t);
        }
    }

    #[test]
    fn test_join_trims_current_line() {
        let t = theme();
        let mut b = buffer(&["foo(", "    bar)  "]);
        let changes = b.join_with_previous(1, &t).unwrap();
        assert_eq!(changes, vec![LineChange::Updated(0), LineChange::Removed(1)]);
        assert_eq!(raw(&b), vec!["foo(bar)"]);
        assert!(b.join_with_previous(0, &t).is_err());
    }

    #[test]
    fn test_delete_line_never_empties() {
        let t = theme();
        let mut b = buffer(&["a", "b", "c"]);
        for _ in 0..10 {
            b.delete_line(0, &t).unwrap();
            assert!(b.line_count() >= 1);
        }
        assert_eq!(raw(&b), vec![""]);
        assert_eq!(b.line_markup(0), Some(EMPTY_LINE_MARKUP));
    }

    #[test]
    fn test_insert_and_replace_line() {
        let t = theme();
        let mut b = buffer(&["a"]);
        assert_eq!(b.insert_line(1, "b", &t), Ok(vec![LineChange::Inserted(1)]));
        assert_eq!(b.insert_line(0, "z\n", &t), Ok(vec![LineChange::Inserted(0)]));
        assert_eq!(raw(&b), vec!["z", "a", "b"]);
        assert!(b.insert_line(9, "x", &t).is_err());

        b.replace_line(1, "\tA", &t).unwrap();
        assert_eq!(b.line_text(1), Some("    A"));
        assert_in_sync(&b, &t);
    }

    #[test]
    fn test_missing_theme_is_a_no_op() {
        let mut t = theme();
        t.remove_language("javascript");
        let mut b = Buffer::from_lines(["let a = 1;", "b"], Language::JavaScript, &t);
        let before_markup: Vec<String> = b.markup().map(String::from).collect();

        let err = b.insert_char(0, 0, 'x', &t).unwrap_err();
        assert_eq!(
            err,
            BufferError::ThemeUnavailable {
                language: "javascript".to_string()
            }
        );
        assert!(b.split_line(0, 3, &t).is_err());
        assert!(b.join_with_previous(1, &t).is_err());

        assert_eq!(raw(&b), vec!["let a = 1;", "b"]);
        assert_eq!(b.markup().map(String::from).collect::<Vec<_>>(), before_markup);
        assert!(!b.is_modified());
    }

    #[test]
    fn test_set_language_rerenders() {
        let t = theme();
        let mut b = buffer(&["fn main() {}", ""]);
        let changes = b.set_language(Language::Rust, &t).unwrap();
        assert_eq!(changes, vec![LineChange::Updated(0), LineChange::Updated(1)]);
        assert_eq!(b.language(), Language::Rust);
        assert_in_sync(&b, &t);

        let mut partial = t.clone();
        partial.remove_language("python");
        assert!(b.set_language(Language::Python, &partial).is_err());
        assert_eq!(b.language(), Language::Rust);
    }

    #[test]
    fn test_mark_saved() {
        let t = theme();
        let mut b = buffer(&["a"]);
        b.insert_char(0, 1, 'b', &t).unwrap();
        assert!(b.is_modified());
        b.mark_saved();
        assert!(!b.is_modified());
    }
}
