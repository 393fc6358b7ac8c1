//! Cursor motions and line edits behind the editor commands.

use crate::core::{EditingSession, SessionContext};
use crate::mode::Mode;
use crate::motion;
use crate::selection::{Position, Selection};

impl EditingSession {
    fn row_col(&self) -> (usize, usize) {
        (self.cursor.row(), self.cursor.column())
    }

    fn current_line(&self) -> &str {
        self.buffer.line_text(self.cursor.row()).unwrap_or_default()
    }

    fn jump(&mut self, row: usize, column: usize) {
        self.cursor
            .set_position(row, column, &self.buffer, &self.viewport);
    }

    // === Motions ===

    pub(crate) fn move_left(&mut self) {
        self.cursor.move_left();
    }

    pub(crate) fn move_right(&mut self) {
        self.cursor.move_right(&self.buffer);
    }

    pub(crate) fn move_up(&mut self) {
        self.cursor.move_up(&self.buffer, &self.viewport);
    }

    pub(crate) fn move_down(&mut self) {
        self.cursor.move_down(&self.buffer, &self.viewport);
    }

    pub(crate) fn word_forward(&mut self) {
        if let Some(column) = motion::word_forward(self.current_line(), self.cursor.column()) {
            self.cursor.set_column(column, &self.buffer);
        }
    }

    pub(crate) fn word_backward(&mut self) {
        let column = motion::word_backward(self.current_line(), self.cursor.column());
        self.cursor.set_column(column, &self.buffer);
    }

    pub(crate) fn line_start(&mut self) {
        self.cursor.set_column(0, &self.buffer);
    }

    pub(crate) fn line_end(&mut self) {
        let len = self.buffer.line_len(self.cursor.row());
        self.cursor.set_column(len, &self.buffer);
    }

    pub(crate) fn prev_blank_line(&mut self) {
        if let Some(row) = motion::prev_blank_row(&self.buffer, self.cursor.row()) {
            self.jump(row, 0);
        }
    }

    pub(crate) fn next_blank_line(&mut self) {
        if let Some(row) = motion::next_blank_row(&self.buffer, self.cursor.row()) {
            self.jump(row, 0);
        }
    }

    pub(crate) fn first_line(&mut self) {
        self.jump(0, 0);
    }

    pub(crate) fn last_line(&mut self) {
        self.jump(self.buffer.line_count().saturating_sub(1), 0);
    }

    // === Entering insert mode ===

    /// `I`. Nothing happens on a blank line.
    pub(crate) fn insert_at_first_non_blank(&mut self, ctx: &SessionContext<'_>) {
        if let Some(column) = motion::first_non_blank(self.current_line()) {
            self.cursor.set_column(column, &self.buffer);
            self.set_mode(Mode::Insert, ctx);
        }
    }

    pub(crate) fn append_at_line_end(&mut self, ctx: &SessionContext<'_>) {
        self.line_end();
        self.set_mode(Mode::Insert, ctx);
    }

    pub(crate) fn open_line_above(&mut self, ctx: &mut SessionContext<'_>) {
        let row = self.cursor.row();
        if self.edit(ctx, |buffer, theme| buffer.insert_line(row, "", theme)) {
            self.jump(row, 0);
            self.set_mode(Mode::Insert, ctx);
        }
    }

    /// `o`. The new line takes the indentation of the line after it.
    pub(crate) fn open_line_below(&mut self, ctx: &mut SessionContext<'_>) {
        let row = self.cursor.row();
        let indent = self
            .buffer
            .line_text(row + 1)
            .map_or(0, motion::leading_spaces);
        let text = " ".repeat(indent);
        if self.edit(ctx, |buffer, theme| buffer.insert_line(row + 1, &text, theme)) {
            self.jump(row + 1, indent);
            self.set_mode(Mode::Insert, ctx);
        }
    }

    pub(crate) fn enter_selection(&mut self, ctx: &SessionContext<'_>) {
        let (row, column) = self.row_col();
        let here = Position::new(row, column);
        self.selection = Some(Selection::new(here, here));
        self.set_mode(Mode::Selection, ctx);
    }

    pub(crate) fn exit_to_normal(&mut self, ctx: &SessionContext<'_>) {
        match self.mode {
            Mode::Command | Mode::CommandError => self.command_line.clear(),
            Mode::Selection => self.selection = None,
            Mode::Normal | Mode::Insert => {}
        }
        self.set_mode(Mode::Normal, ctx);
    }

    // === Line commands ===

    /// `p`: put the clipboard line above the cursor line.
    pub(crate) fn paste(&mut self, ctx: &mut SessionContext<'_>) {
        let Some(text) = self.clipboard.clone().filter(|t| !t.trim().is_empty()) else {
            return;
        };
        let (row, _) = self.row_col();
        if self.edit(ctx, |buffer, theme| buffer.insert_line(row, &text, theme)) {
            self.jump(row + 1, motion::leading_spaces(&text));
        }
    }

    /// `dd`
    pub(crate) fn delete_line(&mut self, ctx: &mut SessionContext<'_>) {
        let (row, column) = self.row_col();
        let line_count = self.buffer.line_count();
        let line = self.current_line().to_string();

        if !self.edit(ctx, |buffer, theme| buffer.delete_line(row, theme)) {
            return;
        }
        self.clipboard = Some(line);
        if line_count == 1 {
            self.jump(0, 0);
        } else if row + 1 == line_count {
            self.jump(row - 1, column);
        } else {
            self.jump(row, column);
        }
    }

    /// `yy`
    pub(crate) fn yank_line(&mut self) {
        self.clipboard = Some(self.current_line().to_string());
    }

    /// `cc`: keep only the indentation and start typing after it.
    pub(crate) fn change_line(&mut self, ctx: &mut SessionContext<'_>) {
        let row = self.cursor.row();
        let line = self.current_line().to_string();
        let indent = motion::leading_spaces(&line);

        let text = " ".repeat(indent);
        if self.edit(ctx, |buffer, theme| buffer.replace_line(row, &text, theme)) {
            self.clipboard = Some(line);
            self.jump(row, indent.saturating_sub(1));
            self.set_mode(Mode::Insert, ctx);
        }
    }

    pub(crate) fn yank_selection(&mut self, ctx: &SessionContext<'_>) {
        if let Some(line) = self
            .selection
            .take()
            .and_then(|selection| selection.first_line(&self.buffer).map(str::to_string))
        {
            self.clipboard = Some(line);
        }
        self.set_mode(Mode::Normal, ctx);
    }

    // === Insert mode ===

    pub(crate) fn insert_char(&mut self, ch: char, ctx: &mut SessionContext<'_>) {
        match ch {
            '\t' => return self.insert_tab(ctx),
            '\n' | '\r' => return self.split_line(ctx),
            _ => {}
        }
        let (row, column) = self.row_col();
        if self.edit(ctx, |buffer, theme| buffer.insert_char(row, column, ch, theme)) {
            self.cursor.set_column(column + 1, &self.buffer);
        }
    }

    pub(crate) fn insert_tab(&mut self, ctx: &mut SessionContext<'_>) {
        let (row, column) = self.row_col();
        let tab = self.settings.tab();
        if self.edit(ctx, |buffer, theme| buffer.insert_str(row, column, &tab, theme)) {
            self.cursor
                .set_column(column + self.settings.tab_size, &self.buffer);
        }
    }

    pub(crate) fn split_line(&mut self, ctx: &mut SessionContext<'_>) {
        let (row, column) = self.row_col();
        if self.edit(ctx, |buffer, theme| buffer.split_line(row, column, theme)) {
            self.jump(row + 1, 0);
        }
    }

    /// Delete before the cursor, or join with the line above at column 0.
    pub(crate) fn backspace(&mut self, ctx: &mut SessionContext<'_>) {
        let (row, column) = self.row_col();
        if column > 0 {
            if self.edit(ctx, |buffer, theme| buffer.delete_char_before(row, column, theme)) {
                self.cursor.set_column(column - 1, &self.buffer);
            }
        } else if row > 0 {
            let joint = self.buffer.line_len(row - 1);
            if self.edit(ctx, |buffer, theme| buffer.join_with_previous(row, theme)) {
                self.jump(row - 1, joint);
            }
        }
    }
}
