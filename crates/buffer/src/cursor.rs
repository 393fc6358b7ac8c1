use linepad_theme::CursorStyle;

use crate::buffer::Buffer;
use crate::viewport::Viewport;

/// Pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Size of one monospace glyph cell, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSize {
    pub width: f64,
    pub height: f64,
}

impl CellSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Text cursor: logical position, pixel position and appearance.
///
/// `column` counts characters and never exceeds the current line length.
/// Moves that leave the visible rows record a scroll target instead of
/// applying it; [`CursorState::settle_scroll`] applies it once the display
/// has scrolled.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorState {
    row: usize,
    column: usize,
    position: Point,
    cell: CellSize,
    origin: Point,
    style: CursorStyle,
    pending_scroll: Option<f64>,
}

impl CursorState {
    pub fn new(cell: CellSize, origin: Point, style: CursorStyle) -> Self {
        Self {
            row: 0,
            column: 0,
            position: origin,
            cell,
            origin,
            style,
            pending_scroll: None,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn cell(&self) -> CellSize {
        self.cell
    }

    pub fn style(&self) -> &CursorStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: CursorStyle) {
        self.style = style;
    }

    /// Scroll offset waiting to be applied.
    pub fn pending_scroll(&self) -> Option<f64> {
        self.pending_scroll
    }

    /// Move one row up. Returns false at the first row.
    pub fn move_up(&mut self, buffer: &Buffer, viewport: &Viewport) -> bool {
        if self.row == 0 {
            return false;
        }
        if viewport.is_out_of_view_top(self.row, self.cell) {
            self.pending_scroll = Some(viewport.scroll_top_for(self.row - 1, self.cell));
            self.row -= 1;
        } else {
            self.row -= 1;
            self.position.y -= self.cell.height;
        }
        self.clamp_column(buffer);
        true
    }

    /// Move one row down. Returns false at the last row.
    pub fn move_down(&mut self, buffer: &Buffer, viewport: &Viewport) -> bool {
        if self.row + 1 >= buffer.line_count() {
            return false;
        }
        if viewport.is_out_of_view_bottom(self.row, self.cell) {
            self.pending_scroll = Some(viewport.scroll_bottom_for(self.row + 1, self.cell));
            self.row += 1;
        } else {
            self.row += 1;
            self.position.y += self.cell.height;
        }
        self.clamp_column(buffer);
        true
    }

    pub fn move_left(&mut self) -> bool {
        if self.column == 0 {
            return false;
        }
        self.column -= 1;
        self.position.x -= self.cell.width;
        true
    }

    /// Move one column right; the column may reach the line length.
    pub fn move_right(&mut self, buffer: &Buffer) -> bool {
        if self.column >= buffer.line_len(self.row) {
            return false;
        }
        self.column += 1;
        self.position.x += self.cell.width;
        true
    }

    /// Set the column on the current row, clamped to the line length.
    pub fn set_column(&mut self, column: usize, buffer: &Buffer) {
        self.column = column.min(buffer.line_len(self.row));
        self.position.x = self.x_for(self.column);
    }

    /// Jump to a row, scrolling when it is outside the visible rows.
    pub fn move_to_row(&mut self, row: usize, buffer: &Buffer, viewport: &Viewport) {
        let row = row.min(buffer.line_count().saturating_sub(1));
        if !viewport.is_row_visible(row, self.cell) {
            let target = if viewport.line_top(row, self.cell) < 0.0 {
                viewport.scroll_top_for(row, self.cell)
            } else {
                viewport.scroll_bottom_for(row, self.cell)
            };
            self.pending_scroll = Some(target);
        }
        self.row = row;
        self.position.y = self.y_for(row, viewport);
        self.clamp_column(buffer);
    }

    /// Jump to a row and column, both clamped.
    pub fn set_position(&mut self, row: usize, column: usize, buffer: &Buffer, viewport: &Viewport) {
        self.move_to_row(row, buffer, viewport);
        self.set_column(column, buffer);
    }

    /// Back to the first row and column with the view at the top.
    pub fn reset(&mut self, viewport: &mut Viewport) {
        viewport.scroll_top = 0.0;
        self.row = 0;
        self.column = 0;
        self.pending_scroll = None;
        self.position = self.origin;
    }

    /// Re-establish bounds after the buffer changed underneath the cursor.
    pub fn clamp_to(&mut self, buffer: &Buffer, viewport: &Viewport) {
        self.row = self.row.min(buffer.line_count().saturating_sub(1));
        self.column = self.column.min(buffer.line_len(self.row));
        self.recompute(viewport);
    }

    /// Apply a pending scroll and recompute the pixel position against it.
    /// Returns whether there was anything to apply.
    pub fn settle_scroll(&mut self, viewport: &mut Viewport) -> bool {
        let Some(scroll_top) = self.pending_scroll.take() else {
            return false;
        };
        viewport.scroll_top = scroll_top;
        self.recompute(viewport);
        true
    }

    /// Recompute the pixel position from row, column and scroll offset.
    pub fn recompute(&mut self, viewport: &Viewport) {
        self.position = Point::new(self.x_for(self.column), self.y_for(self.row, viewport));
    }

    fn clamp_column(&mut self, buffer: &Buffer) {
        let len = buffer.line_len(self.row);
        if self.column > len {
            self.column = len;
            self.position.x = self.x_for(len);
        }
    }

    fn x_for(&self, column: usize) -> f64 {
        self.origin.x + column as f64 * self.cell.width
    }

    fn y_for(&self, row: usize, viewport: &Viewport) -> f64 {
        self.origin.y + row as f64 * self.cell.height - viewport.scroll_top
    }
}
