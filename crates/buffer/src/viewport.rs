use crate::cursor::CellSize;

/// Vertical scroll state of the editing area, in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// Pixels scrolled past the top of the document
    pub scroll_top: f64,
    /// Height of the editing area
    pub height: f64,
    /// Space reserved at the bottom for the status bar
    pub footbar_height: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
}

impl Viewport {
    pub fn new(height: f64, footbar_height: f64, margin_top: f64, margin_bottom: f64) -> Self {
        Self {
            scroll_top: 0.0,
            height,
            footbar_height,
            margin_top,
            margin_bottom,
        }
    }

    /// Update the visible height, e.g. after a terminal resize.
    pub fn resize(&mut self, height: f64) {
        self.height = height;
    }

    /// Height left for text once the footbar is taken off.
    pub fn usable_height(&self) -> f64 {
        self.height - self.footbar_height
    }

    /// Top edge of a row, relative to the top of the editing area.
    pub fn line_top(&self, row: usize, cell: CellSize) -> f64 {
        row as f64 * cell.height - self.scroll_top
    }

    pub fn line_bottom(&self, row: usize, cell: CellSize) -> f64 {
        self.line_top(row, cell) + cell.height
    }

    /// Whether moving up from `row` would leave the visible area.
    pub fn is_out_of_view_top(&self, row: usize, cell: CellSize) -> bool {
        self.line_top(row, cell) - cell.height - self.margin_top <= 0.0
    }

    /// Whether moving down from `row` would run into the footbar.
    pub fn is_out_of_view_bottom(&self, row: usize, cell: CellSize) -> bool {
        self.line_bottom(row, cell) + cell.height > self.usable_height()
    }

    /// Scroll offset that puts `row` at the top, below the top margin.
    pub fn scroll_top_for(&self, row: usize, cell: CellSize) -> f64 {
        (row as f64 * cell.height - self.margin_top).max(0.0)
    }

    /// Scroll offset that puts `row` at the bottom, above the footbar and
    /// the bottom margin.
    pub fn scroll_bottom_for(&self, row: usize, cell: CellSize) -> f64 {
        ((row + 1) as f64 * cell.height - self.usable_height() + self.margin_bottom).max(0.0)
    }

    /// Whether a row is entirely inside the usable area.
    pub fn is_row_visible(&self, row: usize, cell: CellSize) -> bool {
        self.line_top(row, cell) >= 0.0 && self.line_bottom(row, cell) <= self.usable_height()
    }
}
