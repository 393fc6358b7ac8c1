//! Selection range of selection mode.

use linepad_buffer::Buffer;

/// Logical position in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Selection from the point it was started (`anchor`) to where the cursor is (`active`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Position,
    pub active: Position,
}

impl Selection {
    pub fn new(anchor: Position, active: Position) -> Self {
        Self { anchor, active }
    }

    /// Earlier end of the selection.
    pub fn start(&self) -> Position {
        self.anchor.min(self.active)
    }

    /// Raw text of the first selected line.
    pub fn first_line<'a>(&self, buffer: &'a Buffer) -> Option<&'a str> {
        buffer.line_text(self.start().row)
    }
}
