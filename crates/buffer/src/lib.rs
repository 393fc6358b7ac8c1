//! Text buffer for linepad.
//!
//! Holds a file as raw lines plus their rendered markup, kept in step
//! under every edit, along with the cursor and the scroll state of the
//! editing area.

mod buffer;
mod cursor;
mod viewport;

pub use buffer::{normalize_whitespace, Buffer, BufferError, EditResult, LineChange};
pub use cursor::{CellSize, CursorState, Point};
pub use viewport::Viewport;
