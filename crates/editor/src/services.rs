//! Interfaces of the session's collaborators.
//!
//! The session never stores these; every call that needs one gets it
//! passed in. All calls complete before the next key is handled.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use linepad_buffer::{CellSize, Point};
use linepad_highlight::Language;
use linepad_theme::{CursorStyle, ThemeStore};

use crate::mode::Mode;

/// A file as the file service hands it to the editor.
#[derive(Debug, Clone, PartialEq)]
pub struct FileContent {
    pub lines: Vec<String>,
    /// Rendered markup, one per line
    pub markup: Vec<String>,
    pub language: Language,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
}

/// One row of the project tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeEntry {
    pub id: String,
    pub name: String,
    pub depth: usize,
    pub kind: EntryKind,
    pub full_path: PathBuf,
    pub is_open: bool,
    pub is_focused: bool,
    pub content_changed: bool,
}

impl TreeEntry {
    pub fn new(name: impl Into<String>, depth: usize, kind: EntryKind, full_path: PathBuf) -> Self {
        let mut id = uuid::Uuid::new_v4().simple().to_string();
        id.truncate(6);
        Self {
            id,
            name: name.into(),
            depth,
            kind,
            full_path,
            is_open: false,
            is_focused: false,
            content_changed: false,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }
}

/// File-system access.
pub trait FileService {
    fn read_file(&mut self, path: &Path, theme: &dyn ThemeStore) -> Result<FileContent>;

    fn save_file(&mut self, path: &Path, text: &str) -> Result<()>;

    /// Create an empty file `name` inside `dir`.
    fn create_file(&mut self, dir: &Path, name: &str, depth: usize) -> Result<TreeEntry>;

    /// Create an empty directory `name` inside `dir`.
    fn create_dir(&mut self, dir: &Path, name: &str, depth: usize) -> Result<TreeEntry>;

    /// Drop the edit-session cache of a file.
    fn delete_cache(&mut self, path: &Path) -> Result<()>;

    fn update_cache(&mut self, path: &Path, lines: &[String], markup: &[String]) -> Result<()>;

    fn read_folder(&self, path: &Path, depth: usize) -> Result<Vec<TreeEntry>>;
}

/// Visible project tree the ex-commands insert new entries into.
pub trait ProjectTree {
    /// Directory new files are created in.
    fn current_dir(&self) -> &Path;

    fn project_root(&self) -> &Path;

    fn entries(&self) -> &[TreeEntry];

    /// Insert at `index`, or append to the visible root when `None`.
    fn insert_entry(&mut self, entry: TreeEntry, index: Option<usize>) -> Result<()>;
}

/// Whatever paints the editor.
pub trait DisplaySurface {
    /// Forget all painted lines.
    fn clear(&mut self);

    fn paint_line(&mut self, row: usize, markup: &str);

    fn insert_line(&mut self, row: usize, markup: &str);

    fn remove_line(&mut self, row: usize);

    fn paint_gutter(&mut self, markup: &str);

    fn move_cursor(&mut self, position: Point, cell: CellSize, style: &CursorStyle);

    /// Scroll the text area. The surface calls the session's `settle_scroll`
    /// once the new geometry is in place.
    fn scroll_to(&mut self, scroll_top: f64);

    fn show_mode(&mut self, mode: Mode, command_line: &str);

    fn report_error(&mut self, message: &str);
}

/// A call received by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Clear,
    PaintLine(usize, String),
    InsertLine(usize, String),
    RemoveLine(usize),
    PaintGutter(String),
    MoveCursor(Point),
    ScrollTo(f64),
    ShowMode(Mode, String),
    ReportError(String),
}

/// Surface that paints nothing and remembers everything.
///
/// Keeps a mirror of the painted lines so callers can compare it with
/// the buffer's markup.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    calls: Vec<SurfaceCall>,
    lines: Vec<String>,
    gutter: String,
    cursor_style: Option<CursorStyle>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    /// Return and forget the calls recorded so far.
    pub fn take_calls(&mut self) -> Vec<SurfaceCall> {
        std::mem::take(&mut self.calls)
    }

    /// Markup currently on screen, row by row.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn gutter(&self) -> &str {
        &self.gutter
    }

    pub fn cursor_style(&self) -> Option<&CursorStyle> {
        self.cursor_style.as_ref()
    }

    pub fn errors(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::ReportError(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DisplaySurface for RecordingSurface {
    fn clear(&mut self) {
        self.lines.clear();
        self.calls.push(SurfaceCall::Clear);
    }

    fn paint_line(&mut self, row: usize, markup: &str) {
        if let Some(line) = self.lines.get_mut(row) {
            *line = markup.to_string();
        }
        self.calls.push(SurfaceCall::PaintLine(row, markup.to_string()));
    }

    fn insert_line(&mut self, row: usize, markup: &str) {
        let row = row.min(self.lines.len());
        self.lines.insert(row, markup.to_string());
        self.calls.push(SurfaceCall::InsertLine(row, markup.to_string()));
    }

    fn remove_line(&mut self, row: usize) {
        if row < self.lines.len() {
            self.lines.remove(row);
        }
        self.calls.push(SurfaceCall::RemoveLine(row));
    }

    fn paint_gutter(&mut self, markup: &str) {
        self.gutter = markup.to_string();
        self.calls.push(SurfaceCall::PaintGutter(markup.to_string()));
    }

    fn move_cursor(&mut self, position: Point, _cell: CellSize, style: &CursorStyle) {
        self.cursor_style = Some(style.clone());
        self.calls.push(SurfaceCall::MoveCursor(position));
    }

    fn scroll_to(&mut self, scroll_top: f64) {
        self.calls.push(SurfaceCall::ScrollTo(scroll_top));
    }

    fn show_mode(&mut self, mode: Mode, command_line: &str) {
        self.calls
            .push(SurfaceCall::ShowMode(mode, command_line.to_string()));
    }

    fn report_error(&mut self, message: &str) {
        self.calls.push(SurfaceCall::ReportError(message.to_string()));
    }
}
