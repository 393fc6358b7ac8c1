use std::path::{Path, PathBuf};

use linepad_buffer::{Buffer, CursorState, EditResult, LineChange, Viewport};
use linepad_highlight::render_line_numbers;
use linepad_keyboard::KeyInput;
use linepad_theme::ThemeStore;

use crate::chord::{ChordStep, ChordTracker, Clock};
use crate::error::EditorError;
use crate::ex_command::{validate_name, ExCommand};
use crate::keyboard::EditorCommand;
use crate::mode::Mode;
use crate::selection::{Position, Selection};
use crate::services::{DisplaySurface, EntryKind, FileService, ProjectTree, TreeEntry};
use crate::settings::SessionSettings;

/// What the caller should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    /// The file was closed; the session takes no more input.
    Closed,
}

/// Collaborators lent to the session for one key.
pub struct SessionContext<'a> {
    pub files: &'a mut dyn FileService,
    pub tree: &'a mut dyn ProjectTree,
    pub theme: &'a dyn ThemeStore,
    pub surface: &'a mut dyn DisplaySurface,
    pub clock: &'a dyn Clock,
}

/// Editing state of one open file.
pub struct EditingSession {
    pub(crate) path: PathBuf,
    pub(crate) buffer: Buffer,
    pub(crate) cursor: CursorState,
    pub(crate) viewport: Viewport,
    pub(crate) mode: Mode,
    pub(crate) chord: ChordTracker,
    /// Last copied or cut line
    pub(crate) clipboard: Option<String>,
    /// Text typed after `:`
    pub(crate) command_line: String,
    pub(crate) selection: Option<Selection>,
    pub(crate) settings: SessionSettings,
    pub(crate) closed: bool,
}

impl EditingSession {
    /// Read a file through the file service and paint it.
    pub fn open(
        path: impl Into<PathBuf>,
        settings: SessionSettings,
        files: &mut dyn FileService,
        theme: &dyn ThemeStore,
        surface: &mut dyn DisplaySurface,
    ) -> Result<Self, EditorError> {
        let path = path.into();
        let content = files
            .read_file(&path, theme)
            .map_err(EditorError::collaborator("open"))?;
        let buffer = Buffer::from_rendered(content.lines, content.markup, content.language, theme);

        let style = Mode::Normal.cursor_style(theme.cursor_styles());
        let cursor = CursorState::new(settings.cell, settings.origin, style);
        let viewport = Viewport::new(
            settings.viewport_height,
            settings.footbar_height,
            settings.margin_top,
            settings.margin_bottom,
        );

        let session = Self {
            path,
            buffer,
            cursor,
            viewport,
            mode: Mode::Normal,
            chord: ChordTracker::new(settings.chord_timeout),
            clipboard: None,
            command_line: String::new(),
            selection: None,
            settings,
            closed: false,
        };
        session.paint_all(surface);
        log::info!(
            "Opened {} ({} lines, {})",
            session.path.display(),
            session.buffer.line_count(),
            session.buffer.language()
        );
        Ok(session)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn cursor(&self) -> &CursorState {
        &self.cursor
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn command_line(&self) -> &str {
        &self.command_line
    }

    pub fn clipboard(&self) -> Option<&str> {
        self.clipboard.as_deref()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Handle one key press to completion.
    pub fn handle_key(
        &mut self,
        input: KeyInput,
        ctx: &mut SessionContext<'_>,
    ) -> Result<Outcome, EditorError> {
        if self.closed {
            return Ok(Outcome::Closed);
        }
        let mode_before = self.mode;
        let command_line_before = self.command_line.clone();

        let command = self.resolve(input, ctx.clock);
        let moved = command.is_some_and(EditorCommand::is_motion);
        let result = match command {
            Some(command) => command.execute(self, ctx),
            None => Ok(Outcome::Continue),
        };

        if moved && self.mode == Mode::Selection {
            let active = Position::new(self.cursor.row(), self.cursor.column());
            if let Some(selection) = self.selection.as_mut() {
                selection.active = active;
            }
        }
        self.sync_display(ctx.surface, mode_before, &command_line_before);

        if let Err(err) = &result {
            log::warn!("{}: {}", self.path.display(), error_chain(err));
        }
        result
    }

    /// Apply a scroll the surface has carried out. Returns whether the
    /// cursor had to be moved.
    pub fn settle_scroll(&mut self, surface: &mut dyn DisplaySurface) -> bool {
        if !self.cursor.settle_scroll(&mut self.viewport) {
            return false;
        }
        self.paint_cursor(surface);
        true
    }

    /// The editing area changed height.
    pub fn resize(&mut self, height: f64, surface: &mut dyn DisplaySurface) {
        self.viewport.resize(height);
        self.cursor
            .move_to_row(self.cursor.row(), &self.buffer, &self.viewport);
        if let Some(scroll_top) = self.cursor.pending_scroll() {
            surface.scroll_to(scroll_top);
        }
        self.paint_cursor(surface);
    }

    /// Push the current lines into the file service's edit cache.
    pub fn flush_cache(&self, files: &mut dyn FileService) -> Result<(), EditorError> {
        let lines: Vec<String> = self.buffer.lines().map(str::to_string).collect();
        let markup: Vec<String> = self.buffer.markup().map(str::to_string).collect();
        files
            .update_cache(&self.path, &lines, &markup)
            .map_err(EditorError::collaborator("update cache"))
    }

    /// Re-render every line against a new theme and repaint.
    ///
    /// A theme without colors for the buffer's language is refused and
    /// leaves the session as it was.
    pub fn apply_theme(
        &mut self,
        theme: &dyn ThemeStore,
        surface: &mut dyn DisplaySurface,
    ) -> Result<(), EditorError> {
        self.buffer.rerender_all(theme)?;
        self.cursor
            .set_style(self.mode.cursor_style(theme.cursor_styles()));
        self.paint_all(surface);
        Ok(())
    }

    /// Turn a key into a command, resolving chords in normal mode.
    fn resolve(&mut self, input: KeyInput, clock: &dyn Clock) -> Option<EditorCommand> {
        if self.mode != Mode::Normal || input.ctrl {
            self.chord.clear();
            return Some(EditorCommand::from_key(input, self.mode));
        }
        match self.chord.feed(input.printable(), clock.now()) {
            ChordStep::Armed => None,
            ChordStep::Complete(chord) => Some(chord.into()),
            ChordStep::Passthrough => Some(EditorCommand::from_key(input, self.mode)),
        }
    }

    pub(crate) fn set_mode(&mut self, mode: Mode, ctx: &SessionContext<'_>) {
        self.mode = mode;
        self.cursor
            .set_style(mode.cursor_style(ctx.theme.cursor_styles()));
    }

    /// Run a buffer edit and paint what it changed. A refused edit changes
    /// nothing and is only logged.
    pub(crate) fn edit<F>(&mut self, ctx: &mut SessionContext<'_>, edit: F) -> bool
    where
        F: FnOnce(&mut Buffer, &dyn ThemeStore) -> EditResult,
    {
        match edit(&mut self.buffer, ctx.theme) {
            Ok(changes) => {
                self.paint_changes(&changes, ctx.surface);
                true
            }
            Err(err) => {
                log::debug!("Edit skipped: {}", EditorError::from(err));
                false
            }
        }
    }

    // === Display ===

    fn paint_all(&self, surface: &mut dyn DisplaySurface) {
        surface.clear();
        for (row, markup) in self.buffer.markup().enumerate() {
            surface.insert_line(row, markup);
        }
        surface.paint_gutter(&render_line_numbers(self.buffer.line_count()));
        self.paint_cursor(surface);
        surface.show_mode(self.mode, &self.command_line);
    }

    fn paint_changes(&self, changes: &[LineChange], surface: &mut dyn DisplaySurface) {
        let mut line_count_changed = false;
        for change in changes {
            match *change {
                LineChange::Updated(row) => {
                    if let Some(markup) = self.buffer.line_markup(row) {
                        surface.paint_line(row, markup);
                    }
                }
                LineChange::Inserted(row) => {
                    if let Some(markup) = self.buffer.line_markup(row) {
                        surface.insert_line(row, markup);
                    }
                    line_count_changed = true;
                }
                LineChange::Removed(row) => {
                    surface.remove_line(row);
                    line_count_changed = true;
                }
            }
        }
        if line_count_changed {
            surface.paint_gutter(&render_line_numbers(self.buffer.line_count()));
        }
    }

    fn paint_cursor(&self, surface: &mut dyn DisplaySurface) {
        surface.move_cursor(
            self.cursor.position(),
            self.cursor.cell(),
            self.cursor.style(),
        );
    }

    fn sync_display(
        &self,
        surface: &mut dyn DisplaySurface,
        mode_before: Mode,
        command_line_before: &str,
    ) {
        if let Some(scroll_top) = self.cursor.pending_scroll() {
            surface.scroll_to(scroll_top);
        }
        self.paint_cursor(surface);
        if self.mode != mode_before || self.command_line != command_line_before {
            surface.show_mode(self.mode, &self.command_line);
        }
    }

    // === Files ===

    /// Write the buffer through the file service.
    pub fn save(&mut self, ctx: &mut SessionContext<'_>) -> Result<(), EditorError> {
        ctx.files
            .save_file(&self.path, &self.buffer.text())
            .map_err(EditorError::collaborator("save"))?;
        self.buffer.mark_saved();
        log::info!("Saved {}", self.path.display());
        Ok(())
    }

    fn close(&mut self, ctx: &mut SessionContext<'_>) -> Result<(), EditorError> {
        ctx.files
            .delete_cache(&self.path)
            .map_err(EditorError::collaborator("close"))?;
        self.closed = true;
        self.set_mode(Mode::Normal, ctx);
        log::info!("Closed {}", self.path.display());
        Ok(())
    }

    // === Command line ===

    pub(crate) fn enter_command(&mut self, ctx: &SessionContext<'_>) {
        self.command_line.clear();
        self.set_mode(Mode::Command, ctx);
    }

    pub(crate) fn push_command_char(&mut self, ch: char) {
        self.command_line.push(ch);
    }

    pub(crate) fn pop_command_char(&mut self) {
        self.command_line.pop();
    }

    /// Run the typed command line. A failed save or close keeps command
    /// mode and leaves the buffer as it was.
    pub(crate) fn execute_command_line(
        &mut self,
        ctx: &mut SessionContext<'_>,
    ) -> Result<Outcome, EditorError> {
        let line = std::mem::take(&mut self.command_line);
        let command = match ExCommand::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                log::debug!("{}", err);
                self.set_mode(Mode::CommandError, ctx);
                return Ok(Outcome::Continue);
            }
        };

        match command {
            ExCommand::Write => self.save(ctx)?,
            ExCommand::Quit => {
                self.close(ctx)?;
                return Ok(Outcome::Closed);
            }
            ExCommand::WriteQuit => {
                self.save(ctx)?;
                self.close(ctx)?;
                return Ok(Outcome::Closed);
            }
            ExCommand::NewFile { name, here } => {
                self.create_entry(EntryKind::File, &name, here, ctx)?
            }
            ExCommand::NewDir { name, .. } => self.create_entry(EntryKind::Dir, &name, false, ctx)?,
        }
        self.set_mode(Mode::Normal, ctx);
        Ok(Outcome::Continue)
    }

    /// Create a file or directory in the tree's current directory and
    /// show it in the tree.
    fn create_entry(
        &mut self,
        kind: EntryKind,
        name: &str,
        here: bool,
        ctx: &mut SessionContext<'_>,
    ) -> Result<(), EditorError> {
        if let Err(err) = validate_name(name) {
            log::debug!("Not creating {:?}: {}", kind, err);
            return Ok(());
        }

        let dir = ctx.tree.current_dir().to_path_buf();
        let dir_index = ctx.tree.entries().iter().position(|e| e.full_path == dir);
        let depth = dir_index.map_or(0, |i| ctx.tree.entries()[i].depth + 1);

        let (entry, index) = match kind {
            EntryKind::File => {
                let entry = ctx
                    .files
                    .create_file(&dir, name, depth)
                    .map_err(EditorError::collaborator("create file"))?;
                let index = (!here).then(|| first_file_index(ctx.tree.entries(), dir_index));
                (entry, index)
            }
            EntryKind::Dir => {
                let entry = ctx
                    .files
                    .create_dir(&dir, name, depth)
                    .map_err(EditorError::collaborator("create directory"))?;
                (entry, Some(0))
            }
        };

        log::info!("Created {}", entry.full_path.display());
        ctx.tree
            .insert_entry(entry, index)
            .map_err(EditorError::collaborator("update project tree"))
    }
}

/// Where a new file goes among the entries after its directory: before the
/// first file, or right after the directory when there is none.
fn first_file_index(entries: &[TreeEntry], dir_index: Option<usize>) -> usize {
    let start = dir_index.map_or(0, |i| i + 1);
    entries[start..]
        .iter()
        .position(|e| e.kind == EntryKind::File)
        .map_or(start, |offset| start + offset)
}

fn error_chain(err: &EditorError) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::SurfaceCall;
    use crate::testing::{Harness, MemoryFiles};
    use linepad_highlight::EMPTY_LINE_MARKUP;
    use linepad_theme::ThemeSet;
    use std::time::Duration;

    #[test]
    fn test_open_empty_file() {
        let h = Harness::open("/p/empty.txt", "");
        assert_eq!(h.session.buffer().line_count(), 1);
        assert_eq!(h.session.buffer().line_text(0), Some(""));
        assert_eq!(h.surface.lines(), [EMPTY_LINE_MARKUP]);
        assert_eq!(h.session.mode(), Mode::Normal);
        assert_eq!(
            (h.session.cursor().row(), h.session.cursor().column()),
            (0, 0)
        );
    }

    #[test]
    fn test_open_failure_is_collaborator_failure() {
        let mut files = MemoryFiles::default();
        let theme = linepad_theme::ThemeSet::default();
        let mut surface = crate::services::RecordingSurface::new();
        let result = EditingSession::open(
            "/p/missing.rs",
            SessionSettings::default(),
            &mut files,
            &theme,
            &mut surface,
        );
        assert!(matches!(
            result,
            Err(EditorError::CollaboratorFailure { operation: "open", .. })
        ));
    }

    #[test]
    fn test_enter_at_end_of_line() {
        let mut h = Harness::open("/p/a.js", "hello\nworld");
        h.keys("A<CR>").unwrap();
        assert_eq!(h.lines(), ["hello", "", "world"]);
        assert_eq!((h.row(), h.column()), (1, 0));
        assert_eq!(h.session.mode(), Mode::Insert);
    }

    #[test]
    fn test_dd_chord_deletes_and_copies() {
        let mut h = Harness::open("/p/a.py", "a\nb\nc");
        h.keys("jdd").unwrap();
        assert_eq!(h.lines(), ["a", "c"]);
        assert_eq!(h.session.clipboard(), Some("b"));
        assert_eq!(h.row(), 1);
    }

    #[test]
    fn test_dd_never_empties_buffer() {
        let mut h = Harness::open("/p/a.rs", "fn a() {}\nfn b() {}\nfn c() {}");
        for _ in 0..5 {
            h.keys("dd").unwrap();
            assert!(h.session.buffer().line_count() >= 1);
        }
        assert_eq!(h.lines(), [""]);
        assert_eq!(h.session.clipboard(), Some(""));
        assert_eq!((h.row(), h.column()), (0, 0));
    }

    #[test]
    fn test_dd_on_last_line_moves_up() {
        let mut h = Harness::open("/p/a.txt", "one\ntwo\nthree");
        h.keys("G$dd").unwrap();
        assert_eq!(h.lines(), ["one", "two"]);
        assert_eq!((h.row(), h.column()), (1, 3));
    }

    #[test]
    fn test_chord_timeout() {
        let mut h = Harness::open("/p/a.txt", "a\nb");
        h.keys("d").unwrap();
        h.clock.advance(Duration::from_millis(600));
        h.keys("d").unwrap();
        assert_eq!(h.lines(), ["a", "b"]);
        // The late `d` armed a new chord.
        h.keys("d").unwrap();
        assert_eq!(h.lines(), ["b"]);
    }

    #[test]
    fn test_broken_chord_runs_second_key() {
        let mut h = Harness::open("/p/a.txt", "a\nb\nc");
        h.keys("dj").unwrap();
        assert_eq!(h.row(), 1);
        assert_eq!(h.lines(), ["a", "b", "c"]);
        // A different leader starts its own chord.
        h.keys("dgg").unwrap();
        assert_eq!(h.row(), 0);
        h.keys("y<Down>").unwrap();
        assert_eq!(h.row(), 1);
        assert_eq!(h.session.clipboard(), None);
    }

    #[test]
    fn test_selection_follows_motions_only() {
        let mut h = Harness::open("/p/a.txt", "alpha\nbeta");
        h.keys("lvjl").unwrap();
        let selection = *h.session.selection().unwrap();
        assert_eq!(selection.anchor, Position::new(0, 1));
        assert_eq!(selection.active, Position::new(1, 2));
        h.keys("x").unwrap();
        assert_eq!(h.session.selection().unwrap().active, Position::new(1, 2));
    }

    #[test]
    fn test_apply_theme_rerenders() {
        let mut h = Harness::open("/p/a.rs", "fn main() {}\n");
        let before: Vec<String> = h.session.buffer().markup().map(str::to_string).collect();
        h.keys("i").unwrap();

        let midnight = ThemeSet::by_name("midnight", None);
        h.session.apply_theme(&midnight, &mut h.surface).unwrap();
        let after: Vec<&str> = h.session.buffer().markup().collect();
        assert_ne!(after[0], before[0]);
        assert_eq!(after[1], EMPTY_LINE_MARKUP);
        assert_eq!(h.surface.lines(), after.as_slice());
        assert_eq!(
            h.session.cursor().style(),
            &midnight.cursor_styles().insert
        );
    }

    #[test]
    fn test_apply_theme_without_language_is_refused() {
        let mut h = Harness::open("/p/a.py", "x = 1");
        let before: Vec<String> = h.session.buffer().markup().map(str::to_string).collect();
        let mut partial = ThemeSet::default();
        partial.remove_language("python");

        let err = h.session.apply_theme(&partial, &mut h.surface).unwrap_err();
        assert!(matches!(err, EditorError::ThemeUnavailable { .. }));
        let after: Vec<String> = h.session.buffer().markup().map(str::to_string).collect();
        assert_eq!(after, before);
    }

    #[test]
    fn test_wq_with_failing_save_does_not_close() {
        let mut h = Harness::open("/p/a.txt", "text");
        h.files.fail_save = true;
        let err = h.keys(":wq<CR>").unwrap_err();
        assert!(matches!(
            err,
            EditorError::CollaboratorFailure { operation: "save", .. }
        ));
        assert_eq!(h.session.mode(), Mode::Command);
        assert!(!h.session.is_closed());
        assert!(h.files.deleted_caches.is_empty());
        assert_eq!(h.lines(), ["text"]);
    }

    #[test]
    fn test_wq_saves_then_closes() {
        let mut h = Harness::open("/p/a.txt", "text");
        h.keys("ix<Esc>").unwrap();
        assert!(h.session.buffer().is_modified());
        assert_eq!(h.keys(":wq<CR>").unwrap(), Outcome::Closed);
        assert_eq!(h.files.saved, [(PathBuf::from("/p/a.txt"), "xtext".to_string())]);
        assert_eq!(h.files.deleted_caches, [PathBuf::from("/p/a.txt")]);
        assert!(h.session.is_closed());
        assert!(!h.session.buffer().is_modified());

        // A closed session ignores input.
        assert_eq!(h.keys("dd").unwrap(), Outcome::Closed);
        assert_eq!(h.lines(), ["xtext"]);
    }

    #[test]
    fn test_write_returns_to_normal() {
        let mut h = Harness::open("/p/a.txt", "text");
        assert_eq!(h.keys(":w<CR>").unwrap(), Outcome::Continue);
        assert_eq!(h.session.mode(), Mode::Normal);
        assert_eq!(h.files.saved.len(), 1);
        assert_eq!(h.keys(":q<CR>").unwrap(), Outcome::Closed);
    }

    #[test]
    fn test_unrecognized_command() {
        let mut h = Harness::open("/p/a.txt", "text");
        h.keys(":frobnicate<CR>").unwrap();
        assert_eq!(h.session.mode(), Mode::CommandError);
        assert_eq!(h.session.command_line(), "");
        h.keys("x").unwrap();
        assert_eq!(h.session.mode(), Mode::CommandError);
        h.keys(":").unwrap();
        assert_eq!(h.session.mode(), Mode::Command);
        h.keys("<Esc>").unwrap();
        assert_eq!(h.session.mode(), Mode::Normal);
        assert!(h.files.saved.is_empty());
    }

    #[test]
    fn test_command_line_editing() {
        let mut h = Harness::open("/p/a.txt", "text");
        h.keys(":new<BS><BS><BS><BS>").unwrap();
        assert_eq!(h.session.command_line(), "");
        assert_eq!(h.session.mode(), Mode::Command);
        h.keys("wx<Esc>").unwrap();
        assert_eq!(h.session.command_line(), "");
        assert_eq!(h.session.mode(), Mode::Normal);
    }

    #[test]
    fn test_newfile_inserts_before_first_file() {
        let mut h = Harness::open("/p/src/lib.rs", "");
        h.with_src_tree();
        h.keys(":newfile util.rs<CR>").unwrap();
        assert_eq!(h.session.mode(), Mode::Normal);
        assert_eq!(h.files.created, [PathBuf::from("/p/src/util.rs")]);
        assert_eq!(h.tree_names(), ["src", "sub", "util.rs", "lib.rs", "README"]);
        assert_eq!(h.tree.entries()[2].depth, 1);
    }

    #[test]
    fn test_newfile_with_marker_appends() {
        let mut h = Harness::open("/p/src/lib.rs", "");
        h.with_src_tree();
        h.keys(":newfile notes.md .<CR>").unwrap();
        assert_eq!(h.tree_names(), ["src", "sub", "lib.rs", "README", "notes.md"]);
    }

    #[test]
    fn test_newfile_at_project_root() {
        let mut h = Harness::open("/p/README", "");
        h.keys(":newfile a.txt<CR>").unwrap();
        assert_eq!(h.tree_names(), ["a.txt"]);
        assert_eq!(h.tree.entries()[0].depth, 0);
    }

    #[test]
    fn test_newdir_inserts_first() {
        let mut h = Harness::open("/p/src/lib.rs", "");
        h.with_src_tree();
        h.keys(":newdir build<CR>").unwrap();
        assert_eq!(h.tree_names()[0], "build");
        assert!(h.tree.entries()[0].is_dir());
    }

    #[test]
    fn test_invalid_name_makes_no_call() {
        let mut h = Harness::open("/p/src/lib.rs", "");
        h.with_src_tree();
        assert_eq!(h.keys(":newfile what?.rs<CR>").unwrap(), Outcome::Continue);
        assert!(h.files.created.is_empty());
        assert_eq!(h.session.mode(), Mode::Normal);
        assert_eq!(h.tree.entries().len(), 4);
    }

    #[test]
    fn test_ctrl_s_saves_in_insert_mode() {
        let mut h = Harness::open("/p/a.txt", "");
        h.keys("ihi<C-s>").unwrap();
        assert_eq!(h.session.mode(), Mode::Insert);
        assert_eq!(h.files.saved, [(PathBuf::from("/p/a.txt"), "hi".to_string())]);
        assert!(!h.session.buffer().is_modified());
    }

    #[test]
    fn test_surface_mirrors_buffer() {
        let mut h = Harness::open("/p/a.js", "const a = 1;\n\nfunction f(x) {\n  return x;\n}");
        h.keys("jjo  let y = 2;<CR>y++;<Esc>kddggOimport x;<Esc>jA // end<BS><BS>ok<Esc>Gyyp")
            .unwrap();
        let markup: Vec<&str> = h.session.buffer().markup().collect();
        assert_eq!(h.surface.lines(), markup.as_slice());
        assert_eq!(
            h.surface.gutter(),
            render_line_numbers(h.session.buffer().line_count())
        );
    }

    #[test]
    fn test_mode_changes_restyle_cursor() {
        let mut h = Harness::open("/p/a.txt", "abc");
        let styles = h.theme.cursor_styles().clone();
        h.keys("i").unwrap();
        assert_eq!(h.session.cursor().style(), &styles.insert);
        assert_eq!(h.surface.cursor_style(), Some(&styles.insert));
        assert!(h
            .surface
            .calls()
            .contains(&SurfaceCall::ShowMode(Mode::Insert, String::new())));
        h.keys("<Esc>:").unwrap();
        assert_eq!(h.session.cursor().style(), &styles.command);
    }

    #[test]
    fn test_scroll_is_deferred_until_settled() {
        let text: Vec<String> = (0..100).map(|i| format!("line {}", i)).collect();
        let mut h = Harness::open("/p/long.txt", &text.join("\n"));
        let mut scrolled = false;
        for _ in 0..40 {
            h.keys("j").unwrap();
            let calls = h.surface.take_calls();
            if calls.iter().any(|c| matches!(c, SurfaceCall::ScrollTo(_))) {
                scrolled = true;
                assert!(h.session.settle_scroll(&mut h.surface));
                let row = h.row();
                assert!(h
                    .session
                    .viewport()
                    .is_row_visible(row, h.session.cursor().cell()));
            }
        }
        assert!(scrolled);
        assert_eq!(h.row(), 40);
        assert!(!h.session.settle_scroll(&mut h.surface));
    }

    #[test]
    fn test_flush_cache() {
        let mut h = Harness::open("/p/a.txt", "one");
        h.keys("A!<Esc>").unwrap();
        h.session.flush_cache(&mut h.files).unwrap();
        assert_eq!(h.files.cache[&PathBuf::from("/p/a.txt")], ["one!"]);
    }

    #[test]
    fn test_first_file_index() {
        let entry = |name: &str, depth, kind| {
            TreeEntry::new(name, depth, kind, PathBuf::from(format!("/p/{}", name)))
        };
        let entries = vec![
            entry("src", 0, EntryKind::Dir),
            entry("sub", 1, EntryKind::Dir),
            entry("lib.rs", 1, EntryKind::File),
        ];
        assert_eq!(first_file_index(&entries, Some(0)), 2);
        assert_eq!(first_file_index(&entries, Some(2)), 3);
        assert_eq!(first_file_index(&entries, None), 2);
        assert_eq!(first_file_index(&[], None), 0);
    }
}
