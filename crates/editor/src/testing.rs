//! In-memory collaborators and a session harness for unit tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Result};

use linepad_buffer::Buffer;
use linepad_highlight::detect_language;
use linepad_keyboard::parse_key_script;
use linepad_theme::{ThemeSet, ThemeStore};

use crate::chord::ManualClock;
use crate::core::{EditingSession, Outcome, SessionContext};
use crate::error::EditorError;
use crate::services::{
    EntryKind, FileContent, FileService, ProjectTree, RecordingSurface, TreeEntry,
};
use crate::settings::SessionSettings;
use crate::tree::ProjectTreeState;

/// File service backed by a map of path to text.
#[derive(Debug, Default)]
pub struct MemoryFiles {
    pub files: HashMap<PathBuf, String>,
    pub cache: HashMap<PathBuf, Vec<String>>,
    pub saved: Vec<(PathBuf, String)>,
    pub created: Vec<PathBuf>,
    pub deleted_caches: Vec<PathBuf>,
    pub fail_save: bool,
}

impl MemoryFiles {
    fn entry(&mut self, dir: &Path, name: &str, depth: usize, kind: EntryKind) -> TreeEntry {
        let path = dir.join(name);
        self.created.push(path.clone());
        TreeEntry::new(name, depth, kind, path)
    }
}

impl FileService for MemoryFiles {
    fn read_file(&mut self, path: &Path, theme: &dyn ThemeStore) -> Result<FileContent> {
        let text = self
            .files
            .get(path)
            .ok_or_else(|| anyhow!("{} not found", path.display()))?;
        let language = detect_language(path);
        let buffer = Buffer::from_text(text, language, theme);
        let lines: Vec<String> = buffer.lines().map(str::to_string).collect();
        self.cache.insert(path.to_path_buf(), lines.clone());
        Ok(FileContent {
            lines,
            markup: buffer.markup().map(str::to_string).collect(),
            language,
        })
    }

    fn save_file(&mut self, path: &Path, text: &str) -> Result<()> {
        if self.fail_save {
            bail!("disk full");
        }
        self.saved.push((path.to_path_buf(), text.to_string()));
        Ok(())
    }

    fn create_file(&mut self, dir: &Path, name: &str, depth: usize) -> Result<TreeEntry> {
        Ok(self.entry(dir, name, depth, EntryKind::File))
    }

    fn create_dir(&mut self, dir: &Path, name: &str, depth: usize) -> Result<TreeEntry> {
        Ok(self.entry(dir, name, depth, EntryKind::Dir))
    }

    fn delete_cache(&mut self, path: &Path) -> Result<()> {
        self.cache.remove(path);
        self.deleted_caches.push(path.to_path_buf());
        Ok(())
    }

    fn update_cache(&mut self, path: &Path, lines: &[String], _markup: &[String]) -> Result<()> {
        match self.cache.get_mut(path) {
            Some(cached) => {
                *cached = lines.to_vec();
                Ok(())
            }
            None => bail!("{} is not cached", path.display()),
        }
    }

    fn read_folder(&self, _path: &Path, _depth: usize) -> Result<Vec<TreeEntry>> {
        Ok(Vec::new())
    }
}

/// A session wired to in-memory collaborators.
pub struct Harness {
    pub files: MemoryFiles,
    pub tree: ProjectTreeState,
    pub theme: ThemeSet,
    pub surface: RecordingSurface,
    pub clock: ManualClock,
    pub session: EditingSession,
}

impl Harness {
    pub fn open(path: &str, text: &str) -> Self {
        Self::with_theme(path, text, ThemeSet::default())
    }

    /// Open with a theme that has no colors for any language.
    pub fn open_without_theme(path: &str, text: &str) -> Self {
        let mut theme = ThemeSet::default();
        for language in ["javascript", "typescript", "python", "rust", "plain"] {
            theme.remove_language(language);
        }
        Self::with_theme(path, text, theme)
    }

    fn with_theme(path: &str, text: &str, theme: ThemeSet) -> Self {
        let mut files = MemoryFiles::default();
        files.files.insert(PathBuf::from(path), text.to_string());
        let mut surface = RecordingSurface::new();
        let session = EditingSession::open(
            path,
            SessionSettings::default(),
            &mut files,
            &theme,
            &mut surface,
        )
        .unwrap();
        Self {
            files,
            tree: ProjectTreeState::new("/p", Vec::new()),
            theme,
            surface,
            clock: ManualClock::new(),
            session,
        }
    }

    /// Tree of `/p` with `src` open and current.
    pub fn with_src_tree(&mut self) {
        let entry = |name: &str, depth, kind, path: &str| {
            TreeEntry::new(name, depth, kind, PathBuf::from(path))
        };
        self.tree = ProjectTreeState::new(
            "/p",
            vec![
                entry("src", 0, EntryKind::Dir, "/p/src"),
                entry("sub", 1, EntryKind::Dir, "/p/src/sub"),
                entry("lib.rs", 1, EntryKind::File, "/p/src/lib.rs"),
                entry("README", 0, EntryKind::File, "/p/README"),
            ],
        );
        self.tree.set_current_dir("/p/src");
    }

    /// Feed a key script, stopping at the first error.
    pub fn keys(&mut self, script: &str) -> Result<Outcome, EditorError> {
        let mut outcome = Outcome::Continue;
        for input in parse_key_script(script) {
            let mut ctx = SessionContext {
                files: &mut self.files,
                tree: &mut self.tree,
                theme: &self.theme,
                surface: &mut self.surface,
                clock: &self.clock,
            };
            outcome = self.session.handle_key(input, &mut ctx)?;
        }
        Ok(outcome)
    }

    pub fn lines(&self) -> Vec<String> {
        self.session.buffer().lines().map(str::to_string).collect()
    }

    pub fn tree_names(&self) -> Vec<&str> {
        self.tree.entries().iter().map(|e| e.name.as_str()).collect()
    }

    pub fn row(&self) -> usize {
        self.session.cursor().row()
    }

    pub fn column(&self) -> usize {
        self.session.cursor().column()
    }
}
