//! Local-disk file service for linepad.
//!
//! Reads text files into rendered lines, keeps an edit-session cache per
//! path and creates files and directories for the project tree.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};

use linepad_buffer::{normalize_whitespace, Buffer};
use linepad_editor::{EntryKind, FileContent, FileService, TreeEntry};
use linepad_highlight::{detect_language, Language};
use linepad_theme::ThemeStore;

/// Extensions never opened as text.
pub const NON_TEXT_EXTENSIONS: [&str; 11] = [
    "jpg", "jpeg", "png", "gif", "mp4", "mov", "avi", "mp3", "pdf", "bmp", "tiff",
];

#[derive(Debug, Clone)]
struct CachedFile {
    lines: Vec<String>,
    markup: Vec<String>,
    language: Language,
}

/// [`FileService`] over the local file system.
#[derive(Debug, Default)]
pub struct LocalFileService {
    cache: HashMap<PathBuf, CachedFile>,
}

impl LocalFileService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_cached(&self, path: &Path) -> bool {
        self.cache.contains_key(path)
    }
}

/// Whether the extension marks a binary format.
pub fn has_non_text_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| NON_TEXT_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Read a file that must be UTF-8 text.
pub fn read_text(path: &Path) -> Result<String> {
    if has_non_text_extension(path) {
        bail!("{} is not a text file", path.display());
    }
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    String::from_utf8(bytes).map_err(|_| anyhow!("{} is not valid UTF-8 text", path.display()))
}

impl FileService for LocalFileService {
    fn read_file(&mut self, path: &Path, theme: &dyn ThemeStore) -> Result<FileContent> {
        if let Some(cached) = self.cache.get(path) {
            log::debug!("Serving {} from cache", path.display());
            return Ok(FileContent {
                lines: cached.lines.clone(),
                markup: cached.markup.clone(),
                language: cached.language,
            });
        }

        let text = read_text(path)?;
        let language = detect_language(path);
        let buffer = Buffer::from_text(&text, language, theme);
        let cached = CachedFile {
            lines: buffer.lines().map(str::to_string).collect(),
            markup: buffer.markup().map(str::to_string).collect(),
            language,
        };
        log::debug!(
            "Read {} ({} lines, {})",
            path.display(),
            cached.lines.len(),
            language
        );

        let content = FileContent {
            lines: cached.lines.clone(),
            markup: cached.markup.clone(),
            language,
        };
        self.cache.insert(path.to_path_buf(), cached);
        Ok(content)
    }

    fn save_file(&mut self, path: &Path, text: &str) -> Result<()> {
        fs::write(path, normalize_whitespace(text))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Wrote {}", path.display());
        Ok(())
    }

    fn create_file(&mut self, dir: &Path, name: &str, depth: usize) -> Result<TreeEntry> {
        let path = dir.join(name);
        fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .with_context(|| format!("Failed to create file {}", path.display()))?;
        Ok(TreeEntry::new(name, depth, EntryKind::File, path))
    }

    fn create_dir(&mut self, dir: &Path, name: &str, depth: usize) -> Result<TreeEntry> {
        let path = dir.join(name);
        fs::create_dir(&path)
            .with_context(|| format!("Failed to create directory {}", path.display()))?;
        Ok(TreeEntry::new(name, depth, EntryKind::Dir, path))
    }

    fn delete_cache(&mut self, path: &Path) -> Result<()> {
        if self.cache.remove(path).is_none() {
            log::debug!("No cache to drop for {}", path.display());
        }
        Ok(())
    }

    fn update_cache(&mut self, path: &Path, lines: &[String], markup: &[String]) -> Result<()> {
        let Some(cached) = self.cache.get_mut(path) else {
            bail!("{} has no edit cache", path.display());
        };
        cached.lines = lines.to_vec();
        cached.markup = markup.to_vec();
        Ok(())
    }

    fn read_folder(&self, path: &Path, depth: usize) -> Result<Vec<TreeEntry>> {
        let mut dirs = Vec::new();
        let mut files = Vec::new();

        let items =
            fs::read_dir(path).with_context(|| format!("Failed to read {}", path.display()))?;
        for item in items {
            let item = item.with_context(|| format!("Failed to read {}", path.display()))?;
            let file_type = item.file_type()?;
            let name = item.file_name().to_string_lossy().to_string();
            if file_type.is_dir() {
                dirs.push(TreeEntry::new(name, depth, EntryKind::Dir, item.path()));
            } else if file_type.is_file() {
                files.push(TreeEntry::new(name, depth, EntryKind::File, item.path()));
            }
        }

        dirs.sort_by(|a, b| a.name.cmp(&b.name));
        files.sort_by(|a, b| a.name.cmp(&b.name));
        dirs.append(&mut files);
        Ok(dirs)
    }
}
