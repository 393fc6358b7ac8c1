//! In-memory project tree.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::services::{ProjectTree, TreeEntry};

/// Flat, depth-annotated list of visible entries, as a sidebar shows it.
///
/// The children of an open directory follow it directly, one level deeper.
#[derive(Debug, Clone, Default)]
pub struct ProjectTreeState {
    root: PathBuf,
    current_dir: PathBuf,
    entries: Vec<TreeEntry>,
}

impl ProjectTreeState {
    pub fn new(root: impl Into<PathBuf>, entries: Vec<TreeEntry>) -> Self {
        let root = root.into();
        Self {
            current_dir: root.clone(),
            root,
            entries,
        }
    }

    pub fn set_current_dir(&mut self, dir: impl Into<PathBuf>) {
        self.current_dir = dir.into();
    }

    /// Index of the entry with this path.
    pub fn position(&self, path: &Path) -> Option<usize> {
        self.entries.iter().position(|e| e.full_path == path)
    }

    /// Show `children` under the directory at `index`.
    pub fn open_dir(&mut self, index: usize, children: Vec<TreeEntry>) -> Result<()> {
        let Some(dir) = self.entries.get_mut(index) else {
            bail!("no tree entry at {}", index);
        };
        if !dir.is_dir() {
            bail!("{} is not a directory", dir.full_path.display());
        }
        if dir.is_open {
            return Ok(());
        }
        dir.is_open = true;
        self.entries.splice(index + 1..index + 1, children);
        Ok(())
    }

    /// Hide everything below the directory at `index`.
    pub fn close_dir(&mut self, index: usize) -> Result<()> {
        let Some(dir) = self.entries.get_mut(index) else {
            bail!("no tree entry at {}", index);
        };
        dir.is_open = false;
        let depth = dir.depth;
        let end = self.entries[index + 1..]
            .iter()
            .position(|e| e.depth <= depth)
            .map_or(self.entries.len(), |offset| index + 1 + offset);
        self.entries.drain(index + 1..end);
        Ok(())
    }
}

impl ProjectTree for ProjectTreeState {
    fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    fn project_root(&self) -> &Path {
        &self.root
    }

    fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    fn insert_entry(&mut self, entry: TreeEntry, index: Option<usize>) -> Result<()> {
        if self.position(&entry.full_path).is_some() {
            log::debug!("{} is already in the tree", entry.full_path.display());
            return Ok(());
        }
        match index {
            Some(index) if index > self.entries.len() => {
                bail!("tree index {} out of range ({} entries)", index, self.entries.len())
            }
            Some(index) => self.entries.insert(index, entry),
            None => self.entries.push(entry),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::EntryKind;

    fn dir(name: &str, depth: usize) -> TreeEntry {
        TreeEntry::new(name, depth, EntryKind::Dir, PathBuf::from(format!("/p/{}", name)))
    }

    fn file(name: &str, depth: usize) -> TreeEntry {
        TreeEntry::new(name, depth, EntryKind::File, PathBuf::from(format!("/p/{}", name)))
    }

    fn names(tree: &ProjectTreeState) -> Vec<&str> {
        tree.entries().iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_open_and_close_dir() {
        let mut tree = ProjectTreeState::new("/p", vec![dir("src", 0), file("README", 0)]);
        tree.open_dir(0, vec![dir("src/a", 1), file("src/lib.rs", 1)]).unwrap();
        assert!(tree.entries()[0].is_open);
        tree.open_dir(1, vec![file("src/a/x.rs", 2)]).unwrap();
        assert_eq!(
            names(&tree),
            ["src", "src/a", "src/a/x.rs", "src/lib.rs", "README"]
        );

        tree.close_dir(0).unwrap();
        assert_eq!(names(&tree), ["src", "README"]);
        assert!(!tree.entries()[0].is_open);
    }

    #[test]
    fn test_open_rejects_files_and_bad_indexes() {
        let mut tree = ProjectTreeState::new("/p", vec![file("a", 0)]);
        assert!(tree.open_dir(0, vec![]).is_err());
        assert!(tree.open_dir(5, vec![]).is_err());
        assert!(tree.close_dir(5).is_err());
    }

    #[test]
    fn test_insert_entry() {
        let mut tree = ProjectTreeState::new("/p", vec![file("a", 0)]);
        tree.insert_entry(file("b", 0), None).unwrap();
        tree.insert_entry(file("c", 0), Some(0)).unwrap();
        assert_eq!(names(&tree), ["c", "a", "b"]);

        // Same path twice is ignored.
        tree.insert_entry(file("a", 0), Some(0)).unwrap();
        assert_eq!(tree.entries().len(), 3);

        assert!(tree.insert_entry(file("d", 0), Some(9)).is_err());
    }

    #[test]
    fn test_current_dir() {
        let mut tree = ProjectTreeState::new("/p", vec![]);
        assert_eq!(tree.current_dir(), Path::new("/p"));
        tree.set_current_dir("/p/src");
        assert_eq!(tree.current_dir(), Path::new("/p/src"));
        assert_eq!(tree.project_root(), Path::new("/p"));
    }
}
