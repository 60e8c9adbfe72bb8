use super::FileSystem;
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

#[derive(Debug, Clone)]
enum MockEntry {
    File(String),
    Directory,
}

/// In-memory workspace for tests. Relative paths are resolved against the root.
pub struct MockFileSystem {
    entries: RwLock<HashMap<PathBuf, MockEntry>>,
    root: PathBuf,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::with_root(PathBuf::from("/mock"))
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) {
        let path = self.normalize_path(path.as_ref());
        let mut entries = self.entries.write().unwrap();

        if let Some(parent) = path.parent() {
            Self::ensure_parents(&mut entries, parent);
        }

        entries.insert(path, MockEntry::File(content.to_string()));
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        let mut entries = self.entries.write().unwrap();
        Self::ensure_parents(&mut entries, &path);
    }

    fn normalize_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn ensure_parents(entries: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            entries
                .entry(current.clone())
                .or_insert(MockEntry::Directory);
        }
    }

    fn entry(&self, path: &Path) -> Option<MockEntry> {
        let path = self.normalize_path(path);
        self.entries.read().unwrap().get(&path).cloned()
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.entry(path).is_some()
    }

    fn is_file(&self, path: &Path) -> bool {
        matches!(self.entry(path), Some(MockEntry::File(_)))
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.entry(path), Some(MockEntry::Directory))
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        match self.entry(path) {
            Some(MockEntry::File(content)) => Ok(content),
            Some(MockEntry::Directory) => Err(anyhow!("Not a file: {}", path.display())),
            None => Err(anyhow!("File not found: {}", path.display())),
        }
    }
}
