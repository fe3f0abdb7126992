// src/fs/mock.rs

use super::{EntryKind, FileSystem};
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub enum MockEntry {
    File(Vec<u8>),
    Dir(Vec<String>), // List of child names
    Symlink(PathBuf),
    Device,
    /// Stat fails with a permission error.
    Unreadable,
    /// Stats as a directory, but listing it fails.
    LockedDir,
    /// Opens fine, yields `prefix`, then fails mid-read.
    BrokenFile(Vec<u8>),
}

#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    files: Arc<Mutex<HashMap<PathBuf, MockEntry>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        let mut files = HashMap::new();
        // Ensure root exists
        files.insert(PathBuf::from("."), MockEntry::Dir(Vec::new()));

        Self {
            files: Arc::new(Mutex::new(files)),
        }
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        self.insert(path.as_ref(), MockEntry::File(content.into()));
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut files = self.files.lock().unwrap();
        Self::ensure_dir_entry(&mut files, path.as_ref());
    }

    pub fn add_symlink(&self, path: impl AsRef<Path>, target: impl Into<PathBuf>) {
        self.insert(path.as_ref(), MockEntry::Symlink(target.into()));
    }

    pub fn add_device(&self, path: impl AsRef<Path>) {
        self.insert(path.as_ref(), MockEntry::Device);
    }

    pub fn add_unreadable(&self, path: impl AsRef<Path>) {
        self.insert(path.as_ref(), MockEntry::Unreadable);
    }

    pub fn add_locked_dir(&self, path: impl AsRef<Path>) {
        self.insert(path.as_ref(), MockEntry::LockedDir);
    }

    pub fn add_broken_file(&self, path: impl AsRef<Path>, prefix: impl Into<Vec<u8>>) {
        self.insert(path.as_ref(), MockEntry::BrokenFile(prefix.into()));
    }

    /// Remove an entry (and, for directories, nothing else: children become
    /// unreachable because the parent no longer lists them).
    pub fn remove(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let mut files = self.files.lock().unwrap();
        files.remove(path);
        let parent = parent_of(path);
        if let (Some(MockEntry::Dir(children)), Some(name)) =
            (files.get_mut(parent), path.file_name().and_then(|n| n.to_str()))
        {
            children.retain(|c| c != name);
        }
    }

    fn insert(&self, path: &Path, entry: MockEntry) {
        let mut files = self.files.lock().unwrap();
        files.insert(path.to_path_buf(), entry);

        // Ensure parent directories exist implicitly for simplicity in this mock
        let parent = parent_of(path);
        Self::ensure_dir_entry(&mut files, parent);
        Self::link_child(&mut files, parent, path);
    }

    fn ensure_dir_entry(files: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
        if files.contains_key(path) {
            return;
        }
        files.insert(path.to_path_buf(), MockEntry::Dir(Vec::new()));
        let parent = parent_of(path);
        if parent != path {
            // Avoid infinite loop at root
            Self::ensure_dir_entry(files, parent);
            Self::link_child(files, parent, path);
        }
    }

    fn link_child(files: &mut HashMap<PathBuf, MockEntry>, parent: &Path, path: &Path) {
        if let Some(MockEntry::Dir(children)) = files.get_mut(parent) {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if !children.iter().any(|c| c == name) {
                    children.push(name.to_string());
                }
            }
        }
    }
}

fn parent_of(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

/// Reader that yields its buffer and then reports an I/O error instead of EOF.
struct BrokenReader {
    inner: Cursor<Vec<u8>>,
}

impl Read for BrokenReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n == 0 {
            return Err(io::Error::other("simulated read failure"));
        }
        Ok(n)
    }
}

impl FileSystem for MockFileSystem {
    fn entry_kind(&self, path: &Path) -> Result<EntryKind> {
        let files = self.files.lock().unwrap();
        match files.get(path) {
            Some(MockEntry::File(_)) | Some(MockEntry::BrokenFile(_)) => Ok(EntryKind::File),
            Some(MockEntry::Dir(_)) | Some(MockEntry::LockedDir) => Ok(EntryKind::Dir),
            Some(MockEntry::Symlink(_)) => Ok(EntryKind::Symlink),
            Some(MockEntry::Device) => Ok(EntryKind::Other),
            Some(MockEntry::Unreadable) => Err(anyhow!("Permission denied: {:?}", path)),
            None => Err(anyhow!("File not found: {:?}", path)),
        }
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let files = self.files.lock().unwrap();
        match files.get(path) {
            Some(MockEntry::Dir(children)) => {
                Ok(children.iter().map(|name| path.join(name)).collect())
            }
            Some(MockEntry::LockedDir) => Err(anyhow!("Permission denied: {:?}", path)),
            _ => Err(anyhow!("Not a directory or not found: {:?}", path)),
        }
    }

    fn open_read(&self, path: &Path) -> Result<Box<dyn Read + Send>> {
        let files = self.files.lock().unwrap();
        match files.get(path) {
            Some(MockEntry::File(content)) => Ok(Box::new(Cursor::new(content.clone()))),
            Some(MockEntry::BrokenFile(prefix)) => Ok(Box::new(BrokenReader {
                inner: Cursor::new(prefix.clone()),
            })),
            Some(MockEntry::Dir(_)) | Some(MockEntry::LockedDir) => {
                Err(anyhow!("Is a directory: {:?}", path))
            }
            Some(MockEntry::Unreadable) => Err(anyhow!("Permission denied: {:?}", path)),
            Some(MockEntry::Symlink(_)) | Some(MockEntry::Device) => {
                Err(anyhow!("Not a regular file: {:?}", path))
            }
            None => Err(anyhow!("File not found: {:?}", path)),
        }
    }
}
