//! File system collaborator.
//!
//! Every transformation that touches disk goes through the [`Storage`] trait so
//! that the merge, translation, preview and asset logic can be exercised
//! against [`MemoryStorage`] without creating real files.

use anyhow::{anyhow, Context, Result};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Minimal set of file system operations needed by the workspace tooling.
pub trait Storage {
    /// Whether anything (file or directory) exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Read a UTF-8 file.
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Create or overwrite a file. The parent directory must exist.
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;

    /// Create a directory and all missing parents.
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Names of the direct children of `dir`, sorted.
    fn list_dir(&self, dir: &Path) -> Result<Vec<String>>;

    /// Copy a single file, overwriting the destination.
    fn copy_file(&self, from: &Path, to: &Path) -> Result<()>;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> Result<()>;

    /// Remove a directory tree. Succeeds when nothing exists at `path`.
    fn remove_dir_all(&self, path: &Path) -> Result<()>;
}

/// [`Storage`] backed by the real file system.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStorage;

impl Storage for FsStorage {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        trace!("Writing {} bytes to {:?}", contents.len(), path);
        fs::write(path, contents).with_context(|| format!("Failed to write file: {:?}", path))
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {:?}", path))
    }

    fn list_dir(&self, dir: &Path) -> Result<Vec<String>> {
        let entries =
            fs::read_dir(dir).with_context(|| format!("Failed to read directory: {:?}", dir))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.with_context(|| format!("Failed to read entry in {:?}", dir))?;
            names.push(entry.file_name().to_string_lossy().to_string());
        }
        names.sort();
        Ok(names)
    }

    fn copy_file(&self, from: &Path, to: &Path) -> Result<()> {
        fs::copy(from, to)
            .with_context(|| format!("Failed to copy {:?} to {:?}", from, to))?;
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).with_context(|| format!("Failed to remove file: {:?}", path))
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }
        debug!("Removing directory tree: {:?}", path);
        fs::remove_dir_all(path)
            .with_context(|| format!("Failed to remove directory: {:?}", path))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    File(Vec<u8>),
    Dir,
}

/// In-memory [`Storage`] used by tests.
///
/// Paths are stored exactly as given, so callers should build them from a
/// common root with [`Path::join`].
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<BTreeMap<PathBuf, Entry>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating its parent directories.
    pub fn with_file(self, path: impl AsRef<Path>, contents: &str) -> Self {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.insert_dirs(parent);
        }
        self.entries
            .borrow_mut()
            .insert(path.to_path_buf(), Entry::File(contents.as_bytes().to_vec()));
        self
    }

    /// Seed an empty directory.
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        self.insert_dirs(path.as_ref());
        self
    }

    /// Every file path currently stored, sorted.
    pub fn files(&self) -> Vec<PathBuf> {
        self.entries
            .borrow()
            .iter()
            .filter(|(_, entry)| matches!(entry, Entry::File(_)))
            .map(|(path, _)| path.clone())
            .collect()
    }

    fn insert_dirs(&self, path: &Path) {
        let mut entries = self.entries.borrow_mut();
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            entries.entry(ancestor.to_path_buf()).or_insert(Entry::Dir);
        }
    }

    fn parent_is_dir(&self, path: &Path) -> bool {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => self.is_dir(parent),
            _ => true,
        }
    }
}

impl Storage for MemoryStorage {
    fn exists(&self, path: &Path) -> bool {
        self.entries.borrow().contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.entries.borrow().get(path), Some(Entry::Dir))
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        match self.entries.borrow().get(path) {
            Some(Entry::File(bytes)) => String::from_utf8(bytes.clone())
                .with_context(|| format!("File is not valid UTF-8: {:?}", path)),
            Some(Entry::Dir) => Err(anyhow!("Is a directory: {:?}", path)),
            None => Err(anyhow!("Failed to read file: {:?} (not found)", path)),
        }
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if !self.parent_is_dir(path) {
            return Err(anyhow!("Failed to write file: {:?} (missing parent)", path));
        }
        if self.is_dir(path) {
            return Err(anyhow!("Failed to write file: {:?} (is a directory)", path));
        }
        self.entries
            .borrow_mut()
            .insert(path.to_path_buf(), Entry::File(contents.to_vec()));
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        if matches!(self.entries.borrow().get(path), Some(Entry::File(_))) {
            return Err(anyhow!("Failed to create directory: {:?} (is a file)", path));
        }
        self.insert_dirs(path);
        Ok(())
    }

    fn list_dir(&self, dir: &Path) -> Result<Vec<String>> {
        if !self.is_dir(dir) {
            return Err(anyhow!("Failed to read directory: {:?}", dir));
        }
        Ok(self
            .entries
            .borrow()
            .keys()
            .filter(|path| path.parent() == Some(dir))
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().to_string())
            .collect())
    }

    fn copy_file(&self, from: &Path, to: &Path) -> Result<()> {
        let bytes = match self.entries.borrow().get(from) {
            Some(Entry::File(bytes)) => bytes.clone(),
            _ => return Err(anyhow!("Failed to copy {:?}: not a file", from)),
        };
        self.write(to, &bytes)
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        let mut entries = self.entries.borrow_mut();
        if !matches!(entries.get(path), Some(Entry::File(_))) {
            return Err(anyhow!("Failed to remove file: {:?}", path));
        }
        entries.remove(path);
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        self.entries
            .borrow_mut()
            .retain(|entry, _| !entry.starts_with(path));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_storage_lists_direct_children_only() {
        let storage = MemoryStorage::new()
            .with_file("root/a.txt", "a")
            .with_file("root/nested/b.txt", "b");

        let names = storage.list_dir(Path::new("root")).unwrap();
        assert_eq!(names, vec!["a.txt".to_string(), "nested".to_string()]);
    }

    #[test]
    fn test_memory_storage_write_requires_parent() {
        let storage = MemoryStorage::new();
        assert!(storage.write(Path::new("missing/file.txt"), b"x").is_err());

        storage.create_dir_all(Path::new("missing")).unwrap();
        storage.write(Path::new("missing/file.txt"), b"x").unwrap();
        assert_eq!(
            storage.read_to_string(Path::new("missing/file.txt")).unwrap(),
            "x"
        );
    }

    #[test]
    fn test_memory_storage_remove_dir_all_is_recursive() {
        let storage = MemoryStorage::new()
            .with_file("root/preview/a/b.txt", "b")
            .with_file("root/keep.txt", "k");

        storage.remove_dir_all(Path::new("root/preview")).unwrap();

        assert!(!storage.exists(Path::new("root/preview/a/b.txt")));
        assert!(!storage.exists(Path::new("root/preview")));
        assert!(storage.exists(Path::new("root/keep.txt")));
        // Removing something that is already gone is fine
        storage.remove_dir_all(Path::new("root/preview")).unwrap();
    }

    #[test]
    fn test_fs_storage_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FsStorage;
        let dir = temp_dir.path().join("nested");

        storage.create_dir_all(&dir).unwrap();
        storage.write(&dir.join("b.txt"), b"b").unwrap();
        storage.write(&dir.join("a.txt"), b"a").unwrap();

        assert_eq!(
            storage.list_dir(&dir).unwrap(),
            vec!["a.txt".to_string(), "b.txt".to_string()]
        );
        storage.remove_dir_all(&dir).unwrap();
        assert!(!storage.exists(&dir));
        storage.remove_dir_all(&dir).unwrap();
    }
}
