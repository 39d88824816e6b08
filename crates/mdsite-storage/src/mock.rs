//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::storage::{Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

#[derive(Clone, Debug)]
struct MockFile {
    contents: Vec<u8>,
    mtime: SystemTime,
}

/// In-memory storage for tests.
///
/// Modification times come from a logical clock that advances by one second
/// on every write, so a file written later is always newer.
///
/// # Example
///
/// ```ignore
/// use mdsite_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new().with_file("index.md", "# Home");
/// let content = storage.read_to_string("index.md").unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    files: RwLock<BTreeMap<String, MockFile>>,
    dirs: RwLock<BTreeSet<String>>,
    clock: AtomicU64,
    writes: AtomicUsize,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file stamped with the next clock tick. Parent directories are implied.
    #[must_use]
    pub fn with_file(self, path: &str, contents: impl Into<Vec<u8>>) -> Self {
        let mtime = self.tick();
        self.insert(path, contents.into(), mtime);
        self
    }

    /// Add a file with an explicit modification time in seconds since the epoch.
    #[must_use]
    pub fn with_file_at(self, path: &str, contents: impl Into<Vec<u8>>, secs: u64) -> Self {
        self.clock.fetch_max(secs, Ordering::SeqCst);
        self.insert(path, contents.into(), UNIX_EPOCH + Duration::from_secs(secs));
        self
    }

    /// Contents of a file as text, if present.
    pub fn file(&self, path: &str) -> Option<String> {
        self.files
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .map(|file| String::from_utf8_lossy(&file.contents).into_owned())
    }

    /// Sorted paths of all stored files.
    pub fn paths(&self) -> Vec<String> {
        self.files
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// Number of [`Storage::write`] calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Directories created through [`Storage::create_dir_all`].
    pub fn created_dirs(&self) -> Vec<String> {
        self.dirs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    fn tick(&self) -> SystemTime {
        let secs = self.clock.fetch_add(1, Ordering::SeqCst) + 1;
        UNIX_EPOCH + Duration::from_secs(secs)
    }

    fn insert(&self, path: &str, contents: Vec<u8>, mtime: SystemTime) {
        self.files
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.to_owned(), MockFile { contents, mtime });
    }

    fn get(&self, path: &str) -> Result<MockFile, StorageError> {
        self.files
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))
    }

    fn is_implied_dir(&self, path: &str) -> bool {
        let prefix = format!("{}/", path.trim_end_matches('/'));
        self.files
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .any(|file| file.starts_with(&prefix))
    }
}

impl Storage for MockStorage {
    fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        self.get(path).map(|file| file.contents)
    }

    fn write(&self, path: &str, contents: &[u8]) -> Result<(), StorageError> {
        if let Some((parent, _)) = path.rsplit_once('/')
            && !self.exists(parent)
        {
            return Err(StorageError::new(StorageErrorKind::NotFound)
                .with_path(parent)
                .with_backend(BACKEND));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mtime = self.tick();
        self.insert(path, contents.to_vec(), mtime);
        Ok(())
    }

    fn create_dir_all(&self, path: &str) -> Result<(), StorageError> {
        let mut dirs = self.dirs.write().unwrap_or_else(PoisonError::into_inner);
        let mut current = String::new();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            if !current.is_empty() {
                current.push('/');
            }
            current.push_str(segment);
            dirs.insert(current.clone());
        }
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        path.is_empty()
            || self
                .files
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .contains_key(path)
            || self
                .dirs
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .contains(path)
            || self.is_implied_dir(path)
    }

    fn mtime(&self, path: &str) -> Result<SystemTime, StorageError> {
        self.get(path).map(|file| file.mtime)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_with_file_and_read() {
        let storage = MockStorage::new().with_file("docs/a.md", "# A");
        assert_eq!(storage.read_to_string("docs/a.md").unwrap(), "# A");
        assert!(storage.exists("docs"));
        assert!(!storage.exists("doc"));
    }

    #[test]
    fn test_write_requires_parent() {
        let storage = MockStorage::new();
        let err = storage.write("out/index.html", b"x").unwrap_err();
        assert_eq!(err.kind, StorageErrorKind::NotFound);

        storage.create_dir_all("out/sub").unwrap();
        storage.write("out/index.html", b"x").unwrap();
        assert_eq!(storage.write_count(), 1);
        assert_eq!(storage.created_dirs(), vec!["out".to_owned(), "out/sub".to_owned()]);
    }

    #[test]
    fn test_logical_clock_orders_writes() {
        let storage = MockStorage::new().with_file_at("a.md", "a", 100);
        storage.write("a.html", b"a").unwrap();
        assert!(storage.mtime("a.html").unwrap() > storage.mtime("a.md").unwrap());
    }
}
