//! Filesystem storage implementation.

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

use crate::storage::{Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Storage rooted at a local directory.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use mdsite_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new(PathBuf::from("docs"));
/// let source = storage.read_to_string("index.md")?;
/// ```
#[derive(Clone, Debug)]
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a relative path into the root.
    ///
    /// Rejects absolute paths and parent directory components (`..`) so no
    /// path can reach outside the root.
    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));

        if escapes {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(relative)
                .with_backend(BACKEND));
        }
        Ok(self.root.join(relative))
    }

    fn io_error(err: std::io::Error, path: PathBuf) -> StorageError {
        StorageError::io(err, Some(path)).with_backend(BACKEND)
    }
}

impl Storage for FsStorage {
    fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let full = self.resolve(path)?;
        fs::read(&full).map_err(|e| Self::io_error(e, full))
    }

    fn write(&self, path: &str, contents: &[u8]) -> Result<(), StorageError> {
        let full = self.resolve(path)?;
        tracing::debug!(path = %full.display(), bytes = contents.len(), "Writing file");
        fs::write(&full, contents).map_err(|e| Self::io_error(e, full))
    }

    fn create_dir_all(&self, path: &str) -> Result<(), StorageError> {
        let full = self.resolve(path)?;
        fs::create_dir_all(&full).map_err(|e| Self::io_error(e, full))
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_ok_and(|full| full.exists())
    }

    fn mtime(&self, path: &str) -> Result<SystemTime, StorageError> {
        let full = self.resolve(path)?;
        fs::metadata(&full)
            .and_then(|meta| meta.modified())
            .map_err(|e| Self::io_error(e, full))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_fs_storage_is_send_sync() {
        assert_send_sync::<FsStorage>();
    }

    fn create_test_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    #[test]
    fn test_read_write_round_trip() {
        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        storage.create_dir_all("a/b").unwrap();
        storage.write("a/b/page.html", b"<p>hi</p>").unwrap();

        assert!(storage.exists("a/b"));
        assert!(storage.exists("a/b/page.html"));
        assert_eq!(storage.read_to_string("a/b/page.html").unwrap(), "<p>hi</p>");
        assert!(storage.mtime("a/b/page.html").is_ok());
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        let err = storage.read("missing.md").unwrap_err();
        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.backend, Some("Fs"));
        assert!(!storage.exists("missing.md"));
    }

    #[test]
    fn test_write_without_parent_fails() {
        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        let err = storage.write("no/such/dir.html", b"x").unwrap_err();
        assert_eq!(err.kind, StorageErrorKind::NotFound);
    }

    #[test]
    fn test_rejects_escaping_paths() {
        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().join("root"));

        for path in ["../secret.md", "a/../../b.md", "/etc/passwd"] {
            let err = storage.read(path).unwrap_err();
            assert_eq!(err.kind, StorageErrorKind::InvalidPath, "path: {path}");
            assert!(!storage.exists(path));
        }
    }

    #[test]
    fn test_read_to_string_rejects_invalid_utf8() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("bin.dat"), [0xff, 0xfe]).unwrap();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        let err = storage.read_to_string("bin.dat").unwrap_err();
        assert_eq!(err.kind, StorageErrorKind::InvalidData);
        assert_eq!(storage.read("bin.dat").unwrap(), vec![0xff, 0xfe]);
    }
}
