//! Directory-backed storage.
//!
//! Each key maps to `<dir>/<key>.json`. Writes go to a sibling temp file
//! which is then renamed over the target, so a crash mid-write leaves the
//! previous value intact.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{KeyValueStorage, StorageError};

/// Storage that keeps one file per key inside a directory.
///
/// The directory is created on first write.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a storage rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The root directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidKey` unless the key is non-empty ASCII
    /// alphanumerics, `-` or `_`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn io_error(key: &str, source: std::io::Error) -> StorageError {
    StorageError::Io {
        key: key.to_string(),
        source,
    }
}

impl KeyValueStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key, e)),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| io_error(key, e))?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| io_error(key, e))?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(io_error(key, e));
        }

        tracing::debug!(key, bytes = value.len(), path = %path.display(), "Wrote storage key");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_dir_reads_as_absent() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(tmp.path().join("not-created-yet"));
        assert_eq!(storage.read("cart").unwrap(), None);
    }

    #[test]
    fn test_write_creates_dir_and_file() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(tmp.path().join("nested"));

        storage.write("cart", "[]").unwrap();

        let on_disk = fs::read_to_string(tmp.path().join("nested/cart.json")).unwrap();
        assert_eq!(on_disk, "[]");
        assert_eq!(storage.read("cart").unwrap().as_deref(), Some("[]"));
        assert!(!tmp.path().join("nested/cart.json.tmp").exists());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let storage = FileStorage::new("/tmp/unused");
        for key in ["", "../escape", "a/b", "with space", "dot.json"] {
            assert!(
                matches!(storage.read(key), Err(StorageError::InvalidKey(_))),
                "{key}"
            );
        }
        assert!(storage.path_for("fashionForwardCart").is_ok());
    }

    #[test]
    fn test_unreadable_path_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        // A directory where the file should be cannot be read as a string
        fs::create_dir_all(tmp.path().join("cart.json")).unwrap();
        let storage = FileStorage::new(tmp.path());
        assert!(matches!(storage.read("cart"), Err(StorageError::Io { .. })));
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let tmp = tempfile::tempdir().unwrap();
        // A non-empty directory in place of the target makes the rename fail
        fs::create_dir_all(tmp.path().join("cart.json/occupied")).unwrap();
        let storage = FileStorage::new(tmp.path());

        assert!(matches!(
            storage.write("cart", "[]"),
            Err(StorageError::Io { .. })
        ));
        assert!(!tmp.path().join("cart.json.tmp").exists());
    }
}
