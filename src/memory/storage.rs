//! Durable key-value substrate for the memory store
//!
//! The store persists one serialized snapshot under one fixed key, the way
//! the original browser build used local storage. The substrate is a trait so
//! each test can bind a store to its own isolated backing directory.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// A durable string-keyed, string-valued substrate.
///
/// Implementations must make `store` a whole-value overwrite: a reader sees
/// either the previous value or the new one, never a partial write.
pub trait StorageBackend: Send + Sync {
    /// Read the value under `key`, if any
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value under `key`
    fn store(&self, key: &str, value: &str) -> Result<()>;
}

/// File-backed substrate: one `<key>.json` file per key under a directory.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a substrate rooted at `dir`, creating the directory if needed
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .map_err(|e| Error::Storage(format!("create {}: {}", dir.display(), e)))?;
        Ok(Self { dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StorageBackend for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Storage(format!("read {}: {}", path.display(), e))),
        }
    }

    fn store(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key);
        write_atomic(&path, value)
            .map_err(|e| Error::Storage(format!("write {}: {}", path.display(), e)))
    }
}

/// Write via a sibling temp file and rename, so readers never observe a
/// truncated value.
fn write_atomic(path: &Path, value: &str) -> std::io::Result<()> {
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, value)?;
    std::fs::rename(&tmp, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_key() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();
        assert!(storage.load("absent").unwrap().is_none());
    }

    #[test]
    fn test_store_and_load() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();

        storage.store("memory", "{\"messages\":[]}").unwrap();
        let value = storage.load("memory").unwrap();
        assert_eq!(value.as_deref(), Some("{\"messages\":[]}"));
    }

    #[test]
    fn test_store_overwrites() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();

        storage.store("memory", "first").unwrap();
        storage.store("memory", "second").unwrap();
        assert_eq!(storage.load("memory").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_new_creates_nested_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let storage = FileStorage::new(&nested).unwrap();
        storage.store("memory", "x").unwrap();
        assert!(nested.join("memory.json").exists());
    }

    #[test]
    fn test_store_to_unwritable_dir_fails() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();
        // Remove the backing directory out from under the substrate
        drop(dir);
        let result = storage.store("memory", "x");
        assert!(result.is_err());
    }
}
