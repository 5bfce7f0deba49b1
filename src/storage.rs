use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Fixed key under which the whole recipe collection is persisted. Single
/// tenant, single collection.
pub const STORAGE_KEY: &str = "recipe-keeper-recipes";

/// Key-value persistence capability the recipe store writes through to.
///
/// Reads return `None` when nothing has ever been written under the key;
/// writes replace the full payload.
pub trait StorageBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn write(&mut self, key: &str, payload: &str) -> Result<(), StoreError>;
}

/// File-backed storage: each key maps to `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileBackend { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Read(err)),
        }
    }

    fn write(&mut self, key: &str, payload: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent().filter(|p| *p != Path::new("")) {
            fs::create_dir_all(parent).map_err(StoreError::Write)?;
        }
        fs::write(path, payload).map_err(StoreError::Write)
    }
}

/// In-memory storage for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Peek at a stored payload without going through the trait.
    pub fn payload(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, payload: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), payload.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_round_trip() {
        let mut backend = MemoryBackend::new();
        assert!(backend.read(STORAGE_KEY).unwrap().is_none());

        backend.write(STORAGE_KEY, "[]").unwrap();
        assert_eq!(backend.read(STORAGE_KEY).unwrap().as_deref(), Some("[]"));

        backend.write(STORAGE_KEY, "[1]").unwrap();
        assert_eq!(backend.read(STORAGE_KEY).unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_file_backend_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path());
        assert!(backend.read(STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_file_backend_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = FileBackend::new(dir.path());

        backend.write(STORAGE_KEY, r#"[{"id":"1"}]"#).unwrap();
        assert_eq!(
            backend.read(STORAGE_KEY).unwrap().as_deref(),
            Some(r#"[{"id":"1"}]"#)
        );
    }

    #[test]
    fn test_file_backend_creates_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = FileBackend::new(dir.path().join("nested/data"));

        backend.write(STORAGE_KEY, "[]").unwrap();
        assert_eq!(backend.read(STORAGE_KEY).unwrap().as_deref(), Some("[]"));
    }
}
