//! File-backed store
//!
//! Each key maps to `<root>/<key>.json`. Writes go to a sibling temp file
//! that is renamed over the target, so readers never see a half-written
//! collection.

use crate::error::StorageError;
use crate::{KeyValueStore, StorageResult};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Directory of one JSON file per key
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open store rooted at `root`, creating the directory if needed
    ///
    /// # Errors
    /// Returns error if the directory cannot be created
    pub fn open(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| StorageError::io_error(&root, e))?;
        Ok(Self { root })
    }

    /// Root directory
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io_error(path, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        let tmp = self.root.join(format!(".{key}.json.tmp"));

        let mut file = fs::File::create(&tmp).map_err(|e| StorageError::io_error(&tmp, e))?;
        file.write_all(value.as_bytes())
            .and_then(|()| file.sync_all())
            .map_err(|e| StorageError::io_error(&tmp, e))?;
        drop(file);

        fs::rename(&tmp, &path).map_err(|e| StorageError::io_error(&path, e))?;
        tracing::trace!(key, bytes = value.len(), "file store write");
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io_error(path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_file_per_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        store.set("projects_v2", "[1,2]").unwrap();
        assert_eq!(store.get("projects_v2").unwrap().as_deref(), Some("[1,2]"));
        assert!(dir.path().join("projects_v2.json").exists());
        assert!(!dir.path().join(".projects_v2.json.tmp").exists());
    }

    #[test]
    fn missing_key_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.get("projects").unwrap(), None);
        store.remove("projects").unwrap();
    }

    #[test]
    fn overwrite_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        store.set("projects", "a").unwrap();
        store.set("projects", "b").unwrap();
        assert_eq!(store.get("projects").unwrap().as_deref(), Some("b"));

        store.remove("projects").unwrap();
        assert_eq!(store.get("projects").unwrap(), None);
    }

    #[test]
    fn rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        for key in ["", "../escape", "a/b", ".hidden"] {
            assert!(matches!(store.set(key, "x"), Err(StorageError::InvalidKey(_))), "{key}");
        }
    }

    #[test]
    fn open_creates_nested_root() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileStore::open(&nested).unwrap();
        assert_eq!(store.root(), nested.as_path());
        assert!(nested.is_dir());
    }
}
