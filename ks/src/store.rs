//! Core store trait and the directory-backed implementation

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::{debug, info};

use crate::StoreError;

/// Name of the lock file guarding writes
const LOCK_FILE: &str = ".lock";

/// A string-keyed, string-valued persistent store
///
/// Implementations must be safe to share between threads; all methods take
/// `&self` and handle their own synchronization.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if absent
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`; removing an absent key is not an error
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Reject keys that would escape the store directory or collide with internals
pub fn validate_key(key: &str) -> Result<(), StoreError> {
    let bad = key.is_empty()
        || key == "."
        || key == ".."
        || key == LOCK_FILE
        || key.ends_with(".tmp")
        || key.chars().any(|c| c == '/' || c == '\\' || c == '\0');
    if bad {
        debug!(%key, "validate_key: rejected");
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Directory-backed store, one file per key
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Base path for storage
    base_path: PathBuf,
}

impl FileStore {
    /// Open or create a store at the given directory
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let base_path = path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)?;
        debug!(?base_path, "FileStore::open: opened store");
        Ok(Self { base_path })
    }

    /// Directory this store writes to
    pub fn path(&self) -> &Path {
        &self.base_path
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base_path.join(key)
    }

    fn lock(&self) -> Result<fs::File, StoreError> {
        let file = fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.base_path.join(LOCK_FILE))?;
        file.lock_exclusive()?;
        Ok(file)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        debug!(%key, "FileStore::get: called");
        validate_key(key)?;
        match fs::read_to_string(self.key_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(%key, "FileStore::get: key absent");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        debug!(%key, len = value.len(), "FileStore::set: called");
        validate_key(key)?;
        let lock = self.lock()?;

        // Write-then-rename so readers never observe a half-written value
        let tmp_path = self.base_path.join(format!("{}.tmp", key));
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, self.key_path(key))?;

        FileExt::unlock(&lock)?;
        info!(%key, "Stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        debug!(%key, "FileStore::remove: called");
        validate_key(key)?;
        let lock = self.lock()?;
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => info!(%key, "Removed value"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        FileExt::unlock(&lock)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_and_get() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::open(temp.path().join("store")).unwrap();

        store.set("promptforge-saved", "[]").unwrap();
        assert_eq!(store.get("promptforge-saved").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_get_absent_key() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::open(temp.path()).unwrap();
        assert!(store.get("missing").unwrap().is_none());
    }

    #[test]
    fn test_set_overwrites() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::open(temp.path()).unwrap();

        store.set("k", "first").unwrap();
        store.set("k", "second").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("second"));
        assert!(!temp.path().join("k.tmp").exists());
    }

    #[test]
    fn test_values_survive_reopen() {
        let temp = TempDir::new().unwrap();
        {
            let store = FileStore::open(temp.path()).unwrap();
            store.set("prefs", r#"{"defaultRole":"X"}"#).unwrap();
        }
        let store = FileStore::open(temp.path()).unwrap();
        assert_eq!(store.get("prefs").unwrap().as_deref(), Some(r#"{"defaultRole":"X"}"#));
    }

    #[test]
    fn test_remove() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::open(temp.path()).unwrap();

        store.set("k", "v").unwrap();
        store.remove("k").unwrap();
        assert!(store.get("k").unwrap().is_none());

        // Removing again is fine
        store.remove("k").unwrap();
    }

    #[test]
    fn test_invalid_keys_rejected() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::open(temp.path()).unwrap();

        for key in ["", ".", "..", "a/b", "a\\b", ".lock", "x.tmp"] {
            let err = store.set(key, "v").unwrap_err();
            assert!(err.is_invalid_key(), "key {:?} should be rejected", key);
        }
    }
}
