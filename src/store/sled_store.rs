//! Sled-backed implementation of [`LocalStore`].

use crate::error::{ApiError, StorageError};
use crate::store::LocalStore;
use std::path::Path;

/// Local store over a single sled tree. Values are stored as UTF-8 bytes.
pub struct SledLocalStore {
    db: sled::Db,
}

impl SledLocalStore {
    /// Open (or create) the store under `path`.
    pub fn open(path: &Path) -> Result<Self, ApiError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(StorageError::Io)?;
        }
        let db = sled::open(path).map_err(StorageError::Sled)?;
        Ok(Self { db })
    }

    /// Flush pending writes to disk.
    pub fn flush(&self) -> Result<(), ApiError> {
        self.db.flush().map_err(StorageError::Sled)?;
        Ok(())
    }
}

impl LocalStore for SledLocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, ApiError> {
        let bytes = match self.db.get(key).map_err(StorageError::Sled)? {
            Some(b) => b,
            None => return Ok(None),
        };
        let value = String::from_utf8(bytes.to_vec()).map_err(|_| {
            StorageError::InvalidValue {
                key: key.to_string(),
                reason: "value is not valid UTF-8".to_string(),
            }
        })?;
        Ok(Some(value))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ApiError> {
        self.db
            .insert(key, value.as_bytes())
            .map_err(StorageError::Sled)?;
        self.db.flush().map_err(StorageError::Sled)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ApiError> {
        self.db.remove(key).map_err(StorageError::Sled)?;
        self.db.flush().map_err(StorageError::Sled)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{load_json, save_json};

    fn open_temp() -> (tempfile::TempDir, SledLocalStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SledLocalStore::open(&dir.path().join("store")).unwrap();
        (dir, store)
    }

    #[test]
    fn get_missing_key_is_none() {
        let (_dir, store) = open_temp();
        assert!(store.get("absent").unwrap().is_none());
    }

    #[test]
    fn set_then_get_round_trips() {
        let (_dir, store) = open_temp();
        store.set("k", "\"v\"").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("\"v\""));
    }

    #[test]
    fn remove_is_idempotent() {
        let (_dir, store) = open_temp();
        store.set("k", "1").unwrap();
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert!(store.get("k").unwrap().is_none());
    }

    #[test]
    fn load_json_discards_corrupt_value() {
        let (_dir, store) = open_temp();
        store.set("k", "{not json").unwrap();
        let value: Option<Vec<String>> = load_json(&store, "k").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn save_json_load_json_round_trips() {
        let (_dir, store) = open_temp();
        save_json(&store, "list", &vec!["a".to_string(), "b".to_string()]).unwrap();
        let value: Option<Vec<String>> = load_json(&store, "list").unwrap();
        assert_eq!(value, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store");
        {
            let store = SledLocalStore::open(&path).unwrap();
            store.set("k", "\"persisted\"").unwrap();
        }
        let store = SledLocalStore::open(&path).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("\"persisted\""));
    }
}
