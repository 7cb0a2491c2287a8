//! Local key-value store
//!
//! Backing store for everything the directory persists. Keys are flat strings
//! and values are JSON documents; the key names are a compatibility surface
//! (they mirror what earlier deployments wrote) and must not be renamed.

pub mod keys;
pub mod sled_store;

use crate::error::ApiError;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use sled_store::SledLocalStore;

/// Flat key-value store with string keys and JSON string values.
///
/// `get` on a missing key returns `Ok(None)`; `remove` of a missing key is
/// a successful no-op.
pub trait LocalStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, ApiError>;
    fn set(&self, key: &str, value: &str) -> Result<(), ApiError>;
    fn remove(&self, key: &str) -> Result<(), ApiError>;
}

/// Read and decode a JSON value under `key`.
///
/// A value that fails to decode is logged and treated as absent; corrupt
/// state never takes the caller down.
pub fn load_json<T: DeserializeOwned>(
    store: &dyn LocalStore,
    key: &str,
) -> Result<Option<T>, ApiError> {
    let raw = match store.get(key)? {
        Some(raw) => raw,
        None => return Ok(None),
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding undecodable value");
            Ok(None)
        }
    }
}

/// Encode `value` as JSON and write it under `key`.
pub fn save_json<T: Serialize>(
    store: &dyn LocalStore,
    key: &str,
    value: &T,
) -> Result<(), ApiError> {
    let raw = serde_json::to_string(value)
        .map_err(|e| ApiError::StorageError(crate::error::StorageError::Serde(e)))?;
    store.set(key, &raw)
}
