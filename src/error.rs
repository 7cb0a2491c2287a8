//! Error types for the oxo directory.
//!
//! Two layers, matching the storage/api split: `StorageError` for anything
//! that goes wrong talking to the local key-value store, `ApiError` for
//! everything the command surface can return.

use thiserror::Error;

/// Errors raised by the local key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store error: {0}")]
    Sled(#[from] sled::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Value under a known key did not decode as UTF-8 or as the expected shape.
    #[error("Invalid value under key '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

/// Top-level error type for directory, session, and tooling operations.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Agent not found: {0}")]
    AgentNotFound(String),

    #[error("Sync error: {0}")]
    SyncError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(e: config::ConfigError) -> Self {
        ApiError::ConfigError(e.to_string())
    }
}
