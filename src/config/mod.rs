//! Configuration
//!
//! Layered configuration in the usual precedence order: built-in defaults,
//! then the global XDG config file, then the workspace `oxo.toml`, then
//! `OXO__`-prefixed environment variables (highest).

pub mod facade;
pub mod paths;
pub mod sources;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use facade::ConfigLoader;

/// Top-level configuration for the oxo CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OxoConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub sync: SyncSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Storage section: where the local store lives. `None` resolves to the
/// platform data directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Session section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Seconds a login stamp stays valid; checked at rehydration only.
    #[serde(default = "default_expiry_secs")]
    pub expiry_secs: u64,
}

fn default_expiry_secs() -> u64 {
    3600
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            expiry_secs: default_expiry_secs(),
        }
    }
}

/// Sync section: optional remote mirror. Environment variables
/// `OXO_SYNC_ENDPOINT` / `OXO_SYNC_TOKEN` take precedence over these.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncSettings {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}
