//! Platform path resolution for config and storage.

use crate::config::OxoConfig;
use crate::error::ApiError;
use std::path::{Path, PathBuf};

fn project_dirs() -> Result<directories::ProjectDirs, ApiError> {
    directories::ProjectDirs::from("", "oxo", "oxo").ok_or_else(|| {
        ApiError::ConfigError("Could not determine platform directories".to_string())
    })
}

/// Global config file path (~/.config/oxo/config.toml on Linux).
pub fn global_config_path() -> Result<PathBuf, ApiError> {
    Ok(project_dirs()?.config_dir().join("config.toml"))
}

/// Default local store directory (platform data dir).
pub fn default_storage_dir() -> Result<PathBuf, ApiError> {
    Ok(project_dirs()?.data_dir().join("store"))
}

/// Resolve the store path with precedence: CLI flag, `OXO_STORAGE` env,
/// config file, platform default.
pub fn resolve_storage_path(
    cli_path: Option<&Path>,
    config: &OxoConfig,
) -> Result<PathBuf, ApiError> {
    if let Some(p) = cli_path {
        return Ok(p.to_path_buf());
    }
    if let Ok(env_path) = std::env::var("OXO_STORAGE") {
        if !env_path.is_empty() {
            return Ok(PathBuf::from(env_path));
        }
    }
    if let Some(p) = &config.storage.path {
        return Ok(p.clone());
    }
    default_storage_dir()
}
