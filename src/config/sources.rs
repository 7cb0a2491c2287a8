//! Configuration sources, composed in precedence order by the facade.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File};
use std::path::Path;

/// Base builder. Section defaults come from serde, so nothing is seeded here
/// beyond an empty builder; kept as a function so the facade reads in order.
pub fn base_builder() -> ConfigBuilder<DefaultState> {
    config::Config::builder()
}

/// Add the global XDG config file, if it exists.
pub fn add_global_file(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = match crate::config::paths::global_config_path() {
        Ok(path) => path,
        Err(_) => return Ok(builder),
    };
    if !path.exists() {
        return Ok(builder);
    }
    let path_str = path
        .to_str()
        .ok_or_else(|| ConfigError::Message("global config path is not UTF-8".to_string()))?;
    Ok(builder.add_source(File::with_name(path_str)))
}

/// Add the workspace `oxo.toml`, if it exists.
pub fn add_workspace_file(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = workspace_root.join("oxo.toml");
    if !path.exists() {
        return Ok(builder);
    }
    let path_str = path
        .to_str()
        .ok_or_else(|| ConfigError::Message("workspace config path is not UTF-8".to_string()))?;
    Ok(builder.add_source(File::with_name(path_str)))
}

/// Add the environment overlay: OXO_ prefix, __ separator for nested keys.
pub fn add_environment(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(
        Environment::with_prefix("OXO")
            .separator("__")
            .try_parsing(true),
    ))
}
