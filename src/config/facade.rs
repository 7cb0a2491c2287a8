//! ConfigLoader facade composing the sources in precedence order.

use crate::config::{sources, OxoConfig};
use config::ConfigError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from standard sources.
    /// Precedence: global file (lowest) -> workspace file -> environment (highest).
    pub fn load(workspace_root: &Path) -> Result<OxoConfig, ConfigError> {
        let builder = sources::base_builder();
        let builder = sources::add_global_file(builder)?;
        let builder = sources::add_workspace_file(builder, workspace_root)?;
        let builder = sources::add_environment(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load configuration from a specific file with the environment overlay.
    pub fn load_from_file(path: &Path) -> Result<OxoConfig, ConfigError> {
        use config::File;

        let path_str = path
            .to_str()
            .ok_or_else(|| ConfigError::Message("config path is not UTF-8".to_string()))?;
        let builder = sources::base_builder().add_source(File::with_name(path_str));
        let builder = sources::add_environment(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Create default configuration.
    pub fn default() -> OxoConfig {
        OxoConfig::default()
    }
}
