//! Layered configuration: defaults, optional file, then `LOGQL_*` environment

use std::{collections::HashMap, path::PathBuf};

use config::{Config, Environment, File};
use tracing::debug;

use crate::{error::Result, types::EditorConfig};

/// Default environment prefix
pub const ENV_PREFIX: &str = "LOGQL";

/// Configuration manager
///
/// Environment keys use `__` for nesting: `LOGQL_HTTP__TIMEOUT_MS=2000`.
pub struct ConfigManager {
    /// Configuration file path
    config_path: Option<PathBuf>,
    /// Environment prefix
    env_prefix: String,
    /// Replacement for the process environment
    env_source: Option<HashMap<String, String>>,
}

impl ConfigManager {
    /// Create a new configuration manager
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: ENV_PREFIX.to_string(),
            env_source: None,
        }
    }

    /// Create with custom config path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: Some(path.into()),
            ..Self::new()
        }
    }

    /// Read variables from `vars` instead of the process environment
    pub fn with_env_source(mut self, vars: HashMap<String, String>) -> Self {
        self.env_source = Some(vars);
        self
    }

    /// Build the configuration from every layer and validate it
    pub fn load(&self) -> Result<EditorConfig> {
        let mut builder = Config::builder();

        if let Some(path) = &self.config_path {
            debug!("Adding configuration file {}", path.display());
            builder = builder.add_source(File::from(path.clone()).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(self.env_source.clone()),
        );

        let config: EditorConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
