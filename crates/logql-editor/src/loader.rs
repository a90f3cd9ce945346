//! Loading configuration from files and strings

use std::path::Path;

use tracing::{debug, info};

use crate::error::{ConfigError, Result};
use crate::types::EditorConfig;

/// Configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            "json" => Some(ConfigFormat::Json),
            _ => None,
        }
    }
}

/// Reads and validates [`EditorConfig`]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Parse YAML configuration
    pub fn load_from_yaml(content: &str) -> Result<EditorConfig> {
        let config: EditorConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse JSON configuration
    pub fn load_from_json(content: &str) -> Result<EditorConfig> {
        let config: EditorConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration in the given format
    pub fn load_from_string(content: &str, format: ConfigFormat) -> Result<EditorConfig> {
        match format {
            ConfigFormat::Yaml => Self::load_from_yaml(content),
            ConfigFormat::Json => Self::load_from_json(content),
        }
    }

    /// Load a `.yaml`, `.yml` or `.json` file
    pub async fn load_from_file(path: impl AsRef<Path>) -> Result<EditorConfig> {
        let path = path.as_ref();
        debug!("Loading configuration from {}", path.display());

        let format = ConfigFormat::from_path(path)
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.display().to_string()))?;

        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound(path.display().to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        let config = Self::load_from_string(&content, format)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_yaml_with_defaults() {
        let config = ConfigLoader::load_from_yaml(
            "source: http://loki:3100\nfetch_options:\n  tenant_id: team-a\n",
        )
        .unwrap();
        assert_eq!(config.source.as_deref(), Some("http://loki:3100"));
        assert_eq!(config.fetch_options.tenant_id.as_deref(), Some("team-a"));
        assert_eq!(config.cache_duration_ms, 300_000);
        assert!(config.linter_enabled);
    }

    #[test]
    fn test_json_toggles() {
        let config = ConfigLoader::load_from_json(
            r#"{"enable_completion": false, "cache_duration_ms": 1000}"#,
        )
        .unwrap();
        assert!(!config.enable_completion);
        assert_eq!(config.cache_duration_ms, 1000);
    }

    #[test]
    fn test_invalid_source_is_rejected() {
        let result = ConfigLoader::load_from_yaml("source: not-a-url\n");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_malformed_content() {
        assert!(matches!(
            ConfigLoader::load_from_json("{"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        writeln!(file, "source: https://logs.example.com").unwrap();

        let config = ConfigLoader::load_from_file(file.path()).await.unwrap();
        assert_eq!(config.source.as_deref(), Some("https://logs.example.com"));
    }

    #[tokio::test]
    async fn test_unknown_extension_and_missing_file() {
        let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        assert!(matches!(
            ConfigLoader::load_from_file(file.path()).await,
            Err(ConfigError::UnsupportedFormat(_))
        ));

        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ConfigLoader::load_from_file(dir.path().join("missing.yaml")).await,
            Err(ConfigError::NotFound(_))
        ));
    }
}
