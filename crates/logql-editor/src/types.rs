//! Embedder configuration

use logql_cache::DEFAULT_CACHE_DURATION_MS;
use logql_http::{HttpConfig, RequestOptions};
use logql_lint::LintOptions;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ConfigError, Result};

/// Configuration of one editor integration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Loki base URL; without it only static suggestions are offered
    pub source: Option<String>,
    /// Label and value cache lifetime
    pub cache_duration_ms: u64,
    /// Passed verbatim to every Loki request
    pub fetch_options: RequestOptions,
    pub enable_completion: bool,
    pub linter_enabled: bool,
    pub lint: LintOptions,
    pub http: HttpConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            source: None,
            cache_duration_ms: DEFAULT_CACHE_DURATION_MS,
            fetch_options: RequestOptions::default(),
            enable_completion: true,
            linter_enabled: true,
            lint: LintOptions::default(),
            http: HttpConfig::interactive(),
        }
    }
}

impl EditorConfig {
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Check the source URL
    pub fn validate(&self) -> Result<()> {
        if let Some(source) = &self.source {
            let url = Url::parse(source).map_err(|e| {
                ConfigError::Validation(format!("source '{}' is not a valid URL: {}", source, e))
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigError::Validation(format!(
                    "source '{}' must use http or https",
                    source
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.cache_duration_ms, 300_000);
        assert!(config.enable_completion);
        assert!(config.linter_enabled);
        assert!(config.source.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_source_validation() {
        assert!(EditorConfig::default()
            .with_source("http://localhost:3100")
            .validate()
            .is_ok());
        assert!(matches!(
            EditorConfig::default().with_source("localhost").validate(),
            Err(ConfigError::Validation(_))
        ));
        assert!(matches!(
            EditorConfig::default()
                .with_source("ftp://loki")
                .validate(),
            Err(ConfigError::Validation(_))
        ));
    }
}
