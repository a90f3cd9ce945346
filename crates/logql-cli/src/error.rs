// CLI error types

use logql_completion::SourceError;
use logql_editor::ConfigError;
use thiserror::Error;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Label source error: {0}")]
    Source(#[from] SourceError),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{errors} lint error(s)")]
    LintFailed { errors: usize },
}

impl CliError {
    /// Get a user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            CliError::InvalidArgument { message } => {
                format!("Invalid argument: {}\n\nRun 'logql --help' for usage information.", message)
            }
            CliError::Io(e) => format!("File operation failed: {}", e),
            CliError::Config(e) => {
                format!("Configuration error: {}\n\nCheck the file passed with --config and LOGQL_* variables.", e)
            }
            CliError::Source(SourceError::NotConfigured) => {
                "No Loki source configured.\n\nPass --source <url> or set LOGQL_SOURCE.".to_string()
            }
            CliError::Source(e) => format!("Could not query Loki: {}", e),
            CliError::Json(e) => format!("Failed to serialize output: {}", e),
            CliError::LintFailed { errors } => format!("Found {} lint error(s)", errors),
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::LintFailed { .. } => 1,
            CliError::InvalidArgument { .. } | CliError::Config(_) => 2,
            _ => 3,
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
