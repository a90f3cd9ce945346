// Command handlers for the logql CLI

pub mod complete;
pub mod labels;
pub mod lint;

pub use complete::CompleteCommand;
pub use labels::{LabelsCommand, ValuesCommand};
pub use lint::LintCommand;

use std::path::{Path, PathBuf};

use tokio::io::AsyncReadExt;

use crate::error::CliResult;

/// Trait for command handlers
#[async_trait::async_trait]
pub trait Command: Send + Sync {
    /// Execute the command
    async fn execute(&self) -> CliResult<()>;
}

/// How command output is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Read a query from `path`, or from stdin when absent or `-`
pub async fn read_input(path: Option<&Path>) -> CliResult<String> {
    match path {
        Some(path) if path != Path::new("-") => Ok(tokio::fs::read_to_string(path).await?),
        _ => {
            let mut text = String::new();
            tokio::io::stdin().read_to_string(&mut text).await?;
            Ok(text)
        }
    }
}

/// Query source given on the command line
#[derive(Debug, Clone, Default)]
pub struct Input {
    pub file: Option<PathBuf>,
    /// Inline query, takes precedence over `file`
    pub query: Option<String>,
}

impl Input {
    pub async fn read(&self) -> CliResult<String> {
        match &self.query {
            Some(query) => Ok(query.clone()),
            None => read_input(self.file.as_deref()).await,
        }
    }
}
