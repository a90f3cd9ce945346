// Command routing and dispatch

use std::{path::PathBuf, sync::Arc};

use clap::{Parser, Subcommand};
use logql_editor::{ConfigManager, EditorConfig, EditorSession};
use tracing::debug;

use crate::commands::*;
use crate::error::CliResult;

/// logql - lint and complete LogQL queries against Loki
#[derive(Parser, Debug)]
#[command(name = "logql")]
#[command(bin_name = "logql")]
#[command(about = "Lint and complete LogQL queries")]
#[command(version)]
#[command(author = "LogQL Assist Contributors")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (.yaml, .yml or .json)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Loki base URL, overrides the configuration
    #[arg(long, global = true, value_name = "URL")]
    pub source: Option<String>,

    /// Log filter, e.g. `debug` or `logql_completion=trace`
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Lint a query
    #[command(about = "Report structural problems in a query")]
    Lint {
        /// Query file, `-` or absent for stdin
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Inline query instead of a file
        #[arg(short, long, conflicts_with = "file")]
        query: Option<String>,
    },

    /// Complete a query
    #[command(about = "Print completion suggestions at a byte offset")]
    Complete {
        /// Query file, `-` or absent for stdin
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Inline query instead of a file
        #[arg(short, long, conflicts_with = "file")]
        query: Option<String>,

        /// Cursor byte offset (default: end of input)
        #[arg(long)]
        offset: Option<usize>,

        /// Treat as an explicit completion request
        #[arg(long)]
        explicit: bool,
    },

    /// List label names known to Loki
    Labels,

    /// List values of a label
    Values {
        /// Label name
        #[arg(value_name = "LABEL")]
        label: String,
    },
}

/// Command router
pub struct CommandRouter;

impl CommandRouter {
    /// Load configuration from `--config`, `LOGQL_*` and `--source`
    pub fn load_config(cli: &Cli) -> CliResult<EditorConfig> {
        let manager = match &cli.config {
            Some(path) => ConfigManager::with_path(path),
            None => ConfigManager::new(),
        };
        let mut config = manager.load()?;
        if let Some(source) = &cli.source {
            config.source = Some(source.clone());
            config.validate()?;
        }
        Ok(config)
    }

    /// Build the handler for the parsed command line
    pub fn build(cli: &Cli, session: Arc<EditorSession>) -> Box<dyn Command> {
        let format = if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };

        match &cli.command {
            Commands::Lint { file, query } => Box::new(LintCommand::new(
                session,
                Input {
                    file: file.clone(),
                    query: query.clone(),
                },
                format,
            )),
            Commands::Complete {
                file,
                query,
                offset,
                explicit,
            } => Box::new(CompleteCommand::new(
                session,
                Input {
                    file: file.clone(),
                    query: query.clone(),
                },
                *offset,
                *explicit,
                format,
            )),
            Commands::Labels => Box::new(LabelsCommand::new(session, format)),
            Commands::Values { label } => Box::new(ValuesCommand::new(session, label, format)),
        }
    }

    /// Route and execute a parsed command line
    pub async fn execute(cli: &Cli) -> CliResult<()> {
        let config = Self::load_config(cli)?;
        debug!(source = ?config.source, "Configuration loaded");
        let session = Arc::new(EditorSession::new(config)?);
        Self::build(cli, session).execute().await
    }
}
