// Lint a query

use std::sync::Arc;

use logql_editor::EditorSession;
use logql_lint::{Diagnostic, DiagnosticSeverity};
use tracing::debug;

use super::{Command, Input, OutputFormat};
use crate::error::{CliError, CliResult};
use crate::output::OutputStyle;

/// Lint a query and report diagnostics
pub struct LintCommand {
    session: Arc<EditorSession>,
    input: Input,
    format: OutputFormat,
}

impl LintCommand {
    pub fn new(session: Arc<EditorSession>, input: Input, format: OutputFormat) -> Self {
        Self {
            session,
            input,
            format,
        }
    }

    /// Rendered report and the number of error-level diagnostics
    pub async fn report(&self, style: &OutputStyle) -> CliResult<(String, usize)> {
        let text = self.input.read().await?;
        let diagnostics: Vec<Diagnostic> = self.session.lint(&text, None);
        let errors = diagnostics
            .iter()
            .filter(|d| d.severity == DiagnosticSeverity::Error)
            .count();
        debug!(total = diagnostics.len(), errors, "Linted input");

        let rendered = match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&diagnostics)?,
            OutputFormat::Text => style.diagnostics(&text, &diagnostics),
        };
        Ok((rendered, errors))
    }
}

#[async_trait::async_trait]
impl Command for LintCommand {
    async fn execute(&self) -> CliResult<()> {
        let (rendered, errors) = self.report(&OutputStyle::default()).await?;
        if !rendered.is_empty() {
            println!("{}", rendered);
        }
        if errors > 0 {
            return Err(CliError::LintFailed { errors });
        }
        Ok(())
    }
}
