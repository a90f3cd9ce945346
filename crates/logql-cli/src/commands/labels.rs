// Query label names and values from the configured source

use std::sync::Arc;

use logql_editor::EditorSession;

use super::{Command, OutputFormat};
use crate::error::CliResult;
use crate::output::OutputStyle;

fn render(values: &[String], format: OutputFormat, style: &OutputStyle) -> CliResult<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(values)?,
        OutputFormat::Text => style.list(values),
    })
}

/// List label names
pub struct LabelsCommand {
    session: Arc<EditorSession>,
    format: OutputFormat,
}

impl LabelsCommand {
    pub fn new(session: Arc<EditorSession>, format: OutputFormat) -> Self {
        Self { session, format }
    }

    /// Unlike completion, fetch failures are reported
    pub async fn report(&self, style: &OutputStyle) -> CliResult<String> {
        let fetched = self.session.resolver().provider().try_fetch_labels().await?;
        render(&fetched.values, self.format, style)
    }
}

#[async_trait::async_trait]
impl Command for LabelsCommand {
    async fn execute(&self) -> CliResult<()> {
        println!("{}", self.report(&OutputStyle::default()).await?);
        Ok(())
    }
}

/// List the values of one label
pub struct ValuesCommand {
    session: Arc<EditorSession>,
    label: String,
    format: OutputFormat,
}

impl ValuesCommand {
    pub fn new(session: Arc<EditorSession>, label: impl Into<String>, format: OutputFormat) -> Self {
        Self {
            session,
            label: label.into(),
            format,
        }
    }

    pub async fn report(&self, style: &OutputStyle) -> CliResult<String> {
        let fetched = self
            .session
            .resolver()
            .provider()
            .try_fetch_label_values(&self.label)
            .await?;
        render(&fetched.values, self.format, style)
    }
}

#[async_trait::async_trait]
impl Command for ValuesCommand {
    async fn execute(&self) -> CliResult<()> {
        println!("{}", self.report(&OutputStyle::default()).await?);
        Ok(())
    }
}
