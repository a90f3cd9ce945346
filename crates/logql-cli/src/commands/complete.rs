// Complete a query at an offset

use std::sync::Arc;

use logql_editor::EditorSession;

use super::{Command, Input, OutputFormat};
use crate::error::{CliError, CliResult};
use crate::output::OutputStyle;

/// Print completion suggestions for a byte offset
pub struct CompleteCommand {
    session: Arc<EditorSession>,
    input: Input,
    offset: Option<usize>,
    explicit: bool,
    format: OutputFormat,
}

impl CompleteCommand {
    /// `offset` defaults to the end of the input
    pub fn new(
        session: Arc<EditorSession>,
        input: Input,
        offset: Option<usize>,
        explicit: bool,
        format: OutputFormat,
    ) -> Self {
        Self {
            session,
            input,
            offset,
            explicit,
            format,
        }
    }

    pub async fn report(&self, style: &OutputStyle) -> CliResult<String> {
        let text = self.input.read().await?;
        // a trailing newline from files or echo is not part of the query
        let text = text.strip_suffix('\n').unwrap_or(&text);
        let offset = self.offset.unwrap_or(text.len());
        if offset > text.len() {
            return Err(CliError::InvalidArgument {
                message: format!("offset {} is past the end of the input ({} bytes)", offset, text.len()),
            });
        }

        let completion = self
            .session
            .complete(text, offset, None, self.explicit)
            .await;

        let rendered = match (self.format, completion.result) {
            (OutputFormat::Json, result) => serde_json::to_string_pretty(&result)?,
            (OutputFormat::Text, Some(list)) => style.completions(&list),
            (OutputFormat::Text, None) => String::new(),
        };
        Ok(rendered)
    }
}

#[async_trait::async_trait]
impl Command for CompleteCommand {
    async fn execute(&self) -> CliResult<()> {
        let rendered = self.report(&OutputStyle::default()).await?;
        if !rendered.is_empty() {
            println!("{}", rendered);
        }
        Ok(())
    }
}
