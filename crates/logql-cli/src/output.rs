// Output formatting and styling

use std::io::IsTerminal;

use colored::Colorize;
use logql_completion::CompletionList;
use logql_lint::{Diagnostic, DiagnosticSeverity, LineIndex};

/// Output styling configuration
pub struct OutputStyle {
    pub use_colors: bool,
}

impl Default for OutputStyle {
    fn default() -> Self {
        Self {
            use_colors: std::io::stdout().is_terminal(),
        }
    }
}

impl OutputStyle {
    /// Plain output, for pipes and tests
    pub fn plain() -> Self {
        Self { use_colors: false }
    }

    /// Format error message
    pub fn error(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "✗".red().bold(), msg)
        } else {
            format!("✗ {}", msg)
        }
    }

    fn severity(&self, severity: DiagnosticSeverity) -> String {
        let label = severity.to_string();
        if !self.use_colors {
            return label;
        }
        match severity {
            DiagnosticSeverity::Error => label.red().bold().to_string(),
            DiagnosticSeverity::Warning => label.yellow().to_string(),
        }
    }

    /// `line:col severity message`, one per diagnostic, 1-based positions
    pub fn diagnostics(&self, text: &str, diagnostics: &[Diagnostic]) -> String {
        let index = LineIndex::new(text);
        diagnostics
            .iter()
            .map(|diagnostic| {
                let start = index.position(diagnostic.from);
                format!(
                    "{}:{} {} {}",
                    start.line + 1,
                    start.character + 1,
                    self.severity(diagnostic.severity),
                    diagnostic.message
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Anchor line followed by one `label<TAB>insert<TAB>description` row per suggestion
    pub fn completions(&self, list: &CompletionList) -> String {
        let mut lines = vec![format!("anchor {}", list.anchor)];
        lines.extend(list.suggestions.iter().map(|suggestion| {
            let label = if self.use_colors {
                suggestion.label.cyan().to_string()
            } else {
                suggestion.label.clone()
            };
            format!(
                "{}\t{}\t{}",
                label,
                suggestion.insert_text(),
                suggestion.description.as_deref().unwrap_or("")
            )
            .trim_end()
            .to_string()
        }));
        lines.join("\n")
    }

    /// One value per line
    pub fn list(&self, values: &[String]) -> String {
        values.join("\n")
    }
}

/// Print error message to stderr
pub fn print_error(msg: &str) {
    let style = OutputStyle::default();
    eprintln!("{}", style.error(msg));
}

#[cfg(test)]
mod tests {
    use super::*;
    use logql_completion::{Suggestion, SuggestionKind};
    use logql_lint::LintRule;

    #[test]
    fn test_diagnostic_lines_are_one_based() {
        let text = "{job=\"x\"}\n{";
        let diagnostics = vec![Diagnostic::error(
            LintRule::Brackets,
            10,
            11,
            "Unclosed bracket '{'",
        )];
        assert_eq!(
            OutputStyle::plain().diagnostics(text, &diagnostics),
            "2:1 error Unclosed bracket '{'"
        );
    }

    #[test]
    fn test_completion_rows() {
        let list = CompletionList {
            anchor: 1,
            suggestions: vec![
                Suggestion::new("job", SuggestionKind::Label)
                    .with_description("Label from Loki")
                    .with_insert_text("job="),
                Suggestion::new("sum", SuggestionKind::Function),
            ],
        };
        assert_eq!(
            OutputStyle::plain().completions(&list),
            "anchor 1\njob\tjob=\tLabel from Loki\nsum\tsum"
        );
    }
}
