//! Diagnostics Engine Module
//!
//! - `LogqlLinter`: runs the structural rules over one document
//! - `rules`: the individual checks
//!
//! # Example
//!
//! ```
//! use logql_lint::LogqlLinter;
//!
//! let linter = LogqlLinter::new();
//! let diagnostics = linter.lint("{}", None);
//! assert_eq!(diagnostics.len(), 1);
//! ```

pub mod rules;

use logql_syntax::SyntaxTree;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::Diagnostic;

/// Which rules run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintOptions {
    pub quotes: bool,
    pub brackets: bool,
    pub parse_errors: bool,
    pub empty_selector: bool,
}

impl Default for LintOptions {
    fn default() -> Self {
        Self {
            quotes: true,
            brackets: true,
            parse_errors: true,
            empty_selector: true,
        }
    }
}

/// Structural linter for LogQL documents
#[derive(Debug, Clone, Default)]
pub struct LogqlLinter {
    options: LintOptions,
}

impl LogqlLinter {
    /// Create a linter with every rule enabled
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: LintOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> LintOptions {
        self.options
    }

    /// Lint a document
    ///
    /// Diagnostics come out grouped by rule: quotes, brackets, parse errors,
    /// empty selector. Parse errors are only reported when a tree is given.
    /// Blank documents produce nothing.
    pub fn lint(&self, text: &str, tree: Option<&dyn SyntaxTree>) -> Vec<Diagnostic> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let mut diagnostics = Vec::new();

        if self.options.quotes {
            diagnostics.extend(rules::check_quotes(text));
        }

        if self.options.brackets {
            diagnostics.extend(rules::check_brackets(text));
        }

        if self.options.parse_errors {
            if let Some(tree) = tree {
                diagnostics.extend(rules::check_parse_errors(text, tree));
            }
        }

        if self.options.empty_selector {
            diagnostics.extend(rules::check_empty_selector(text));
        }

        debug!(count = diagnostics.len(), "Lint pass finished");
        diagnostics
    }
}
