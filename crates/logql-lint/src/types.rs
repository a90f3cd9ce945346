//! Diagnostic types

use serde::{Deserialize, Serialize};

/// Position in a document (line and character)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Line number (0-based)
    pub line: u32,
    /// Character offset within the line (0-based, in chars)
    pub character: u32,
}

impl Position {
    /// Create a new position
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// Range in a document (start and end positions)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    /// Start position
    pub start: Position,
    /// End position
    pub end: Position,
}

impl Range {
    /// Create a new range
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

/// Diagnostic severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    /// Error severity
    Error,
    /// Warning severity
    Warning,
}

impl std::fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticSeverity::Error => write!(f, "error"),
            DiagnosticSeverity::Warning => write!(f, "warning"),
        }
    }
}

/// Check that produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LintRule {
    Quotes,
    Brackets,
    ParseErrors,
    EmptySelector,
}

/// Diagnostic over a byte range `[from, to)` of the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub from: usize,
    pub to: usize,
    pub severity: DiagnosticSeverity,
    pub message: String,
    pub rule: LintRule,
}

impl Diagnostic {
    pub fn error(rule: LintRule, from: usize, to: usize, message: impl Into<String>) -> Self {
        Self {
            from,
            to,
            severity: DiagnosticSeverity::Error,
            message: message.into(),
            rule,
        }
    }

    pub fn warning(rule: LintRule, from: usize, to: usize, message: impl Into<String>) -> Self {
        Self {
            from,
            to,
            severity: DiagnosticSeverity::Warning,
            message: message.into(),
            rule,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_json_shape() {
        let diagnostic = Diagnostic::warning(LintRule::EmptySelector, 0, 2, "empty");
        let json = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(json["severity"], "warning");
        assert_eq!(json["rule"], "empty_selector");
        assert_eq!(json["from"], 0);
        assert_eq!(json["to"], 2);
    }
}
