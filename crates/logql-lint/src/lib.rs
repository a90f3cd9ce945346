//! LogQL structural linter
//!
//! Finds unbalanced quotes and brackets, parser error nodes and empty
//! selectors. Diagnostics carry byte ranges; [`LineIndex`] turns them into
//! line/character positions for hosts that need them.

pub mod diagnostics;
pub mod position;
pub mod types;

pub use diagnostics::{LintOptions, LogqlLinter};
pub use position::LineIndex;
pub use types::{Diagnostic, DiagnosticSeverity, LintRule, Position, Range};
