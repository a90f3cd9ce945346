// Context analyzer trait

use crate::types::{CompletionRequest, ResolvedContext};

/// Decides what kind of suggestion a cursor position calls for
///
/// Analyzers are pure: no I/O, no shared state. The resolver asks each one in
/// turn and takes the first answer.
///
/// # Example
///
/// ```
/// use logql_completion::context::{ContextAnalyzer, TextContextAnalyzer};
/// use logql_completion::{CompletionIntent, CompletionRequest};
///
/// let request = CompletionRequest::new("{job=", 5);
/// let context = TextContextAnalyzer.analyze(&request, 5).unwrap();
/// assert!(matches!(context.intent, CompletionIntent::LabelValue { .. }));
/// ```
pub trait ContextAnalyzer: Send + Sync {
    /// Classify the position `cursor` of `request`
    ///
    /// # Arguments
    ///
    /// * `request` - Document text, optional tree and trigger flag
    /// * `cursor` - Cursor already clamped to a char boundary of the text
    ///
    /// # Returns
    ///
    /// `None` when this analyzer has no opinion about the position.
    fn analyze(&self, request: &CompletionRequest<'_>, cursor: usize) -> Option<ResolvedContext>;
}
