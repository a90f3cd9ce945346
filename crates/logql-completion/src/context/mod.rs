//! Completion context analysis
//!
//! - Tree-based analysis when the host supplies a syntax tree
//! - Text heuristics as the fallback

mod analyzer;
mod text;
mod tree;
mod utils;

pub use analyzer::ContextAnalyzer;
pub use text::TextContextAnalyzer;
pub use tree::TreeContextAnalyzer;
pub use utils::{clamp_cursor, word_start};

use crate::types::{CompletionRequest, ResolvedContext};

/// Classify a completion request
///
/// Runs the tree analyzer, then the text analyzer, and returns the first
/// match. An empty document never yields a context.
pub fn classify(request: &CompletionRequest<'_>) -> Option<ResolvedContext> {
    if request.text.is_empty() {
        return None;
    }
    let cursor = clamp_cursor(request.text, request.cursor);

    TreeContextAnalyzer
        .analyze(request, cursor)
        .or_else(|| TextContextAnalyzer.analyze(request, cursor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CompletionIntent, ResolutionBranch};
    use logql_syntax::{NodeKind, TreeBuilder};

    #[test]
    fn test_nameless_matcher_falls_back_to_text() {
        // {="api"}
        let mut builder = TreeBuilder::new(NodeKind::Other("LogQL".into()), 8);
        builder
            .open(NodeKind::Selector, 0)
            .open(NodeKind::LabelMatcher, 1)
            .leaf(NodeKind::Operator, 1, 2)
            .leaf(NodeKind::String, 2, 7)
            .close(7)
            .close(8);
        let tree = builder.finish().unwrap();
        let request = CompletionRequest::new("{=\"api\"}", 4).with_tree(&tree);

        let context = classify(&request).unwrap();
        assert_eq!(context.branch, ResolutionBranch::Word);
        assert_eq!(context.intent, CompletionIntent::StaticKeyword);
        assert_eq!(context.anchor, 3);
    }

    #[test]
    fn test_tree_match_wins_over_text() {
        // {job=
        let mut builder = TreeBuilder::new(NodeKind::Other("LogQL".into()), 5);
        builder
            .open(NodeKind::Selector, 0)
            .open(NodeKind::LabelMatcher, 1)
            .leaf(NodeKind::LabelName, 1, 4)
            .leaf(NodeKind::Operator, 4, 5)
            .close(5)
            .close(5);
        let tree = builder.finish().unwrap();
        let request = CompletionRequest::new("{job=", 3).with_tree(&tree);

        let context = classify(&request).unwrap();
        assert_eq!(context.branch, ResolutionBranch::TreeLabelMatcher);
    }
}
