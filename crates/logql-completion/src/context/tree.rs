//! Syntax tree based context analyzer
//!
//! Used when the host supplies a parsed tree. Positions the tree does not
//! recognise fall through to the text analyzer.

use logql_syntax::{NodeId, NodeKind, Side, SyntaxTree};
use tracing::trace;

use super::analyzer::ContextAnalyzer;
use super::utils;
use crate::types::{
    CompletionIntent, CompletionRequest, KindFilter, QuoteStyle, ResolutionBranch,
    ResolvedContext,
};

/// Context analyzer driven by the syntax tree
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeContextAnalyzer;

impl TreeContextAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Cursor on a label matcher, or on the name part of one
    fn label_matcher(
        tree: &dyn SyntaxTree,
        node: NodeId,
        cursor: usize,
    ) -> Option<ResolvedContext> {
        let anchor = match tree.kind(node)? {
            NodeKind::LabelMatcher => cursor,
            NodeKind::LabelName => {
                let parent = tree.parent(node)?;
                if tree.kind(parent)? != &NodeKind::LabelMatcher {
                    return None;
                }
                tree.range(node)?.from
            }
            _ => return None,
        };

        Some(ResolvedContext {
            intent: CompletionIntent::LabelName,
            anchor,
            branch: ResolutionBranch::TreeLabelMatcher,
        })
    }

    /// Cursor in the string literal right after a matcher operator
    fn label_value(tree: &dyn SyntaxTree, text: &str, node: NodeId) -> Option<ResolvedContext> {
        if tree.kind(node)? != &NodeKind::String {
            return None;
        }
        let operator = tree.prev_sibling(node)?;
        if tree.kind(operator)? != &NodeKind::Operator {
            return None;
        }
        let matcher = tree.parent(node)?;
        if tree.kind(matcher)? != &NodeKind::LabelMatcher {
            return None;
        }
        let name = tree.child_of_kind(matcher, &NodeKind::LabelName)?;
        let label = tree.range(name)?.slice(text)?;

        Some(ResolvedContext {
            intent: CompletionIntent::LabelValue {
                label: label.to_string(),
                quote: QuoteStyle::Single,
            },
            anchor: tree.range(node)?.from,
            branch: ResolutionBranch::TreeLabelValue,
        })
    }

    /// Cursor anywhere inside a pipeline expression
    fn pipeline(
        tree: &dyn SyntaxTree,
        text: &str,
        node: NodeId,
        cursor: usize,
    ) -> Option<ResolvedContext> {
        let in_pipeline = tree
            .ancestors(node)
            .into_iter()
            .any(|id| tree.kind(id) == Some(&NodeKind::PipelineExpr));
        if !in_pipeline {
            return None;
        }

        Some(ResolvedContext {
            intent: CompletionIntent::Contextual(KindFilter::PIPELINE_STAGES),
            anchor: utils::word_start(text, cursor),
            branch: ResolutionBranch::TreePipeline,
        })
    }
}

impl ContextAnalyzer for TreeContextAnalyzer {
    fn analyze(&self, request: &CompletionRequest<'_>, cursor: usize) -> Option<ResolvedContext> {
        let tree = request.tree?;
        let node = tree.resolve_inner(cursor, Side::Before);
        trace!(node = ?tree.kind(node), cursor, "Innermost node at cursor");

        Self::label_matcher(tree, node, cursor)
            .or_else(|| Self::label_value(tree, request.text, node))
            .or_else(|| Self::pipeline(tree, request.text, node, cursor))
    }
}
