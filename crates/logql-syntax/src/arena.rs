//! Owned, vector-backed syntax tree

use thiserror::Error;
use tracing::trace;

use crate::{
    kind::NodeKind,
    tree::{NodeId, SyntaxNode, SyntaxTree, TextRange},
};

/// Errors raised while assembling a tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("close() called with no open node")]
    CloseWithoutOpen,

    #[error("{0} node(s) left open")]
    Unclosed(usize),

    #[error("Inverted range [{from}, {to})")]
    InvertedRange { from: usize, to: usize },

    #[error("Node {kind} [{from}, {to}) lies outside its parent")]
    OutsideParent { kind: String, from: usize, to: usize },
}

/// Syntax tree stored as a flat node vector; index 0 is the root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArenaTree {
    nodes: Vec<SyntaxNode>,
}

impl ArenaTree {
    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl SyntaxTree for ArenaTree {
    fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn node(&self, id: NodeId) -> Option<&SyntaxNode> {
        self.nodes.get(id.0)
    }
}

/// Incremental builder for [`ArenaTree`]
///
/// Nodes are opened and closed in document order, mirroring how a parser
/// emits them:
///
/// ```
/// use logql_syntax::{NodeKind, SyntaxTree, TreeBuilder};
///
/// // {job="api"}
/// let mut builder = TreeBuilder::new(NodeKind::from_name("LogQL"), 11);
/// builder
///     .open(NodeKind::Selector, 0)
///     .open(NodeKind::LabelMatcher, 1)
///     .leaf(NodeKind::LabelName, 1, 4)
///     .leaf(NodeKind::Operator, 4, 5)
///     .leaf(NodeKind::String, 5, 10)
///     .close(10)
///     .close(11);
/// let tree = builder.finish().unwrap();
/// assert_eq!(tree.len(), 6);
/// ```
#[derive(Debug)]
pub struct TreeBuilder {
    nodes: Vec<SyntaxNode>,
    open: Vec<NodeId>,
    error: Option<TreeError>,
}

impl TreeBuilder {
    /// Start a tree whose root spans `[0, len)`
    pub fn new(root: NodeKind, len: usize) -> Self {
        Self {
            nodes: vec![SyntaxNode {
                kind: root,
                range: TextRange::new(0, len),
                is_error: false,
                parent: None,
                children: Vec::new(),
            }],
            open: Vec::new(),
            error: None,
        }
    }

    /// Open a node at `from`; its end is set by the matching [`close`](Self::close)
    pub fn open(&mut self, kind: NodeKind, from: usize) -> &mut Self {
        let id = self.push(kind, TextRange::new(from, from), false);
        self.open.push(id);
        self
    }

    /// Close the most recently opened node at `to`
    pub fn close(&mut self, to: usize) -> &mut Self {
        match self.open.pop() {
            Some(id) => {
                let from = self.nodes[id.0].range.from;
                if to < from {
                    self.fail(TreeError::InvertedRange { from, to });
                }
                self.nodes[id.0].range.to = to.max(from);
            }
            None => self.fail(TreeError::CloseWithoutOpen),
        }
        self
    }

    /// Add a childless node
    pub fn leaf(&mut self, kind: NodeKind, from: usize, to: usize) -> &mut Self {
        self.checked_leaf(kind, from, to, false)
    }

    /// Add an error node covering `[from, to)`
    pub fn error(&mut self, from: usize, to: usize) -> &mut Self {
        self.checked_leaf(NodeKind::Error, from, to, true)
    }

    /// Flag the most recently added node as an error region
    pub fn mark_error(&mut self) -> &mut Self {
        if let Some(node) = self.nodes.last_mut() {
            node.is_error = true;
        }
        self
    }

    /// Validate and produce the tree
    pub fn finish(self) -> Result<ArenaTree, TreeError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        if !self.open.is_empty() {
            return Err(TreeError::Unclosed(self.open.len()));
        }

        for node in &self.nodes {
            if let Some(parent) = node.parent {
                let outer = self.nodes[parent.0].range;
                if node.range.from < outer.from || node.range.to > outer.to {
                    return Err(TreeError::OutsideParent {
                        kind: node.kind.to_string(),
                        from: node.range.from,
                        to: node.range.to,
                    });
                }
            }
        }

        trace!(nodes = self.nodes.len(), "syntax tree assembled");
        Ok(ArenaTree { nodes: self.nodes })
    }

    fn checked_leaf(&mut self, kind: NodeKind, from: usize, to: usize, is_error: bool) -> &mut Self {
        if to < from {
            self.fail(TreeError::InvertedRange { from, to });
            return self;
        }
        self.push(kind, TextRange::new(from, to), is_error);
        self
    }

    fn push(&mut self, kind: NodeKind, range: TextRange, is_error: bool) -> NodeId {
        let id = NodeId(self.nodes.len());
        let parent = self.open.last().copied().unwrap_or(NodeId(0));
        self.nodes.push(SyntaxNode {
            kind,
            range,
            is_error,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    fn fail(&mut self, error: TreeError) {
        self.error.get_or_insert(error);
    }
}
