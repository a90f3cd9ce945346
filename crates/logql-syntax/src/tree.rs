//! Tree navigation contract

use serde::{Deserialize, Serialize};

use crate::kind::NodeKind;

/// Handle of a node inside one tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Handle for index `index` of the implementor's node storage
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Raw index
    pub fn index(self) -> usize {
        self.0
    }
}

/// Half-open byte range `[from, to)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRange {
    pub from: usize,
    pub to: usize,
}

impl TextRange {
    /// Create a new range
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.to.saturating_sub(self.from)
    }

    /// Whether the range is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Source text covered by the range, if it lies on character boundaries
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.from..self.to)
    }
}

/// Which boundary a cursor position may touch when resolving a node
///
/// A cursor sitting exactly between two nodes could belong to either.
/// `Before` enters the node that ends at the cursor, `After` the node
/// that starts at it, `Around` both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    Before,
    Around,
    After,
}

impl Side {
    /// Lezer-style numeric side (-1, 0, 1)
    pub fn from_bias(bias: i8) -> Self {
        match bias {
            b if b < 0 => Side::Before,
            0 => Side::Around,
            _ => Side::After,
        }
    }

    fn enters(self, range: TextRange, pos: usize) -> bool {
        let starts_ok = match self {
            Side::Before => range.from < pos,
            Side::Around | Side::After => range.from <= pos,
        };
        let ends_ok = match self {
            Side::After => range.to > pos,
            Side::Around | Side::Before => range.to >= pos,
        };
        starts_ok && ends_ok
    }
}

/// One node of a syntax tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub range: TextRange,
    /// Set for unrecoverable parse regions
    pub is_error: bool,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// Read-only view of a parsed document
///
/// Implementors only need [`root`](SyntaxTree::root) and
/// [`node`](SyntaxTree::node); navigation is derived from the parent and
/// children links.
///
/// Those links must form a tree: every parent chain ends at the root and
/// no node is its own descendant. [`resolve_inner`](SyntaxTree::resolve_inner)
/// and [`ancestors`](SyntaxTree::ancestors) follow them without a visited set
/// and do not terminate on a cycle.
pub trait SyntaxTree: Send + Sync {
    /// Root node
    fn root(&self) -> NodeId;

    /// Node by handle
    fn node(&self, id: NodeId) -> Option<&SyntaxNode>;

    /// Kind of `id`
    fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.node(id).map(|node| &node.kind)
    }

    /// Range of `id`
    fn range(&self, id: NodeId) -> Option<TextRange> {
        self.node(id).map(|node| node.range)
    }

    /// Parent of `id`
    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.parent)
    }

    /// Sibling immediately before `id`
    fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.node(self.parent(id)?)?;
        let position = parent.children.iter().position(|child| *child == id)?;
        position
            .checked_sub(1)
            .and_then(|before| parent.children.get(before).copied())
    }

    /// First direct child of `id` with the given kind
    fn child_of_kind(&self, id: NodeId, kind: &NodeKind) -> Option<NodeId> {
        self.node(id)?
            .children
            .iter()
            .copied()
            .find(|child| self.kind(*child) == Some(kind))
    }

    /// Innermost node covering `pos`
    ///
    /// Falls back to the root when no child qualifies.
    fn resolve_inner(&self, pos: usize, side: Side) -> NodeId {
        let mut current = self.root();
        loop {
            let next = self.node(current).and_then(|node| {
                node.children.iter().copied().find(|child| {
                    self.range(*child)
                        .is_some_and(|range| side.enters(range, pos))
                })
            });
            match next {
                Some(child) => current = child,
                None => return current,
            }
        }
    }

    /// Ancestors of `id`, nearest first, including `id` itself
    fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = vec![id];
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            chain.push(parent);
            current = parent;
        }
        chain
    }

    /// Visit every node in document order (pre-order, depth first)
    fn iterate(&self, visitor: &mut dyn FnMut(NodeId, &SyntaxNode)) {
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.node(id) {
                visitor(id, node);
                stack.extend(node.children.iter().rev().copied());
            }
        }
    }
}
