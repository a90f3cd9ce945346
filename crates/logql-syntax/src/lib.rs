//! LogQL syntax tree contract
//!
//! The grammar and parser live outside this workspace. Whatever produces the
//! tree (a Lezer bridge, a tree-sitter grammar, a hand-written parser) hands
//! the consumers a [`SyntaxTree`]: typed nodes with byte ranges, parent and
//! sibling navigation, and an error flag for unrecoverable regions.
//!
//! [`ArenaTree`] is an owned implementation, filled through [`TreeBuilder`],
//! for embedders that convert their parser's output.

pub mod arena;
pub mod kind;
pub mod tree;

pub use arena::{ArenaTree, TreeBuilder, TreeError};
pub use kind::NodeKind;
pub use tree::{NodeId, Side, SyntaxNode, SyntaxTree, TextRange};
