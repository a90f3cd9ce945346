//! Node categories the completion and lint layers care about

use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of node kinds
///
/// Parsers report node types by name. Names the consumers dispatch on get a
/// dedicated variant; everything else is carried as [`NodeKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// `name op "value"` inside a stream selector
    LabelMatcher,
    /// Label identifier of a matcher
    LabelName,
    /// Quoted string literal
    String,
    /// Comparison operator of a matcher (`=`, `!=`, `=~`, `!~`)
    Operator,
    /// Chain of stages after the stream selector
    PipelineExpr,
    /// `{ ... }` stream selector
    Selector,
    /// Unrecoverable parse region
    Error,
    /// Any other node type, by name
    Other(String),
}

impl NodeKind {
    /// Map a parser node type name onto a kind
    pub fn from_name(name: &str) -> Self {
        match name {
            "LabelMatcher" | "Matcher" => NodeKind::LabelMatcher,
            "LabelName" | "Identifier" => NodeKind::LabelName,
            "String" => NodeKind::String,
            "Operator" | "Eq" | "Neq" | "Re" | "Nre" => NodeKind::Operator,
            "PipelineExpr" => NodeKind::PipelineExpr,
            "Selector" => NodeKind::Selector,
            "⚠" | "ERROR" => NodeKind::Error,
            other => NodeKind::Other(other.to_string()),
        }
    }

    /// Canonical type name
    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::LabelMatcher => "LabelMatcher",
            NodeKind::LabelName => "LabelName",
            NodeKind::String => "String",
            NodeKind::Operator => "Operator",
            NodeKind::PipelineExpr => "PipelineExpr",
            NodeKind::Selector => "Selector",
            NodeKind::Error => "⚠",
            NodeKind::Other(name) => name,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for NodeKind {
    fn from(name: &str) -> Self {
        NodeKind::from_name(name)
    }
}
