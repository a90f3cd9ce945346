//! Completion data model

use logql_syntax::SyntaxTree;
use serde::{Deserialize, Serialize};

/// Category of a suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Keyword,
    Function,
    Operator,
    Time,
    Label,
    Value,
}

/// One completion option offered to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Text shown in the popup
    pub label: String,
    pub kind: SuggestionKind,
    /// Human-readable detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Text inserted on accept; `label` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insert_text: Option<String>,
}

impl Suggestion {
    /// Create a suggestion with no description and default insert text
    pub fn new(label: impl Into<String>, kind: SuggestionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            description: None,
            insert_text: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_insert_text(mut self, insert_text: impl Into<String>) -> Self {
        self.insert_text = Some(insert_text.into());
        self
    }

    /// Text to insert on accept
    pub fn insert_text(&self) -> &str {
        self.insert_text.as_deref().unwrap_or(&self.label)
    }
}

/// How label values are quoted when suggested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteStyle {
    /// `'value'` as the suggestion label, replacing an existing string literal
    Single,
    /// bare label, `"value"` inserted after a trailing `=`
    Double,
}

/// Restriction of the static table to certain kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindFilter {
    kinds: &'static [SuggestionKind],
}

impl KindFilter {
    /// Pipeline stage names: parsers, formatters and functions
    pub const PIPELINE_STAGES: KindFilter = KindFilter {
        kinds: &[SuggestionKind::Keyword, SuggestionKind::Function],
    };

    /// Whether suggestions of `kind` pass the filter
    pub fn allows(&self, kind: SuggestionKind) -> bool {
        self.kinds.contains(&kind)
    }
}

/// What kind of suggestion the cursor position calls for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionIntent {
    /// The full static table
    StaticKeyword,
    /// Label names from the data source
    LabelName,
    /// Values of one label from the data source
    LabelValue { label: String, quote: QuoteStyle },
    /// A subset of the static table
    Contextual(KindFilter),
}

/// Which rule of the resolution chain matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResolutionBranch {
    TreeLabelMatcher,
    TreeLabelValue,
    TreePipeline,
    TextLabelName,
    TextLabelValue,
    Word,
}

/// Outcome of classifying a cursor position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContext {
    pub intent: CompletionIntent,
    /// Byte offset where replacement begins
    pub anchor: usize,
    pub branch: ResolutionBranch,
}

/// Input of a completion request
#[derive(Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub text: &'a str,
    /// Byte offset of the insertion point
    pub cursor: usize,
    pub tree: Option<&'a dyn SyntaxTree>,
    /// The user asked for completion explicitly rather than by typing
    pub explicit: bool,
}

impl<'a> CompletionRequest<'a> {
    /// Text-only request
    pub fn new(text: &'a str, cursor: usize) -> Self {
        Self {
            text,
            cursor,
            tree: None,
            explicit: false,
        }
    }

    pub fn with_tree(mut self, tree: &'a dyn SyntaxTree) -> Self {
        self.tree = Some(tree);
        self
    }

    pub fn explicit(mut self, explicit: bool) -> Self {
        self.explicit = explicit;
        self
    }
}

impl std::fmt::Debug for CompletionRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionRequest")
            .field("text", &self.text)
            .field("cursor", &self.cursor)
            .field("has_tree", &self.tree.is_some())
            .field("explicit", &self.explicit)
            .finish()
    }
}

/// Suggestions plus the offset they replace from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionList {
    pub anchor: usize,
    pub suggestions: Vec<Suggestion>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_text_defaults_to_label() {
        let plain = Suggestion::new("json", SuggestionKind::Keyword);
        assert_eq!(plain.insert_text(), "json");

        let custom = plain.with_insert_text("json ");
        assert_eq!(custom.insert_text(), "json ");
    }

    #[test]
    fn test_pipeline_filter() {
        let filter = KindFilter::PIPELINE_STAGES;
        assert!(filter.allows(SuggestionKind::Keyword));
        assert!(filter.allows(SuggestionKind::Function));
        assert!(!filter.allows(SuggestionKind::Operator));
        assert!(!filter.allows(SuggestionKind::Time));
    }

    #[test]
    fn test_suggestion_serializes_without_empty_fields() {
        let json = serde_json::to_string(&Suggestion::new("rate", SuggestionKind::Function)).unwrap();
        assert_eq!(json, r#"{"label":"rate","kind":"function"}"#);
    }
}
