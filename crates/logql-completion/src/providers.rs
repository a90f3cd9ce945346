//! Static LogQL vocabulary offered alongside remote label data

use crate::types::{KindFilter, Suggestion, SuggestionKind};
use crate::types::SuggestionKind::{Function, Keyword, Operator, Time};

/// One row of the static table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticEntry {
    pub label: &'static str,
    pub kind: SuggestionKind,
    pub description: Option<&'static str>,
    pub insert_text: Option<&'static str>,
}

impl StaticEntry {
    const fn new(label: &'static str, kind: SuggestionKind) -> Self {
        Self {
            label,
            kind,
            description: None,
            insert_text: None,
        }
    }

    const fn described(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    const fn inserting(mut self, insert_text: &'static str) -> Self {
        self.insert_text = Some(insert_text);
        self
    }

    pub fn to_suggestion(&self) -> Suggestion {
        Suggestion {
            label: self.label.to_string(),
            kind: self.kind,
            description: self.description.map(str::to_string),
            insert_text: self.insert_text.map(str::to_string),
        }
    }
}

/// Parsers, formatters, aggregations, grouping, line filters and ranges
pub const STATIC_ENTRIES: &[StaticEntry] = &[
    StaticEntry::new("json", Keyword).described("Parse JSON logs"),
    StaticEntry::new("logfmt", Keyword).described("Parse logfmt logs"),
    StaticEntry::new("pattern", Keyword).described("Parse with pattern"),
    StaticEntry::new("regexp", Keyword).described("Parse with regex"),
    StaticEntry::new("line_format", Function)
        .described("Format log lines")
        .inserting("line_format ''"),
    StaticEntry::new("label_format", Function)
        .described("Rename/format labels")
        .inserting("label_format "),
    StaticEntry::new("rate", Function).described("Calculate events per second"),
    StaticEntry::new("count", Function).described("Count log entries"),
    StaticEntry::new("sum", Function),
    StaticEntry::new("min", Function),
    StaticEntry::new("max", Function),
    StaticEntry::new("avg", Function),
    StaticEntry::new("stddev", Function),
    StaticEntry::new("stdvar", Function),
    StaticEntry::new("bottomk", Function).inserting("bottomk(5, "),
    StaticEntry::new("topk", Function).inserting("topk(5, "),
    StaticEntry::new("by", Keyword).inserting("by ("),
    StaticEntry::new("without", Keyword).inserting("without ("),
    StaticEntry::new("|=", Operator).described("Line contains string"),
    StaticEntry::new("!=", Operator).described("Line does not contain string"),
    StaticEntry::new("|~", Operator).described("Line matches regex"),
    StaticEntry::new("!~", Operator).described("Line does not match regex"),
    StaticEntry::new("[1m]", Time).described("1 minute range"),
    StaticEntry::new("[5m]", Time),
    StaticEntry::new("[15m]", Time),
    StaticEntry::new("[1h]", Time),
    StaticEntry::new("[1d]", Time),
];

/// The whole table, in declaration order
pub fn static_suggestions() -> Vec<Suggestion> {
    STATIC_ENTRIES.iter().map(StaticEntry::to_suggestion).collect()
}

/// Table rows allowed by `filter`, in declaration order
pub fn filtered_suggestions(filter: KindFilter) -> Vec<Suggestion> {
    STATIC_ENTRIES
        .iter()
        .filter(|entry| filter.allows(entry.kind))
        .map(StaticEntry::to_suggestion)
        .collect()
}

/// Label name suggestion: inserts `name=`
pub fn label_suggestion(name: &str) -> Suggestion {
    Suggestion::new(name, SuggestionKind::Label)
        .with_description("Label from Loki")
        .with_insert_text(format!("{}=", name))
}

/// Value suggestion replacing a string literal: label `'value'`
pub fn quoted_value_suggestion(label: &str, value: &str) -> Suggestion {
    Suggestion::new(format!("'{}'", value), SuggestionKind::Value)
        .with_description(format!("Value for {}", label))
}

/// Value suggestion after `label=`: inserts `"value"`
pub fn bare_value_suggestion(label: &str, value: &str) -> Suggestion {
    Suggestion::new(value, SuggestionKind::Value)
        .with_description(format!("Value for {}", label))
        .with_insert_text(format!("\"{}\"", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_shape() {
        assert_eq!(STATIC_ENTRIES.len(), 27);
        let labels: Vec<_> = STATIC_ENTRIES.iter().map(|e| e.label).collect();
        assert_eq!(&labels[..4], &["json", "logfmt", "pattern", "regexp"]);
        assert_eq!(labels.last(), Some(&"[1d]"));
    }

    #[test]
    fn test_insert_texts() {
        let find = |label: &str| {
            STATIC_ENTRIES
                .iter()
                .find(|e| e.label == label)
                .map(StaticEntry::to_suggestion)
                .unwrap()
        };

        assert_eq!(find("line_format").insert_text(), "line_format ''");
        assert_eq!(find("label_format").insert_text(), "label_format ");
        assert_eq!(find("topk").insert_text(), "topk(5, ");
        assert_eq!(find("bottomk").insert_text(), "bottomk(5, ");
        assert_eq!(find("by").insert_text(), "by (");
        assert_eq!(find("without").insert_text(), "without (");
        assert_eq!(find("rate").insert_text(), "rate");
        assert_eq!(find("[5m]").description, None);
    }

    #[test]
    fn test_pipeline_filter_drops_operators_and_ranges() {
        let stages = filtered_suggestions(KindFilter::PIPELINE_STAGES);
        assert_eq!(stages.len(), 18);
        assert!(stages
            .iter()
            .all(|s| matches!(s.kind, SuggestionKind::Keyword | SuggestionKind::Function)));
    }

    #[test]
    fn test_label_and_value_shapes() {
        let label = label_suggestion("job");
        assert_eq!(label.insert_text(), "job=");
        assert_eq!(label.description.as_deref(), Some("Label from Loki"));

        let quoted = quoted_value_suggestion("job", "api");
        assert_eq!(quoted.label, "'api'");
        assert_eq!(quoted.insert_text(), "'api'");
        assert_eq!(quoted.description.as_deref(), Some("Value for job"));

        let bare = bare_value_suggestion("job", "api");
        assert_eq!(bare.label, "api");
        assert_eq!(bare.insert_text(), "\"api\"");
    }
}
