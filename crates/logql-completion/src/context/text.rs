//! Text heuristics for when no tree is available or the tree is not decisive

use std::sync::OnceLock;

use regex::Regex;

use super::analyzer::ContextAnalyzer;
use super::utils;
use crate::types::{
    CompletionIntent, CompletionRequest, QuoteStyle, ResolutionBranch, ResolvedContext,
};

static LABEL_EQUALS: OnceLock<Option<Regex>> = OnceLock::new();

/// `name=` at the very end of a line
fn label_equals() -> Option<&'static Regex> {
    LABEL_EQUALS
        .get_or_init(|| Regex::new(r"([A-Za-z0-9_]+)=$").ok())
        .as_ref()
}

/// Context analyzer working on the text before the cursor
#[derive(Debug, Clone, Copy, Default)]
pub struct TextContextAnalyzer;

impl TextContextAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Label name or value inside an unclosed `{`
    fn inside_braces(before: &str, line: &str, cursor: usize) -> Option<ResolvedContext> {
        let open = before.rfind('{')?;
        if before.rfind('}').is_some_and(|close| close > open) {
            return None;
        }

        let in_braces = &before[open + 1..];
        let trimmed = line.trim();
        if !in_braces.contains('=') || trimmed.ends_with(',') || trimmed.ends_with('{') {
            return Some(ResolvedContext {
                intent: CompletionIntent::LabelName,
                anchor: cursor,
                branch: ResolutionBranch::TextLabelName,
            });
        }

        let captures = label_equals()?.captures(line)?;
        let label = captures.get(1)?.as_str();
        Some(ResolvedContext {
            intent: CompletionIntent::LabelValue {
                label: label.to_string(),
                quote: QuoteStyle::Double,
            },
            anchor: cursor,
            branch: ResolutionBranch::TextLabelValue,
        })
    }

    /// The word being typed, or an explicit request on a blank spot
    fn word(text: &str, cursor: usize, explicit: bool) -> Option<ResolvedContext> {
        let start = utils::word_start(text, cursor);
        if start == cursor && !explicit {
            return None;
        }
        Some(ResolvedContext {
            intent: CompletionIntent::StaticKeyword,
            anchor: start,
            branch: ResolutionBranch::Word,
        })
    }
}

impl ContextAnalyzer for TextContextAnalyzer {
    fn analyze(&self, request: &CompletionRequest<'_>, cursor: usize) -> Option<ResolvedContext> {
        let before = &request.text[..cursor];
        let line = utils::line_before(request.text, cursor);

        Self::inside_braces(before, line, cursor)
            .or_else(|| Self::word(request.text, cursor, request.explicit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(text: &str) -> Option<ResolvedContext> {
        let request = CompletionRequest::new(text, text.len());
        TextContextAnalyzer.analyze(&request, text.len())
    }

    fn intent(text: &str) -> Option<CompletionIntent> {
        analyze(text).map(|context| context.intent)
    }

    #[test]
    fn test_open_brace_starts_label() {
        assert_eq!(intent("{"), Some(CompletionIntent::LabelName));
        assert_eq!(intent("{jo"), Some(CompletionIntent::LabelName));
    }

    #[test]
    fn test_label_equals_asks_for_values() {
        assert_eq!(
            intent("{job="),
            Some(CompletionIntent::LabelValue {
                label: "job".into(),
                quote: QuoteStyle::Double
            })
        );
        assert_eq!(
            intent("{job=\"api\", level="),
            Some(CompletionIntent::LabelValue {
                label: "level".into(),
                quote: QuoteStyle::Double
            })
        );
    }

    #[test]
    fn test_comma_starts_next_label() {
        let context = analyze("{job=\"x\",").unwrap();
        assert_eq!(context.intent, CompletionIntent::LabelName);
        assert_eq!(context.branch, ResolutionBranch::TextLabelName);
        assert_eq!(context.anchor, 9);

        assert_eq!(intent("{job=\"x\", "), Some(CompletionIntent::LabelName));
    }

    #[test]
    fn test_mid_value_falls_through_to_word() {
        let context = analyze("{job=\"ap").unwrap();
        assert_eq!(context.intent, CompletionIntent::StaticKeyword);
        assert_eq!(context.branch, ResolutionBranch::Word);
        assert_eq!(context.anchor, 6);
    }

    #[test]
    fn test_closed_braces_use_words() {
        let context = analyze("{job=\"x\"} | js").unwrap();
        assert_eq!(context.intent, CompletionIntent::StaticKeyword);
        assert_eq!(context.anchor, 12);
    }

    #[test]
    fn test_blank_position_needs_explicit_trigger() {
        assert_eq!(analyze("{job=\"x\"} | "), None);

        let text = "{job=\"x\"} | ";
        let request = CompletionRequest::new(text, text.len()).explicit(true);
        let context = TextContextAnalyzer.analyze(&request, text.len()).unwrap();
        assert_eq!(context.intent, CompletionIntent::StaticKeyword);
        assert_eq!(context.anchor, text.len());
    }

    #[test]
    fn test_braces_span_lines() {
        // only the current line is checked for a trailing comma
        assert_eq!(intent("{job=\"x\",\n"), None);
        assert_eq!(
            intent("{job=\"x\",\nlevel="),
            Some(CompletionIntent::LabelValue {
                label: "level".into(),
                quote: QuoteStyle::Double
            })
        );
    }
}
