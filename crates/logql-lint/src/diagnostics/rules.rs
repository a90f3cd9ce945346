//! Structural LogQL rules
//!
//! Each check is independent and scans the whole document.

use logql_syntax::SyntaxTree;

use crate::types::{Diagnostic, LintRule};

/// Odd number of `"` anywhere in the document
///
/// Escaped quotes and quotes inside backtick strings are counted too.
pub fn check_quotes(text: &str) -> Vec<Diagnostic> {
    let quotes = text.bytes().filter(|byte| *byte == b'"').count();
    if quotes % 2 == 0 {
        return Vec::new();
    }
    vec![Diagnostic::error(
        LintRule::Quotes,
        0,
        text.len(),
        "Unclosed double quote",
    )]
}

fn closer_for(opener: u8) -> u8 {
    match opener {
        b'{' => b'}',
        b'(' => b')',
        _ => b']',
    }
}

/// Unexpected, mismatched and unclosed `{ ( [`
pub fn check_brackets(text: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut stack: Vec<(u8, usize)> = Vec::new();

    for (i, byte) in text.bytes().enumerate() {
        match byte {
            b'{' | b'(' | b'[' => stack.push((byte, i)),
            b'}' | b')' | b']' => match stack.pop() {
                None => diagnostics.push(Diagnostic::error(
                    LintRule::Brackets,
                    i,
                    i + 1,
                    format!("Unexpected closing bracket '{}'", byte as char),
                )),
                Some((opener, pos)) if closer_for(opener) != byte => {
                    diagnostics.push(Diagnostic::error(
                        LintRule::Brackets,
                        pos,
                        pos + 1,
                        format!("Mismatched bracket '{}'", opener as char),
                    ))
                }
                Some(_) => {}
            },
            _ => {}
        }
    }

    diagnostics.extend(stack.into_iter().map(|(opener, pos)| {
        Diagnostic::error(
            LintRule::Brackets,
            pos,
            pos + 1,
            format!("Unclosed bracket '{}'", opener as char),
        )
    }));

    diagnostics
}

/// Error nodes reported by the parser
pub fn check_parse_errors(text: &str, tree: &dyn SyntaxTree) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    tree.iterate(&mut |_, node| {
        if !node.is_error {
            return;
        }
        let to = node.range.to.min(text.len());
        let from = node.range.from.min(to);
        let snippet = text.get(from..to).unwrap_or_default();
        diagnostics.push(Diagnostic::error(
            LintRule::ParseErrors,
            from,
            to,
            format!("Syntax error: {}", snippet),
        ));
    });
    diagnostics
}

/// First `{}` in the document
pub fn check_empty_selector(text: &str) -> Vec<Diagnostic> {
    text.find("{}")
        .map(|start| {
            Diagnostic::warning(
                LintRule::EmptySelector,
                start,
                start + 2,
                "Empty selector {} will match all logs, which may be inefficient",
            )
        })
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use logql_syntax::{NodeKind, TreeBuilder};

    fn messages(diagnostics: &[Diagnostic]) -> Vec<&str> {
        diagnostics.iter().map(|d| d.message.as_str()).collect()
    }

    #[test]
    fn test_balanced_quotes() {
        assert!(check_quotes("\"\"").is_empty());
        assert!(check_quotes("{job=\"x\"}").is_empty());
    }

    #[test]
    fn test_unclosed_quote_spans_document() {
        let diagnostics = check_quotes("{job=\"x}");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!((diagnostics[0].from, diagnostics[0].to), (0, 8));
        assert_eq!(diagnostics[0].message, "Unclosed double quote");
    }

    #[test]
    fn test_escaped_quote_still_counts() {
        assert_eq!(check_quotes(r#"{msg="a\"b"}"#).len(), 1);
    }

    #[test]
    fn test_unclosed_bracket() {
        let diagnostics = check_brackets("{job=\"x\"}{");
        assert_eq!(messages(&diagnostics), vec!["Unclosed bracket '{'"]);
        assert_eq!((diagnostics[0].from, diagnostics[0].to), (9, 10));
    }

    #[test]
    fn test_mismatched_bracket_reports_opener() {
        let diagnostics = check_brackets("(]");
        assert_eq!(messages(&diagnostics), vec!["Mismatched bracket '('"]);
        assert_eq!((diagnostics[0].from, diagnostics[0].to), (0, 1));
    }

    #[test]
    fn test_unexpected_closer() {
        let diagnostics = check_brackets("rate(x))");
        assert_eq!(messages(&diagnostics), vec!["Unexpected closing bracket ')'"]);
        assert_eq!(diagnostics[0].from, 7);
    }

    #[test]
    fn test_unclosed_in_stack_order() {
        let diagnostics = check_brackets("sum(rate({");
        assert_eq!(
            messages(&diagnostics),
            vec![
                "Unclosed bracket '('",
                "Unclosed bracket '('",
                "Unclosed bracket '{'"
            ]
        );
        let starts: Vec<_> = diagnostics.iter().map(|d| d.from).collect();
        assert_eq!(starts, vec![3, 8, 9]);
    }

    #[test]
    fn test_empty_selector_only_first() {
        let diagnostics = check_empty_selector("{} or {}");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!((diagnostics[0].from, diagnostics[0].to), (0, 2));
        assert!(check_empty_selector("{job=\"x\"}").is_empty());
    }

    #[test]
    fn test_parse_error_nodes() {
        let text = "{job=\"x\"} |= ";
        let mut builder = TreeBuilder::new(NodeKind::from_name("LogQL"), text.len());
        builder
            .open(NodeKind::Selector, 0)
            .close(9)
            .error(10, 13);
        let tree = builder.finish().unwrap();

        let diagnostics = check_parse_errors(text, &tree);
        assert_eq!(messages(&diagnostics), vec!["Syntax error: |= "]);
        assert_eq!((diagnostics[0].from, diagnostics[0].to), (10, 13));
    }
}
