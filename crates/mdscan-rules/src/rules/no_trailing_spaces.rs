use std::collections::HashSet;

use mdscan_engine::{MarkdownToken, TokenKind};

use crate::context::PluginScanContext;
use crate::plugin::{RuleDetails, RulePlugin};

/// Trailing spaces, except the two that make a hard line break.
#[derive(Debug, Default)]
pub struct NoTrailingSpaces {
    /// Line number, column of the first trailing space, and the count.
    candidates: Vec<(usize, usize, usize)>,
    break_lines: HashSet<usize>,
}

impl NoTrailingSpaces {
    const BREAK_SPACES: usize = 2;
}

impl RulePlugin for NoTrailingSpaces {
    fn details(&self) -> RuleDetails {
        RuleDetails {
            id: "md009",
            name: "no-trailing-spaces",
            description: "Trailing spaces",
            enabled_by_default: true,
        }
    }

    fn starting_new_file(&mut self) {
        self.candidates.clear();
        self.break_lines.clear();
    }

    fn next_line(&mut self, context: &mut PluginScanContext<'_>, line: &str) {
        let content = line.trim_end_matches(' ');
        let count = line.len() - content.len();
        if count > 0 {
            let column = content.chars().count() + 1;
            self.candidates.push((context.line_number(), column, count));
        }
    }

    fn next_token(&mut self, _context: &mut PluginScanContext<'_>, token: &MarkdownToken) {
        if let TokenKind::HardBreak { line_end } = &token.kind
            && line_end.ends_with(' ')
        {
            self.break_lines.insert(token.line_number());
        }
    }

    fn completed_file(&mut self, context: &mut PluginScanContext<'_>) {
        let description = self.details().description;
        for &(line_number, column, count) in &self.candidates {
            if count == Self::BREAK_SPACES && self.break_lines.contains(&line_number) {
                continue;
            }
            context.report_error(
                line_number,
                column,
                description,
                Some(format!("Expected: 0 or {}; Actual: {count}", Self::BREAK_SPACES)),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::scan;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn single_trailing_space() {
        assert_eq!(
            scan(NoTrailingSpaces::default(), "foo \nbar\n"),
            ["1:4: md009: Trailing spaces [Expected: 0 or 2; Actual: 1] (no-trailing-spaces)"]
        );
    }

    #[rstest]
    #[case::hard_break("foo  \nbar\n", 0)]
    // Last line of a paragraph and a heading: no hard break possible.
    #[case::no_break_possible("foo  \n\n# bar  \n", 2)]
    #[case::whitespace_only_line("a\n   \nb\n", 1)]
    #[case::link_definition("[a]: /b  \ntext\n", 1)]
    fn violation_count(#[case] source: &str, #[case] expected: usize) {
        assert_eq!(scan(NoTrailingSpaces::default(), source).len(), expected);
    }

    #[test]
    fn three_spaces_are_reported_even_as_a_break() {
        assert_eq!(
            scan(NoTrailingSpaces::default(), "foo   \nbar\n"),
            ["1:4: md009: Trailing spaces [Expected: 0 or 2; Actual: 3] (no-trailing-spaces)"]
        );
    }
}
