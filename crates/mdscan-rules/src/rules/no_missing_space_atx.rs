use std::sync::OnceLock;

use mdscan_engine::{MarkdownToken, TokenKind};
use regex::Regex;

use crate::context::PluginScanContext;
use crate::plugin::{RuleDetails, RulePlugin};

/// Paragraph lines that look like an ATX heading missing its space, e.g. `#Title`.
#[derive(Debug, Default)]
pub struct NoMissingSpaceAtx {
    in_paragraph: bool,
    at_line_start: bool,
}

fn missing_space() -> &'static Regex {
    static MISSING_SPACE: OnceLock<Regex> = OnceLock::new();
    MISSING_SPACE.get_or_init(|| Regex::new(r"^#{1,6}[^#\s]").expect("Invalid heading regex"))
}

impl RulePlugin for NoMissingSpaceAtx {
    fn details(&self) -> RuleDetails {
        RuleDetails {
            id: "md018",
            name: "no-missing-space-atx",
            description: "No space after hash on atx style heading",
            enabled_by_default: true,
        }
    }

    fn starting_new_file(&mut self) {
        self.in_paragraph = false;
        self.at_line_start = false;
    }

    fn next_token(&mut self, context: &mut PluginScanContext<'_>, token: &MarkdownToken) {
        match &token.kind {
            TokenKind::Paragraph => {
                self.in_paragraph = true;
                self.at_line_start = true;
            }
            TokenKind::End { .. } => self.in_paragraph = false,
            TokenKind::HardBreak { .. } => self.at_line_start = true,
            TokenKind::CodeSpan { .. } => self.at_line_start = false,
            TokenKind::Text {
                text,
                line_whitespace,
                ..
            } if self.in_paragraph => {
                for (offset, piece) in text.split('\n').enumerate() {
                    if offset == 0 && !self.at_line_start {
                        continue;
                    }
                    if !missing_space().is_match(piece) {
                        continue;
                    }
                    let line_number = token.line_number() + offset;
                    let column = if offset == 0 {
                        token.column_number()
                    } else {
                        let leading = line_whitespace.get(offset).map_or("", String::as_str);
                        context.content_column(line_number, leading)
                    };
                    let description = self.details().description;
                    context.report_error(line_number, column, description, None);
                }
                self.at_line_start = false;
            }
            _ => {}
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
    fn hash_without_space() {
        assert_eq!(
            scan(NoMissingSpaceAtx::default(), "#Title\n"),
            ["1:1: md018: No space after hash on atx style heading (no-missing-space-atx)"]
        );
    }

    #[test]
    fn continuation_lines_inside_a_quote() {
        assert_eq!(
            scan(NoMissingSpaceAtx::default(), "> text\n>  ##Sub\n"),
            ["2:4: md018: No space after hash on atx style heading (no-missing-space-atx)"]
        );
    }

    #[rstest]
    #[case::real_heading_and_mid_line_hash("# Title\n\nissue #12\n")]
    #[case::too_many_hashes("#######seven\n")]
    #[case::fenced_code("```\n#include\n```\n")]
    #[case::after_code_span("`a`#b\n")]
    fn not_reported(#[case] source: &str) {
        assert!(scan(NoMissingSpaceAtx::default(), source).is_empty());
    }
}
