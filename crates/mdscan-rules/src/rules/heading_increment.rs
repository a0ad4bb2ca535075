use mdscan_engine::MarkdownToken;

use crate::context::PluginScanContext;
use crate::plugin::{RuleDetails, RulePlugin};

/// Heading levels may only go up one at a time.
#[derive(Debug, Default)]
pub struct HeadingIncrement {
    last_level: Option<usize>,
}

impl RulePlugin for HeadingIncrement {
    fn details(&self) -> RuleDetails {
        RuleDetails {
            id: "md001",
            name: "heading-increment",
            description: "Heading levels should only increment by one level at a time",
            enabled_by_default: true,
        }
    }

    fn starting_new_file(&mut self) {
        self.last_level = None;
    }

    fn next_token(&mut self, context: &mut PluginScanContext<'_>, token: &MarkdownToken) {
        let Some(level) = token.heading_level() else {
            return;
        };
        if let Some(last) = self.last_level
            && level > last + 1
        {
            context.report_next_token_error(
                token,
                Some(format!("Expected: h{}; Actual: h{level}", last + 1)),
            );
        }
        self.last_level = Some(level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::scan;
    use pretty_assertions::assert_eq;

    #[test]
    fn skipped_level() {
        assert_eq!(
            scan(HeadingIncrement::default(), "# a\n\n### b\n"),
            ["3:1: md001: Heading levels should only increment by one level at a time \
              [Expected: h2; Actual: h3] (heading-increment)"]
        );
    }

    #[test]
    fn setext_levels_count() {
        assert!(scan(HeadingIncrement::default(), "a\n===\n\nb\n---\n\n### c\n").is_empty());
    }

    #[test]
    fn going_back_down_is_fine() {
        assert!(scan(HeadingIncrement::default(), "# a\n## b\n### c\n# d\n## e\n").is_empty());
    }

    #[test]
    fn first_heading_may_be_any_level() {
        assert!(scan(HeadingIncrement::default(), "### a\n").is_empty());
    }
}
