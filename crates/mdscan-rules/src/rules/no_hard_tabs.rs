use crate::context::PluginScanContext;
use crate::plugin::{RuleDetails, RulePlugin};

/// Tab characters anywhere in a line. One report per line, at the first tab.
#[derive(Debug, Default)]
pub struct NoHardTabs;

impl RulePlugin for NoHardTabs {
    fn details(&self) -> RuleDetails {
        RuleDetails {
            id: "md010",
            name: "no-hard-tabs",
            description: "Hard tabs",
            enabled_by_default: true,
        }
    }

    fn next_line(&mut self, context: &mut PluginScanContext<'_>, line: &str) {
        if let Some(index) = line.find('\t') {
            let column = line[..index].chars().count() + 1;
            context.report_next_line_error(column, Some(format!("Column: {column}")));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::scan;
    use pretty_assertions::assert_eq;

    #[test]
    fn tabs_are_reported_per_line() {
        assert_eq!(
            scan(NoHardTabs, "a\tb\tc\n\tcode\nok\n"),
            [
                "1:2: md010: Hard tabs [Column: 2] (no-hard-tabs)",
                "2:1: md010: Hard tabs [Column: 1] (no-hard-tabs)",
            ]
        );
    }

    #[test]
    fn columns_count_characters() {
        assert_eq!(
            scan(NoHardTabs, "é\tx\n"),
            ["1:2: md010: Hard tabs [Column: 2] (no-hard-tabs)"]
        );
    }
}
