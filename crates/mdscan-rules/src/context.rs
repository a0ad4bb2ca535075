use std::fmt;

use mdscan_engine::{MarkdownToken, TokenizedDocument};

use crate::plugin::RuleDetails;

/// One reported problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleViolation {
    pub rule_id: &'static str,
    pub rule_name: &'static str,
    pub line_number: usize,
    pub column_number: usize,
    pub description: String,
    /// Rule-specific detail, such as expected and actual values.
    pub extra: Option<String>,
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}: {}",
            self.line_number, self.column_number, self.rule_id, self.description
        )?;
        if let Some(extra) = &self.extra {
            write!(f, " [{extra}]")?;
        }
        write!(f, " ({})", self.rule_name)
    }
}

/// What a rule can see of the document being scanned, and where it reports.
pub struct PluginScanContext<'a> {
    document: &'a TokenizedDocument,
    lines: &'a [&'a str],
    line_number: usize,
    rule: Option<RuleDetails>,
    violations: Vec<RuleViolation>,
}

impl<'a> PluginScanContext<'a> {
    pub fn new(document: &'a TokenizedDocument, lines: &'a [&'a str]) -> Self {
        Self {
            document,
            lines,
            line_number: 0,
            rule: None,
            violations: vec![],
        }
    }

    pub fn document(&self) -> &'a TokenizedDocument {
        self.document
    }

    /// Source line `line_number` (1-based), without its line ending.
    pub fn line(&self, line_number: usize) -> Option<&'a str> {
        line_number
            .checked_sub(1)
            .and_then(|index| self.lines.get(index))
            .copied()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The line currently being passed to `next_line`.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub(crate) fn set_line_number(&mut self, line_number: usize) {
        self.line_number = line_number;
    }

    pub(crate) fn set_rule(&mut self, rule: RuleDetails) {
        self.rule = Some(rule);
    }

    /// Column of the first content character on `line_number`, given the
    /// whitespace that precedes it after the container prefix.
    pub fn content_column(&self, line_number: usize, leading_whitespace: &str) -> usize {
        let prefix = line_number
            .checked_sub(1)
            .and_then(|index| self.document.line_prefixes.get(index))
            .map_or(0, |p| p.chars().count());
        prefix + leading_whitespace.chars().count() + 1
    }

    pub fn report_error(
        &mut self,
        line_number: usize,
        column_number: usize,
        description: impl Into<String>,
        extra: Option<String>,
    ) {
        let Some(rule) = self.rule else {
            log::warn!("violation reported outside of a rule callback: line {line_number}");
            return;
        };
        self.violations.push(RuleViolation {
            rule_id: rule.id,
            rule_name: rule.name,
            line_number,
            column_number,
            description: description.into(),
            extra,
        });
    }

    /// Reports against the line currently passed to `next_line`.
    pub fn report_next_line_error(&mut self, column_number: usize, extra: Option<String>) {
        let description = self.rule.map_or("", |r| r.description);
        self.report_error(self.line_number, column_number, description, extra);
    }

    /// Reports at the position of `token`.
    pub fn report_next_token_error(&mut self, token: &MarkdownToken, extra: Option<String>) {
        let description = self.rule.map_or("", |r| r.description);
        self.report_error(
            token.line_number(),
            token.column_number(),
            description,
            extra,
        );
    }

    /// Violations sorted by position, then rule id.
    pub fn into_violations(mut self) -> Vec<RuleViolation> {
        self.violations.sort_by(|a, b| {
            (a.line_number, a.column_number, a.rule_id).cmp(&(
                b.line_number,
                b.column_number,
                b.rule_id,
            ))
        });
        self.violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RULE: RuleDetails = RuleDetails {
        id: "md999",
        name: "test-rule",
        description: "Something is off",
        enabled_by_default: true,
    };

    #[test]
    fn violation_display() {
        let violation = RuleViolation {
            rule_id: "md010",
            rule_name: "no-hard-tabs",
            line_number: 3,
            column_number: 5,
            description: "Hard tabs".to_string(),
            extra: Some("Column: 5".to_string()),
        };
        assert_eq!(
            violation.to_string(),
            "3:5: md010: Hard tabs [Column: 5] (no-hard-tabs)"
        );
    }

    #[test]
    fn reports_are_sorted_by_position() {
        let doc = TokenizedDocument::default();
        let lines = ["a", "b"];
        let mut context = PluginScanContext::new(&doc, &lines);
        context.set_rule(RULE);
        context.report_error(2, 1, "second", None);
        context.report_error(1, 4, "first", None);
        let found: Vec<_> = context
            .into_violations()
            .into_iter()
            .map(|v| v.description)
            .collect();
        assert_eq!(found, ["first", "second"]);
    }

    #[test]
    fn line_reports_use_current_line() {
        let doc = TokenizedDocument::default();
        let lines = ["a", "b"];
        let mut context = PluginScanContext::new(&doc, &lines);
        assert_eq!(context.line(2), Some("b"));
        assert_eq!(context.line(0), None);

        context.set_rule(RULE);
        context.set_line_number(2);
        context.report_next_line_error(1, None);
        let violations = context.into_violations();
        assert_eq!(violations[0].line_number, 2);
        assert_eq!(violations[0].description, "Something is off");
    }

    #[test]
    fn reports_without_a_rule_are_dropped() {
        let doc = TokenizedDocument::default();
        let mut context = PluginScanContext::new(&doc, &[]);
        context.report_error(1, 1, "orphan", None);
        assert!(context.into_violations().is_empty());
    }
}
