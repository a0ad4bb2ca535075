use mdscan_engine::MarkdownToken;

use crate::context::PluginScanContext;
use crate::plugin::{RuleDetails, RulePlugin};

/// Headings indented within their container.
#[derive(Debug, Default)]
pub struct HeadingStartLeft;

impl RulePlugin for HeadingStartLeft {
    fn details(&self) -> RuleDetails {
        RuleDetails {
            id: "md023",
            name: "heading-start-left",
            description: "Headings must start at the beginning of the line",
            enabled_by_default: true,
        }
    }

    fn next_token(&mut self, context: &mut PluginScanContext<'_>, token: &MarkdownToken) {
        if token.is_heading() && !token.extracted_whitespace.is_empty() {
            let indent = token.extracted_whitespace.chars().count();
            context.report_next_token_error(token, Some(format!("Indent: {indent}")));
        }
    }
}
