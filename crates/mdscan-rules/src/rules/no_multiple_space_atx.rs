use mdscan_engine::{MarkdownToken, TokenKind};

use crate::context::PluginScanContext;
use crate::plugin::{RuleDetails, RulePlugin};

/// More than one space between the opening hashes and the heading text.
#[derive(Debug, Default)]
pub struct NoMultipleSpaceAtx;

impl RulePlugin for NoMultipleSpaceAtx {
    fn details(&self) -> RuleDetails {
        RuleDetails {
            id: "md019",
            name: "no-multiple-space-atx",
            description: "Multiple spaces after hash on atx style heading",
            enabled_by_default: true,
        }
    }

    fn next_token(&mut self, context: &mut PluginScanContext<'_>, token: &MarkdownToken) {
        let TokenKind::AtxHeading { hash_count, .. } = token.kind else {
            return;
        };
        let Some(line) = context.line(token.line_number()) else {
            return;
        };
        let after_hashes: String = line
            .chars()
            .skip(token.column_number().saturating_sub(1) + hash_count)
            .collect();
        let spaces = after_hashes.len() - after_hashes.trim_start_matches([' ', '\t']).len();
        // An empty heading has nothing to be separated from.
        if spaces > 1 && !after_hashes.trim().is_empty() {
            context.report_next_token_error(token, Some(format!("Expected: 1; Actual: {spaces}")));
        }
    }
}
