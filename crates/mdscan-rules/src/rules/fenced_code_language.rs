use mdscan_engine::{MarkdownToken, TokenKind};

use crate::context::PluginScanContext;
use crate::plugin::{RuleDetails, RulePlugin};

/// Fenced code blocks without an info string.
#[derive(Debug, Default)]
pub struct FencedCodeLanguage;

impl RulePlugin for FencedCodeLanguage {
    fn details(&self) -> RuleDetails {
        RuleDetails {
            id: "md040",
            name: "fenced-code-language",
            description: "Fenced code blocks should have a language specified",
            enabled_by_default: true,
        }
    }

    fn next_token(&mut self, context: &mut PluginScanContext<'_>, token: &MarkdownToken) {
        if let TokenKind::FencedCodeBlock { info_string, .. } = &token.kind
            && info_string.trim().is_empty()
        {
            context.report_next_token_error(token, None);
        }
    }
}
