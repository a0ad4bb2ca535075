use mdscan_engine::MarkdownToken;

use crate::context::PluginScanContext;
use crate::plugin::{RuleDetails, RulePlugin};

/// More than one consecutive blank line outside code blocks.
///
/// Blank lines inside code blocks are part of the block's text and never
/// arrive as blank-line tokens.
#[derive(Debug, Default)]
pub struct NoMultipleBlanks {
    last_blank_line: usize,
    run: usize,
}

impl NoMultipleBlanks {
    const MAXIMUM: usize = 1;
}

impl RulePlugin for NoMultipleBlanks {
    fn details(&self) -> RuleDetails {
        RuleDetails {
            id: "md012",
            name: "no-multiple-blanks",
            description: "Multiple consecutive blank lines",
            enabled_by_default: true,
        }
    }

    fn starting_new_file(&mut self) {
        self.last_blank_line = 0;
        self.run = 0;
    }

    fn next_token(&mut self, context: &mut PluginScanContext<'_>, token: &MarkdownToken) {
        if !token.is_blank() {
            return;
        }
        let line = token.line_number();
        self.run = if self.run > 0 && line == self.last_blank_line + 1 {
            self.run + 1
        } else {
            1
        };
        self.last_blank_line = line;
        if self.run > Self::MAXIMUM {
            context.report_next_token_error(
                token,
                Some(format!("Expected: {}; Actual: {}", Self::MAXIMUM, self.run)),
            );
        }
    }
}
