use crate::context::PluginScanContext;
use crate::plugin::{RuleDetails, RulePlugin};

/// Non-empty documents must end with a newline.
#[derive(Debug, Default)]
pub struct SingleTrailingNewline;

impl RulePlugin for SingleTrailingNewline {
    fn details(&self) -> RuleDetails {
        RuleDetails {
            id: "md047",
            name: "single-trailing-newline",
            description: "Files should end with a single newline character",
            enabled_by_default: true,
        }
    }

    fn completed_file(&mut self, context: &mut PluginScanContext<'_>) {
        if context.document().ends_with_newline {
            return;
        }
        let last = context.line_count();
        let Some(line) = context.line(last) else {
            return;
        };
        let column = line.chars().count() + 1;
        let description = self.details().description;
        context.report_error(last, column, description, None);
    }
}
