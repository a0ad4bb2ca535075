use mdscan_engine::{MarkdownToken, TokenKind};

use crate::context::PluginScanContext;
use crate::plugin::{RuleDetails, RulePlugin};

/// At most one top-level heading per document.
///
/// A `title` key in the front matter counts as the first one.
#[derive(Debug, Default)]
pub struct SingleTitle {
    seen_title: bool,
}

impl SingleTitle {
    const LEVEL: usize = 1;
    const FRONT_MATTER_KEY: &'static str = "title";
}

impl RulePlugin for SingleTitle {
    fn details(&self) -> RuleDetails {
        RuleDetails {
            id: "md025",
            name: "single-title",
            description: "Multiple top-level headings in the same document",
            enabled_by_default: true,
        }
    }

    fn starting_new_file(&mut self) {
        self.seen_title = false;
    }

    fn next_token(&mut self, context: &mut PluginScanContext<'_>, token: &MarkdownToken) {
        if let TokenKind::FrontMatter { matter, .. } = &token.kind {
            self.seen_title = matter
                .iter()
                .any(|(key, _)| key.eq_ignore_ascii_case(Self::FRONT_MATTER_KEY));
            return;
        }
        if token.heading_level() != Some(Self::LEVEL) {
            return;
        }
        if self.seen_title {
            context.report_next_token_error(token, None);
        }
        self.seen_title = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::{scan, scan_with};
    use mdscan_engine::ParseOptions;
    use pretty_assertions::assert_eq;

    #[test]
    fn second_title() {
        assert_eq!(
            scan(SingleTitle::default(), "# One\n\n## Sub\n\nTwo\n===\n"),
            ["5:1: md025: Multiple top-level headings in the same document (single-title)"]
        );
    }

    #[test]
    fn front_matter_title() {
        let options = ParseOptions { front_matter: true };
        let source = "---\ntitle: Doc\n---\n# One\n";
        assert_eq!(scan_with(SingleTitle::default(), source, options).len(), 1);
        assert!(scan(SingleTitle::default(), "# One\n").is_empty());
    }
}
