use mdscan_engine::MarkdownToken;

use crate::context::PluginScanContext;

/// Identity and documentation of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleDetails {
    /// Short id, e.g. `md001`.
    pub id: &'static str,
    /// Descriptive name, e.g. `heading-increment`. Also accepted wherever an id is.
    pub name: &'static str,
    pub description: &'static str,
    pub enabled_by_default: bool,
}

impl RuleDetails {
    /// True if `key` names this rule by id or name, ignoring ASCII case.
    pub fn matches(&self, key: &str) -> bool {
        self.id.eq_ignore_ascii_case(key) || self.name.eq_ignore_ascii_case(key)
    }
}

/// A rule checked against one document at a time.
///
/// For each document the manager calls `starting_new_file`, then `next_line`
/// for every source line, then `next_token` for every token of the
/// inline-processed stream, and finally `completed_file`.
pub trait RulePlugin {
    fn details(&self) -> RuleDetails;

    /// Resets per-document state.
    fn starting_new_file(&mut self) {}

    fn next_line(&mut self, _context: &mut PluginScanContext<'_>, _line: &str) {}

    fn next_token(&mut self, _context: &mut PluginScanContext<'_>, _token: &MarkdownToken) {}

    fn completed_file(&mut self, _context: &mut PluginScanContext<'_>) {}
}
