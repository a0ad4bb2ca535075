//! Built-in rules, one module per rule.

mod fenced_code_language;
mod heading_increment;
mod heading_start_left;
mod no_hard_tabs;
mod no_missing_space_atx;
mod no_multiple_blanks;
mod no_multiple_space_atx;
mod no_trailing_spaces;
mod single_title;
mod single_trailing_newline;

pub use fenced_code_language::FencedCodeLanguage;
pub use heading_increment::HeadingIncrement;
pub use heading_start_left::HeadingStartLeft;
pub use no_hard_tabs::NoHardTabs;
pub use no_missing_space_atx::NoMissingSpaceAtx;
pub use no_multiple_blanks::NoMultipleBlanks;
pub use no_multiple_space_atx::NoMultipleSpaceAtx;
pub use no_trailing_spaces::NoTrailingSpaces;
pub use single_title::SingleTitle;
pub use single_trailing_newline::SingleTrailingNewline;

use crate::plugin::RulePlugin;

/// Every built-in rule, ordered by id.
pub fn builtin_rules() -> Vec<Box<dyn RulePlugin>> {
    vec![
        Box::<HeadingIncrement>::default(),
        Box::<NoTrailingSpaces>::default(),
        Box::<NoHardTabs>::default(),
        Box::<NoMultipleBlanks>::default(),
        Box::<NoMissingSpaceAtx>::default(),
        Box::<NoMultipleSpaceAtx>::default(),
        Box::<HeadingStartLeft>::default(),
        Box::<SingleTitle>::default(),
        Box::<FencedCodeLanguage>::default(),
        Box::<SingleTrailingNewline>::default(),
    ]
}
