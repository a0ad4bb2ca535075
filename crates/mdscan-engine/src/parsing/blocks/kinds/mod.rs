pub mod atx_heading;
pub mod block_quote;
pub mod code_fence;
pub mod front_matter;
pub mod html_block;
pub mod indented_code;
pub mod link_reference;
pub mod list;
pub mod paragraph;
pub mod setext_heading;
pub mod thematic_break;

pub use atx_heading::{AtxHeading, AtxParts};
pub use block_quote::BlockQuote;
pub use code_fence::{CodeFence, FenceClosing, FenceKind, FenceOpening};
pub use front_matter::{FrontMatter, FrontMatterBlock};
pub use html_block::HtmlBlock;
pub use indented_code::IndentedCode;
pub use link_reference::{LinkDefinition, LinkReference};
pub use list::{List, ListMarker};
pub use paragraph::Paragraph;
pub use setext_heading::{SetextHeading, SetextUnderline};
pub use thematic_break::ThematicBreak;
