//! # Inline Kinds
//!
//! Inline constructs that own their delimiters. The parser asks these types;
//! it never hardcodes a backtick or a backslash.

pub mod code_span;
pub mod hard_break;

pub use code_span::CodeSpan;
pub use hard_break::HardBreak;
