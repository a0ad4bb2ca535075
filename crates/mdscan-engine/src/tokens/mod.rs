//! # Tokens
//!
//! The output vocabulary of the tokenizer: a flat, pre-order serialization of the
//! block tree where every block that can hold content is bracketed by an opening
//! token and a matching `end-*` token.
//!
//! ## Modules
//!
//! - **`types`**: `MarkdownToken`, `TokenKind`, `BlockKind`, `Position`
//! - **`display`**: `[type(line,column):field:...]` debug encoding
//! - **`modify`**: whitelisted field modification (`FieldError`, `FieldValue`)

pub mod display;
pub mod modify;
pub mod types;

pub use modify::{FieldError, FieldValue};
pub use types::{BlockKind, ListKind, MarkdownToken, Position, TokenKind};
