//! # Token Stream
//!
//! The finished result of tokenizing one document, plus the services built on
//! the stream: the balance check run before a stream is handed out, and the
//! regeneration of the exact source text.

pub mod regenerate;
pub mod verify;

pub use verify::verify_token_stream;

use crate::tokens::MarkdownToken;

/// A tokenized document.
///
/// `line_prefixes[i]` holds the container prefix text (block quote markers,
/// list indentation) of source line `i + 1`; the tokens carry everything else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenizedDocument {
    pub tokens: Vec<MarkdownToken>,
    pub line_prefixes: Vec<String>,
    pub ends_with_newline: bool,
}

impl TokenizedDocument {
    pub fn line_count(&self) -> usize {
        self.line_prefixes.len()
    }

    /// Rebuilds the source text the tokens were produced from.
    pub fn to_markdown(&self) -> String {
        regenerate::to_markdown(self)
    }

    /// The `Display` encoding of every token, one string per token.
    pub fn serialized(&self) -> Vec<String> {
        self.tokens.iter().map(ToString::to_string).collect()
    }
}
