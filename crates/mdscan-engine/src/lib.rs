//! # mdscan-engine
//!
//! A CommonMark/GFM block tokenizer. A document is consumed line by line over a
//! stack of open block quotes and lists, producing a flat stream of positioned
//! tokens in which every block is bracketed by an opening token and an `end-*`
//! token. The stream carries enough whitespace detail to regenerate the source
//! exactly.
//!
//! ```
//! use mdscan_engine::tokenize;
//!
//! let doc = tokenize("> - item\n").unwrap();
//! let names: Vec<_> = doc.tokens.iter().map(|t| t.name()).collect();
//! assert_eq!(names[..3], ["block-quote", "ulist", "para"]);
//! assert_eq!(doc.to_markdown(), "> - item\n");
//! ```

pub mod parsing;
pub mod tokens;

pub use parsing::{
    ParseOptions, TokenizedDocument, Tokenizer, TokenizerError,
    inline::{InlineProcessor, StandardInlineProcessor},
    split_lines, tokenize, verify_token_stream,
};
pub use tokens::{BlockKind, FieldError, FieldValue, ListKind, MarkdownToken, Position, TokenKind};
