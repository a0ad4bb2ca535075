pub mod blocks;
pub mod error;
pub mod inline;
pub mod parser_helper;
pub mod position_marker;
pub mod stack;
pub mod stream;

use log::debug;

pub use error::TokenizerError;
pub use stream::{TokenizedDocument, verify_token_stream};

use blocks::{BlockBuilder, kinds::FrontMatter};

/// Optional extensions. All are disabled by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Recognise a leading `---` metadata block.
    pub front_matter: bool,
}

/// Turns a document into a verified block token stream.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    options: ParseOptions,
}

impl Tokenizer {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    pub fn tokenize(&self, source: &str) -> Result<TokenizedDocument, TokenizerError> {
        let (lines, ends_with_newline) = split_lines(source);
        let mut builder = BlockBuilder::new();

        let mut skip = 0;
        if self.options.front_matter {
            if let Some(block) = FrontMatter::parse(&lines) {
                skip = block.line_count();
                debug!("front matter covers {skip} lines");
                builder.push_front_matter(block);
            }
        }

        for (index, line) in lines.iter().enumerate().skip(skip) {
            builder.push(index + 1, line)?;
        }
        let output = builder.finish()?;
        verify_token_stream(&output.tokens)?;

        debug!(
            "tokenized {} lines into {} tokens",
            lines.len(),
            output.tokens.len()
        );
        Ok(TokenizedDocument {
            tokens: output.tokens,
            line_prefixes: output.line_prefixes,
            ends_with_newline,
        })
    }
}

/// Tokenizes `source` with default options.
pub fn tokenize(source: &str) -> Result<TokenizedDocument, TokenizerError> {
    Tokenizer::default().tokenize(source)
}

/// Splits on `\n`. A single final newline terminates the last line rather than
/// starting an empty one; an empty source has no lines.
pub fn split_lines(source: &str) -> (Vec<&str>, bool) {
    if source.is_empty() {
        return (vec![], false);
    }
    match source.strip_suffix('\n') {
        Some(body) => (body.split('\n').collect(), true),
        None => (source.split('\n').collect(), false),
    }
}
