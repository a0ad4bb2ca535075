//! # Inline Parsing
//!
//! Runs once over a finished block token stream and replaces the `text` token
//! of every paragraph and heading with inline tokens. Text inside code blocks
//! and HTML blocks is left untouched.
//!
//! ## Modules
//!
//! - **`kinds`**: inline constructs owning their delimiters (`CodeSpan`, `HardBreak`)
//! - **`cursor`**: byte `Cursor` over a leaf's joined text
//! - **`parser`**: `InlineSource` and `parse_inline()`
//!
//! ## Raw Zone Precedence
//!
//! Code spans are matched first: `` `a\` `` is a code span containing `a\`,
//! not an escaped backtick.

pub mod cursor;
pub mod kinds;
pub mod parser;

pub use parser::{InlineSource, parse_inline};

use crate::{
    parsing::TokenizedDocument,
    tokens::{BlockKind, MarkdownToken, Position, TokenKind},
};

/// The inline pass.
///
/// Receives the finished block stream of one document and returns the stream
/// with inline tokens in place of leaf text.
pub trait InlineProcessor {
    fn process(&self, doc: &TokenizedDocument) -> Vec<MarkdownToken>;
}

/// Code spans, hard breaks and backslash-escape awareness. Everything else
/// stays `text`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardInlineProcessor;

impl InlineProcessor for StandardInlineProcessor {
    fn process(&self, doc: &TokenizedDocument) -> Vec<MarkdownToken> {
        let mut out = Vec::with_capacity(doc.tokens.len());
        let mut leaf = None;

        for token in &doc.tokens {
            if token.is_end() {
                leaf = None;
            } else if let Some(block) = token.kind.opens_block() {
                if !block.is_container() {
                    leaf = Some(block);
                }
            }

            match (&token.kind, leaf) {
                (
                    TokenKind::Text {
                        text,
                        line_whitespace,
                        end_whitespace,
                    },
                    Some(BlockKind::Paragraph | BlockKind::AtxHeading | BlockKind::SetextHeading),
                ) => {
                    let starts = line_starts(doc, token, line_whitespace);
                    let source = InlineSource::new(text, line_whitespace, end_whitespace, &starts);
                    out.extend(parse_inline(&source));
                }
                _ => out.push(token.clone()),
            }
        }
        out
    }
}

/// Position of the first content character of each line of a text token.
///
/// The first line is where the token says it starts. Later lines start after
/// their container prefix and leading whitespace.
fn line_starts(
    doc: &TokenizedDocument,
    token: &MarkdownToken,
    line_whitespace: &[String],
) -> Vec<Position> {
    let first = token.position.unwrap_or_default();
    line_whitespace
        .iter()
        .enumerate()
        .map(|(offset, ws)| {
            if offset == 0 {
                return first;
            }
            let line_number = first.line_number + offset;
            let prefix = doc
                .line_prefixes
                .get(line_number - 1)
                .map_or(0, |p| p.chars().count());
            Position::new(line_number, prefix + ws.chars().count() + 1)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::tokenize;
    use pretty_assertions::assert_eq;

    fn inline(source: &str) -> Vec<String> {
        let doc = tokenize(source).unwrap();
        StandardInlineProcessor
            .process(&doc)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn paragraph_text_is_split() {
        assert_eq!(
            inline("a `b`\n"),
            [
                "[para(1,1):]",
                "[text(1,1):a :]",
                "[icode-span(1,3):b:1::]",
                "[end-para:::True]"
            ]
        );
    }

    #[test]
    fn code_block_text_is_untouched() {
        let tokens = inline("    a `b`\n");
        assert_eq!(tokens[1], "[text(1,5):a `b`:    ]");
    }

    #[test]
    fn later_lines_count_container_prefixes() {
        let tokens = inline("> a  \n> `b`\n");
        assert_eq!(
            tokens,
            [
                "[block-quote(1,1):]",
                "[para(1,3):]",
                "[text(1,3):a:]",
                "[hard-break(1,4):  ]",
                "[icode-span(2,3):b:1::]",
                "[end-para:::True]",
                "[end-block-quote:::True]"
            ]
        );
    }
}
