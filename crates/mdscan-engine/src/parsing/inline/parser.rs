use std::ops::Range;

use crate::tokens::{MarkdownToken, Position, TokenKind};

use super::{
    cursor::Cursor,
    kinds::{CodeSpan, HardBreak},
};

/// One line of a leaf's text as the inline parser sees it.
#[derive(Debug)]
struct SourceLine<'a> {
    leading: &'a str,
    trailing: &'a str,
    /// Offset of the line's content in the joined text.
    start: usize,
    /// Offset where the line's trailing whitespace begins.
    content_end: usize,
    /// Position of the line's first content character.
    position: Position,
}

impl SourceLine<'_> {
    fn end(&self) -> usize {
        self.content_end + self.trailing.len()
    }
}

/// The lines of a `text` token joined into one string (content plus trailing
/// whitespace, separated by `\n`) with enough bookkeeping to map any offset
/// back to a source position.
#[derive(Debug)]
pub struct InlineSource<'a> {
    text: String,
    lines: Vec<SourceLine<'a>>,
}

impl<'a> InlineSource<'a> {
    /// `starts[i]` is the position of the first content character of line `i`.
    pub fn new(
        text: &'a str,
        line_whitespace: &'a [String],
        end_whitespace: &'a [String],
        starts: &[Position],
    ) -> Self {
        let mut joined = String::with_capacity(text.len() * 2);
        let mut lines = vec![];
        for (index, content) in text.split('\n').enumerate() {
            if index > 0 {
                joined.push('\n');
            }
            let start = joined.len();
            joined.push_str(content);
            let trailing = end_whitespace.get(index).map_or("", String::as_str);
            lines.push(SourceLine {
                leading: line_whitespace.get(index).map_or("", String::as_str),
                trailing,
                start,
                content_end: joined.len(),
                position: starts.get(index).copied().unwrap_or_default(),
            });
            joined.push_str(trailing);
        }
        Self {
            text: joined,
            lines,
        }
    }

    fn line_index(&self, offset: usize) -> usize {
        self.lines
            .iter()
            .rposition(|line| line.start <= offset)
            .unwrap_or(0)
    }

    fn position_of(&self, offset: usize) -> Position {
        let Some(line) = self.lines.get(self.line_index(offset)) else {
            return Position::default();
        };
        let columns = self
            .text
            .get(line.start..offset)
            .map_or(0, |head| head.chars().count());
        Position::new(
            line.position.line_number,
            line.position.column_number + columns,
        )
    }

    /// Hard break at the end of line `index`: where it starts and its text.
    fn hard_break(&self, index: usize) -> Option<(usize, &'a str)> {
        let line = self.lines.get(index)?;
        let content = self.text.get(line.start..line.content_end)?;
        let length = HardBreak::detect(content, line.trailing)?;
        let line_end = if length == content.len() {
            line.trailing
        } else {
            "\\"
        };
        Some((line.start + length, line_end))
    }

    /// A `text` token for `range`, with per-line leading and trailing whitespace
    /// split off the way block text tokens store it.
    fn text_token(&self, range: Range<usize>) -> Option<MarkdownToken> {
        if range.is_empty() {
            return None;
        }
        let mut pieces = vec![];
        let mut line_whitespace = vec![];
        let mut end_whitespace = vec![];
        for line in &self.lines {
            if line.start > range.end || line.end() < range.start {
                continue;
            }
            let start = range.start.max(line.start);
            let end = range.end.min(line.end());
            let content_end = end.min(line.content_end).max(start);
            pieces.push(self.text.get(start..content_end).unwrap_or_default());
            end_whitespace.push(self.text.get(content_end..end).unwrap_or_default().to_string());
            line_whitespace.push(if start == line.start {
                line.leading.to_string()
            } else {
                String::new()
            });
        }
        Some(MarkdownToken::new(
            TokenKind::Text {
                text: pieces.join("\n"),
                line_whitespace,
                end_whitespace,
            },
            self.position_of(range.start),
            "",
        ))
    }
}

/// Splits inline text into `text`, `icode-span` and `hard-break` tokens.
///
/// Code spans are matched first and suppress everything inside them. A
/// backslash escapes the next character, so an escaped backtick never opens a
/// span; the escape itself stays in the text.
pub fn parse_inline(source: &InlineSource<'_>) -> Vec<MarkdownToken> {
    let mut cur = Cursor::new(&source.text);
    let mut out = vec![];
    let mut text_start = 0;

    while !cur.eof() {
        let at = cur.pos();
        match cur.peek() {
            Some(CodeSpan::TICK) => {
                if let Some(token) = try_parse_code_span(&mut cur, source) {
                    out.extend(source.text_token(text_start..at));
                    out.push(token);
                    text_start = cur.pos();
                } else {
                    // An unmatched run is literal as a whole.
                    cur.bump_n(cur.run_length(CodeSpan::TICK));
                }
            }
            Some(HardBreak::ESCAPE) => {
                if matches!(cur.peek_next(), Some(b) if b != b'\n') {
                    cur.bump_n(2);
                } else {
                    cur.bump();
                }
            }
            Some(b'\n') => {
                if let Some((break_start, line_end)) = source.hard_break(source.line_index(at)) {
                    out.extend(source.text_token(text_start..break_start));
                    out.push(MarkdownToken::new(
                        TokenKind::HardBreak {
                            line_end: line_end.to_string(),
                        },
                        source.position_of(break_start),
                        "",
                    ));
                    cur.bump();
                    text_start = cur.pos();
                } else {
                    cur.bump();
                }
            }
            _ => {
                cur.bump();
            }
        }
    }

    out.extend(source.text_token(text_start..source.text.len()));
    out
}

/// Attempts to parse a code span at the cursor. On failure the cursor is
/// restored.
fn try_parse_code_span(cur: &mut Cursor<'_>, source: &InlineSource<'_>) -> Option<MarkdownToken> {
    let saved = cur.clone();
    let start = cur.pos();
    let backtick_count = cur.run_length(CodeSpan::TICK);
    cur.bump_n(backtick_count);
    let inner_start = cur.pos();

    while !cur.eof() {
        if cur.peek() != Some(CodeSpan::TICK) {
            cur.bump();
            continue;
        }
        let inner_end = cur.pos();
        let closing = cur.run_length(CodeSpan::TICK);
        cur.bump_n(closing);
        if closing == backtick_count {
            let raw = source.text.get(inner_start..inner_end).unwrap_or_default();
            let (leading_whitespace, text, trailing_whitespace) = CodeSpan::normalize(raw);
            return Some(MarkdownToken::new(
                TokenKind::CodeSpan {
                    text,
                    backtick_count,
                    leading_whitespace,
                    trailing_whitespace,
                },
                source.position_of(start),
                "",
            ));
        }
    }

    *cur = saved;
    None
}
