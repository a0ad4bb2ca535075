use std::iter;

use crate::tokens::{BlockKind, MarkdownToken, TokenKind};

use super::TokenizedDocument;

/// Rebuilds the exact source text of a block token stream.
///
/// Each line is its container prefix followed by the leaf text the tokens
/// recorded for it. Inline tokens are not understood here; regenerate from the
/// block stream, before the inline pass.
pub fn to_markdown(doc: &TokenizedDocument) -> String {
    let mut lines = vec![String::new(); doc.line_prefixes.len()];
    let mut open_leaf: Option<&MarkdownToken> = None;
    let mut next_line = 0;

    for token in &doc.tokens {
        let line = token.line_number();
        let ws = token.extracted_whitespace.as_str();
        match &token.kind {
            TokenKind::FrontMatter {
                start_fence,
                end_fence,
                lines: body,
                ..
            } => {
                let all = iter::once(start_fence).chain(body).chain(iter::once(end_fence));
                for (offset, text) in all.enumerate() {
                    append(&mut lines, line + offset, text);
                }
            }
            TokenKind::LinkReferenceDefinition {
                lines: definition, ..
            } => {
                for (offset, text) in definition.iter().enumerate() {
                    append(&mut lines, line + offset, text);
                }
            }
            TokenKind::BlankLine => append(&mut lines, line, ws),
            TokenKind::ThematicBreak { rest_of_line, .. } => {
                append(&mut lines, line, &format!("{ws}{rest_of_line}"));
            }
            TokenKind::AtxHeading { hash_count, .. } => {
                append(&mut lines, line, &format!("{ws}{}", "#".repeat(*hash_count)));
                open_leaf = Some(token);
            }
            TokenKind::FencedCodeBlock {
                fence_character,
                fence_count,
                pre_info_whitespace,
                info_string,
                trailing_whitespace,
            } => {
                let fence = fence_character.to_string().repeat(*fence_count);
                append(
                    &mut lines,
                    line,
                    &format!("{ws}{fence}{pre_info_whitespace}{info_string}{trailing_whitespace}"),
                );
                open_leaf = Some(token);
                next_line = line + 1;
            }
            TokenKind::Paragraph
            | TokenKind::SetextHeading { .. }
            | TokenKind::IndentedCodeBlock
            | TokenKind::HtmlBlock { .. } => open_leaf = Some(token),
            TokenKind::Text {
                text,
                line_whitespace,
                end_whitespace,
            } => {
                for (offset, piece) in text.split('\n').enumerate() {
                    let leading = line_whitespace.get(offset).map_or("", String::as_str);
                    let trailing = end_whitespace.get(offset).map_or("", String::as_str);
                    append(&mut lines, line + offset, &format!("{leading}{piece}{trailing}"));
                }
                next_line = line + line_whitespace.len().max(1);
            }
            TokenKind::End {
                block,
                extra_end_data,
                was_forced,
            } => {
                match (block, open_leaf) {
                    (BlockKind::AtxHeading, Some(heading)) => {
                        append(&mut lines, heading.line_number(), extra_end_data);
                    }
                    (BlockKind::SetextHeading, Some(heading)) => {
                        append_underline(&mut lines, heading);
                    }
                    (BlockKind::FencedCodeBlock, Some(_)) if !was_forced => {
                        append(&mut lines, next_line, &format!("{ws}{extra_end_data}"));
                    }
                    _ => {}
                }
                if !block.is_container() {
                    open_leaf = None;
                }
            }
            TokenKind::BlockQuote
            | TokenKind::UnorderedList { .. }
            | TokenKind::OrderedList { .. }
            | TokenKind::NewListItem { .. }
            | TokenKind::CodeSpan { .. }
            | TokenKind::HardBreak { .. } => {}
        }
    }

    let mut out = doc
        .line_prefixes
        .iter()
        .zip(&lines)
        .map(|(prefix, raw)| format!("{prefix}{raw}"))
        .collect::<Vec<_>>()
        .join("\n");
    if doc.ends_with_newline {
        out.push('\n');
    }
    out
}

fn append_underline(lines: &mut [String], heading: &MarkdownToken) {
    if let TokenKind::SetextHeading {
        heading_character,
        heading_character_count,
        underline_whitespace,
        underline_trailing,
    } = &heading.kind
    {
        let line = heading.original_position.map_or(0, |p| p.line_number);
        let underline = heading_character.to_string().repeat(*heading_character_count);
        append(
            lines,
            line,
            &format!("{underline_whitespace}{underline}{underline_trailing}"),
        );
    }
}

/// Appends to the 1-based `line`; out-of-range lines are ignored.
fn append(lines: &mut [String], line: usize, text: &str) {
    if let Some(raw) = line.checked_sub(1).and_then(|index| lines.get_mut(index)) {
        raw.push_str(text);
    }
}
