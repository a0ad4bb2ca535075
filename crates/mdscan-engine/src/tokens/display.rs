use std::fmt;

use super::types::{MarkdownToken, TokenKind};

/// Makes control characters visible so a serialized token stays on one line.
fn escape(s: &str) -> String {
    s.replace('\n', "\\n").replace('\t', "\\t")
}

fn join_lines(parts: &[String]) -> String {
    escape(&parts.join("\n"))
}

impl fmt::Display for MarkdownToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ws = escape(&self.extracted_whitespace);

        if let TokenKind::End {
            block,
            extra_end_data,
            was_forced,
        } = &self.kind
        {
            write!(f, "[{}:{}:{}", block.end_name(), ws, escape(extra_end_data))?;
            if *was_forced {
                write!(f, ":True")?;
            }
            return write!(f, "]");
        }

        let (line, column) = (self.line_number(), self.column_number());
        write!(f, "[{}({},{})", self.name(), line, column)?;

        match &self.kind {
            TokenKind::Paragraph
            | TokenKind::IndentedCodeBlock
            | TokenKind::BlankLine
            | TokenKind::BlockQuote => write!(f, ":{ws}")?,
            TokenKind::AtxHeading {
                hash_count,
                remove_trailing_count,
            } => write!(f, ":{hash_count}:{remove_trailing_count}:{ws}")?,
            TokenKind::SetextHeading {
                heading_character,
                heading_character_count,
                underline_whitespace,
                underline_trailing,
            } => {
                write!(
                    f,
                    ":{heading_character}:{heading_character_count}:{ws}:{}:{}",
                    escape(underline_whitespace),
                    escape(underline_trailing)
                )?;
                if let Some(underline) = self.original_position {
                    write!(
                        f,
                        ":({},{})",
                        underline.line_number, underline.column_number
                    )?;
                }
            }
            TokenKind::ThematicBreak {
                start_character,
                rest_of_line,
            } => write!(f, ":{start_character}:{ws}:{}", escape(rest_of_line))?,
            TokenKind::FencedCodeBlock {
                fence_character,
                fence_count,
                pre_info_whitespace,
                info_string,
                trailing_whitespace,
            } => write!(
                f,
                ":{fence_character}:{fence_count}:{}:{}:{}:{ws}",
                escape(info_string),
                escape(pre_info_whitespace),
                escape(trailing_whitespace)
            )?,
            TokenKind::HtmlBlock { html_block_type } => write!(f, ":{html_block_type}")?,
            TokenKind::FrontMatter {
                start_fence,
                end_fence,
                matter,
                ..
            } => {
                let pairs: Vec<String> = matter.iter().map(|(k, v)| format!("{k}={v}")).collect();
                write!(f, ":{start_fence}:{end_fence}:{}", escape(&pairs.join(",")))?;
            }
            TokenKind::LinkReferenceDefinition {
                label,
                destination,
                title,
                ..
            } => {
                write!(f, ":{ws}:{}:{}", escape(label), escape(destination))?;
                if let Some(title) = title {
                    write!(f, ":{}", escape(title))?;
                }
            }
            TokenKind::UnorderedList {
                list_start_character,
                indent_level,
                is_loose,
            } => {
                write!(f, ":{list_start_character}::{indent_level}:{ws}")?;
                if *is_loose {
                    write!(f, ":loose")?;
                }
            }
            TokenKind::OrderedList {
                delimiter,
                list_start_content,
                indent_level,
                is_loose,
            } => {
                write!(f, ":{delimiter}:{list_start_content}:{indent_level}:{ws}")?;
                if *is_loose {
                    write!(f, ":loose")?;
                }
            }
            TokenKind::NewListItem {
                indent_level,
                list_start_content,
            } => write!(
                f,
                ":{indent_level}:{ws}:{}",
                list_start_content.as_deref().unwrap_or_default()
            )?,
            TokenKind::Text {
                text,
                line_whitespace,
                end_whitespace,
            } => {
                write!(f, ":{}:{}", escape(text), join_lines(line_whitespace))?;
                if end_whitespace.iter().any(|e| !e.is_empty()) {
                    write!(f, ":{}", join_lines(end_whitespace))?;
                }
            }
            TokenKind::CodeSpan {
                text,
                backtick_count,
                leading_whitespace,
                trailing_whitespace,
            } => write!(
                f,
                ":{}:{backtick_count}:{}:{}",
                escape(text),
                escape(leading_whitespace),
                escape(trailing_whitespace)
            )?,
            TokenKind::HardBreak { line_end } => write!(f, ":{}", escape(line_end))?,
            TokenKind::End { .. } => {}
        }

        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{BlockKind, Position};

    #[test]
    fn paragraph_and_forced_end() {
        let para = MarkdownToken::new(TokenKind::Paragraph, Position::new(2, 3), "  ");
        assert_eq!(para.to_string(), "[para(2,3):  ]");

        let end = MarkdownToken::end(BlockKind::Paragraph, "", "", true);
        assert_eq!(end.to_string(), "[end-para:::True]");
    }

    #[test]
    fn text_escapes_newlines() {
        let text = MarkdownToken::new(
            TokenKind::Text {
                text: "a\nb".to_string(),
                line_whitespace: vec![String::new(), " ".to_string()],
                end_whitespace: vec![String::new(), String::new()],
            },
            Position::new(1, 1),
            "",
        );
        assert_eq!(text.to_string(), "[text(1,1):a\\nb:\\n ]");
    }

    #[test]
    fn ordered_list_shows_looseness() {
        let list = MarkdownToken::new(
            TokenKind::OrderedList {
                delimiter: '.',
                list_start_content: "1".to_string(),
                indent_level: 3,
                is_loose: true,
            },
            Position::new(1, 1),
            "",
        );
        assert_eq!(list.to_string(), "[olist(1,1):.:1:3::loose]");
    }

    #[test]
    fn atx_end_carries_closing_sequence() {
        let end = MarkdownToken::end(BlockKind::AtxHeading, "", " ##", false);
        assert_eq!(end.to_string(), "[end-atx:: ##]");
    }

    #[test]
    fn link_definition_shows_title_only_when_present() {
        let definition = |title: Option<&str>| {
            MarkdownToken::new(
                TokenKind::LinkReferenceDefinition {
                    label: "foo bar".to_string(),
                    destination: "/url".to_string(),
                    title: title.map(str::to_string),
                    lines: vec!["[Foo Bar]: /url".to_string()],
                },
                Position::new(1, 1),
                "",
            )
        };
        assert_eq!(definition(None).to_string(), "[link-ref-def(1,1)::foo bar:/url]");
        assert_eq!(
            definition(Some("t")).to_string(),
            "[link-ref-def(1,1)::foo bar:/url:t]"
        );
    }
}
