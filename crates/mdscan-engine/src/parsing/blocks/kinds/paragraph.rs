use crate::parsing::parser_helper::ParserHelper;

/// Paragraph block type (marker struct).
///
/// Paragraphs have no delimiters - they are the default leaf block
/// when no other block opener matches. Inline parsing is applied
/// to paragraph content.
pub struct Paragraph;

impl Paragraph {
    /// Splits a paragraph line into leading whitespace, text and trailing whitespace.
    ///
    /// Trailing whitespace is kept apart so the inline pass can detect hard breaks.
    pub fn split_line(line: &str) -> (&str, &str, &str) {
        let (text_start, leading) =
            ParserHelper::extract_ascii_whitespace(line, 0).unwrap_or((0, ""));
        let (text, trailing) = ParserHelper::split_trailing_whitespace(&line[text_start..]);
        (leading, text, trailing)
    }
}
