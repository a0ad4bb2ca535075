use crate::parsing::parser_helper::ParserHelper;

/// The pieces of an ATX heading line, which concatenate back to the input:
/// `#` * `hash_count` + `pre_text_whitespace` + `text` + `closing`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtxParts<'a> {
    pub hash_count: usize,
    pub pre_text_whitespace: &'a str,
    pub text: &'a str,
    /// Whitespace, optional closing `#` run and trailing whitespace.
    pub closing: &'a str,
    pub remove_trailing_count: usize,
}

impl AtxParts<'_> {
    /// Byte offset of `text` within the parsed input.
    pub fn text_offset(&self) -> usize {
        self.hash_count + self.pre_text_whitespace.len()
    }
}

pub struct AtxHeading;

impl AtxHeading {
    pub const MARKER: char = '#';
    pub const MAX_LEVEL: usize = 6;

    /// Parses a heading starting at the first `#` of `text`.
    pub fn parse(text: &str) -> Option<AtxParts<'_>> {
        let (hash_count, after_hashes) =
            ParserHelper::collect_while_character(text, 0, Self::MARKER)?;
        if !(1..=Self::MAX_LEVEL).contains(&hash_count) {
            return None;
        }
        if after_hashes < text.len()
            && !ParserHelper::is_character_at_index_whitespace(text, after_hashes)
        {
            return None;
        }

        let (content_start, pre_text_whitespace) =
            ParserHelper::extract_ascii_whitespace(text, after_hashes)?;
        let content = &text[content_start..];
        let (body, _) = ParserHelper::split_trailing_whitespace(content);

        let (closing_hashes, hashes_start) =
            ParserHelper::collect_backwards_while_one_of_characters(body, body.len(), "#")?;

        let text_end = if closing_hashes == 0 {
            body.len()
        } else if hashes_start == 0 {
            0
        } else if ParserHelper::is_character_at_index_whitespace(body, hashes_start - 1) {
            let (_, ws_start) = ParserHelper::collect_backwards_while_one_of_characters(
                body,
                hashes_start,
                ParserHelper::WHITESPACE,
            )?;
            ws_start
        } else {
            body.len()
        };
        let remove_trailing_count = if text_end == body.len() { 0 } else { closing_hashes };

        Some(AtxParts {
            hash_count,
            pre_text_whitespace,
            text: &content[..text_end],
            closing: &content[text_end..],
            remove_trailing_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("# foo", 1, " ", "foo", "")]
    #[case("###### foo", 6, " ", "foo", "")]
    #[case("# foo ##", 1, " ", "foo", " ##")]
    #[case("## foo ##   ", 2, " ", "foo", " ##   ")]
    #[case("# foo#", 1, " ", "foo#", "")]
    #[case("### foo \\###", 3, " ", "foo \\###", "")]
    #[case("#", 1, "", "", "")]
    #[case("#   ", 1, "   ", "", "")]
    #[case("## ###", 2, " ", "", "###")]
    #[case("#\tfoo  ", 1, "\t", "foo", "  ")]
    fn parts(
        #[case] line: &str,
        #[case] level: usize,
        #[case] pre: &str,
        #[case] text: &str,
        #[case] closing: &str,
    ) {
        let parts = AtxHeading::parse(line).unwrap();
        assert_eq!(
            (parts.hash_count, parts.pre_text_whitespace, parts.text, parts.closing),
            (level, pre, text, closing)
        );
        assert_eq!(
            format!("{}{pre}{text}{closing}", "#".repeat(level)),
            line,
            "parts must reassemble the line"
        );
    }

    #[rstest]
    #[case("####### foo")]
    #[case("#5 bolt")]
    #[case("#hashtag")]
    #[case("foo")]
    fn not_headings(#[case] line: &str) {
        assert_eq!(AtxHeading::parse(line), None);
    }

    #[test]
    fn closing_count_recorded() {
        let parts = AtxHeading::parse("# foo ###").unwrap();
        assert_eq!(parts.remove_trailing_count, 3);
        assert_eq!(parts.text_offset(), 2);
    }
}
