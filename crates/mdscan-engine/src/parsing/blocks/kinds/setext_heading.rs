use crate::parsing::parser_helper::ParserHelper;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetextUnderline<'a> {
    pub character: char,
    pub count: usize,
    pub trailing: &'a str,
}

/// Setext headings: a paragraph followed by a run of `=` (level 1) or `-` (level 2).
pub struct SetextHeading;

impl SetextHeading {
    pub const LEVEL_ONE: char = '=';
    pub const LEVEL_TWO: char = '-';

    /// Parses an underline starting at its first character.
    pub fn parse_underline(text: &str) -> Option<SetextUnderline<'_>> {
        let character = text.chars().next()?;
        if character != Self::LEVEL_ONE && character != Self::LEVEL_TWO {
            return None;
        }
        let (count, end) = ParserHelper::collect_while_character(text, 0, character)?;
        let trailing = &text[end..];
        if !ParserHelper::is_blank(trailing) {
            return None;
        }
        Some(SetextUnderline {
            character,
            count,
            trailing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("===", Some(('=', 3, "")))]
    #[case("-", Some(('-', 1, "")))]
    #[case("---  ", Some(('-', 3, "  ")))]
    #[case("= =", None)]
    #[case("--- a", None)]
    #[case("***", None)]
    fn underlines(#[case] text: &str, #[case] expected: Option<(char, usize, &str)>) {
        let parsed =
            SetextHeading::parse_underline(text).map(|u| (u.character, u.count, u.trailing));
        assert_eq!(parsed, expected);
    }
}
