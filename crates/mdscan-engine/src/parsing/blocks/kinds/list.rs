use crate::{
    parsing::{parser_helper::ParserHelper, position_marker::PositionMarker},
    tokens::ListKind,
};

/// A list marker recognised at the start of a line's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListMarker {
    pub kind: ListKind,
    /// Digits of an ordered item number, `None` for bullets.
    pub start: Option<String>,
    /// Marker length in bytes (`-` is 1, `10.` is 3).
    pub width: usize,
}

/// List item syntax: markers, item padding and list compatibility.
pub struct List;

impl List {
    pub const BULLETS: &'static str = "-+*";
    pub const ORDERED_DELIMITERS: &'static str = ".)";
    pub const MAX_ORDERED_DIGITS: usize = 9;

    /// Whitespace beyond this many columns after the marker is item content
    /// (an indented code block), not padding.
    pub const MAX_PADDING_WHITESPACE: usize = 4;

    /// Parses a list marker at the start of `text`.
    ///
    /// The marker must be followed by a space, a tab, or the end of the line. When the
    /// item would interrupt a paragraph it must not be empty, and an ordered item
    /// must start at 1.
    pub fn parse_marker(text: &str, interrupts_paragraph: bool) -> Option<ListMarker> {
        let first = text.chars().next()?;
        let (marker, after) = if Self::BULLETS.contains(first) {
            (
                ListMarker {
                    kind: ListKind::Bullet(first),
                    start: None,
                    width: 1,
                },
                1,
            )
        } else if first.is_ascii_digit() {
            let (digits, end) =
                ParserHelper::collect_while_one_of_characters(text, 0, "0123456789")?;
            if digits > Self::MAX_ORDERED_DIGITS {
                return None;
            }
            let delimiter = text[end..].chars().next()?;
            if !Self::ORDERED_DELIMITERS.contains(delimiter) {
                return None;
            }
            let start = &text[..end];
            if interrupts_paragraph && start.trim_start_matches('0') != "1" {
                return None;
            }
            (
                ListMarker {
                    kind: ListKind::Ordered(delimiter),
                    start: Some(start.to_string()),
                    width: end + 1,
                },
                end + 1,
            )
        } else {
            return None;
        };

        if after < text.len() && !ParserHelper::is_character_at_index_whitespace(text, after) {
            return None;
        }
        if interrupts_paragraph && ParserHelper::is_blank(&text[after..]) {
            return None;
        }
        Some(marker)
    }

    /// Consumes the marker and the whitespace that belongs to the item prefix,
    /// returning the item padding (marker width plus prefix whitespace columns).
    ///
    /// The cursor must sit on the marker. One to four columns of whitespace are
    /// padding; more than that, none at all, or an empty item leave a padding of
    /// one column so the rest becomes content.
    pub fn consume_marker(pm: &mut PositionMarker<'_>, marker: &ListMarker) -> usize {
        pm.advance_offset(marker.width, false);
        let saved = pm.clone();

        let start_column = pm.column();
        while pm.column() - start_column <= Self::MAX_PADDING_WHITESPACE + 1
            && pm.is_space_or_tab()
        {
            pm.advance_offset(1, true);
        }

        let spaces = pm.column() - start_column;
        if !(1..=Self::MAX_PADDING_WHITESPACE).contains(&spaces) || pm.peek().is_none() {
            *pm = saved;
            if spaces > 0 {
                pm.advance_offset(1, true);
            }
            marker.width + 1
        } else {
            marker.width + spaces
        }
    }

    /// Two items belong to the same list when their marker kinds agree exactly.
    pub fn lists_match(current: ListKind, candidate: ListKind) -> bool {
        current == candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("- foo", Some(ListKind::Bullet('-')))]
    #[case("+\tfoo", Some(ListKind::Bullet('+')))]
    #[case("*", Some(ListKind::Bullet('*')))]
    #[case("1. foo", Some(ListKind::Ordered('.')))]
    #[case("12) foo", Some(ListKind::Ordered(')')))]
    #[case("-five", None)]
    #[case("1.foo", None)]
    #[case("1234567890. foo", None)]
    #[case("a. foo", None)]
    #[case("1: foo", None)]
    fn marker_kinds(#[case] text: &str, #[case] expected: Option<ListKind>) {
        assert_eq!(List::parse_marker(text, false).map(|m| m.kind), expected);
    }

    #[test]
    fn nine_digits_allowed() {
        let marker = List::parse_marker("123456789. x", false).unwrap();
        assert_eq!(marker.start.as_deref(), Some("123456789"));
        assert_eq!(marker.width, 10);
    }

    #[rstest]
    #[case("-", None)]
    #[case("-   ", None)]
    #[case("2. foo", None)]
    #[case("1. foo", Some(ListKind::Ordered('.')))]
    #[case("* foo", Some(ListKind::Bullet('*')))]
    fn interrupting_paragraph(#[case] text: &str, #[case] expected: Option<ListKind>) {
        assert_eq!(List::parse_marker(text, true).map(|m| m.kind), expected);
    }

    fn padding(line: &str) -> (usize, String) {
        let mut pm = PositionMarker::new(1, line);
        let marker = List::parse_marker(pm.from_first_nonspace(), false).unwrap();
        let padding = List::consume_marker(&mut pm, &marker);
        (padding, pm.remaining().to_string())
    }

    #[rstest]
    #[case("- foo", 2, "foo")]
    #[case("-   foo", 4, "foo")]
    #[case("-     foo", 2, "    foo")]
    #[case("-", 2, "")]
    #[case("-  ", 2, " ")]
    #[case("10. foo", 4, "foo")]
    fn item_padding(#[case] line: &str, #[case] expected: usize, #[case] rest: &str) {
        assert_eq!(padding(line), (expected, rest.to_string()));
    }

    #[test]
    fn different_bullets_do_not_match() {
        assert!(List::lists_match(ListKind::Bullet('-'), ListKind::Bullet('-')));
        assert!(!List::lists_match(ListKind::Bullet('-'), ListKind::Bullet('+')));
        assert!(!List::lists_match(ListKind::Ordered('.'), ListKind::Ordered(')')));
    }
}
