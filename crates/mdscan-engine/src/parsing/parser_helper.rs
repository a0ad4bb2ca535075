/// Stateless scanning primitives shared by every block processor.
///
/// All indices are byte offsets into `text`. Every operation is bounds-safe:
/// a start index outside `0..=text.len()` (or not on a char boundary) yields
/// `None` for the collecting operations and `false` for the predicates. A start
/// index equal to `text.len()` is valid and collects nothing.
pub struct ParserHelper;

impl ParserHelper {
    /// Whitespace recognised inside a line.
    pub const WHITESPACE: &'static str = " \t";

    /// Columns between tab stops.
    pub const TAB_STOP: usize = 4;

    /// Scans forward while `text[index] == ch`, returning `(count, new_index)`.
    pub fn collect_while_character(
        text: &str,
        start_index: usize,
        ch: char,
    ) -> Option<(usize, usize)> {
        let rest = text.get(start_index..)?;
        let count = rest.chars().take_while(|c| *c == ch).count();
        Some((count, start_index + count * ch.len_utf8()))
    }

    /// Scans forward while the character is one of `set`, returning `(count, new_index)`.
    pub fn collect_while_one_of_characters(
        text: &str,
        start_index: usize,
        set: &str,
    ) -> Option<(usize, usize)> {
        let rest = text.get(start_index..)?;
        let mut index = start_index;
        let mut count = 0;
        for c in rest.chars() {
            if !set.contains(c) {
                break;
            }
            index += c.len_utf8();
            count += 1;
        }
        Some((count, index))
    }

    /// Scans forward until a character of `set` (or end of text), returning
    /// `(new_index, collected)`.
    pub fn collect_until_one_of_characters<'a>(
        text: &'a str,
        start_index: usize,
        set: &str,
    ) -> Option<(usize, &'a str)> {
        let rest = text.get(start_index..)?;
        let len = rest.find(|c| set.contains(c)).unwrap_or(rest.len());
        Some((start_index + len, &rest[..len]))
    }

    /// Scans backward from `end_index` while the preceding character is one of `set`,
    /// returning `(count, new_end_index)`.
    pub fn collect_backwards_while_one_of_characters(
        text: &str,
        end_index: usize,
        set: &str,
    ) -> Option<(usize, usize)> {
        let head = text.get(..end_index)?;
        let mut index = end_index;
        let mut count = 0;
        for c in head.chars().rev() {
            if !set.contains(c) {
                break;
            }
            index -= c.len_utf8();
            count += 1;
        }
        Some((count, index))
    }

    /// Extracts the run of spaces and tabs starting at `start_index`, returning
    /// `(new_index, whitespace)`. Tabs are returned verbatim, never expanded.
    pub fn extract_ascii_whitespace(text: &str, start_index: usize) -> Option<(usize, &str)> {
        let (_, index) =
            Self::collect_while_one_of_characters(text, start_index, Self::WHITESPACE)?;
        Some((index, &text[start_index..index]))
    }

    /// Splits trailing spaces and tabs off `text`, returning `(content, trailing)`.
    pub fn split_trailing_whitespace(text: &str) -> (&str, &str) {
        let content = text.trim_end_matches([' ', '\t']);
        (content, &text[content.len()..])
    }

    pub fn is_character_at_index(text: &str, index: usize, ch: char) -> bool {
        Self::char_at(text, index) == Some(ch)
    }

    pub fn is_character_at_index_one_of(text: &str, index: usize, set: &str) -> bool {
        Self::char_at(text, index).is_some_and(|c| set.contains(c))
    }

    pub fn is_character_at_index_not(text: &str, index: usize, ch: char) -> bool {
        Self::char_at(text, index).is_some_and(|c| c != ch)
    }

    pub fn is_character_at_index_whitespace(text: &str, index: usize) -> bool {
        Self::is_character_at_index_one_of(text, index, Self::WHITESPACE)
    }

    /// Exact match of `sequence` at `start_index`; false if it would overrun `text`.
    pub fn are_characters_at_index(text: &str, start_index: usize, sequence: &str) -> bool {
        text.get(start_index..)
            .is_some_and(|rest| rest.as_bytes().starts_with(sequence.as_bytes()))
    }

    /// True when `text` holds nothing but spaces and tabs.
    pub fn is_blank(text: &str) -> bool {
        text.chars().all(|c| c == ' ' || c == '\t')
    }

    /// Visual width of `whitespace` when it starts at `start_column` (0-based),
    /// expanding tabs to the next tab stop.
    pub fn calculate_width(whitespace: &str, start_column: usize) -> usize {
        let mut column = start_column;
        for c in whitespace.chars() {
            if c == '\t' {
                column += Self::TAB_STOP - (column % Self::TAB_STOP);
            } else {
                column += 1;
            }
        }
        column - start_column
    }

    fn char_at(text: &str, index: usize) -> Option<char> {
        text.get(index..)?.chars().next()
    }
}
