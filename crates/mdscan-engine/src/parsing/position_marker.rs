use crate::tokens::Position;

use super::parser_helper::ParserHelper;

/// Cursor over one physical line, advanced by the container and leaf processors.
///
/// Tracks the byte index and the tab-expanded visual column separately. A tab can
/// be partially consumed when a container prefix ends inside its expansion; the
/// byte index then stays on the tab until the remaining columns are consumed.
#[derive(Debug, Clone)]
pub struct PositionMarker<'a> {
    line_number: usize,
    text_to_parse: &'a str,
    index_number: usize,
    column: usize,
    partially_consumed_tab: bool,
    first_nonspace: usize,
    first_nonspace_column: usize,
}

impl<'a> PositionMarker<'a> {
    pub fn new(line_number: usize, text_to_parse: &'a str) -> Self {
        let mut pm = Self {
            line_number,
            text_to_parse,
            index_number: 0,
            column: 0,
            partially_consumed_tab: false,
            first_nonspace: 0,
            first_nonspace_column: 0,
        };
        pm.find_first_nonspace();
        pm
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn text_to_parse(&self) -> &'a str {
        self.text_to_parse
    }

    pub fn index_number(&self) -> usize {
        self.index_number
    }

    /// Tab-expanded, 0-based column of the cursor.
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn partially_consumed_tab(&self) -> bool {
        self.partially_consumed_tab
    }

    /// Locates the first non-space/tab character at or after the cursor.
    pub fn find_first_nonspace(&mut self) {
        let bytes = self.text_to_parse.as_bytes();
        let mut index = self.index_number;
        let mut column = self.column;
        while let Some(&b) = bytes.get(index) {
            match b {
                b' ' => column += 1,
                b'\t' => column += ParserHelper::TAB_STOP - (column % ParserHelper::TAB_STOP),
                _ => break,
            }
            index += 1;
        }
        self.first_nonspace = index;
        self.first_nonspace_column = column;
    }

    pub fn first_nonspace(&self) -> usize {
        self.first_nonspace
    }

    /// Tab-expanded, 0-based column of the first non-space character.
    pub fn first_nonspace_column(&self) -> usize {
        self.first_nonspace_column
    }

    /// Columns of whitespace between the cursor and the first non-space character.
    pub fn indent(&self) -> usize {
        self.first_nonspace_column - self.column
    }

    /// True when nothing but whitespace remains after the cursor.
    pub fn is_blank(&self) -> bool {
        self.first_nonspace >= self.text_to_parse.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.text_to_parse.as_bytes().get(self.index_number).copied()
    }

    pub fn peek_nonspace(&self) -> Option<u8> {
        self.text_to_parse.as_bytes().get(self.first_nonspace).copied()
    }

    pub fn is_space_or_tab(&self) -> bool {
        matches!(self.peek(), Some(b' ' | b'\t'))
    }

    /// Advances `count` bytes (`columns == false`) or `count` visual columns.
    ///
    /// Never moves past the end of the line.
    pub fn advance_offset(&mut self, mut count: usize, columns: bool) {
        let bytes = self.text_to_parse.as_bytes();
        while count > 0 {
            let Some(&b) = bytes.get(self.index_number) else {
                break;
            };
            if b == b'\t' {
                let chars_to_tab = ParserHelper::TAB_STOP - (self.column % ParserHelper::TAB_STOP);
                if columns {
                    self.partially_consumed_tab = chars_to_tab > count;
                    let chars_to_advance = count.min(chars_to_tab);
                    self.column += chars_to_advance;
                    if !self.partially_consumed_tab {
                        self.index_number += 1;
                    }
                    count -= chars_to_advance;
                } else {
                    self.partially_consumed_tab = false;
                    self.column += chars_to_tab;
                    self.index_number += 1;
                    count -= 1;
                }
            } else {
                self.partially_consumed_tab = false;
                self.index_number += 1;
                self.column += 1;
                count -= 1;
            }
        }
        self.find_first_nonspace();
    }

    /// Moves the cursor onto the first non-space character.
    pub fn advance_to_first_nonspace(&mut self) {
        let count = self.first_nonspace - self.index_number;
        self.advance_offset(count, false);
    }

    /// Moves the cursor to the end of the line.
    pub fn advance_to_end(&mut self) {
        let count = self.text_to_parse.len() - self.index_number;
        self.advance_offset(count, false);
    }

    /// Everything already consumed by container prefixes.
    pub fn consumed(&self) -> &'a str {
        &self.text_to_parse[..self.index_number]
    }

    pub fn remaining(&self) -> &'a str {
        &self.text_to_parse[self.index_number..]
    }

    /// Whitespace between the cursor and the first non-space character, verbatim.
    pub fn leading_whitespace(&self) -> &'a str {
        &self.text_to_parse[self.index_number..self.first_nonspace]
    }

    pub fn from_first_nonspace(&self) -> &'a str {
        &self.text_to_parse[self.first_nonspace..]
    }

    /// Token position of the byte at `index`.
    pub fn position_at(&self, index: usize) -> Position {
        let index = index.min(self.text_to_parse.len());
        let column = self
            .text_to_parse
            .get(..index)
            .map_or(index, |head| head.chars().count());
        Position::new(self.line_number, column + 1)
    }

    pub fn position(&self) -> Position {
        self.position_at(self.index_number)
    }

    pub fn first_nonspace_position(&self) -> Position {
        self.position_at(self.first_nonspace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn indent_counts_columns() {
        let pm = PositionMarker::new(1, "  \tfoo");
        assert_eq!(pm.indent(), 4);
        assert_eq!(pm.first_nonspace(), 3);
        assert!(!pm.is_blank());
    }

    #[test]
    fn blank_line() {
        let pm = PositionMarker::new(3, " \t ");
        assert!(pm.is_blank());
        assert_eq!(pm.position(), Position::new(3, 1));
    }

    #[test]
    fn partially_consumed_tab() {
        // `>` then a tab that expands from column 1 to column 4.
        let mut pm = PositionMarker::new(1, ">\t\tfoo");
        pm.advance_offset(1, false);
        pm.advance_offset(1, true);
        assert!(pm.partially_consumed_tab());
        assert_eq!(pm.index_number(), 1);
        assert_eq!(pm.column(), 2);
        assert_eq!(pm.indent(), 6);

        pm.advance_offset(4, true);
        assert!(pm.partially_consumed_tab());
        assert_eq!(pm.index_number(), 2);
        assert_eq!(pm.column(), 6);
        assert_eq!(pm.remaining(), "\tfoo");
    }

    #[test]
    fn advance_stops_at_end_of_line() {
        let mut pm = PositionMarker::new(1, "ab");
        pm.advance_offset(10, false);
        assert_eq!(pm.index_number(), 2);
        assert_eq!(pm.remaining(), "");
        assert!(pm.is_blank());
    }

    #[test]
    fn positions_count_characters() {
        let mut pm = PositionMarker::new(2, "é > x");
        pm.advance_offset(2, false);
        pm.find_first_nonspace();
        assert_eq!(pm.first_nonspace_position(), Position::new(2, 3));
        assert_eq!(pm.consumed(), "é");
    }

    #[test]
    fn leading_whitespace_is_verbatim() {
        let mut pm = PositionMarker::new(1, "- \t x");
        pm.advance_offset(1, false);
        assert_eq!(pm.leading_whitespace(), " \t ");
        assert_eq!(pm.from_first_nonspace(), "x");
    }
}
