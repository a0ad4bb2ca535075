/// Thematic breaks: three or more matching `*`, `-` or `_`, optionally
/// separated by spaces or tabs, and nothing else on the line.
pub struct ThematicBreak;

impl ThematicBreak {
    pub const CHARACTERS: &'static str = "*-_";
    pub const MIN_COUNT: usize = 3;

    /// Returns the break character when `text` (starting at its first marker) is a break.
    pub fn parse(text: &str) -> Option<char> {
        let start = text.chars().next()?;
        if !Self::CHARACTERS.contains(start) {
            return None;
        }
        let mut count = 0;
        for c in text.chars() {
            match c {
                c if c == start => count += 1,
                ' ' | '\t' => {}
                _ => return None,
            }
        }
        (count >= Self::MIN_COUNT).then_some(start)
    }
}
