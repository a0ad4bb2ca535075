/// Hard line breaks: two or more trailing spaces, or a trailing backslash, on
/// any paragraph line but the last.
pub struct HardBreak;

impl HardBreak {
    pub const ESCAPE: u8 = b'\\';
    pub const SPACES: &'static str = "  ";

    /// Given a line's content and its trailing whitespace, returns how many bytes
    /// of content precede the break. A backslash break consumes the backslash;
    /// a space break leaves the content whole.
    pub fn detect(content: &str, trailing: &str) -> Option<usize> {
        if trailing.ends_with(Self::SPACES) {
            return Some(content.len());
        }
        if !trailing.is_empty() {
            return None;
        }
        let escapes = content
            .bytes()
            .rev()
            .take_while(|&b| b == Self::ESCAPE)
            .count();
        (escapes % 2 == 1).then(|| content.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("foo", "  ", Some(3))]
    #[case("foo", "   ", Some(3))]
    #[case("foo", " ", None)]
    #[case("foo", "\t", None)]
    #[case("foo\\", "", Some(3))]
    #[case("foo\\\\", "", None)]
    #[case("foo\\", " ", None)]
    #[case("foo", "", None)]
    fn detects(#[case] content: &str, #[case] trailing: &str, #[case] expected: Option<usize>) {
        assert_eq!(HardBreak::detect(content, trailing), expected);
    }
}
