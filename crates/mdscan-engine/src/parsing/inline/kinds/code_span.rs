/// Code spans: a backtick run closed by the next run of the same length.
///
/// Code spans are raw zones; nothing else is recognised inside them.
pub struct CodeSpan;

impl CodeSpan {
    pub const TICK: u8 = b'`';

    /// Normalises raw span content: line endings become spaces, and a single
    /// leading and trailing space are stripped when both are present and the
    /// content is not only spaces.
    ///
    /// Returns `(leading, text, trailing)` with the stripped spaces kept apart.
    pub fn normalize(raw: &str) -> (String, String, String) {
        let content = raw.replace('\n', " ");
        let strip = content.len() >= 2
            && content.starts_with(' ')
            && content.ends_with(' ')
            && !content.bytes().all(|b| b == b' ');
        if strip {
            let inner = content[1..content.len() - 1].to_string();
            (" ".to_string(), inner, " ".to_string())
        } else {
            (String::new(), content, String::new())
        }
    }
}
