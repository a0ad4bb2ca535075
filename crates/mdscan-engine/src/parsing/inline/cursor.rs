/// A byte cursor over a leaf's joined inline text.
///
/// Only ASCII delimiters are ever compared, so the cursor may step through the
/// middle of a multi-byte character without harm; slicing happens at delimiter
/// positions only.
#[derive(Clone)]
pub struct Cursor<'a> {
    s: &'a str,
    i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// Current byte offset.
    pub fn pos(&self) -> usize {
        self.i
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// The byte after the current one.
    pub fn peek_next(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i + 1).copied()
    }

    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s
            .as_bytes()
            .get(self.i..)
            .is_some_and(|rest| rest.starts_with(pat))
    }

    /// Length of the run of `b` starting at the cursor.
    pub fn run_length(&self, b: u8) -> usize {
        self.s
            .as_bytes()
            .get(self.i..)
            .map_or(0, |rest| rest.iter().take_while(|&&c| c == b).count())
    }

    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.i += 1;
        Some(b)
    }

    /// Advances by `n` bytes, stopping at the end of input.
    pub fn bump_n(&mut self, n: usize) {
        self.i = (self.i + n).min(self.s.len());
    }
}
