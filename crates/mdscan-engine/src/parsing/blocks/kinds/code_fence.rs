use crate::parsing::parser_helper::ParserHelper;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

impl FenceKind {
    pub fn character(self) -> char {
        match self {
            FenceKind::Backticks => '`',
            FenceKind::Tildes => '~',
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            '`' => Some(FenceKind::Backticks),
            '~' => Some(FenceKind::Tildes),
            _ => None,
        }
    }
}

/// An opening fence line, split so the pieces concatenate back to the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenceOpening<'a> {
    pub kind: FenceKind,
    pub fence_count: usize,
    pub pre_info_whitespace: &'a str,
    pub info_string: &'a str,
    pub trailing_whitespace: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenceClosing<'a> {
    pub fence: &'a str,
    pub trailing_whitespace: &'a str,
}

pub struct CodeFence;

impl CodeFence {
    pub const MIN_FENCE: usize = 3;

    /// Parses an opening fence starting at its first fence character.
    ///
    /// A backtick fence's info string may not itself contain a backtick.
    pub fn parse_opening(text: &str) -> Option<FenceOpening<'_>> {
        let kind = FenceKind::from_char(text.chars().next()?)?;
        let (fence_count, after_fence) =
            ParserHelper::collect_while_character(text, 0, kind.character())?;
        if fence_count < Self::MIN_FENCE {
            return None;
        }

        let (info_start, pre_info_whitespace) =
            ParserHelper::extract_ascii_whitespace(text, after_fence)?;
        let (info_string, trailing_whitespace) =
            ParserHelper::split_trailing_whitespace(&text[info_start..]);
        if kind == FenceKind::Backticks && info_string.contains('`') {
            return None;
        }

        Some(FenceOpening {
            kind,
            fence_count,
            pre_info_whitespace,
            info_string,
            trailing_whitespace,
        })
    }

    /// Parses a closing fence for a block opened with `kind` × `fence_count`.
    pub fn parse_closing(
        kind: FenceKind,
        fence_count: usize,
        text: &str,
    ) -> Option<FenceClosing<'_>> {
        let (count, after_fence) =
            ParserHelper::collect_while_character(text, 0, kind.character())?;
        if count < fence_count.max(Self::MIN_FENCE) {
            return None;
        }
        let trailing_whitespace = &text[after_fence..];
        if !ParserHelper::is_blank(trailing_whitespace) {
            return None;
        }
        Some(FenceClosing {
            fence: &text[..after_fence],
            trailing_whitespace,
        })
    }
}
