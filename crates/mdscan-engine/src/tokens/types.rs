/// A 1-based line/column pair.
///
/// Columns count characters (not bytes, not tab-expanded columns) from the start
/// of the physical line, so a token can always be located in the source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line_number: usize,
    pub column_number: usize,
}

impl Position {
    pub fn new(line_number: usize, column_number: usize) -> Self {
        Self {
            line_number,
            column_number,
        }
    }
}

/// The flavour of list a list token (or stack entry) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    /// `-`, `+` or `*`.
    Bullet(char),
    /// `.` or `)` after the item number.
    Ordered(char),
}

/// Blocks that are closed by an `end-*` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Paragraph,
    AtxHeading,
    SetextHeading,
    IndentedCodeBlock,
    FencedCodeBlock,
    HtmlBlock,
    BlockQuote,
    UnorderedList,
    OrderedList,
}

impl BlockKind {
    pub fn name(self) -> &'static str {
        match self {
            BlockKind::Paragraph => "para",
            BlockKind::AtxHeading => "atx",
            BlockKind::SetextHeading => "setext",
            BlockKind::IndentedCodeBlock => "icode-block",
            BlockKind::FencedCodeBlock => "fcode-block",
            BlockKind::HtmlBlock => "html-block",
            BlockKind::BlockQuote => "block-quote",
            BlockKind::UnorderedList => "ulist",
            BlockKind::OrderedList => "olist",
        }
    }

    pub fn end_name(self) -> &'static str {
        match self {
            BlockKind::Paragraph => "end-para",
            BlockKind::AtxHeading => "end-atx",
            BlockKind::SetextHeading => "end-setext",
            BlockKind::IndentedCodeBlock => "end-icode-block",
            BlockKind::FencedCodeBlock => "end-fcode-block",
            BlockKind::HtmlBlock => "end-html-block",
            BlockKind::BlockQuote => "end-block-quote",
            BlockKind::UnorderedList => "end-ulist",
            BlockKind::OrderedList => "end-olist",
        }
    }

    pub fn is_container(self) -> bool {
        matches!(
            self,
            BlockKind::BlockQuote | BlockKind::UnorderedList | BlockKind::OrderedList
        )
    }
}

/// Kind-specific token data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Paragraph,
    AtxHeading {
        hash_count: usize,
        /// Number of `#` characters in the closing sequence, 0 if none.
        remove_trailing_count: usize,
    },
    SetextHeading {
        heading_character: char,
        heading_character_count: usize,
        underline_whitespace: String,
        underline_trailing: String,
    },
    ThematicBreak {
        start_character: char,
        /// The break exactly as written, from the first marker to end of line.
        rest_of_line: String,
    },
    IndentedCodeBlock,
    FencedCodeBlock {
        fence_character: char,
        fence_count: usize,
        pre_info_whitespace: String,
        info_string: String,
        trailing_whitespace: String,
    },
    HtmlBlock {
        html_block_type: u8,
    },
    BlankLine,
    FrontMatter {
        start_fence: String,
        end_fence: String,
        lines: Vec<String>,
        matter: Vec<(String, String)>,
    },
    /// `[label]: destination "title"`, split off the start of a paragraph.
    /// `lines` holds every source line it spans, leading whitespace included.
    LinkReferenceDefinition {
        label: String,
        destination: String,
        title: Option<String>,
        lines: Vec<String>,
    },
    BlockQuote,
    UnorderedList {
        list_start_character: char,
        indent_level: usize,
        is_loose: bool,
    },
    OrderedList {
        delimiter: char,
        list_start_content: String,
        indent_level: usize,
        is_loose: bool,
    },
    NewListItem {
        indent_level: usize,
        /// Item number for ordered lists.
        list_start_content: Option<String>,
    },
    /// Leaf text. Block text tokens keep one entry per source line in
    /// `line_whitespace`/`end_whitespace`; inline text tokens leave both empty.
    Text {
        text: String,
        line_whitespace: Vec<String>,
        end_whitespace: Vec<String>,
    },
    CodeSpan {
        text: String,
        backtick_count: usize,
        leading_whitespace: String,
        trailing_whitespace: String,
    },
    HardBreak {
        line_end: String,
    },
    End {
        block: BlockKind,
        extra_end_data: String,
        was_forced: bool,
    },
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Paragraph => "para",
            TokenKind::AtxHeading { .. } => "atx",
            TokenKind::SetextHeading { .. } => "setext",
            TokenKind::ThematicBreak { .. } => "tbreak",
            TokenKind::IndentedCodeBlock => "icode-block",
            TokenKind::FencedCodeBlock { .. } => "fcode-block",
            TokenKind::HtmlBlock { .. } => "html-block",
            TokenKind::BlankLine => "BLANK",
            TokenKind::FrontMatter { .. } => "front-matter",
            TokenKind::LinkReferenceDefinition { .. } => "link-ref-def",
            TokenKind::BlockQuote => "block-quote",
            TokenKind::UnorderedList { .. } => "ulist",
            TokenKind::OrderedList { .. } => "olist",
            TokenKind::NewListItem { .. } => "li",
            TokenKind::Text { .. } => "text",
            TokenKind::CodeSpan { .. } => "icode-span",
            TokenKind::HardBreak { .. } => "hard-break",
            TokenKind::End { block, .. } => block.end_name(),
        }
    }

    /// The block this token opens, if it is closed later by an end token.
    pub fn opens_block(&self) -> Option<BlockKind> {
        match self {
            TokenKind::Paragraph => Some(BlockKind::Paragraph),
            TokenKind::AtxHeading { .. } => Some(BlockKind::AtxHeading),
            TokenKind::SetextHeading { .. } => Some(BlockKind::SetextHeading),
            TokenKind::IndentedCodeBlock => Some(BlockKind::IndentedCodeBlock),
            TokenKind::FencedCodeBlock { .. } => Some(BlockKind::FencedCodeBlock),
            TokenKind::HtmlBlock { .. } => Some(BlockKind::HtmlBlock),
            TokenKind::BlockQuote => Some(BlockKind::BlockQuote),
            TokenKind::UnorderedList { .. } => Some(BlockKind::UnorderedList),
            TokenKind::OrderedList { .. } => Some(BlockKind::OrderedList),
            _ => None,
        }
    }
}

/// One entry of the token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownToken {
    pub kind: TokenKind,
    /// Position of the first significant character; `None` for end tokens.
    pub position: Option<Position>,
    /// Literal source position when `position` is reported elsewhere
    /// (a setext heading is reported at its first text line, its underline is here).
    pub original_position: Option<Position>,
    /// Leading whitespace consumed to reach the token.
    pub extracted_whitespace: String,
}

impl MarkdownToken {
    pub fn new(kind: TokenKind, position: Position, extracted_whitespace: &str) -> Self {
        Self {
            kind,
            position: Some(position),
            original_position: None,
            extracted_whitespace: extracted_whitespace.to_string(),
        }
    }

    pub fn end(
        block: BlockKind,
        extracted_whitespace: &str,
        extra_end_data: &str,
        was_forced: bool,
    ) -> Self {
        Self {
            kind: TokenKind::End {
                block,
                extra_end_data: extra_end_data.to_string(),
                was_forced,
            },
            position: None,
            original_position: None,
            extracted_whitespace: extracted_whitespace.to_string(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn line_number(&self) -> usize {
        self.position.map_or(0, |p| p.line_number)
    }

    pub fn column_number(&self) -> usize {
        self.position.map_or(0, |p| p.column_number)
    }

    pub fn is_end(&self) -> bool {
        matches!(self.kind, TokenKind::End { .. })
    }

    pub fn is_end_of(&self, kind: BlockKind) -> bool {
        matches!(self.kind, TokenKind::End { block, .. } if block == kind)
    }

    pub fn is_blank(&self) -> bool {
        matches!(self.kind, TokenKind::BlankLine)
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, TokenKind::Text { .. })
    }

    pub fn is_container(&self) -> bool {
        self.kind.opens_block().is_some_and(BlockKind::is_container)
    }

    pub fn is_list(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::UnorderedList { .. } | TokenKind::OrderedList { .. }
        )
    }

    pub fn is_heading(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::AtxHeading { .. } | TokenKind::SetextHeading { .. }
        )
    }

    /// Heading level for ATX and setext headings.
    pub fn heading_level(&self) -> Option<usize> {
        match self.kind {
            TokenKind::AtxHeading { hash_count, .. } => Some(hash_count),
            TokenKind::SetextHeading {
                heading_character, ..
            } => Some(if heading_character == '=' { 1 } else { 2 }),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Text { text, .. } | TokenKind::CodeSpan { text, .. } => Some(text),
            _ => None,
        }
    }
}
