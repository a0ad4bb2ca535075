use log::{debug, trace};

use crate::{
    parsing::{
        TokenizerError,
        position_marker::PositionMarker,
        stack::{BlockQuoteEntry, ContainerStack, ListEntry, StackToken},
    },
    tokens::{BlockKind, ListKind, MarkdownToken, Position, TokenKind},
};

use super::kinds::{
    AtxHeading, AtxParts, BlockQuote, CodeFence, FenceClosing, FenceKind, FenceOpening,
    FrontMatterBlock, HtmlBlock, IndentedCode, LinkDefinition, LinkReference, List, ListMarker,
    Paragraph, SetextHeading, SetextUnderline, ThematicBreak,
};

/// One source line of leaf text, split the way text tokens store it.
#[derive(Debug, Clone)]
struct LeafLine {
    position: Position,
    whitespace: String,
    text: String,
    trailing: String,
}

impl LeafLine {
    fn new(position: Position, whitespace: &str, text: &str, trailing: &str) -> Self {
        Self {
            position,
            whitespace: whitespace.to_string(),
            text: text.to_string(),
            trailing: trailing.to_string(),
        }
    }
}

/// A blank line after indented code: a code line if the block continues,
/// a blank-line token if it closes.
#[derive(Debug, Clone)]
struct PendingBlank {
    code_line: LeafLine,
    position: Position,
    whitespace: String,
}

#[derive(Debug)]
enum LeafState {
    None,
    Paragraph {
        lines: Vec<LeafLine>,
    },
    IndentedCode {
        lines: Vec<LeafLine>,
        pending_blanks: Vec<PendingBlank>,
    },
    Fence {
        token: MarkdownToken,
        kind: FenceKind,
        fence_count: usize,
        fence_offset: usize,
        lines: Vec<LeafLine>,
    },
    Html {
        token: MarkdownToken,
        block_type: u8,
        lines: Vec<LeafLine>,
    },
}

/// Finished block tokens plus, for every line, the container prefix text
/// consumed before its leaf content.
#[derive(Debug, Default)]
pub struct BlockOutput {
    pub tokens: Vec<MarkdownToken>,
    pub line_prefixes: Vec<String>,
}

/// The line dispatcher.
///
/// For each line: match the open containers outermost to innermost, let an open
/// leaf claim the line, otherwise open new containers and leaves in an
/// iterative loop, and finally add the remainder as paragraph text or a blank
/// line. Leaf tokens are emitted when the leaf closes, so tokens always leave
/// in document order.
pub struct BlockBuilder {
    stack: ContainerStack,
    leaf: LeafState,
    out: Vec<MarkdownToken>,
    line_prefixes: Vec<String>,
    lines_seen: usize,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self {
            stack: ContainerStack::new(),
            leaf: LeafState::None,
            out: vec![],
            line_prefixes: vec![],
            lines_seen: 0,
        }
    }

    /// Emits a front matter block covering the first lines of the document.
    pub fn push_front_matter(&mut self, block: FrontMatterBlock) {
        let count = block.line_count();
        self.out.push(MarkdownToken::new(
            TokenKind::FrontMatter {
                start_fence: block.start_fence,
                end_fence: block.end_fence,
                lines: block.lines,
                matter: block.matter,
            },
            Position::new(1, 1),
            "",
        ));
        self.lines_seen += count;
        self.line_prefixes
            .extend(std::iter::repeat_n(String::new(), count));
    }

    pub fn push(&mut self, line_number: usize, line: &str) -> Result<(), TokenizerError> {
        self.lines_seen += 1;
        let mut pm = PositionMarker::new(line_number, line);

        let matched = self.match_containers(&mut pm);
        let all_matched = matched == self.stack.len();
        let blank = pm.is_blank();
        trace!(
            "line {line_number}: {matched} of {} containers matched, blank: {blank}",
            self.stack.len()
        );

        let consumed = all_matched && self.continue_leaf(&mut pm)?;
        if !consumed {
            self.open_new_blocks(&mut pm, matched, all_matched)?;
        }
        self.end_line(blank)
    }

    /// Force-closes everything still open at end of input.
    pub fn finish(mut self) -> Result<BlockOutput, TokenizerError> {
        self.close_leaf(true)?;
        self.close_containers_from(0, true)?;
        Ok(BlockOutput {
            tokens: self.out,
            line_prefixes: self.line_prefixes,
        })
    }

    fn match_containers(&self, pm: &mut PositionMarker<'_>) -> usize {
        let mut matched = 0;
        for entry in self.stack.iter() {
            let continues = match entry {
                StackToken::BlockQuote(_) => {
                    let found = BlockQuote::detect(pm);
                    if found {
                        BlockQuote::consume_prefix(pm);
                    }
                    found
                }
                StackToken::List(list) => {
                    if !list.item_open {
                        false
                    } else if pm.indent() >= list.required_indent() {
                        pm.advance_offset(list.required_indent(), true);
                        true
                    } else if pm.is_blank() && list.item_has_content {
                        pm.advance_to_first_nonspace();
                        true
                    } else {
                        false
                    }
                }
            };
            if !continues {
                break;
            }
            matched += 1;
        }
        matched
    }

    /// Offers the line to an open fenced code, HTML or indented code block.
    /// Returns true if the leaf consumed the whole line.
    fn continue_leaf(&mut self, pm: &mut PositionMarker<'_>) -> Result<bool, TokenizerError> {
        match self.leaf {
            LeafState::Fence {
                kind,
                fence_count,
                fence_offset,
                ..
            } => {
                self.record_prefix(pm);
                if pm.indent() <= BlockQuote::MAX_INDENT {
                    if let Some(closing) =
                        CodeFence::parse_closing(kind, fence_count, pm.from_first_nonspace())
                    {
                        self.close_fence(pm.leading_whitespace(), &closing);
                        return Ok(true);
                    }
                }

                let start = pm.index_number();
                let mut remaining = fence_offset;
                while remaining > 0 && pm.is_space_or_tab() {
                    pm.advance_offset(1, true);
                    remaining -= 1;
                }
                let line = LeafLine::new(
                    pm.position(),
                    &pm.text_to_parse()[start..pm.index_number()],
                    pm.remaining(),
                    "",
                );
                if let LeafState::Fence { lines, .. } = &mut self.leaf {
                    lines.push(line);
                }
                Ok(true)
            }
            LeafState::Html { block_type, .. } => {
                if HtmlBlock::ends_on_blank_line(block_type) && pm.is_blank() {
                    return Ok(false);
                }
                self.record_prefix(pm);
                self.add_html_line(pm);
                if HtmlBlock::ends(block_type, pm.remaining()) {
                    self.close_leaf(false)?;
                }
                Ok(true)
            }
            LeafState::IndentedCode { .. } => {
                if pm.is_blank() {
                    self.record_prefix(pm);
                    let position = pm.position();
                    let whitespace = pm.remaining();
                    let (ws, rest) = IndentedCode::strip_indent(pm);
                    let blank = PendingBlank {
                        code_line: LeafLine::new(pm.position(), ws, rest, ""),
                        position,
                        whitespace: whitespace.to_string(),
                    };
                    if let LeafState::IndentedCode { pending_blanks, .. } = &mut self.leaf {
                        pending_blanks.push(blank);
                    }
                    self.mark_pending_blank();
                    Ok(true)
                } else if pm.indent() >= IndentedCode::INDENT {
                    self.record_prefix(pm);
                    let (ws, rest) = IndentedCode::strip_indent(pm);
                    let line = LeafLine::new(pm.position(), ws, rest, "");
                    if let LeafState::IndentedCode {
                        lines,
                        pending_blanks,
                    } = &mut self.leaf
                    {
                        lines.extend(pending_blanks.drain(..).map(|b| b.code_line));
                        lines.push(line);
                    }
                    Ok(true)
                } else {
                    Ok(false)
                }
            }
            LeafState::Paragraph { .. } | LeafState::None => Ok(false),
        }
    }

    fn open_new_blocks(
        &mut self,
        pm: &mut PositionMarker<'_>,
        matched: usize,
        all_matched: bool,
    ) -> Result<(), TokenizerError> {
        let mut maybe_lazy = matches!(self.leaf, LeafState::Paragraph { .. });
        let mut depth = matched;

        loop {
            let container_is_paragraph = all_matched
                && depth == matched
                && matches!(self.leaf, LeafState::Paragraph { .. });
            let indented = pm.indent() >= IndentedCode::INDENT;
            let text = pm.from_first_nonspace();

            if indented {
                if !maybe_lazy && !pm.is_blank() {
                    self.prepare_for_new_block(depth)?;
                    self.record_prefix(pm);
                    self.open_indented_code(pm);
                    return Ok(());
                }
                break;
            }

            if BlockQuote::detect(pm) {
                self.prepare_for_new_block(depth)?;
                self.open_block_quote(pm);
                depth += 1;
                maybe_lazy = false;
                continue;
            }
            if let Some(parts) = AtxHeading::parse(text) {
                self.prepare_for_new_block(depth)?;
                self.record_prefix(pm);
                self.emit_atx(pm, &parts);
                return Ok(());
            }
            if let Some(opening) = CodeFence::parse_opening(text) {
                self.prepare_for_new_block(depth)?;
                self.record_prefix(pm);
                self.open_fence(pm, &opening);
                return Ok(());
            }
            if let Some(block_type) = HtmlBlock::start_condition(text, !container_is_paragraph) {
                self.prepare_for_new_block(depth)?;
                self.record_prefix(pm);
                self.open_html(pm, block_type)?;
                return Ok(());
            }
            if container_is_paragraph
                && let Some(underline) = SetextHeading::parse_underline(text)
                && !self.paragraph_is_only_definitions()
            {
                self.record_prefix(pm);
                return self.convert_to_setext(pm, &underline);
            }
            if let Some(start_character) = ThematicBreak::parse(text) {
                self.prepare_for_new_block(depth)?;
                self.record_prefix(pm);
                self.emit_thematic_break(pm, start_character);
                return Ok(());
            }
            if let Some(marker) = List::parse_marker(text, container_is_paragraph) {
                self.open_list_item(pm, &marker, depth, matched)?;
                depth += 1;
                maybe_lazy = false;
                continue;
            }
            break;
        }

        self.add_text(pm, matched, depth > matched)
    }

    /// Adds whatever is left of the line once no new leaf claimed it: a lazy or
    /// regular paragraph continuation, a blank line, or a new paragraph.
    fn add_text(
        &mut self,
        pm: &PositionMarker<'_>,
        matched: usize,
        opened_container: bool,
    ) -> Result<(), TokenizerError> {
        let blank = pm.is_blank();
        if !opened_container && !blank && matches!(self.leaf, LeafState::Paragraph { .. }) {
            self.record_prefix(pm);
            self.add_paragraph_line(pm);
            return Ok(());
        }

        self.close_leaf(false)?;
        if !opened_container {
            let unmatched_list = self.stack.get(matched).and_then(StackToken::as_list).is_some();
            if blank && unmatched_list {
                // The item ended; the list waits for the next line to show
                // whether another item follows. If one does, this blank line
                // separates the two items and the list is loose.
                self.close_containers_from(matched + 1, false)?;
                if let Some(list) = self.stack.get_mut(matched).and_then(StackToken::as_list_mut) {
                    list.item_open = false;
                    list.pending_blank = true;
                }
            } else {
                self.close_containers_from(matched, false)?;
            }
        }

        self.record_prefix(pm);
        if blank {
            self.out.push(MarkdownToken::new(
                TokenKind::BlankLine,
                pm.position(),
                pm.remaining(),
            ));
            if !opened_container {
                self.mark_pending_blank();
            }
        } else {
            self.start_child();
            self.start_paragraph(pm);
        }
        Ok(())
    }

    fn end_line(&mut self, blank: bool) -> Result<(), TokenizerError> {
        self.stack.verify_indices()?;
        if self.line_prefixes.len() != self.lines_seen {
            return Err(TokenizerError::InvalidStackState {
                message: format!(
                    "line {} produced {} container prefixes",
                    self.lines_seen,
                    self.line_prefixes.len()
                ),
            });
        }
        if !blank {
            for entry in self.stack.iter_mut() {
                if let Some(list) = entry.as_list_mut() {
                    list.pending_blank = false;
                }
            }
        }
        Ok(())
    }

    fn record_prefix(&mut self, pm: &PositionMarker<'_>) {
        self.line_prefixes.push(pm.consumed().to_string());
    }

    /// Closes the open leaf and every container at `depth` or deeper, then
    /// registers a new child in the container at `depth - 1`.
    fn prepare_for_new_block(&mut self, depth: usize) -> Result<(), TokenizerError> {
        self.close_leaf(false)?;
        self.close_containers_from(depth, false)?;
        self.start_child();
        Ok(())
    }

    /// A block is starting inside the innermost container. A blank line seen
    /// earlier in the same list item makes the list loose.
    fn start_child(&mut self) {
        if let Some(StackToken::List(list)) = self.stack.top_mut() {
            if list.pending_blank {
                list.is_loose = true;
                mark_loose(&mut self.out, list.open_token_index);
            }
            list.pending_blank = false;
            list.item_has_content = true;
        }
    }

    fn mark_pending_blank(&mut self) {
        if let Some(StackToken::List(list)) = self.stack.top_mut() {
            if list.item_open {
                list.pending_blank = true;
            }
        }
    }

    fn close_containers_from(
        &mut self,
        depth: usize,
        was_forced: bool,
    ) -> Result<(), TokenizerError> {
        while self.stack.len() > depth {
            let entry = self.stack.pop()?;
            let block = match &entry {
                StackToken::BlockQuote(_) => BlockKind::BlockQuote,
                StackToken::List(ListEntry {
                    kind: ListKind::Bullet(_),
                    ..
                }) => BlockKind::UnorderedList,
                StackToken::List(ListEntry {
                    kind: ListKind::Ordered(_),
                    ..
                }) => BlockKind::OrderedList,
            };
            // A blank line ending a nested list also ends the enclosing item.
            if entry.as_list().is_some_and(|list| list.pending_blank) {
                if let Some(StackToken::List(parent)) = self.stack.top_mut() {
                    parent.pending_blank = true;
                }
            }
            debug!("closing {} (forced: {was_forced})", entry.type_name());
            self.out
                .push(MarkdownToken::end(block, "", "", was_forced));
        }
        Ok(())
    }

    fn close_leaf(&mut self, was_forced: bool) -> Result<(), TokenizerError> {
        match std::mem::replace(&mut self.leaf, LeafState::None) {
            LeafState::None => {}
            LeafState::Paragraph { lines } => {
                if lines.is_empty() {
                    return Err(TokenizerError::InvalidStackState {
                        message: "paragraph without lines".to_string(),
                    });
                }
                let lines = self.emit_definitions(lines);
                let Some(first) = lines.first() else {
                    return Ok(());
                };
                self.out.push(MarkdownToken::new(
                    TokenKind::Paragraph,
                    first.position,
                    &first.whitespace,
                ));
                self.out.extend(text_token(&lines));
                self.out
                    .push(MarkdownToken::end(BlockKind::Paragraph, "", "", was_forced));
            }
            LeafState::IndentedCode {
                lines,
                pending_blanks,
            } => {
                let Some(first) = lines.first() else {
                    return Err(TokenizerError::InvalidStackState {
                        message: "indented code block without lines".to_string(),
                    });
                };
                self.out.push(MarkdownToken::new(
                    TokenKind::IndentedCodeBlock,
                    first.position,
                    &first.whitespace,
                ));
                self.out.extend(text_token(&lines));
                self.out.push(MarkdownToken::end(
                    BlockKind::IndentedCodeBlock,
                    "",
                    "",
                    was_forced,
                ));
                for blank in pending_blanks {
                    self.out.push(MarkdownToken::new(
                        TokenKind::BlankLine,
                        blank.position,
                        &blank.whitespace,
                    ));
                }
            }
            LeafState::Fence { token, lines, .. } => {
                self.out.push(token);
                self.out.extend(text_token(&lines));
                self.out
                    .push(MarkdownToken::end(BlockKind::FencedCodeBlock, "", "", true));
            }
            LeafState::Html { token, lines, .. } => {
                self.out.push(token);
                self.out.extend(text_token(&lines));
                self.out
                    .push(MarkdownToken::end(BlockKind::HtmlBlock, "", "", was_forced));
            }
        }
        Ok(())
    }

    fn close_fence(&mut self, closing_whitespace: &str, closing: &FenceClosing<'_>) {
        if let LeafState::Fence { token, lines, .. } =
            std::mem::replace(&mut self.leaf, LeafState::None)
        {
            self.out.push(token);
            self.out.extend(text_token(&lines));
            let extra = format!("{}{}", closing.fence, closing.trailing_whitespace);
            self.out.push(MarkdownToken::end(
                BlockKind::FencedCodeBlock,
                closing_whitespace,
                &extra,
                false,
            ));
        }
    }

    fn open_block_quote(&mut self, pm: &mut PositionMarker<'_>) {
        let position = pm.first_nonspace_position();
        let whitespace = pm.leading_whitespace();
        BlockQuote::consume_prefix(pm);

        let open_token_index = self.out.len();
        self.out
            .push(MarkdownToken::new(TokenKind::BlockQuote, position, whitespace));
        self.stack
            .push(StackToken::BlockQuote(BlockQuoteEntry { open_token_index }));
        debug!("opened block quote at {position:?}");
    }

    /// Starts a list item: either the next item of the list at `depth` or the
    /// first item of a new list.
    fn open_list_item(
        &mut self,
        pm: &mut PositionMarker<'_>,
        marker: &ListMarker,
        depth: usize,
        matched: usize,
    ) -> Result<(), TokenizerError> {
        let position = pm.first_nonspace_position();
        let whitespace = pm.leading_whitespace();
        let marker_offset = pm.indent();
        let marker_column = pm.first_nonspace_column();
        pm.advance_to_first_nonspace();
        let padding = List::consume_marker(pm, marker);
        let indent_level = marker_column + padding;

        let continues_list = depth == matched
            && self
                .stack
                .get(depth)
                .and_then(StackToken::as_list)
                .is_some_and(|list| List::lists_match(list.kind, marker.kind));

        if continues_list {
            self.close_leaf(false)?;
            self.close_containers_from(depth + 1, false)?;
            let Some(list) = self.stack.get_mut(depth).and_then(StackToken::as_list_mut) else {
                return Err(TokenizerError::InvalidStackState {
                    message: format!("expected a list at container depth {depth}"),
                });
            };
            if list.pending_blank {
                list.is_loose = true;
                mark_loose(&mut self.out, list.open_token_index);
            }
            list.pending_blank = false;
            list.marker_offset = marker_offset;
            list.padding = padding;
            list.indent_level = indent_level;
            list.item_open = true;
            list.item_has_content = false;

            self.out.push(MarkdownToken::new(
                TokenKind::NewListItem {
                    indent_level,
                    list_start_content: marker.start.clone(),
                },
                position,
                whitespace,
            ));
            debug!("new list item at {position:?}");
            return Ok(());
        }

        self.prepare_for_new_block(depth)?;
        let kind = match marker.kind {
            ListKind::Bullet(list_start_character) => TokenKind::UnorderedList {
                list_start_character,
                indent_level,
                is_loose: false,
            },
            ListKind::Ordered(delimiter) => TokenKind::OrderedList {
                delimiter,
                list_start_content: marker.start.clone().unwrap_or_default(),
                indent_level,
                is_loose: false,
            },
        };
        let open_token_index = self.out.len();
        self.out.push(MarkdownToken::new(kind, position, whitespace));
        self.stack.push(StackToken::List(ListEntry {
            kind: marker.kind,
            marker_offset,
            padding,
            indent_level,
            item_open: true,
            item_has_content: false,
            pending_blank: false,
            is_loose: false,
            open_token_index,
        }));
        debug!("opened list at {position:?}, content column {indent_level}");
        Ok(())
    }

    fn emit_atx(&mut self, pm: &PositionMarker<'_>, parts: &AtxParts<'_>) {
        let text_index = pm.first_nonspace() + parts.text_offset();
        self.out.push(MarkdownToken::new(
            TokenKind::AtxHeading {
                hash_count: parts.hash_count,
                remove_trailing_count: parts.remove_trailing_count,
            },
            pm.first_nonspace_position(),
            pm.leading_whitespace(),
        ));
        self.out.push(MarkdownToken::new(
            TokenKind::Text {
                text: parts.text.to_string(),
                line_whitespace: vec![parts.pre_text_whitespace.to_string()],
                end_whitespace: vec![String::new()],
            },
            pm.position_at(text_index),
            "",
        ));
        self.out
            .push(MarkdownToken::end(BlockKind::AtxHeading, "", parts.closing, false));
    }

    fn emit_thematic_break(&mut self, pm: &PositionMarker<'_>, start_character: char) {
        self.out.push(MarkdownToken::new(
            TokenKind::ThematicBreak {
                start_character,
                rest_of_line: pm.from_first_nonspace().to_string(),
            },
            pm.first_nonspace_position(),
            pm.leading_whitespace(),
        ));
    }

    fn convert_to_setext(
        &mut self,
        pm: &PositionMarker<'_>,
        underline: &SetextUnderline<'_>,
    ) -> Result<(), TokenizerError> {
        let LeafState::Paragraph { lines } = std::mem::replace(&mut self.leaf, LeafState::None)
        else {
            return Err(TokenizerError::InvalidStackState {
                message: "setext underline without an open paragraph".to_string(),
            });
        };
        let lines = self.emit_definitions(lines);
        let Some(first) = lines.first() else {
            return Err(TokenizerError::InvalidStackState {
                message: "setext underline under link reference definitions only".to_string(),
            });
        };

        let mut token = MarkdownToken::new(
            TokenKind::SetextHeading {
                heading_character: underline.character,
                heading_character_count: underline.count,
                underline_whitespace: pm.leading_whitespace().to_string(),
                underline_trailing: underline.trailing.to_string(),
            },
            first.position,
            &first.whitespace,
        );
        token.original_position = Some(pm.first_nonspace_position());
        self.out.push(token);
        self.out.extend(text_token(&lines));
        self.out
            .push(MarkdownToken::end(BlockKind::SetextHeading, "", "", false));
        Ok(())
    }

    fn open_fence(&mut self, pm: &PositionMarker<'_>, opening: &FenceOpening<'_>) {
        let token = MarkdownToken::new(
            TokenKind::FencedCodeBlock {
                fence_character: opening.kind.character(),
                fence_count: opening.fence_count,
                pre_info_whitespace: opening.pre_info_whitespace.to_string(),
                info_string: opening.info_string.to_string(),
                trailing_whitespace: opening.trailing_whitespace.to_string(),
            },
            pm.first_nonspace_position(),
            pm.leading_whitespace(),
        );
        self.leaf = LeafState::Fence {
            token,
            kind: opening.kind,
            fence_count: opening.fence_count,
            fence_offset: pm.indent(),
            lines: vec![],
        };
    }

    fn open_html(&mut self, pm: &PositionMarker<'_>, block_type: u8) -> Result<(), TokenizerError> {
        let token = MarkdownToken::new(
            TokenKind::HtmlBlock {
                html_block_type: block_type,
            },
            pm.first_nonspace_position(),
            "",
        );
        self.leaf = LeafState::Html {
            token,
            block_type,
            lines: vec![],
        };
        self.add_html_line(pm);
        if HtmlBlock::ends(block_type, pm.from_first_nonspace()) {
            self.close_leaf(false)?;
        }
        Ok(())
    }

    fn add_html_line(&mut self, pm: &PositionMarker<'_>) {
        let line = LeafLine::new(
            pm.first_nonspace_position(),
            pm.leading_whitespace(),
            pm.from_first_nonspace(),
            "",
        );
        if let LeafState::Html { lines, .. } = &mut self.leaf {
            lines.push(line);
        }
    }

    fn open_indented_code(&mut self, pm: &mut PositionMarker<'_>) {
        let (ws, rest) = IndentedCode::strip_indent(pm);
        self.leaf = LeafState::IndentedCode {
            lines: vec![LeafLine::new(pm.position(), ws, rest, "")],
            pending_blanks: vec![],
        };
    }

    /// Pushes a token for each link reference definition opening the
    /// paragraph and returns the lines that remain paragraph text.
    fn emit_definitions(&mut self, lines: Vec<LeafLine>) -> Vec<LeafLine> {
        let definitions = leading_definitions(&lines);
        let mut lines = lines.into_iter();
        for definition in definitions {
            let spanned: Vec<LeafLine> = lines.by_ref().take(definition.line_count).collect();
            let Some(first) = spanned.first() else {
                break;
            };
            trace!("link reference definition [{}]", definition.label);
            let token = MarkdownToken::new(
                TokenKind::LinkReferenceDefinition {
                    label: definition.label,
                    destination: definition.destination,
                    title: definition.title,
                    lines: spanned
                        .iter()
                        .map(|l| format!("{}{}{}", l.whitespace, l.text, l.trailing))
                        .collect(),
                },
                first.position,
                &first.whitespace,
            );
            self.out.push(token);
        }
        lines.collect()
    }

    /// A paragraph made only of definitions cannot become a setext heading.
    fn paragraph_is_only_definitions(&self) -> bool {
        let LeafState::Paragraph { lines } = &self.leaf else {
            return false;
        };
        let spanned: usize = leading_definitions(lines)
            .iter()
            .map(|d| d.line_count)
            .sum();
        spanned == lines.len()
    }

    fn paragraph_line(pm: &PositionMarker<'_>) -> LeafLine {
        let (whitespace, text, trailing) = Paragraph::split_line(pm.remaining());
        LeafLine::new(pm.first_nonspace_position(), whitespace, text, trailing)
    }

    fn start_paragraph(&mut self, pm: &PositionMarker<'_>) {
        self.leaf = LeafState::Paragraph {
            lines: vec![Self::paragraph_line(pm)],
        };
    }

    fn add_paragraph_line(&mut self, pm: &PositionMarker<'_>) {
        let line = Self::paragraph_line(pm);
        if let LeafState::Paragraph { lines } = &mut self.leaf {
            lines.push(line);
        }
    }
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn leading_definitions(lines: &[LeafLine]) -> Vec<LinkDefinition> {
    let mut found = vec![];
    let mut start = 0;
    while let Some(first) = lines.get(start)
        && first.text.starts_with('[')
    {
        let text = lines[start..]
            .iter()
            .enumerate()
            .map(|(index, l)| {
                let leading = if index == 0 { "" } else { l.whitespace.as_str() };
                format!("{leading}{}{}", l.text, l.trailing)
            })
            .collect::<Vec<_>>()
            .join("\n");
        let Some(definition) = LinkReference::parse(&text) else {
            break;
        };
        start += definition.line_count;
        found.push(definition);
    }
    found
}

fn text_token(lines: &[LeafLine]) -> Option<MarkdownToken> {
    let first = lines.first()?;
    let text = lines
        .iter()
        .map(|l| l.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    Some(MarkdownToken::new(
        TokenKind::Text {
            text,
            line_whitespace: lines.iter().map(|l| l.whitespace.clone()).collect(),
            end_whitespace: lines.iter().map(|l| l.trailing.clone()).collect(),
        },
        first.position,
        "",
    ))
}

fn mark_loose(tokens: &mut [MarkdownToken], index: usize) {
    if let Some(token) = tokens.get_mut(index) {
        if let TokenKind::UnorderedList { is_loose, .. } | TokenKind::OrderedList { is_loose, .. } =
            &mut token.kind
        {
            *is_loose = true;
        }
    }
}
