use crate::tokens::ListKind;

use super::TokenizerError;

/// An open list together with the state of its current item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub kind: ListKind,
    /// Columns of indentation before the marker, relative to the parent's content.
    pub marker_offset: usize,
    /// Marker width plus the whitespace that belongs to the item prefix.
    pub padding: usize,
    /// Absolute (tab-expanded, 0-based) column where item content starts.
    pub indent_level: usize,
    /// False once the current item ended on a blank line; the list then waits one
    /// more line to see whether another item of the same list follows.
    pub item_open: bool,
    /// The current item contains at least one block.
    pub item_has_content: bool,
    /// A blank line was seen at the end of the current item.
    pub pending_blank: bool,
    pub is_loose: bool,
    /// Index of the list's opening token in the token stream.
    pub open_token_index: usize,
}

impl ListEntry {
    /// The required prefix width for an item continuation line.
    pub fn required_indent(&self) -> usize {
        self.marker_offset + self.padding
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockQuoteEntry {
    pub open_token_index: usize,
}

/// One active entry of the container stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackToken {
    BlockQuote(BlockQuoteEntry),
    List(ListEntry),
}

impl StackToken {
    pub fn type_name(&self) -> &'static str {
        match self {
            StackToken::BlockQuote(_) => "block-quote",
            StackToken::List(ListEntry {
                kind: ListKind::Bullet(_),
                ..
            }) => "unordered-list",
            StackToken::List(ListEntry {
                kind: ListKind::Ordered(_),
                ..
            }) => "ordered-list",
        }
    }

    pub fn as_list(&self) -> Option<&ListEntry> {
        match self {
            StackToken::List(entry) => Some(entry),
            StackToken::BlockQuote(_) => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut ListEntry> {
        match self {
            StackToken::List(entry) => Some(entry),
            StackToken::BlockQuote(_) => None,
        }
    }
}

/// Open containers from outermost (index 0) to innermost (last), with per-type
/// counters kept in lock-step with pushes and pops.
#[derive(Debug, Default, Clone)]
pub struct ContainerStack {
    entries: Vec<StackToken>,
    block_index: usize,
    ulist_index: usize,
    olist_index: usize,
}

impl ContainerStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: StackToken) {
        match &token {
            StackToken::BlockQuote(_) => self.block_index += 1,
            StackToken::List(ListEntry {
                kind: ListKind::Bullet(_),
                ..
            }) => self.ulist_index += 1,
            StackToken::List(ListEntry {
                kind: ListKind::Ordered(_),
                ..
            }) => self.olist_index += 1,
        }
        self.entries.push(token);
    }

    /// Removes the innermost container. Emitting its end token is the caller's job.
    pub fn pop(&mut self) -> Result<StackToken, TokenizerError> {
        let token = self.entries.pop().ok_or(TokenizerError::StackUnderflow)?;
        let counter = match &token {
            StackToken::BlockQuote(_) => &mut self.block_index,
            StackToken::List(ListEntry {
                kind: ListKind::Bullet(_),
                ..
            }) => &mut self.ulist_index,
            StackToken::List(ListEntry {
                kind: ListKind::Ordered(_),
                ..
            }) => &mut self.olist_index,
        };
        *counter = counter
            .checked_sub(1)
            .ok_or_else(|| TokenizerError::InvalidStackState {
                message: format!("{} counter underflow", token.type_name()),
            })?;
        Ok(token)
    }

    pub fn top(&self) -> Option<&StackToken> {
        self.entries.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut StackToken> {
        self.entries.last_mut()
    }

    pub fn get(&self, index: usize) -> Option<&StackToken> {
        self.entries.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut StackToken> {
        self.entries.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Outermost to innermost.
    pub fn iter(&self) -> impl Iterator<Item = &StackToken> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut StackToken> {
        self.entries.iter_mut()
    }

    pub fn block_index(&self) -> usize {
        self.block_index
    }

    pub fn ulist_index(&self) -> usize {
        self.ulist_index
    }

    pub fn olist_index(&self) -> usize {
        self.olist_index
    }

    /// Checks the counters against a recount of the entries.
    pub fn verify_indices(&self) -> Result<(), TokenizerError> {
        let mut counts = (0, 0, 0);
        for entry in &self.entries {
            match entry {
                StackToken::BlockQuote(_) => counts.0 += 1,
                StackToken::List(ListEntry {
                    kind: ListKind::Bullet(_),
                    ..
                }) => counts.1 += 1,
                StackToken::List(ListEntry {
                    kind: ListKind::Ordered(_),
                    ..
                }) => counts.2 += 1,
            }
        }
        if counts != (self.block_index, self.ulist_index, self.olist_index) {
            return Err(TokenizerError::InvalidStackState {
                message: format!(
                    "expected block/ulist/olist {:?}, counters are ({}, {}, {})",
                    counts, self.block_index, self.ulist_index, self.olist_index
                ),
            });
        }
        Ok(())
    }
}
