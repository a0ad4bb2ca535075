use crate::{
    parsing::TokenizerError,
    tokens::{BlockKind, MarkdownToken, TokenKind},
};

/// Checks that every opening token has exactly one matching end token in strict
/// LIFO order, that leaves hold no nested blocks, and that list items, text and
/// blank lines only appear where they can.
pub fn verify_token_stream(tokens: &[MarkdownToken]) -> Result<(), TokenizerError> {
    let mut open: Vec<BlockKind> = vec![];

    for (index, token) in tokens.iter().enumerate() {
        let unbalanced = |message: String| TokenizerError::UnbalancedTokens { index, message };
        let inside_leaf = open.last().is_some_and(|block| !block.is_container());

        match &token.kind {
            TokenKind::End { block, .. } => match open.pop() {
                Some(top) if top == *block => {}
                Some(top) => {
                    return Err(unbalanced(format!(
                        "`{}` while `{}` is open",
                        block.end_name(),
                        top.name()
                    )));
                }
                None => {
                    return Err(unbalanced(format!(
                        "`{}` without an open block",
                        block.end_name()
                    )));
                }
            },
            TokenKind::NewListItem { .. } => {
                if !matches!(
                    open.last(),
                    Some(BlockKind::UnorderedList | BlockKind::OrderedList)
                ) {
                    return Err(unbalanced("list item outside a list".to_string()));
                }
            }
            TokenKind::Text { .. } | TokenKind::CodeSpan { .. } | TokenKind::HardBreak { .. } => {
                if !inside_leaf {
                    return Err(unbalanced(format!("`{}` outside a leaf block", token.name())));
                }
            }
            TokenKind::BlankLine
            | TokenKind::ThematicBreak { .. }
            | TokenKind::FrontMatter { .. }
            | TokenKind::LinkReferenceDefinition { .. } => {
                if inside_leaf {
                    return Err(unbalanced(format!("`{}` inside a leaf block", token.name())));
                }
            }
            kind => {
                if let Some(block) = kind.opens_block() {
                    if inside_leaf {
                        return Err(unbalanced(format!(
                            "`{}` opened inside a leaf block",
                            block.name()
                        )));
                    }
                    open.push(block);
                }
            }
        }
    }

    match open.last() {
        Some(top) => Err(TokenizerError::UnbalancedTokens {
            index: tokens.len(),
            message: format!("`{}` never closed", top.name()),
        }),
        None => Ok(()),
    }
}
