/// Internal invariant violations detected while tokenizing.
///
/// None of these are caused by the input: every string is valid Markdown. They
/// abort the current document instead of producing a malformed token stream.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum TokenizerError {
    #[error("container stack underflow")]
    StackUnderflow,
    #[error("invalid container stack state: {message}")]
    InvalidStackState { message: String },
    #[error("unbalanced token stream at token {index}: {message}")]
    UnbalancedTokens { index: usize, message: String },
}
