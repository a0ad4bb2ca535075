//! Narrow, named-field token modification used by fixing rules.
//!
//! Only a whitelisted set of field/value combinations is accepted per token kind.
//! A rejected modification leaves the token untouched.

use super::types::{MarkdownToken, TokenKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Number(usize),
    Text(String),
}

impl From<usize> for FieldValue {
    fn from(value: usize) -> Self {
        FieldValue::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("token `{token}` has no modifiable field `{field}`")]
    UnknownField { token: &'static str, field: String },
    #[error("invalid value {value:?} for field `{field}` of token `{token}`")]
    InvalidValue {
        token: &'static str,
        field: String,
        value: FieldValue,
    },
}

const MAX_ORDERED_DIGITS: usize = 9;

impl MarkdownToken {
    /// Sets `field` to `value` if the combination is allowed for this token kind.
    pub fn modify_token(
        &mut self,
        field: &str,
        value: impl Into<FieldValue>,
    ) -> Result<(), FieldError> {
        let value = value.into();
        let token = self.name();
        let invalid = |value: FieldValue| FieldError::InvalidValue {
            token,
            field: field.to_string(),
            value,
        };

        if field == "extracted_whitespace" {
            return match value {
                FieldValue::Text(ws) if ws.chars().all(|c| c == ' ' || c == '\t') => {
                    self.extracted_whitespace = ws;
                    Ok(())
                }
                other => Err(invalid(other)),
            };
        }

        match (&mut self.kind, field, value) {
            (TokenKind::AtxHeading { hash_count, .. }, "hash_count", FieldValue::Number(n)) => {
                if !(1..=6).contains(&n) {
                    return Err(invalid(FieldValue::Number(n)));
                }
                *hash_count = n;
                Ok(())
            }
            (
                TokenKind::FencedCodeBlock {
                    fence_character,
                    info_string,
                    ..
                },
                "info_string",
                FieldValue::Text(info),
            ) => {
                if info.contains('\n') || (*fence_character == '`' && info.contains('`')) {
                    return Err(invalid(FieldValue::Text(info)));
                }
                *info_string = info;
                Ok(())
            }
            (
                TokenKind::FencedCodeBlock { fence_count, .. },
                "fence_count",
                FieldValue::Number(n),
            ) => {
                if n < 3 {
                    return Err(invalid(FieldValue::Number(n)));
                }
                *fence_count = n;
                Ok(())
            }
            (
                TokenKind::OrderedList {
                    list_start_content, ..
                }
                | TokenKind::NewListItem {
                    list_start_content: Some(list_start_content),
                    ..
                },
                "list_start_content",
                FieldValue::Text(content),
            ) => {
                let valid = !content.is_empty()
                    && content.len() <= MAX_ORDERED_DIGITS
                    && content.bytes().all(|b| b.is_ascii_digit());
                if !valid {
                    return Err(invalid(FieldValue::Text(content)));
                }
                *list_start_content = content;
                Ok(())
            }
            (
                TokenKind::ThematicBreak {
                    start_character,
                    rest_of_line,
                },
                "rest_of_line",
                FieldValue::Text(rest),
            ) => {
                let markers = rest.chars().filter(|c| *c == *start_character).count();
                let only_markers = rest
                    .chars()
                    .all(|c| c == *start_character || c == ' ' || c == '\t');
                if markers < 3 || !only_markers || !rest.starts_with(*start_character) {
                    return Err(invalid(FieldValue::Text(rest)));
                }
                *rest_of_line = rest;
                Ok(())
            }
            (
                TokenKind::AtxHeading { .. }
                | TokenKind::FencedCodeBlock { .. }
                | TokenKind::OrderedList { .. }
                | TokenKind::NewListItem { .. }
                | TokenKind::ThematicBreak { .. },
                "hash_count" | "info_string" | "fence_count" | "list_start_content"
                | "rest_of_line",
                value,
            ) if Self::is_field_of(token, field) => Err(invalid(value)),
            _ => Err(FieldError::UnknownField {
                token,
                field: field.to_string(),
            }),
        }
    }

    fn is_field_of(token: &str, field: &str) -> bool {
        matches!(
            (token, field),
            ("atx", "hash_count")
                | ("fcode-block", "info_string" | "fence_count")
                | ("olist" | "li", "list_start_content")
                | ("tbreak", "rest_of_line")
        )
    }
}
