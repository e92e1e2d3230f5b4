//! The schema parse error type.

use text_size::TextRange;
use thiserror::Error;

use crate::utils::{Join, Locatable};

use super::token::TokenKind;

/// The parse error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(
        "unexpected token (expected {}, found {})",
        .expected.iter().join(", "),
        .found,
    )]
    UnexpectedToken {
        expected: Vec<TokenKind>,
        found: TokenKind,
        range: TextRange,
    },
    #[error("unterminated block comment")]
    UnterminatedBlockComment { range: TextRange },
    #[error("unterminated string literal")]
    UnterminatedStr { range: TextRange },
    #[error("unknown token")]
    UnknownToken { range: TextRange },
}

impl Locatable for ParseError {
    fn range(&self) -> TextRange {
        match self {
            ParseError::UnexpectedToken { range, .. } => *range,
            ParseError::UnterminatedBlockComment { range } => *range,
            ParseError::UnterminatedStr { range } => *range,
            ParseError::UnknownToken { range } => *range,
        }
    }
}
