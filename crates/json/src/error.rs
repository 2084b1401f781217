//! Error types for JSON parsing
//!
//! Every variant carries the byte offset where the problem was found, so
//! failures stay distinguishable at the call site.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ParseError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("Unexpected end of input at byte {0}")]
    UnexpectedEof(usize),

    #[error("Unexpected character {found:?} at byte {at}")]
    UnexpectedChar { found: char, at: usize },

    #[error("Expected {expected:?}, found {found:?} at byte {at}")]
    Expected {
        expected: char,
        found: char,
        at: usize,
    },

    #[error("Duplicate object key {key:?} at byte {at}")]
    DuplicateKey { key: String, at: usize },

    #[error("Unterminated string starting at byte {0}")]
    UnterminatedString(usize),

    #[error("Invalid escape sequence at byte {0}")]
    InvalidEscape(usize),

    #[error("Invalid number at byte {0}")]
    InvalidNumber(usize),

    #[error("Nesting deeper than {max} containers at byte {at}")]
    MaxDepthExceeded { at: usize, max: usize },

    #[error("Unexpected trailing characters at byte {0}")]
    TrailingCharacters(usize),
}
