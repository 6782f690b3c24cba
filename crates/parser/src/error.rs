//! Error types for the NumScript tokenizer.

use thiserror::Error;

/// Errors produced while turning source text into a script.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A token is not a (64-bit) integer.
    #[error("line {line}: invalid token '{token}'")]
    InvalidToken { line: usize, token: String },
}
