//! Runtime errors for the NumScript VM.
//!
//! Engine operations fail with an [`ErrorKind`]. The run loop wraps it in a
//! [`RuntimeError`] carrying the offending statement, so every report names
//! the line and tokens that triggered it. All runtime errors are fatal.

use numscript_common::{DecodeError, Object, ObjectKind};
use thiserror::Error;

/// What went wrong, independent of where.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// Unknown opcode, unknown variant, or wrong argument count.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// DECLARE_LOCAL into a slot the current scope already holds.
    #[error("symbol {addr} redeclared")]
    SymbolRedeclaration { addr: i64 },

    /// Local address not covered by any scope on the chain.
    #[error("symbol {addr} not found")]
    SymbolNotFound { addr: i64 },

    /// GOTO to an undeclared label, or a forward scan that hit end of script.
    #[error("label {label} not found")]
    LabelNotFound { label: i64 },

    /// RETURN_FROM_LABEL with an empty goto stack.
    #[error("no label to return from")]
    NoLabelToReturnFrom,

    /// A type-checked use site got the wrong object kind.
    #[error("invalid object type for object {object} (expected {expected})")]
    InvalidObjectType {
        object: Object,
        expected: ObjectKind,
    },

    /// Text conversion requested on an object without a text form.
    #[error("no string representation for object {object}")]
    NoStringRepresentation { object: Object },

    /// ACCESS_INDEX outside the array.
    #[error("index {index} out of bounds (length {length})")]
    IndexOutOfBounds { index: i64, length: usize },

    /// The host failed to write output or read input.
    #[error("i/o failure: {message}")]
    Io { message: String },
}

impl From<std::io::Error> for ErrorKind {
    fn from(err: std::io::Error) -> Self {
        ErrorKind::Io {
            message: err.to_string(),
        }
    }
}

/// A fatal error, located at the statement that raised it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} on line {line}: {tokens:?}")]
pub struct RuntimeError {
    /// 1-based source line of the statement.
    pub line: usize,
    /// The statement's tokens.
    pub tokens: Vec<i64>,
    pub kind: ErrorKind,
}
