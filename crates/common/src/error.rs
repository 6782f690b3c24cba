//! Decode errors for NumScript statements.

use thiserror::Error;

/// Errors that occur while decoding a statement's tokens into an
/// [`Instruction`](crate::Instruction).
///
/// Operators are reported by mnemonic when the opcode is known, and by
/// raw token otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Leading token is not one of the 13 defined opcodes.
    #[error("invalid operation code {0}")]
    InvalidOpcode(i64),

    /// Variant selector not defined for this opcode.
    #[error("invalid operation code variation {variant} for operator {opcode}")]
    InvalidVariant { opcode: &'static str, variant: i64 },

    /// Token count after the opcode does not fit the operator's layout.
    ///
    /// `at_least` is set for layouts ending in an array literal, where
    /// `expected` is the minimum.
    #[error(
        "invalid argument number for operation {opcode}: expected {}{expected} arguments, got {got}",
        minimum_prefix(.at_least)
    )]
    InvalidArgumentNumber {
        opcode: &'static str,
        expected: usize,
        got: usize,
        at_least: bool,
    },
}

fn minimum_prefix(at_least: &bool) -> &'static str {
    if *at_least {
        "at least "
    } else {
        ""
    }
}
