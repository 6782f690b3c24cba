//! Opcode definitions for the NumScript instruction set.
//!
//! The opcode is the first token of every non-empty statement.

use std::fmt;

use crate::error::DecodeError;

/// Identifies the operation to perform.
///
/// Discriminants are the integer tokens that appear in scripts.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // Slots
    /// Append a new local to the current scope.
    DeclareLocal = 0,
    /// Overwrite an existing slot.
    Set = 1,

    // Labels
    /// Bind a label to the address after this statement.
    DeclareLabel = 2,
    /// Call-style jump to a label; pushes a return address.
    GotoLabel = 3,
    /// Return to the address saved by the matching goto.
    ReturnFromLabel = 4,

    // VM control
    /// Stop execution with a status code.
    Exit = 5,
    /// No operation.
    NoOp = 6,
    /// Block the thread for a number of milliseconds.
    SleepMs = 7,

    // I/O
    /// Print the numeric form of a value.
    Print = 8,
    /// Print the decoded text form of a value.
    PrintString = 9,

    // Data
    /// Read one element of an array into a slot.
    AccessIndex = 10,
    /// Conditional goto, or conditional forward jump.
    IfJump = 11,
    /// Read one line of input into a slot.
    Input = 12,
}

/// All valid opcodes, in definition order.
pub const ALL_OPCODES: [Opcode; 13] = [
    Opcode::DeclareLocal,
    Opcode::Set,
    Opcode::DeclareLabel,
    Opcode::GotoLabel,
    Opcode::ReturnFromLabel,
    Opcode::Exit,
    Opcode::NoOp,
    Opcode::SleepMs,
    Opcode::Print,
    Opcode::PrintString,
    Opcode::AccessIndex,
    Opcode::IfJump,
    Opcode::Input,
];

impl TryFrom<i64> for Opcode {
    type Error = DecodeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Opcode::DeclareLocal),
            1 => Ok(Opcode::Set),
            2 => Ok(Opcode::DeclareLabel),
            3 => Ok(Opcode::GotoLabel),
            4 => Ok(Opcode::ReturnFromLabel),
            5 => Ok(Opcode::Exit),
            6 => Ok(Opcode::NoOp),
            7 => Ok(Opcode::SleepMs),
            8 => Ok(Opcode::Print),
            9 => Ok(Opcode::PrintString),
            10 => Ok(Opcode::AccessIndex),
            11 => Ok(Opcode::IfJump),
            12 => Ok(Opcode::Input),
            other => Err(DecodeError::InvalidOpcode(other)),
        }
    }
}

impl Opcode {
    /// The integer token for this opcode.
    pub fn code(self) -> i64 {
        self as u8 as i64
    }

    /// Returns the mnemonic used in diagnostics and listings.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::DeclareLocal => "DECLARE_LOCAL",
            Opcode::Set => "SET",
            Opcode::DeclareLabel => "DECLARE_LABEL",
            Opcode::GotoLabel => "GOTO_LABEL",
            Opcode::ReturnFromLabel => "RETURN_FROM_LABEL",
            Opcode::Exit => "EXIT",
            Opcode::NoOp => "NO_OP",
            Opcode::SleepMs => "SLEEP_MS",
            Opcode::Print => "PRINT",
            Opcode::PrintString => "PRINT_STRING",
            Opcode::AccessIndex => "ACCESS_INDEX",
            Opcode::IfJump => "IF_JUMP",
            Opcode::Input => "INPUT",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
