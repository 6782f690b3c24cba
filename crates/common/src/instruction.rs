//! Statement decoding for the NumScript instruction set.
//!
//! A statement is a flat list of integers:
//! ```text
//! token 0:   opcode
//! token 1:   variant selector (opcodes that have variants)
//! token 2..: operands, layout chosen by opcode + variant
//! ```
//!
//! Arity counts every token after the opcode, variant selector included.
//! Layouts ending in an array literal take a minimum count; all others
//! take an exact count.

use std::fmt;

use crate::error::DecodeError;
use crate::opcode::Opcode;

/// A scalar operand: an integer literal or a reference to a stack slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Literal(i64),
    Slot(i64),
}

/// A value operand that may be an Int literal, an Array literal or a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Int(i64),
    Array(Vec<i64>),
    Slot(i64),
}

/// The array operand of ACCESS_INDEX.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrayOperand {
    Literal(Vec<i64>),
    Slot(i64),
}

/// How a taken IF_JUMP transfers control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jump {
    /// Call-style goto to an already declared label.
    Goto,
    /// Scan forward for the label declaration and continue after it.
    ScanForward,
}

/// How an INPUT line is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// One integer.
    Int,
    /// Whitespace-separated integers.
    IntArray,
    /// Exactly one character, stored as its code.
    Char,
    /// The whole line, stored as character codes.
    Line,
}

/// A decoded statement, ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    DeclareLocal { addr: i64, source: Source },
    Set { addr: i64, source: Source },
    DeclareLabel { label: i64 },
    GotoLabel { label: i64 },
    ReturnFromLabel,
    Exit { code: Operand },
    NoOp,
    SleepMs { millis: Operand },
    Print { source: Source },
    PrintString { source: Source },
    AccessIndex {
        index: Operand,
        dest: i64,
        array: ArrayOperand,
    },
    IfJump {
        condition: Operand,
        label: i64,
        jump: Jump,
    },
    Input { dest: i64, format: InputFormat },
}

impl Instruction {
    /// Decode a statement's tokens.
    ///
    /// Returns `Ok(None)` for an empty statement (blank line).
    pub fn decode(tokens: &[i64]) -> Result<Option<Self>, DecodeError> {
        let Some((&code, args)) = tokens.split_first() else {
            return Ok(None);
        };
        let opcode = Opcode::try_from(code)?;

        let instr = match opcode {
            Opcode::DeclareLocal => {
                let (addr, source) = decode_store(opcode, args)?;
                Instruction::DeclareLocal { addr, source }
            }
            Opcode::Set => {
                let (addr, source) = decode_store(opcode, args)?;
                Instruction::Set { addr, source }
            }
            Opcode::DeclareLabel => {
                let [label] = exact::<1>(opcode, args)?;
                Instruction::DeclareLabel { label }
            }
            Opcode::GotoLabel => {
                let [label] = exact::<1>(opcode, args)?;
                Instruction::GotoLabel { label }
            }
            Opcode::ReturnFromLabel => {
                let [] = exact::<0>(opcode, args)?;
                Instruction::ReturnFromLabel
            }
            Opcode::Exit => Instruction::Exit {
                code: decode_scalar(opcode, args)?,
            },
            Opcode::NoOp => {
                let [] = exact::<0>(opcode, args)?;
                Instruction::NoOp
            }
            Opcode::SleepMs => Instruction::SleepMs {
                millis: decode_scalar(opcode, args)?,
            },
            Opcode::Print => Instruction::Print {
                source: decode_source(opcode, args)?,
            },
            Opcode::PrintString => Instruction::PrintString {
                source: decode_source(opcode, args)?,
            },
            Opcode::AccessIndex => decode_access_index(opcode, args)?,
            Opcode::IfJump => {
                let [variant, condition, label] = exact::<3>(opcode, args)?;
                let (condition, jump) = match variant {
                    0 => (Operand::Literal(condition), Jump::Goto),
                    1 => (Operand::Slot(condition), Jump::Goto),
                    2 => (Operand::Literal(condition), Jump::ScanForward),
                    3 => (Operand::Slot(condition), Jump::ScanForward),
                    other => return Err(invalid_variant(opcode, other)),
                };
                Instruction::IfJump {
                    condition,
                    label,
                    jump,
                }
            }
            Opcode::Input => {
                let [variant, dest] = exact::<2>(opcode, args)?;
                let format = match variant {
                    0 => InputFormat::Int,
                    1 => InputFormat::IntArray,
                    2 => InputFormat::Char,
                    3 => InputFormat::Line,
                    other => return Err(invalid_variant(opcode, other)),
                };
                Instruction::Input { dest, format }
            }
        };

        Ok(Some(instr))
    }

    /// The opcode this instruction was decoded from.
    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::DeclareLocal { .. } => Opcode::DeclareLocal,
            Instruction::Set { .. } => Opcode::Set,
            Instruction::DeclareLabel { .. } => Opcode::DeclareLabel,
            Instruction::GotoLabel { .. } => Opcode::GotoLabel,
            Instruction::ReturnFromLabel => Opcode::ReturnFromLabel,
            Instruction::Exit { .. } => Opcode::Exit,
            Instruction::NoOp => Opcode::NoOp,
            Instruction::SleepMs { .. } => Opcode::SleepMs,
            Instruction::Print { .. } => Opcode::Print,
            Instruction::PrintString { .. } => Opcode::PrintString,
            Instruction::AccessIndex { .. } => Opcode::AccessIndex,
            Instruction::IfJump { .. } => Opcode::IfJump,
            Instruction::Input { .. } => Opcode::Input,
        }
    }
}

/// Check an exact argument count and destructure the arguments.
fn exact<const N: usize>(opcode: Opcode, args: &[i64]) -> Result<[i64; N], DecodeError> {
    <[i64; N]>::try_from(args).map_err(|_| DecodeError::InvalidArgumentNumber {
        opcode: opcode.mnemonic(),
        expected: N,
        got: args.len(),
        at_least: false,
    })
}

/// Check a minimum argument count; the remainder is an array literal.
fn at_least<const N: usize>(
    opcode: Opcode,
    args: &[i64],
) -> Result<([i64; N], &[i64]), DecodeError> {
    args.split_first_chunk::<N>()
        .map(|(prefix, rest)| (*prefix, rest))
        .ok_or(DecodeError::InvalidArgumentNumber {
            opcode: opcode.mnemonic(),
            expected: N,
            got: args.len(),
            at_least: true,
        })
}

/// Read the variant selector. A missing selector is reported against the
/// smallest legal argument count `min` for the opcode.
fn variant(opcode: Opcode, args: &[i64], min: usize) -> Result<i64, DecodeError> {
    args.first()
        .copied()
        .ok_or(DecodeError::InvalidArgumentNumber {
            opcode: opcode.mnemonic(),
            expected: min,
            got: 0,
            at_least: true,
        })
}

fn invalid_variant(opcode: Opcode, variant: i64) -> DecodeError {
    DecodeError::InvalidVariant {
        opcode: opcode.mnemonic(),
        variant,
    }
}

/// `0 [addr, int]`, `1 [addr, int...]`, `2 [addr, srcAddr]`
fn decode_store(opcode: Opcode, args: &[i64]) -> Result<(i64, Source), DecodeError> {
    match variant(opcode, args, 2)? {
        0 => {
            let [_, addr, value] = exact::<3>(opcode, args)?;
            Ok((addr, Source::Int(value)))
        }
        1 => {
            let ([_, addr], values) = at_least::<2>(opcode, args)?;
            Ok((addr, Source::Array(values.to_vec())))
        }
        2 => {
            let [_, addr, src] = exact::<3>(opcode, args)?;
            Ok((addr, Source::Slot(src)))
        }
        other => Err(invalid_variant(opcode, other)),
    }
}

/// `0 [int]`, `1 [int...]`, `2 [srcAddr]`
fn decode_source(opcode: Opcode, args: &[i64]) -> Result<Source, DecodeError> {
    match variant(opcode, args, 1)? {
        0 => {
            let [_, value] = exact::<2>(opcode, args)?;
            Ok(Source::Int(value))
        }
        1 => {
            let ([_], values) = at_least::<1>(opcode, args)?;
            Ok(Source::Array(values.to_vec()))
        }
        2 => {
            let [_, src] = exact::<2>(opcode, args)?;
            Ok(Source::Slot(src))
        }
        other => Err(invalid_variant(opcode, other)),
    }
}

/// `0 [int]`, `1 [srcAddr]`
fn decode_scalar(opcode: Opcode, args: &[i64]) -> Result<Operand, DecodeError> {
    let [variant, value] = exact::<2>(opcode, args)?;
    match variant {
        0 => Ok(Operand::Literal(value)),
        1 => Ok(Operand::Slot(value)),
        other => Err(invalid_variant(opcode, other)),
    }
}

/// Variants 0/1 carry a trailing array literal, 2/3 an array slot.
fn decode_access_index(opcode: Opcode, args: &[i64]) -> Result<Instruction, DecodeError> {
    let selector = variant(opcode, args, 3)?;
    let (index, dest, array) = match selector {
        0 | 1 => {
            let ([_, index, dest], values) = at_least::<3>(opcode, args)?;
            (index, dest, ArrayOperand::Literal(values.to_vec()))
        }
        2 | 3 => {
            let [_, index, dest, array] = exact::<4>(opcode, args)?;
            (index, dest, ArrayOperand::Slot(array))
        }
        other => return Err(invalid_variant(opcode, other)),
    };
    let index = if selector % 2 == 0 {
        Operand::Literal(index)
    } else {
        Operand::Slot(index)
    };
    Ok(Instruction::AccessIndex { index, dest, array })
}

struct Ints<'a>(&'a [i64]);

impl fmt::Display for Ints<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("]")
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Literal(value) => write!(f, "{value}"),
            Operand::Slot(addr) => write!(f, "@{addr}"),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Int(value) => write!(f, "{value}"),
            Source::Array(values) => write!(f, "{}", Ints(values)),
            Source::Slot(addr) => write!(f, "@{addr}"),
        }
    }
}

impl fmt::Display for ArrayOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayOperand::Literal(values) => write!(f, "{}", Ints(values)),
            ArrayOperand::Slot(addr) => write!(f, "@{addr}"),
        }
    }
}

/// Listing form, e.g. `DECLARE_LOCAL @0 [104 105]` or `IF_JUMP @1 GOTO 7`.
/// Slot references are written `@addr`.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = self.opcode().mnemonic();
        match self {
            Instruction::DeclareLocal { addr, source } | Instruction::Set { addr, source } => {
                write!(f, "{op} @{addr} {source}")
            }
            Instruction::DeclareLabel { label } | Instruction::GotoLabel { label } => {
                write!(f, "{op} {label}")
            }
            Instruction::ReturnFromLabel | Instruction::NoOp => f.write_str(op),
            Instruction::Exit { code } => write!(f, "{op} {code}"),
            Instruction::SleepMs { millis } => write!(f, "{op} {millis}"),
            Instruction::Print { source } | Instruction::PrintString { source } => {
                write!(f, "{op} {source}")
            }
            Instruction::AccessIndex { index, dest, array } => {
                write!(f, "{op} {array} {index} -> @{dest}")
            }
            Instruction::IfJump {
                condition,
                label,
                jump,
            } => {
                let mode = match jump {
                    Jump::Goto => "GOTO",
                    Jump::ScanForward => "SCAN",
                };
                write!(f, "{op} {condition} {mode} {label}")
            }
            Instruction::Input { dest, format } => {
                let mode = match format {
                    InputFormat::Int => "INT",
                    InputFormat::IntArray => "INTS",
                    InputFormat::Char => "CHAR",
                    InputFormat::Line => "LINE",
                };
                write!(f, "{op} {mode} -> @{dest}")
            }
        }
    }
}
