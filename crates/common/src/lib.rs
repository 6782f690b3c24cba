//! NumScript common types and statement decoding.
//!
//! This crate provides the foundational data structures for the NumScript
//! instruction set:
//!
//! - [`Opcode`] — the 13 opcodes that lead every statement
//! - [`Instruction`] — a statement decoded into a typed operation
//! - [`Object`] — runtime value representation for operand-stack slots
//! - [`Statement`] / [`Script`] — the tokenized program
//! - [`DecodeError`] — arity, opcode and variant failures
//!
//! # Dependencies
//!
//! This crate uses `thiserror` (compile-time proc-macro, zero runtime cost)
//! and has no other dependencies.

pub mod error;
pub mod instruction;
pub mod object;
pub mod opcode;
pub mod script;

// Re-export commonly used types at the crate root.
pub use error::DecodeError;
pub use instruction::{ArrayOperand, InputFormat, Instruction, Jump, Operand, Source};
pub use object::{Object, ObjectKind};
pub use opcode::Opcode;
pub use script::{Script, Statement};
