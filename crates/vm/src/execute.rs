//! Main execution loop and opcode dispatch for the NumScript VM.

use std::time::Duration;

use numscript_common::{ArrayOperand, InputFormat, Instruction, Jump, Object, Operand, Source};
use tracing::{info, trace};

use crate::error::{ErrorKind, RuntimeError};
use crate::machine::Vm;
use crate::status;

impl<'a> Vm<'a> {
    /// Execute the script until EXIT, an input fault, or the end of the
    /// script. Returns the final status.
    pub fn run(&mut self) -> Result<i64, RuntimeError> {
        let script = self.script;

        while self.running {
            let Some(statement) = script.get(self.pc) else {
                self.running = false;
                break;
            };
            self.pc += 1;
            trace!(line = statement.line_number, tokens = ?statement.tokens, "dispatch");

            self.step(&statement.tokens)
                .map_err(|kind| RuntimeError {
                    line: statement.line_number,
                    tokens: statement.tokens.clone(),
                    kind,
                })?;
        }

        info!(status = self.status, "run finished");
        Ok(self.status)
    }

    /// Decode and execute one statement. Empty statements do nothing.
    fn step(&mut self, tokens: &[i64]) -> Result<(), ErrorKind> {
        match Instruction::decode(tokens)? {
            Some(instr) => self.dispatch(instr),
            None => Ok(()),
        }
    }

    fn dispatch(&mut self, instr: Instruction) -> Result<(), ErrorKind> {
        match instr {
            // Slots
            Instruction::DeclareLocal { addr, source } => {
                let object = self.load(source)?;
                self.declare_local(addr, object)
            }
            Instruction::Set { addr, source } => {
                let object = self.load(source)?;
                self.set(addr, object)
            }

            // Labels
            Instruction::DeclareLabel { label } => {
                self.declare_label(label);
                Ok(())
            }
            Instruction::GotoLabel { label } => self.goto(label),
            Instruction::ReturnFromLabel => self.return_from_label(),
            Instruction::IfJump {
                condition,
                label,
                jump,
            } => self.exec_if_jump(condition, label, jump),

            // VM control
            Instruction::Exit { code } => {
                let code = self.scalar(code)?;
                self.halt(code);
                Ok(())
            }
            Instruction::NoOp => Ok(()),
            Instruction::SleepMs { millis } => {
                let millis = self.scalar(millis)?;
                // Negative durations sleep for zero.
                let millis = u64::try_from(millis).unwrap_or(0);
                self.host.sleep(Duration::from_millis(millis));
                Ok(())
            }

            // I/O
            Instruction::Print { source } => {
                let line = self.load(source)?.represent();
                self.host.write_line(&line)?;
                Ok(())
            }
            Instruction::PrintString { source } => {
                let object = self.load(source)?;
                let text = object
                    .to_text()
                    .ok_or(ErrorKind::NoStringRepresentation { object })?;
                self.host.write_line(&text)?;
                Ok(())
            }
            Instruction::Input { dest, format } => self.exec_input(dest, format),

            // Data
            Instruction::AccessIndex { index, dest, array } => {
                self.exec_access_index(index, dest, array)
            }
        }
    }

    /// Materialize a value operand. Slot operands are copied out.
    fn load(&self, source: Source) -> Result<Object, ErrorKind> {
        match source {
            Source::Int(value) => Ok(Object::Int(value)),
            Source::Array(values) => Ok(Object::Array(values)),
            Source::Slot(addr) => self.get(addr).cloned(),
        }
    }

    /// Evaluate a scalar operand; slot operands must hold an Int.
    fn scalar(&self, operand: Operand) -> Result<i64, ErrorKind> {
        match operand {
            Operand::Literal(value) => Ok(value),
            Operand::Slot(addr) => self.get_int(addr),
        }
    }

    fn exec_if_jump(&mut self, condition: Operand, label: i64, jump: Jump) -> Result<(), ErrorKind> {
        let taken = match condition {
            Operand::Literal(value) => value != 0,
            Operand::Slot(addr) => self.get(addr)?.is_truthy(),
        };
        if !taken {
            return Ok(());
        }
        match jump {
            Jump::Goto => self.goto(label),
            Jump::ScanForward => self.jump_until_label(label),
        }
    }

    fn exec_access_index(
        &mut self,
        index: Operand,
        dest: i64,
        array: ArrayOperand,
    ) -> Result<(), ErrorKind> {
        let index = self.scalar(index)?;
        let element = match &array {
            ArrayOperand::Literal(values) => element_at(values, index)?,
            ArrayOperand::Slot(addr) => element_at(self.get_array(*addr)?, index)?,
        };
        self.set(dest, Object::Int(element))
    }

    /// Read one line and store it at `dest`. End of input and malformed
    /// lines (including invalid UTF-8) halt the run with their status
    /// codes instead of failing.
    fn exec_input(&mut self, dest: i64, format: InputFormat) -> Result<(), ErrorKind> {
        let Some(bytes) = self.host.read_line()? else {
            self.halt(status::END_OF_INPUT);
            return Ok(());
        };

        let parsed = String::from_utf8(bytes)
            .ok()
            .and_then(|line| parse_input(&line, format));
        match parsed {
            Some(object) => self.set(dest, object),
            None => {
                self.halt(status::INVALID_INPUT);
                Ok(())
            }
        }
    }
}

fn element_at(values: &[i64], index: i64) -> Result<i64, ErrorKind> {
    usize::try_from(index)
        .ok()
        .and_then(|i| values.get(i).copied())
        .ok_or(ErrorKind::IndexOutOfBounds {
            index,
            length: values.len(),
        })
}

fn parse_input(line: &str, format: InputFormat) -> Option<Object> {
    match format {
        InputFormat::Int => line.trim().parse().ok().map(Object::Int),
        InputFormat::IntArray => line
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<i64>, _>>()
            .ok()
            .map(Object::Array),
        InputFormat::Char => {
            let mut chars = line.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(Object::Int(c as i64)),
                _ => None,
            }
        }
        InputFormat::Line => Some(Object::Array(line.chars().map(|c| c as i64).collect())),
    }
}
