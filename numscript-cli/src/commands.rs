//! CLI command implementations.

use std::fs;
use std::path::Path;

use numscript_common::{Instruction, Script};
use numscript_vm::{StdioHost, VmConfig};
use tracing::debug;

/// Execute a script and report its final status.
///
/// A non-zero status becomes the process exit code.
pub fn run(path: &Path, scoped_calls: bool) -> Result<(), i32> {
    let script = read_script(path)?;
    let config = VmConfig { scoped_calls };

    match numscript_vm::run_with_config(&script, &mut StdioHost, config) {
        Ok(status) => {
            println!("Program finished with status code {status}");
            if status == 0 {
                Ok(())
            } else {
                Err(exit_code(status))
            }
        }
        Err(e) => {
            eprintln!("runtime error: {e}");
            Err(1)
        }
    }
}

/// Print each non-empty statement in mnemonic form.
pub fn list(path: &Path) -> Result<(), i32> {
    let script = read_script(path)?;
    let mut failed = false;

    for stmt in &script.statements {
        match Instruction::decode(&stmt.tokens) {
            Ok(Some(instr)) => println!("{:>4}: {instr}", stmt.line_number),
            Ok(None) => {}
            Err(e) => {
                eprintln!("error: line {}: {e}", stmt.line_number);
                failed = true;
            }
        }
    }

    if failed {
        Err(1)
    } else {
        Ok(())
    }
}

/// Print the space-joined character codes of `text`.
pub fn encode(text: &str) -> Result<(), i32> {
    println!("{}", numscript_parser::encode_line(text));
    Ok(())
}

fn read_script(path: &Path) -> Result<Script, i32> {
    let text = fs::read_to_string(path).map_err(|e| {
        eprintln!("error: cannot read '{}': {e}", path.display());
        1
    })?;

    let script = numscript_parser::parse(&text).map_err(|e| {
        eprintln!("error: {e}");
        1
    })?;

    debug!(path = %path.display(), statements = script.len(), "loaded script");
    Ok(script)
}

/// Process exit code for a non-zero status.
///
/// Exit codes are a single byte, so the status is taken modulo 256. A
/// status that would wrap to 0 exits 255 so failure is never reported as
/// success.
fn exit_code(status: i64) -> i32 {
    match status.rem_euclid(256) {
        0 => 255,
        // rem_euclid(256) is always in 0..256
        code => code as i32,
    }
}
