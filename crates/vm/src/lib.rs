//! NumScript virtual machine — executes tokenized scripts.
//!
//! The VM is a stack-based machine with:
//! - One operand stack shared by a chain of nested scopes
//! - Scope-relative addressing that falls through to enclosing scopes
//! - A label table and an explicit goto stack for call/return
//! - A [`Host`] for line-oriented output, input, and sleeping
//!
//! Statements are decoded one at a time as they are dispatched; nothing is
//! pre-translated.
//!
//! # Usage
//!
//! ```
//! use numscript_common::Script;
//! use numscript_vm::{run_with_host, BufferHost};
//!
//! let script = Script::from_rows([
//!     vec![0, 1, 0, 104, 105], // DECLARE_LOCAL @0 = [104 105]
//!     vec![9, 2, 0],           // PRINT_STRING @0
//!     vec![5, 0, 3],           // EXIT 3
//! ]);
//!
//! let mut host = BufferHost::new();
//! let status = run_with_host(&script, &mut host).unwrap();
//! assert_eq!(status, 3);
//! assert_eq!(host.output(), ["hi"]);
//! ```

pub mod error;
pub mod execute;
pub mod host;
pub mod machine;
pub mod status;

pub use error::{ErrorKind, RuntimeError};
pub use host::{BufferHost, Host, StdioHost};
pub use machine::{Vm, VmConfig};

use numscript_common::Script;

/// Execute a script against stdin/stdout and return its final status.
///
/// # Errors
///
/// Returns [`RuntimeError`] on the first fatal error (bad arity, unknown
/// label, type mismatch, ...). No further statements run after it.
pub fn run(script: &Script) -> Result<i64, RuntimeError> {
    run_with_config(script, &mut StdioHost, VmConfig::default())
}

/// Execute a script against a caller-supplied host.
pub fn run_with_host(script: &Script, host: &mut dyn Host) -> Result<i64, RuntimeError> {
    run_with_config(script, host, VmConfig::default())
}

/// Execute a script with explicit engine options.
pub fn run_with_config(
    script: &Script,
    host: &mut dyn Host,
    config: VmConfig,
) -> Result<i64, RuntimeError> {
    let mut vm = Vm::with_config(script, host, config);
    vm.run()
}
