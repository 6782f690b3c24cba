//! VM state management: operand stack, scope chain, labels, goto stack.

use std::collections::HashMap;

use numscript_common::{Object, ObjectKind, Opcode, Script};
use tracing::debug;

use crate::error::ErrorKind;
use crate::host::Host;
use crate::status;

/// Engine options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VmConfig {
    /// A taken goto enters a new scope and the matching return exits it,
    /// so locals declared by a label body are released on return.
    pub scoped_calls: bool,
}

/// The NumScript virtual machine.
///
/// One instance runs one script. All state is owned by the instance.
pub struct Vm<'a> {
    /// The script being executed.
    pub(crate) script: &'a Script,
    /// Output, input and sleep.
    pub(crate) host: &'a mut dyn Host,
    pub(crate) config: VmConfig,
    /// Index of the next statement to fetch.
    pub(crate) pc: usize,
    /// Operand stack shared by every scope.
    pub(crate) stack: Vec<Object>,
    /// Stack index at which each scope begins; last = innermost.
    /// The root scope at index 0 is never popped.
    pub(crate) scopes: Vec<usize>,
    /// Label id -> address of the statement after its declaration.
    pub(crate) labels: HashMap<i64, usize>,
    /// Return addresses saved by goto.
    pub(crate) goto_stack: Vec<usize>,
    pub(crate) running: bool,
    pub(crate) status: i64,
}

impl<'a> Vm<'a> {
    /// Create a new VM for the given script.
    pub fn new(script: &'a Script, host: &'a mut dyn Host) -> Self {
        Self::with_config(script, host, VmConfig::default())
    }

    pub fn with_config(script: &'a Script, host: &'a mut dyn Host, config: VmConfig) -> Self {
        Self {
            script,
            host,
            config,
            pc: 0,
            stack: Vec::new(),
            scopes: vec![0],
            labels: HashMap::new(),
            goto_stack: Vec::new(),
            running: true,
            status: status::NO_ERROR,
        }
    }

    /// Index of the next statement to execute.
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// Status so far: [`status::NO_ERROR`] unless an EXIT or an input
    /// fault has set it.
    pub fn status(&self) -> i64 {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The whole operand stack, outermost scope first.
    pub fn stack(&self) -> &[Object] {
        &self.stack
    }

    /// Number of open scopes, root included.
    pub fn scope_depth(&self) -> usize {
        self.scopes.len()
    }

    /// Number of saved return addresses.
    pub fn goto_depth(&self) -> usize {
        self.goto_stack.len()
    }

    /// Address recorded for a label, if declared.
    pub fn label_address(&self, label: i64) -> Option<usize> {
        self.labels.get(&label).copied()
    }

    pub(crate) fn halt(&mut self, status: i64) {
        debug!(status, pc = self.pc, "halting");
        self.status = status;
        self.running = false;
    }

    // ---- Scopes ----

    /// Open a scope starting at the current top of the stack.
    pub fn enter_scope(&mut self) {
        self.scopes.push(self.stack.len());
        debug!(depth = self.scopes.len(), base = self.stack.len(), "enter scope");
    }

    /// Close the innermost scope and release its locals.
    ///
    /// Returns `false` (and does nothing) when only the root scope is open.
    pub fn exit_scope(&mut self) -> bool {
        if self.scopes.len() <= 1 {
            return false;
        }
        if let Some(base) = self.scopes.pop() {
            self.stack.truncate(base);
            debug!(depth = self.scopes.len(), released_to = base, "exit scope");
        }
        true
    }

    /// Slots declared in the innermost scope.
    pub fn current_scope_size(&self) -> usize {
        let base = self.scopes.last().copied().unwrap_or(0);
        self.stack.len() - base
    }

    /// Convert a scope-relative address into an absolute stack index.
    ///
    /// Scopes are searched innermost first. Each scope covers the slots
    /// between its base and the previously examined boundary; an address
    /// too large for that span falls through, unchanged, to the enclosing
    /// scope.
    pub fn resolve(&self, addr: i64) -> Result<usize, ErrorKind> {
        let Ok(local) = usize::try_from(addr) else {
            return Err(ErrorKind::SymbolNotFound { addr });
        };

        let mut frontier = self.stack.len();
        for &base in self.scopes.iter().rev() {
            if local < frontier - base {
                return Ok(base + local);
            }
            frontier = base;
        }

        Err(ErrorKind::SymbolNotFound { addr })
    }

    /// Append a local to the innermost scope.
    ///
    /// `addr` must not fall inside the slots the scope already holds.
    pub fn declare_local(&mut self, addr: i64, object: Object) -> Result<(), ErrorKind> {
        match usize::try_from(addr) {
            Ok(local) if local >= self.current_scope_size() => {
                self.stack.push(object);
                Ok(())
            }
            _ => Err(ErrorKind::SymbolRedeclaration { addr }),
        }
    }

    pub fn get(&self, addr: i64) -> Result<&Object, ErrorKind> {
        let index = self.resolve(addr)?;
        Ok(&self.stack[index])
    }

    pub fn set(&mut self, addr: i64, object: Object) -> Result<(), ErrorKind> {
        let index = self.resolve(addr)?;
        self.stack[index] = object;
        Ok(())
    }

    /// Read a slot that must hold an Int.
    pub(crate) fn get_int(&self, addr: i64) -> Result<i64, ErrorKind> {
        match self.get(addr)? {
            Object::Int(value) => Ok(*value),
            other => Err(ErrorKind::InvalidObjectType {
                object: other.clone(),
                expected: ObjectKind::Int,
            }),
        }
    }

    /// Read a slot that must hold an Array.
    pub(crate) fn get_array(&self, addr: i64) -> Result<&[i64], ErrorKind> {
        match self.get(addr)? {
            Object::Array(values) => Ok(values),
            other => Err(ErrorKind::InvalidObjectType {
                object: other.clone(),
                expected: ObjectKind::Array,
            }),
        }
    }

    // ---- Labels ----

    /// Bind `label` to the current pc. A later declaration of the same
    /// label replaces the earlier one.
    pub fn declare_label(&mut self, label: i64) {
        if let Some(previous) = self.labels.insert(label, self.pc) {
            if previous != self.pc {
                debug!(label, previous, address = self.pc, "label redeclared");
            }
        } else {
            debug!(label, address = self.pc, "label declared");
        }
    }

    /// Call-style jump: save the current pc and continue at the label.
    pub fn goto(&mut self, label: i64) -> Result<(), ErrorKind> {
        let target = self
            .label_address(label)
            .ok_or(ErrorKind::LabelNotFound { label })?;
        debug!(label, from = self.pc, to = target, "goto");
        self.goto_stack.push(self.pc);
        self.pc = target;
        if self.config.scoped_calls {
            self.enter_scope();
        }
        Ok(())
    }

    /// Resume at the address saved by the most recent unmatched goto.
    pub fn return_from_label(&mut self) -> Result<(), ErrorKind> {
        let address = self
            .goto_stack
            .pop()
            .ok_or(ErrorKind::NoLabelToReturnFrom)?;
        if self.config.scoped_calls {
            self.exit_scope();
        }
        debug!(from = self.pc, to = address, "return from label");
        self.pc = address;
        Ok(())
    }

    /// Forward jump to a label that has not been declared yet.
    ///
    /// Scans from the current pc for the label's declaration, records it,
    /// and continues just past it. Does not touch the goto stack.
    pub fn jump_until_label(&mut self, label: i64) -> Result<(), ErrorKind> {
        let remaining = self.script.statements.get(self.pc..).unwrap_or(&[]);
        let offset = remaining
            .iter()
            .position(|stmt| declares_label(&stmt.tokens, label))
            .ok_or(ErrorKind::LabelNotFound { label })?;

        let target = self.pc + offset + 1;
        debug!(label, from = self.pc, to = target, "forward scan found label");
        self.labels.insert(label, target);
        self.pc = target;
        Ok(())
    }
}

fn declares_label(tokens: &[i64], label: i64) -> bool {
    matches!(tokens, [op, id] if *op == Opcode::DeclareLabel.code() && *id == label)
}
