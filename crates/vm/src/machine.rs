//! VM state management: the per-run state record.
//!
//! One [`Vm`] value exists per run and owns that run's stacks, cursors,
//! and program counter exclusively. The program, input buffer, and
//! string table are immutable borrows from the caller and must outlive
//! the run; the event sink is the caller's transport capability. No
//! state survives past [`Vm::execute`](crate::Vm::execute).

use strait_common::{Instruction, Program, StringTable, Value};

use crate::error::RuntimeError;
use crate::event::EventSink;
use crate::input::InputQueue;
use crate::output::OutputQueue;
use crate::stack::DualStack;

/// The Strait virtual machine.
pub struct Vm<'a, 's> {
    /// The program being executed.
    pub(crate) program: Program<'a>,
    /// Argument and control stacks.
    pub(crate) stack: DualStack,
    /// Cursor over the caller's input bytes.
    pub(crate) input: InputQueue<'a>,
    /// Event-message buffer and string table.
    pub(crate) output: OutputQueue<'a>,
    /// Index of the next instruction to fetch.
    pub(crate) pc: u16,
    /// The host's event transport.
    pub(crate) sink: &'s mut dyn EventSink,
}

impl<'a, 's> Vm<'a, 's> {
    /// Fresh state for one run of `program` over `input`.
    pub fn new(
        program: Program<'a>,
        input: &'a [u8],
        strings: StringTable<'a>,
        sink: &'s mut dyn EventSink,
    ) -> Self {
        Self {
            program,
            stack: DualStack::new(),
            input: InputQueue::new(input),
            output: OutputQueue::new(strings),
            pc: 0,
            sink,
        }
    }

    /// Fetch the instruction at the current pc.
    ///
    /// A pc at or past the end of the program is `NoProgram`: either the
    /// program is empty or control ran off the end without a HALT.
    pub(crate) fn fetch(&self) -> Result<&'a Instruction, RuntimeError> {
        self.program.fetch(self.pc).ok_or(RuntimeError::NoProgram)
    }

    /// Pop an argument-stack value that must be a number.
    pub(crate) fn pop_number(&mut self) -> Result<u32, RuntimeError> {
        match self.stack.arg_pop()? {
            Value::Number(n) => Ok(n),
            _ => Err(RuntimeError::InvalidArgument),
        }
    }

    /// Pop an argument-stack value that must be a Boolean.
    pub(crate) fn pop_bool(&mut self) -> Result<bool, RuntimeError> {
        match self.stack.arg_pop()? {
            Value::Bool(b) => Ok(b),
            _ => Err(RuntimeError::InvalidArgument),
        }
    }
}
