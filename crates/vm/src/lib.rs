//! Strait virtual machine — a deliberately sub-Turing stack machine.
//!
//! The machine executes a read-only instruction listing over a
//! caller-supplied input buffer and reports events through a
//! caller-supplied sink. Three guarantees hold for any hosted program
//! by construction:
//!
//! - **Control-flow safety** — targets are literals in the program;
//!   there is no computed jump, and the control stack admits only
//!   return addresses pushed by CALL.
//! - **Memory safety** — all reads go through the bounded input
//!   cursor, all writes through the bounded output queue, and the two
//!   stacks share one fixed-capacity region.
//! - **Termination** — CALL and taken JMPIF both move strictly
//!   forward, so every run halts or errors within a bounded number of
//!   steps regardless of input.
//!
//! # Usage
//!
//! ```
//! use strait_common::{Instruction, Program, StringTable};
//! use strait_vm::{run, Halt, RecordingSink};
//!
//! let listing = [
//!     Instruction::input(1),
//!     Instruction::pushn(7),
//!     Instruction::eq(2),
//!     Instruction::halt(),
//! ];
//! let program = Program::new(&listing)?;
//! let strings = StringTable::new(&[])?;
//!
//! let mut sink = RecordingSink::new();
//! let halt = run(program, &[7], strings, &mut sink)?;
//! assert_eq!(halt, Halt::True);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod event;
mod execute;
pub mod input;
pub mod machine;
pub mod output;
pub mod stack;

pub use error::{Halt, RuntimeError};
pub use event::{Event, EventSink, RecordingSink};
pub use machine::Vm;
pub use output::MAX_EVENT_MESSAGE;
pub use stack::STACK_CAPACITY;

use strait_common::{Program, StringTable};

/// Execute `program` over `input` until HALT or error.
///
/// This is the primary entry point. All state for the run is created
/// here and torn down on return; the program, input, and string table
/// are only borrowed. Events flushed before an error stay delivered.
///
/// # Errors
///
/// Returns the [`RuntimeError`] that terminated the run. The host
/// status-word mapping is `Halt::code()` / `RuntimeError::code()`.
pub fn run(
    program: Program<'_>,
    input: &[u8],
    strings: StringTable<'_>,
    sink: &mut dyn EventSink,
) -> Result<Halt, RuntimeError> {
    Vm::new(program, input, strings, sink).execute()
}
