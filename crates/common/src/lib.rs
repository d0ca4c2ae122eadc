//! Strait common types and instruction set.
//!
//! This crate provides the foundational data structures shared by the
//! Strait VM and by program authors:
//!
//! - [`Value`] — the typed runtime values the machine manipulates
//! - [`Opcode`] — the 22-opcode instruction set
//! - [`Instruction`] — opcode plus immediate, with `const` constructor
//!   shorthands for writing programs as plain arrays
//! - [`Program`] and [`StringTable`] — read-only views the VM borrows
//!   for the duration of a run
//!
//! # Dependencies
//!
//! This crate uses `thiserror` (compile-time proc-macro, zero runtime
//! cost) and has no other dependencies.

pub mod instruction;
pub mod opcode;
pub mod program;
pub mod value;

// Re-export commonly used types at the crate root.
pub use instruction::{Arg, Instruction};
pub use opcode::Opcode;
pub use program::{LimitError, Program, StringTable};
pub use value::Value;
