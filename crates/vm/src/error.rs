//! Run outcomes for the Strait VM.
//!
//! A run ends in exactly one of two ways: a program-intended halt
//! ([`Halt`]) or a runtime error ([`RuntimeError`]). Both map onto the
//! single status word the host receives; the byte values are part of the
//! external contract and never change.

use thiserror::Error;

/// A program-intended halt: HALT executed with a Boolean on the
/// argument stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    /// The program halted with `true` on the argument stack.
    True,
    /// The program halted with `false` on the argument stack.
    False,
}

impl Halt {
    /// The status byte reported to the host.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Halt::True => 0x01,
            Halt::False => 0x02,
        }
    }

    /// Convenience for hosts that only care about the Boolean.
    #[must_use]
    pub const fn is_true(self) -> bool {
        matches!(self, Halt::True)
    }
}

/// Errors that terminate a run before a HALT.
///
/// `InterpreterBug` marks states the machine's own invariants make
/// unreachable; it exists because this interpreter is meant to keep an
/// embedding application running rather than assert. Every other
/// variant reports a defect in the hosted program. None is recoverable
/// from inside the VM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// An internal invariant failed inside the interpreter itself.
    #[error("interpreter bug")]
    InterpreterBug,

    /// An operand popped from the stack had the wrong variant.
    #[error("invalid argument")]
    InvalidArgument,

    /// An instruction carried a malformed or missing immediate.
    #[error("invalid literal")]
    InvalidLiteral,

    /// An instruction byte outside the opcode map.
    ///
    /// A decoded [`strait_common::Opcode`] can never be unknown, so the
    /// dispatcher never produces this; the status byte stays reserved
    /// for the host contract.
    #[error("invalid opcode")]
    InvalidOpcode,

    /// A CALL targeted its own instruction or an earlier one.
    #[error("no loops")]
    NoLoops,

    /// The program counter left the program.
    #[error("no program")]
    NoProgram,

    /// Stack or buffer overflow or underflow.
    #[error("out of bounds")]
    OutOfBounds,
}

impl RuntimeError {
    /// The status byte reported to the host.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            RuntimeError::InterpreterBug => 0x11,
            RuntimeError::InvalidArgument => 0x12,
            RuntimeError::InvalidLiteral => 0x13,
            RuntimeError::InvalidOpcode => 0x14,
            RuntimeError::NoLoops => 0x15,
            RuntimeError::NoProgram => 0x16,
            RuntimeError::OutOfBounds => 0x17,
        }
    }
}
