//! Instruction representation for the Strait instruction set.
//!
//! An instruction is an opcode plus at most one immediate. The immediate
//! kinds are disjoint: a repetition count, a literal value, or a
//! jump/call target. Handlers that need a particular kind treat any
//! other kind as a malformed program.
//!
//! Programs are authored as plain arrays of instructions through the
//! `const fn` shorthands below, so a listing reads one operation per
//! line:
//!
//! ```
//! use strait_common::Instruction;
//!
//! const PROGRAM: [Instruction; 3] = [
//!     Instruction::pushn(7),
//!     Instruction::pushn(7),
//!     Instruction::eq(2),
//! ];
//! # let _ = PROGRAM;
//! ```

use std::fmt;

use crate::opcode::Opcode;
use crate::value::Value;

/// The immediate argument carried by an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg {
    /// The opcode takes no immediate.
    None,
    /// Repetition count (AND, OR, EQ, DUP, POP, ROLL, INPUT, REWIND).
    Count(u16),
    /// Literal value to push (PUSHB, PUSHN, PUSHS).
    Literal(Value),
    /// Call target index or jump offset (CALL, JMPIF).
    Target(u16),
}

/// A single Strait instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// The operation to perform.
    pub opcode: Opcode,
    /// The immediate argument, if the opcode takes one.
    pub arg: Arg,
}

impl Instruction {
    /// The repetition count, if this instruction carries one.
    pub fn count(&self) -> Option<u16> {
        match self.arg {
            Arg::Count(n) => Some(n),
            _ => None,
        }
    }

    /// The literal value, if this instruction carries one.
    pub fn literal(&self) -> Option<Value> {
        match self.arg {
            Arg::Literal(v) => Some(v),
            _ => None,
        }
    }

    /// The call target or jump offset, if this instruction carries one.
    pub fn target(&self) -> Option<u16> {
        match self.arg {
            Arg::Target(t) => Some(t),
            _ => None,
        }
    }
}

/// Constructor shorthands, one per opcode, all `const` so whole programs
/// can live in `static`/`const` arrays.
impl Instruction {
    pub const fn add() -> Self {
        Self { opcode: Opcode::Add, arg: Arg::None }
    }

    pub const fn and(n: u16) -> Self {
        Self { opcode: Opcode::And, arg: Arg::Count(n) }
    }

    pub const fn call(target: u16) -> Self {
        Self { opcode: Opcode::Call, arg: Arg::Target(target) }
    }

    pub const fn dup(n: u16) -> Self {
        Self { opcode: Opcode::Dup, arg: Arg::Count(n) }
    }

    pub const fn eq(n: u16) -> Self {
        Self { opcode: Opcode::Eq, arg: Arg::Count(n) }
    }

    pub const fn flush() -> Self {
        Self { opcode: Opcode::Flush, arg: Arg::None }
    }

    pub const fn gt() -> Self {
        Self { opcode: Opcode::Gt, arg: Arg::None }
    }

    pub const fn halt() -> Self {
        Self { opcode: Opcode::Halt, arg: Arg::None }
    }

    pub const fn jmpif(offset: u16) -> Self {
        Self { opcode: Opcode::JmpIf, arg: Arg::Target(offset) }
    }

    pub const fn lt() -> Self {
        Self { opcode: Opcode::Lt, arg: Arg::None }
    }

    pub const fn not() -> Self {
        Self { opcode: Opcode::Not, arg: Arg::None }
    }

    pub const fn or(n: u16) -> Self {
        Self { opcode: Opcode::Or, arg: Arg::Count(n) }
    }

    pub const fn output() -> Self {
        Self { opcode: Opcode::Output, arg: Arg::None }
    }

    pub const fn pop(n: u16) -> Self {
        Self { opcode: Opcode::Pop, arg: Arg::Count(n) }
    }

    pub const fn pushb(b: bool) -> Self {
        Self { opcode: Opcode::PushB, arg: Arg::Literal(Value::Bool(b)) }
    }

    pub const fn pushn(n: u32) -> Self {
        Self { opcode: Opcode::PushN, arg: Arg::Literal(Value::Number(n)) }
    }

    pub const fn pushs(index: u16) -> Self {
        Self { opcode: Opcode::PushS, arg: Arg::Literal(Value::StringRef(index)) }
    }

    pub const fn input(n: u16) -> Self {
        Self { opcode: Opcode::Input, arg: Arg::Count(n) }
    }

    pub const fn ret() -> Self {
        Self { opcode: Opcode::Return, arg: Arg::None }
    }

    pub const fn rewind(n: u16) -> Self {
        Self { opcode: Opcode::Rewind, arg: Arg::Count(n) }
    }

    pub const fn roll(n: u16) -> Self {
        Self { opcode: Opcode::Roll, arg: Arg::Count(n) }
    }

    pub const fn sub() -> Self {
        Self { opcode: Opcode::Sub, arg: Arg::None }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.arg {
            Arg::None => write!(f, "{}", self.opcode.mnemonic()),
            Arg::Count(n) => write!(f, "{} {n}", self.opcode.mnemonic()),
            Arg::Literal(v) => write!(f, "{} {v}", self.opcode.mnemonic()),
            Arg::Target(t) => write!(f, "{} {t}", self.opcode.mnemonic()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorthands_carry_expected_immediates() {
        assert_eq!(Instruction::add().arg, Arg::None);
        assert_eq!(Instruction::and(3).count(), Some(3));
        assert_eq!(Instruction::call(40).target(), Some(40));
        assert_eq!(Instruction::pushb(true).literal(), Some(Value::Bool(true)));
        assert_eq!(Instruction::pushn(99).literal(), Some(Value::Number(99)));
        assert_eq!(Instruction::pushs(4).literal(), Some(Value::StringRef(4)));
        assert_eq!(Instruction::jmpif(2).target(), Some(2));
        assert_eq!(Instruction::input(4).count(), Some(4));
    }

    #[test]
    fn accessors_reject_other_kinds() {
        assert_eq!(Instruction::add().count(), None);
        assert_eq!(Instruction::call(5).count(), None);
        assert_eq!(Instruction::dup(1).literal(), None);
        assert_eq!(Instruction::pushn(1).target(), None);
    }

    #[test]
    fn display_listing_forms() {
        assert_eq!(Instruction::add().to_string(), "ADD");
        assert_eq!(Instruction::dup(2).to_string(), "DUP 2");
        assert_eq!(Instruction::pushn(16).to_string(), "PUSHN 16");
        assert_eq!(Instruction::pushb(false).to_string(), "PUSHB false");
        assert_eq!(Instruction::pushs(7).to_string(), "PUSHS str#7");
        assert_eq!(Instruction::call(33).to_string(), "CALL 33");
    }

    #[test]
    fn shorthands_are_const_usable() {
        const PROG: [Instruction; 2] = [Instruction::pushb(true), Instruction::halt()];
        assert_eq!(PROG[0].opcode, Opcode::PushB);
        assert_eq!(PROG[1].opcode, Opcode::Halt);
    }
}
