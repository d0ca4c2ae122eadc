//! Main execution loop and opcode dispatch for the Strait VM.
//!
//! The loop fetches one instruction, pre-increments the program
//! counter, and dispatches. Pre-incrementing makes CALL's captured
//! return address "the instruction after the CALL" and makes JMPIF's
//! offset relative to the instruction after the jump; both conventions
//! are load-bearing for how target literals are written.
//!
//! Termination does not rest on any loop bound here: CALL targets must
//! strictly exceed the CALL's own index and taken JMPIF offsets are at
//! least 2, so the program counter can only revisit an index by
//! RETURNing to the successor of an already-executed CALL. Reachable pc
//! sets stay finite and every run halts or errors in O(program length)
//! steps.

use strait_common::{Instruction, Opcode, Value};

use crate::error::{Halt, RuntimeError};
use crate::machine::Vm;

impl<'a, 's> Vm<'a, 's> {
    /// Execute the program until HALT or error.
    ///
    /// On a runtime error this logs one out-of-band diagnostic line
    /// naming the faulting instruction index; the host still sees only
    /// the status value.
    pub fn execute(&mut self) -> Result<Halt, RuntimeError> {
        loop {
            let at = self.pc; // saved for error reporting
            match self.step() {
                Ok(None) => {}
                Ok(Some(halt)) => return Ok(halt),
                Err(error) => {
                    tracing::debug!("program counter {at}: {error}");
                    return Err(error);
                }
            }
        }
    }

    /// Fetch, pre-increment, and dispatch one instruction.
    fn step(&mut self) -> Result<Option<Halt>, RuntimeError> {
        let instr = *self.fetch()?;

        // The next sequential fetch target; CALL, JMPIF, and RETURN may
        // overwrite it.
        self.pc += 1;

        match instr.opcode {
            Opcode::Add => self.exec_add_sub(true)?,
            Opcode::And => self.exec_and_or(&instr, true)?,
            Opcode::Call => self.exec_call(&instr)?,
            Opcode::Dup => self.exec_dup(&instr)?,
            Opcode::Eq => self.exec_eq(&instr)?,
            Opcode::Flush => self.exec_flush()?,
            Opcode::Gt => self.exec_lt_gt(false)?,
            Opcode::Halt => return self.exec_halt().map(Some),
            Opcode::JmpIf => self.exec_jmpif(&instr)?,
            Opcode::Lt => self.exec_lt_gt(true)?,
            Opcode::Not => self.exec_not()?,
            Opcode::Or => self.exec_and_or(&instr, false)?,
            Opcode::Output => self.exec_output()?,
            Opcode::Pop => self.exec_pop(&instr)?,
            Opcode::PushB => self.exec_pushb(&instr)?,
            Opcode::PushN => self.exec_pushn(&instr)?,
            Opcode::PushS => self.exec_pushs(&instr)?,
            Opcode::Input => self.exec_input(&instr)?,
            Opcode::Return => self.exec_return()?,
            Opcode::Rewind => self.exec_rewind(&instr)?,
            Opcode::Roll => self.exec_roll(&instr)?,
            Opcode::Sub => self.exec_add_sub(false)?,
        }

        Ok(None)
    }

    // ---- Arithmetic ----

    /// ADD / SUB: pop y then x, push x + y or x - y.
    ///
    /// Overflow on ADD and underflow on SUB (y > x) are `OutOfBounds`;
    /// the operands stay consumed.
    fn exec_add_sub(&mut self, add: bool) -> Result<(), RuntimeError> {
        let y = self.pop_number()?;
        let x = self.pop_number()?;

        let result = if add {
            x.checked_add(y).ok_or(RuntimeError::OutOfBounds)?
        } else {
            x.checked_sub(y).ok_or(RuntimeError::OutOfBounds)?
        };

        self.stack.arg_push(Value::Number(result))
    }

    // ---- Logic ----

    /// AND n / OR n: pop n Booleans, push their conjunction or
    /// disjunction. All n operands are popped even once the result is
    /// settled.
    fn exec_and_or(&mut self, instr: &Instruction, and: bool) -> Result<(), RuntimeError> {
        let n = instr.count().ok_or(RuntimeError::InvalidLiteral)?;
        if n < 2 {
            return Err(RuntimeError::InvalidLiteral);
        }

        let mut acc = self.pop_bool()?;
        for _ in 1..n {
            let operand = self.pop_bool()?;
            acc = if and { acc && operand } else { acc || operand };
        }

        self.stack.arg_push(Value::Bool(acc))
    }

    /// EQ n: pop n numbers, push whether they are all equal. As with
    /// AND/OR, every operand is popped.
    fn exec_eq(&mut self, instr: &Instruction) -> Result<(), RuntimeError> {
        let n = instr.count().ok_or(RuntimeError::InvalidLiteral)?;
        if n < 2 {
            return Err(RuntimeError::InvalidLiteral);
        }

        let first = self.pop_number()?;
        let mut all_equal = true;
        for _ in 1..n {
            if self.pop_number()? != first {
                all_equal = false;
            }
        }

        self.stack.arg_push(Value::Bool(all_equal))
    }

    /// LT / GT: pop y then x, push x < y or x > y.
    fn exec_lt_gt(&mut self, lt: bool) -> Result<(), RuntimeError> {
        let y = self.pop_number()?;
        let x = self.pop_number()?;
        let result = if lt { x < y } else { x > y };
        self.stack.arg_push(Value::Bool(result))
    }

    fn exec_not(&mut self) -> Result<(), RuntimeError> {
        let value = self.pop_bool()?;
        self.stack.arg_push(Value::Bool(!value))
    }

    // ---- Stack ----

    fn exec_dup(&mut self, instr: &Instruction) -> Result<(), RuntimeError> {
        let n = instr.count().ok_or(RuntimeError::InvalidLiteral)?;
        if n < 1 {
            return Err(RuntimeError::InvalidLiteral);
        }
        self.stack.arg_dup(n)
    }

    fn exec_pop(&mut self, instr: &Instruction) -> Result<(), RuntimeError> {
        let n = instr.count().ok_or(RuntimeError::InvalidLiteral)?;
        if n < 1 {
            return Err(RuntimeError::InvalidLiteral);
        }
        for _ in 0..n {
            self.stack.arg_pop()?;
        }
        Ok(())
    }

    fn exec_pushb(&mut self, instr: &Instruction) -> Result<(), RuntimeError> {
        match instr.literal() {
            Some(literal @ Value::Bool(_)) => self.stack.arg_push(literal),
            _ => Err(RuntimeError::InvalidLiteral),
        }
    }

    fn exec_pushn(&mut self, instr: &Instruction) -> Result<(), RuntimeError> {
        match instr.literal() {
            Some(literal @ Value::Number(_)) => self.stack.arg_push(literal),
            _ => Err(RuntimeError::InvalidLiteral),
        }
    }

    fn exec_pushs(&mut self, instr: &Instruction) -> Result<(), RuntimeError> {
        match instr.literal() {
            Some(literal @ Value::StringRef(_)) => self.stack.arg_push(literal),
            _ => Err(RuntimeError::InvalidLiteral),
        }
    }

    fn exec_roll(&mut self, instr: &Instruction) -> Result<(), RuntimeError> {
        let n = instr.count().ok_or(RuntimeError::InvalidLiteral)?;
        if n < 2 {
            return Err(RuntimeError::InvalidLiteral);
        }
        self.stack.arg_roll(n)
    }

    // ---- Control ----

    /// CALL: push the pre-incremented pc as the return address and jump
    /// to an absolute target.
    ///
    /// Targets at or before the CALL's own index would permit loops and
    /// fail with `NoLoops`.
    fn exec_call(&mut self, instr: &Instruction) -> Result<(), RuntimeError> {
        let target = instr.target().ok_or(RuntimeError::InvalidLiteral)?;

        if target < self.pc {
            return Err(RuntimeError::NoLoops);
        }

        self.stack.ctl_push(Value::ReturnAddress(self.pc))?;
        self.pc = target;
        Ok(())
    }

    /// HALT: pop the program's Boolean verdict and stop.
    fn exec_halt(&mut self) -> Result<Halt, RuntimeError> {
        if self.pop_bool()? {
            Ok(Halt::True)
        } else {
            Ok(Halt::False)
        }
    }

    /// JMPIF: pop a Boolean; if true, advance by a forward offset.
    ///
    /// The offset is relative to the pre-incremented pc minus one, so an
    /// offset of 2 skips exactly the instruction after the jump. Offsets
    /// below 2 could stall or re-execute the jump and are rejected as
    /// malformed literals.
    fn exec_jmpif(&mut self, instr: &Instruction) -> Result<(), RuntimeError> {
        let offset = instr.target().ok_or(RuntimeError::InvalidLiteral)?;
        if offset < 2 {
            return Err(RuntimeError::InvalidLiteral);
        }

        if !self.pop_bool()? {
            return Ok(()); // not taken
        }

        if offset > u16::MAX - self.pc {
            return Err(RuntimeError::NoProgram);
        }
        // Undo one step of the dispatch increment, then apply.
        self.pc += offset - 1;
        Ok(())
    }

    /// RETURN: restore the pc saved by the matching CALL.
    fn exec_return(&mut self) -> Result<(), RuntimeError> {
        match self.stack.ctl_pop()? {
            Value::ReturnAddress(target) => {
                self.pc = target;
                Ok(())
            }
            // The control stack admits nothing else.
            _ => Err(RuntimeError::InterpreterBug),
        }
    }

    // ---- I/O ----

    /// FLUSH: pop the event id, then the event type, and deliver the
    /// output queue's text as one event.
    fn exec_flush(&mut self) -> Result<(), RuntimeError> {
        let event_id = self.pop_number()?;
        let event_type = self.pop_number()?;
        self.output.flush(event_type, event_id, &mut *self.sink);
        Ok(())
    }

    /// INPUT n: dequeue an n-byte number (n in {1, 2, 4}) and push it.
    fn exec_input(&mut self, instr: &Instruction) -> Result<(), RuntimeError> {
        let n = instr.count().ok_or(RuntimeError::InvalidLiteral)?;
        if !matches!(n, 1 | 2 | 4) {
            return Err(RuntimeError::InvalidLiteral);
        }

        let value = self.input.dequeue(n)?;
        self.stack.arg_push(Value::Number(value))
    }

    /// OUTPUT: pop a value and append its text form to the output
    /// queue.
    fn exec_output(&mut self) -> Result<(), RuntimeError> {
        match self.stack.arg_pop()? {
            Value::Bool(b) => self.output.enqueue_bool(b),
            Value::Number(n) => self.output.enqueue_number(n),
            Value::StringRef(i) => self.output.enqueue_string(i),
            // Return addresses have no text form.
            Value::ReturnAddress(_) => Err(RuntimeError::InvalidArgument),
        }
    }

    fn exec_rewind(&mut self, instr: &Instruction) -> Result<(), RuntimeError> {
        let n = instr.count().ok_or(RuntimeError::InvalidLiteral)?;
        self.input.rewind(n)
    }
}
