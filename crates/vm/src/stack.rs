//! The Strait VM's dual stack.
//!
//! One fixed array of value slots holds two disjoint stacks that grow
//! toward each other: the argument stack (Booleans, numbers, string
//! references) from index 0 upward, and the control stack (return
//! addresses only) from the top downward. A single capacity bounds
//! their combined depth, so neither can starve the other silently.
//!
//! Loop prohibition depends on this split: return addresses live where
//! DUP and ROLL cannot reach, so a program can never duplicate,
//! reorder, or synthesize one. The control stack exposes only push and
//! pop.

use strait_common::Value;

use crate::error::RuntimeError;

/// Combined capacity of the argument and control stacks, in slots.
pub const STACK_CAPACITY: usize = 32;

/// The two stacks and their depth cursors.
///
/// Invariant: `arg_depth() + ctl_depth() <= STACK_CAPACITY` before and
/// after every operation.
#[derive(Debug)]
pub struct DualStack {
    slots: [Value; STACK_CAPACITY],
    arg_count: usize,
    ctl_count: usize,
}

impl Default for DualStack {
    fn default() -> Self {
        Self::new()
    }
}

impl DualStack {
    /// Two empty stacks.
    pub fn new() -> Self {
        Self {
            slots: [Value::Number(0); STACK_CAPACITY],
            arg_count: 0,
            ctl_count: 0,
        }
    }

    /// Depth of the argument stack.
    pub fn arg_depth(&self) -> usize {
        self.arg_count
    }

    /// Depth of the control stack.
    pub fn ctl_depth(&self) -> usize {
        self.ctl_count
    }

    /// Push onto the argument stack.
    ///
    /// Return addresses are never argument values; handing one in is an
    /// interpreter defect, not a program fault.
    pub fn arg_push(&mut self, value: Value) -> Result<(), RuntimeError> {
        if !value.is_argument() {
            return Err(RuntimeError::InterpreterBug);
        }
        if self.arg_count + self.ctl_count + 1 > STACK_CAPACITY {
            return Err(RuntimeError::OutOfBounds);
        }
        self.slots[self.arg_count] = value;
        self.arg_count += 1;
        Ok(())
    }

    /// Pop from the argument stack.
    pub fn arg_pop(&mut self) -> Result<Value, RuntimeError> {
        if self.arg_count == 0 {
            return Err(RuntimeError::OutOfBounds);
        }
        self.arg_count -= 1;
        Ok(self.slots[self.arg_count])
    }

    /// Duplicate the top `n` argument-stack entries above themselves:
    /// `.. q1 .. qn` becomes `.. q1 .. qn q1 .. qn`.
    ///
    /// Callers must ensure `n >= 1`.
    pub fn arg_dup(&mut self, n: u16) -> Result<(), RuntimeError> {
        let n = n as usize;

        if n == 0 {
            return Err(RuntimeError::InterpreterBug);
        }
        if self.arg_count < n {
            return Err(RuntimeError::OutOfBounds);
        }
        if self.arg_count + self.ctl_count + n > STACK_CAPACITY {
            return Err(RuntimeError::OutOfBounds);
        }

        self.slots
            .copy_within(self.arg_count - n..self.arg_count, self.arg_count);
        self.arg_count += n;
        Ok(())
    }

    /// Rotate the top `n` argument-stack entries one step topward, so
    /// the topmost lands at the bottom of the window:
    /// `.. q1 q2 .. qn` becomes `.. qn q1 q2 .. qn-1`.
    ///
    /// Callers must ensure `n >= 2`.
    pub fn arg_roll(&mut self, n: u16) -> Result<(), RuntimeError> {
        let n = n as usize;

        if n < 2 {
            return Err(RuntimeError::InterpreterBug);
        }
        if self.arg_count < n {
            return Err(RuntimeError::OutOfBounds);
        }

        self.slots[self.arg_count - n..self.arg_count].rotate_right(1);
        Ok(())
    }

    /// Push a return address onto the control stack.
    ///
    /// Anything other than a return address is an interpreter defect.
    pub fn ctl_push(&mut self, value: Value) -> Result<(), RuntimeError> {
        if !matches!(value, Value::ReturnAddress(_)) {
            return Err(RuntimeError::InterpreterBug);
        }
        if self.arg_count + self.ctl_count + 1 > STACK_CAPACITY {
            return Err(RuntimeError::OutOfBounds);
        }
        self.slots[STACK_CAPACITY - 1 - self.ctl_count] = value;
        self.ctl_count += 1;
        Ok(())
    }

    /// Pop a return address from the control stack.
    pub fn ctl_pop(&mut self) -> Result<Value, RuntimeError> {
        if self.ctl_count == 0 {
            return Err(RuntimeError::OutOfBounds);
        }
        self.ctl_count -= 1;
        Ok(self.slots[STACK_CAPACITY - 1 - self.ctl_count])
    }
}
