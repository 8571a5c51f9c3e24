// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The call stack, which holds up to 16 return addresses

use super::Adr;
use crate::error::{Error, Result};

/// Number of return addresses the [Stack] can hold
pub const STACK_DEPTH: usize = 16;

/// A bounded LIFO of return addresses
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stack {
    entries: [Adr; STACK_DEPTH],
    sp: usize,
}

impl Stack {
    /// Constructs an empty [Stack]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a return address.
    ///
    /// Returns [Error::StackOverflow] if all [STACK_DEPTH] levels are in use.
    /// # Examples
    /// ```rust
    /// # use chimp::*;
    /// let mut stack = Stack::new();
    /// for addr in 0..16 {
    ///     stack.push(addr).unwrap();
    /// }
    /// stack.push(0x200).expect_err("17th push should overflow");
    /// ```
    pub fn push(&mut self, addr: Adr) -> Result<()> {
        let slot = self.entries.get_mut(self.sp).ok_or(Error::StackOverflow)?;
        *slot = addr;
        self.sp += 1;
        Ok(())
    }

    /// Pops the most recently pushed return address.
    ///
    /// Returns [Error::StackUnderflow] if the stack is empty.
    /// # Examples
    /// ```rust
    /// # use chimp::*;
    /// let mut stack = Stack::new();
    /// stack.pop().expect_err("empty stack should underflow");
    /// stack.push(0x202).unwrap();
    /// assert_eq!(0x202, stack.pop().unwrap());
    /// ```
    pub fn pop(&mut self) -> Result<Adr> {
        self.sp = self.sp.checked_sub(1).ok_or(Error::StackUnderflow)?;
        Ok(self.entries[self.sp])
    }

    /// Gets the number of return addresses on the stack
    pub fn len(&self) -> usize {
        self.sp
    }

    /// Returns true if there are no return addresses on the stack
    pub fn is_empty(&self) -> bool {
        self.sp == 0
    }

    /// Discards every return address
    pub fn clear(&mut self) {
        self.sp = 0;
    }

    /// Gets the live portion of the stack, oldest entry first
    pub fn as_slice(&self) -> &[Adr] {
        &self.entries[..self.sp]
    }
}
