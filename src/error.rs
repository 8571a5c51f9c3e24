// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Error type for Chimp

use thiserror::Error;

/// Result type, equivalent to [std::result::Result]<T, [enum@Error]>
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Chimp.
#[derive(Debug, Error)]
pub enum Error {
    /// Tried to call a subroutine with all 16 stack levels in use
    #[error("stack overflow: all 16 return addresses are in use")]
    StackOverflow,
    /// Tried to return from a subroutine with an empty stack
    #[error("stack underflow: returned with no return address on the stack")]
    StackUnderflow,
    /// Represents an opcode that no instruction family recognizes
    #[error("opcode {word:04x} not recognized")]
    UnknownOpcode {
        /// The offending word
        word: u16,
    },
    /// Tried to press a key that doesn't exist
    #[error("tried to press key {key:X} which does not exist")]
    InvalidKey {
        /// The offending key
        key: usize,
    },
    /// Tried to get/set an out-of-bounds register
    #[error("tried to access register v{reg:X} which does not exist")]
    InvalidRegister {
        /// The offending register
        reg: usize,
    },
    /// Tried to load a program which doesn't fit in program memory
    #[error("program is {len} bytes, but only {max} bytes of program memory exist")]
    ProgramTooLarge {
        /// Length of the program
        len: usize,
        /// Size of the program region
        max: usize,
    },
    /// Error originated in [std::io]
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}
