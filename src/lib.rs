// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! This crate implements the core of a Chip-8 interpreter: memory, registers,
//! the call stack, timers, the key latch, and a 64x32 monochrome screen.
//!
//! The core has no notion of time. A host calls [Interpreter::step] at whatever
//! rate it likes, draws the [Screen] when [Interpreter::should_redraw] says so,
//! and feeds keys in with [Interpreter::press] and [Interpreter::release].
//!
//! ```rust
//! # use chimp::*;
//! # fn main() -> Result<()> {
//! let mut cpu = Interpreter::new(Screen::new(), Silent);
//! cpu.load_program(&[
//!     0x60, 0x0a, // mov  #0a, v0
//!     0xf0, 0x29, // font v0, I
//!     0xd1, 0x15, // draw #5, v1, v1
//! ])?;
//! cpu.multistep(3)?;
//! assert!(cpu.should_redraw());
//! assert_eq!(14, cpu.screen().lit());
//! # Ok(())
//! # }
//! ```

pub mod cpu;
pub mod error;
pub mod screen;
pub mod shared;
pub mod speaker;

pub use cpu::{
    instruction::Insn,
    mem::{Mem, Region, Region::*, FONT, GLYPH_SIZE, MEM_SIZE, PROGRAM_START},
    stack::{Stack, STACK_DEPTH},
    state::State,
    Interpreter,
};
pub use error::{Error, Result};
pub use screen::{PixelSurface, Screen, HEIGHT, WIDTH};
pub use shared::SharedInterpreter;
pub use speaker::{BeepCounter, Bell, Silent, Speaker};
