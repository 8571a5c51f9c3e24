// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The speaker, which beeps when the sound timer runs out

use std::io::Write;

/// Something that can beep
pub trait Speaker {
    /// Called once each time the sound timer counts down from 1 to 0
    fn beep(&mut self);
}

/// A [Speaker] that does nothing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Silent;

impl Speaker for Silent {
    fn beep(&mut self) {}
}

/// A [Speaker] that rings the terminal bell on stderr
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bell;

impl Speaker for Bell {
    fn beep(&mut self) {
        let mut stderr = std::io::stderr();
        // best-effort
        stderr.write_all(b"\x07").ok();
        stderr.flush().ok();
    }
}

/// A [Speaker] that counts its beeps
/// # Examples
/// ```rust
/// # use chimp::*;
/// let mut counter = BeepCounter::default();
/// counter.beep();
/// assert_eq!(1, counter.beeps);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BeepCounter {
    /// Number of times [Speaker::beep] has been called
    pub beeps: usize,
}

impl Speaker for BeepCounter {
    fn beep(&mut self) {
        self.beeps += 1;
    }
}
