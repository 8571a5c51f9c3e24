// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The execution [State] of the [super::Interpreter]

use std::fmt::Display;

/// Whether the interpreter is executing, or blocked on a keypress
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum State {
    /// Executing instructions
    #[default]
    Running,
    /// Blocked by `Fx0A` until a key is pressed.
    /// The pressed key will be stored in v`register`
    WaitingForKey {
        /// The register awaiting a key
        register: usize,
    },
}

impl State {
    /// Returns true if the interpreter will execute on the next step
    pub fn is_running(&self) -> bool {
        matches!(self, State::Running)
    }
}

impl Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            State::Running => write!(f, "running"),
            State::WaitingForKey { register } => write!(f, "waiting for key -> v{register:X}"),
        }
    }
}
