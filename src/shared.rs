// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! A cloneable, thread-safe handle to an [Interpreter]
//!
//! Hosts which read the keyboard on one thread and run the interpreter on
//! another can share a [SharedInterpreter] between them. Every operation takes
//! the same lock, so a keypress never lands in the middle of a step.

use crate::{
    cpu::Interpreter,
    error::Result,
    screen::{PixelSurface, Screen},
    speaker::{Silent, Speaker},
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Shares one [Interpreter] between threads
#[derive(Debug)]
pub struct SharedInterpreter<S = Screen, A = Silent> {
    inner: Arc<Mutex<Interpreter<S, A>>>,
}

impl<S: PixelSurface, A: Speaker> SharedInterpreter<S, A> {
    /// Wraps an [Interpreter] for sharing
    pub fn new(interpreter: Interpreter<S, A>) -> Self {
        Self { inner: Arc::new(Mutex::new(interpreter)) }
    }

    /// Locks the interpreter. A panic in another holder doesn't invalidate it.
    fn lock(&self) -> MutexGuard<'_, Interpreter<S, A>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` with exclusive access to the interpreter
    /// # Examples
    /// ```rust
    /// # use chimp::*;
    /// let shared = SharedInterpreter::new(Interpreter::new(Screen::new(), Silent));
    /// let pc = shared.with(|cpu| cpu.pc());
    /// assert_eq!(0x200, pc);
    /// ```
    pub fn with<T>(&self, f: impl FnOnce(&mut Interpreter<S, A>) -> T) -> T {
        f(&mut self.lock())
    }

    /// See [Interpreter::step]
    pub fn step(&self) -> Result<()> {
        self.lock().step()?;
        Ok(())
    }

    /// See [Interpreter::multistep]
    pub fn multistep(&self, steps: usize) -> Result<()> {
        self.lock().multistep(steps)?;
        Ok(())
    }

    /// See [Interpreter::press]
    pub fn press(&self, key: usize) -> Result<bool> {
        self.lock().press(key)
    }

    /// See [Interpreter::release]
    pub fn release(&self, key: usize) -> Result<bool> {
        self.lock().release(key)
    }

    /// Consumes the handle, returning the interpreter if no other handles remain
    pub fn try_unwrap(self) -> std::result::Result<Interpreter<S, A>, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(mutex) => Ok(mutex.into_inner().unwrap_or_else(PoisonError::into_inner)),
            Err(inner) => Err(Self { inner }),
        }
    }
}

impl<S, A> Clone for SharedInterpreter<S, A> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<S: PixelSurface, A: Speaker> From<Interpreter<S, A>> for SharedInterpreter<S, A> {
    fn from(value: Interpreter<S, A>) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::state::State;
    use std::thread;

    fn setup_environment() -> SharedInterpreter {
        let mut cpu = Interpreter::new(Screen::new(), Silent);
        // wait for key -> v3; jump to self
        cpu.load_program(&[0xf3, 0x0a, 0x12, 0x02]).unwrap();
        SharedInterpreter::new(cpu)
    }

    #[test]
    fn press_from_another_thread() {
        let shared = setup_environment();
        shared.step().unwrap();
        assert_eq!(State::WaitingForKey { register: 3 }, shared.with(|cpu| cpu.state()));

        let remote = shared.clone();
        thread::spawn(move || remote.press(0xc).unwrap())
            .join()
            .unwrap();

        shared.multistep(4).unwrap();
        shared.with(|cpu| {
            assert!(cpu.is_running());
            assert_eq!(0xc, cpu.v()[3]);
            assert_eq!(0x202, cpu.pc());
        });
    }

    #[test]
    fn survives_poisoning() {
        let shared = setup_environment();
        let remote = shared.clone();
        let _ = thread::spawn(move || remote.with(|_| panic!("poisoned"))).join();
        assert!(shared.press(0x1).unwrap());
        assert!(shared.release(0x1).unwrap());
    }

    #[test]
    fn unwrap_last_handle() {
        let shared = setup_environment();
        let other = shared.clone();
        let shared = shared.try_unwrap().unwrap_err();
        drop(other);
        assert_eq!(0x200, shared.try_unwrap().unwrap().pc());
    }
}
