// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Decodes and runs instructions


pub mod behavior;
pub mod instruction;
pub mod mem;
pub mod stack;
pub mod state;

use self::{
    instruction::Insn,
    mem::{Mem, Region::*, PROGRAM_START},
    stack::Stack,
    state::State,
};
use crate::{
    error::{Error, Result},
    screen::{PixelSurface, Screen},
    speaker::{Silent, Speaker},
};
use owo_colors::OwoColorize;

type Reg = usize;
type Adr = u16;
type Nib = u8;

/// Represents the internal state of the Chip-8 interpreter
///
/// The interpreter owns its [PixelSurface] and [Speaker], which default to a
/// [Screen] and a [Silent] speaker.
#[derive(Clone, Debug, PartialEq)]
pub struct Interpreter<S = Screen, A = Silent> {
    // memory
    mem: Mem,
    stack: Stack,
    // registers
    pc: Adr,
    i: Adr,
    v: [u8; 16],
    delay: u8,
    sound: u8,
    // I/O
    keys: [bool; 16],
    screen: S,
    speaker: A,
    // Execution data
    state: State,
    redraw: bool,
    cycle: usize,
}

// public interface
impl<S: PixelSurface, A: Speaker> Interpreter<S, A> {
    /// Constructs a new Interpreter, drawing to `screen` and beeping through `speaker`
    ///
    /// Registers and timers start at 0, pc starts at `0x200`, and the font is loaded at `0x000`.
    /// # Examples
    /// ```rust
    /// # use chimp::*;
    /// let cpu = Interpreter::new(Screen::new(), Silent);
    /// assert_eq!(0x200, cpu.pc());
    /// assert!(cpu.is_running());
    /// ```
    pub fn new(screen: S, speaker: A) -> Self {
        Interpreter {
            mem: Mem::new(),
            stack: Stack::new(),
            pc: PROGRAM_START,
            i: 0,
            v: [0; 16],
            delay: 0,
            sound: 0,
            keys: [false; 16],
            screen,
            speaker,
            state: State::Running,
            redraw: false,
            cycle: 0,
        }
    }

    /// Loads a program from disk into the program space
    pub fn load_program_file(&mut self, rom: impl AsRef<std::path::Path>) -> Result<&mut Self> {
        self.load_program(&std::fs::read(rom)?)
    }

    /// Loads bytes into the program space, starting at `0x200`
    ///
    /// Returns [Error::ProgramTooLarge] if the program won't fit below `0x1000`.
    /// # Examples
    /// ```rust
    /// # use chimp::*;
    /// # fn main() -> Result<()> {
    /// let mut cpu = Interpreter::new(Screen::new(), Silent);
    /// cpu.load_program(&[0x61, 0x01, 0x71, 0x01])?;
    /// cpu.multistep(2)?;
    /// assert_eq!(2, cpu.v()[1]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn load_program(&mut self, rom: &[u8]) -> Result<&mut Self> {
        self.mem.load_region(Program, rom)?;
        Ok(self)
    }

    /// Presses a key, and reports whether the key's state changed.
    /// If key does not exist, returns [Error::InvalidKey].
    ///
    /// If the interpreter is [State::WaitingForKey], the key is stored
    /// in the waiting register, and execution resumes.
    ///
    /// # Examples
    /// ```rust
    /// # use chimp::*;
    /// let mut cpu = Interpreter::new(Screen::new(), Silent);
    ///
    /// // press key `7`
    /// let did_press = cpu.press(0x7).unwrap();
    /// assert!(did_press);
    ///
    /// // press key `7` again, even though it's already pressed
    /// let did_press = cpu.press(0x7).unwrap();
    /// // it was already pressed, so nothing's changed.
    /// assert!(!did_press);
    /// ```
    pub fn press(&mut self, key: usize) -> Result<bool> {
        let keyref = self.keys.get_mut(key).ok_or(Error::InvalidKey { key })?;
        let changed = !*keyref;
        *keyref = true;
        if let State::WaitingForKey { register } = self.state {
            self.v[register] = key as u8;
            self.state = State::Running;
        }
        Ok(changed)
    }

    /// Releases a key, and reports whether the key's state changed.
    /// If key is outside range `0..=0xF`, returns [Error::InvalidKey].
    ///
    /// # Examples
    /// ```rust
    /// # use chimp::*;
    /// let mut cpu = Interpreter::new(Screen::new(), Silent);
    /// // press key `7`
    /// cpu.press(0x7).unwrap();
    /// // release key `7`
    /// let changed = cpu.release(0x7).unwrap();
    /// assert!(changed); // key released
    /// // try releasing `7` again
    /// let changed = cpu.release(0x7).unwrap();
    /// assert!(!changed); // key was not held
    /// ```
    pub fn release(&mut self, key: usize) -> Result<bool> {
        let keyref = self.keys.get_mut(key).ok_or(Error::InvalidKey { key })?;
        let changed = *keyref;
        *keyref = false;
        Ok(changed)
    }

    /// Sets a general purpose register.
    /// If the register doesn't exist, returns [Error::InvalidRegister]
    /// # Examples
    /// ```rust
    /// # use chimp::*;
    /// let mut cpu = Interpreter::new(Screen::new(), Silent);
    /// cpu.set_v(0x4, 0x41).unwrap();
    /// assert_eq!(0x41, cpu.v()[4]);
    /// cpu.set_v(0x10, 0x41).expect_err("there is no v10");
    /// ```
    pub fn set_v(&mut self, reg: Reg, value: u8) -> Result<()> {
        let gpr = self.v.get_mut(reg).ok_or(Error::InvalidRegister { reg })?;
        *gpr = value;
        Ok(())
    }

    /// Gets a slice of the entire general purpose registers
    pub fn v(&self) -> &[u8] {
        self.v.as_slice()
    }

    /// Gets the program counter
    pub fn pc(&self) -> Adr {
        self.pc
    }

    /// Gets the I register
    pub fn i(&self) -> Adr {
        self.i
    }

    /// Gets the value in the Sound Timer register
    pub fn sound(&self) -> u8 {
        self.sound
    }

    /// Gets the value in the Delay Timer register
    pub fn delay(&self) -> u8 {
        self.delay
    }

    /// Gets the state of every key
    pub fn keys(&self) -> &[bool] {
        self.keys.as_slice()
    }

    /// Gets the call [Stack]
    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    /// Gets the execution [State]
    pub fn state(&self) -> State {
        self.state
    }

    /// Returns false while the interpreter is blocked waiting for a key
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Gets the number of steps the interpreter has executed
    ///
    /// Steps spent waiting for a key, and steps that faulted, are not counted.
    pub fn cycle(&self) -> usize {
        self.cycle
    }

    /// Gets the interpreter's [Mem]
    pub fn mem(&self) -> &Mem {
        &self.mem
    }

    /// Gets the interpreter's [Mem], mutably
    pub fn mem_mut(&mut self) -> &mut Mem {
        &mut self.mem
    }

    /// Gets the [PixelSurface]
    pub fn screen(&self) -> &S {
        &self.screen
    }

    /// Gets the [PixelSurface], mutably
    pub fn screen_mut(&mut self) -> &mut S {
        &mut self.screen
    }

    /// Gets the [Speaker]
    pub fn speaker(&self) -> &A {
        &self.speaker
    }

    /// Gets the [Speaker], mutably
    pub fn speaker_mut(&mut self) -> &mut A {
        &mut self.speaker
    }

    /// Returns true if the screen has changed since the last [Interpreter::clear_redraw]
    pub fn should_redraw(&self) -> bool {
        self.redraw
    }

    /// Acknowledges that the screen has been drawn
    pub fn clear_redraw(&mut self) {
        self.redraw = false;
    }

    /// Resets the interpreter to its power-on state.
    ///
    /// Touches the stack, pc, registers, timers, keys, state, cycle count, and screen.
    ///
    /// Does not touch memory, so the loaded program may be run again.
    /// # Examples
    /// ```rust
    /// # use chimp::*;
    /// let mut cpu = Interpreter::new(Screen::new(), Silent);
    /// cpu.load_program(&[0x12, 0x34]).unwrap();
    /// cpu.step().unwrap();
    /// assert_eq!(0x234, cpu.pc());
    /// cpu.reset();
    /// assert_eq!(0x200, cpu.pc());
    /// assert_eq!(0x1234, cpu.mem().read_word(0x200u16));
    /// ```
    pub fn reset(&mut self) {
        // clear the stack
        self.stack.clear();
        // Reset the program counter
        self.pc = PROGRAM_START;
        // Zero the registers
        self.i = 0;
        self.v = [0; 16];
        self.delay = 0;
        self.sound = 0;
        // I/O
        self.keys = [false; 16];
        self.screen.clear();
        // Execution data
        self.state = State::Running;
        self.redraw = true;
        self.cycle = 0;
    }

    /// Executes `steps` instructions, stopping at the first error
    /// # Examples
    /// ```rust
    /// # use chimp::*;
    /// let mut cpu = Interpreter::new(Screen::new(), Silent);
    /// cpu.load_program(&[
    ///     0x00, 0xe0, // cls
    ///     0x12, 0x02, // jump 0x202 (pc)
    /// ]).unwrap();
    /// cpu.multistep(0x20)
    ///     .expect("The program should only have valid opcodes.");
    /// assert_eq!(0x202, cpu.pc());
    /// assert_eq!(0x20, cpu.cycle());
    /// ```
    pub fn multistep(&mut self, steps: usize) -> Result<&mut Self> {
        for _ in 0..steps {
            self.step()?;
        }
        Ok(self)
    }

    /// Executes a single instruction, then ticks the timers
    ///
    /// Does nothing while the interpreter is [State::WaitingForKey].
    ///
    /// Returns [Error::UnknownOpcode] if the instruction at `pc` is not recognized,
    /// and [Error::StackOverflow] or [Error::StackUnderflow] if a call or return
    /// doesn't fit the stack. State changed before the fault is not rolled back.
    /// # Examples
    /// ```rust
    /// # use chimp::*;
    /// let mut cpu = Interpreter::new(Screen::new(), Silent);
    /// cpu.load_program(&[
    ///     0x00, 0xe0, // cls
    ///     0x12, 0x02, // jump 0x202 (pc)
    /// ]).unwrap();
    /// cpu.step()
    ///     .expect("0x00e0 (cls) should be a valid opcode.");
    /// assert_eq!(0x202, cpu.pc());
    /// assert_eq!(1, cpu.cycle());
    /// ```
    /// Returns [Error::UnknownOpcode] if the instruction is not implemented.
    /// ```rust
    /// # use chimp::*;
    /// let mut cpu = Interpreter::new(Screen::new(), Silent);
    /// cpu.load_program(&[
    ///     0xff, 0xff, // invalid!
    ///     0x12, 0x02, // jump 0x202 (pc)
    /// ]).unwrap();
    /// dbg!(cpu.step())
    ///     .expect_err("Should return Error::UnknownOpcode { 0xffff }");
    /// ```
    pub fn step(&mut self) -> Result<&mut Self> {
        if !self.state.is_running() {
            return Ok(self);
        }
        // fetch
        let word = self.mem.read_word(self.pc);
        self.pc = self.pc.wrapping_add(2);
        // decode
        let insn = Insn::from_word(word).ok_or(Error::UnknownOpcode { word })?;
        self.execute(insn)?;
        self.cycle += 1;
        self.tick_timers();
        Ok(self)
    }

    /// Counts both timers down toward 0, beeping when the sound timer runs out
    fn tick_timers(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        if self.sound == 1 {
            self.speaker.beep();
        }
        self.sound = self.sound.saturating_sub(1);
    }

    /// Dumps the current state of all registers, the upcoming instruction, and the cycle count
    /// # Examples
    /// ```rust
    /// # use chimp::*;
    /// let mut cpu = Interpreter::new(Screen::new(), Silent);
    /// cpu.dump();
    /// ```
    /// outputs
    /// ```text
    /// PC: 0200, SP: 0000, I: 0000 (running)
    /// v0: 00 v1: 00 v2: 00 v3: 00
    /// v4: 00 v5: 00 v6: 00 v7: 00
    /// v8: 00 v9: 00 vA: 00 vB: 00
    /// vC: 00 vD: 00 vE: 00 vF: 00
    /// DLY: 0, SND: 0, CYC:      0
    /// NXT: 0000 inval
    /// ```
    pub fn dump(&self) {
        let next = self.mem.read_word(self.pc);
        eprintln!(
            "PC: {:04x}, SP: {:04x}, I: {:04x} ({})\n{}DLY: {}, SND: {}, CYC: {:6}\nNXT: {:04x} {}",
            self.pc,
            self.stack.len(),
            self.i,
            self.state,
            self.v
                .into_iter()
                .enumerate()
                .map(|(i, gpr)| {
                    format!(
                        "v{i:X}: {gpr:02x} {}",
                        match i % 4 {
                            3 => "\n",
                            _ => "",
                        }
                    )
                })
                .collect::<String>(),
            self.delay,
            self.sound,
            self.cycle.bright_black(),
            next,
            match Insn::from_word(next) {
                Some(insn) => insn.to_string(),
                None => "inval".to_string(),
            }
        );
    }
}

impl<S: PixelSurface + Default, A: Speaker + Default> Default for Interpreter<S, A> {
    /// Constructs a new Interpreter with a default screen and speaker
    fn default() -> Self {
        Self::new(S::default(), A::default())
    }
}
