// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Chimp: runs a Chip-8 program in your terminal

mod ui;

use chimp::{error::Result, *};
use gumdrop::Options;
use owo_colors::OwoColorize;
use std::{
    io::Write,
    path::PathBuf,
    time::{Duration, Instant},
};
use ui::*;

pub fn main() -> Result<()> {
    let options = Arguments::parse_args_default_or_exit();
    let mut state = State::new(options, std::io::stdout(), Terminal)?;
    let raw = RawMode::enable()?;
    state.ui.enter()?;
    let fault = state.find_map(|result| result.err());
    state.ui.leave()?;
    drop(raw);
    if let Some(e) = fault {
        eprintln!("{}", e.bold().red());
        state.cpu.dump();
        std::process::exit(1);
    }
    Ok(())
}

/// Parses a hexadecimal key name into a key index
fn parse_key(value: &str) -> std::result::Result<usize, std::num::ParseIntError> {
    usize::from_str_radix(value, 16)
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Options, Hash)]
struct Arguments {
    #[options(help = "Load a ROM to run on Chimp.", required, free)]
    pub file: PathBuf,
    #[options(help = "Print this help message.")]
    help: bool,

    #[options(help = "Set the instructions-per-frame rate.", default = "10", meta = "STEPS")]
    pub steps: usize,
    #[options(help = "Set the target framerate.", default = "60", meta = "FR")]
    pub frame_rate: u64,
    #[options(short = "n", help = "Stop after this many frames.", meta = "FRAMES")]
    pub frames: Option<usize>,

    #[options(
        long = "key",
        help = "Hold a key (0-F) down for the whole run.",
        parse(try_from_str = "parse_key"),
        meta = "KEY"
    )]
    pub keys: Vec<usize>,
    #[options(
        short = "t",
        help = "Release a typed key after this many frames.",
        default = "15",
        meta = "FRAMES"
    )]
    pub sticky: usize,
}

#[derive(Debug)]
struct State<W: Write, I: KeySource> {
    pub steps: usize,
    pub rate: u64,
    pub frames: Option<usize>,
    pub cpu: Interpreter<Screen, Bell>,
    pub ui: TermUi<W>,
    pub input: I,
    pub ft: Instant,
}

impl<W: Write, I: KeySource> State<W, I> {
    fn new(options: Arguments, out: W, input: I) -> Result<Self> {
        let mut cpu = Interpreter::new(Screen::new(), Bell);
        cpu.load_program_file(&options.file)?;
        let state = State {
            steps: options.steps,
            rate: options.frame_rate.max(1),
            frames: options.frames,
            cpu,
            ui: TermUi::new(out, options.keys, options.sticky),
            input,
            ft: Instant::now(),
        };
        // reject bad keys before the first frame
        for &key in state.ui.held() {
            if key >= state.cpu.keys().len() {
                return Err(Error::InvalidKey { key });
            }
        }
        Ok(state)
    }
    /// Feeds pending terminal events to the keypad. Returns false on quit.
    fn input(&mut self) -> Result<bool> {
        while let Some(event) = self.input.next_event()? {
            if !self.ui.input(event, &mut self.cpu)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
    fn tick_cpu(&mut self) -> Result<()> {
        self.ui.keys(&mut self.cpu)?;
        self.cpu.multistep(self.steps)?;
        Ok(())
    }
    fn frame(&mut self) -> Result<bool> {
        self.ui.frame(&mut self.cpu)
    }
    fn wait_for_next_frame(&mut self) {
        let rate = Duration::from_nanos(1_000_000_000 / self.rate + 1);
        std::thread::sleep(rate.saturating_sub(self.ft.elapsed()));
        self.ft += rate;
    }
}

impl<W: Write, I: KeySource> Iterator for State<W, I> {
    type Item = Result<()>;

    /// Runs one frame. Ends when the frame limit is reached, or the user quits.
    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.frames {
            Some(0) => return None,
            Some(frames) => *frames -= 1,
            None => (),
        }
        self.wait_for_next_frame();
        match self.input() {
            Ok(true) => (),
            Ok(false) => {
                self.frames = Some(0);
                return None;
            }
            Err(e) => return Some(Err(e)),
        }
        if let Err(e) = self.tick_cpu() {
            return Some(Err(e));
        }
        if let Err(e) = self.frame() {
            return Some(Err(e));
        }
        Some(Ok(()))
    }
}
