// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Terminal IO for the chimp host

use chimp::{error::Result, Interpreter, PixelSurface, Screen, Speaker};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::{collections::VecDeque, io::Write, time::Duration};

/// Maps a key on the left side of a QWERTY keyboard to a Chip-8 key
///
/// ```text
/// 1 2 3 4      1 2 3 C
/// q w e r  ->  4 5 6 D
/// a s d f      7 8 9 E
/// z x c v      A 0 B F
/// ```
pub fn identify_key(code: KeyCode) -> Option<usize> {
    let KeyCode::Char(c) = code else {
        return None;
    };
    match c.to_ascii_lowercase() {
        '1' => Some(0x1),
        '2' => Some(0x2),
        '3' => Some(0x3),
        '4' => Some(0xc),
        'q' => Some(0x4),
        'w' => Some(0x5),
        'e' => Some(0x6),
        'r' => Some(0xd),
        'a' => Some(0x7),
        's' => Some(0x8),
        'd' => Some(0x9),
        'f' => Some(0xe),
        'z' => Some(0xa),
        'x' => Some(0x0),
        'c' => Some(0xb),
        'v' => Some(0xf),
        _ => None,
    }
}

/// Somewhere terminal events come from
pub trait KeySource {
    /// Gets the next pending event, without blocking
    fn next_event(&mut self) -> Result<Option<Event>>;
}

/// Reads events from the controlling terminal
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Terminal;

impl KeySource for Terminal {
    fn next_event(&mut self) -> Result<Option<Event>> {
        if event::poll(Duration::ZERO)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }
}

/// Replays a fixed list of events
impl KeySource for VecDeque<Event> {
    fn next_event(&mut self) -> Result<Option<Event>> {
        Ok(self.pop_front())
    }
}

/// Puts the terminal in raw mode until dropped
#[derive(Debug)]
pub struct RawMode(());

impl RawMode {
    pub fn enable() -> Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(RawMode(()))
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        terminal::disable_raw_mode().ok();
    }
}

/// Turns terminal key events into Chip-8 key presses.
///
/// Most terminals never report a key being let go, so a pressed key
/// is released after `sticky` frames without another press.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keypad {
    timeouts: [usize; 16],
    sticky: usize,
}

impl Keypad {
    pub fn new(sticky: usize) -> Self {
        Keypad {
            timeouts: [0; 16],
            sticky: sticky.max(1),
        }
    }

    /// Applies one key event to the interpreter.
    ///
    /// Returns false if the user asked to quit (Esc or Ctrl+C).
    pub fn key<S: PixelSurface, A: Speaker>(
        &mut self,
        event: KeyEvent,
        cpu: &mut Interpreter<S, A>,
    ) -> Result<bool> {
        let quit = match event.code {
            KeyCode::Esc => true,
            KeyCode::Char('c') => event.modifiers.contains(KeyModifiers::CONTROL),
            _ => false,
        };
        if quit {
            // quit on press, ignore the release
            return Ok(event.kind == KeyEventKind::Release);
        }
        let Some(key) = identify_key(event.code) else {
            return Ok(true);
        };
        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                cpu.press(key)?;
                self.timeouts[key] = self.sticky;
            }
            KeyEventKind::Release => {
                cpu.release(key)?;
                self.timeouts[key] = 0;
            }
        }
        Ok(true)
    }

    /// Counts down pressed keys, and releases the ones that timed out
    pub fn tick<S: PixelSurface, A: Speaker>(&mut self, cpu: &mut Interpreter<S, A>) -> Result<()> {
        for (key, timeout) in self.timeouts.iter_mut().enumerate() {
            if *timeout == 0 {
                continue;
            }
            *timeout -= 1;
            if *timeout == 0 {
                cpu.release(key)?;
            }
        }
        Ok(())
    }

    /// Checks whether the keypad is holding a key down
    #[allow(dead_code)] // used in tests
    pub fn is_pressed(&self, key: usize) -> bool {
        self.timeouts.get(key).map_or(false, |&t| t > 0)
    }
}

/// Draws frames to a terminal, and holds down keys
#[derive(Debug)]
pub struct TermUi<W: Write> {
    out: W,
    held: Vec<usize>,
    keypad: Keypad,
    enhanced: bool,
    drawn: usize,
}

impl<W: Write> TermUi<W> {
    pub fn new(out: W, held: Vec<usize>, sticky: usize) -> Self {
        TermUi {
            out,
            held,
            keypad: Keypad::new(sticky),
            enhanced: false,
            drawn: 0,
        }
    }

    /// Gets the keys held for the whole run
    pub fn held(&self) -> &[usize] {
        &self.held
    }

    #[allow(dead_code)] // used in tests
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Gets the number of frames drawn so far
    #[allow(dead_code)] // used in tests
    pub fn drawn(&self) -> usize {
        self.drawn
    }

    /// Switches to the alternate screen, and asks for key release events
    pub fn enter(&mut self) -> Result<()> {
        execute!(self.out, EnterAlternateScreen, Hide)?;
        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                self.out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            self.enhanced = true;
        }
        Ok(())
    }

    /// Undoes [TermUi::enter]
    pub fn leave(&mut self) -> Result<()> {
        if std::mem::take(&mut self.enhanced) {
            execute!(self.out, PopKeyboardEnhancementFlags)?;
        }
        execute!(self.out, Show, LeaveAlternateScreen)?;
        Ok(())
    }

    /// Handles one terminal event. Returns false if the user asked to quit.
    pub fn input<S: PixelSurface, A: Speaker>(
        &mut self,
        event: Event,
        cpu: &mut Interpreter<S, A>,
    ) -> Result<bool> {
        match event {
            Event::Key(key) => self.keypad.key(key, cpu),
            _ => Ok(true),
        }
    }

    /// Releases timed-out keys, then re-presses every held key,
    /// so a program blocked on `Fx0A` sees a new keypress
    pub fn keys<S: PixelSurface, A: Speaker>(&mut self, cpu: &mut Interpreter<S, A>) -> Result<()> {
        self.keypad.tick(cpu)?;
        for &key in &self.held {
            cpu.release(key)?;
            cpu.press(key)?;
        }
        Ok(())
    }

    /// Draws the screen if it's changed, and acknowledges the redraw.
    ///
    /// Returns true if anything was drawn.
    pub fn frame<A: Speaker>(&mut self, cpu: &mut Interpreter<Screen, A>) -> Result<bool> {
        if !cpu.should_redraw() {
            return Ok(false);
        }
        if self.drawn == 0 {
            queue!(self.out, Clear(ClearType::All))?;
        }
        // raw mode doesn't return the carriage on newline
        for (row, line) in cpu.screen().render().lines().enumerate() {
            queue!(self.out, MoveTo(0, row as u16), Print(line))?;
        }
        self.out.flush()?;
        cpu.clear_redraw();
        self.drawn += 1;
        Ok(true)
    }

    #[allow(dead_code)] // used in tests
    pub fn into_inner(self) -> W {
        self.out
    }
}
