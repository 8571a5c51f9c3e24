// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Stores and displays the Chip-8's screen memory

use std::fmt::{Display, Formatter};

/// Width of the screen, in pixels
pub const WIDTH: usize = 64;
/// Height of the screen, in pixels
pub const HEIGHT: usize = 32;

/// A monochrome grid of pixels the interpreter can draw to
///
/// Coordinates are not wrapped by the interpreter. How an implementation treats
/// coordinates outside its grid is up to the implementation.
pub trait PixelSurface {
    /// Returns true if the pixel at (x, y) is lit
    fn pixel(&self, x: usize, y: usize) -> bool;
    /// Lights the pixel at (x, y)
    fn set_pixel(&mut self, x: usize, y: usize);
    /// Darkens the pixel at (x, y)
    fn clear_pixel(&mut self, x: usize, y: usize);
    /// Darkens every pixel
    fn clear(&mut self);
}

/// A 64x32, 1bpp screen, stored as one byte per row-octet
///
/// Pixels outside the grid read as unlit, and writes to them are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Screen {
    bytes: Vec<u8>,
}

impl Screen {
    /// Constructs a new, blank [Screen]
    pub fn new() -> Self {
        Screen {
            bytes: vec![0; WIDTH * HEIGHT / 8],
        }
    }

    /// Gets the width of the screen
    pub fn width(&self) -> usize {
        WIDTH
    }

    /// Gets the height of the screen
    pub fn height(&self) -> usize {
        HEIGHT
    }

    /// Gets the raw screen bytes. Each byte holds 8 horizontal pixels, MSB leftmost.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Counts the lit pixels
    /// # Examples
    /// ```rust
    /// # use chimp::*;
    /// let mut screen = Screen::new();
    /// screen.set_pixel(3, 4);
    /// screen.set_pixel(63, 31);
    /// assert_eq!(2, screen.lit());
    /// ```
    pub fn lit(&self) -> usize {
        self.bytes.iter().map(|byte| byte.count_ones() as usize).sum()
    }

    /// Finds the byte and bitmask of a pixel, if it's on screen
    #[inline(always)]
    fn locate(x: usize, y: usize) -> Option<(usize, u8)> {
        if x < WIDTH && y < HEIGHT {
            Some(((y * WIDTH + x) / 8, 0x80 >> (x % 8)))
        } else {
            None
        }
    }

    /// Renders the screen as text, using braille if drawille is available
    pub fn render(&self) -> String {
        #[cfg(feature = "drawille")]
        {
            use drawille::Canvas;
            let mut canvas = Canvas::new(WIDTH as u32, HEIGHT as u32);
            for y in 0..HEIGHT {
                for x in 0..WIDTH {
                    if self.pixel(x, y) {
                        canvas.set(x as u32, y as u32);
                    }
                }
            }
            canvas.frame()
        }
        #[cfg(not(feature = "drawille"))]
        {
            self.to_string()
        }
    }

    /// Prints the screen to stdout
    pub fn print_screen(&self) {
        println!("{}", self.render());
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelSurface for Screen {
    fn pixel(&self, x: usize, y: usize) -> bool {
        Self::locate(x, y).map_or(false, |(byte, mask)| self.bytes[byte] & mask != 0)
    }
    fn set_pixel(&mut self, x: usize, y: usize) {
        if let Some((byte, mask)) = Self::locate(x, y) {
            self.bytes[byte] |= mask;
        }
    }
    fn clear_pixel(&mut self, x: usize, y: usize) {
        if let Some((byte, mask)) = Self::locate(x, y) {
            self.bytes[byte] &= !mask;
        }
    }
    fn clear(&mut self) {
        self.bytes.fill(0);
    }
}

/// Prints the screen at 1bpp using box characters
impl Display for Screen {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.bytes.chunks_exact(WIDTH / 8) {
            write!(f, "|")?;
            for byte in row {
                write!(
                    f,
                    "{}",
                    format!("{byte:08b}").replace('0', " ").replace('1', "█")
                )?;
            }
            writeln!(f, "|")?;
        }
        Ok(())
    }
}
