// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The Mem represents the interpreter's 4 KiB of memory
//!
//! Contains some handy utils for reading and writing

use crate::error::{Error, Result};
use std::{
    fmt::{Display, Formatter},
    ops::Range,
};

/// Size of the address space, in bytes
pub const MEM_SIZE: usize = 0x1000;

/// Address at which programs are loaded, and execution begins
pub const PROGRAM_START: u16 = 0x200;

/// Number of bytes in each glyph of the [FONT]
pub const GLYPH_SIZE: u16 = 5;

/// The hexadecimal font, loaded at address 0
#[rustfmt::skip]
pub const FONT: [u8; 80] = [
    0xf0, 0x90, 0x90, 0x90, 0xf0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xf0, 0x10, 0xf0, 0x80, 0xf0, // 2
    0xf0, 0x10, 0xf0, 0x10, 0xf0, // 3
    0x90, 0x90, 0xf0, 0x10, 0x10, // 4
    0xf0, 0x80, 0xf0, 0x10, 0xf0, // 5
    0xf0, 0x80, 0xf0, 0x90, 0xf0, // 6
    0xf0, 0x10, 0x20, 0x40, 0x40, // 7
    0xf0, 0x90, 0xf0, 0x90, 0xf0, // 8
    0xf0, 0x90, 0xf0, 0x10, 0xf0, // 9
    0xf0, 0x90, 0xf0, 0x90, 0x90, // A
    0xe0, 0x90, 0xe0, 0x90, 0xe0, // B
    0xf0, 0x80, 0x80, 0x80, 0xf0, // C
    0xe0, 0x90, 0x90, 0x90, 0xe0, // D
    0xf0, 0x80, 0xf0, 0x80, 0xf0, // E
    0xf0, 0x80, 0xf0, 0x80, 0x80, // F
];

/// Represents a named region in memory
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Region {
    /// Character ROM (but writable!)
    Charset,
    /// Program memory
    Program,
}

impl Region {
    /// Gets the range of addresses covered by this [Region]
    /// # Examples
    /// ```rust
    /// # use chimp::*;
    /// assert_eq!(0x000..0x050, Charset.range());
    /// assert_eq!(0x200..0x1000, Program.range());
    /// ```
    pub fn range(&self) -> Range<usize> {
        match self {
            Region::Charset => 0..FONT.len(),
            Region::Program => PROGRAM_START as usize..MEM_SIZE,
        }
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Region::Charset => "Charset",
                Region::Program => "Program",
            }
        )
    }
}

/// Flat, byte-addressable memory. Words are big-endian.
///
/// Addresses are truncated to the 12-bit address space, so every access is in range.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mem {
    memory: Vec<u8>,
}

impl Mem {
    /// Constructs a new [Mem], with the [FONT] loaded into the [Region::Charset]
    /// # Examples
    /// ```rust
    /// # use chimp::*;
    /// let mem = Mem::new();
    /// assert_eq!(0x1000, mem.len());
    /// assert_eq!(0xf0, mem.read(0x000u16));
    /// ```
    pub fn new() -> Self {
        let mut mem = Mem {
            memory: vec![0; MEM_SIZE],
        };
        mem.memory[Region::Charset.range()].copy_from_slice(&FONT);
        mem
    }

    /// Gets the length of the backing memory
    pub fn len(&self) -> usize {
        self.memory.len()
    }

    /// Because clippy is so kind:
    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }

    #[inline(always)]
    fn index(addr: impl Into<usize>) -> usize {
        addr.into() % MEM_SIZE
    }

    /// Reads the byte at `addr`
    #[inline(always)]
    pub fn read(&self, addr: impl Into<usize>) -> u8 {
        self.memory[Self::index(addr)]
    }

    /// Reads the big-endian word at `addr`
    /// # Examples
    /// ```rust
    /// # use chimp::*;
    /// let mut mem = Mem::new();
    /// mem.write(0x300u16, 0x12);
    /// mem.write(0x301u16, 0x34);
    /// assert_eq!(0x1234, mem.read_word(0x300u16));
    /// ```
    #[inline(always)]
    pub fn read_word(&self, addr: impl Into<usize>) -> u16 {
        let addr = addr.into();
        u16::from_be_bytes([self.read(addr), self.read(addr + 1)])
    }

    /// Writes `data` to `addr`
    #[inline(always)]
    pub fn write(&mut self, addr: impl Into<usize>, data: u8) {
        self.memory[Self::index(addr)] = data;
    }

    /// Writes `data` to `addr` as a big-endian word, high byte first
    /// # Examples
    /// ```rust
    /// # use chimp::*;
    /// let mut mem = Mem::new();
    /// mem.write_word(0x200u16, 0x00e0);
    /// assert_eq!(0x00, mem.read(0x200u16));
    /// assert_eq!(0xe0, mem.read(0x201u16));
    /// ```
    #[inline(always)]
    pub fn write_word(&mut self, addr: impl Into<usize>, data: u16) {
        let addr = addr.into();
        let [high, low] = data.to_be_bytes();
        self.write(addr, high);
        self.write(addr + 1, low);
    }

    /// Loads data into the start of a named [Region]
    ///
    /// Returns [Error::ProgramTooLarge] if the data does not fit.
    /// # Examples
    /// ```rust
    /// # use chimp::*;
    /// # fn main() -> Result<()> {
    /// let mut mem = Mem::new();
    /// mem.load_region(Program, b"Hello, world!")?;
    /// assert_eq!(b"Hello, world!", &mem.get_region(Program)[..13]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn load_region(&mut self, name: Region, data: &[u8]) -> Result<&mut Self> {
        let region = self.get_region_mut(name);
        if data.len() > region.len() {
            return Err(Error::ProgramTooLarge {
                len: data.len(),
                max: region.len(),
            });
        }
        region[..data.len()].copy_from_slice(data);
        Ok(self)
    }

    /// Fills a [Region] with zeroes
    pub fn clear_region(&mut self, name: Region) -> &mut Self {
        self.get_region_mut(name).fill(0);
        self
    }

    /// Gets a slice of a named [Region] of memory
    #[inline(always)]
    pub fn get_region(&self, name: Region) -> &[u8] {
        &self.memory[name.range()]
    }

    /// Gets a mutable slice of a named [Region] of memory
    #[inline(always)]
    pub fn get_region_mut(&mut self, name: Region) -> &mut [u8] {
        &mut self.memory[name.range()]
    }
}

impl Default for Mem {
    fn default() -> Self {
        Self::new()
    }
}
