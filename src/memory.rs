//! # Addressable Memory
//!
//! This module provides the flat 64 KiB memory image together with the three
//! general-purpose registers (A, X, Y) and the program counter.
//!
//! ## Design Principles
//!
//! Memory follows 6502 hardware behavior:
//! - No bus errors - every address is a `u16`, so every read/write lands in range
//! - Byte loads wrap around at 0xFFFF instead of failing
//! - Range reads never wrap: an inverted or single-address range is empty
//! - Malformed hex text is skipped token by token, never rejected as a whole

use log::debug;

/// Number of addressable bytes.
pub const MEMORY_SIZE: usize = 0x10000;

/// Fixed little-endian vector locations at the top of memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vector {
    /// Non-maskable interrupt handler address (0xFFFA/0xFFFB)
    Nmi,
    /// Start address loaded when a run begins (0xFFFC/0xFFFD)
    Reset,
    /// BRK and IRQ handler address (0xFFFE/0xFFFF)
    Brk,
}

impl Vector {
    /// Address of the vector's low byte.
    pub const fn address(self) -> u16 {
        match self {
            Vector::Nmi => 0xFFFA,
            Vector::Reset => 0xFFFC,
            Vector::Brk => 0xFFFE,
        }
    }
}

/// 64 KiB memory image plus the A/X/Y registers and program counter.
///
/// # Examples
///
/// ```
/// use sim6502::{Memory, Vector};
///
/// let mut mem = Memory::new();
/// mem.write(0xFFFC, 0x00);
/// mem.write(0xFFFD, 0x80);
///
/// assert_eq!(mem.vector(Vector::Reset), 0x8000);
/// assert_eq!(mem.pc(), 0xFFFC); // parked on the reset vector until a run starts
/// ```
#[derive(Clone)]
pub struct Memory {
    /// 64KB contiguous memory array
    data: Box<[u8; MEMORY_SIZE]>,
    a: u8,
    x: u8,
    y: u8,
    pc: u16,
}

impl Memory {
    /// Creates zero-filled memory with the registers cleared and PC parked on
    /// the reset vector location.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; MEMORY_SIZE]),
            a: 0,
            x: 0,
            y: 0,
            pc: Vector::Reset.address(),
        }
    }

    /// Reads the byte at `addr`.
    pub fn read(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    /// Writes `value` to `addr`.
    pub fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }

    /// Reads a little-endian word; the high byte address wraps at 0xFFFF.
    pub fn read_word(&self, addr: u16) -> u16 {
        u16::from_le_bytes([self.read(addr), self.read(addr.wrapping_add(1))])
    }

    /// Returns the byte the program counter points at.
    pub fn current_byte(&self) -> u8 {
        self.read(self.pc)
    }

    /// Advances the program counter by `n`, wrapping at 0xFFFF.
    pub fn increment_pc(&mut self, n: u16) {
        self.pc = self.pc.wrapping_add(n);
    }

    /// Returns the address stored in one of the fixed vectors.
    pub fn vector(&self, vector: Vector) -> u16 {
        self.read_word(vector.address())
    }

    /// Copies `bytes` into memory starting at `start`, wrapping past 0xFFFF.
    pub fn load_bytes(&mut self, start: u16, bytes: &[u8]) {
        let mut addr = start;
        for &byte in bytes {
            self.write(addr, byte);
            addr = addr.wrapping_add(1);
        }
        debug!("loaded {} bytes at 0x{:04X}", bytes.len(), start);
    }

    /// Parses whitespace-separated two-digit hex tokens and stores them from
    /// `start` onward.
    ///
    /// Tokens that are not exactly two hex digits are dropped without
    /// consuming an address. Returns the number of bytes stored.
    ///
    /// ```
    /// use sim6502::Memory;
    ///
    /// let mut mem = Memory::new();
    /// let stored = mem.load_hex_string(0x0200, "a9 01 zz 8d 0 00 02");
    ///
    /// assert_eq!(stored, 5);
    /// assert_eq!(mem.range(0x0200, 0x0204), vec![0xA9, 0x01, 0x8D, 0x00, 0x02]);
    /// ```
    pub fn load_hex_string(&mut self, start: u16, text: &str) -> usize {
        let bytes: Vec<u8> = text
            .split_whitespace()
            .filter_map(|token| match parse_hex_pair(token) {
                Some(byte) => Some(byte),
                None => {
                    debug!("dropping malformed hex token {:?}", token);
                    None
                }
            })
            .collect();
        self.load_bytes(start, &bytes);
        bytes.len()
    }

    /// Returns the bytes from `low` to `high` inclusive.
    ///
    /// The range is empty when `high <= low`.
    pub fn range(&self, low: u16, high: u16) -> Vec<u8> {
        if high <= low {
            return Vec::new();
        }
        self.data[low as usize..=high as usize].to_vec()
    }

    /// Zero-fills memory and registers and parks PC on the reset vector location.
    pub fn hard_reset(&mut self) {
        self.data.fill(0);
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.pc = Vector::Reset.address();
    }

    // ========== Registers ==========

    /// Returns the accumulator.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the program counter.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Memory")
            .field("a", &self.a)
            .field("x", &self.x)
            .field("y", &self.y)
            .field("pc", &format_args!("0x{:04X}", self.pc))
            .finish_non_exhaustive()
    }
}

fn parse_hex_pair(token: &str) -> Option<u8> {
    if token.len() != 2 || !token.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u8::from_str_radix(token, 16).ok()
}
