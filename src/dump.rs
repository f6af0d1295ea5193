//! Hex/ASCII rendering of memory for display.
//!
//! Output is for humans only; nothing in the simulator parses it back.

use std::fmt::Write;

use crate::memory::Memory;

const BYTES_PER_LINE: usize = 16;

/// Renders `low..=high` as lines of `AAAA: hh hh .. |ascii|`.
///
/// Rows are 16 bytes wide; the final row is padded so the ASCII column lines
/// up. Bytes outside 0x20-0x7E print as `.` in the ASCII column.
///
/// ```
/// use sim6502::{dump, Memory};
///
/// let mut mem = Memory::new();
/// mem.load_bytes(0x0200, b"Hi!");
///
/// let text = dump::hex_dump(&mem, 0x0200, 0x0203);
/// assert!(text.starts_with("0200: 48 69 21 00"));
/// assert!(text.trim_end().ends_with("|Hi!.|"));
/// ```
pub fn hex_dump(memory: &Memory, low: u16, high: u16) -> String {
    let bytes = memory.range(low, high);
    let mut out = String::new();

    for (row, chunk) in bytes.chunks(BYTES_PER_LINE).enumerate() {
        let addr = low.wrapping_add((row * BYTES_PER_LINE) as u16);
        let _ = write!(out, "{:04X}:", addr);

        for byte in chunk {
            let _ = write!(out, " {:02X}", byte);
        }
        for _ in chunk.len()..BYTES_PER_LINE {
            out.push_str("   ");
        }

        out.push_str("  |");
        out.extend(chunk.iter().map(|&b| printable(b)));
        out.push_str("|\n");
    }

    out
}

fn printable(byte: u8) -> char {
    if (0x20..=0x7E).contains(&byte) {
        byte as char
    } else {
        '.'
    }
}
