//! # Stack Page
//!
//! The 6502 stack lives at 0x0100-0x01FF and grows downward. The stack pointer
//! is an 8-bit offset into that page.
//!
//! Moving the pointer past either end of the page is a **stack overflow**, not a
//! wrap: the pointer is left where it was, execution halts, and the
//! stack-overflow callback receives the current PC. Instruction code can
//! therefore push and pull without bounds checks of its own.

use log::warn;

use crate::control::HaltReason;
use crate::cpu::Cpu;

/// Address of the bottom of the stack page.
pub const STACK_BASE: u16 = 0x0100;

/// Stack pointer after reset: the stack page is empty.
pub const RESET_STACK_POINTER: u8 = 0xFF;

impl Cpu {
    /// Writes `value` at the stack pointer, then moves the pointer down.
    pub fn push(&mut self, value: u8) {
        let addr = STACK_BASE | self.sp as u16;
        self.memory.write(addr, value);
        self.decrement_stack_pointer();
    }

    /// Moves the stack pointer up, then reads the byte it addresses.
    pub fn pull(&mut self) -> u8 {
        self.increment_stack_pointer();
        self.memory.read(STACK_BASE | self.sp as u16)
    }

    /// Pushes high byte then low byte.
    pub(crate) fn push_word(&mut self, value: u16) {
        let [low, high] = value.to_le_bytes();
        self.push(high);
        self.push(low);
    }

    /// Pulls low byte then high byte.
    pub(crate) fn pull_word(&mut self) -> u16 {
        let low = self.pull();
        let high = self.pull();
        u16::from_le_bytes([low, high])
    }

    pub fn increment_stack_pointer(&mut self) {
        match self.sp.checked_add(1) {
            Some(sp) => self.sp = sp,
            None => self.stack_overflow(),
        }
    }

    pub fn decrement_stack_pointer(&mut self) {
        match self.sp.checked_sub(1) {
            Some(sp) => self.sp = sp,
            None => self.stack_overflow(),
        }
    }

    fn stack_overflow(&mut self) {
        // one notification per instruction, however many pushes overflow
        if self.stack_overflowed {
            return;
        }
        self.stack_overflowed = true;

        let pc = self.memory.pc();
        warn!("stack overflow at PC 0x{:04X} (SP 0x{:02X})", pc, self.sp);
        self.control.halt(HaltReason::StackOverflow, pc);
    }
}
