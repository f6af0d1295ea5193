//! # Addressing Modes
//!
//! This module defines the addressing modes supported by the 6502 processor and
//! resolves them into an [`AddressingResult`].
//!
//! Resolution consumes the operand bytes that follow the opcode: for each byte,
//! PC is incremented and then read. When resolution finishes, PC addresses the
//! last operand byte; the step adds the final one.

use crate::cpu::Cpu;

/// 6502 addressing mode enumeration.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implicit, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative, IndirectX, IndirectY
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: CLC, RTS, NOP
    Implicit,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: LSR A, ROL A, ASL A
    Accumulator,

    /// 8-bit constant operand in instruction.
    ///
    /// Example: LDA #$10
    Immediate,

    /// 8-bit address in zero page (0x00-0xFF).
    ///
    /// Example: LDA $80
    ZeroPage,

    /// Zero page address indexed by X register, wrapping within zero page.
    ZeroPageX,

    /// Zero page address indexed by Y register, wrapping within zero page.
    ZeroPageY,

    /// Signed 8-bit offset from the address following the operand.
    ///
    /// Example: BEQ label
    Relative,

    /// Full 16-bit address.
    Absolute,

    /// 16-bit address indexed by X register.
    AbsoluteX,

    /// 16-bit address indexed by Y register.
    AbsoluteY,

    /// Indirect jump through 16-bit pointer.
    ///
    /// Example: JMP ($FFFC). Only used by JMP.
    Indirect,

    /// Indexed indirect: (ZP + X) then dereference.
    ///
    /// Example: LDA ($40,X)
    IndirectX,

    /// Indirect indexed: ZP dereference then + Y.
    ///
    /// Example: LDA ($40),Y
    IndirectY,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub const fn operand_bytes(self) -> u16 {
        use AddressingMode::*;
        match self {
            Implicit | Accumulator => 0,
            Immediate | ZeroPage | ZeroPageX | ZeroPageY | Relative | IndirectX | IndirectY => 1,
            Absolute | AbsoluteX | AbsoluteY | Indirect => 2,
        }
    }
}

/// Resolved operand: the byte at the effective address and the address itself.
///
/// Arithmetic uses `value`; stores, jumps and branches use `address`.
/// Immediate operands report the operand byte's own address; relative operands
/// report the branch target with a value of zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddressingResult {
    pub value: u8,
    pub address: u16,
}

impl Cpu {
    /// Consumes the operand bytes for `mode` and computes the effective operand.
    ///
    /// ```
    /// use sim6502::{AddressingMode, Cpu};
    ///
    /// let mut cpu = Cpu::new();
    /// cpu.memory_mut().load_bytes(0x0200, &[0xAD, 0x34, 0x12]); // LDA $1234
    /// cpu.memory_mut().write(0x1234, 0x77);
    /// cpu.set_pc(0x0200);
    ///
    /// let operand = cpu.resolve(AddressingMode::Absolute);
    ///
    /// assert_eq!(operand.address, 0x1234);
    /// assert_eq!(operand.value, 0x77);
    /// assert_eq!(cpu.pc(), 0x0202);
    /// ```
    pub fn resolve(&mut self, mode: AddressingMode) -> AddressingResult {
        use AddressingMode::*;

        match mode {
            Implicit => AddressingResult::default(),
            Accumulator => AddressingResult {
                value: self.memory.a(),
                address: 0,
            },
            Immediate => {
                let value = self.next_operand_byte();
                AddressingResult {
                    value,
                    address: self.memory.pc(),
                }
            }
            ZeroPage => {
                let zp = self.next_operand_byte();
                self.operand_at(zp as u16)
            }
            ZeroPageX => {
                let zp = self.next_operand_byte().wrapping_add(self.memory.x());
                self.operand_at(zp as u16)
            }
            ZeroPageY => {
                let zp = self.next_operand_byte().wrapping_add(self.memory.y());
                self.operand_at(zp as u16)
            }
            Absolute => {
                let addr = self.next_operand_word();
                self.operand_at(addr)
            }
            AbsoluteX => {
                let addr = self.next_operand_word().wrapping_add(self.memory.x() as u16);
                self.operand_at(addr)
            }
            AbsoluteY => {
                let addr = self.next_operand_word().wrapping_add(self.memory.y() as u16);
                self.operand_at(addr)
            }
            Indirect => {
                let pointer = self.next_operand_word();
                let addr = self.memory.read_word(pointer);
                self.operand_at(addr)
            }
            IndirectX => {
                let zp = self.next_operand_byte().wrapping_add(self.memory.x());
                let addr = self.zero_page_word(zp);
                self.operand_at(addr)
            }
            IndirectY => {
                let zp = self.next_operand_byte();
                let addr = self
                    .zero_page_word(zp)
                    .wrapping_add(self.memory.y() as u16);
                self.operand_at(addr)
            }
            Relative => {
                let offset = self.next_operand_byte() as i8;
                let next_instruction = self.memory.pc().wrapping_add(1);
                AddressingResult {
                    value: 0,
                    address: next_instruction.wrapping_add_signed(offset as i16),
                }
            }
        }
    }

    fn next_operand_byte(&mut self) -> u8 {
        self.memory.increment_pc(1);
        self.memory.current_byte()
    }

    fn next_operand_word(&mut self) -> u16 {
        let low = self.next_operand_byte();
        let high = self.next_operand_byte();
        u16::from_le_bytes([low, high])
    }

    /// Reads a pointer from page zero; the high byte wraps within the page.
    fn zero_page_word(&self, zp: u8) -> u16 {
        let low = self.memory.read(zp as u16);
        let high = self.memory.read(zp.wrapping_add(1) as u16);
        u16::from_le_bytes([low, high])
    }

    fn operand_at(&self, address: u16) -> AddressingResult {
        AddressingResult {
            value: self.memory.read(address),
            address,
        }
    }
}
