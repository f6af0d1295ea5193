//! # Opcode Table
//!
//! Decode table mapping each opcode byte to its mnemonic and addressing mode,
//! and the reverse lookup an assembler needs to encode one.
//!
//! The table covers the 151 documented NMOS 6502 opcodes plus the halt sentinel
//! 0x80 ([`Mnemonic::Ext`]). Every other byte decodes to `None`.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use crate::addressing::AddressingMode;

/// Opcode byte that ends a program.
///
/// 0x80 is not a documented 6502 opcode; this simulator reserves it as
/// "program end".
pub const HALT_OPCODE: u8 = 0x80;

/// Instruction mnemonics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    /// Halt sentinel
    Ext,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = format!("{:?}", self);
        f.pad(&name.to_ascii_uppercase())
    }
}

/// Static information about one opcode.
///
/// # Examples
///
/// ```
/// use sim6502::{AddressingMode, Mnemonic, OPCODE_TABLE};
///
/// let lda_imm = OPCODE_TABLE[0xA9].unwrap();
/// assert_eq!(lda_imm.mnemonic, Mnemonic::Lda);
/// assert_eq!(lda_imm.addressing_mode, AddressingMode::Immediate);
/// assert_eq!(lda_imm.size_bytes(), 2);
///
/// assert!(OPCODE_TABLE[0x02].is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    pub mnemonic: Mnemonic,
    pub addressing_mode: AddressingMode,
}

impl OpcodeMetadata {
    /// Total instruction size in bytes (opcode + operands).
    pub const fn size_bytes(&self) -> u16 {
        1 + self.addressing_mode.operand_bytes()
    }
}

/// Decode table indexed by opcode byte.
pub const OPCODE_TABLE: [Option<OpcodeMetadata>; 256] = build_table();

/// Returns the opcode for a mnemonic/addressing-mode pair, if the pair exists.
///
/// ```
/// use sim6502::{encode, AddressingMode, Mnemonic};
///
/// assert_eq!(encode(Mnemonic::Jmp, AddressingMode::Indirect), Some(0x6C));
/// assert_eq!(encode(Mnemonic::Ext, AddressingMode::Implicit), Some(0x80));
/// assert_eq!(encode(Mnemonic::Sta, AddressingMode::Immediate), None);
/// ```
pub fn encode(mnemonic: Mnemonic, mode: AddressingMode) -> Option<u8> {
    static ENCODINGS: OnceLock<HashMap<(Mnemonic, AddressingMode), u8>> = OnceLock::new();

    ENCODINGS
        .get_or_init(|| {
            DEFINITIONS
                .iter()
                .map(|&(opcode, mnemonic, mode)| ((mnemonic, mode), opcode))
                .collect()
        })
        .get(&(mnemonic, mode))
        .copied()
}

const fn build_table() -> [Option<OpcodeMetadata>; 256] {
    let mut table = [None; 256];
    let mut i = 0;
    while i < DEFINITIONS.len() {
        let (opcode, mnemonic, addressing_mode) = DEFINITIONS[i];
        table[opcode as usize] = Some(OpcodeMetadata {
            mnemonic,
            addressing_mode,
        });
        i += 1;
    }
    table
}

use AddressingMode::*;
use Mnemonic::*;

#[rustfmt::skip]
const DEFINITIONS: [(u8, Mnemonic, AddressingMode); 152] = [
    (0x00, Brk, Implicit),
    (0x01, Ora, IndirectX),
    (0x05, Ora, ZeroPage),
    (0x06, Asl, ZeroPage),
    (0x08, Php, Implicit),
    (0x09, Ora, Immediate),
    (0x0A, Asl, Accumulator),
    (0x0D, Ora, Absolute),
    (0x0E, Asl, Absolute),
    (0x10, Bpl, Relative),
    (0x11, Ora, IndirectY),
    (0x15, Ora, ZeroPageX),
    (0x16, Asl, ZeroPageX),
    (0x18, Clc, Implicit),
    (0x19, Ora, AbsoluteY),
    (0x1D, Ora, AbsoluteX),
    (0x1E, Asl, AbsoluteX),
    (0x20, Jsr, Absolute),
    (0x21, And, IndirectX),
    (0x24, Bit, ZeroPage),
    (0x25, And, ZeroPage),
    (0x26, Rol, ZeroPage),
    (0x28, Plp, Implicit),
    (0x29, And, Immediate),
    (0x2A, Rol, Accumulator),
    (0x2C, Bit, Absolute),
    (0x2D, And, Absolute),
    (0x2E, Rol, Absolute),
    (0x30, Bmi, Relative),
    (0x31, And, IndirectY),
    (0x35, And, ZeroPageX),
    (0x36, Rol, ZeroPageX),
    (0x38, Sec, Implicit),
    (0x39, And, AbsoluteY),
    (0x3D, And, AbsoluteX),
    (0x3E, Rol, AbsoluteX),
    (0x40, Rti, Implicit),
    (0x41, Eor, IndirectX),
    (0x45, Eor, ZeroPage),
    (0x46, Lsr, ZeroPage),
    (0x48, Pha, Implicit),
    (0x49, Eor, Immediate),
    (0x4A, Lsr, Accumulator),
    (0x4C, Jmp, Absolute),
    (0x4D, Eor, Absolute),
    (0x4E, Lsr, Absolute),
    (0x50, Bvc, Relative),
    (0x51, Eor, IndirectY),
    (0x55, Eor, ZeroPageX),
    (0x56, Lsr, ZeroPageX),
    (0x58, Cli, Implicit),
    (0x59, Eor, AbsoluteY),
    (0x5D, Eor, AbsoluteX),
    (0x5E, Lsr, AbsoluteX),
    (0x60, Rts, Implicit),
    (0x61, Adc, IndirectX),
    (0x65, Adc, ZeroPage),
    (0x66, Ror, ZeroPage),
    (0x68, Pla, Implicit),
    (0x69, Adc, Immediate),
    (0x6A, Ror, Accumulator),
    (0x6C, Jmp, Indirect),
    (0x6D, Adc, Absolute),
    (0x6E, Ror, Absolute),
    (0x70, Bvs, Relative),
    (0x71, Adc, IndirectY),
    (0x75, Adc, ZeroPageX),
    (0x76, Ror, ZeroPageX),
    (0x78, Sei, Implicit),
    (0x79, Adc, AbsoluteY),
    (0x7D, Adc, AbsoluteX),
    (0x7E, Ror, AbsoluteX),
    (0x80, Ext, Implicit),
    (0x81, Sta, IndirectX),
    (0x84, Sty, ZeroPage),
    (0x85, Sta, ZeroPage),
    (0x86, Stx, ZeroPage),
    (0x88, Dey, Implicit),
    (0x8A, Txa, Implicit),
    (0x8C, Sty, Absolute),
    (0x8D, Sta, Absolute),
    (0x8E, Stx, Absolute),
    (0x90, Bcc, Relative),
    (0x91, Sta, IndirectY),
    (0x94, Sty, ZeroPageX),
    (0x95, Sta, ZeroPageX),
    (0x96, Stx, ZeroPageY),
    (0x98, Tya, Implicit),
    (0x99, Sta, AbsoluteY),
    (0x9A, Txs, Implicit),
    (0x9D, Sta, AbsoluteX),
    (0xA0, Ldy, Immediate),
    (0xA1, Lda, IndirectX),
    (0xA2, Ldx, Immediate),
    (0xA4, Ldy, ZeroPage),
    (0xA5, Lda, ZeroPage),
    (0xA6, Ldx, ZeroPage),
    (0xA8, Tay, Implicit),
    (0xA9, Lda, Immediate),
    (0xAA, Tax, Implicit),
    (0xAC, Ldy, Absolute),
    (0xAD, Lda, Absolute),
    (0xAE, Ldx, Absolute),
    (0xB0, Bcs, Relative),
    (0xB1, Lda, IndirectY),
    (0xB4, Ldy, ZeroPageX),
    (0xB5, Lda, ZeroPageX),
    (0xB6, Ldx, ZeroPageY),
    (0xB8, Clv, Implicit),
    (0xB9, Lda, AbsoluteY),
    (0xBA, Tsx, Implicit),
    (0xBC, Ldy, AbsoluteX),
    (0xBD, Lda, AbsoluteX),
    (0xBE, Ldx, AbsoluteY),
    (0xC0, Cpy, Immediate),
    (0xC1, Cmp, IndirectX),
    (0xC4, Cpy, ZeroPage),
    (0xC5, Cmp, ZeroPage),
    (0xC6, Dec, ZeroPage),
    (0xC8, Iny, Implicit),
    (0xC9, Cmp, Immediate),
    (0xCA, Dex, Implicit),
    (0xCC, Cpy, Absolute),
    (0xCD, Cmp, Absolute),
    (0xCE, Dec, Absolute),
    (0xD0, Bne, Relative),
    (0xD1, Cmp, IndirectY),
    (0xD5, Cmp, ZeroPageX),
    (0xD6, Dec, ZeroPageX),
    (0xD8, Cld, Implicit),
    (0xD9, Cmp, AbsoluteY),
    (0xDD, Cmp, AbsoluteX),
    (0xDE, Dec, AbsoluteX),
    (0xE0, Cpx, Immediate),
    (0xE1, Sbc, IndirectX),
    (0xE4, Cpx, ZeroPage),
    (0xE5, Sbc, ZeroPage),
    (0xE6, Inc, ZeroPage),
    (0xE8, Inx, Implicit),
    (0xE9, Sbc, Immediate),
    (0xEA, Nop, Implicit),
    (0xEC, Cpx, Absolute),
    (0xED, Sbc, Absolute),
    (0xEE, Inc, Absolute),
    (0xF0, Beq, Relative),
    (0xF1, Sbc, IndirectY),
    (0xF5, Sbc, ZeroPageX),
    (0xF6, Inc, ZeroPageX),
    (0xF8, Sed, Implicit),
    (0xF9, Sbc, AbsoluteY),
    (0xFD, Sbc, AbsoluteX),
    (0xFE, Inc, AbsoluteX),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_opcode_count() {
        let defined = OPCODE_TABLE.iter().filter(|m| m.is_some()).count();
        assert_eq!(defined, 152); // 151 documented + halt sentinel
    }

    #[test]
    fn test_halt_sentinel_decodes_to_ext() {
        let metadata = OPCODE_TABLE[HALT_OPCODE as usize].unwrap();
        assert_eq!(metadata.mnemonic, Mnemonic::Ext);
        assert_eq!(metadata.size_bytes(), 1);
    }

    #[test]
    fn test_encode_inverts_decode() {
        for (opcode, metadata) in OPCODE_TABLE.iter().enumerate() {
            if let Some(m) = metadata {
                assert_eq!(encode(m.mnemonic, m.addressing_mode), Some(opcode as u8));
            }
        }
    }

    #[test]
    fn test_mnemonic_display_is_uppercase() {
        assert_eq!(Mnemonic::Lda.to_string(), "LDA");
        assert_eq!(format!("{:<4}|", Mnemonic::Rts), "RTS |");
    }
}
