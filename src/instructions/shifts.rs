//! # Shift and Rotate Instructions
//!
//! This module implements bit shift and rotate operations:
//! - ASL: Arithmetic Shift Left
//! - LSR: Logical Shift Right
//! - ROL: Rotate Left
//! - ROR: Rotate Right
//!
//! Each works on the accumulator in accumulator mode and on the resolved memory
//! address otherwise. The bit shifted out lands in Carry; ROL and ROR feed the
//! previous Carry into the vacated bit.

use crate::addressing::{AddressingMode, AddressingResult};
use crate::cpu::Cpu;

/// Applies `op` to the instruction's target and writes the result back.
///
/// `op` receives the old value and the carry-in, and returns the new value and
/// the carry-out.
fn modify(
    cpu: &mut Cpu,
    mode: AddressingMode,
    operand: AddressingResult,
    op: impl FnOnce(u8, bool) -> (u8, bool),
) {
    let carry_in = cpu.flags.carry();

    let result = if mode == AddressingMode::Accumulator {
        let (result, carry_out) = op(cpu.a(), carry_in);
        cpu.set_a(result);
        cpu.flags.set_carry(carry_out);
        result
    } else {
        // Memory mode: read, shift, write back
        let (result, carry_out) = op(operand.value, carry_in);
        cpu.memory.write(operand.address, result);
        cpu.flags.set_carry(carry_out);
        result
    };

    cpu.flags.update_zero_negative(result);
}

pub(crate) fn asl(cpu: &mut Cpu, mode: AddressingMode, operand: AddressingResult) {
    modify(cpu, mode, operand, |value, _| (value << 1, value & 0x80 != 0));
}

pub(crate) fn lsr(cpu: &mut Cpu, mode: AddressingMode, operand: AddressingResult) {
    modify(cpu, mode, operand, |value, _| (value >> 1, value & 0x01 != 0));
}

pub(crate) fn rol(cpu: &mut Cpu, mode: AddressingMode, operand: AddressingResult) {
    modify(cpu, mode, operand, |value, carry| {
        ((value << 1) | carry as u8, value & 0x80 != 0)
    });
}

pub(crate) fn ror(cpu: &mut Cpu, mode: AddressingMode, operand: AddressingResult) {
    modify(cpu, mode, operand, |value, carry| {
        ((value >> 1) | ((carry as u8) << 7), value & 0x01 != 0)
    });
}
