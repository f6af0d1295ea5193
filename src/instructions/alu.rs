//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic and logical operations:
//! - ADC: Add with Carry
//! - SBC: Subtract with Carry
//! - AND, ORA, EOR: Bitwise logic into the accumulator
//! - CMP, CPX, CPY: Register/memory comparison
//! - BIT: Bit test
//!
//! In decimal mode ADC and SBC treat both the accumulator and the operand as
//! packed BCD and leave Overflow clear.

use crate::cpu::Cpu;

/// Executes the ADC (Add with Carry) instruction.
///
/// Binary mode:
/// - Carry (C): Set if the unsigned sum exceeds 255
/// - Overflow (V): Set if both inputs share a sign the result does not
///
/// Decimal mode:
/// - Carry (C): Set if the decimal sum exceeds 99
/// - Overflow (V): Cleared
pub(crate) fn adc(cpu: &mut Cpu, value: u8) {
    cpu.flags.set_overflow(false);

    let a = cpu.a();
    let carry_in = cpu.flags.carry_as_int() as u16;

    let result = if cpu.flags.decimal() {
        let sum = from_bcd(a) as u16 + from_bcd(value) as u16 + carry_in;
        cpu.flags.set_carry(sum > 99);
        to_bcd((sum % 100) as u8)
    } else {
        let sum = a as u16 + value as u16 + carry_in;
        let result = sum as u8;
        cpu.flags.set_carry(sum > 0xFF);
        // V = (A^result) & (M^result) & 0x80
        cpu.flags
            .set_overflow((a ^ result) & (value ^ result) & 0x80 != 0);
        result
    };

    cpu.set_a(result);
    cpu.flags.update_zero_negative(result);
}

/// Executes the SBC (Subtract with Carry) instruction.
///
/// The borrow is the inverse of Carry. Carry is set afterwards when
/// `A - M - borrow` did not go below zero.
pub(crate) fn sbc(cpu: &mut Cpu, value: u8) {
    cpu.flags.set_overflow(false);

    let a = cpu.a();
    let borrow = 1 - cpu.flags.carry_as_int() as i16;

    let result = if cpu.flags.decimal() {
        let difference = from_bcd(a) as i16 - from_bcd(value) as i16 - borrow;
        cpu.flags.set_carry(difference >= 0);
        to_bcd(difference.rem_euclid(100) as u8)
    } else {
        let difference = a as i16 - value as i16 - borrow;
        let result = difference as u8;
        cpu.flags.set_carry(difference >= 0);
        // operands of unlike sign, and the result's sign differs from A
        cpu.flags
            .set_overflow((a ^ value) & (a ^ result) & 0x80 != 0);
        result
    };

    cpu.set_a(result);
    cpu.flags.update_zero_negative(result);
}

/// Executes the AND (Logical AND) instruction.
pub(crate) fn and(cpu: &mut Cpu, value: u8) {
    let result = cpu.a() & value;
    cpu.set_a(result);
    cpu.flags.update_zero_negative(result);
}

/// Executes the ORA (Logical Inclusive OR) instruction.
pub(crate) fn ora(cpu: &mut Cpu, value: u8) {
    let result = cpu.a() | value;
    cpu.set_a(result);
    cpu.flags.update_zero_negative(result);
}

/// Executes the EOR (Exclusive OR) instruction.
pub(crate) fn eor(cpu: &mut Cpu, value: u8) {
    let result = cpu.a() ^ value;
    cpu.set_a(result);
    cpu.flags.update_zero_negative(result);
}

/// Shared body of CMP, CPX and CPY.
///
/// # Flag Behavior
///
/// - Negative (N): Set if register < memory
/// - Zero (Z): Set if register = memory
/// - Carry (C): Set if register >= memory
pub(crate) fn compare(cpu: &mut Cpu, register: u8, value: u8) {
    cpu.flags.set_negative(register < value);
    cpu.flags.set_zero(register == value);
    cpu.flags.set_carry(register >= value);
}

/// Executes the BIT (Bit Test) instruction.
///
/// Z comes from `A & M`; N and V are copied from bits 7 and 6 of the operand.
/// The accumulator is unchanged.
pub(crate) fn bit(cpu: &mut Cpu, value: u8) {
    cpu.flags.set_zero(cpu.a() & value == 0);
    cpu.flags.set_negative(value & 0x80 != 0);
    cpu.flags.set_overflow(value & 0x40 != 0);
}

/// Packed BCD to binary. Nibbles above 9 are not rejected.
fn from_bcd(value: u8) -> u8 {
    (value >> 4) * 10 + (value & 0x0F)
}

/// Binary (0-99) to packed BCD.
fn to_bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}
