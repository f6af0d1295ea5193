//! # Register Transfer Instructions
//!
//! This module implements register-to-register transfers:
//! - TAX, TAY: Accumulator to index register
//! - TXA, TYA: Index register to accumulator
//! - TSX: Stack pointer to X
//! - TXS: X to stack pointer
//!
//! Every transfer except TXS sets Z and N from the copied value.

use crate::cpu::Cpu;

pub(crate) fn tax(cpu: &mut Cpu) {
    let value = cpu.a();
    cpu.set_x(value);
    cpu.flags.update_zero_negative(value);
}

pub(crate) fn tay(cpu: &mut Cpu) {
    let value = cpu.a();
    cpu.set_y(value);
    cpu.flags.update_zero_negative(value);
}

pub(crate) fn txa(cpu: &mut Cpu) {
    let value = cpu.x();
    cpu.set_a(value);
    cpu.flags.update_zero_negative(value);
}

pub(crate) fn tya(cpu: &mut Cpu) {
    let value = cpu.y();
    cpu.set_a(value);
    cpu.flags.update_zero_negative(value);
}

pub(crate) fn tsx(cpu: &mut Cpu) {
    let value = cpu.sp();
    cpu.set_x(value);
    cpu.flags.update_zero_negative(value);
}

/// Executes the TXS (Transfer X to Stack Pointer) instruction. No flags affected.
pub(crate) fn txs(cpu: &mut Cpu) {
    let value = cpu.x();
    cpu.set_sp(value);
}
