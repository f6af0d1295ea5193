//! # Loads and Stores
//!
//! LDA/LDX/LDY copy the resolved operand value into a register and set Z and N
//! from it. STA/STX/STY write a register to the resolved address and leave the
//! flags alone.

use crate::cpu::Cpu;

pub(crate) fn lda(cpu: &mut Cpu, value: u8) {
    cpu.set_a(value);
    cpu.flags.update_zero_negative(value);
}

pub(crate) fn ldx(cpu: &mut Cpu, value: u8) {
    cpu.set_x(value);
    cpu.flags.update_zero_negative(value);
}

pub(crate) fn ldy(cpu: &mut Cpu, value: u8) {
    cpu.set_y(value);
    cpu.flags.update_zero_negative(value);
}

pub(crate) fn sta(cpu: &mut Cpu, address: u16) {
    let value = cpu.a();
    cpu.memory.write(address, value);
}

/// Executes the STX (Store X Register) instruction.
pub(crate) fn stx(cpu: &mut Cpu, address: u16) {
    let value = cpu.x();
    cpu.memory.write(address, value);
}

/// Executes the STY (Store Y Register) instruction.
pub(crate) fn sty(cpu: &mut Cpu, address: u16) {
    let value = cpu.y();
    cpu.memory.write(address, value);
}
