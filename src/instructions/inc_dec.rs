//! # Increment and Decrement Instructions
//!
//! INC/DEC operate on memory; INX, INY, DEX, DEY on the index registers. All
//! wrap modulo 256 and update Z and N from the result.

use crate::cpu::Cpu;

pub(crate) fn inc(cpu: &mut Cpu, address: u16) {
    let result = cpu.memory.read(address).wrapping_add(1);
    cpu.memory.write(address, result);
    cpu.flags.update_zero_negative(result);
}

pub(crate) fn dec(cpu: &mut Cpu, address: u16) {
    let result = cpu.memory.read(address).wrapping_sub(1);
    cpu.memory.write(address, result);
    cpu.flags.update_zero_negative(result);
}

pub(crate) fn inx(cpu: &mut Cpu) {
    let result = cpu.x().wrapping_add(1);
    cpu.set_x(result);
    cpu.flags.update_zero_negative(result);
}

pub(crate) fn iny(cpu: &mut Cpu) {
    let result = cpu.y().wrapping_add(1);
    cpu.set_y(result);
    cpu.flags.update_zero_negative(result);
}

pub(crate) fn dex(cpu: &mut Cpu) {
    let result = cpu.x().wrapping_sub(1);
    cpu.set_x(result);
    cpu.flags.update_zero_negative(result);
}

pub(crate) fn dey(cpu: &mut Cpu) {
    let result = cpu.y().wrapping_sub(1);
    cpu.set_y(result);
    cpu.flags.update_zero_negative(result);
}
