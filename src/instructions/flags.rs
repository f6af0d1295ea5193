//! # Flag Instructions
//!
//! CLC/SEC, CLI/SEI, CLD/SED and CLV. Each one writes a single status flag
//! and nothing else.

use crate::cpu::Cpu;

pub(crate) fn clc(cpu: &mut Cpu) {
    cpu.flags.set_carry(false);
}

pub(crate) fn sec(cpu: &mut Cpu) {
    cpu.flags.set_carry(true);
}

pub(crate) fn cli(cpu: &mut Cpu) {
    cpu.flags.set_interrupt_disable(false);
}

pub(crate) fn sei(cpu: &mut Cpu) {
    cpu.flags.set_interrupt_disable(true);
}

pub(crate) fn cld(cpu: &mut Cpu) {
    cpu.flags.set_decimal(false);
}

pub(crate) fn sed(cpu: &mut Cpu) {
    cpu.flags.set_decimal(true);
}

pub(crate) fn clv(cpu: &mut Cpu) {
    cpu.flags.set_overflow(false);
}
