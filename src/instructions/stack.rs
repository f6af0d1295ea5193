//! # Stack Operations
//!
//! This module implements stack manipulation instructions:
//! - PHA: Push Accumulator on Stack
//! - PHP: Push Processor Status on Stack
//! - PLA: Pull Accumulator from Stack
//! - PLP: Pull Processor Status from Stack
//!
//! The 6502 stack is located at memory addresses 0x0100-0x01FF and grows downward.
//! Overflow handling lives in the CPU's push/pull, not here.

use crate::cpu::Cpu;

/// Executes the PHA (Push Accumulator) instruction. No flags affected.
pub(crate) fn pha(cpu: &mut Cpu) {
    let value = cpu.a();
    cpu.push(value);
}

/// Executes the PHP (Push Processor Status) instruction.
///
/// The packed register is pushed as is.
pub(crate) fn php(cpu: &mut Cpu) {
    let status = cpu.status();
    cpu.push(status);
}

/// Executes the PLA (Pull Accumulator) instruction. Updates Z and N.
pub(crate) fn pla(cpu: &mut Cpu) {
    let value = cpu.pull();
    cpu.set_a(value);
    cpu.flags.update_zero_negative(value);
}

/// Executes the PLP (Pull Processor Status) instruction.
///
/// Every flag is replaced by the pulled byte.
pub(crate) fn plp(cpu: &mut Cpu) {
    let status = cpu.pull();
    cpu.flags.set_register(status);
}
