//! # Branch Instructions
//!
//! This module implements conditional branch operations:
//! - BCC, BCS: Carry clear / set
//! - BEQ, BNE: Zero set / clear
//! - BMI, BPL: Negative set / clear
//! - BVC, BVS: Overflow clear / set
//!
//! All branches use relative addressing; the resolver has already turned the
//! signed offset into the target address. A taken branch assigns PC directly,
//! an untaken one falls through to the next instruction.

use crate::cpu::Cpu;

fn branch_if(cpu: &mut Cpu, condition: bool, target: u16) {
    if condition {
        cpu.jump(target);
    }
}

/// Executes the BCC (Branch if Carry Clear) instruction.
pub(crate) fn bcc(cpu: &mut Cpu, target: u16) {
    let taken = !cpu.flags.carry();
    branch_if(cpu, taken, target);
}

/// Executes the BCS (Branch if Carry Set) instruction.
pub(crate) fn bcs(cpu: &mut Cpu, target: u16) {
    let taken = cpu.flags.carry();
    branch_if(cpu, taken, target);
}

/// Executes the BEQ (Branch if Equal) instruction.
pub(crate) fn beq(cpu: &mut Cpu, target: u16) {
    let taken = cpu.flags.zero();
    branch_if(cpu, taken, target);
}

/// Executes the BNE (Branch if Not Equal) instruction.
pub(crate) fn bne(cpu: &mut Cpu, target: u16) {
    let taken = !cpu.flags.zero();
    branch_if(cpu, taken, target);
}

/// Executes the BMI (Branch if Minus) instruction.
pub(crate) fn bmi(cpu: &mut Cpu, target: u16) {
    let taken = cpu.flags.negative();
    branch_if(cpu, taken, target);
}

/// Executes the BPL (Branch if Positive) instruction.
pub(crate) fn bpl(cpu: &mut Cpu, target: u16) {
    let taken = !cpu.flags.negative();
    branch_if(cpu, taken, target);
}

/// Executes the BVC (Branch if Overflow Clear) instruction.
pub(crate) fn bvc(cpu: &mut Cpu, target: u16) {
    let taken = !cpu.flags.overflow();
    branch_if(cpu, taken, target);
}

/// Executes the BVS (Branch if Overflow Set) instruction.
pub(crate) fn bvs(cpu: &mut Cpu, target: u16) {
    let taken = cpu.flags.overflow();
    branch_if(cpu, taken, target);
}
