//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - BRK: Force Interrupt
//! - JMP: Jump to address
//! - JSR / RTS: Subroutine call and return
//! - RTI: Return from interrupt
//!
//! BRK is a software interrupt that:
//! 1. Increments PC past the BRK opcode
//! 2. Sets the B flag, pushes PC (high byte first, then low byte) and the status byte
//! 3. Clears the B flag again, so only the pushed copy shows it
//! 4. Sets the I (interrupt disable) flag
//! 5. Loads PC from the BRK vector at $FFFE/F

use crate::cpu::Cpu;
use crate::memory::Vector;

/// Executes the BRK (Force Interrupt) instruction.
///
/// Flags affected:
/// - B: Set in the pushed status byte, clear afterwards
/// - I: Set to 1
pub(crate) fn brk(cpu: &mut Cpu) {
    cpu.memory.increment_pc(1);
    cpu.flags.set_break_command(true);

    let return_address = cpu.pc();
    cpu.push_word(return_address);
    let status = cpu.status();
    cpu.push(status);

    cpu.flags.set_break_command(false);
    if cpu.stack_overflowed {
        return;
    }
    cpu.flags.set_interrupt_disable(true);

    let target = cpu.memory.vector(Vector::Brk);
    cpu.jump(target);
}

/// Executes the JMP (Jump) instruction.
///
/// Absolute and indirect forms both arrive here with the final target already
/// resolved. No flags are affected.
pub(crate) fn jmp(cpu: &mut Cpu, target: u16) {
    cpu.jump(target);
}

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// Pushes the address of the instruction's last byte, high byte first; RTS
/// adds the missing one when it returns.
pub(crate) fn jsr(cpu: &mut Cpu, target: u16) {
    let return_address = cpu.pc();
    cpu.push_word(return_address);
    cpu.jump(target);
}

/// Executes the RTS (Return from Subroutine) instruction.
pub(crate) fn rts(cpu: &mut Cpu) {
    let return_address = cpu.pull_word();
    if cpu.stack_overflowed {
        return;
    }
    // the normal post-instruction increment steps past the JSR operand
    cpu.set_pc(return_address);
}

/// Executes the RTI (Return from Interrupt) instruction.
///
/// Pulls the status byte (B cleared), then PC, and resumes exactly at the
/// pulled address. Nothing is restored if a pull overflows.
pub(crate) fn rti(cpu: &mut Cpu) {
    let status = cpu.pull();
    let return_address = cpu.pull_word();
    if cpu.stack_overflowed {
        return;
    }

    cpu.flags.set_register(status);
    cpu.flags.set_break_command(false);
    cpu.jump(return_address);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brk_pushed_status_has_break_but_live_flag_clear() {
        let mut cpu = Cpu::new();
        cpu.flags.set_interrupt_disable(false);
        cpu.set_pc(0x0300);

        brk(&mut cpu);

        assert_eq!(cpu.memory().read(0x01FD) & 0x10, 0x10);
        assert!(!cpu.flags.break_command());
        assert!(cpu.flags.interrupt_disable());
    }

    #[test]
    fn test_jsr_rts_pairing() {
        let mut cpu = Cpu::new();
        // PC sits on the last operand byte of a JSR at 0x0400
        cpu.set_pc(0x0402);

        jsr(&mut cpu, 0x1000);
        assert_eq!(cpu.pc(), 0x1000);
        assert_eq!(cpu.sp(), 0xFD);

        rts(&mut cpu);
        assert_eq!(cpu.pc(), 0x0402);
        assert_eq!(cpu.sp(), 0xFF);
    }
}
