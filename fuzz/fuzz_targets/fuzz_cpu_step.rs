//! Fuzz target for single-instruction execution.
//!
//! Builds an arbitrary register file and memory around PC, executes one
//! instruction, then optionally delivers an interrupt. Nothing may panic, and
//! unmapped opcodes must be reported without touching PC.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sim6502::{Cpu, ExecutionError, HaltReason, HALT_OPCODE, OPCODE_TABLE};

/// Arbitrary register file
#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    /// Packed status byte
    status: u8,
    pc: u16,
}

/// Memory regions the instruction is likely to touch
#[derive(Debug, Arbitrary)]
struct FuzzMemory {
    /// Bytes at PC (opcode + operands)
    instruction_bytes: [u8; 3],
    zero_page: [u8; 256],
    stack_page: [u8; 256],
    /// Region at 0x4000 for absolute addressing
    main_memory: [u8; 256],
    /// NMI, reset and BRK vectors
    vectors: [u8; 6],
}

#[derive(Debug, Arbitrary)]
enum Interrupt {
    None,
    Irq,
    Nmi,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    memory: FuzzMemory,
    interrupt: Interrupt,
}

fuzz_target!(|input: FuzzInput| {
    let mut cpu = Cpu::new();
    let memory = cpu.memory_mut();

    memory.load_bytes(0x0000, &input.memory.zero_page);
    memory.load_bytes(0x0100, &input.memory.stack_page);
    memory.load_bytes(0x4000, &input.memory.main_memory);
    memory.load_bytes(0xFFFA, &input.memory.vectors);
    memory.load_bytes(input.cpu_state.pc, &input.memory.instruction_bytes);

    cpu.set_a(input.cpu_state.a);
    cpu.set_x(input.cpu_state.x);
    cpu.set_y(input.cpu_state.y);
    cpu.set_sp(input.cpu_state.sp);
    cpu.set_status(input.cpu_state.status);
    cpu.set_pc(input.cpu_state.pc);

    let opcode = cpu.memory().current_byte();

    match cpu.step() {
        Ok(()) => {
            if opcode == HALT_OPCODE {
                assert_eq!(cpu.control().halt_reason(), Some(HaltReason::Exit));
            }
        }
        Err(ExecutionError::InvalidOpcode { opcode: reported, pc }) => {
            assert!(OPCODE_TABLE[opcode as usize].is_none());
            assert_eq!(reported, opcode);
            assert_eq!(pc, input.cpu_state.pc);
            assert_eq!(cpu.pc(), input.cpu_state.pc);
        }
    }

    // status never packs bit 5
    assert_eq!(cpu.status() & 0x20, 0);

    match input.interrupt {
        Interrupt::None => {}
        Interrupt::Irq => {
            let masked = cpu.flags().interrupt_disable();
            let pc = cpu.pc();
            if cpu.irq() {
                assert!(!masked);
                assert!(cpu.flags().interrupt_disable());
            } else {
                assert_eq!(cpu.pc(), pc);
            }
        }
        Interrupt::Nmi => {
            let pc = cpu.pc();
            if cpu.nmi() {
                assert!(cpu.flags().interrupt_disable());
            } else {
                assert_eq!(cpu.pc(), pc);
            }
        }
    }
});
