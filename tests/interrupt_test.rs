//! Tests for IRQ and NMI delivery, both synchronously on a [`Cpu`] and into a
//! program running on the background runner.

use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::Arc;

use sim6502::{Cpu, HaltReason, Sim6502};

fn setup_cpu() -> Cpu {
    let mut cpu = Cpu::new();
    cpu.set_pc(0x8000);
    cpu.memory_mut().load_bytes(0xFFFA, &[0x00, 0xA0]); // NMI -> 0xA000
    cpu.memory_mut().load_bytes(0xFFFE, &[0x00, 0x90]); // IRQ/BRK -> 0x9000
    cpu
}

// ========== Synchronous delivery ==========

#[test]
fn test_irq_pushes_pc_and_status_without_break() {
    let mut cpu = setup_cpu();
    cpu.set_status(0xC1); // N V C, I clear
    cpu.set_pc(0x1234);

    assert!(cpu.irq());

    assert_eq!(cpu.pc(), 0x9000);
    assert_eq!(cpu.sp(), 0xFC);
    assert_eq!(cpu.memory().read(0x01FF), 0x12);
    assert_eq!(cpu.memory().read(0x01FE), 0x34);
    assert_eq!(cpu.memory().read(0x01FD), 0xC1);
    assert!(cpu.flags().interrupt_disable());
}

#[test]
fn test_irq_masked_is_noop() {
    let mut cpu = setup_cpu();
    cpu.flags_mut().set_interrupt_disable(true);

    assert!(!cpu.irq());

    assert_eq!(cpu.pc(), 0x8000);
    assert_eq!(cpu.sp(), 0xFF);
    assert_eq!(cpu.memory().read(0x01FF), 0x00);
}

#[test]
fn test_nmi_ignores_interrupt_disable() {
    let mut cpu = setup_cpu();
    cpu.flags_mut().set_interrupt_disable(true);

    assert!(cpu.nmi());

    assert_eq!(cpu.pc(), 0xA000);
    assert_eq!(cpu.sp(), 0xFC);
    assert_eq!(cpu.memory().read(0x01FD) & 0x10, 0);
}

#[test]
fn test_irq_handler_returns_with_rti() {
    let mut cpu = setup_cpu();
    cpu.flags_mut().set_interrupt_disable(false);
    cpu.memory_mut().load_bytes(0x8000, &[0xE8, 0xE8]); // INX; INX
    cpu.memory_mut().load_bytes(0x9000, &[0xC8, 0x40]); // INY; RTI

    cpu.step().unwrap();
    assert!(cpu.irq());
    cpu.step().unwrap(); // INY
    cpu.step().unwrap(); // RTI

    assert_eq!(cpu.pc(), 0x8001);
    assert!(!cpu.flags().interrupt_disable());
    cpu.step().unwrap();

    assert_eq!((cpu.x(), cpu.y()), (2, 1));
    assert_eq!(cpu.sp(), 0xFF);
}

// ========== Delivery into a running program ==========

/// Memory full of NOPs, a JMP-to-self at the reset target and the halt
/// sentinel at both interrupt targets.
fn setup_running_sim() -> Sim6502 {
    let sim = Sim6502::new();
    sim.load_bytes(0x0000, &vec![0xEA; 0xFFFA]);
    sim.load_hex_string(0x0200, "4c 00 02");
    sim.load_bytes(0xFFFA, &[0x00, 0x40, 0x00, 0x02, 0x00, 0x30]);
    sim.set_byte(0x3000, 0x80);
    sim.set_byte(0x4000, 0x80);
    sim.with_cpu(|cpu| cpu.flags_mut().set_interrupt_disable(false));
    sim
}

#[test]
fn test_irq_halts_running_program_at_brk_vector() {
    let exit_pc = Arc::new(AtomicU16::new(0));
    let mut sim = setup_running_sim();
    {
        let exit_pc = Arc::clone(&exit_pc);
        sim.on_exit(move |pc| exit_pc.store(pc, Ordering::SeqCst));
    }

    assert!(sim.run());
    assert!(sim.irq());

    assert_eq!(sim.wait_for_program_end(), Some(HaltReason::Exit));
    assert_eq!(sim.pc(), 0x3000);
    assert_eq!(exit_pc.load(Ordering::SeqCst), 0x3000);
    // return address is the JMP the runner was looping on
    assert_eq!(sim.get_range(0x01FE, 0x01FF), vec![0x00, 0x02]);
}

#[test]
fn test_nmi_halts_running_program_at_nmi_vector() {
    let mut sim = setup_running_sim();
    sim.with_cpu(|cpu| cpu.flags_mut().set_interrupt_disable(true));

    sim.run();
    assert!(!sim.irq());
    assert!(sim.nmi());

    assert_eq!(sim.wait_for_program_end(), Some(HaltReason::Exit));
    assert_eq!(sim.pc(), 0x4000);
}

#[test]
fn test_masked_irq_leaves_program_running() {
    let mut sim = setup_running_sim();
    sim.with_cpu(|cpu| cpu.flags_mut().set_interrupt_disable(true));

    sim.run();
    assert!(!sim.irq());
    assert!(sim.is_running());

    sim.stop();
    assert_eq!(sim.pc(), 0x0200);
    assert_eq!(sim.sp(), 0xFF);
}
