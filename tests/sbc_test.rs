//! Tests for the SBC (Subtract with Carry) instruction.
//!
//! Carry acts as an inverted borrow: set means "no borrow".

use sim6502::Cpu;

fn setup_cpu() -> Cpu {
    let mut cpu = Cpu::new();
    cpu.set_pc(0x8000);
    cpu
}

fn sbc_immediate(cpu: &mut Cpu, operand: u8) {
    cpu.memory_mut().load_bytes(0x8000, &[0xE9, operand]);
    cpu.step().unwrap();
}

#[test]
fn test_sbc_no_borrow() {
    let mut cpu = setup_cpu();
    cpu.set_a(0x50);
    cpu.flags_mut().set_carry(true);

    sbc_immediate(&mut cpu, 0x20);

    assert_eq!(cpu.a(), 0x30);
    assert!(cpu.flags().carry());
    assert!(!cpu.flags().zero());
    assert!(!cpu.flags().negative());
    assert!(!cpu.flags().overflow());
    assert_eq!(cpu.pc(), 0x8002);
}

#[test]
fn test_sbc_with_borrow_in() {
    let mut cpu = setup_cpu();
    cpu.set_a(0x50);
    cpu.flags_mut().set_carry(false);

    sbc_immediate(&mut cpu, 0x20);

    assert_eq!(cpu.a(), 0x2F);
    assert!(cpu.flags().carry());
}

#[test]
fn test_sbc_borrow_out() {
    let mut cpu = setup_cpu();
    cpu.set_a(0x10);
    cpu.flags_mut().set_carry(true);

    sbc_immediate(&mut cpu, 0x20);

    assert_eq!(cpu.a(), 0xF0);
    assert!(!cpu.flags().carry());
    assert!(cpu.flags().negative());
}

#[test]
fn test_sbc_equal_values_is_zero() {
    let mut cpu = setup_cpu();
    cpu.set_a(0x42);
    cpu.flags_mut().set_carry(true);

    sbc_immediate(&mut cpu, 0x42);

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flags().zero());
    assert!(cpu.flags().carry());
}

#[test]
fn test_sbc_signed_overflow_positive_minus_negative() {
    let mut cpu = setup_cpu();
    cpu.set_a(0x7F); // 127
    cpu.flags_mut().set_carry(true);

    sbc_immediate(&mut cpu, 0xFF); // -1

    assert_eq!(cpu.a(), 0x80);
    assert!(cpu.flags().overflow());
    assert!(cpu.flags().negative());
    assert!(!cpu.flags().carry());
}

#[test]
fn test_sbc_signed_overflow_negative_minus_positive() {
    let mut cpu = setup_cpu();
    cpu.set_a(0x80); // -128
    cpu.flags_mut().set_carry(true);

    sbc_immediate(&mut cpu, 0x01);

    assert_eq!(cpu.a(), 0x7F);
    assert!(cpu.flags().overflow());
    assert!(cpu.flags().carry());
}

#[test]
fn test_sbc_decimal() {
    let mut cpu = setup_cpu();
    cpu.flags_mut().set_decimal(true);
    cpu.flags_mut().set_carry(true);
    cpu.set_a(0x42);

    sbc_immediate(&mut cpu, 0x15);

    assert_eq!(cpu.a(), 0x27);
    assert!(cpu.flags().carry());
    assert!(!cpu.flags().overflow());
}

#[test]
fn test_sbc_decimal_borrow_wraps_to_99() {
    let mut cpu = setup_cpu();
    cpu.flags_mut().set_decimal(true);
    cpu.flags_mut().set_carry(true);
    cpu.set_a(0x00);

    sbc_immediate(&mut cpu, 0x01);

    assert_eq!(cpu.a(), 0x99);
    assert!(!cpu.flags().carry());
}

#[test]
fn test_sbc_absolute_y() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load_bytes(0x8000, &[0xF9, 0x00, 0x20]);
    cpu.memory_mut().write(0x2003, 0x05);
    cpu.set_y(0x03);
    cpu.set_a(0x0A);
    cpu.flags_mut().set_carry(true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x05);
    assert_eq!(cpu.pc(), 0x8003);
}
