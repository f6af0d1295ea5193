//! Property-based tests for CPU invariants.
//!
//! These tests use proptest to check that flag packing, arithmetic and
//! addressing hold across all input combinations.

use proptest::prelude::*;
use sim6502::{AddressingMode, Cpu, StatusFlags};

fn setup_cpu() -> Cpu {
    let mut cpu = Cpu::new();
    cpu.set_pc(0x8000);
    cpu
}

proptest! {
    /// Unpacking then packing drops only bit 5.
    #[test]
    fn prop_status_register_round_trip(byte in any::<u8>()) {
        let mut flags = StatusFlags::empty();
        flags.set_register(byte);
        prop_assert_eq!(flags.register(), byte & 0xDF);
    }

    /// Binary ADC matches the 9-bit sum and the signed overflow rule.
    #[test]
    fn prop_adc_binary(a in any::<u8>(), m in any::<u8>(), carry in any::<bool>()) {
        let mut cpu = setup_cpu();
        cpu.set_a(a);
        cpu.flags_mut().set_carry(carry);
        cpu.memory_mut().load_bytes(0x8000, &[0x69, m]);

        cpu.step().unwrap();

        let sum = a as u16 + m as u16 + carry as u16;
        let signed = a as i8 as i16 + m as i8 as i16 + carry as i16;
        prop_assert_eq!(cpu.a(), sum as u8);
        prop_assert_eq!(cpu.flags().carry(), sum > 0xFF);
        prop_assert_eq!(cpu.flags().overflow(), !(-128..=127).contains(&signed));
        prop_assert_eq!(cpu.flags().zero(), sum as u8 == 0);
        prop_assert_eq!(cpu.flags().negative(), sum as u8 & 0x80 != 0);
    }

    /// SBC is ADC of the one's complement.
    #[test]
    fn prop_sbc_is_adc_of_complement(a in any::<u8>(), m in any::<u8>(), carry in any::<bool>()) {
        let mut sub = setup_cpu();
        sub.set_a(a);
        sub.flags_mut().set_carry(carry);
        sub.memory_mut().load_bytes(0x8000, &[0xE9, m]);
        sub.step().unwrap();

        let mut add = setup_cpu();
        add.set_a(a);
        add.flags_mut().set_carry(carry);
        add.memory_mut().load_bytes(0x8000, &[0x69, !m]);
        add.step().unwrap();

        prop_assert_eq!(sub.a(), add.a());
        prop_assert_eq!(sub.status(), add.status());
    }

    /// Decimal ADC of valid BCD operands produces the decimal sum mod 100.
    #[test]
    fn prop_adc_decimal(a in 0u8..100, m in 0u8..100, carry in any::<bool>()) {
        let to_bcd = |v: u8| ((v / 10) << 4) | (v % 10);

        let mut cpu = setup_cpu();
        cpu.flags_mut().set_decimal(true);
        cpu.flags_mut().set_carry(carry);
        cpu.set_a(to_bcd(a));
        cpu.memory_mut().load_bytes(0x8000, &[0x69, to_bcd(m)]);

        cpu.step().unwrap();

        let sum = a as u16 + m as u16 + carry as u16;
        prop_assert_eq!(cpu.a(), to_bcd((sum % 100) as u8));
        prop_assert_eq!(cpu.flags().carry(), sum > 99);
        prop_assert!(!cpu.flags().overflow());
    }

    /// Compare never changes the register and follows unsigned ordering.
    #[test]
    fn prop_cmp_flags(a in any::<u8>(), m in any::<u8>()) {
        let mut cpu = setup_cpu();
        cpu.set_a(a);
        cpu.memory_mut().load_bytes(0x8000, &[0xC9, m]);

        cpu.step().unwrap();

        prop_assert_eq!(cpu.a(), a);
        prop_assert_eq!(cpu.flags().carry(), a >= m);
        prop_assert_eq!(cpu.flags().zero(), a == m);
        prop_assert_eq!(cpu.flags().negative(), a < m);
    }

    /// Resolution leaves PC on the instruction's last byte.
    #[test]
    fn prop_resolve_advances_pc(
        pc in any::<u16>(),
        mode in prop::sample::select(vec![
            AddressingMode::Implicit,
            AddressingMode::Accumulator,
            AddressingMode::Immediate,
            AddressingMode::ZeroPage,
            AddressingMode::ZeroPageX,
            AddressingMode::ZeroPageY,
            AddressingMode::Absolute,
            AddressingMode::AbsoluteX,
            AddressingMode::AbsoluteY,
            AddressingMode::Indirect,
            AddressingMode::IndirectX,
            AddressingMode::IndirectY,
            AddressingMode::Relative,
        ]),
    ) {
        let mut cpu = Cpu::new();
        cpu.set_pc(pc);

        cpu.resolve(mode);

        prop_assert_eq!(cpu.pc(), pc.wrapping_add(mode.operand_bytes()));
    }

    /// Zero-page indexed addressing never leaves page zero.
    #[test]
    fn prop_zero_page_x_wraps(base in any::<u8>(), x in any::<u8>(), value in any::<u8>()) {
        let mut cpu = setup_cpu();
        let target = base.wrapping_add(x) as u16;
        cpu.memory_mut().write(0x8001, base);
        cpu.memory_mut().write(target, value);
        cpu.set_x(x);

        let operand = cpu.resolve(AddressingMode::ZeroPageX);

        prop_assert_eq!(operand.address, target);
        prop_assert_eq!(operand.value, value);
    }

    /// Taken branches land at the following instruction plus the signed offset.
    #[test]
    fn prop_branch_target(pc in 0x0200u16..0xF000, offset in any::<u8>()) {
        let mut cpu = Cpu::new();
        cpu.set_pc(pc);
        cpu.flags_mut().set_zero(true);
        cpu.memory_mut().load_bytes(pc, &[0xF0, offset]);

        cpu.step().unwrap();

        let expected = (pc as i32 + 2 + offset as i8 as i32) as u16;
        prop_assert_eq!(cpu.pc(), expected);
    }
}
