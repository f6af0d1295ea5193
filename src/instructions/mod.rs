//! # 6502 Instruction Implementations
//!
//! This module contains the implementations of all 6502 instructions, organized by category.
//! Each instruction is a standalone function that takes a mutable reference to the CPU and
//! the operand already resolved by the addressing stage (or nothing, for implied forms).
//!
//! ## Categories
//!
//! - **alu**: Arithmetic and logic operations (ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT)
//! - **branches**: Conditional branch instructions (BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS)
//! - **shifts**: Shift and rotate operations (ASL, LSR, ROL, ROR)
//! - **load_store**: Load and store instructions (LDA, LDX, LDY, STA, STX, STY)
//! - **inc_dec**: Increment and decrement operations (INC, DEC, INX, INY, DEX, DEY)
//! - **control**: Control flow instructions (JMP, JSR, RTS, RTI, BRK, NOP)
//! - **stack**: Stack operations (PHA, PHP, PLA, PLP)
//! - **flags**: Status flag manipulation (CLC, SEC, CLI, SEI, CLD, SED, CLV)
//! - **transfer**: Register transfer operations (TAX, TAY, TXA, TYA, TSX, TXS)

mod alu;
mod branches;
mod control;
mod flags;
mod inc_dec;
mod load_store;
mod shifts;
mod stack;
mod transfer;

use crate::addressing::{AddressingMode, AddressingResult};
use crate::cpu::Cpu;
use crate::opcodes::Mnemonic;

/// Runs one decoded instruction against its resolved operand.
pub(crate) fn execute(
    cpu: &mut Cpu,
    mnemonic: Mnemonic,
    mode: AddressingMode,
    operand: AddressingResult,
) {
    use Mnemonic::*;

    match mnemonic {
        Adc => alu::adc(cpu, operand.value),
        Sbc => alu::sbc(cpu, operand.value),
        And => alu::and(cpu, operand.value),
        Ora => alu::ora(cpu, operand.value),
        Eor => alu::eor(cpu, operand.value),
        Cmp => {
            let register = cpu.a();
            alu::compare(cpu, register, operand.value)
        }
        Cpx => {
            let register = cpu.x();
            alu::compare(cpu, register, operand.value)
        }
        Cpy => {
            let register = cpu.y();
            alu::compare(cpu, register, operand.value)
        }
        Bit => alu::bit(cpu, operand.value),

        Bcc => branches::bcc(cpu, operand.address),
        Bcs => branches::bcs(cpu, operand.address),
        Beq => branches::beq(cpu, operand.address),
        Bne => branches::bne(cpu, operand.address),
        Bmi => branches::bmi(cpu, operand.address),
        Bpl => branches::bpl(cpu, operand.address),
        Bvc => branches::bvc(cpu, operand.address),
        Bvs => branches::bvs(cpu, operand.address),

        Asl => shifts::asl(cpu, mode, operand),
        Lsr => shifts::lsr(cpu, mode, operand),
        Rol => shifts::rol(cpu, mode, operand),
        Ror => shifts::ror(cpu, mode, operand),

        Lda => load_store::lda(cpu, operand.value),
        Ldx => load_store::ldx(cpu, operand.value),
        Ldy => load_store::ldy(cpu, operand.value),
        Sta => load_store::sta(cpu, operand.address),
        Stx => load_store::stx(cpu, operand.address),
        Sty => load_store::sty(cpu, operand.address),

        Inc => inc_dec::inc(cpu, operand.address),
        Dec => inc_dec::dec(cpu, operand.address),
        Inx => inc_dec::inx(cpu),
        Iny => inc_dec::iny(cpu),
        Dex => inc_dec::dex(cpu),
        Dey => inc_dec::dey(cpu),

        Jmp => control::jmp(cpu, operand.address),
        Jsr => control::jsr(cpu, operand.address),
        Rts => control::rts(cpu),
        Rti => control::rti(cpu),
        Brk => control::brk(cpu),
        Nop => {}
        // the step loop halts on the sentinel before dispatch
        Ext => {}

        Pha => stack::pha(cpu),
        Php => stack::php(cpu),
        Pla => stack::pla(cpu),
        Plp => stack::plp(cpu),

        Clc => flags::clc(cpu),
        Sec => flags::sec(cpu),
        Cli => flags::cli(cpu),
        Sei => flags::sei(cpu),
        Cld => flags::cld(cpu),
        Sed => flags::sed(cpu),
        Clv => flags::clv(cpu),

        Tax => transfer::tax(cpu),
        Tay => transfer::tay(cpu),
        Txa => transfer::txa(cpu),
        Tya => transfer::tya(cpu),
        Tsx => transfer::tsx(cpu),
        Txs => transfer::txs(cpu),
    }
}
