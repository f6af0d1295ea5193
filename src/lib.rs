//! # 6502 Instruction-Level Simulator
//!
//! Runs arbitrary MOS 6502 machine code and exposes the resulting memory, register
//! and flag state. Execution happens one whole instruction at a time (no bus timing
//! is modelled), either synchronously through [`Sim6502::step`] or on a cancelable
//! background thread started with [`Sim6502::run`].
//!
//! ## Quick Start
//!
//! ```rust
//! use sim6502::Sim6502;
//!
//! let mut sim = Sim6502::new();
//!
//! // NOP NOP NOP, then the halt sentinel
//! sim.load_bytes(0x0000, &[0xEA, 0xEA, 0xEA, 0x80]);
//! sim.set_byte(0xFFFC, 0x00);
//! sim.set_byte(0xFFFD, 0x00);
//!
//! sim.run();
//! sim.wait_for_program_end();
//!
//! assert_eq!(sim.pc(), 0x0003);
//! ```
//!
//! ## Architecture
//!
//! Data flows strictly downward:
//!
//! - [`Sim6502`] owns the shared [`Cpu`] context and the [`ProgramRunner`] thread handle
//! - [`ProgramRunner`] drives the fetch-decode-execute loop one instruction per lock
//! - [`Cpu`] resolves operands ([`AddressingMode`]) and dispatches into the instruction set
//! - instructions mutate [`Memory`], [`StatusFlags`] and the stack page under the
//!   coordination of [`ExecutionControl`]
//!
//! ## Modules
//!
//! - `memory` - 64 KiB memory image, A/X/Y registers and the program counter
//! - `status` - packed processor status flags
//! - `stack` - stack page push/pull with overflow detection
//! - `addressing` - addressing modes and operand resolution
//! - `opcodes` - opcode decode table and the mnemonic/mode encode lookup
//! - `control` - run flag, halt reasons and notification callbacks
//! - `cpu` - CPU context, single step and interrupt entry
//! - `runner` - background execution loop
//! - `sim` - the [`Sim6502`] facade
//! - `dump` - hex/ASCII rendering of memory for display

pub mod addressing;
pub mod control;
pub mod cpu;
pub mod dump;
pub mod memory;
pub mod opcodes;
pub mod runner;
pub mod sim;
pub mod stack;
pub mod status;

// Internal instruction implementations (not part of public API)
mod instructions;

// Re-export public API
pub use addressing::{AddressingMode, AddressingResult};
pub use control::{Callback, ExecutionControl, HaltReason};
pub use cpu::Cpu;
pub use memory::{Memory, Vector, MEMORY_SIZE};
pub use opcodes::{encode, Mnemonic, OpcodeMetadata, HALT_OPCODE, OPCODE_TABLE};
pub use runner::ProgramRunner;
pub use sim::Sim6502;
pub use stack::{RESET_STACK_POINTER, STACK_BASE};
pub use status::StatusFlags;

/// Errors that can occur while executing a single instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionError {
    /// The fetched byte has no instruction mapping.
    ///
    /// The halt sentinel is not an error; every other unmapped byte is.
    #[error("invalid opcode 0x{opcode:02X} at 0x{pc:04X}")]
    InvalidOpcode {
        /// Byte found at the program counter
        opcode: u8,
        /// Address it was fetched from
        pc: u16,
    },
}
