//! # CPU Context and Single Step
//!
//! This module contains the [`Cpu`] struct, the owned context that the runner
//! thread and synchronous callers take turns mutating, plus the
//! fetch-decode-execute step and interrupt entry.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Memory**: 64 KiB image plus A, X, Y and PC ([`Memory`])
//! - **Status flags**: N, V, B, D, I, Z, C ([`StatusFlags`])
//! - **Stack pointer** (SP): 8-bit offset into the stack page (0x0100-0x01FF)
//! - **Execution control**: run flag and callbacks shared with the caller
//!
//! ## Execution Model
//!
//! At fetch, PC addresses the opcode. Operand resolution moves PC onto the last
//! operand byte, and completion adds one more, unless the instruction already
//! assigned PC itself (jumps, taken branches, returns, BRK).

use std::sync::Arc;

use log::{info, trace};

use crate::control::{ExecutionControl, HaltReason};
use crate::memory::{Memory, Vector};
use crate::opcodes::{Mnemonic, OPCODE_TABLE};
use crate::stack::RESET_STACK_POINTER;
use crate::status::StatusFlags;
use crate::{instructions, ExecutionError};

/// 6502 CPU state and execution context.
///
/// # Examples
///
/// ```
/// use sim6502::Cpu;
///
/// let mut cpu = Cpu::new();
/// cpu.memory_mut().load_bytes(0x8000, &[0xA9, 0x42]); // LDA #$42
/// cpu.set_pc(0x8000);
///
/// cpu.step().unwrap();
///
/// assert_eq!(cpu.a(), 0x42);
/// assert_eq!(cpu.pc(), 0x8002);
/// ```
pub struct Cpu {
    /// Memory image, A/X/Y and the program counter
    pub(crate) memory: Memory,

    /// Processor status flags
    pub(crate) flags: StatusFlags,

    /// Stack pointer (0x0100 + sp gives full stack address)
    pub(crate) sp: u8,

    /// Set by instructions that assign PC directly
    pub(crate) skip_next_increment: bool,

    /// Set once a push or pull overflows during the current step
    pub(crate) stack_overflowed: bool,

    pub(crate) control: Arc<ExecutionControl>,
}

impl Cpu {
    /// Creates a CPU in the hard-reset state with its own execution control.
    pub fn new() -> Self {
        Self::with_control(Arc::new(ExecutionControl::new()))
    }

    /// Creates a CPU in the hard-reset state sharing `control`.
    pub fn with_control(control: Arc<ExecutionControl>) -> Self {
        Self {
            memory: Memory::new(),
            flags: StatusFlags::power_on(),
            sp: RESET_STACK_POINTER,
            skip_next_increment: false,
            stack_overflowed: false,
            control,
        }
    }

    /// Executes one instruction.
    ///
    /// The halt sentinel ends execution through the exit callback and leaves PC
    /// on the sentinel. Unmapped opcodes are reported without touching any state.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError::InvalidOpcode`] when the byte at PC has no
    /// instruction mapping.
    pub fn step(&mut self) -> Result<(), ExecutionError> {
        let pc = self.memory.pc();
        let opcode = self.memory.current_byte();

        let Some(metadata) = OPCODE_TABLE[opcode as usize] else {
            return Err(ExecutionError::InvalidOpcode { opcode, pc });
        };

        if metadata.mnemonic == Mnemonic::Ext {
            info!("program exit at 0x{:04X}", pc);
            self.control.halt(HaltReason::Exit, pc);
            return Ok(());
        }

        trace!(
            "0x{:04X}: {:02X} {} {:?}",
            pc,
            opcode,
            metadata.mnemonic,
            metadata.addressing_mode
        );

        self.skip_next_increment = false;
        self.stack_overflowed = false;

        let operand = self.resolve(metadata.addressing_mode);
        instructions::execute(self, metadata.mnemonic, metadata.addressing_mode, operand);

        if !self.skip_next_increment && !self.stack_overflowed {
            self.memory.increment_pc(1);
        }

        Ok(())
    }

    /// Services a maskable interrupt request.
    ///
    /// Returns false without entering the handler while Interrupt Disable is
    /// set, or when the pushes overflow the stack.
    pub fn irq(&mut self) -> bool {
        if self.flags.interrupt_disable() {
            return false;
        }
        self.enter_interrupt(Vector::Brk)
    }

    /// Services a non-maskable interrupt.
    ///
    /// Returns false when the pushes overflow the stack.
    pub fn nmi(&mut self) -> bool {
        self.enter_interrupt(Vector::Nmi)
    }

    /// Pushes PC and status (Break clear), masks IRQs and jumps through `vector`.
    ///
    /// On stack overflow PC and Interrupt Disable are left as they were.
    fn enter_interrupt(&mut self, vector: Vector) -> bool {
        self.stack_overflowed = false;

        let return_address = self.memory.pc();
        self.push_word(return_address);

        let status = (self.flags - StatusFlags::BREAK).register();
        self.push(status);

        if self.stack_overflowed {
            return false;
        }

        self.flags.set_interrupt_disable(true);
        let target = self.memory.vector(vector);
        self.memory.set_pc(target);
        true
    }

    /// Assigns PC and suppresses the post-instruction increment.
    ///
    /// Ignored once the current instruction has overflowed the stack, so PC
    /// stays inside the faulting instruction.
    pub(crate) fn jump(&mut self, target: u16) {
        if self.stack_overflowed {
            return;
        }
        self.memory.set_pc(target);
        self.skip_next_increment = true;
    }

    /// Zero-fills memory and registers, resets flags and the stack pointer, and
    /// parks PC on the reset vector location.
    pub fn hard_reset(&mut self) {
        self.memory.hard_reset();
        self.flags.reset();
        self.sp = RESET_STACK_POINTER;
        self.skip_next_increment = false;
        self.stack_overflowed = false;
    }

    /// Resets flags and the stack pointer and loads PC from the reset vector.
    ///
    /// Memory and A/X/Y are preserved.
    pub fn soft_reset(&mut self) {
        self.flags.reset();
        self.sp = RESET_STACK_POINTER;
        let start = self.memory.vector(Vector::Reset);
        self.memory.set_pc(start);
    }

    // ========== Accessors ==========

    pub fn control(&self) -> &Arc<ExecutionControl> {
        &self.control
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    pub fn flags(&self) -> StatusFlags {
        self.flags
    }

    pub fn flags_mut(&mut self) -> &mut StatusFlags {
        &mut self.flags
    }

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.memory.a()
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.memory.x()
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.memory.y()
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.memory.pc()
    }

    /// Returns the stack pointer value.
    ///
    /// The full stack address is 0x0100 + SP. The stack grows downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns the packed status register.
    pub fn status(&self) -> u8 {
        self.flags.register()
    }

    pub fn set_a(&mut self, value: u8) {
        self.memory.set_a(value);
    }

    pub fn set_x(&mut self, value: u8) {
        self.memory.set_x(value);
    }

    pub fn set_y(&mut self, value: u8) {
        self.memory.set_y(value);
    }

    pub fn set_pc(&mut self, value: u16) {
        self.memory.set_pc(value);
    }

    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    pub fn set_status(&mut self, value: u8) {
        self.flags.set_register(value);
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Cpu {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "PC: {:04X} A: {:02X} X: {:02X} Y: {:02X} P: {:02X} SP: {:02X}",
            self.pc(),
            self.a(),
            self.x(),
            self.y(),
            self.status(),
            self.sp
        )
    }
}
