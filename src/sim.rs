//! # Simulator Facade
//!
//! [`Sim6502`] wires the CPU context, execution control and background runner
//! together and exposes load, run, step, stop, interrupt and reset operations.

use std::sync::{Arc, Mutex};

use log::debug;

use crate::control::{ExecutionControl, HaltReason};
use crate::cpu::Cpu;
use crate::dump;
use crate::runner::{lock_cpu, ProgramRunner};
use crate::status::StatusFlags;
use crate::ExecutionError;

/// 6502 simulator with a cancelable background runner.
///
/// # Examples
///
/// ```
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use sim6502::{HaltReason, Sim6502};
///
/// let exits = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&exits);
///
/// let mut sim = Sim6502::new();
/// sim.on_exit(move |_pc| {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// // LDA #$05; ADC #$07; STA $10; EXT
/// sim.load_hex_string(0x0600, "a9 05 69 07 85 10 80");
/// sim.run_from(0x0600);
///
/// assert_eq!(sim.wait_for_program_end(), Some(HaltReason::Exit));
/// assert_eq!(sim.get_byte(0x0010), 12);
/// assert_eq!(exits.load(Ordering::SeqCst), 1);
/// ```
pub struct Sim6502 {
    cpu: Arc<Mutex<Cpu>>,
    control: Arc<ExecutionControl>,
    runner: ProgramRunner,
}

impl Sim6502 {
    /// Creates a simulator in the hard-reset state.
    pub fn new() -> Self {
        let control = Arc::new(ExecutionControl::new());
        let cpu = Arc::new(Mutex::new(Cpu::with_control(Arc::clone(&control))));
        let runner = ProgramRunner::new(Arc::clone(&cpu));
        Self {
            cpu,
            control,
            runner,
        }
    }

    // ========== Callbacks ==========

    /// Registers the callback fired when the halt sentinel is reached.
    pub fn on_exit<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(u16) + Send + Sync + 'static,
    {
        self.control.set_on_exit(Box::new(callback));
        self
    }

    /// Registers the callback fired on stack overflow.
    pub fn on_stack_overflow<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(u16) + Send + Sync + 'static,
    {
        self.control.set_on_stack_overflow(Box::new(callback));
        self
    }

    /// Registers the callback fired when [`Sim6502::stop`] ends a run.
    pub fn on_manual_halt<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(u16) + Send + Sync + 'static,
    {
        self.control.set_on_manual_halt(Box::new(callback));
        self
    }

    // ========== Loading and readback ==========

    pub fn load_bytes(&self, start: u16, bytes: &[u8]) {
        self.cpu().memory_mut().load_bytes(start, bytes);
    }

    /// Loads whitespace-separated hex pairs; malformed tokens are skipped.
    /// Returns the number of bytes stored.
    pub fn load_hex_string(&self, start: u16, text: &str) -> usize {
        self.cpu().memory_mut().load_hex_string(start, text)
    }

    pub fn get_byte(&self, addr: u16) -> u8 {
        self.cpu().memory().read(addr)
    }

    pub fn set_byte(&self, addr: u16, value: u8) {
        self.cpu().memory_mut().write(addr, value);
    }

    /// Bytes from `low` to `high` inclusive; empty when `high <= low`.
    pub fn get_range(&self, low: u16, high: u16) -> Vec<u8> {
        self.cpu().memory().range(low, high)
    }

    /// Hex/ASCII rendering of `low..=high` for display.
    pub fn dump(&self, low: u16, high: u16) -> String {
        dump::hex_dump(self.cpu().memory(), low, high)
    }

    // ========== Execution ==========

    /// Starts running from the address in the reset vector.
    ///
    /// Returns false if a program is already running.
    pub fn run(&mut self) -> bool {
        self.runner.start(None)
    }

    /// Starts running from `start`, ignoring the reset vector.
    pub fn run_from(&mut self, start: u16) -> bool {
        self.runner.start(Some(start))
    }

    /// Executes exactly one instruction on the calling thread.
    ///
    /// Safe while the runner is active: the step waits for an instruction
    /// boundary and runs in between two of the runner's instructions.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError::InvalidOpcode`] when the byte at PC has no
    /// instruction mapping.
    pub fn step(&self) -> Result<(), ExecutionError> {
        self.cpu().step()
    }

    /// Stops a running program and blocks until the runner has exited.
    ///
    /// Calling it again, or without a running program, does nothing.
    pub fn stop(&mut self) {
        self.runner.terminate();
    }

    /// Blocks until the running program ends, returning why it ended.
    ///
    /// Returns immediately when nothing is running.
    pub fn wait_for_program_end(&mut self) -> Option<HaltReason> {
        self.runner.join();
        self.control.halt_reason()
    }

    /// Raises a maskable interrupt; returns false if Interrupt Disable masked
    /// it or entering the handler overflowed the stack.
    pub fn irq(&self) -> bool {
        self.cpu().irq()
    }

    /// Raises a non-maskable interrupt; returns false if entering the handler
    /// overflowed the stack.
    pub fn nmi(&self) -> bool {
        self.cpu().nmi()
    }

    /// Stops any run, resets flags and the stack pointer, and reloads PC from
    /// the reset vector. Memory and A/X/Y are preserved.
    pub fn reset(&mut self) {
        self.stop();
        self.cpu().soft_reset();
        debug!("soft reset");
    }

    /// Stops any run and zero-fills memory and registers.
    pub fn hard_reset(&mut self) {
        self.stop();
        self.cpu().hard_reset();
        debug!("hard reset");
    }

    // ========== State queries ==========

    pub fn is_running(&self) -> bool {
        self.control.is_running()
    }

    /// Why the most recent run ended, if it has ended.
    pub fn halt_reason(&self) -> Option<HaltReason> {
        self.control.halt_reason()
    }

    pub fn pc(&self) -> u16 {
        self.cpu().pc()
    }

    pub fn a(&self) -> u8 {
        self.cpu().a()
    }

    pub fn x(&self) -> u8 {
        self.cpu().x()
    }

    pub fn y(&self) -> u8 {
        self.cpu().y()
    }

    pub fn sp(&self) -> u8 {
        self.cpu().sp()
    }

    pub fn flags(&self) -> StatusFlags {
        self.cpu().flags()
    }

    /// Runs `f` with exclusive access to the CPU, at an instruction boundary.
    pub fn with_cpu<R>(&self, f: impl FnOnce(&mut Cpu) -> R) -> R {
        f(&mut self.cpu())
    }

    fn cpu(&self) -> std::sync::MutexGuard<'_, Cpu> {
        lock_cpu(&self.cpu)
    }
}

impl Default for Sim6502 {
    fn default() -> Self {
        Self::new()
    }
}
