//! # Program Runner
//!
//! Drives the fetch-decode-execute loop on a background thread.
//!
//! The runner and every caller share one `Arc<Mutex<Cpu>>`. The loop takes the
//! lock for exactly one instruction at a time, so interrupts, single steps and
//! state reads from the caller always land on an instruction boundary. The run
//! flag in [`ExecutionControl`] is the only state read outside the lock.
//!
//! ## States
//!
//! - **Idle**: no thread, run flag clear
//! - **Running**: thread alive, run flag set
//! - **Halted**: run flag cleared by the sentinel, a stack overflow, an invalid
//!   opcode or [`ProgramRunner::terminate`]; the thread exits at the next boundary

use std::panic;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};

use log::{debug, error, warn};

use crate::control::{ExecutionControl, HaltReason};
use crate::cpu::Cpu;
use crate::memory::Vector;
use crate::ExecutionError;

/// Locks the shared CPU context.
///
/// # Panics
///
/// Panics if a previous holder panicked mid-instruction: the CPU state can no
/// longer be trusted.
pub(crate) fn lock_cpu(cpu: &Mutex<Cpu>) -> MutexGuard<'_, Cpu> {
    match cpu.lock() {
        Ok(guard) => guard,
        Err(_) => panic!("CPU state is poisoned: a thread panicked while executing"),
    }
}

/// Owner of the background execution thread.
pub struct ProgramRunner {
    cpu: Arc<Mutex<Cpu>>,
    control: Arc<ExecutionControl>,
    handle: Option<JoinHandle<()>>,
}

impl ProgramRunner {
    pub fn new(cpu: Arc<Mutex<Cpu>>) -> Self {
        let control = Arc::clone(lock_cpu(&cpu).control());
        Self {
            cpu,
            control,
            handle: None,
        }
    }

    /// Starts the loop at `start`, or at the reset vector when `None`.
    ///
    /// Returns false without touching the CPU if a run is already in progress.
    pub fn start(&mut self, start: Option<u16>) -> bool {
        if self.control.is_running() {
            warn!("run requested while a program is already running");
            return false;
        }
        // a halted thread may still be between its last instruction and exit
        self.join();

        {
            let mut cpu = lock_cpu(&self.cpu);
            if !self.control.begin() {
                return false;
            }
            let pc = start.unwrap_or_else(|| cpu.memory().vector(Vector::Reset));
            cpu.set_pc(pc);
            debug!("runner starting at 0x{:04X}", pc);
        }

        let cpu = Arc::clone(&self.cpu);
        let control = Arc::clone(&self.control);
        self.handle = Some(thread::spawn(move || run_loop(&cpu, &control)));
        true
    }

    /// Stops a running program and waits for the thread to exit.
    ///
    /// The manual-halt callback fires with the PC at the request, and only if
    /// this call is the one that ended the run.
    pub fn terminate(&mut self) {
        {
            let cpu = lock_cpu(&self.cpu);
            if self.control.request_stop(cpu.pc()) {
                warn!("manual halt at 0x{:04X}", cpu.pc());
            }
        }
        self.join();
    }

    /// Blocks until the background thread, if any, has exited.
    ///
    /// A panic on the runner thread is re-raised here.
    pub fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(payload) = handle.join() {
                error!("runner thread panicked");
                panic::resume_unwind(payload);
            }
        }
    }

    /// Returns true while a background thread has not been joined.
    pub fn has_thread(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for ProgramRunner {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Ok(cpu) = self.cpu.lock() {
                self.control.request_stop(cpu.pc());
            }
            let _ = handle.join();
        }
    }
}

fn run_loop(cpu: &Mutex<Cpu>, control: &ExecutionControl) {
    loop {
        {
            let mut cpu = lock_cpu(cpu);
            if !control.is_running() {
                break;
            }
            if let Err(err) = cpu.step() {
                error!("{}", err);
                let ExecutionError::InvalidOpcode { opcode, pc } = err;
                control.halt(HaltReason::InvalidOpcode(opcode), pc);
                break;
            }
        }
        // let callers waiting on the lock in between instructions
        thread::yield_now();
    }
    debug!("runner exited");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn looping_cpu() -> Arc<Mutex<Cpu>> {
        let mut cpu = Cpu::new();
        // JMP $0200
        cpu.memory_mut().load_bytes(0x0200, &[0x4C, 0x00, 0x02]);
        cpu.memory_mut().load_bytes(0xFFFC, &[0x00, 0x02]);
        Arc::new(Mutex::new(cpu))
    }

    #[test]
    fn test_start_uses_reset_vector() {
        let cpu = looping_cpu();
        let mut runner = ProgramRunner::new(Arc::clone(&cpu));
        assert!(!runner.has_thread());

        assert!(runner.start(None));
        assert!(runner.has_thread());
        assert_eq!(lock_cpu(&cpu).pc(), 0x0200);

        runner.terminate();
        assert!(!runner.has_thread());
        assert_eq!(
            lock_cpu(&cpu).control().halt_reason(),
            Some(HaltReason::ManualHalt)
        );
    }

    #[test]
    fn test_refused_start_leaves_pc() {
        let cpu = looping_cpu();
        let mut runner = ProgramRunner::new(Arc::clone(&cpu));
        assert!(runner.start(Some(0x0200)));

        assert!(!runner.start(Some(0x1234)));
        assert!(!runner.start(None));

        runner.terminate();
        assert_eq!(lock_cpu(&cpu).pc(), 0x0200);
    }

    #[test]
    fn test_drop_stops_thread() {
        let cpu = looping_cpu();
        let control = Arc::clone(lock_cpu(&cpu).control());
        {
            let mut runner = ProgramRunner::new(Arc::clone(&cpu));
            runner.start(Some(0x0200));
            assert!(control.is_running());
        }
        assert!(!control.is_running());
    }
}
