//! # Execution Control
//!
//! Shared state for coordinating the caller and the background runner:
//!
//! - **Run flag**: the only cross-thread signal, an [`AtomicBool`]
//! - **Halt reason**: why the last run ended
//! - **Callbacks**: notified with the program counter on normal exit, stack
//!   overflow, and manual halt
//!
//! Every transition happens at an instruction boundary, while the caller or the
//! runner holds the CPU lock, so a run ends with exactly one halt notification.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError, RwLock};

/// Notification callback receiving the current program counter.
///
/// Callbacks run on the thread that halted execution, while the CPU lock and
/// the callback registry are held. Calling back into the simulator or
/// registering another callback from inside one deadlocks.
pub type Callback = Box<dyn Fn(u16) + Send + Sync + 'static>;

/// Why execution stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HaltReason {
    /// The halt sentinel opcode was fetched.
    Exit,
    /// A push or pull would have moved the stack pointer out of the stack page.
    StackOverflow,
    /// The caller requested a stop.
    ManualHalt,
    /// A byte with no instruction mapping was fetched.
    InvalidOpcode(u8),
}

#[derive(Default)]
struct Callbacks {
    on_exit: Option<Callback>,
    on_stack_overflow: Option<Callback>,
    on_manual_halt: Option<Callback>,
}

/// Run flag, halt bookkeeping and notification callbacks.
///
/// # Examples
///
/// ```
/// use std::sync::atomic::{AtomicU16, Ordering};
/// use std::sync::Arc;
/// use sim6502::{ExecutionControl, HaltReason};
///
/// let control = ExecutionControl::new();
/// let seen = Arc::new(AtomicU16::new(0));
/// let sink = Arc::clone(&seen);
/// control.set_on_exit(Box::new(move |pc| sink.store(pc, Ordering::SeqCst)));
///
/// assert!(control.begin());
/// control.halt(HaltReason::Exit, 0x0603);
///
/// assert!(!control.is_running());
/// assert_eq!(control.halt_reason(), Some(HaltReason::Exit));
/// assert_eq!(seen.load(Ordering::SeqCst), 0x0603);
/// ```
#[derive(Default)]
pub struct ExecutionControl {
    running: AtomicBool,
    halt_reason: Mutex<Option<HaltReason>>,
    callbacks: RwLock<Callbacks>,
}

impl ExecutionControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true while a run is in progress.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Marks the start of a run.
    ///
    /// Returns false, changing nothing, when a run is already in progress.
    pub fn begin(&self) -> bool {
        let started = self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if started {
            *self.reason_slot() = None;
        }
        started
    }

    /// Ends execution for `reason` and fires the matching callback with `pc`.
    ///
    /// Exit and stack overflow always notify, whether or not a background run
    /// was in progress, so single-stepping reports them too.
    pub fn halt(&self, reason: HaltReason, pc: u16) {
        self.running.store(false, Ordering::Release);
        *self.reason_slot() = Some(reason);
        self.notify(reason, pc);
    }

    /// Requests a manual stop.
    ///
    /// Only the call that actually ends a run fires the manual-halt callback;
    /// later calls return false and stay silent.
    pub fn request_stop(&self, pc: u16) -> bool {
        if !self.running.swap(false, Ordering::AcqRel) {
            return false;
        }
        *self.reason_slot() = Some(HaltReason::ManualHalt);
        self.notify(HaltReason::ManualHalt, pc);
        true
    }

    /// Reason the most recent run ended, if it has ended.
    pub fn halt_reason(&self) -> Option<HaltReason> {
        *self.reason_slot()
    }

    pub fn set_on_exit(&self, callback: Callback) {
        self.callbacks_mut().on_exit = Some(callback);
    }

    pub fn set_on_stack_overflow(&self, callback: Callback) {
        self.callbacks_mut().on_stack_overflow = Some(callback);
    }

    pub fn set_on_manual_halt(&self, callback: Callback) {
        self.callbacks_mut().on_manual_halt = Some(callback);
    }

    fn notify(&self, reason: HaltReason, pc: u16) {
        let callbacks = self
            .callbacks
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let callback = match reason {
            HaltReason::Exit => &callbacks.on_exit,
            HaltReason::StackOverflow => &callbacks.on_stack_overflow,
            HaltReason::ManualHalt => &callbacks.on_manual_halt,
            HaltReason::InvalidOpcode(_) => return,
        };
        if let Some(callback) = callback {
            callback(pc);
        }
    }

    fn callbacks_mut(&self) -> std::sync::RwLockWriteGuard<'_, Callbacks> {
        self.callbacks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn reason_slot(&self) -> std::sync::MutexGuard<'_, Option<HaltReason>> {
        self.halt_reason
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ExecutionControl {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("ExecutionControl")
            .field("running", &self.is_running())
            .field("halt_reason", &self.halt_reason())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    fn counter() -> (Arc<AtomicUsize>, Callback) {
        let count = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&count);
        (
            count,
            Box::new(move |_| {
                sink.fetch_add(1, Ordering::SeqCst);
            }),
        )
    }

    #[test]
    fn test_begin_refuses_double_launch() {
        let control = ExecutionControl::new();
        assert!(control.begin());
        assert!(!control.begin());
        assert!(control.is_running());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let control = ExecutionControl::new();
        let (count, callback) = counter();
        control.set_on_manual_halt(callback);

        control.begin();
        assert!(control.request_stop(0x1000));
        assert!(!control.request_stop(0x1000));

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(control.halt_reason(), Some(HaltReason::ManualHalt));
    }

    #[test]
    fn test_stop_without_run_is_silent() {
        let control = ExecutionControl::new();
        let (count, callback) = counter();
        control.set_on_manual_halt(callback);

        assert!(!control.request_stop(0));
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(control.halt_reason(), None);
    }

    #[test]
    fn test_invalid_opcode_has_no_callback() {
        let control = ExecutionControl::new();
        let (exit_count, on_exit) = counter();
        control.set_on_exit(on_exit);

        control.begin();
        control.halt(HaltReason::InvalidOpcode(0x02), 0x0000);

        assert_eq!(exit_count.load(Ordering::SeqCst), 0);
        assert_eq!(control.halt_reason(), Some(HaltReason::InvalidOpcode(0x02)));
    }

    #[test]
    fn test_begin_clears_previous_reason() {
        let control = ExecutionControl::new();
        control.begin();
        control.halt(HaltReason::Exit, 0);

        control.begin();
        assert_eq!(control.halt_reason(), None);
    }
}
