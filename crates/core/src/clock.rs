//! Clock and scheduler abstractions
//!
//! Rate-controlled wrappers never poll. They read the time from a [`Clock`]
//! and ask a [`Scheduler`] to run a callback once after a delay. Every
//! scheduled callback is paired with a [`TimerHandle`] that can cancel it.

use crate::time::Timestamp;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Source of monotonic time
pub trait Clock {
    /// Current time. Must not be wall-clock based; apparent backward jumps
    /// are tolerated by consumers.
    fn now(&self) -> Timestamp;
}

/// Callback run by a scheduler once its delay has elapsed
pub type TimerCallback = Box<dyn FnOnce() + Send + 'static>;

/// Runs callbacks once after a delay
pub trait Scheduler: Clock + Send + Sync + 'static {
    /// Schedule `callback` to run once, no earlier than `delay` from now.
    ///
    /// A zero delay defers to the scheduler's next opportunity; the
    /// callback never runs inside `after` itself.
    fn after(&self, delay: Duration, callback: TimerCallback) -> TimerHandle;
}

/// Cancellation capability for a scheduled callback.
///
/// Clones share the same timer. Once [`cancel`](Self::cancel) returns, the
/// callback is guaranteed not to start, even if the scheduler already
/// decided to fire it during the current tick.
#[derive(Clone, Debug)]
pub struct TimerHandle {
    armed: Arc<AtomicBool>,
}

impl TimerHandle {
    /// Create a handle for a newly armed timer
    pub fn new() -> Self {
        Self {
            armed: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Cancel the timer. Safe to call any number of times, before or after
    /// the timer fired.
    pub fn cancel(&self) {
        self.armed.store(false, Ordering::SeqCst);
    }

    /// Whether the timer can still fire
    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::SeqCst)
    }

    /// Disarm the timer for a one-shot fire.
    ///
    /// Returns `true` exactly once, and only if the timer had not been
    /// cancelled. Schedulers must call this right before running the
    /// callback and skip it on `false`.
    pub fn try_fire(&self) -> bool {
        self.armed
            .compare_exchange(true, false, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }
}

impl Default for TimerHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_only_once() {
        let handle = TimerHandle::new();
        assert!(handle.is_armed());
        assert!(handle.try_fire());
        assert!(!handle.try_fire());
        assert!(!handle.is_armed());
    }

    #[test]
    fn test_cancel_suppresses_fire() {
        let handle = TimerHandle::new();
        let clone = handle.clone();

        clone.cancel();
        assert!(!handle.try_fire());

        // Cancelling again is a no-op
        handle.cancel();
        clone.cancel();
        assert!(!handle.is_armed());
    }
}
