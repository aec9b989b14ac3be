//! Repeating and one-shot timers driven by heartbeat deltas
//!
//! Both timers accumulate the delta of every heartbeat step and fire once
//! the accumulated time reaches their threshold. The repeating timer resets
//! its accumulator to zero when it fires, dropping any excess, so it drifts
//! by up to one frame per period instead of phase-locking.

use crate::clock::TimerHandle;
use crate::heartbeat::Heartbeat;
use std::time::Duration;

/// Call `callback` every `interval` of heartbeat time.
///
/// Returns a handle that stops the timer. After cancellation no further
/// invocations happen, including one already due in the current step.
pub fn set_interval<F>(heartbeat: &Heartbeat, mut callback: F, interval: Duration) -> TimerHandle
where
    F: FnMut() + Send + 'static,
{
    let handle = TimerHandle::new();
    let guard = handle.clone();
    let mut elapsed = Duration::ZERO;

    heartbeat.attach(handle.clone(), move |delta| {
        elapsed += delta;

        if elapsed >= interval {
            elapsed = Duration::ZERO;
            if guard.is_armed() {
                callback();
            }
        }
    });

    handle
}

/// Call `callback` once after `timeout` of heartbeat time.
///
/// A zero timeout fires on the next step. Returns a handle that cancels the
/// timer if it has not fired yet.
pub fn set_timeout<F>(heartbeat: &Heartbeat, callback: F, timeout: Duration) -> TimerHandle
where
    F: FnOnce() + Send + 'static,
{
    let handle = TimerHandle::new();
    let guard = handle.clone();
    let mut callback = Some(callback);
    let mut elapsed = Duration::ZERO;

    heartbeat.attach(handle.clone(), move |delta| {
        elapsed += delta;

        if elapsed >= timeout && guard.try_fire() {
            if let Some(callback) = callback.take() {
                callback();
            }
        }
    });

    handle
}
