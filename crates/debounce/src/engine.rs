//! Debounce engine
//!
//! One state machine covers debounce, throttle, leading/trailing edges and
//! the `max_wait` ceiling. Every call records its arguments and time, then
//! either invokes the callback right away, arms a timer for a future
//! trailing-edge check, or relies on the timer that is already armed.
//!
//! Timer closures hold a weak reference to the engine plus the generation
//! of the timer they were armed for. A fire whose generation no longer
//! matches the armed timer (it was cancelled, flushed or replaced) does
//! nothing, so at most one timer is ever live per engine.

use crate::options::DebounceOptions;
use cadence_core::{Scheduler, TimerHandle, Timestamp};
use parking_lot::{Mutex, MutexGuard};
use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tracing::{debug, trace, warn};

type Callback<A, R> = Box<dyn FnMut(A) -> R + Send + 'static>;

/// The single live timer of an engine
struct ArmedTimer {
    handle: TimerHandle,
    generation: u64,
}

/// Mutable timing state of one debounced wrapper
struct DebounceState<A, R> {
    /// Most recent wrapper call; `None` means never called
    last_call: Option<Timestamp>,
    /// Most recent callback execution
    last_invoke: Timestamp,
    /// Arguments owed to a trailing invocation
    pending_args: Option<A>,
    /// Memoized return of the last callback execution
    last_result: Option<R>,
    timer: Option<ArmedTimer>,
    generation: u64,
}

impl<A, R> DebounceState<A, R> {
    fn new() -> Self {
        Self {
            last_call: None,
            last_invoke: Timestamp::ZERO,
            pending_args: None,
            last_result: None,
            timer: None,
            generation: 0,
        }
    }

    fn should_invoke(&self, now: Timestamp, wait: Duration, max_wait: Option<Duration>) -> bool {
        let Some(last_call) = self.last_call else {
            return true;
        };

        // A clock that moved backward counts as the trailing edge
        let Some(since_call) = now.checked_duration_since(last_call) else {
            return true;
        };

        since_call >= wait
            || max_wait.is_some_and(|max| now.saturating_duration_since(self.last_invoke) >= max)
    }

    fn remaining_wait(
        &self,
        now: Timestamp,
        wait: Duration,
        max_wait: Option<Duration>,
    ) -> Duration {
        let since_call = self
            .last_call
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or_default();
        let waiting = wait.saturating_sub(since_call);

        match max_wait {
            Some(max) => {
                let since_invoke = now.saturating_duration_since(self.last_invoke);
                waiting.min(max.saturating_sub(since_invoke))
            }
            None => waiting,
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.timer
            .as_ref()
            .is_some_and(|timer| timer.generation == generation)
    }

    fn disarm(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.handle.cancel();
        }
    }
}

struct Shared<A, R> {
    wait: Duration,
    options: DebounceOptions,
    scheduler: Arc<dyn Scheduler>,
    callback: Mutex<Callback<A, R>>,
    state: Mutex<DebounceState<A, R>>,
    this: Weak<Shared<A, R>>,
}

type StateGuard<'a, A, R> = MutexGuard<'a, DebounceState<A, R>>;

impl<A, R> Shared<A, R>
where
    A: Send + 'static,
    R: Clone + Send + 'static,
{
    fn call(&self, args: A) -> Option<R> {
        let now = self.scheduler.now();
        let mut state = self.state.lock();
        let is_invoking = state.should_invoke(now, self.wait, self.options.max_wait);

        state.pending_args = Some(args);
        state.last_call = Some(now);

        if is_invoking {
            if state.timer.is_none() {
                return self.leading_edge(state, now);
            }
            if self.options.max_wait.is_some() {
                // Calls arriving in a tight loop: the ceiling was hit while
                // the timer is still armed
                trace!(now = %now, "max wait reached, invoking");
                self.arm(&mut state, self.wait);
                return self.invoke(state, now);
            }
        }

        if state.timer.is_none() {
            self.arm(&mut state, self.wait);
        }
        state.last_result.clone()
    }

    fn leading_edge(&self, mut state: StateGuard<'_, A, R>, now: Timestamp) -> Option<R> {
        // Restart the ceiling window
        state.last_invoke = now;
        self.arm(&mut state, self.wait);

        if self.options.leading {
            trace!(now = %now, "leading edge");
            self.invoke(state, now)
        } else {
            state.last_result.clone()
        }
    }

    fn timer_expired(&self, generation: u64) {
        let now = self.scheduler.now();
        let mut state = self.state.lock();

        if !state.is_current(generation) {
            trace!(generation, "stale timer fire ignored");
            return;
        }

        if state.should_invoke(now, self.wait, self.options.max_wait) {
            self.trailing_edge(state, now);
        } else {
            let remaining = state.remaining_wait(now, self.wait, self.options.max_wait);
            self.arm(&mut state, remaining);
        }
    }

    fn trailing_edge(&self, mut state: StateGuard<'_, A, R>, now: Timestamp) -> Option<R> {
        state.disarm();

        // Only invoke if the wrapper was called since the last invocation
        if self.options.trailing && state.pending_args.is_some() {
            trace!(now = %now, "trailing edge");
            return self.invoke(state, now);
        }
        state.pending_args = None;
        state.last_result.clone()
    }

    /// Run the callback with the pending arguments.
    ///
    /// The state lock is released while the callback runs; a panic leaves
    /// the timer exactly as it was armed or disarmed beforehand.
    fn invoke(&self, mut state: StateGuard<'_, A, R>, now: Timestamp) -> Option<R> {
        let Some(args) = state.pending_args.take() else {
            return state.last_result.clone();
        };
        state.last_invoke = now;
        drop(state);

        // Results are stored in invocation order
        let mut callback = self.callback.lock();
        let result = callback(args);
        self.state.lock().last_result = Some(result.clone());
        drop(callback);
        Some(result)
    }

    /// Replace the armed timer with one firing after `delay`
    fn arm(&self, state: &mut DebounceState<A, R>, delay: Duration) {
        state.disarm();
        state.generation += 1;

        let generation = state.generation;
        let weak = self.this.clone();
        let handle = self.scheduler.after(
            delay,
            Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.timer_expired(generation);
                }
            }),
        );

        trace!(generation, delay = ?delay, "timer armed");
        state.timer = Some(ArmedTimer { handle, generation });
    }
}

/// A callback wrapped by the debounce engine.
///
/// Created by [`debounce`] or [`throttle`](crate::throttle). Calling it
/// through [`call`](Self::call) returns the result of the most recent
/// callback execution, or `None` if the callback has not run yet.
///
/// The wrapper is meant for a single logical caller. Calling it again from
/// inside its own callback deadlocks if that call would run the callback.
/// Dropping the wrapper cancels any pending invocation.
pub struct Debounced<A, R> {
    shared: Arc<Shared<A, R>>,
}

impl<A, R> Debounced<A, R>
where
    A: Send + 'static,
    R: Clone + Send + 'static,
{
    /// Feed one call into the engine
    pub fn call(&self, args: A) -> Option<R> {
        self.shared.call(args)
    }

    /// Drop any pending invocation and reset timing state.
    ///
    /// The next call behaves as on a fresh wrapper (it can be a leading
    /// edge again). The memoized result is kept.
    pub fn cancel(&self) {
        let mut state = self.shared.state.lock();
        if state.timer.is_some() {
            debug!("pending invocation cancelled");
        }
        state.disarm();
        state.last_invoke = Timestamp::ZERO;
        state.pending_args = None;
        state.last_call = None;
    }

    /// Run the pending trailing edge now, if a timer is armed.
    ///
    /// Returns the memoized result when nothing is pending.
    pub fn flush(&self) -> Option<R> {
        let state = self.shared.state.lock();
        if state.timer.is_none() {
            return state.last_result.clone();
        }

        debug!("flushing pending invocation");
        let now = self.shared.scheduler.now();
        self.shared.trailing_edge(state, now)
    }

    /// Whether a timer is currently armed
    pub fn pending(&self) -> bool {
        self.shared.state.lock().timer.is_some()
    }

    /// Quiet period this wrapper was created with
    pub fn wait(&self) -> Duration {
        self.shared.wait
    }

    /// Edge and ceiling settings this wrapper was created with
    pub fn options(&self) -> DebounceOptions {
        self.shared.options
    }
}

impl<A, R> Drop for Debounced<A, R> {
    fn drop(&mut self) {
        self.shared.state.lock().disarm();
    }
}

impl<A, R> fmt::Debug for Debounced<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debounced")
            .field("wait", &self.shared.wait)
            .field("options", &self.shared.options)
            .field("pending", &self.shared.state.lock().timer.is_some())
            .finish()
    }
}

/// Wrap `callback` so it only runs once `wait` has passed without calls.
///
/// See [`DebounceOptions`] for leading/trailing edges and the `max_wait`
/// ceiling. With `leading` and `trailing` both enabled, the trailing
/// invocation only happens if the wrapper was called more than once during
/// the window. With a zero `wait` and no leading edge, the callback runs on
/// the scheduler's next tick, never synchronously.
pub fn debounce<S, F, A, R>(
    scheduler: S,
    callback: F,
    wait: Duration,
    options: DebounceOptions,
) -> Debounced<A, R>
where
    S: Scheduler,
    F: FnMut(A) -> R + Send + 'static,
    A: Send + 'static,
    R: Clone + Send + 'static,
{
    if !options.leading && !options.trailing {
        warn!("debounce created with neither leading nor trailing edge; callback will never run");
    }

    let scheduler: Arc<dyn Scheduler> = Arc::new(scheduler);
    let shared = Arc::new_cyclic(|this| Shared {
        wait,
        options,
        scheduler,
        callback: Mutex::new(Box::new(callback) as Callback<A, R>),
        state: Mutex::new(DebounceState::new()),
        this: this.clone(),
    });

    Debounced { shared }
}
