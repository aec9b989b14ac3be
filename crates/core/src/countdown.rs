//! Cancellable countdown sequence
//!
//! A countdown from `n` delivers `n, n-1, ..., 0` to a callback, one value
//! per interval, then resolves one interval after the final `0`. The first
//! value is delivered synchronously when the countdown starts.

use crate::clock::{Scheduler, TimerHandle};
use futures::channel::oneshot;
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tracing::debug;

/// Spacing between countdown values when the caller has no preference
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// Lifecycle of a [`Countdown`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStatus {
    /// Values are still being delivered
    Running,
    /// Every value was delivered and the final interval elapsed
    Completed,
    /// Stopped by [`Countdown::cancel`]
    Cancelled,
}

struct CountdownState {
    status: CountdownStatus,
    /// Next value to deliver; `None` once `0` has been delivered
    next: Option<u32>,
    timer: Option<TimerHandle>,
    done: Option<oneshot::Sender<CountdownStatus>>,
}

impl CountdownState {
    /// Move into a terminal state and notify the waiter
    fn finish(&mut self, status: CountdownStatus) {
        self.status = status;
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
        if let Some(done) = self.done.take() {
            let _ = done.send(status);
        }
    }
}

struct CountdownShared<S, F> {
    scheduler: S,
    interval: Duration,
    callback: Mutex<F>,
    state: Mutex<CountdownState>,
    this: Weak<CountdownShared<S, F>>,
}

impl<S, F> CountdownShared<S, F>
where
    S: Scheduler,
    F: FnMut(u32) + Send + 'static,
{
    /// Deliver the next value, or complete if none is left
    fn tick(&self) {
        let value = {
            let mut state = self.state.lock();
            state.timer = None;
            if state.status != CountdownStatus::Running {
                return;
            }
            match state.next {
                Some(value) => value,
                None => {
                    debug!("Countdown completed");
                    state.finish(CountdownStatus::Completed);
                    return;
                }
            }
        };

        (self.callback.lock())(value);

        let mut state = self.state.lock();
        // The callback may have cancelled us
        if state.status != CountdownStatus::Running {
            return;
        }
        state.next = value.checked_sub(1);

        let weak = self.this.clone();
        state.timer = Some(self.scheduler.after(
            self.interval,
            Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.tick();
                }
            }),
        ));
    }
}

/// Handle to a running countdown
pub struct Countdown {
    state: Arc<dyn CountdownControl>,
    done: Option<oneshot::Receiver<CountdownStatus>>,
}

/// Type-erased access to the shared countdown state
trait CountdownControl: Send + Sync {
    fn cancel(&self);
    fn status(&self) -> CountdownStatus;
}

impl<S, F> CountdownControl for CountdownShared<S, F>
where
    S: Scheduler,
    F: FnMut(u32) + Send + 'static,
{
    fn cancel(&self) {
        let mut state = self.state.lock();
        if state.status == CountdownStatus::Running {
            debug!(next = ?state.next, "Countdown cancelled");
            state.finish(CountdownStatus::Cancelled);
        }
    }

    fn status(&self) -> CountdownStatus {
        self.state.lock().status
    }
}

impl Countdown {
    /// Stop the countdown. Values already delivered stay delivered.
    /// No-op once the countdown has finished.
    pub fn cancel(&self) {
        self.state.cancel();
    }

    pub fn status(&self) -> CountdownStatus {
        self.state.status()
    }

    /// Resolve once the countdown completes or is cancelled.
    ///
    /// If the scheduler is dropped while values are pending, resolves with
    /// the status at that moment. Later calls resolve immediately.
    pub async fn finished(&mut self) -> CountdownStatus {
        match self.done.take() {
            Some(done) => done.await.unwrap_or_else(|_| self.state.status()),
            None => self.state.status(),
        }
    }
}

/// Start a countdown from `count` to `0`, one value every `interval`.
///
/// `count + 1` values are delivered in total. The handle keeps the
/// countdown alive; dropping it stops further deliveries.
pub fn countdown<S, F>(scheduler: S, callback: F, count: u32, interval: Duration) -> Countdown
where
    S: Scheduler,
    F: FnMut(u32) + Send + 'static,
{
    let (tx, rx) = oneshot::channel();

    let shared = Arc::new_cyclic(|this| CountdownShared {
        scheduler,
        interval,
        callback: Mutex::new(callback),
        state: Mutex::new(CountdownState {
            status: CountdownStatus::Running,
            next: Some(count),
            timer: None,
            done: Some(tx),
        }),
        this: this.clone(),
    });

    debug!(count, interval = ?interval, "Countdown started");
    shared.tick();

    Countdown {
        state: shared,
        done: Some(rx),
    }
}
