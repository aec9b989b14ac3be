//! Tokio-backed scheduler for Cadence
//!
//! [`TokioScheduler`] lets the debounce engine and countdown run against
//! real (or paused) tokio time instead of a frame-stepped heartbeat. Each
//! scheduled callback is a spawned task that sleeps for its delay and then
//! runs the callback if its handle is still armed.

use cadence_core::{Clock, Error, Result, Scheduler, Timestamp, TimerHandle};
use cadence_core::clock::TimerCallback;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::time::Instant;
use tracing::trace;

/// Scheduler that runs callbacks on a tokio runtime.
///
/// Time is measured from the moment the scheduler was created, using
/// [`tokio::time::Instant`], so paused test time is honoured.
#[derive(Clone, Debug)]
pub struct TokioScheduler {
    handle: Handle,
    origin: Instant,
}

impl TokioScheduler {
    /// Scheduler bound to an explicit runtime
    pub fn new(handle: Handle) -> Self {
        let origin = {
            let _guard = handle.enter();
            Instant::now()
        };
        Self { handle, origin }
    }

    /// Scheduler bound to the runtime of the calling context.
    ///
    /// Fails with [`Error::NoRuntime`] outside a tokio runtime.
    pub fn current() -> Result<Self> {
        let handle = Handle::try_current().map_err(|e| Error::NoRuntime(e.to_string()))?;
        Ok(Self::new(handle))
    }

    /// Runtime the callbacks are spawned on
    pub fn handle(&self) -> &Handle {
        &self.handle
    }
}

impl Clock for TokioScheduler {
    fn now(&self) -> Timestamp {
        let _guard = self.handle.enter();
        Timestamp::from_offset(Instant::now().saturating_duration_since(self.origin))
    }
}

impl Scheduler for TokioScheduler {
    fn after(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let handle = TimerHandle::new();
        let guard = handle.clone();

        self.handle.spawn(async move {
            tokio::time::sleep(delay).await;

            if guard.try_fire() {
                callback();
            } else {
                trace!(delay = ?delay, "timer cancelled before firing");
            }
        });

        handle
    }
}
