//! Frame-stepped host
//!
//! A [`Heartbeat`] is the time source of a host that advances in discrete
//! frames (a game loop, a UI event loop, a test). Each [`step`](Heartbeat::step)
//! moves the clock forward and hands the frame delta to every connected
//! handler. Timers built on top of it accumulate those deltas, so timing is
//! only as precise as one frame.

use crate::clock::{Clock, Scheduler, TimerCallback, TimerHandle};
use crate::error::Error;
use crate::time::Timestamp;
use crate::timers::set_timeout;
use crate::Result;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

type TickHandler = Box<dyn FnMut(Duration) + Send + 'static>;

/// A handler subscribed to heartbeat ticks
struct Connection {
    /// Disarmed once the connection is dropped
    handle: TimerHandle,
    handler: Arc<Mutex<TickHandler>>,
}

#[derive(Default)]
struct HeartbeatState {
    now: Timestamp,
    connections: Vec<Connection>,
}

/// Per-frame tick signal with an accumulating clock.
///
/// Clones share the same clock and connections.
#[derive(Clone, Default)]
pub struct Heartbeat {
    inner: Arc<Mutex<HeartbeatState>>,
}

impl Heartbeat {
    /// Create a heartbeat whose clock starts at [`Timestamp::ZERO`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `handler` to every future step.
    ///
    /// The returned handle disconnects it. A handler connected while a step
    /// is in progress first runs on the following step.
    pub fn connect<F>(&self, handler: F) -> TimerHandle
    where
        F: FnMut(Duration) + Send + 'static,
    {
        let handle = TimerHandle::new();
        self.attach(handle.clone(), handler);
        handle
    }

    /// Subscribe `handler` under an existing handle
    pub(crate) fn attach<F>(&self, handle: TimerHandle, handler: F)
    where
        F: FnMut(Duration) + Send + 'static,
    {
        self.inner.lock().connections.push(Connection {
            handle,
            handler: Arc::new(Mutex::new(Box::new(handler))),
        });
    }

    /// Advance the clock by `delta` and run every connected handler once.
    ///
    /// Handlers run without the heartbeat lock held, so they may connect,
    /// disconnect or schedule freely. A handler disconnected by an earlier
    /// handler in the same step does not run.
    pub fn step(&self, delta: Duration) {
        let handlers: Vec<(TimerHandle, Arc<Mutex<TickHandler>>)> = {
            let mut state = self.inner.lock();
            state.now = state.now + delta;
            state.connections.retain(|c| c.handle.is_armed());

            trace!(now = %state.now, handlers = state.connections.len(), "heartbeat step");

            state
                .connections
                .iter()
                .map(|c| (c.handle.clone(), Arc::clone(&c.handler)))
                .collect()
        };

        for (handle, handler) in handlers {
            if !handle.is_armed() {
                continue;
            }
            (handler.lock())(delta);
        }
    }

    /// Step in `frame`-sized increments until at least `total` has elapsed.
    pub fn run_for(&self, total: Duration, frame: Duration) -> Result<()> {
        if frame.is_zero() {
            return Err(Error::ZeroInterval { field: "frame" });
        }

        let mut elapsed = Duration::ZERO;
        while elapsed < total {
            self.step(frame);
            elapsed += frame;
        }
        Ok(())
    }

    /// Number of live connections
    pub fn connection_count(&self) -> usize {
        self.inner
            .lock()
            .connections
            .iter()
            .filter(|c| c.handle.is_armed())
            .count()
    }
}

impl Clock for Heartbeat {
    fn now(&self) -> Timestamp {
        self.inner.lock().now
    }
}

impl Scheduler for Heartbeat {
    fn after(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        set_timeout(self, callback, delay)
    }
}
