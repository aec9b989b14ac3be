//! Deterministic simulations on a frame-stepped heartbeat
//!
//! Every simulation drives a fresh [`Heartbeat`] in fixed frames and
//! records what happened as a timeline of [`Event`]s. Call times are
//! quantized to frame boundaries: a call scheduled at 0.015s with 10ms
//! frames happens at 0.020s.

use anyhow::{bail, Result};
use cadence_core::{set_interval, set_timeout, Clock, Heartbeat, Timestamp, TimerHandle};
use cadence_debounce::{debounce, throttle, DebounceOptions, Debounced, ThrottleOptions};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// One entry of a simulation timeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The wrapper was called for the `index`-th time and returned `result`
    Call {
        at: Timestamp,
        index: u32,
        result: Option<u32>,
    },
    /// The wrapped callback ran with the arguments of call `index`
    Invoke { at: Timestamp, index: u32 },
    /// A timer fired for the `count`-th time
    Fire { at: Timestamp, count: u32 },
}

impl Event {
    pub fn at(&self) -> Timestamp {
        match self {
            Event::Call { at, .. } | Event::Invoke { at, .. } | Event::Fire { at, .. } => *at,
        }
    }
}

/// A heartbeat plus the timeline recorded against it
pub struct Simulation {
    heartbeat: Heartbeat,
    frame: Duration,
    events: Arc<Mutex<Vec<Event>>>,
}

impl Simulation {
    /// Create a simulation stepping in `frame`-sized increments
    pub fn new(frame: Duration) -> Result<Self> {
        if frame.is_zero() {
            bail!("Frame length must be greater than zero");
        }

        Ok(Self {
            heartbeat: Heartbeat::new(),
            frame,
            events: Arc::new(Mutex::new(Vec::new())),
        })
    }

    /// Feed `calls` (offsets from the start, ascending) into a debounced
    /// wrapper and run until nothing is pending.
    pub fn debounce(
        self,
        wait: Duration,
        options: DebounceOptions,
        calls: &[Duration],
    ) -> Vec<Event> {
        let wrapper = debounce(self.heartbeat.clone(), self.recorder(), wait, options);
        self.drive(&wrapper, calls);
        self.into_events()
    }

    /// Like [`debounce`](Self::debounce), through a throttled wrapper
    pub fn throttle(
        self,
        wait: Duration,
        options: ThrottleOptions,
        calls: &[Duration],
    ) -> Vec<Event> {
        let wrapper = throttle(self.heartbeat.clone(), self.recorder(), wait, options);
        self.drive(&wrapper, calls);
        self.into_events()
    }

    /// Run a repeating timer for `total` and record each firing
    pub fn interval(self, every: Duration, total: Duration) -> Vec<Event> {
        let fired = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&fired);
        let timer = set_interval(
            &self.heartbeat,
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
            },
            every,
        );

        self.run_timer(&timer, &fired, total);
        self.into_events()
    }

    /// Run a one-shot timer for `total` and record whether it fired
    pub fn timeout(self, after: Duration, total: Duration) -> Vec<Event> {
        let fired = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&fired);
        let timer = set_timeout(
            &self.heartbeat,
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
            },
            after,
        );

        self.run_timer(&timer, &fired, total);
        self.into_events()
    }

    /// Callback that records its invocation and echoes the call index
    fn recorder(&self) -> impl FnMut(u32) -> u32 + Send + 'static {
        let heartbeat = self.heartbeat.clone();
        let events = Arc::clone(&self.events);

        move |index| {
            events.lock().push(Event::Invoke {
                at: heartbeat.now(),
                index,
            });
            index
        }
    }

    fn drive(&self, wrapper: &Debounced<u32, u32>, calls: &[Duration]) {
        let mut next = 0;

        loop {
            let now = self.heartbeat.now();

            while next < calls.len() && Timestamp::from_offset(calls[next]) <= now {
                let index = next as u32 + 1;

                // Reserve the slot first so the call line precedes any
                // invocation it causes
                let slot = {
                    let mut events = self.events.lock();
                    events.push(Event::Call {
                        at: now,
                        index,
                        result: None,
                    });
                    events.len() - 1
                };

                let returned = wrapper.call(index);
                if let Event::Call { result, .. } = &mut self.events.lock()[slot] {
                    *result = returned;
                }
                next += 1;
            }

            if next == calls.len() && !wrapper.pending() {
                break;
            }
            self.heartbeat.step(self.frame);
        }

        debug!(
            calls = calls.len(),
            elapsed = %self.heartbeat.now(),
            "simulation settled"
        );
    }

    fn run_timer(&self, timer: &TimerHandle, fired: &AtomicU32, total: Duration) {
        let mut elapsed = Duration::ZERO;
        let mut seen = 0;

        while elapsed < total {
            self.heartbeat.step(self.frame);
            elapsed += self.frame;

            let count = fired.load(Ordering::SeqCst);
            while seen < count {
                seen += 1;
                self.events.lock().push(Event::Fire {
                    at: self.heartbeat.now(),
                    count: seen,
                });
            }
        }

        timer.cancel();
    }

    fn into_events(self) -> Vec<Event> {
        let events = std::mem::take(&mut *self.events.lock());
        events
    }
}
