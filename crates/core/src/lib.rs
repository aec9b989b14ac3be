//! Cadence Core - time model and timer primitives
//!
//! This crate provides the foundation every rate-controlled wrapper sits on:
//! - Monotonic timestamps
//! - Clock and scheduler abstractions with cancellable timer handles
//! - A frame-stepped heartbeat host
//! - Repeating and one-shot timers driven by heartbeat deltas
//! - A cancellable countdown sequence

pub mod clock;
pub mod countdown;
pub mod error;
pub mod heartbeat;
pub mod time;
pub mod timers;

// Re-export main types for convenience
pub use clock::{Clock, Scheduler, TimerHandle};
pub use countdown::{countdown, Countdown, CountdownStatus};
pub use error::Error;
pub use heartbeat::Heartbeat;
pub use time::Timestamp;
pub use timers::{set_interval, set_timeout};

/// Common result type used throughout cadence
pub type Result<T> = std::result::Result<T, Error>;
