//! Debounce and throttle wrappers for Cadence
//!
//! This crate provides:
//! - The debounce engine (leading/trailing edges, `max_wait` ceiling,
//!   cancel, flush and pending introspection)
//! - The throttle adapter (a debounce with its ceiling pinned to the wait)
//! - Options and file-friendly configuration

pub mod engine;
pub mod options;
pub mod throttle;

// Re-exports
pub use engine::{debounce, Debounced};
pub use options::{DebounceConfig, DebounceOptions, ThrottleOptions};
pub use throttle::throttle;

use cadence_core::{Result, Scheduler};

/// Build a debounced wrapper from configuration values in seconds.
///
/// Fails if any duration is negative or not a number.
pub fn debounce_from_config<S, F, A, R>(
    scheduler: S,
    callback: F,
    config: &DebounceConfig,
) -> Result<Debounced<A, R>>
where
    S: Scheduler,
    F: FnMut(A) -> R + Send + 'static,
    A: Send + 'static,
    R: Clone + Send + 'static,
{
    let (wait, options) = config.resolve()?;
    Ok(debounce(scheduler, callback, wait, options))
}
