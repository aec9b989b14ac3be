//! Error types shared by the cadence crates

use thiserror::Error;

/// Errors raised while constructing timers and rate-controlled wrappers.
///
/// Nothing at runtime produces these: once a wrapper exists, every call
/// either returns a result or propagates the wrapped callback's panic.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A duration given in seconds was negative, NaN or too large.
    #[error("Invalid duration for {field}: {value} seconds")]
    InvalidDuration { field: &'static str, value: f64 },

    /// A repeating timer needs a non-zero interval.
    #[error("Interval for {field} must be greater than zero")]
    ZeroInterval { field: &'static str },

    /// A runtime-backed scheduler was requested outside a runtime.
    #[error("No async runtime available: {0}")]
    NoRuntime(String),
}
