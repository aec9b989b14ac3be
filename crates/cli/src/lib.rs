//! Cadence CLI library
//!
//! Configuration, simulations and output helpers behind the `cadence`
//! binary, exposed for testing.

pub mod config;
pub mod simulate;
pub mod util;
