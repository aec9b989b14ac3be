//! CLI command implementations

pub mod config;
pub mod countdown;
pub mod debounce;
pub mod interval;
pub mod throttle;
pub mod timeout;

use anyhow::{Context, Result};
use cadence_cli::config::CadenceConfig;
use cadence_core::time::interval_from_secs;
use std::time::Duration;

/// Frame length from `--frame`, falling back to `host.frame_secs`
pub(crate) fn resolve_frame(frame: Option<f64>, config: &CadenceConfig) -> Result<Duration> {
    match frame {
        Some(secs) => interval_from_secs("frame", secs).context("Invalid --frame"),
        None => config.frame().context("Invalid host.frame_secs in config"),
    }
}
