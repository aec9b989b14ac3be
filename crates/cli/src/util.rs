//! Shared utilities for CLI commands

use crate::simulate::Event;
use anyhow::{bail, Context, Result};
use cadence_core::time::duration_from_secs;
use cadence_core::Timestamp;
use owo_colors::OwoColorize;
use std::time::Duration;

/// Convert `--at` seconds into call offsets.
///
/// Times must be non-negative and in ascending order.
pub fn parse_call_times(secs: &[f64]) -> Result<Vec<Duration>> {
    if secs.is_empty() {
        bail!("At least one call time is required (e.g. --at 0,0.01,0.02)");
    }

    let mut times = Vec::with_capacity(secs.len());
    for &value in secs {
        let time = duration_from_secs("at", value).context("Invalid call time")?;
        if times.last().is_some_and(|prev| time < *prev) {
            bail!("Call times must be in ascending order ({} comes after a later time)", value);
        }
        times.push(time);
    }
    Ok(times)
}

/// Format an optional duration in seconds, or "none"
pub fn format_optional(duration: Option<Duration>) -> String {
    match duration {
        Some(d) => format_secs(d),
        None => "none".to_string(),
    }
}

pub fn format_secs(duration: Duration) -> String {
    Timestamp::from_offset(duration).to_string()
}

/// Print a simulation timeline, one event per line
pub fn print_timeline(events: &[Event]) {
    for event in events {
        let at = format!("{:>9}", event.at().to_string());
        match event {
            Event::Call { index, result, .. } => {
                let result = match result {
                    Some(value) => value.to_string(),
                    None => "none".to_string(),
                };
                println!(
                    "  {}  {} {}",
                    at.dimmed(),
                    format!("call #{}", index).cyan(),
                    format!("-> {}", result).dimmed()
                );
            }
            Event::Invoke { index, .. } => {
                println!("  {}  {}", at.dimmed(), format!("invoke #{}", index).green().bold());
            }
            Event::Fire { count, .. } => {
                println!("  {}  {}", at.dimmed(), format!("fire #{}", count).green().bold());
            }
        }
    }
}

/// Count calls and invocations in a timeline
pub fn summarize(events: &[Event]) -> (usize, usize) {
    let calls = events.iter().filter(|e| matches!(e, Event::Call { .. })).count();
    let invocations = events.iter().filter(|e| matches!(e, Event::Invoke { .. })).count();
    (calls, invocations)
}
