//! Repeating timer simulation command

use super::resolve_frame;
use anyhow::{Context, Result};
use cadence_cli::config;
use cadence_cli::simulate::Simulation;
use cadence_cli::util::{format_secs, print_timeline};
use cadence_core::time::{duration_from_secs, interval_from_secs};
use owo_colors::OwoColorize;
use std::path::Path;

pub fn run(every: f64, total: f64, frame: Option<f64>, config_path: Option<&Path>) -> Result<()> {
    let config = config::load(config_path)?;

    let every = interval_from_secs("every", every).context("Invalid --every")?;
    let total = duration_from_secs("for", total).context("Invalid --for")?;
    let frame = resolve_frame(frame, &config)?;

    println!("{}", "Interval".bold());
    println!(
        "{}: every={} for={} frame={}\n",
        "Settings".dimmed(),
        format_secs(every),
        format_secs(total),
        format_secs(frame)
    );

    let events = Simulation::new(frame)?.interval(every, total);
    print_timeline(&events);

    println!("\n{} fired {} times", "✓".green(), events.len());
    Ok(())
}
