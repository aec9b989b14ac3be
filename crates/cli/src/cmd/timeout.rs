//! One-shot timer simulation command

use super::resolve_frame;
use anyhow::{Context, Result};
use cadence_cli::config;
use cadence_cli::simulate::Simulation;
use cadence_cli::util::{format_secs, print_timeline};
use cadence_core::time::duration_from_secs;
use owo_colors::OwoColorize;
use std::path::Path;

pub fn run(after: f64, total: f64, frame: Option<f64>, config_path: Option<&Path>) -> Result<()> {
    let config = config::load(config_path)?;

    let after = duration_from_secs("after", after).context("Invalid --after")?;
    let total = duration_from_secs("for", total).context("Invalid --for")?;
    let frame = resolve_frame(frame, &config)?;

    println!("{}", "Timeout".bold());
    println!(
        "{}: after={} for={} frame={}\n",
        "Settings".dimmed(),
        format_secs(after),
        format_secs(total),
        format_secs(frame)
    );

    let events = Simulation::new(frame)?.timeout(after, total);
    if events.is_empty() {
        println!("{}", "Timer did not fire".yellow());
    } else {
        print_timeline(&events);
        println!("\n{} fired", "✓".green());
    }

    Ok(())
}
