//! Throttle simulation command

use super::resolve_frame;
use anyhow::{Context, Result};
use cadence_cli::config;
use cadence_cli::simulate::Simulation;
use cadence_cli::util::{format_secs, parse_call_times, print_timeline, summarize};
use cadence_core::time::duration_from_secs;
use cadence_debounce::ThrottleOptions;
use owo_colors::OwoColorize;
use std::path::Path;

pub struct ThrottleArgs {
    pub wait: Option<f64>,
    pub no_leading: bool,
    pub no_trailing: bool,
    pub at: Vec<f64>,
    pub frame: Option<f64>,
}

pub fn run(args: ThrottleArgs, config_path: Option<&Path>) -> Result<()> {
    let config = config::load(config_path)?;

    // Throttle shares the debounce wait from config
    let wait_secs = args.wait.unwrap_or(config.debounce.wait_secs);
    let wait = duration_from_secs("wait", wait_secs).context("Invalid --wait")?;
    let options = ThrottleOptions::default()
        .leading(!args.no_leading)
        .trailing(!args.no_trailing);
    let frame = resolve_frame(args.frame, &config)?;
    let calls = parse_call_times(&args.at)?;

    println!("{}", "Throttle".bold());
    println!(
        "{}: wait={} leading={} trailing={} frame={}\n",
        "Settings".dimmed(),
        format_secs(wait),
        options.leading,
        options.trailing,
        format_secs(frame)
    );

    let events = Simulation::new(frame)?.throttle(wait, options, &calls);
    print_timeline(&events);

    let (calls, invocations) = summarize(&events);
    println!(
        "\n{} {} calls, {} invocations",
        "✓".green(),
        calls,
        invocations
    );

    Ok(())
}
