//! Debounce simulation command

use super::resolve_frame;
use anyhow::{Context, Result};
use cadence_cli::config;
use cadence_cli::simulate::Simulation;
use cadence_cli::util::{format_optional, format_secs, parse_call_times, print_timeline, summarize};
use owo_colors::OwoColorize;
use std::path::Path;

/// Command-line overrides for the `[debounce]` config section
pub struct DebounceArgs {
    pub wait: Option<f64>,
    pub max_wait: Option<f64>,
    pub leading: bool,
    pub no_trailing: bool,
    pub at: Vec<f64>,
    pub frame: Option<f64>,
}

pub fn run(args: DebounceArgs, config_path: Option<&Path>) -> Result<()> {
    let config = config::load(config_path)?;

    let mut settings = config.debounce.clone();
    if let Some(wait) = args.wait {
        settings.wait_secs = wait;
    }
    if args.max_wait.is_some() {
        settings.max_wait_secs = args.max_wait;
    }
    settings.leading |= args.leading;
    settings.trailing &= !args.no_trailing;

    let (wait, options) = settings.resolve().context("Invalid debounce settings")?;
    let frame = resolve_frame(args.frame, &config)?;
    let calls = parse_call_times(&args.at)?;

    println!("{}", "Debounce".bold());
    println!(
        "{}: wait={} max_wait={} leading={} trailing={} frame={}\n",
        "Settings".dimmed(),
        format_secs(wait),
        format_optional(options.max_wait),
        options.leading,
        options.trailing,
        format_secs(frame)
    );

    let events = Simulation::new(frame)?.debounce(wait, options, &calls);
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
