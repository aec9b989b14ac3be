//! Real-time countdown command

use anyhow::{Context, Result};
use cadence_cli::config;
use cadence_cli::util::format_secs;
use cadence_core::time::interval_from_secs;
use cadence_core::{countdown, CountdownStatus};
use cadence_runtime::TokioScheduler;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::path::Path;
use tracing::info;

/// Count down from `count` to zero, one value per interval. Ctrl-C cancels.
pub async fn run(count: u32, interval: Option<f64>, config_path: Option<&Path>) -> Result<()> {
    let config = config::load(config_path)?;

    let interval = match interval {
        Some(secs) => interval_from_secs("interval", secs).context("Invalid --interval")?,
        None => config
            .countdown_interval()
            .context("Invalid countdown.interval_secs in config")?,
    };

    let scheduler = TokioScheduler::current()?;
    info!("Starting countdown from {} (interval: {:?})", count, interval);

    println!(
        "{} from {} every {}",
        "Countdown".bold(),
        count.cyan(),
        format_secs(interval)
    );

    let bar = ProgressBar::new(u64::from(count) + 1);
    bar.set_style(
        ProgressStyle::with_template("{spinner:.green} [{bar:30.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    let progress = bar.clone();
    let mut countdown = countdown(
        scheduler,
        move |value| {
            progress.set_message(value.to_string());
            progress.inc(1);
        },
        count,
        interval,
    );

    let interrupted = tokio::select! {
        _ = countdown.finished() => false,
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl-C")?;
            true
        }
    };

    if interrupted {
        countdown.cancel();
    }

    match countdown.status() {
        CountdownStatus::Completed => {
            bar.finish_with_message("done");
            println!("{} Countdown complete", "✓".green());
        }
        CountdownStatus::Cancelled => {
            bar.abandon_with_message("cancelled");
            println!("{}", "Countdown cancelled".yellow());
        }
        CountdownStatus::Running => {
            // The scheduler went away before the countdown finished
            bar.abandon();
            anyhow::bail!("Countdown stopped unexpectedly");
        }
    }

    Ok(())
}
