//! Configuration management command
//!
//! Provides CLI interface to view and edit the settings file.

use anyhow::{Context, Result};
use cadence_cli::config::{self, CadenceConfig};
use owo_colors::OwoColorize;
use std::path::Path;

/// List all configuration values
pub fn run_list(config_path: Option<&Path>) -> Result<()> {
    let config = config::load(config_path)?;
    let path = config::config_file_path(config_path)?;

    println!("{}", "Cadence Configuration".bold());
    println!("{}: {}\n", "Location".dimmed(), path.display().dimmed());

    print_section(&config, "debounce", |key| key.starts_with("debounce."));
    println!();
    print_section(&config, "host", |key| key.starts_with("host."));
    println!();
    print_section(&config, "countdown", |key| key.starts_with("countdown."));

    println!("\n{}", "Valid Ranges:".bold());
    println!(
        "  debounce.wait_secs, debounce.max_wait_secs: >= 0 (max_wait_secs = none for no ceiling)"
    );
    println!("  host.frame_secs, countdown.interval_secs: > 0");

    Ok(())
}

fn print_section(config: &CadenceConfig, name: &str, filter: impl Fn(&str) -> bool) {
    println!("{}", format!("[{}]", name).yellow());
    for key in config::KEYS.iter().filter(|key| filter(key)) {
        let short = key.split_once('.').map_or(*key, |(_, field)| field);
        // Keys in KEYS are always readable
        if let Ok(value) = config.get(key) {
            println!("  {} = {}", short.cyan(), value);
        }
    }
}

/// Get a single configuration value
pub fn run_get(key: &str, config_path: Option<&Path>) -> Result<()> {
    let config = config::load(config_path)?;
    println!("{}", config.get(key)?);
    Ok(())
}

/// Set a configuration value
pub fn run_set(key: &str, value: &str, config_path: Option<&Path>) -> Result<()> {
    let mut config = config::load(config_path)?;
    config.set(key, value)?;

    // Validate before saving
    config.validate().context("Invalid configuration value")?;

    let path = config::save(config_path, &config)?;

    println!("{} {} = {}", "✓".green(), key.cyan(), value);
    println!("{}: {}", "Saved".dimmed(), path.display().dimmed());
    Ok(())
}

/// Show the config file path and optionally create it
pub fn run_path(create: bool, config_path: Option<&Path>) -> Result<()> {
    let path = config::config_file_path(config_path)?;

    if create && config::init_if_missing(config_path)? {
        println!("{} Created config file at: {}", "✓".green(), path.display());
    } else if path.exists() {
        println!("{}", path.display());
    } else {
        println!("{}", path.display());
        println!("{}", "File does not exist. Use --create to create it.".yellow());
    }

    Ok(())
}

/// Show example configuration
pub fn run_example() -> Result<()> {
    print!("{}", config::example_config());
    Ok(())
}
