//! End-to-end tests for the cadence binary

mod common;

use anyhow::Result;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_debounce_burst_collapses_to_one_invocation() -> Result<()> {
    let temp = TempDir::new()?;
    let result = cadence!(
        temp.path(),
        "debounce",
        "--wait",
        "0.03",
        "--at",
        "0,0.01,0.02",
        "--frame",
        "0.01"
    )
    .assert_success()?;

    assert_eq!(result.count_stdout("call #"), 3);
    assert_eq!(result.count_stdout("invoke #"), 1);
    assert!(result.contains_stdout("invoke #3"));
    assert!(result.contains_stdout("3 calls, 1 invocations"));
    Ok(())
}

#[test]
fn test_debounce_leading_only() -> Result<()> {
    let temp = TempDir::new()?;
    let result = cadence!(
        temp.path(),
        "debounce",
        "--wait",
        "0.05",
        "--leading",
        "--no-trailing",
        "--at",
        "0,0.01,0.02,0.03"
    )
    .assert_success()?;

    assert_eq!(result.count_stdout("invoke #"), 1);
    assert!(result.contains_stdout("invoke #1"));
    Ok(())
}

#[test]
fn test_debounce_rejects_unsorted_times() -> Result<()> {
    let temp = TempDir::new()?;
    let result = cadence!(temp.path(), "debounce", "--wait", "0.03", "--at", "0.2,0.1")
        .assert_failure()?;

    assert!(result.contains_stderr("ascending"));
    Ok(())
}

#[test]
fn test_throttle_invokes_once_per_window() -> Result<()> {
    let temp = TempDir::new()?;
    let result = cadence!(
        temp.path(),
        "throttle",
        "--wait",
        "0.03",
        "--at",
        "0,0.01,0.02,0.03,0.04,0.05,0.06,0.07,0.08,0.09",
        "--frame",
        "0.01"
    )
    .assert_success()?;

    // 0.000 (leading), 0.030, 0.060, 0.090 and the trailing call at 0.120
    assert_eq!(result.count_stdout("invoke #"), 5);
    assert!(result.contains_stdout("invoke #10"));
    Ok(())
}

#[test]
fn test_interval_and_timeout() -> Result<()> {
    let temp = TempDir::new()?;

    let result = cadence!(
        temp.path(),
        "interval",
        "--every",
        "0.03",
        "--for",
        "0.1",
        "--frame",
        "0.01"
    )
    .assert_success()?;
    assert_eq!(result.count_stdout("fire #"), 3);
    assert!(result.contains_stdout("0.090s"));

    let result = cadence!(
        temp.path(),
        "timeout",
        "--after",
        "0.05",
        "--for",
        "0.1",
        "--frame",
        "0.01"
    )
    .assert_success()?;
    assert_eq!(result.count_stdout("fire #"), 1);
    assert!(result.contains_stdout("0.050s"));

    let result = cadence!(temp.path(), "timeout", "--after", "1", "--for", "0.1")
        .assert_success()?;
    assert!(result.contains_stdout("did not fire"));
    Ok(())
}

#[test]
fn test_zero_interval_rejected() -> Result<()> {
    let temp = TempDir::new()?;
    cadence!(temp.path(), "interval", "--every", "0", "--for", "1").assert_failure()?;
    cadence!(temp.path(), "debounce", "--wait", "0.1", "--frame", "0", "--at", "0")
        .assert_failure()?;
    Ok(())
}

#[test]
fn test_countdown_completes() -> Result<()> {
    let temp = TempDir::new()?;
    let result = cadence!(temp.path(), "countdown", "2", "--interval", "0.05").assert_success()?;

    assert!(result.contains_stdout("Countdown complete"));
    // Three values plus the final interval
    assert!(result.duration >= Duration::from_millis(150));
    Ok(())
}

#[test]
fn test_config_set_get_roundtrip() -> Result<()> {
    let temp = TempDir::new()?;
    let config = temp.path().join("config.toml");
    let config = config.to_str().unwrap();

    cadence!(temp.path(), "--config", config, "config", "set", "debounce.wait_secs", "0.25")
        .assert_success()?;
    let result = cadence!(temp.path(), "--config", config, "config", "get", "debounce.wait_secs")
        .assert_success()?;
    assert_eq!(result.stdout.trim(), "0.25");

    // The saved wait becomes the default for simulations
    let result = cadence!(temp.path(), "--config", config, "debounce", "--at", "0")
        .assert_success()?;
    assert!(result.contains_stdout("wait=0.250s"));
    Ok(())
}

#[test]
fn test_config_env_override() -> Result<()> {
    let temp = TempDir::new()?;
    let config = temp.path().join("from-env.toml");
    let config = config.to_str().unwrap();

    let mut set = cadence!(temp.path(), "config", "set", "countdown.interval_secs", "0.5");
    set.env("CADENCE_CONFIG", config).assert_success()?;

    let mut path = cadence!(temp.path(), "config", "path");
    let result = path.env("CADENCE_CONFIG", config).assert_success()?;
    assert!(result.contains_stdout("from-env.toml"));
    Ok(())
}

#[test]
fn test_config_rejects_invalid_values() -> Result<()> {
    let temp = TempDir::new()?;
    let config = temp.path().join("config.toml");
    let config_str = config.to_str().unwrap();

    cadence!(temp.path(), "--config", config_str, "config", "set", "host.frame_secs", "0")
        .assert_failure()?;
    cadence!(temp.path(), "--config", config_str, "config", "set", "debounce.leading", "maybe")
        .assert_failure()?;
    cadence!(temp.path(), "--config", config_str, "config", "get", "no.such.key")
        .assert_failure()?;

    // Nothing invalid was written
    assert!(!config.exists());
    Ok(())
}

#[test]
fn test_config_path_create_and_example() -> Result<()> {
    let temp = TempDir::new()?;
    let config = temp.path().join("sub").join("config.toml");
    let config_str = config.to_str().unwrap();

    let result = cadence!(temp.path(), "--config", config_str, "config", "path")
        .assert_success()?;
    assert!(result.contains_stdout("does not exist"));

    cadence!(temp.path(), "--config", config_str, "config", "path", "--create").assert_success()?;
    assert!(config.exists());

    let result = cadence!(temp.path(), "config", "example").assert_success()?;
    assert!(result.contains_stdout("[debounce]"));
    assert!(result.contains_stdout("frame_secs"));
    Ok(())
}
