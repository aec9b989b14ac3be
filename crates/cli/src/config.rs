//! Cadence settings file
//!
//! Settings live in a TOML file. The location is, in order of precedence:
//! the `--config` flag, the `CADENCE_CONFIG` environment variable, or
//! `config.toml` under the platform config directory.

use anyhow::{Context, Result};
use cadence_core::time::{duration_from_secs, interval_from_secs};
use cadence_debounce::DebounceConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "CADENCE_CONFIG";

/// Every key accepted by `cadence config get/set`
pub const KEYS: &[&str] = &[
    "debounce.wait_secs",
    "debounce.max_wait_secs",
    "debounce.leading",
    "debounce.trailing",
    "host.frame_secs",
    "countdown.interval_secs",
];

/// Complete settings file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CadenceConfig {
    /// Defaults for `cadence debounce`
    pub debounce: DebounceConfig,
    /// Simulated host settings
    pub host: HostConfig,
    pub countdown: CountdownConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Length of one heartbeat frame in seconds
    pub frame_secs: f64,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self { frame_secs: 0.01 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountdownConfig {
    /// Seconds between countdown values
    pub interval_secs: f64,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self { interval_secs: 1.0 }
    }
}

impl CadenceConfig {
    /// Check every value is usable
    pub fn validate(&self) -> cadence_core::Result<()> {
        self.debounce.validate()?;
        self.frame()?;
        self.countdown_interval()?;
        Ok(())
    }

    /// Heartbeat frame length
    pub fn frame(&self) -> cadence_core::Result<Duration> {
        interval_from_secs("host.frame_secs", self.host.frame_secs)
    }

    pub fn countdown_interval(&self) -> cadence_core::Result<Duration> {
        interval_from_secs("countdown.interval_secs", self.countdown.interval_secs)
    }

    /// Read a single value as displayed by `cadence config get`
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "debounce.wait_secs" => self.debounce.wait_secs.to_string(),
            "debounce.max_wait_secs" => match self.debounce.max_wait_secs {
                Some(secs) => secs.to_string(),
                None => "none".to_string(),
            },
            "debounce.leading" => self.debounce.leading.to_string(),
            "debounce.trailing" => self.debounce.trailing.to_string(),
            "host.frame_secs" => self.host.frame_secs.to_string(),
            "countdown.interval_secs" => self.countdown.interval_secs.to_string(),
            _ => anyhow::bail!(
                "Unknown config key: {}. Use 'cadence config list' to see available keys.",
                key
            ),
        };
        Ok(value)
    }

    /// Parse and assign a single value. Does not validate the result.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "debounce.wait_secs" => {
                self.debounce.wait_secs = parse_secs(value)?;
            }
            "debounce.max_wait_secs" => {
                self.debounce.max_wait_secs = match value {
                    "none" | "" => None,
                    _ => Some(parse_secs(value)?),
                };
            }
            "debounce.leading" => {
                self.debounce.leading = parse_bool(value)?;
            }
            "debounce.trailing" => {
                self.debounce.trailing = parse_bool(value)?;
            }
            "host.frame_secs" => {
                self.host.frame_secs = parse_secs(value)?;
            }
            "countdown.interval_secs" => {
                self.countdown.interval_secs = parse_secs(value)?;
            }
            _ => anyhow::bail!(
                "Unknown config key: {}. Use 'cadence config list' to see available keys.",
                key
            ),
        }
        Ok(())
    }
}

fn parse_secs(value: &str) -> Result<f64> {
    let secs: f64 = value
        .parse()
        .context("Invalid value: must be a number of seconds")?;
    // Reject negative and NaN right away, zero checks happen in validate
    duration_from_secs("value", secs)?;
    Ok(secs)
}

fn parse_bool(value: &str) -> Result<bool> {
    value
        .parse()
        .context("Invalid value: must be 'true' or 'false'")
}

/// Resolve the config file location
pub fn config_file_path(override_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = override_path {
        return Ok(path.to_path_buf());
    }

    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }

    let dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(dir.join("cadence").join("config.toml"))
}

/// Load settings, falling back to defaults when the file does not exist
pub fn load(override_path: Option<&Path>) -> Result<CadenceConfig> {
    let path = config_file_path(override_path)?;
    load_from(&path)
}

pub fn load_from(path: &Path) -> Result<CadenceConfig> {
    if !path.exists() {
        debug!("No config file at {}, using defaults", path.display());
        return Ok(CadenceConfig::default());
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: CadenceConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;

    Ok(config)
}

/// Write settings, creating the parent directory if needed
pub fn save(override_path: Option<&Path>, config: &CadenceConfig) -> Result<PathBuf> {
    let path = config_file_path(override_path)?;
    save_to(&path, config)?;
    Ok(path)
}

pub fn save_to(path: &Path, config: &CadenceConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }

    let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    debug!("Saved config to {}", path.display());
    Ok(())
}

/// Write the default settings if no file exists yet.
///
/// Returns `true` if a file was created.
pub fn init_if_missing(override_path: Option<&Path>) -> Result<bool> {
    let path = config_file_path(override_path)?;
    if path.exists() {
        return Ok(false);
    }

    save_to(&path, &CadenceConfig::default())?;
    Ok(true)
}

/// Annotated example settings file
pub fn example_config() -> &'static str {
    r#"# Cadence configuration

[debounce]
# Quiet period before the trailing invocation
wait_secs = 0.25
# Longest a call may be delayed (omit for no ceiling)
max_wait_secs = 1.0
# Invoke on the first call of a burst
leading = false
# Invoke after the burst settles
trailing = true

[host]
# Simulated heartbeat frame length
frame_secs = 0.01

[countdown]
# Seconds between countdown values
interval_secs = 1.0
"#
}
