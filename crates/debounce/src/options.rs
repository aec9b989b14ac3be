//! Options for debounced and throttled wrappers

use cadence_core::time::duration_from_secs;
use cadence_core::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Edge and ceiling settings of a debounced wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceOptions {
    /// Invoke on the leading edge of the wait window
    pub leading: bool,
    /// Invoke on the trailing edge of the wait window
    pub trailing: bool,
    /// Longest the callback may be delayed before it is forced to run
    pub max_wait: Option<Duration>,
}

impl DebounceOptions {
    pub fn leading(mut self, leading: bool) -> Self {
        self.leading = leading;
        self
    }

    pub fn trailing(mut self, trailing: bool) -> Self {
        self.trailing = trailing;
        self
    }

    pub fn max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = Some(max_wait);
        self
    }
}

impl Default for DebounceOptions {
    fn default() -> Self {
        Self {
            leading: false,
            trailing: true,
            max_wait: None,
        }
    }
}

/// Edge settings of a throttled wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleOptions {
    pub leading: bool,
    pub trailing: bool,
}

impl ThrottleOptions {
    pub fn leading(mut self, leading: bool) -> Self {
        self.leading = leading;
        self
    }

    pub fn trailing(mut self, trailing: bool) -> Self {
        self.trailing = trailing;
        self
    }

    /// Equivalent debounce options: the ceiling is pinned to `wait`
    pub fn to_debounce(self, wait: Duration) -> DebounceOptions {
        DebounceOptions {
            leading: self.leading,
            trailing: self.trailing,
            max_wait: Some(wait),
        }
    }
}

impl Default for ThrottleOptions {
    fn default() -> Self {
        Self {
            leading: true,
            trailing: true,
        }
    }
}

/// Debounce settings as written in configuration files (seconds)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebounceConfig {
    /// Wait window in seconds
    pub wait_secs: f64,
    /// Ceiling in seconds (absent = no ceiling)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_wait_secs: Option<f64>,
    pub leading: bool,
    pub trailing: bool,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            wait_secs: 0.0,
            max_wait_secs: None,
            leading: false,
            trailing: true,
        }
    }
}

impl DebounceConfig {
    /// Validate and convert into a wait duration plus options
    pub fn resolve(&self) -> Result<(Duration, DebounceOptions)> {
        let wait = duration_from_secs("wait_secs", self.wait_secs)?;
        let max_wait = self
            .max_wait_secs
            .map(|secs| duration_from_secs("max_wait_secs", secs))
            .transpose()?;

        Ok((
            wait,
            DebounceOptions {
                leading: self.leading,
                trailing: self.trailing,
                max_wait,
            },
        ))
    }

    /// Check that every duration is representable
    pub fn validate(&self) -> Result<()> {
        self.resolve().map(|_| ())
    }
}
