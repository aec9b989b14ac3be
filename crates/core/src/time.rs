//! Monotonic timestamps
//!
//! A [`Timestamp`] is an offset from the origin of whatever clock produced
//! it. Timestamps from different clocks are not comparable.

use crate::error::Error;
use crate::Result;
use std::fmt;
use std::ops::Add;
use std::time::Duration;

/// Point in time on a monotonic clock, stored as the elapsed time since the
/// clock's origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(Duration);

impl Timestamp {
    /// The clock origin. Used as the "start of time" sentinel.
    pub const ZERO: Timestamp = Timestamp(Duration::ZERO);

    /// Create a timestamp `offset` after the clock origin
    pub const fn from_offset(offset: Duration) -> Self {
        Self(offset)
    }

    /// Create a timestamp from fractional seconds since the origin
    pub fn from_secs_f64(secs: f64) -> Result<Self> {
        duration_from_secs("timestamp", secs).map(Self)
    }

    /// Elapsed time since the clock origin
    pub const fn offset(self) -> Duration {
        self.0
    }

    pub fn as_secs_f64(self) -> f64 {
        self.0.as_secs_f64()
    }

    /// Time elapsed from `earlier` to `self`.
    ///
    /// Returns `None` when `earlier` is actually later, i.e. the clock
    /// appears to have moved backward.
    pub fn checked_duration_since(self, earlier: Timestamp) -> Option<Duration> {
        self.0.checked_sub(earlier.0)
    }

    /// Time elapsed from `earlier` to `self`, clamped at zero
    pub fn saturating_duration_since(self, earlier: Timestamp) -> Duration {
        self.0.saturating_sub(earlier.0)
    }
}

impl Add<Duration> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Duration) -> Timestamp {
        Timestamp(self.0 + rhs)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.0.as_secs_f64())
    }
}

/// Convert fractional seconds into a [`Duration`], rejecting negative,
/// NaN and overflowing values.
///
/// `field` names the setting in the returned error.
pub fn duration_from_secs(field: &'static str, secs: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(secs).map_err(|_| Error::InvalidDuration { field, value: secs })
}

/// Like [`duration_from_secs`], but also rejects zero.
pub fn interval_from_secs(field: &'static str, secs: f64) -> Result<Duration> {
    let duration = duration_from_secs(field, secs)?;
    if duration.is_zero() {
        return Err(Error::ZeroInterval { field });
    }
    Ok(duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backward_clock_is_detected() {
        let earlier = Timestamp::from_offset(Duration::from_millis(50));
        let later = Timestamp::from_offset(Duration::from_millis(80));

        assert_eq!(
            later.checked_duration_since(earlier),
            Some(Duration::from_millis(30))
        );
        assert_eq!(earlier.checked_duration_since(later), None);
        assert_eq!(earlier.saturating_duration_since(later), Duration::ZERO);
    }

    #[test]
    fn test_duration_from_secs_rejects_bad_input() {
        assert_eq!(
            duration_from_secs("wait", 0.25).unwrap(),
            Duration::from_millis(250)
        );
        assert_eq!(
            duration_from_secs("wait", -1.0),
            Err(Error::InvalidDuration { field: "wait", value: -1.0 })
        );
        assert!(duration_from_secs("wait", f64::NAN).is_err());
        assert!(duration_from_secs("wait", f64::INFINITY).is_err());
    }

    #[test]
    fn test_interval_from_secs_rejects_zero() {
        assert_eq!(
            interval_from_secs("frame", 0.0),
            Err(Error::ZeroInterval { field: "frame" })
        );
        assert!(interval_from_secs("frame", 0.016).is_ok());
    }

    #[test]
    fn test_display() {
        let ts = Timestamp::from_offset(Duration::from_millis(1500));
        assert_eq!(ts.to_string(), "1.500s");
    }
}
