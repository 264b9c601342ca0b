//! Duration policy and formatting.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::clock::{MINUTES_PER_DAY, MinuteOfDay};
use crate::types::ValidationError;

/// How an end time that is not after the start time is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationPolicy {
    /// `end <= start` has zero duration and is rejected.
    #[default]
    Clamped,
    /// `end < start` crosses midnight; `end == start` is still rejected.
    Wrap,
}

impl DurationPolicy {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Clamped => "clamped",
            Self::Wrap => "wrap",
        }
    }
}

impl fmt::Display for DurationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DurationPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clamped" => Ok(Self::Clamped),
            "wrap" => Ok(Self::Wrap),
            _ => Err(ValidationError::InvalidDurationPolicy {
                value: s.to_string(),
            }),
        }
    }
}

/// Minutes between `start` and `end` under the given policy.
///
/// Zero means the interval is invalid and must not be stored.
#[must_use]
pub fn compute_duration(start: MinuteOfDay, end: MinuteOfDay, policy: DurationPolicy) -> u32 {
    let start = u32::from(start.minutes());
    let end = u32::from(end.minutes());
    match policy {
        _ if end > start => end - start,
        DurationPolicy::Wrap if end < start => end + u32::from(MINUTES_PER_DAY) - start,
        DurationPolicy::Clamped | DurationPolicy::Wrap => 0,
    }
}

/// A minute total split into whole hours and leftover minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoursMinutes {
    pub hours: u64,
    pub minutes: u64,
}

/// Renders as `{h}h {mm}m`, e.g. `0h 05m` or `12h 30m`.
impl fmt::Display for HoursMinutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {:02}m", self.hours, self.minutes)
    }
}

#[must_use]
pub const fn minutes_to_hours_and_minutes(total: u64) -> HoursMinutes {
    HoursMinutes {
        hours: total / 60,
        minutes: total % 60,
    }
}

/// Formats a minute total for display.
#[must_use]
pub fn format_duration(total: u64) -> String {
    minutes_to_hours_and_minutes(total).to_string()
}
