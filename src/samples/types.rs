use std::fmt;

use chrono::{DateTime, SecondsFormat};

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

/// An instant with nanosecond resolution, stored as nanoseconds since the
/// Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    #[must_use]
    pub const fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    #[must_use]
    pub const fn from_secs(secs: i64) -> Self {
        Self(secs.saturating_mul(1_000_000_000))
    }

    #[must_use]
    pub const fn as_nanos(self) -> i64 {
        self.0
    }

    /// Signed elapsed seconds from `earlier` to `self`.
    #[must_use]
    pub fn seconds_since(self, earlier: Self) -> f64 {
        let delta = i128::from(self.0).saturating_sub(i128::from(earlier.0));
        delta as f64 / NANOS_PER_SECOND
    }

    #[must_use]
    pub const fn shifted_by_nanos(self, nanos: i64) -> Self {
        Self(self.0.saturating_add(nanos))
    }

    #[must_use]
    pub fn to_rfc3339(self) -> String {
        DateTime::from_timestamp_nanos(self.0).to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

/// One observation of a labeled metric.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub metric_name: String,
    pub label: String,
    pub timestamp: Timestamp,
    pub value: f64,
}

impl Sample {
    #[must_use]
    pub fn new(
        metric_name: impl Into<String>,
        label: impl Into<String>,
        timestamp: Timestamp,
        value: f64,
    ) -> Self {
        Self {
            metric_name: metric_name.into(),
            label: label.into(),
            timestamp,
            value,
        }
    }
}
