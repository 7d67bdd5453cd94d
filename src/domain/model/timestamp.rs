//! Millisecond-precision timestamps
//!
//! Users type scene bounds as `HH:MM:SS:mmm`; the transcoder wants
//! `HH:MM:SS.mmm`. Values are kept as whole milliseconds so that durations
//! and cursor arithmetic never accumulate floating-point drift.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

const MILLIS_PER_SECOND: u64 = 1_000;
const MILLIS_PER_MINUTE: u64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: u64 = 60 * MILLIS_PER_MINUTE;

/// Elapsed time with millisecond precision
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp {
    millis: u64,
}

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp { millis: 0 };

    pub fn from_millis(millis: u64) -> Self {
        Self { millis }
    }

    /// Create a timestamp from hours, minutes, seconds and milliseconds.
    ///
    /// Fails with `Format` when the total does not fit in `u64` milliseconds.
    pub fn from_components(
        hours: u64,
        minutes: u64,
        seconds: u64,
        millis: u64,
    ) -> Result<Self, DomainError> {
        hours
            .checked_mul(MILLIS_PER_HOUR)
            .and_then(|total| total.checked_add(minutes.checked_mul(MILLIS_PER_MINUTE)?))
            .and_then(|total| total.checked_add(seconds.checked_mul(MILLIS_PER_SECOND)?))
            .and_then(|total| total.checked_add(millis))
            .map(|millis| Self { millis })
            .ok_or_else(|| {
                DomainError::Format(format!(
                    "{}:{:02}:{:02}:{:03} is too large to represent",
                    hours, minutes, seconds, millis
                ))
            })
    }

    /// Parse the user-facing `HH:MM:SS:mmm` form.
    ///
    /// Exactly four numeric fields are required. The millisecond field is
    /// zero-padded on the left, so `00:00:01:5` means 1.005 seconds.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        let parts: Vec<&str> = trimmed.split(':').collect();
        if parts.len() != 4 {
            return Err(DomainError::Format(format!(
                "'{}' must have the form HH:MM:SS:mmm (e.g. 00:01:23:456)",
                trimmed
            )));
        }

        let hours = numeric_field(trimmed, parts[0])?;
        let minutes = numeric_field(trimmed, parts[1])?;
        let seconds = numeric_field(trimmed, parts[2])?;
        if parts[3].len() > 3 {
            return Err(DomainError::Format(format!(
                "'{}' has more than 3 millisecond digits",
                trimmed
            )));
        }
        let millis = numeric_field(trimmed, parts[3])?;

        check_sexagesimal(trimmed, minutes, seconds)?;
        Self::from_components(hours, minutes, seconds, millis)
    }

    /// Convert elapsed seconds back to a timestamp.
    ///
    /// Negative (and NaN) input clamps to zero. The value is rounded to
    /// microseconds first and then truncated to milliseconds.
    pub fn from_seconds(seconds: f64) -> Self {
        if !(seconds > 0.0) {
            return Self::ZERO;
        }
        let micros = (seconds * 1_000_000.0).round() as u64;
        Self {
            millis: micros / 1_000,
        }
    }

    pub fn as_millis(&self) -> u64 {
        self.millis
    }

    pub fn as_seconds(&self) -> f64 {
        self.millis as f64 / MILLIS_PER_SECOND as f64
    }

    pub fn hours(&self) -> u64 {
        self.millis / MILLIS_PER_HOUR
    }

    pub fn minutes(&self) -> u64 {
        (self.millis % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE
    }

    pub fn seconds(&self) -> u64 {
        (self.millis % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND
    }

    pub fn subsec_millis(&self) -> u64 {
        self.millis % MILLIS_PER_SECOND
    }

    pub fn saturating_add_millis(&self, millis: u64) -> Self {
        Self {
            millis: self.millis.saturating_add(millis),
        }
    }
}

/// Canonical transcoder form: `HH:MM:SS.mmm`
impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}.{:03}",
            self.hours(),
            self.minutes(),
            self.seconds(),
            self.subsec_millis()
        )
    }
}

/// Elapsed milliseconds between two timestamps; `end` must be strictly later
pub fn duration_millis(start: &Timestamp, end: &Timestamp) -> Result<u64, DomainError> {
    if end <= start {
        return Err(DomainError::Ordering {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(end.as_millis() - start.as_millis())
}

/// Elapsed seconds between two timestamps; `end` must be strictly later
pub fn duration(start: &Timestamp, end: &Timestamp) -> Result<f64, DomainError> {
    duration_millis(start, end).map(|ms| ms as f64 / MILLIS_PER_SECOND as f64)
}

/// Parse a whole-second `HH:MM:SS` bound.
///
/// Blank input means "not set" and yields `None`.
pub fn parse_loose_time(raw: &str) -> Result<Option<Timestamp>, DomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let parts: Vec<&str> = trimmed.split(':').collect();
    if parts.len() != 3 {
        return Err(DomainError::Format(format!(
            "'{}' must have the form HH:MM:SS (e.g. 00:05:00)",
            trimmed
        )));
    }

    let hours = numeric_field(trimmed, parts[0])?;
    let minutes = numeric_field(trimmed, parts[1])?;
    let seconds = numeric_field(trimmed, parts[2])?;
    check_sexagesimal(trimmed, minutes, seconds)?;

    Timestamp::from_components(hours, minutes, seconds, 0).map(Some)
}

fn numeric_field(raw: &str, field: &str) -> Result<u64, DomainError> {
    if field.is_empty() || !field.chars().all(|c| c.is_ascii_digit()) {
        return Err(DomainError::Format(format!(
            "'{}' contains a non-numeric field '{}'",
            raw, field
        )));
    }
    field
        .parse::<u64>()
        .map_err(|_| DomainError::Format(format!("'{}' has an out-of-range field '{}'", raw, field)))
}

fn check_sexagesimal(raw: &str, minutes: u64, seconds: u64) -> Result<(), DomainError> {
    if minutes >= 60 {
        return Err(DomainError::Format(format!(
            "'{}': minutes must be less than 60",
            raw
        )));
    }
    if seconds >= 60 {
        return Err(DomainError::Format(format!(
            "'{}': seconds must be less than 60",
            raw
        )));
    }
    Ok(())
}
