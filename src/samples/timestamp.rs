use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::Timestamp;

/// Naive layouts are read as UTC.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];
const NAIVE_DATE_FORMAT: &str = "%Y-%m-%d";
/// Largest float magnitude that still converts to `i64` nanoseconds.
const MAX_FLOAT_NANOS: f64 = 9.2e18;

/// Parses a `time` cell.
///
/// Numbers are nanoseconds since the Unix epoch. Strings may be RFC 3339 or
/// a naive `YYYY-MM-DD[ T]HH:MM:SS[.fff]` / `YYYY-MM-DD` date. Returns
/// `None` for anything else, including empty cells and non-finite numbers.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(nanos) = value.parse::<i64>() {
        return Some(Timestamp::from_nanos(nanos));
    }
    if let Ok(nanos) = value.parse::<f64>() {
        return float_nanos(nanos);
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return parsed.timestamp_nanos_opt().map(Timestamp::from_nanos);
    }
    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return parsed.and_utc().timestamp_nanos_opt().map(Timestamp::from_nanos);
        }
    }

    NaiveDate::parse_from_str(value, NAIVE_DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .and_then(|midnight| midnight.and_utc().timestamp_nanos_opt())
        .map(Timestamp::from_nanos)
}

fn float_nanos(nanos: f64) -> Option<Timestamp> {
    if !nanos.is_finite() || nanos.abs() >= MAX_FLOAT_NANOS {
        return None;
    }
    Some(Timestamp::from_nanos(nanos.round() as i64))
}
