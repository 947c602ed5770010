//! Calendar-day keys for task timestamps.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Day a task is charted on.
///
/// Only `created` is consulted. Offsets are normalized to UTC before the
/// date is taken. Missing, empty or unparsable input falls back to `now`.
pub fn normalize_day(created: Option<&str>, now: DateTime<Utc>) -> NaiveDate {
    let Some(raw) = created.map(str::trim).filter(|raw| !raw.is_empty()) else {
        tracing::debug!("task has no created timestamp, using fallback clock");
        return now.date_naive();
    };

    match parse_timestamp(raw) {
        Some(instant) => instant.date_naive(),
        None => {
            tracing::debug!(created = raw, "unparsable created timestamp, using fallback clock");
            now.date_naive()
        }
    }
}

/// Parse an ISO-8601 timestamp into a UTC instant.
///
/// Accepts RFC 3339 with an offset, naive date-times (read as UTC) and bare
/// dates (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
