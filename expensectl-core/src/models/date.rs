//! Date, month and year parsing
//!
//! Dates are stored as RFC 3339 text in UTC with millisecond precision
//! (`2024-01-05T12:00:00.000Z`). Reading is more lenient so rows written
//! by other tools (`2024-01-05 12:00:00`, `2024-01-05`) still summarize.

use chrono::{
    DateTime, Local, Month, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc,
};

use super::ValidationError;

const MIN_YEAR: i64 = 1;
const MAX_YEAR: i64 = 9999;

/// Current instant in canonical text form.
pub fn canonical_now() -> String {
    to_canonical(Utc::now())
}

fn to_canonical(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Normalize a user-supplied date to canonical text.
///
/// Accepts RFC 3339 timestamps or `YYYY-MM-DD` (local midnight).
pub fn normalize_date(s: &str) -> Result<String, ValidationError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ValidationError::Empty { field: "date" });
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(to_canonical(dt.with_timezone(&Utc)));
    }

    let invalid = ValidationError::InvalidFormat {
        field: "date",
        reason: "expected YYYY-MM-DD or an RFC 3339 timestamp",
    };
    let day = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| invalid.clone())?;
    let midnight = day.and_hms_opt(0, 0, 0).ok_or_else(|| invalid.clone())?;
    let local = Local
        .from_local_datetime(&midnight)
        .earliest()
        .ok_or(invalid)?;
    Ok(to_canonical(local.with_timezone(&Utc)))
}

/// Interpret a stored date in local time. `None` if it can't be read.
pub fn parse_stored(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;
    Local.from_local_datetime(&naive).earliest()
}

/// Parse a month given as `1..=12` or an English name (`jan`, `January`).
pub fn parse_month(s: &str) -> Result<Month, ValidationError> {
    let s = s.trim();
    let out_of_range = || ValidationError::OutOfRange {
        field: "month",
        value: s.to_owned(),
        min: 1,
        max: 12,
    };

    if let Ok(n) = s.parse::<u8>() {
        return match n {
            1..=12 => Month::try_from(n).map_err(|_| out_of_range()),
            _ => Err(out_of_range()),
        };
    }

    s.parse::<Month>().map_err(|_| out_of_range())
}

/// Parse a calendar year (`1..=9999`).
pub fn parse_year(s: &str) -> Result<i32, ValidationError> {
    let s = s.trim();
    let out_of_range = || ValidationError::OutOfRange {
        field: "year",
        value: s.to_owned(),
        min: MIN_YEAR,
        max: MAX_YEAR,
    };

    let year = s.parse::<i64>().map_err(|_| out_of_range())?;
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(out_of_range());
    }
    i32::try_from(year).map_err(|_| out_of_range())
}
