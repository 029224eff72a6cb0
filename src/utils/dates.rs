use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Unanchored on purpose: the format check only requires a 4-2-2 digit
    // group to occur somewhere in the string, so trailing garbage after a
    // valid date is tolerated ("xx2021-01-01yy" passes).
    static ref DATE_PATTERN: Regex =
        Regex::new(r"(\d{4})-(\d{2})-(\d{2})").expect("date pattern is valid");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateError {
    InvalidFormat,
    InvalidDate,
}

/// Current instant as epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Normalizes an optional `yyyy-mm-dd` date string into a canonical instant
/// (epoch milliseconds) usable directly in numeric range comparisons.
///
/// - Absent or empty input yields the current instant (submission time);
///   a whitespace-only string is present and fails the format check.
/// - A string without a 4-2-2 digit group anywhere is `InvalidFormat`.
/// - An impossible calendar date (month 13, day 40) is `InvalidDate`.
///
/// The returned instant is local midnight of the given calendar date, with
/// the server-local UTC offset resolved for that date (not the current
/// moment), so the result stays correct across DST boundaries. The offset is
/// recomputed on every call.
pub fn normalize(input: Option<&str>) -> Result<i64, DateError> {
    let raw = match input {
        Some(s) if !s.is_empty() => s,
        _ => return Ok(now_millis()),
    };

    let caps = DATE_PATTERN.captures(raw).ok_or(DateError::InvalidFormat)?;

    // Captured groups are fixed-width digit runs, so parsing cannot fail;
    // range validation happens in from_ymd_opt below.
    let year: i32 = caps[1].parse().map_err(|_| DateError::InvalidDate)?;
    let month: u32 = caps[2].parse().map_err(|_| DateError::InvalidDate)?;
    let day: u32 = caps[3].parse().map_err(|_| DateError::InvalidDate)?;

    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or(DateError::InvalidDate)?;

    Ok(local_midnight_millis(date))
}

/// Renders a stored instant as a human-readable calendar date in server-local
/// time, e.g. "Fri Jan 01 2021".
pub fn to_date_string(timestamp_millis: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_millis)
        .map(|dt| dt.with_timezone(&Local).format("%a %b %d %Y").to_string())
        .unwrap_or_else(|| timestamp_millis.to_string())
}

fn local_midnight_millis(date: NaiveDate) -> i64 {
    let midnight = date.and_time(NaiveTime::MIN);
    match Local.from_local_datetime(&midnight).earliest() {
        Some(dt) => dt.timestamp_millis(),
        // Midnight skipped by a DST spring-forward: fall back to the offset
        // in effect at that date's UTC midnight.
        None => {
            let offset = Local.offset_from_utc_datetime(&midnight);
            midnight.and_utc().timestamp_millis()
                - i64::from(offset.local_minus_utc()) * 1000
        }
    }
}
