//! Broadcast time parsing
//!
//! Resolves the German schedule encoding `DD.MM | HH:MM` (or `heute` /
//! `morgen` in place of the date) into an absolute instant. All civil time
//! is interpreted in `Europe/Berlin`, so the UTC offset follows the resolved
//! calendar day rather than the moment of parsing.

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{ShowError, ShowResult};

/// Region whose civil calendar the upstream schedule uses
pub const TARGET_TZ: Tz = chrono_tz::Europe::Berlin;

/// Parse the combined schedule form `"<date> | <time>"`, e.g. `"25.12 | 20:15"`
pub fn parse_german_date(input: &str, now: DateTime<Utc>) -> ShowResult<DateTime<Utc>> {
    let (date, time) = input
        .split_once('|')
        .ok_or_else(|| ShowError::invalid_date(input.trim(), "expected '<date> | <time>'"))?;
    parse_broadcast_time(date, time, now)
}

/// Resolve a date token and a time token to an instant, relative to `now`.
///
/// Errors carry the combined `"<date> | <time>"` input.
pub fn parse_broadcast_time(date: &str, time: &str, now: DateTime<Utc>) -> ShowResult<DateTime<Utc>> {
    let input = format!("{} | {}", date.trim(), time.trim());
    let today = now.with_timezone(&TARGET_TZ).date_naive();

    let day = resolve_day(date.trim(), today).map_err(|reason| ShowError::invalid_date(&input, reason))?;
    let time = parse_time(time.trim()).map_err(|reason| ShowError::invalid_date(&input, reason))?;

    to_instant(day.and_time(time))
        .ok_or_else(|| ShowError::invalid_date(&input, "time does not exist in Europe/Berlin"))
}

/// Resolve a date token to a Berlin calendar day
fn resolve_day(token: &str, today: NaiveDate) -> Result<NaiveDate, String> {
    if let Some((day, month)) = token.split_once('.') {
        let day: u32 = day
            .trim()
            .parse()
            .map_err(|e| format!("invalid day '{}': {}", day, e))?;
        let month_str = month.trim().trim_end_matches('.');
        let month: u32 = month_str
            .parse()
            .map_err(|e| format!("invalid month '{}': {}", month_str, e))?;

        // Month and day are validated together, so 31.02 never rolls over
        return NaiveDate::from_ymd_opt(today.year(), month, day)
            .ok_or_else(|| format!("no such day {:02}.{:02}.{}", day, month, today.year()));
    }

    match token.to_lowercase().as_str() {
        "heute" | "today" => Ok(today),
        "morgen" | "tomorrow" => today
            .succ_opt()
            .ok_or_else(|| "date out of range".to_string()),
        other => Err(format!("unknown date word '{}'", other)),
    }
}

/// Parse `HH:MM` (24-hour)
fn parse_time(token: &str) -> Result<NaiveTime, String> {
    let (hours, minutes) = token
        .split_once(':')
        .ok_or_else(|| format!("expected HH:MM, got '{}'", token))?;
    let hours: u32 = hours
        .trim()
        .parse()
        .map_err(|e| format!("invalid hour '{}': {}", hours, e))?;
    let minutes: u32 = minutes
        .trim()
        .parse()
        .map_err(|e| format!("invalid minute '{}': {}", minutes, e))?;

    NaiveTime::from_hms_opt(hours, minutes, 0)
        .ok_or_else(|| format!("time out of range: {:02}:{:02}", hours, minutes))
}

/// Berlin civil time -> UTC instant.
///
/// Fall-back ambiguity takes the earlier instant; a spring-forward gap
/// time is moved one hour later.
fn to_instant(civil: NaiveDateTime) -> Option<DateTime<Utc>> {
    let local = match TARGET_TZ.from_local_datetime(&civil) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => TARGET_TZ
            .from_local_datetime(&(civil + Duration::hours(1)))
            .earliest()?,
    };
    Some(local.with_timezone(&Utc))
}
