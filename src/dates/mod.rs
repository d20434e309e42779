// src/dates/mod.rs
//! Convenience functions for common date things.
//!
//! Dealing with timezone-aware datetimes is fiddly, so the conversions live
//! here in one place. Every function takes the timezone explicitly; nothing
//! reads an ambient "current timezone". Constructors that go through a local
//! wall-clock time return `Option`, since a wall-clock instant can be skipped
//! or doubled across a DST transition.

use chrono::{
    DateTime, Datelike, Days, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};
use std::fmt;

pub const DATE_FORMAT: &str = "%m/%d/%Y";
pub const DATETIME_FORMAT: &str = "%m/%d/%Y %H:%M";
pub const DATETIME_FILE_FORMAT: &str = "%Y%m%d_%H%M";

/// Last representable moment of a day, `23:59:59.999999`.
pub(crate) fn last_moment() -> NaiveTime {
    NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999).expect("valid time of day")
}

/// The current instant in `tz`.
pub fn local_now<Tz: TimeZone>(tz: &Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(tz)
}

fn resolve_start<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        // start of a period: take the earlier of the two repeated hours
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => None,
    }
}

fn resolve_end<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(_, latest) => Some(latest),
        LocalResult::None => None,
    }
}

/// DST-safe end of the day `dt` falls on, in `dt`'s own zone.
///
/// i.e. "Nov 4 00:00:00 CDT" becomes "Nov 4 23:59:59 CST".
pub fn end_of_day<Tz: TimeZone>(dt: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let naive = dt.date_naive().and_time(last_moment());
    resolve_end(&dt.timezone(), naive)
}

/// End of yesterday in `tz`.
pub fn yesterday_midnight<Tz: TimeZone>(tz: &Tz) -> Option<DateTime<Tz>> {
    let today = local_now(tz).date_naive();
    let naive = today.checked_sub_days(Days::new(1))?.and_time(last_moment());
    resolve_end(tz, naive)
}

/// End of today in `tz`.
pub fn tonight_midnight<Tz: TimeZone>(tz: &Tz) -> Option<DateTime<Tz>> {
    end_of_day(&local_now(tz))
}

/// Midnight on January 1 of the current year in `tz`.
pub fn year_start<Tz: TimeZone>(tz: &Tz) -> Option<DateTime<Tz>> {
    let now = local_now(tz);
    let naive = NaiveDate::from_ymd_opt(now.year(), 1, 1)?.and_hms_opt(0, 0, 0)?;
    resolve_start(tz, naive)
}

/// Midnight on the first of the current month in `tz`.
pub fn month_start<Tz: TimeZone>(tz: &Tz) -> Option<DateTime<Tz>> {
    let now = local_now(tz);
    let naive = NaiveDate::from_ymd_opt(now.year(), now.month(), 1)?.and_hms_opt(0, 0, 0)?;
    resolve_start(tz, naive)
}

/// Convert `dt` to `tz` and format it with `fmt`.
pub fn format_with<Tz, Tz2>(dt: &DateTime<Tz>, tz: &Tz2, fmt: &str) -> String
where
    Tz: TimeZone,
    Tz2: TimeZone,
    Tz2::Offset: fmt::Display,
{
    dt.with_timezone(tz).format(fmt).to_string()
}

/// Convert `dt` to `tz` and format as [`DATETIME_FORMAT`].
pub fn format_local_datetime<Tz, Tz2>(dt: &DateTime<Tz>, tz: &Tz2) -> String
where
    Tz: TimeZone,
    Tz2: TimeZone,
    Tz2::Offset: fmt::Display,
{
    format_with(dt, tz, DATETIME_FORMAT)
}

/// Convert `dt` to `tz` and format as [`DATE_FORMAT`].
pub fn format_local_date<Tz, Tz2>(dt: &DateTime<Tz>, tz: &Tz2) -> String
where
    Tz: TimeZone,
    Tz2: TimeZone,
    Tz2::Offset: fmt::Display,
{
    format_with(dt, tz, DATE_FORMAT)
}

/// Seconds since the UTC epoch for a timezone-aware datetime.
pub fn to_timestamp<Tz: TimeZone>(dt: &DateTime<Tz>) -> i64 {
    dt.timestamp()
}

/// UTC epoch seconds back to a datetime in `tz`.
pub fn from_timestamp<Tz: TimeZone>(secs: i64, tz: &Tz) -> Option<DateTime<Tz>> {
    Utc.timestamp_opt(secs, 0).single().map(|dt| dt.with_timezone(tz))
}
