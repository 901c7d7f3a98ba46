use super::TimeRow;
use chrono::{DateTime, Datelike, Timelike, Utc};

/// Text form shared by `time.start_time` and `songplays.start_time`.
pub const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Interprets `ts` as milliseconds since the Unix epoch, in UTC.
pub fn instant_from_millis(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(ts)
}

pub fn format_start_time(instant: &DateTime<Utc>) -> String {
    instant.format(START_TIME_FORMAT).to_string()
}

impl TimeRow {
    /// Derives the calendar breakdown of an instant.
    ///
    /// `week` follows ISO-8601 (weeks start on Monday, week 1 holds the
    /// year's first Thursday) while `year` is the calendar year, so early
    /// January days may carry week 52/53 of the previous ISO year.
    /// `weekday` counts from Monday = 0.
    pub fn from_instant(instant: &DateTime<Utc>) -> TimeRow {
        TimeRow {
            start_time: format_start_time(instant),
            hour: instant.hour(),
            day: instant.day(),
            week: instant.iso_week().week(),
            month: instant.month(),
            year: instant.year(),
            weekday: instant.weekday().num_days_from_monday(),
        }
    }
}
