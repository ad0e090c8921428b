use chrono::{DateTime, Datelike};

pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Snaps a unix timestamp (seconds) to the closest UTC day boundary.
///
/// Timestamps up to noon round down to the day's own midnight, anything
/// later rounds up to the next one. Used as the column key when aligning
/// irregularly-timed records onto common day buckets.
pub fn closest_day_start(timestamp: i64) -> i64 {
    let day_start = timestamp - timestamp.rem_euclid(SECONDS_PER_DAY);
    if timestamp - day_start > SECONDS_PER_DAY / 2 {
        day_start + SECONDS_PER_DAY
    } else {
        day_start
    }
}

/// Formats a day-bucket timestamp as `DD/MM/YYYY` (UTC).
pub fn format_day(timestamp: i64) -> String {
    match DateTime::from_timestamp(timestamp, 0) {
        Some(dt) => format!("{:02}/{:02}/{}", dt.day(), dt.month(), dt.year()),
        None => String::new(),
    }
}
