//! Wall-clock helpers shared by the schedule engine.
//!
//! Block times are school-local `NaiveTime` values. Durations are measured in
//! whole minutes and curriculum quotas in pedagogical hours of 45 minutes.

use chrono::{NaiveTime, Timelike};

/// Minutes in one pedagogical hour.
pub const PEDAGOGICAL_HOUR_MINUTES: i64 = 45;

/// Parse a wall-clock time written as `HH:MM` or `HH:MM:SS`.
pub fn parse_clock_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

/// Format a wall-clock time as `HH:MM`.
pub fn format_clock_time(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// Whole minutes from `start` to `end` (negative when `end` precedes `start`).
pub fn minutes_between(start: NaiveTime, end: NaiveTime) -> i64 {
    (end - start).num_minutes()
}

/// Half-open overlap test for `[a_start, a_end)` and `[b_start, b_end)`.
///
/// Back-to-back blocks (one ends exactly when the other starts) do not overlap.
pub fn ranges_overlap(
    a_start: NaiveTime,
    a_end: NaiveTime,
    b_start: NaiveTime,
    b_end: NaiveTime,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Convert a pedagogical-hour quota into minutes.
pub fn quota_minutes(pedagogical_hours: u32) -> i64 {
    i64::from(pedagogical_hours) * PEDAGOGICAL_HOUR_MINUTES
}

/// Round assigned minutes up to whole pedagogical hours.
pub fn pedagogical_hours_ceil(minutes: i64) -> i64 {
    if minutes <= 0 {
        return 0;
    }
    (minutes + PEDAGOGICAL_HOUR_MINUTES - 1) / PEDAGOGICAL_HOUR_MINUTES
}

#[cfg(test)]
#[path = "time_tests.rs"]
mod time_tests;
