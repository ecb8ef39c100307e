//! Goal arithmetic
//!
//! Days remaining and the daily amount to save are derived at render time
//! and never stored.

use crate::money::types::Goal;
use chrono::{DateTime, Local, TimeZone};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Whole days left until the goal date, rounded up
///
/// The goal date counts from local midnight. Zero or negative once the
/// date has been reached.
///
/// Reading the date as UTC midnight instead gives a count one off for part
/// of the day in zones away from UTC; local midnight is used throughout.
pub fn days_remaining<Tz: TimeZone>(goal: &Goal, now: &DateTime<Tz>) -> i64 {
    let deadline_ms = goal
        .date
        .and_hms_opt(0, 0, 0)
        .and_then(|dt| Local.from_local_datetime(&dt).earliest())
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| goal.date.and_time(Default::default()).and_utc().timestamp_millis());

    let diff = deadline_ms - now.timestamp_millis();
    diff.div_euclid(DAY_MS) + i64::from(diff.rem_euclid(DAY_MS) != 0)
}

/// Amount to put aside per day to reach `target`
///
/// With no days left the whole target is due.
pub fn daily_need(target: f64, days_remaining: i64) -> f64 {
    if days_remaining > 0 {
        target / days_remaining as f64
    } else {
        target
    }
}
