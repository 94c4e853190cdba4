//! Inactivity decay
//!
//! Whole-day arithmetic for the missed-study penalty.

use chrono::{DateTime, NaiveDate, Utc};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Instant a study date counts from (UTC midnight)
pub fn activity_instant(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// Whole 24h periods between `last` and `now`, floored.
/// Negative when `last` lies in the future.
pub fn days_elapsed(last: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - last).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// Result of applying the penalty once
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenaltyOutcome {
    pub days_missed: u32,
    /// Nominal deduction, may exceed the XP actually held
    pub deducted: f64,
}

/// Compute the penalty for `xp` held since `last`, without applying it
pub fn compute_penalty(
    last: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    xp: f64,
    penalty_per_day: f64,
) -> Option<PenaltyOutcome> {
    let last = last?;
    if xp <= 0.0 {
        return None;
    }
    let days = days_elapsed(last, now);
    if days < 1 {
        return None;
    }
    let days_missed = u32::try_from(days).unwrap_or(u32::MAX);
    Some(PenaltyOutcome {
        days_missed,
        deducted: penalty_per_day * days_missed as f64,
    })
}
