//! Initial-delay computation for daily schedules.

use chrono::{NaiveDateTime, NaiveTime, TimeDelta};
use std::time::Duration;

/// Time from `now` until the next occurrence of `hour:min` local time.
///
/// When `now` is exactly at or past today's target the next day's occurrence
/// is used, so the result is always strictly positive. Out-of-range inputs
/// are clamped to 23:59.
///
/// Arithmetic is on naive local time: across a DST transition the real delay
/// differs from the result by the size of the shift.
#[must_use]
pub fn delay_until_next(now: NaiveDateTime, hour: u8, min: u8) -> Duration {
    let target_time =
        NaiveTime::from_hms_opt(u32::from(hour.min(23)), u32::from(min.min(59)), 0)
            .unwrap_or(NaiveTime::MIN);

    let mut target = now.date().and_time(target_time);
    if target <= now {
        target += TimeDelta::days(1);
    }

    (target - now).to_std().unwrap_or(Duration::ZERO)
}
