//! Appointment date window

use chrono::{Datelike, Duration, NaiveDateTime, Weekday};

/// Number of calendar days offered for booking, starting tomorrow
pub const APPOINTMENT_WINDOW_DAYS: i64 = 7;

/// Weekday slots in the next [`APPOINTMENT_WINDOW_DAYS`] days.
///
/// Each candidate keeps the time of day of `now`.
pub fn candidate_dates(now: NaiveDateTime) -> Vec<NaiveDateTime> {
    (1..=APPOINTMENT_WINDOW_DAYS)
        .map(|offset| now + Duration::days(offset))
        .filter(|date| !matches!(date.weekday(), Weekday::Sat | Weekday::Sun))
        .collect()
}

/// Whether `date` falls on one of the candidate days (time of day ignored)
pub fn is_candidate_date(now: NaiveDateTime, date: NaiveDateTime) -> bool {
    candidate_dates(now)
        .iter()
        .any(|candidate| candidate.date() == date.date())
}
