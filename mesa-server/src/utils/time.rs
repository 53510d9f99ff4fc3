//! Booking time-window checks
//!
//! "Today" and "now" are taken from the restaurant's business timezone
//! (`DateTime<Tz>`), never from a UTC day boundary, so bookings entered
//! around midnight are not rejected by a timezone off-by-one. All functions
//! are pure; callers inject `now`.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// Reject dates strictly before the local calendar date of `now`.
pub fn validate_future_date(date: NaiveDate, now: DateTime<Tz>) -> AppResult<()> {
    if date < now.date_naive() {
        return Err(AppError::past_date(date.to_string()));
    }
    Ok(())
}

/// Reject slots in the past.
///
/// The date must not be before the local today. For a booking today with a
/// time supplied, the time must be strictly after the current local time —
/// a booking for the exact current minute is already missed.
pub fn validate_future_slot(
    date: NaiveDate,
    time: Option<NaiveTime>,
    now: DateTime<Tz>,
) -> AppResult<()> {
    validate_future_date(date, now)?;
    if date == now.date_naive()
        && let Some(time) = time
        && time <= now.time()
    {
        return Err(AppError::past_time(time.format("%H:%M").to_string()));
    }
    Ok(())
}

/// Closed date window `[today, today + days]` in the business timezone.
pub fn upcoming_window(now: DateTime<Tz>, days: u32) -> (NaiveDate, NaiveDate) {
    let today = now.date_naive();
    (today, today + Duration::days(days as i64))
}
