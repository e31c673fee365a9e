//! Calendar helpers for weekly statistics.

use chrono::{Datelike, Days, NaiveDate};

/// Number of Sundays reported by the dashboard series.
pub const SUNDAY_WINDOW: usize = 4;

/// The most recent Sunday on or before `today`.
pub fn latest_sunday(today: NaiveDate) -> NaiveDate {
    let back = today.weekday().num_days_from_sunday() as u64;
    today - Days::new(back)
}

/// The four most recent Sundays, oldest first. Includes `today` when it is a Sunday.
pub fn last_four_sundays(today: NaiveDate) -> [NaiveDate; SUNDAY_WINDOW] {
    let latest = latest_sunday(today);
    std::array::from_fn(|i| latest - Days::new(7 * (SUNDAY_WINDOW - 1 - i) as u64))
}

/// Short chart label, `M/D` without zero padding.
pub fn month_day_label(date: NaiveDate) -> String {
    format!("{}/{}", date.month(), date.day())
}
