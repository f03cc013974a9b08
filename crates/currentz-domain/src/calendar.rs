//! Calendar arithmetic on timezone-less dates.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year`; `0` for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Returns `day` of the given month, clamped to the month's last day.
pub fn date_at_day_or_month_end(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let last = days_in_month(year, month);
    NaiveDate::from_ymd_opt(year, month, day.clamp(1, last.max(1)))
}

pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

/// Moves `date` forward (0 to 6 days) until it falls on `target`.
pub fn snap_to_weekday(date: NaiveDate, target: Weekday) -> NaiveDate {
    date + Duration::days(days_until(date.weekday(), target))
}

pub fn days_until(from: Weekday, to: Weekday) -> i64 {
    let from = from.num_days_from_sunday() as i64;
    let to = to.num_days_from_sunday() as i64;
    (to - from).rem_euclid(7)
}

/// Maps `0..=6` (Sunday first) to a weekday.
pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}
