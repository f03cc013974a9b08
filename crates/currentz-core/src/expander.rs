//! Expansion of recurring series into concrete dated occurrences.
//!
//! Every series defines a fixed, window-independent set of candidate dates. A window
//! only selects which candidates are emitted, so expanding two adjacent windows yields
//! exactly the occurrences of expanding their union.

use chrono::{Datelike, Days, NaiveDate};
use tracing::debug;

use currentz_domain::{calendar, DateWindow, Interval, Occurrence, RecurringSeries};

const WEEKLY_STEP_DAYS: u64 = 7;
const BIWEEKLY_STEP_DAYS: u64 = 14;

/// Expands `series` over `[window_start, window_end]`, ascending by date.
///
/// Nothing is emitted outside the intersection of the window and the series'
/// own `[start_date, end_date]` range. Expansion never consults a clock.
pub fn expand(
    series: &RecurringSeries,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Vec<Occurrence> {
    let Some(range) = effective_range(series, window_start, window_end) else {
        return Vec::new();
    };
    let dates = match series.interval {
        Interval::Weekly => weekly_dates(series, range, WEEKLY_STEP_DAYS),
        Interval::Biweekly => weekly_dates(series, range, BIWEEKLY_STEP_DAYS),
        Interval::Monthly => monthly_dates(series, range),
        Interval::Yearly => yearly_dates(series, range),
    };
    debug!(
        series = %series.id,
        interval = %series.interval,
        %range,
        occurrences = dates.len(),
        "expanded recurring series"
    );
    dates
        .into_iter()
        .map(|date| Occurrence::projected(series, date))
        .collect()
}

pub fn expand_window(series: &RecurringSeries, window: DateWindow) -> Vec<Occurrence> {
    expand(series, window.start, window.end)
}

/// Expands every active series over `window`; inactive series are skipped.
pub fn expand_all(series: &[RecurringSeries], window: DateWindow) -> Vec<Occurrence> {
    let mut occurrences: Vec<Occurrence> = series
        .iter()
        .filter(|series| series.is_active())
        .flat_map(|series| expand_window(series, window))
        .collect();
    occurrences.sort_by_key(|occurrence| occurrence.date);
    occurrences
}

/// The window clipped to the series' own `[start_date, end_date]`, or `None` when
/// they do not overlap.
fn effective_range(
    series: &RecurringSeries,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Option<DateWindow> {
    let window = DateWindow::new(window_start, window_end).ok()?;
    let lifetime = DateWindow::new(
        series.start_date,
        series.end_date.unwrap_or(NaiveDate::MAX),
    )
    .ok()?;
    window.intersect(&lifetime)
}

/// Candidates are `anchor + k * step`, each snapped forward to the target weekday.
///
/// Every candidate shares the anchor's weekday, so snapping shifts all of them by the
/// same offset and the cadence stays measured from the anchor.
fn weekly_dates(series: &RecurringSeries, range: DateWindow, step: u64) -> Vec<NaiveDate> {
    let first = calendar::snap_to_weekday(series.start_date, series.target_weekday());
    let lag = (range.start - first).num_days();
    let skipped = if lag > 0 {
        (lag as u64).div_ceil(step)
    } else {
        0
    };

    let mut dates = Vec::new();
    let mut next = first.checked_add_days(Days::new(skipped * step));
    while let Some(date) = next {
        if date > range.end {
            break;
        }
        dates.push(date);
        next = date.checked_add_days(Days::new(step));
    }
    dates
}

/// One candidate per calendar month, clamped to the month's last day.
fn monthly_dates(series: &RecurringSeries, range: DateWindow) -> Vec<NaiveDate> {
    let anchor = series.start_date;
    let day = series.target_day_of_month();
    let (mut year, mut month) = (range.start.year(), range.start.month());

    let mut dates = Vec::new();
    while let Some(candidate) = calendar::date_at_day_or_month_end(year, month, day) {
        if candidate > range.end {
            break;
        }
        if candidate >= range.start && candidate >= anchor {
            dates.push(candidate);
        }
        (year, month) = calendar::next_month(year, month);
    }
    dates
}

/// One candidate per year in the anchor's month, clamped like the monthly rule.
fn yearly_dates(series: &RecurringSeries, range: DateWindow) -> Vec<NaiveDate> {
    let anchor = series.start_date;
    let month = anchor.month();
    let day = series.target_day_of_month();
    let mut year = range.start.year();

    let mut dates = Vec::new();
    while let Some(candidate) = calendar::date_at_day_or_month_end(year, month, day) {
        if candidate > range.end {
            break;
        }
        if candidate >= range.start && candidate >= anchor {
            dates.push(candidate);
        }
        year += 1;
    }
    dates
}
