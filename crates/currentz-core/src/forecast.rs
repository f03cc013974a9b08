//! Daily balance accumulation over a forecast window.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use currentz_domain::{
    BalanceAlert, DateWindow, ForecastDay, ForecastSummary, OneOffTransaction, RecurringSeries,
};

use crate::{expander::expand_all, lowest_point::find_lowest, merger::merge, CoreError};

/// Projects one [`ForecastDay`] per calendar day of
/// `[window_start, window_start + num_days - 1]`.
///
/// Active series are expanded over the window and merged with `one_offs`; one-offs
/// dated outside the window are ignored. Days without activity carry a zero change.
/// `num_days == 0` yields an empty forecast.
pub fn forecast(
    starting_balance: Decimal,
    window_start: NaiveDate,
    num_days: u32,
    one_offs: &[OneOffTransaction],
    series: &[RecurringSeries],
) -> Result<Vec<ForecastDay>, CoreError> {
    if num_days == 0 {
        return Ok(Vec::new());
    }
    let window = DateWindow::from_days(window_start, num_days)?;
    forecast_window(starting_balance, window, one_offs, series)
}

pub fn forecast_window(
    starting_balance: Decimal,
    window: DateWindow,
    one_offs: &[OneOffTransaction],
    series: &[RecurringSeries],
) -> Result<Vec<ForecastDay>, CoreError> {
    let merged = merge(one_offs, expand_all(series, window));

    let mut daily: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for occurrence in merged.iter().filter(|occ| window.contains(occ.date)) {
        let entry = daily.entry(occurrence.date).or_insert(Decimal::ZERO);
        *entry = entry
            .checked_add(occurrence.amount)
            .ok_or_else(|| overflow(occurrence.date))?;
    }

    let mut balance = starting_balance;
    let mut days = Vec::with_capacity(window.len_days() as usize);
    for date in window.days() {
        let change = daily.get(&date).copied().unwrap_or(Decimal::ZERO);
        balance = balance.checked_add(change).ok_or_else(|| overflow(date))?;
        days.push(ForecastDay {
            date,
            change,
            balance,
        });
    }

    debug!(
        %window,
        occurrences = merged.len(),
        active_days = daily.len(),
        "forecast computed"
    );
    Ok(days)
}

/// Summarises a forecast against a caution threshold.
pub fn summarize(
    days: &[ForecastDay],
    starting_balance: Decimal,
    caution_threshold: Decimal,
) -> Result<ForecastSummary, CoreError> {
    let lowest = find_lowest(days)?;
    let ending_balance = days
        .last()
        .map(|day| day.balance)
        .unwrap_or(starting_balance);
    let negative_days = days
        .iter()
        .filter(|day| day.balance < Decimal::ZERO)
        .count();
    let alert = if lowest.day.balance < Decimal::ZERO {
        BalanceAlert::Negative {
            shortfall: -lowest.day.balance,
        }
    } else if lowest.day.balance < caution_threshold {
        BalanceAlert::BelowThreshold {
            threshold: caution_threshold,
        }
    } else {
        BalanceAlert::Healthy
    };
    Ok(ForecastSummary {
        starting_balance,
        ending_balance,
        net_change: ending_balance - starting_balance,
        lowest,
        negative_days,
        alert,
    })
}

fn overflow(date: NaiveDate) -> CoreError {
    CoreError::InvalidAmount(format!("balance overflow on {}", date))
}
