//! Stable, public-facing helpers that wrap the internal service layer.
//!
//! Presentation layers (HTTP handlers, CLIs, reports) can rely on these without
//! depending on the whole service surface.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use currentz_domain::{DateWindow, ForecastDay, ForecastReport, LowestPoint, Occurrence};

use crate::{
    balance_service::BalanceService, forecast_service::ForecastService,
    lowest_point::find_lowest, recurrence_service::RecurrenceService,
    recurrence_service::RecurringInput, storage::FinanceStore, time::Clock,
    transaction_service::TransactionService, CoreError,
};

/// Forecasts `num_days` days starting at `window_start`.
pub fn api_compute_forecast(
    store: &dyn FinanceStore,
    starting_balance: Decimal,
    window_start: NaiveDate,
    num_days: u32,
) -> Result<Vec<ForecastDay>, CoreError> {
    ForecastService::compute(store, starting_balance, window_start, num_days)
}

/// Projected occurrences of all active series inside `[window_start, window_end]`.
pub fn api_expand_recurring_between(
    store: &dyn FinanceStore,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Result<Vec<Occurrence>, CoreError> {
    RecurrenceService::expand_between(store, window_start, window_end)
}

pub fn api_find_lowest_point(days: &[ForecastDay]) -> Result<LowestPoint, CoreError> {
    find_lowest(days)
}

pub fn api_starting_balance(store: &dyn FinanceStore) -> Result<Decimal, CoreError> {
    BalanceService::starting_balance(store)
}

/// Stores the balance rounded to cents and returns the stored value.
pub fn api_set_starting_balance(
    store: &dyn FinanceStore,
    balance: Decimal,
) -> Result<Decimal, CoreError> {
    BalanceService::set_starting_balance(store, balance)
}

pub fn api_add_income(
    store: &dyn FinanceStore,
    date: NaiveDate,
    amount: Decimal,
    description: impl Into<String>,
) -> Result<Uuid, CoreError> {
    TransactionService::add_income(store, date, amount, description)
}

pub fn api_add_expense(
    store: &dyn FinanceStore,
    date: NaiveDate,
    amount: Decimal,
    description: impl Into<String>,
) -> Result<Uuid, CoreError> {
    TransactionService::add_expense(store, date, amount, description)
}

pub fn api_delete_transaction(store: &dyn FinanceStore, id: Uuid) -> Result<(), CoreError> {
    TransactionService::delete(store, id)
}

pub fn api_create_recurring(
    store: &dyn FinanceStore,
    input: RecurringInput,
) -> Result<Uuid, CoreError> {
    RecurrenceService::create(store, input)
}

pub fn api_set_recurring_active(
    store: &dyn FinanceStore,
    id: Uuid,
    active: bool,
) -> Result<(), CoreError> {
    RecurrenceService::set_active(store, id, active)
}

pub fn api_delete_recurring(store: &dyn FinanceStore, id: Uuid) -> Result<(), CoreError> {
    RecurrenceService::delete(store, id)
}

/// One-offs in `[start, end]` merged with the projections of active series.
pub fn api_transactions_between(
    store: &dyn FinanceStore,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<Occurrence>, CoreError> {
    TransactionService::between(store, DateWindow::new(start, end)?)
}

pub fn api_upcoming_transactions(
    store: &dyn FinanceStore,
    clock: &dyn Clock,
    days: u32,
) -> Result<Vec<Occurrence>, CoreError> {
    TransactionService::upcoming(store, clock, days)
}

pub fn api_forecast_from_today(
    store: &dyn FinanceStore,
    clock: &dyn Clock,
    days: u32,
) -> Result<Vec<ForecastDay>, CoreError> {
    ForecastService::from_today(store, clock, days)
}

pub fn api_forecast_summary(
    store: &dyn FinanceStore,
    clock: &dyn Clock,
    days: u32,
    caution_threshold: Decimal,
) -> Result<ForecastReport, CoreError> {
    ForecastService::report(store, clock, days, caution_threshold)
}
