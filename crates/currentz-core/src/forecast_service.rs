//! Forecasting over store-backed data.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;

use currentz_domain::{DateWindow, ForecastDay, ForecastReport};

use crate::{
    balance_service::BalanceService,
    forecast::{forecast_window, summarize},
    storage::FinanceStore,
    time::Clock,
    CoreError,
};

pub struct ForecastService;

impl ForecastService {
    /// Forecasts `num_days` days from `window_start` using the store's one-offs and
    /// active series. All reads happen before computation starts.
    pub fn compute(
        store: &dyn FinanceStore,
        starting_balance: Decimal,
        window_start: NaiveDate,
        num_days: u32,
    ) -> Result<Vec<ForecastDay>, CoreError> {
        if num_days == 0 {
            return Ok(Vec::new());
        }
        let window = DateWindow::from_days(window_start, num_days)?;
        Self::compute_window(store, starting_balance, window)
    }

    fn compute_window(
        store: &dyn FinanceStore,
        starting_balance: Decimal,
        window: DateWindow,
    ) -> Result<Vec<ForecastDay>, CoreError> {
        let one_offs = store.list_transactions_between(window)?;
        let series = store.list_active_recurring()?;
        forecast_window(starting_balance, window, &one_offs, &series)
    }

    /// Forecast starting today from the stored starting balance.
    pub fn from_today(
        store: &dyn FinanceStore,
        clock: &dyn Clock,
        days: u32,
    ) -> Result<Vec<ForecastDay>, CoreError> {
        let balance = BalanceService::starting_balance(store)?;
        Self::compute(store, balance, clock.today(), days)
    }

    /// Forecast from today plus its summary against `caution_threshold`.
    pub fn report(
        store: &dyn FinanceStore,
        clock: &dyn Clock,
        days: u32,
        caution_threshold: Decimal,
    ) -> Result<ForecastReport, CoreError> {
        let window = DateWindow::from_days(clock.today(), days)?;
        let balance = BalanceService::starting_balance(store)?;
        let days = Self::compute_window(store, balance, window)?;
        let summary = summarize(&days, balance, caution_threshold)?;
        info!(
            %window,
            ending = %summary.ending_balance,
            lowest = %summary.lowest.day.balance,
            negative_days = summary.negative_days,
            "forecast report built"
        );
        Ok(ForecastReport {
            window,
            days,
            summary,
        })
    }
}
