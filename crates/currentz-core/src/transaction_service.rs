use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use currentz_domain::{money::round_cents, DateWindow, Occurrence, OneOffTransaction};

use crate::{
    expander::expand_all, merger::merge, storage::FinanceStore, time::Clock, CoreError,
};

pub struct TransactionService;

impl TransactionService {
    /// Records an income of `amount` (a positive magnitude) on `date`.
    pub fn add_income(
        store: &dyn FinanceStore,
        date: NaiveDate,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Result<Uuid, CoreError> {
        let magnitude = positive_magnitude(amount)?;
        Self::add(store, OneOffTransaction::income(date, magnitude, description))
    }

    /// Records an expense of `amount` (a positive magnitude); it is stored negated.
    pub fn add_expense(
        store: &dyn FinanceStore,
        date: NaiveDate,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Result<Uuid, CoreError> {
        let magnitude = positive_magnitude(amount)?;
        Self::add(store, OneOffTransaction::expense(date, magnitude, description))
    }

    fn add(store: &dyn FinanceStore, transaction: OneOffTransaction) -> Result<Uuid, CoreError> {
        let id = transaction.id;
        info!(
            transaction = %id,
            date = %transaction.date,
            amount = %transaction.amount,
            "adding one-off transaction"
        );
        store.add_transaction(transaction)?;
        Ok(id)
    }

    pub fn delete(store: &dyn FinanceStore, id: Uuid) -> Result<(), CoreError> {
        if !store.delete_transaction(id)? {
            return Err(CoreError::TransactionNotFound(id));
        }
        info!(transaction = %id, "deleted one-off transaction");
        Ok(())
    }

    pub fn list(store: &dyn FinanceStore) -> Result<Vec<OneOffTransaction>, CoreError> {
        Ok(store.list_transactions()?)
    }

    /// One-offs dated inside `window` merged with the projections of every active series.
    pub fn between(
        store: &dyn FinanceStore,
        window: DateWindow,
    ) -> Result<Vec<Occurrence>, CoreError> {
        let one_offs = store.list_transactions_between(window)?;
        let series = store.list_active_recurring()?;
        Ok(merge(&one_offs, expand_all(&series, window)))
    }

    /// Activity over `[today, today + days]`.
    pub fn upcoming(
        store: &dyn FinanceStore,
        clock: &dyn Clock,
        days: u32,
    ) -> Result<Vec<Occurrence>, CoreError> {
        let today = clock.today();
        let end = today
            .checked_add_days(chrono::Days::new(u64::from(days)))
            .ok_or_else(|| CoreError::InvalidWindow(format!("{} days past {}", days, today)))?;
        Self::between(store, DateWindow::new(today, end)?)
    }
}

fn positive_magnitude(amount: Decimal) -> Result<Decimal, CoreError> {
    let rounded = round_cents(amount);
    if rounded <= Decimal::ZERO {
        return Err(CoreError::InvalidAmount(format!(
            "amount must be positive, got {}",
            amount
        )));
    }
    Ok(rounded)
}
