//! In-process [`FinanceStore`] used by embedders and tests.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use rust_decimal::Decimal;
use uuid::Uuid;

use currentz_domain::{DateWindow, OneOffTransaction, RecurringSeries};

use crate::storage::{FinanceStore, StoreError};

#[derive(Debug, Default)]
struct MemoryState {
    transactions: Vec<OneOffTransaction>,
    recurring: Vec<RecurringSeries>,
    starting_balance: Option<Decimal>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryState>, StoreError> {
        self.state
            .read()
            .map_err(|_| StoreError::Poisoned("memory store"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryState>, StoreError> {
        self.state
            .write()
            .map_err(|_| StoreError::Poisoned("memory store"))
    }
}

fn sorted_by_date(mut transactions: Vec<OneOffTransaction>) -> Vec<OneOffTransaction> {
    transactions.sort_by_key(|txn| txn.date);
    transactions
}

impl FinanceStore for MemoryStore {
    fn list_transactions_between(
        &self,
        window: DateWindow,
    ) -> Result<Vec<OneOffTransaction>, StoreError> {
        let state = self.read()?;
        let matching = state
            .transactions
            .iter()
            .filter(|txn| window.contains(txn.date))
            .cloned()
            .collect();
        Ok(sorted_by_date(matching))
    }

    fn list_transactions(&self) -> Result<Vec<OneOffTransaction>, StoreError> {
        Ok(sorted_by_date(self.read()?.transactions.clone()))
    }

    fn add_transaction(&self, transaction: OneOffTransaction) -> Result<(), StoreError> {
        self.write()?.transactions.push(transaction);
        Ok(())
    }

    fn delete_transaction(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut state = self.write()?;
        let before = state.transactions.len();
        state.transactions.retain(|txn| txn.id != id);
        Ok(state.transactions.len() != before)
    }

    fn list_recurring(&self) -> Result<Vec<RecurringSeries>, StoreError> {
        Ok(self.read()?.recurring.clone())
    }

    fn list_active_recurring(&self) -> Result<Vec<RecurringSeries>, StoreError> {
        Ok(self
            .read()?
            .recurring
            .iter()
            .filter(|series| series.active)
            .cloned()
            .collect())
    }

    fn add_recurring(&self, series: RecurringSeries) -> Result<(), StoreError> {
        self.write()?.recurring.push(series);
        Ok(())
    }

    fn delete_recurring(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut state = self.write()?;
        let before = state.recurring.len();
        state.recurring.retain(|series| series.id != id);
        Ok(state.recurring.len() != before)
    }

    fn set_recurring_active(&self, id: Uuid, active: bool) -> Result<bool, StoreError> {
        let mut state = self.write()?;
        match state.recurring.iter_mut().find(|series| series.id == id) {
            Some(series) => {
                series.active = active;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn starting_balance(&self) -> Result<Option<Decimal>, StoreError> {
        Ok(self.read()?.starting_balance)
    }

    fn set_starting_balance(&self, balance: Decimal) -> Result<(), StoreError> {
        self.write()?.starting_balance = Some(balance);
        Ok(())
    }
}
