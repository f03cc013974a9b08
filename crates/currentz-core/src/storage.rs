use std::io;

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use currentz_domain::{DateWindow, OneOffTransaction, RecurringSeries};

/// Failures raised by a persistence backend. Services pass them through untouched.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("Corrupt record: {0}")]
    Corrupt(String),
    #[error("Store lock poisoned: {0}")]
    Poisoned(&'static str),
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Abstraction over backends holding one-off transactions, recurring series and the
/// starting balance setting.
pub trait FinanceStore: Send + Sync {
    /// One-off transactions dated inside `window`, ordered by date.
    fn list_transactions_between(
        &self,
        window: DateWindow,
    ) -> Result<Vec<OneOffTransaction>, StoreError>;
    /// Every one-off transaction, ordered by date.
    fn list_transactions(&self) -> Result<Vec<OneOffTransaction>, StoreError>;
    fn add_transaction(&self, transaction: OneOffTransaction) -> Result<(), StoreError>;
    /// Returns `false` when no transaction had the id.
    fn delete_transaction(&self, id: Uuid) -> Result<bool, StoreError>;

    fn list_recurring(&self) -> Result<Vec<RecurringSeries>, StoreError>;
    fn list_active_recurring(&self) -> Result<Vec<RecurringSeries>, StoreError>;
    fn add_recurring(&self, series: RecurringSeries) -> Result<(), StoreError>;
    fn delete_recurring(&self, id: Uuid) -> Result<bool, StoreError>;
    fn set_recurring_active(&self, id: Uuid, active: bool) -> Result<bool, StoreError>;

    /// `None` until a balance has been recorded.
    fn starting_balance(&self) -> Result<Option<Decimal>, StoreError>;
    fn set_starting_balance(&self, balance: Decimal) -> Result<(), StoreError>;
}
