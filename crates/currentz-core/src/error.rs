use thiserror::Error;
use uuid::Uuid;

use currentz_domain::{money::MoneyError, DateWindowError, SeriesError};

use crate::storage::StoreError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error(transparent)]
    DataSource(#[from] StoreError),
    #[error("Empty input: {0}")]
    EmptyInput(String),
    #[error("Invalid window: {0}")]
    InvalidWindow(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),
    #[error("Recurring series not found: {0}")]
    SeriesNotFound(Uuid),
}

impl From<SeriesError> for CoreError {
    fn from(err: SeriesError) -> Self {
        CoreError::Configuration(err.to_string())
    }
}

impl From<DateWindowError> for CoreError {
    fn from(err: DateWindowError) -> Self {
        CoreError::InvalidWindow(err.to_string())
    }
}

impl From<MoneyError> for CoreError {
    fn from(err: MoneyError) -> Self {
        CoreError::InvalidAmount(err.to_string())
    }
}
