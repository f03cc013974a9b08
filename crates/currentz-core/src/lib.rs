//! currentz-core
//!
//! Recurrence expansion, merging, forecast accumulation and the services built on them.
//! Depends on currentz-domain. No terminal I/O; persistence sits behind [`storage::FinanceStore`].

pub mod balance_service;
pub mod error;
pub mod expander;
pub mod forecast;
pub mod forecast_service;
pub mod lowest_point;
pub mod memory_store;
pub mod merger;
pub mod public_api;
pub mod recurrence_service;
pub mod storage;
pub mod time;
pub mod transaction_service;

pub use balance_service::*;
pub use error::CoreError;
pub use forecast_service::*;
pub use memory_store::MemoryStore;
pub use recurrence_service::*;
pub use storage::{FinanceStore, StoreError};
pub use time::{Clock, FixedClock};
pub use transaction_service::*;

#[cfg(test)]
mod tests;
