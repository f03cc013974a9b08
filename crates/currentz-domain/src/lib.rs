//! currentz-domain
//!
//! Pure domain models (recurring series, one-off transactions, occurrences, forecast days).
//! No I/O, no storage, no clock. Only data types, calendar and money helpers.

pub mod calendar;
pub mod forecast;
pub mod money;
pub mod occurrence;
pub mod recurring;
pub mod transaction;
pub mod window;

pub use forecast::*;
pub use occurrence::*;
pub use recurring::*;
pub use transaction::*;
pub use window::*;

pub use rust_decimal::Decimal;
