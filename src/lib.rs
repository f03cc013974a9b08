#![doc(test(attr(deny(warnings))))]

//! Currentz forecasts a cash balance day by day from one-off transactions and
//! recurring income and expense series.
//!
//! The heavy lifting lives in the workspace crates; this facade wires a
//! configuration, a JSON-backed store and a clock into one [`Currentz`] handle.

pub mod app;
pub mod clock;
pub mod error;
pub mod utils;

pub use currentz_config as config;
pub use currentz_core as engine;
pub use currentz_domain as domain;
pub use currentz_storage_json as storage;

pub use app::Currentz;
pub use clock::SystemClock;
pub use error::CurrentzError;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Currentz tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
