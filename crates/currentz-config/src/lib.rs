//! currentz-config
//!
//! User preferences for forecasting and display.
//! Owns the Config data structure, environment overrides and disk persistence.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::{Config, NegativeDisplay};
