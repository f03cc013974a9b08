use thiserror::Error;

use currentz_config::ConfigError;
use currentz_core::{CoreError, StoreError};

/// Top-level error for the [`crate::Currentz`] handle.
#[derive(Debug, Error)]
pub enum CurrentzError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Configuration file error: {0}")]
    Config(#[from] ConfigError),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
