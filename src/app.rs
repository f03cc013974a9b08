//! Application handle tying configuration, storage and time together.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;

use currentz_config::{Config, ConfigManager, NegativeDisplay};
use currentz_core::{public_api, Clock, FinanceStore};
use currentz_domain::{
    money::{format_amount, AmountFormat, NegativeStyle},
    ForecastReport, Occurrence,
};
use currentz_storage_json::JsonFinanceStore;

use crate::{clock::SystemClock, CurrentzError};

pub struct Currentz {
    config: Config,
    store: Arc<dyn FinanceStore>,
    clock: Arc<dyn Clock>,
}

impl Currentz {
    /// Loads `config.json` from the data directory (honouring `CURRENTZ_*` variables)
    /// and opens the JSON store next to it.
    pub fn load() -> Result<Self, CurrentzError> {
        let mut bootstrap = Config::default();
        bootstrap.apply_env_overrides()?;
        let manager = ConfigManager::with_base_dir(bootstrap.resolve_data_dir())?;
        Self::open(manager.load_with_env()?)
    }

    /// Opens the JSON store under `config`'s data directory with the system clock.
    pub fn open(config: Config) -> Result<Self, CurrentzError> {
        let data_dir = config.resolve_data_dir();
        let store = JsonFinanceStore::in_dir(&data_dir)?;
        info!(path = %store.path().display(), "opened finance store");
        Ok(Self::with_parts(
            config,
            Arc::new(store),
            Arc::new(SystemClock),
        ))
    }

    pub fn with_parts(
        config: Config,
        store: Arc<dyn FinanceStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            store,
            clock,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &dyn FinanceStore {
        self.store.as_ref()
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Forecast over the configured horizon, summarised against the caution threshold.
    pub fn forecast(&self) -> Result<ForecastReport, CurrentzError> {
        Ok(public_api::api_forecast_summary(
            self.store(),
            self.clock(),
            self.config.forecast_days,
            self.config.caution_threshold,
        )?)
    }

    /// Activity over the configured upcoming horizon.
    pub fn upcoming(&self) -> Result<Vec<Occurrence>, CurrentzError> {
        Ok(public_api::api_upcoming_transactions(
            self.store(),
            self.clock(),
            self.config.upcoming_days,
        )?)
    }

    /// Symbol from the configured currency and separators from the locale.
    pub fn amount_format(&self) -> AmountFormat {
        let (decimal_separator, grouping_separator) = self.config.number_separators();
        AmountFormat {
            symbol: self.config.resolve_currency_symbol(),
            decimal_separator,
            grouping_separator,
            negative_style: match self.config.negative_display {
                NegativeDisplay::Sign => NegativeStyle::Sign,
                NegativeDisplay::Parentheses => NegativeStyle::Parentheses,
            },
        }
    }

    pub fn format_amount(&self, amount: Decimal) -> String {
        format_amount(amount, &self.amount_format())
    }
}
