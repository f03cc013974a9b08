use rust_decimal::Decimal;
use serde::{de::Deserializer, Deserialize, Serialize};
use std::{fmt, path::PathBuf};

use crate::ConfigError;

pub const ENV_HOME: &str = "CURRENTZ_HOME";
pub const ENV_FORECAST_DAYS: &str = "CURRENTZ_FORECAST_DAYS";
pub const ENV_UPCOMING_DAYS: &str = "CURRENTZ_UPCOMING_DAYS";
pub const ENV_CAUTION_THRESHOLD: &str = "CURRENTZ_CAUTION_THRESHOLD";

const DATA_DIR_NAME: &str = ".currentz";
/// Upper bound on any configured horizon, roughly ten years.
const MAX_HORIZON_DAYS: u32 = 3660;

/// Forecasting and display preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// BCP 47 style tag such as `en-US` or `pt_PT`; its language picks the separators.
    pub locale: String,
    /// ISO 4217 code, used for the symbol unless `currency_symbol` is set.
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_symbol: Option<String>,
    #[serde(default)]
    pub negative_display: NegativeDisplay,
    #[serde(default = "Config::default_forecast_days")]
    pub forecast_days: u32,
    #[serde(default = "Config::default_upcoming_days")]
    pub upcoming_days: u32,
    /// Balances under this amount raise a caution alert in forecast summaries.
    #[serde(default = "Config::default_caution_threshold")]
    pub caution_threshold: Decimal,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom data directory. Defaults to `~/.currentz`.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            currency_symbol: None,
            negative_display: NegativeDisplay::default(),
            forecast_days: Self::default_forecast_days(),
            upcoming_days: Self::default_upcoming_days(),
            caution_threshold: Self::default_caution_threshold(),
            data_dir: None,
        }
    }
}

impl Config {
    pub fn default_forecast_days() -> u32 {
        90
    }

    pub fn default_upcoming_days() -> u32 {
        30
    }

    pub fn default_caution_threshold() -> Decimal {
        Decimal::new(100_000, 2)
    }

    /// Explicit symbol, else the common symbol for `currency`, else the code itself.
    pub fn resolve_currency_symbol(&self) -> String {
        if let Some(symbol) = &self.currency_symbol {
            return symbol.clone();
        }
        let code = self.currency.trim().to_ascii_uppercase();
        let symbol = match code.as_str() {
            "USD" | "CAD" | "AUD" | "NZD" | "MXN" => "$",
            "EUR" => "€",
            "GBP" => "£",
            "JPY" | "CNY" => "¥",
            "BRL" => "R$",
            "CHF" => "CHF ",
            "INR" => "₹",
            _ => return format!("{} ", code),
        };
        symbol.to_string()
    }

    /// `(decimal, grouping)` separators for the configured locale's language.
    pub fn number_separators(&self) -> (char, char) {
        let language = self
            .locale
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match language.as_str() {
            "de" | "es" | "it" | "nl" | "pt" | "da" | "id" | "tr" => (',', '.'),
            "fr" | "pl" | "ru" | "sv" | "nb" | "fi" | "cs" | "uk" => (',', ' '),
            _ => ('.', ','),
        }
    }

    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(path) = &self.data_dir {
            return path.clone();
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DATA_DIR_NAME)
    }

    /// Applies `CURRENTZ_*` variables from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from any key lookup; unset or blank keys are left alone.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        if let Some(home) = read(ENV_HOME) {
            self.data_dir = Some(PathBuf::from(home));
        }
        if let Some(raw) = read(ENV_FORECAST_DAYS) {
            self.forecast_days = parse_horizon(ENV_FORECAST_DAYS, raw)?;
        }
        if let Some(raw) = read(ENV_UPCOMING_DAYS) {
            self.upcoming_days = parse_horizon(ENV_UPCOMING_DAYS, raw)?;
        }
        if let Some(raw) = read(ENV_CAUTION_THRESHOLD) {
            self.caution_threshold = raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_CAUTION_THRESHOLD,
                value: raw.clone(),
            })?;
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_horizon("forecast_days", self.forecast_days)?;
        check_horizon("upcoming_days", self.upcoming_days)?;
        if self.caution_threshold.is_sign_negative() {
            return Err(ConfigError::InvalidValue {
                key: "caution_threshold",
                value: self.caution_threshold.to_string(),
            });
        }
        Ok(())
    }
}

fn parse_horizon(key: &'static str, raw: String) -> Result<u32, ConfigError> {
    raw.parse()
        .map_err(|_| ConfigError::InvalidValue { key, value: raw })
}

fn check_horizon(key: &'static str, days: u32) -> Result<(), ConfigError> {
    if days == 0 || days > MAX_HORIZON_DAYS {
        return Err(ConfigError::InvalidValue {
            key,
            value: days.to_string(),
        });
    }
    Ok(())
}

/// How negative amounts are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NegativeDisplay {
    #[default]
    Sign,
    Parentheses,
}

impl NegativeDisplay {
    fn from_value(value: Option<String>) -> Self {
        value
            .map(|v| NegativeDisplay::parse(v.trim()))
            .unwrap_or_default()
    }

    /// Lenient parse; anything unrecognised falls back to a leading sign.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "parentheses" | "parens" | "accounting" => NegativeDisplay::Parentheses,
            _ => NegativeDisplay::Sign,
        }
    }
}

impl fmt::Display for NegativeDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NegativeDisplay::Sign => "sign",
            NegativeDisplay::Parentheses => "parentheses",
        };
        f.write_str(label)
    }
}

impl<'de> Deserialize<'de> for NegativeDisplay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(NegativeDisplay::from_value(value))
    }
}
