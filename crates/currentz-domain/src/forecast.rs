//! Forecast output types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::DateWindow;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Net change and closing balance for one calendar day.
pub struct ForecastDay {
    pub date: NaiveDate,
    pub change: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Leftmost day holding the minimum balance, with its offset into the forecast.
pub struct LowestPoint {
    pub day: ForecastDay,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "level", rename_all = "snake_case")]
pub enum BalanceAlert {
    /// The balance goes below zero by `shortfall`.
    Negative { shortfall: Decimal },
    /// The balance stays non-negative but dips under `threshold`.
    BelowThreshold { threshold: Decimal },
    Healthy,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastSummary {
    pub starting_balance: Decimal,
    pub ending_balance: Decimal,
    pub net_change: Decimal,
    pub lowest: LowestPoint,
    pub negative_days: usize,
    pub alert: BalanceAlert,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// Forecast days together with their summary.
pub struct ForecastReport {
    pub window: DateWindow,
    pub days: Vec<ForecastDay>,
    pub summary: ForecastSummary,
}
