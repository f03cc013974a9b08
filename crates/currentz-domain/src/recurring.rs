//! Recurring series definitions and their creation-time validation.

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
/// Cadence of a recurring series.
pub enum Interval {
    Weekly,
    Biweekly,
    Monthly,
    Yearly,
}

impl Interval {
    pub fn as_str(self) -> &'static str {
        match self {
            Interval::Weekly => "weekly",
            Interval::Biweekly => "biweekly",
            Interval::Monthly => "monthly",
            Interval::Yearly => "yearly",
        }
    }
}

impl FromStr for Interval {
    type Err = SeriesError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(Interval::Weekly),
            "biweekly" => Ok(Interval::Biweekly),
            "monthly" => Ok(Interval::Monthly),
            "yearly" => Ok(Interval::Yearly),
            _ => Err(SeriesError::InvalidInterval(value.to_string())),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
/// Whether money flows into or out of the account.
pub enum Direction {
    Income,
    Expense,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Income => "income",
            Direction::Expense => "expense",
        }
    }

    /// Applies the direction's sign to a non-negative magnitude.
    pub fn apply(self, magnitude: Decimal) -> Decimal {
        match self {
            Direction::Income => magnitude,
            Direction::Expense => -magnitude,
        }
    }

    pub fn of_amount(amount: Decimal) -> Self {
        if amount.is_sign_negative() && !amount.is_zero() {
            Direction::Expense
        } else {
            Direction::Income
        }
    }
}

impl FromStr for Direction {
    type Err = SeriesError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Direction::Income),
            "expense" => Ok(Direction::Expense),
            _ => Err(SeriesError::InvalidDirection(value.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Typed creation payload for [`RecurringSeries::new`].
pub struct RecurringDraft {
    pub description: String,
    pub direction: Direction,
    pub magnitude: Decimal,
    pub start_date: NaiveDate,
    pub interval: Interval,
    pub day_of_week: Option<u8>,
    pub day_of_month: Option<u8>,
    pub end_date: Option<NaiveDate>,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// A validated recurring income or expense.
pub struct RecurringSeries {
    pub id: Uuid,
    pub description: String,
    pub direction: Direction,
    pub magnitude: Decimal,
    pub start_date: NaiveDate,
    pub interval: Interval,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub active: bool,
}

impl RecurringSeries {
    pub fn new(draft: RecurringDraft) -> Result<Self, SeriesError> {
        Self::with_id(Uuid::new_v4(), draft)
    }

    pub fn with_id(id: Uuid, draft: RecurringDraft) -> Result<Self, SeriesError> {
        let series = Self {
            id,
            description: draft.description,
            direction: draft.direction,
            magnitude: draft.magnitude,
            start_date: draft.start_date,
            interval: draft.interval,
            day_of_week: draft.day_of_week,
            day_of_month: draft.day_of_month,
            end_date: draft.end_date,
            active: draft.active,
        };
        series.validate()?;
        Ok(series)
    }

    /// Re-checks the creation invariants, e.g. for records read back from storage.
    pub fn validate(&self) -> Result<(), SeriesError> {
        if self.magnitude <= Decimal::ZERO {
            return Err(SeriesError::NonPositiveMagnitude(self.magnitude));
        }
        if let Some(dow) = self.day_of_week {
            if dow > 6 {
                return Err(SeriesError::DayOfWeekOutOfRange(dow));
            }
        }
        if let Some(dom) = self.day_of_month {
            if !(1..=31).contains(&dom) {
                return Err(SeriesError::DayOfMonthOutOfRange(dom));
            }
        }
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(SeriesError::EndBeforeStart {
                    start: self.start_date,
                    end,
                });
            }
        }
        Ok(())
    }

    /// Amount carried by each occurrence: positive for income, negative for expense.
    pub fn signed_amount(&self) -> Decimal {
        self.direction.apply(self.magnitude)
    }

    /// Explicit weekday pin, else the anchor's weekday.
    pub fn target_weekday(&self) -> Weekday {
        self.day_of_week
            .and_then(calendar::weekday_from_index)
            .unwrap_or_else(|| self.start_date.weekday())
    }

    /// Explicit day-of-month pin, else the anchor's day.
    pub fn target_day_of_month(&self) -> u32 {
        self.day_of_month
            .map(u32::from)
            .unwrap_or_else(|| self.start_date.day())
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Creation-time validation failures for recurring series.
pub enum SeriesError {
    InvalidInterval(String),
    InvalidDirection(String),
    DayOfWeekOutOfRange(u8),
    DayOfMonthOutOfRange(u8),
    NonPositiveMagnitude(Decimal),
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for SeriesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesError::InvalidInterval(raw) => write!(
                f,
                "invalid interval `{}` (expected weekly|biweekly|monthly|yearly)",
                raw
            ),
            SeriesError::InvalidDirection(raw) => {
                write!(f, "invalid type `{}` (expected income|expense)", raw)
            }
            SeriesError::DayOfWeekOutOfRange(value) => {
                write!(f, "day of week {} is outside 0-6", value)
            }
            SeriesError::DayOfMonthOutOfRange(value) => {
                write!(f, "day of month {} is outside 1-31", value)
            }
            SeriesError::NonPositiveMagnitude(value) => {
                write!(f, "amount must be positive, got {}", value)
            }
            SeriesError::EndBeforeStart { start, end } => {
                write!(f, "end date {} precedes start date {}", end, start)
            }
        }
    }
}

impl std::error::Error for SeriesError {}
