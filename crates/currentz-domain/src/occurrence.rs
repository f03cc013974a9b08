//! Concrete dated monetary events, persisted or projected.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{recurring::Direction, OneOffTransaction, RecurringSeries};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Where an occurrence came from.
pub enum OccurrenceSource {
    Persisted { transaction_id: Uuid },
    Projected { series_id: Uuid },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Occurrence {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub description: String,
    pub direction: Direction,
    pub source: OccurrenceSource,
}

impl Occurrence {
    pub fn from_transaction(txn: &OneOffTransaction) -> Self {
        Self {
            date: txn.date,
            amount: txn.amount,
            description: txn.description.clone(),
            direction: txn.direction,
            source: OccurrenceSource::Persisted {
                transaction_id: txn.id,
            },
        }
    }

    pub fn projected(series: &RecurringSeries, date: NaiveDate) -> Self {
        Self {
            date,
            amount: series.signed_amount(),
            description: series.description.clone(),
            direction: series.direction,
            source: OccurrenceSource::Projected {
                series_id: series.id,
            },
        }
    }

    pub fn is_projected(&self) -> bool {
        matches!(self.source, OccurrenceSource::Projected { .. })
    }

    pub fn series_id(&self) -> Option<Uuid> {
        match self.source {
            OccurrenceSource::Projected { series_id } => Some(series_id),
            OccurrenceSource::Persisted { .. } => None,
        }
    }

    pub fn transaction_id(&self) -> Option<Uuid> {
        match self.source {
            OccurrenceSource::Persisted { transaction_id } => Some(transaction_id),
            OccurrenceSource::Projected { .. } => None,
        }
    }
}
