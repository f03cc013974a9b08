//! Creation and maintenance of recurring series.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use currentz_domain::{
    money::round_cents, DateWindow, Direction, Interval, Occurrence, RecurringDraft,
    RecurringSeries,
};

use crate::{expander::expand_all, storage::FinanceStore, CoreError};

/// Loosely typed creation payload, as received from a form or request body.
#[derive(Debug, Clone, PartialEq)]
pub struct RecurringInput {
    pub description: String,
    /// `"income"` or `"expense"`.
    pub kind: String,
    /// Positive magnitude; the sign comes from `kind`.
    pub amount: Decimal,
    pub start_date: NaiveDate,
    /// `"weekly"`, `"biweekly"`, `"monthly"` or `"yearly"`.
    pub interval: String,
    pub day_of_week: Option<u8>,
    pub day_of_month: Option<u8>,
    pub end_date: Option<NaiveDate>,
    pub active: bool,
}

impl RecurringInput {
    /// Parses the string fields; every rejection maps to [`CoreError::Configuration`].
    pub fn into_draft(self) -> Result<RecurringDraft, CoreError> {
        let direction: Direction = self.kind.parse()?;
        let interval: Interval = self.interval.parse()?;
        Ok(RecurringDraft {
            description: self.description.trim().to_string(),
            direction,
            magnitude: round_cents(self.amount),
            start_date: self.start_date,
            interval,
            day_of_week: self.day_of_week,
            day_of_month: self.day_of_month,
            end_date: self.end_date,
            active: self.active,
        })
    }
}

pub struct RecurrenceService;

impl RecurrenceService {
    /// Validates and stores a new series, returning its identifier.
    pub fn create(store: &dyn FinanceStore, input: RecurringInput) -> Result<Uuid, CoreError> {
        let series = RecurringSeries::new(input.into_draft()?)?;
        let id = series.id;
        info!(
            series = %id,
            interval = %series.interval,
            direction = %series.direction,
            amount = %series.magnitude,
            "creating recurring series"
        );
        store.add_recurring(series)?;
        Ok(id)
    }

    pub fn list(store: &dyn FinanceStore) -> Result<Vec<RecurringSeries>, CoreError> {
        Ok(store.list_recurring()?)
    }

    pub fn delete(store: &dyn FinanceStore, id: Uuid) -> Result<(), CoreError> {
        if !store.delete_recurring(id)? {
            return Err(CoreError::SeriesNotFound(id));
        }
        info!(series = %id, "deleted recurring series");
        Ok(())
    }

    /// Pauses or resumes a series. Inactive series are never expanded.
    pub fn set_active(store: &dyn FinanceStore, id: Uuid, active: bool) -> Result<(), CoreError> {
        if !store.set_recurring_active(id, active)? {
            return Err(CoreError::SeriesNotFound(id));
        }
        info!(series = %id, active, "recurring series toggled");
        Ok(())
    }

    /// Projections of every active series over `[window_start, window_end]`.
    pub fn expand_between(
        store: &dyn FinanceStore,
        window_start: NaiveDate,
        window_end: NaiveDate,
    ) -> Result<Vec<Occurrence>, CoreError> {
        let window = DateWindow::new(window_start, window_end)?;
        let series = store.list_active_recurring()?;
        Ok(expand_all(&series, window))
    }
}
