use std::fmt;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
/// Closed calendar interval `[start, end]`; both bounds are inclusive.
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateWindowError> {
        if end < start {
            return Err(DateWindowError::InvalidRange);
        }
        Ok(Self { start, end })
    }

    /// Window of `days` consecutive days beginning at `start`.
    pub fn from_days(start: NaiveDate, days: u32) -> Result<Self, DateWindowError> {
        if days == 0 {
            return Err(DateWindowError::Empty);
        }
        let end = start
            .checked_add_days(Days::new(u64::from(days) - 1))
            .ok_or(DateWindowError::OutOfRange)?;
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn len_days(&self) -> u32 {
        ((self.end - self.start).num_days() + 1) as u32
    }

    /// Every date of the window in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |date| *date <= end)
    }

    /// Overlap of two windows, or `None` when they are disjoint.
    pub fn intersect(&self, other: &DateWindow) -> Option<DateWindow> {
        DateWindow::new(self.start.max(other.start), self.end.min(other.end)).ok()
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Errors that can occur when constructing [`DateWindow`] values.
pub enum DateWindowError {
    InvalidRange,
    Empty,
    OutOfRange,
}

impl fmt::Display for DateWindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateWindowError::InvalidRange => f.write_str("date window end must not precede start"),
            DateWindowError::Empty => f.write_str("date window must cover at least one day"),
            DateWindowError::OutOfRange => f.write_str("date window exceeds the supported calendar"),
        }
    }
}

impl std::error::Error for DateWindowError {}
