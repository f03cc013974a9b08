use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::recurring::Direction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// A persisted, dated ledger entry. Expenses carry negative amounts.
pub struct OneOffTransaction {
    pub id: Uuid,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub description: String,
    pub direction: Direction,
}

impl OneOffTransaction {
    /// Builds an entry from a signed amount; the direction follows the sign.
    pub fn new(date: NaiveDate, amount: Decimal, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            amount,
            description: description.into(),
            direction: Direction::of_amount(amount),
        }
    }

    pub fn income(date: NaiveDate, magnitude: Decimal, description: impl Into<String>) -> Self {
        Self::with_direction(date, magnitude, description, Direction::Income)
    }

    pub fn expense(date: NaiveDate, magnitude: Decimal, description: impl Into<String>) -> Self {
        Self::with_direction(date, magnitude, description, Direction::Expense)
    }

    fn with_direction(
        date: NaiveDate,
        magnitude: Decimal,
        description: impl Into<String>,
        direction: Direction,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            amount: direction.apply(magnitude.abs()),
            description: description.into(),
            direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expenses_are_stored_negative() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let expense = OneOffTransaction::expense(date, Decimal::new(4250, 2), "Groceries");
        assert_eq!(expense.amount, Decimal::new(-4250, 2));
        assert_eq!(expense.direction, Direction::Expense);

        let income = OneOffTransaction::income(date, Decimal::new(-100, 0), "Refund");
        assert_eq!(income.amount, Decimal::new(100, 0));
    }

    #[test]
    fn signed_constructor_infers_direction() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(
            OneOffTransaction::new(date, Decimal::new(-1, 0), "x").direction,
            Direction::Expense
        );
        assert_eq!(
            OneOffTransaction::new(date, Decimal::ZERO, "x").direction,
            Direction::Income
        );
    }
}
