//! Deterministic merge of persisted one-offs with projected occurrences.

use std::cmp::Ordering;

use currentz_domain::{Occurrence, OneOffTransaction};

/// Ascending by date, then by description (case-sensitive, byte order).
///
/// The sort is stable and one-offs are laid down first, so for equal
/// `(date, description)` pairs one-offs precede projections and each side keeps
/// its input order.
pub fn merge(one_offs: &[OneOffTransaction], projected: Vec<Occurrence>) -> Vec<Occurrence> {
    let mut merged = Vec::with_capacity(one_offs.len() + projected.len());
    merged.extend(one_offs.iter().map(Occurrence::from_transaction));
    merged.extend(projected);
    merged.sort_by(occurrence_order);
    merged
}

pub fn occurrence_order(a: &Occurrence, b: &Occurrence) -> Ordering {
    a.date
        .cmp(&b.date)
        .then_with(|| a.description.cmp(&b.description))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use currentz_domain::{Direction, Interval, RecurringDraft, RecurringSeries};
    use rust_decimal::Decimal;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn rule(description: &str) -> RecurringSeries {
        RecurringSeries::new(RecurringDraft {
            description: description.into(),
            direction: Direction::Expense,
            magnitude: Decimal::new(10, 0),
            start_date: date(1),
            interval: Interval::Monthly,
            day_of_week: None,
            day_of_month: None,
            end_date: None,
            active: true,
        })
        .unwrap()
    }

    #[test]
    fn merge_orders_by_date_then_description() {
        let one_offs = vec![
            OneOffTransaction::expense(date(3), Decimal::ONE, "b"),
            OneOffTransaction::expense(date(1), Decimal::ONE, "z"),
        ];
        let projected = vec![
            Occurrence::projected(&rule("a"), date(3)),
            Occurrence::projected(&rule("B"), date(2)),
        ];
        let merged = merge(&one_offs, projected);
        let keys: Vec<_> = merged
            .iter()
            .map(|occ| (occ.date, occ.description.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![(date(1), "z"), (date(2), "B"), (date(3), "a"), (date(3), "b")]
        );
    }

    #[test]
    fn uppercase_sorts_before_lowercase() {
        let one_offs = vec![
            OneOffTransaction::expense(date(1), Decimal::ONE, "rent"),
            OneOffTransaction::expense(date(1), Decimal::ONE, "Rent"),
        ];
        let merged = merge(&one_offs, Vec::new());
        assert_eq!(merged[0].description, "Rent");
        assert_eq!(merged[1].description, "rent");
    }

    #[test]
    fn ties_put_one_offs_before_projections_and_keep_order() {
        let series = rule("Rent");
        let first = OneOffTransaction::expense(date(5), Decimal::ONE, "Rent");
        let second = OneOffTransaction::expense(date(5), Decimal::new(2, 0), "Rent");
        let merged = merge(
            &[first.clone(), second.clone()],
            vec![Occurrence::projected(&series, date(5))],
        );
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].transaction_id(), Some(first.id));
        assert_eq!(merged[1].transaction_id(), Some(second.id));
        assert_eq!(merged[2].series_id(), Some(series.id));
    }

    #[test]
    fn merge_of_empty_inputs_is_empty() {
        assert!(merge(&[], Vec::new()).is_empty());
    }
}
