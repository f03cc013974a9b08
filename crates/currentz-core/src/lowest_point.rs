use currentz_domain::{ForecastDay, LowestPoint};

use crate::CoreError;

/// Returns the leftmost day holding the minimum balance.
///
/// An empty forecast is an error rather than a zero-valued day.
pub fn find_lowest(days: &[ForecastDay]) -> Result<LowestPoint, CoreError> {
    let (first, rest) = days
        .split_first()
        .ok_or_else(|| CoreError::EmptyInput("forecast contains no days".into()))?;
    let mut lowest = LowestPoint {
        day: *first,
        index: 0,
    };
    for (offset, day) in rest.iter().enumerate() {
        if day.balance < lowest.day.balance {
            lowest = LowestPoint {
                day: *day,
                index: offset + 1,
            };
        }
    }
    Ok(lowest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn day(d: u32, balance: i64) -> ForecastDay {
        ForecastDay {
            date: NaiveDate::from_ymd_opt(2025, 1, d).unwrap(),
            change: Decimal::ZERO,
            balance: Decimal::new(balance, 0),
        }
    }

    #[test]
    fn ties_resolve_to_the_earliest_day() {
        let days = vec![day(1, 1000), day(2, -500), day(3, -500)];
        let lowest = find_lowest(&days).unwrap();
        assert_eq!(lowest.index, 1);
        assert_eq!(lowest.day, days[1]);
    }

    #[test]
    fn single_day_is_its_own_minimum() {
        let days = vec![day(1, 42)];
        assert_eq!(find_lowest(&days).unwrap().index, 0);
    }

    #[test]
    fn minimum_on_last_day_is_found() {
        let days = vec![day(1, 5), day(2, 4), day(3, 3)];
        assert_eq!(find_lowest(&days).unwrap().index, 2);
    }

    #[test]
    fn empty_forecast_is_rejected() {
        assert!(matches!(find_lowest(&[]), Err(CoreError::EmptyInput(_))));
    }
}
