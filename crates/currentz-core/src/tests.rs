use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    public_api::*,
    storage::{FinanceStore, StoreError},
    BalanceService, CoreError, FixedClock, MemoryStore, RecurrenceService, RecurringInput,
    TransactionService,
};
use currentz_domain::{
    BalanceAlert, DateWindow, OccurrenceSource, OneOffTransaction, RecurringSeries,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn dec(raw: &str) -> Decimal {
    raw.parse().unwrap()
}

fn input(kind: &str, interval: &str, amount: &str, start: NaiveDate) -> RecurringInput {
    RecurringInput {
        description: "Series".into(),
        kind: kind.into(),
        amount: dec(amount),
        start_date: start,
        interval: interval.into(),
        day_of_week: None,
        day_of_month: None,
        end_date: None,
        active: true,
    }
}

/// Store whose every read and write fails.
struct FailingStore;

impl FailingStore {
    fn fail<T>() -> Result<T, StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }
}

impl FinanceStore for FailingStore {
    fn list_transactions_between(
        &self,
        _window: DateWindow,
    ) -> Result<Vec<OneOffTransaction>, StoreError> {
        Self::fail()
    }
    fn list_transactions(&self) -> Result<Vec<OneOffTransaction>, StoreError> {
        Self::fail()
    }
    fn add_transaction(&self, _transaction: OneOffTransaction) -> Result<(), StoreError> {
        Self::fail()
    }
    fn delete_transaction(&self, _id: Uuid) -> Result<bool, StoreError> {
        Self::fail()
    }
    fn list_recurring(&self) -> Result<Vec<RecurringSeries>, StoreError> {
        Self::fail()
    }
    fn list_active_recurring(&self) -> Result<Vec<RecurringSeries>, StoreError> {
        Self::fail()
    }
    fn add_recurring(&self, _series: RecurringSeries) -> Result<(), StoreError> {
        Self::fail()
    }
    fn delete_recurring(&self, _id: Uuid) -> Result<bool, StoreError> {
        Self::fail()
    }
    fn set_recurring_active(&self, _id: Uuid, _active: bool) -> Result<bool, StoreError> {
        Self::fail()
    }
    fn starting_balance(&self) -> Result<Option<Decimal>, StoreError> {
        Self::fail()
    }
    fn set_starting_balance(&self, _balance: Decimal) -> Result<(), StoreError> {
        Self::fail()
    }
}

#[test]
fn missing_starting_balance_defaults_to_zero() {
    let store = MemoryStore::new();
    assert_eq!(api_starting_balance(&store).unwrap(), Decimal::ZERO);

    let stored = api_set_starting_balance(&store, dec("1234.565")).unwrap();
    assert_eq!(stored, dec("1234.57"));
    assert_eq!(api_starting_balance(&store).unwrap(), dec("1234.57"));
}

#[test]
fn store_failures_propagate_unchanged() {
    let store = FailingStore;
    let err = BalanceService::starting_balance(&store).unwrap_err();
    match err {
        CoreError::DataSource(StoreError::Backend(message)) => {
            assert_eq!(message, "connection refused")
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(matches!(
        api_compute_forecast(&store, Decimal::ZERO, date(2025, 1, 1), 3),
        Err(CoreError::DataSource(_))
    ));
    assert!(matches!(
        api_expand_recurring_between(&store, date(2025, 1, 1), date(2025, 1, 31)),
        Err(CoreError::DataSource(_))
    ));
}

#[test]
fn one_off_amounts_must_be_positive() {
    let store = MemoryStore::new();
    for amount in ["0", "-5", "0.001"] {
        let err = api_add_income(&store, date(2025, 1, 1), dec(amount), "bad").unwrap_err();
        assert!(matches!(err, CoreError::InvalidAmount(_)), "{amount}");
    }
    assert!(store.list_transactions().unwrap().is_empty());
}

#[test]
fn expenses_are_stored_negative() {
    let store = MemoryStore::new();
    let id = api_add_expense(&store, date(2025, 3, 4), dec("42.50"), "Groceries").unwrap();
    let stored = TransactionService::list(&store).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, id);
    assert_eq!(stored[0].amount, dec("-42.50"));
}

#[test]
fn deleting_unknown_records_reports_not_found() {
    let store = MemoryStore::new();
    let id = Uuid::new_v4();
    assert!(matches!(
        api_delete_transaction(&store, id),
        Err(CoreError::TransactionNotFound(missing)) if missing == id
    ));
    assert!(matches!(
        api_delete_recurring(&store, id),
        Err(CoreError::SeriesNotFound(_))
    ));
    assert!(matches!(
        api_set_recurring_active(&store, id, false),
        Err(CoreError::SeriesNotFound(_))
    ));
}

#[test]
fn recurring_creation_rejects_bad_configuration() {
    let store = MemoryStore::new();
    let start = date(2025, 1, 1);

    let bad_interval = input("expense", "fortnightly", "10", start);
    let bad_kind = input("transfer", "weekly", "10", start);
    let zero_amount = input("expense", "weekly", "0", start);
    let mut bad_weekday = input("expense", "weekly", "10", start);
    bad_weekday.day_of_week = Some(7);
    let mut day_zero = input("expense", "monthly", "10", start);
    day_zero.day_of_month = Some(0);
    let mut day_32 = input("expense", "monthly", "10", start);
    day_32.day_of_month = Some(32);
    let mut reversed = input("expense", "monthly", "10", start);
    reversed.end_date = Some(date(2024, 12, 31));

    for candidate in [
        bad_interval,
        bad_kind,
        zero_amount,
        bad_weekday,
        day_zero,
        day_32,
        reversed,
    ] {
        let err = api_create_recurring(&store, candidate.clone()).unwrap_err();
        assert!(
            matches!(err, CoreError::Configuration(_)),
            "{candidate:?} gave {err:?}"
        );
    }
    assert!(RecurrenceService::list(&store).unwrap().is_empty());
}

#[test]
fn recurring_parsing_is_case_insensitive() {
    let store = MemoryStore::new();
    let id = api_create_recurring(
        &store,
        input(" Income ", "MONTHLY", "2500", date(2025, 1, 15)),
    )
    .unwrap();
    let series = RecurrenceService::list(&store).unwrap();
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].id, id);
    assert_eq!(series[0].signed_amount(), dec("2500"));
}

#[test]
fn inactive_series_are_not_forecast() {
    let store = MemoryStore::new();
    let id = api_create_recurring(
        &store,
        input("expense", "weekly", "100", date(2025, 1, 6)),
    )
    .unwrap();

    let active = api_compute_forecast(&store, dec("1000"), date(2025, 1, 6), 14).unwrap();
    assert_eq!(active.last().unwrap().balance, dec("800"));

    api_set_recurring_active(&store, id, false).unwrap();
    let paused = api_compute_forecast(&store, dec("1000"), date(2025, 1, 6), 14).unwrap();
    assert_eq!(paused.len(), 14);
    assert!(paused.iter().all(|day| day.balance == dec("1000")));
    assert!(
        api_expand_recurring_between(&store, date(2025, 1, 1), date(2025, 3, 1))
            .unwrap()
            .is_empty()
    );
}

#[test]
fn expand_between_rejects_inverted_window() {
    let store = MemoryStore::new();
    assert!(matches!(
        api_expand_recurring_between(&store, date(2025, 2, 1), date(2025, 1, 1)),
        Err(CoreError::InvalidWindow(_))
    ));
}

#[test]
fn transactions_between_merges_one_offs_and_projections() {
    let store = MemoryStore::new();
    let series_id = api_create_recurring(
        &store,
        input("expense", "monthly", "1200", date(2025, 1, 1)),
    )
    .unwrap();
    let txn_id = api_add_income(&store, date(2025, 2, 1), dec("3000"), "Salary").unwrap();
    api_add_income(&store, date(2025, 4, 1), dec("3000"), "Salary").unwrap();

    let merged = api_transactions_between(&store, date(2025, 1, 15), date(2025, 3, 1)).unwrap();
    let sources: Vec<_> = merged.iter().map(|occ| (occ.date, occ.source)).collect();
    assert_eq!(
        sources,
        vec![
            (
                date(2025, 2, 1),
                OccurrenceSource::Persisted {
                    transaction_id: txn_id
                }
            ),
            (
                date(2025, 2, 1),
                OccurrenceSource::Projected { series_id }
            ),
            (
                date(2025, 3, 1),
                OccurrenceSource::Projected { series_id }
            ),
        ]
    );
}

#[test]
fn upcoming_uses_the_injected_clock() {
    let store = MemoryStore::new();
    api_add_expense(&store, date(2025, 6, 1), dec("10"), "today").unwrap();
    api_add_expense(&store, date(2025, 6, 8), dec("10"), "edge").unwrap();
    api_add_expense(&store, date(2025, 6, 9), dec("10"), "later").unwrap();
    api_add_expense(&store, date(2025, 5, 31), dec("10"), "past").unwrap();

    let clock = FixedClock(date(2025, 6, 1));
    let upcoming = api_upcoming_transactions(&store, &clock, 7).unwrap();
    let descriptions: Vec<_> = upcoming.iter().map(|occ| occ.description.as_str()).collect();
    assert_eq!(descriptions, vec!["today", "edge"]);
}

#[test]
fn forecast_from_today_uses_stored_balance() {
    let store = MemoryStore::new();
    api_set_starting_balance(&store, dec("500")).unwrap();
    api_add_expense(&store, date(2025, 6, 2), dec("700"), "Insurance").unwrap();

    let clock = FixedClock(date(2025, 6, 1));
    let days = api_forecast_from_today(&store, &clock, 3).unwrap();
    assert_eq!(days.len(), 3);
    assert_eq!(days[0].date, date(2025, 6, 1));
    assert_eq!(days[2].balance, dec("-200"));

    let lowest = api_find_lowest_point(&days).unwrap();
    assert_eq!(lowest.index, 1);

    let report = api_forecast_summary(&store, &clock, 3, dec("1000")).unwrap();
    assert_eq!(report.days, days);
    assert_eq!(
        report.summary.alert,
        BalanceAlert::Negative {
            shortfall: dec("200")
        }
    );
}

#[test]
fn forecast_summary_requires_at_least_one_day() {
    let store = MemoryStore::new();
    let clock = FixedClock(date(2025, 6, 1));
    assert!(matches!(
        api_forecast_summary(&store, &clock, 0, dec("1000")),
        Err(CoreError::InvalidWindow(_))
    ));
}

#[test]
fn zero_day_forecast_is_empty() {
    let store = MemoryStore::new();
    assert!(api_compute_forecast(&store, dec("1"), date(2025, 1, 1), 0)
        .unwrap()
        .is_empty());
}
