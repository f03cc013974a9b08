use std::sync::Arc;

use chrono::NaiveDate;
use currentz::{
    config::Config, engine::FixedClock, storage::JsonFinanceStore, Currentz,
};
use tempfile::TempDir;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Handle backed by a JSON store in a fresh temp dir, frozen at `today`.
///
/// The returned `TempDir` must outlive the handle.
pub fn setup_app(today: NaiveDate) -> (Currentz, TempDir) {
    let temp = TempDir::new().expect("create temp dir");
    let config = Config {
        data_dir: Some(temp.path().to_path_buf()),
        ..Config::default()
    };
    let store = JsonFinanceStore::in_dir(temp.path()).expect("open json store");
    let app = Currentz::with_parts(config, Arc::new(store), Arc::new(FixedClock(today)));
    (app, temp)
}
