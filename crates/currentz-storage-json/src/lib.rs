//! currentz-storage-json
//!
//! Single-file JSON persistence implementing [`FinanceStore`].

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::{RwLock, RwLockReadGuard},
};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use currentz_core::storage::{FinanceStore, StoreError};
use currentz_domain::{DateWindow, OneOffTransaction, RecurringSeries};

pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;
const DATA_FILE_NAME: &str = "finance.json";
const TMP_SUFFIX: &str = "tmp";

/// On-disk layout of the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceSnapshot {
    #[serde(default = "FinanceSnapshot::current_schema")]
    pub schema_version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_balance: Option<Decimal>,
    #[serde(default)]
    pub transactions: Vec<OneOffTransaction>,
    #[serde(default)]
    pub recurring: Vec<RecurringSeries>,
}

impl Default for FinanceSnapshot {
    fn default() -> Self {
        Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            updated_at: None,
            starting_balance: None,
            transactions: Vec::new(),
            recurring: Vec::new(),
        }
    }
}

impl FinanceSnapshot {
    fn current_schema() -> u32 {
        SNAPSHOT_SCHEMA_VERSION
    }
}

/// Filesystem-backed store.
///
/// Every mutation is applied to a copy of the state, written to disk atomically and
/// only then published; a failed write leaves memory and disk unchanged.
#[derive(Debug)]
pub struct JsonFinanceStore {
    path: PathBuf,
    state: RwLock<FinanceSnapshot>,
}

impl JsonFinanceStore {
    /// Opens the store at `path`, starting empty when the file does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let snapshot = if path.exists() {
            load_snapshot_from_path(&path)?
        } else {
            debug!(path = %path.display(), "no data file yet, starting empty");
            FinanceSnapshot::default()
        };
        Ok(Self {
            path,
            state: RwLock::new(snapshot),
        })
    }

    /// Opens `<dir>/finance.json`, creating `dir` if needed.
    pub fn in_dir(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        Self::open(dir.join(DATA_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copy of the current in-memory state.
    pub fn snapshot(&self) -> Result<FinanceSnapshot, StoreError> {
        Ok(self.read()?.clone())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, FinanceSnapshot>, StoreError> {
        self.state
            .read()
            .map_err(|_| StoreError::Poisoned("json store"))
    }

    fn mutate<T>(
        &self,
        apply: impl FnOnce(&mut FinanceSnapshot) -> T,
    ) -> Result<T, StoreError> {
        let mut guard = self
            .state
            .write()
            .map_err(|_| StoreError::Poisoned("json store"))?;
        let mut next = guard.clone();
        let outcome = apply(&mut next);
        next.updated_at = Some(Utc::now());
        save_snapshot_to_path(&next, &self.path)?;
        *guard = next;
        Ok(outcome)
    }
}

impl FinanceStore for JsonFinanceStore {
    fn list_transactions_between(
        &self,
        window: DateWindow,
    ) -> Result<Vec<OneOffTransaction>, StoreError> {
        let state = self.read()?;
        let mut matching: Vec<_> = state
            .transactions
            .iter()
            .filter(|txn| window.contains(txn.date))
            .cloned()
            .collect();
        matching.sort_by_key(|txn| txn.date);
        Ok(matching)
    }

    fn list_transactions(&self) -> Result<Vec<OneOffTransaction>, StoreError> {
        let mut all = self.read()?.transactions.clone();
        all.sort_by_key(|txn| txn.date);
        Ok(all)
    }

    fn add_transaction(&self, transaction: OneOffTransaction) -> Result<(), StoreError> {
        self.mutate(|state| state.transactions.push(transaction))
    }

    fn delete_transaction(&self, id: Uuid) -> Result<bool, StoreError> {
        if !self.read()?.transactions.iter().any(|txn| txn.id == id) {
            return Ok(false);
        }
        self.mutate(|state| {
            let before = state.transactions.len();
            state.transactions.retain(|txn| txn.id != id);
            state.transactions.len() != before
        })
    }

    fn list_recurring(&self) -> Result<Vec<RecurringSeries>, StoreError> {
        Ok(self.read()?.recurring.clone())
    }

    fn list_active_recurring(&self) -> Result<Vec<RecurringSeries>, StoreError> {
        Ok(self
            .read()?
            .recurring
            .iter()
            .filter(|series| series.active)
            .cloned()
            .collect())
    }

    fn add_recurring(&self, series: RecurringSeries) -> Result<(), StoreError> {
        self.mutate(|state| state.recurring.push(series))
    }

    fn delete_recurring(&self, id: Uuid) -> Result<bool, StoreError> {
        if !self.read()?.recurring.iter().any(|series| series.id == id) {
            return Ok(false);
        }
        self.mutate(|state| {
            let before = state.recurring.len();
            state.recurring.retain(|series| series.id != id);
            state.recurring.len() != before
        })
    }

    fn set_recurring_active(&self, id: Uuid, active: bool) -> Result<bool, StoreError> {
        if !self.read()?.recurring.iter().any(|series| series.id == id) {
            return Ok(false);
        }
        self.mutate(|state| {
            match state.recurring.iter_mut().find(|series| series.id == id) {
                Some(series) => {
                    series.active = active;
                    true
                }
                None => false,
            }
        })
    }

    fn starting_balance(&self) -> Result<Option<Decimal>, StoreError> {
        Ok(self.read()?.starting_balance)
    }

    fn set_starting_balance(&self, balance: Decimal) -> Result<(), StoreError> {
        self.mutate(|state| state.starting_balance = Some(balance))
    }
}

/// Writes a snapshot to `path` via a temporary sibling file and a rename.
pub fn save_snapshot_to_path(snapshot: &FinanceSnapshot, path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(snapshot)
        .map_err(|err| StoreError::Serde(err.to_string()))?;
    let tmp = tmp_path(path);
    write_file(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Reads a snapshot and re-validates every recurring series in it.
pub fn load_snapshot_from_path(path: &Path) -> Result<FinanceSnapshot, StoreError> {
    let data = fs::read_to_string(path)?;
    let snapshot: FinanceSnapshot =
        serde_json::from_str(&data).map_err(|err| StoreError::Serde(err.to_string()))?;
    if snapshot.schema_version != SNAPSHOT_SCHEMA_VERSION {
        warn!(
            path = %path.display(),
            found = snapshot.schema_version,
            expected = SNAPSHOT_SCHEMA_VERSION,
            "data file schema version differs"
        );
    }
    for series in &snapshot.recurring {
        series
            .validate()
            .map_err(|err| StoreError::Corrupt(format!("series {}: {}", series.id, err)))?;
    }
    debug!(
        path = %path.display(),
        transactions = snapshot.transactions.len(),
        recurring = snapshot.recurring.len(),
        "loaded data file"
    );
    Ok(snapshot)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<(), StoreError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
