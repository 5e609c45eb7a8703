//! Load/save of timer and history snapshots.
//!
//! Each collection lives in its own named slot as a JSON array. A slot that
//! is missing or fails to parse loads as an empty collection.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use super::Database;
use crate::error::Result;
use crate::history::HistoryItem;
use crate::timer::Timer;

pub const TIMERS_KEY: &str = "timesheet-timers";
pub const HISTORY_KEY: &str = "timesheet-history";

/// Durable storage for the two owned collections.
pub trait SnapshotStore {
    /// Read the timer slot. Missing or corrupt data yields an empty list;
    /// only an unreadable store is an error.
    fn load_timers(&self) -> Result<Vec<Timer>>;

    fn save_timers(&self, timers: &[Timer]) -> Result<()>;

    /// Read the history slot, with the same rules as [`load_timers`](Self::load_timers).
    fn load_history(&self) -> Result<Vec<HistoryItem>>;

    fn save_history(&self, items: &[HistoryItem]) -> Result<()>;

    /// Write both slots together. A failure must leave both as they were,
    /// otherwise a stopped timer could survive next to its history record.
    fn save_all(&self, timers: &[Timer], items: &[HistoryItem]) -> Result<()>;
}

/// [`SnapshotStore`] backed by the SQLite kv table.
pub struct DatabaseSnapshots {
    db: Database,
}

impl DatabaseSnapshots {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    fn load_slot<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let Some(json) = self.db.kv_get(key)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<T>>(&json) {
            Ok(values) => Ok(values),
            Err(e) => {
                warn!(slot = key, error = %e, "discarding corrupt snapshot");
                Ok(Vec::new())
            }
        }
    }

    fn save_slot<T: Serialize>(&self, key: &str, values: &[T]) -> Result<()> {
        let json = serde_json::to_string(values)?;
        self.db.kv_set(key, &json)?;
        Ok(())
    }
}

impl SnapshotStore for DatabaseSnapshots {
    fn load_timers(&self) -> Result<Vec<Timer>> {
        self.load_slot(TIMERS_KEY)
    }

    fn save_timers(&self, timers: &[Timer]) -> Result<()> {
        self.save_slot(TIMERS_KEY, timers)
    }

    fn load_history(&self) -> Result<Vec<HistoryItem>> {
        self.load_slot(HISTORY_KEY)
    }

    fn save_history(&self, items: &[HistoryItem]) -> Result<()> {
        self.save_slot(HISTORY_KEY, items)
    }

    fn save_all(&self, timers: &[Timer], items: &[HistoryItem]) -> Result<()> {
        let timers = serde_json::to_string(timers)?;
        let history = serde_json::to_string(items)?;
        self.db
            .kv_set_all(&[(TIMERS_KEY, timers.as_str()), (HISTORY_KEY, history.as_str())])?;
        Ok(())
    }
}
