//! Owns the timer engine and history store and keeps them persisted.
//!
//! Both collections are written synchronously after every mutation. If the
//! store fails to load or save, the session carries on purely in memory and
//! no further writes are attempted.

use tracing::warn;

use crate::clock::{Clock, SystemClock};
use crate::error::{CoreError, Result};
use crate::events::{at, Event, TimerView};
use crate::history::HistoryStore;
use crate::storage::{Database, DatabaseSnapshots, SnapshotStore};
use crate::timer::TimerEngine;

pub struct Timesheet<C: Clock = SystemClock> {
    engine: TimerEngine,
    history: HistoryStore,
    store: Option<Box<dyn SnapshotStore>>,
    clock: C,
}

impl Timesheet<SystemClock> {
    /// Open the default on-disk store, falling back to an in-memory session
    /// if it is unavailable.
    pub fn open() -> Self {
        match Database::open() {
            Ok(db) => Self::with_store(Box::new(DatabaseSnapshots::new(db)), SystemClock),
            Err(e) => {
                warn!(error = %e, "storage unavailable, running in memory");
                Self::in_memory(SystemClock)
            }
        }
    }
}

impl<C: Clock> Timesheet<C> {
    /// Load both collections from `store`. A load failure leaves the session
    /// empty and memory-only so that stored data is never overwritten.
    pub fn with_store(store: Box<dyn SnapshotStore>, clock: C) -> Self {
        let loaded = store
            .load_timers()
            .and_then(|timers| Ok((timers, store.load_history()?)));

        match loaded {
            Ok((timers, items)) => Self {
                engine: TimerEngine::from_timers(timers),
                history: HistoryStore::from_items(items),
                store: Some(store),
                clock,
            },
            Err(e) => {
                warn!(error = %e, "failed to load snapshots, running in memory");
                Self::in_memory(clock)
            }
        }
    }

    pub fn in_memory(clock: C) -> Self {
        Self {
            engine: TimerEngine::new(),
            history: HistoryStore::new(),
            store: None,
            clock,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Whether mutations are still reaching durable storage.
    pub fn is_persistent(&self) -> bool {
        self.store.is_some()
    }

    pub fn snapshot(&self) -> Event {
        let now = self.now_ms();
        Event::StateSnapshot {
            timers: self
                .engine
                .timers()
                .iter()
                .map(|t| TimerView::new(t, now))
                .collect(),
            history_len: self.history.len(),
            at: at(now),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// # Errors
    /// Returns [`CoreError::InvalidInput`] for a blank description.
    pub fn start(&mut self, description: &str) -> Result<Event> {
        let now = self.now_ms();
        let timer = self.engine.start(description, now)?;
        let event = Event::TimerStarted {
            id: timer.id.clone(),
            description: timer.description.clone(),
            at: at(now),
        };
        self.persist_timers();
        Ok(event)
    }

    /// `None` if the timer is unknown or not running.
    pub fn pause(&mut self, id: &str) -> Option<Event> {
        let now = self.now_ms();
        if !self.engine.pause(id, now) {
            return None;
        }
        let accumulated_ms = self.engine.get(id)?.accumulated_time;
        self.persist_timers();
        Some(Event::TimerPaused {
            id: id.to_string(),
            accumulated_ms,
            at: at(now),
        })
    }

    /// `None` if the timer is unknown or already running.
    pub fn resume(&mut self, id: &str) -> Option<Event> {
        let now = self.now_ms();
        if !self.engine.resume(id, now) {
            return None;
        }
        let accumulated_ms = self.engine.get(id)?.accumulated_time;
        self.persist_timers();
        Some(Event::TimerResumed {
            id: id.to_string(),
            accumulated_ms,
            at: at(now),
        })
    }

    /// Stop the timer and append its record to history.
    ///
    /// # Errors
    /// Returns [`CoreError::NotFound`] for an unknown id; nothing changes.
    pub fn stop(&mut self, id: &str) -> Result<Event> {
        let now = self.now_ms();
        let item = self.engine.stop(id, now)?;
        self.history.append(item.clone());
        self.persist_all();
        Ok(Event::TimerStopped { item, at: at(now) })
    }

    /// `None` if no history item has this id.
    pub fn delete_history(&mut self, id: &str) -> Option<Event> {
        if !self.history.delete(id) {
            return None;
        }
        self.persist_history();
        Some(Event::HistoryDeleted {
            id: id.to_string(),
            at: at(self.now_ms()),
        })
    }

    pub fn clear_history(&mut self) -> Event {
        let removed = self.history.clear();
        self.persist_history();
        Event::HistoryCleared {
            removed,
            at: at(self.now_ms()),
        }
    }

    /// Resolve a full id or a unique prefix against active timers.
    ///
    /// # Errors
    /// [`CoreError::NotFound`] if nothing matches, [`CoreError::InvalidInput`]
    /// if the prefix is ambiguous.
    pub fn resolve_timer_id(&self, prefix: &str) -> Result<String> {
        resolve_prefix(self.engine.timers().iter().map(|t| t.id.as_str()), prefix)
    }

    /// Same as [`resolve_timer_id`](Self::resolve_timer_id) for history items.
    pub fn resolve_history_id(&self, prefix: &str) -> Result<String> {
        resolve_prefix(self.history.items().iter().map(|i| i.id.as_str()), prefix)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn persist_timers(&mut self) {
        let result = match &self.store {
            Some(store) => store.save_timers(self.engine.timers()),
            None => return,
        };
        self.degrade_on_error(result);
    }

    fn persist_history(&mut self) {
        let result = match &self.store {
            Some(store) => store.save_history(self.history.items()),
            None => return,
        };
        self.degrade_on_error(result);
    }

    fn persist_all(&mut self) {
        let result = match &self.store {
            Some(store) => store.save_all(self.engine.timers(), self.history.items()),
            None => return,
        };
        self.degrade_on_error(result);
    }

    fn degrade_on_error(&mut self, result: Result<()>) {
        if let Err(e) = result {
            warn!(error = %e, "persistence failed, continuing in memory");
            self.store = None;
        }
    }
}

fn resolve_prefix<'a>(ids: impl Iterator<Item = &'a str>, prefix: &str) -> Result<String> {
    let prefix = prefix.trim();
    let mut matches: Vec<&str> = Vec::new();
    for id in ids {
        if id == prefix {
            return Ok(id.to_string());
        }
        if !prefix.is_empty() && id.starts_with(prefix) && !matches.contains(&id) {
            matches.push(id);
        }
    }
    match matches.as_slice() {
        [only] => Ok(only.to_string()),
        [] => Err(CoreError::NotFound {
            id: prefix.to_string(),
        }),
        _ => Err(CoreError::InvalidInput(format!(
            "id prefix '{prefix}' is ambiguous ({} matches)",
            matches.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::history::HistoryItem;
    use crate::timer::Timer;
    use std::sync::Arc;

    struct FailingStore;

    impl SnapshotStore for FailingStore {
        fn load_timers(&self) -> Result<Vec<Timer>> {
            Ok(Vec::new())
        }
        fn save_timers(&self, _timers: &[Timer]) -> Result<()> {
            Err(CoreError::Persistence(crate::error::DatabaseError::Locked))
        }
        fn load_history(&self) -> Result<Vec<HistoryItem>> {
            Ok(Vec::new())
        }
        fn save_history(&self, _items: &[HistoryItem]) -> Result<()> {
            Err(CoreError::Persistence(crate::error::DatabaseError::Locked))
        }
        fn save_all(&self, _timers: &[Timer], _items: &[HistoryItem]) -> Result<()> {
            Err(CoreError::Persistence(crate::error::DatabaseError::Locked))
        }
    }

    struct UnreadableStore;

    impl SnapshotStore for UnreadableStore {
        fn load_timers(&self) -> Result<Vec<Timer>> {
            Err(CoreError::Persistence(crate::error::DatabaseError::Locked))
        }
        fn save_timers(&self, _timers: &[Timer]) -> Result<()> {
            panic!("must not write after a failed load");
        }
        fn load_history(&self) -> Result<Vec<HistoryItem>> {
            Ok(Vec::new())
        }
        fn save_history(&self, _items: &[HistoryItem]) -> Result<()> {
            panic!("must not write after a failed load");
        }
        fn save_all(&self, _timers: &[Timer], _items: &[HistoryItem]) -> Result<()> {
            panic!("must not write after a failed load");
        }
    }

    fn memory_sheet() -> (Timesheet<Arc<ManualClock>>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(1_000_000));
        let store = DatabaseSnapshots::new(Database::open_memory().unwrap());
        (Timesheet::with_store(Box::new(store), Arc::clone(&clock)), clock)
    }

    fn started_id(event: &Event) -> String {
        match event {
            Event::TimerStarted { id, .. } => id.clone(),
            other => panic!("Expected TimerStarted, got {other:?}"),
        }
    }

    #[test]
    fn stop_moves_timer_into_history() {
        let (mut sheet, clock) = memory_sheet();
        let id = started_id(&sheet.start("Write report").unwrap());
        clock.advance(5_000);
        sheet.pause(&id).unwrap();
        sheet.resume(&id).unwrap();
        clock.advance(3_000);

        match sheet.stop(&id).unwrap() {
            Event::TimerStopped { item, .. } => assert_eq!(item.total_duration, 8_000),
            other => panic!("Expected TimerStopped, got {other:?}"),
        }
        assert!(sheet.engine().is_empty());
        assert_eq!(sheet.history().len(), 1);
    }

    #[test]
    fn stop_unknown_changes_nothing() {
        let (mut sheet, _clock) = memory_sheet();
        sheet.start("a").unwrap();
        let engine_before = sheet.engine().clone();
        let history_before = sheet.history().clone();
        assert!(matches!(sheet.stop("nope"), Err(CoreError::NotFound { .. })));
        assert_eq!(sheet.engine(), &engine_before);
        assert_eq!(sheet.history(), &history_before);
    }

    #[test]
    fn noops_return_none() {
        let (mut sheet, _clock) = memory_sheet();
        let id = started_id(&sheet.start("a").unwrap());
        assert!(sheet.resume(&id).is_none());
        assert!(sheet.pause("missing").is_none());
        assert!(sheet.delete_history("missing").is_none());
    }

    #[test]
    fn save_failure_degrades_to_memory() {
        let clock = Arc::new(ManualClock::new(0));
        let mut sheet = Timesheet::with_store(Box::new(FailingStore), Arc::clone(&clock));
        assert!(sheet.is_persistent());

        let id = started_id(&sheet.start("a").unwrap());
        assert!(!sheet.is_persistent());
        clock.advance(10);
        assert!(sheet.stop(&id).is_ok());
        assert_eq!(sheet.history().len(), 1);
    }

    #[test]
    fn failed_stop_write_cannot_duplicate_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timesheet.db");
        let open = |clock: &Arc<ManualClock>| {
            let store = DatabaseSnapshots::new(Database::open_at(&path).unwrap());
            Timesheet::with_store(Box::new(store), Arc::clone(clock))
        };

        let clock = Arc::new(ManualClock::new(0));
        let mut sheet = open(&clock);
        let id = started_id(&sheet.start("Write report").unwrap());
        clock.advance(5_000);

        Database::open_at(&path)
            .unwrap()
            .execute_batch(
                "CREATE TRIGGER reject_timers BEFORE INSERT ON kv WHEN NEW.key = 'timesheet-timers'
                 BEGIN SELECT RAISE(ABORT, 'locked'); END;",
            )
            .unwrap();
        sheet.stop(&id).unwrap();
        assert!(!sheet.is_persistent());

        let mut reloaded = open(&clock);
        assert_eq!(reloaded.engine().len(), 1);
        assert!(reloaded.history().is_empty());

        reloaded.stop(&id).unwrap();
        assert_eq!(reloaded.history().len(), 1);
    }

    #[test]
    fn load_failure_starts_empty_without_writing() {
        let mut sheet = Timesheet::with_store(Box::new(UnreadableStore), ManualClock::new(0));
        assert!(!sheet.is_persistent());
        assert!(sheet.engine().is_empty());
        sheet.start("still works").unwrap();
        sheet.clear_history();
    }

    #[test]
    fn clear_reports_removed_count() {
        let (mut sheet, _clock) = memory_sheet();
        let a = started_id(&sheet.start("a").unwrap());
        let b = started_id(&sheet.start("b").unwrap());
        sheet.stop(&a).unwrap();
        sheet.stop(&b).unwrap();
        match sheet.clear_history() {
            Event::HistoryCleared { removed, .. } => assert_eq!(removed, 2),
            other => panic!("Expected HistoryCleared, got {other:?}"),
        }
    }

    #[test]
    fn snapshot_reports_elapsed() {
        let (mut sheet, clock) = memory_sheet();
        sheet.start("a").unwrap();
        clock.advance(3_661_000);
        match sheet.snapshot() {
            Event::StateSnapshot { timers, .. } => {
                assert_eq!(timers[0].elapsed_ms, 3_661_000);
                assert_eq!(timers[0].elapsed, "01:01:01");
            }
            other => panic!("Expected StateSnapshot, got {other:?}"),
        }
    }

    #[test]
    fn prefix_resolution() {
        let ids = ["abc123", "abd456"];
        assert_eq!(resolve_prefix(ids.into_iter(), "abc").unwrap(), "abc123");
        assert_eq!(resolve_prefix(ids.into_iter(), "abd456").unwrap(), "abd456");
        assert!(matches!(
            resolve_prefix(ids.into_iter(), "ab"),
            Err(CoreError::InvalidInput(_))
        ));
        assert!(matches!(
            resolve_prefix(ids.into_iter(), "zz"),
            Err(CoreError::NotFound { .. })
        ));
        assert!(matches!(
            resolve_prefix(ids.into_iter(), ""),
            Err(CoreError::NotFound { .. })
        ));
    }

    #[test]
    fn prefix_with_duplicate_history_ids_resolves() {
        let ids = ["dup", "dup"];
        assert_eq!(resolve_prefix(ids.into_iter(), "du").unwrap(), "dup");
    }
}
