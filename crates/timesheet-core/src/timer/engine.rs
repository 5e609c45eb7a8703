//! Timer state engine.
//!
//! Owns the set of active timers. Each transition is an O(1) update of two
//! fields (`start_time`, `accumulated_time`); elapsed time is computed on
//! demand and nothing is written while a timer merely runs.
//!
//! ## State Transitions
//!
//! ```text
//! start -> Running <-> Paused -> stop (removed, emits a HistoryItem)
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::model::{Timer, TimerStatus};
use crate::error::{CoreError, Result};
use crate::history::HistoryItem;

/// Active timers, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimerEngine {
    timers: Vec<Timer>,
}

impl TimerEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild an engine from a persisted snapshot, keeping its order.
    pub fn from_timers(timers: Vec<Timer>) -> Self {
        Self { timers }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn timers(&self) -> &[Timer] {
        &self.timers
    }

    pub fn get(&self, id: &str) -> Option<&Timer> {
        self.timers.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn running(&self) -> impl Iterator<Item = &Timer> {
        self.timers.iter().filter(|t| t.is_running())
    }

    pub fn elapsed(&self, id: &str, now_ms: u64) -> Option<u64> {
        self.get(id).map(|t| t.elapsed(now_ms))
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Create a running timer at the head of the list.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidInput`] if the description is blank.
    pub fn start(&mut self, description: &str, now_ms: u64) -> Result<&Timer> {
        let description = description.trim();
        if description.is_empty() {
            return Err(CoreError::InvalidInput(
                "timer description must not be empty".into(),
            ));
        }

        let timer = Timer {
            id: Uuid::new_v4().to_string(),
            description: description.to_string(),
            status: TimerStatus::Running,
            start_time: Some(now_ms),
            accumulated_time: 0,
            created_at: now_ms,
        };
        debug!(id = %timer.id, description = %timer.description, "timer started");
        self.timers.insert(0, timer);
        Ok(&self.timers[0])
    }

    /// Close the running segment. Returns `false` when nothing changed.
    pub fn pause(&mut self, id: &str, now_ms: u64) -> bool {
        let Some(timer) = self.timers.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        if timer.status != TimerStatus::Running {
            return false;
        }

        timer.accumulated_time = timer.elapsed(now_ms);
        timer.start_time = None;
        timer.status = TimerStatus::Paused;
        debug!(id, accumulated_ms = timer.accumulated_time, "timer paused");
        true
    }

    /// Open a new segment. Returns `false` when nothing changed.
    pub fn resume(&mut self, id: &str, now_ms: u64) -> bool {
        let Some(timer) = self.timers.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        if timer.status == TimerStatus::Running {
            return false;
        }

        timer.start_time = Some(now_ms);
        timer.status = TimerStatus::Running;
        debug!(id, accumulated_ms = timer.accumulated_time, "timer resumed");
        true
    }

    /// Remove the timer and return its history record.
    ///
    /// # Errors
    /// Returns [`CoreError::NotFound`] if no timer has this id; the engine is
    /// left untouched.
    pub fn stop(&mut self, id: &str, now_ms: u64) -> Result<HistoryItem> {
        let index = self
            .timers
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| CoreError::NotFound { id: id.to_string() })?;

        let timer = self.timers.remove(index);
        let item = HistoryItem {
            total_duration: timer.elapsed(now_ms),
            id: timer.id,
            description: timer.description,
            completed_at: now_ms,
        };
        debug!(id = %item.id, total_ms = item.total_duration, "timer stopped");
        Ok(item)
    }
}
