use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::format::format_compact;
use crate::history::HistoryItem;
use crate::timer::{Timer, TimerStatus};

/// Every state change in the system produces an Event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        id: String,
        description: String,
        at: DateTime<Utc>,
    },
    TimerPaused {
        id: String,
        accumulated_ms: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        id: String,
        accumulated_ms: u64,
        at: DateTime<Utc>,
    },
    /// Timer removed; its record was appended to history.
    TimerStopped {
        item: HistoryItem,
        at: DateTime<Utc>,
    },
    HistoryDeleted {
        id: String,
        at: DateTime<Utc>,
    },
    HistoryCleared {
        removed: usize,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        timers: Vec<TimerView>,
        history_len: usize,
        at: DateTime<Utc>,
    },
}

/// A timer with its elapsed time resolved at snapshot time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerView {
    pub id: String,
    pub description: String,
    pub status: TimerStatus,
    pub elapsed_ms: u64,
    pub elapsed: String,
}

impl TimerView {
    pub fn new(timer: &Timer, now_ms: u64) -> Self {
        let elapsed_ms = timer.elapsed(now_ms);
        Self {
            id: timer.id.clone(),
            description: timer.description.clone(),
            status: timer.status,
            elapsed_ms,
            elapsed: format_compact(elapsed_ms),
        }
    }
}

pub(crate) fn at(epoch_ms: u64) -> DateTime<Utc> {
    i64::try_from(epoch_ms)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .unwrap_or_default()
}
