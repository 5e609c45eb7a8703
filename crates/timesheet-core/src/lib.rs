//! # Timesheet Core Library
//!
//! Core logic for a personal time tracker: named timers that can be paused,
//! resumed and stopped into a history of completed activities, with an
//! optional AI-generated summary of that history. The `timesheet` CLI is a
//! thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Timer Engine**: active timers and their transitions. Elapsed time is a
//!   pure function of `(now, start_time, accumulated_time, status)`; nothing
//!   ticks.
//! - **History**: completed records and day grouping for display
//! - **Storage**: SQLite key-value snapshots and TOML configuration
//! - **Summary**: external text-generation call that always yields a string
//!
//! ## Key Components
//!
//! - [`Timesheet`]: owns both collections and persists after each mutation
//! - [`TimerEngine`]: timer state machine
//! - [`HistoryStore`]: completed activities
//! - [`Summarizer`]: trait for summary backends

pub mod clock;
pub mod error;
pub mod events;
pub mod format;
pub mod history;
pub mod storage;
pub mod summary;
pub mod timer;
pub mod timesheet;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ConfigError, CoreError, DatabaseError, Result};
pub use events::{Event, TimerView};
pub use format::{format_clock_time, format_compact, format_verbose};
pub use history::{DayGroup, DayLabels, HistoryItem, HistoryStore, Locale};
pub use storage::{Config, Database, DatabaseSnapshots, SnapshotStore};
pub use summary::{GeminiSummarizer, InFlight, PromptTemplate, Summarizer};
pub use timer::{Timer, TimerEngine, TimerStatus};
pub use timesheet::Timesheet;
