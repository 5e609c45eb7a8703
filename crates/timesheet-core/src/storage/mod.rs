mod config;
pub mod database;
pub mod snapshot;

pub use config::{Config, DisplayConfig, SummaryConfig};
pub use database::Database;
pub use snapshot::{DatabaseSnapshots, SnapshotStore, HISTORY_KEY, TIMERS_KEY};

use std::path::PathBuf;

/// Resolves the data directory and creates it if missing.
///
/// `TIMESHEET_HOME` wins when set. Otherwise this is `~/.config/timesheet`,
/// or `~/.config/timesheet-dev` with `TIMESHEET_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("TIMESHEET_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("TIMESHEET_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("timesheet-dev")
            } else {
                base_dir.join("timesheet")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
