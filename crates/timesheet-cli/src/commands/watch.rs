//! Live elapsed-time display for one timer.
//!
//! The display is a read: elapsed time is recomputed from the timer snapshot
//! on every tick and never written back. State is reloaded once a second so
//! that a pause or stop issued from another shell ends the watch.

use std::io::Write;
use std::time::{Duration, Instant};

use timesheet_core::{format_compact, Clock, Config, SystemClock, Timer, Timesheet};
use tracing::debug;

use super::CliResult;

const RELOAD_EVERY: Duration = Duration::from_secs(1);
const MIN_REFRESH_MS: u64 = 10;

pub fn run(id: &str) -> CliResult {
    let config = Config::load_or_default();
    let sheet = Timesheet::open();
    let id = sheet.resolve_timer_id(id)?;
    let Some(timer) = sheet.engine().get(&id).cloned() else {
        return Ok(());
    };

    if !timer.is_running() {
        println!("{}", paused_line(&timer));
        return Ok(());
    }

    let refresh = Duration::from_millis(config.display.refresh_interval_ms.max(MIN_REFRESH_MS));
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(follow(timer, refresh))?;
    println!();
    Ok(())
}

async fn follow(mut timer: Timer, refresh: Duration) -> CliResult {
    let clock = SystemClock;
    let mut interval = tokio::time::interval(refresh);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut last_reload = Instant::now();
    let mut stdout = std::io::stdout();

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = &mut ctrl_c => break,
        }

        if last_reload.elapsed() >= RELOAD_EVERY {
            last_reload = Instant::now();
            match Timesheet::open().engine().get(&timer.id) {
                Some(fresh) => timer = fresh.clone(),
                None => {
                    debug!(id = %timer.id, "watched timer removed");
                    break;
                }
            }
        }

        if !timer.is_running() {
            debug!(id = %timer.id, "watched timer left running state");
            write!(stdout, "\r{}", paused_line(&timer))?;
            stdout.flush()?;
            break;
        }

        let elapsed = format_compact(timer.elapsed(clock.now_ms()));
        write!(stdout, "\r{elapsed}  {}", timer.description)?;
        stdout.flush()?;
    }
    Ok(())
}

fn paused_line(timer: &Timer) -> String {
    format!("{}  {} (paused)", format_compact(timer.accumulated_time), timer.description)
}
