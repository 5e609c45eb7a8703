use timesheet_core::{format_compact, CoreError, TimerStatus, Timesheet};

use super::{print_event, CliResult};

pub fn start(description: &str) -> CliResult {
    let mut sheet = Timesheet::open();
    let event = sheet.start(description)?;
    print_event(&event)
}

pub fn pause(id: &str) -> CliResult {
    let mut sheet = Timesheet::open();
    let Some(id) = resolve_or_skip(&sheet, id)? else {
        return Ok(());
    };
    match sheet.pause(&id) {
        Some(event) => print_event(&event),
        None => print_event(&sheet.snapshot()),
    }
}

pub fn resume(id: &str) -> CliResult {
    let mut sheet = Timesheet::open();
    let Some(id) = resolve_or_skip(&sheet, id)? else {
        return Ok(());
    };
    match sheet.resume(&id) {
        Some(event) => print_event(&event),
        None => print_event(&sheet.snapshot()),
    }
}

pub fn stop(id: &str) -> CliResult {
    let mut sheet = Timesheet::open();
    let id = sheet.resolve_timer_id(id)?;
    let event = sheet.stop(&id)?;
    print_event(&event)
}

pub fn status(json: bool) -> CliResult {
    let sheet = Timesheet::open();
    let snapshot = sheet.snapshot();
    if json {
        return print_event(&snapshot);
    }

    if sheet.engine().is_empty() {
        println!("No active timers.");
        return Ok(());
    }
    let now = sheet.now_ms();
    for timer in sheet.engine().timers() {
        let state = match timer.status {
            TimerStatus::Running => "running",
            TimerStatus::Paused => "paused ",
        };
        println!(
            "[{state}] {}  {}  ({})",
            format_compact(timer.elapsed(now)),
            timer.description,
            short_id(&timer.id)
        );
    }
    Ok(())
}

/// Unknown ids are a silent no-op for pause and resume; ambiguity is still
/// an error.
fn resolve_or_skip(sheet: &Timesheet, id: &str) -> Result<Option<String>, CoreError> {
    match sheet.resolve_timer_id(id) {
        Ok(id) => Ok(Some(id)),
        Err(CoreError::NotFound { id }) => {
            eprintln!("no active timer matches '{id}'");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

