use chrono::Local;
use timesheet_core::{format_clock_time, format_compact, Config, CoreError, DayLabels, Timesheet};

use super::timer::short_id;
use super::{print_event, CliResult};

pub fn list(json: bool) -> CliResult {
    let config = Config::load_or_default();
    let sheet = Timesheet::open();
    let labels = DayLabels::for_locale(config.locale);
    let groups = sheet
        .history()
        .sorted_by_completion()
        .group_by_day(&Local::now(), &labels);

    if json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
        return Ok(());
    }

    if groups.is_empty() {
        println!("No completed activities.");
        return Ok(());
    }
    for group in &groups {
        println!("{}", group.label);
        for item in &group.items {
            println!(
                "  {}  {}  {}  ({})",
                format_clock_time(item.completed_at, &Local),
                format_compact(item.total_duration),
                item.description,
                short_id(&item.id)
            );
        }
    }
    println!(
        "Total: {}",
        format_compact(sheet.history().total_duration())
    );
    Ok(())
}

pub fn delete(id: &str) -> CliResult {
    let mut sheet = Timesheet::open();
    let id = match sheet.resolve_history_id(id) {
        Ok(id) => id,
        Err(CoreError::NotFound { id }) => {
            eprintln!("no history entry matches '{id}'");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    if let Some(event) = sheet.delete_history(&id) {
        print_event(&event)?;
    }
    Ok(())
}

pub fn clear() -> CliResult {
    let mut sheet = Timesheet::open();
    print_event(&sheet.clear_history())
}
