pub mod config;
pub mod history;
pub mod summary;
pub mod timer;
pub mod watch;

use timesheet_core::Event;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

pub fn print_event(event: &Event) -> CliResult {
    println!("{}", serde_json::to_string_pretty(event)?);
    Ok(())
}
