use clap::Args;
use timesheet_core::summary::{forget_api_key, request_summary, store_api_key};
use timesheet_core::{Config, GeminiSummarizer, InFlight, Timesheet};

use super::CliResult;

#[derive(Args)]
pub struct SummaryArgs {
    /// Store an API key in the OS keyring instead of summarizing
    #[arg(long, value_name = "KEY", conflicts_with = "forget_key")]
    set_key: Option<String>,
    /// Remove the stored API key
    #[arg(long)]
    forget_key: bool,
}

pub fn run(args: SummaryArgs) -> CliResult {
    if let Some(key) = args.set_key {
        store_api_key(&key)?;
        println!("api key stored");
        return Ok(());
    }
    if args.forget_key {
        forget_api_key()?;
        println!("api key removed");
        return Ok(());
    }

    let config = Config::load_or_default();
    let sheet = Timesheet::open();
    let summarizer = GeminiSummarizer::from_env(&config.summary, config.locale);
    let gate = InFlight::new();

    let runtime = tokio::runtime::Runtime::new()?;
    let text = runtime.block_on(request_summary(&summarizer, &gate, sheet.history().items()));
    match text {
        Some(text) => println!("{text}"),
        None => eprintln!("a summary is already being generated"),
    }
    Ok(())
}
