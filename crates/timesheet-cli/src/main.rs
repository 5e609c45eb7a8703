use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "timesheet", version, about = "Timesheet CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new timer
    Start {
        /// What you are working on
        description: Vec<String>,
    },
    /// Pause a running timer
    Pause {
        /// Timer id or unique prefix
        id: String,
    },
    /// Resume a paused timer
    Resume {
        /// Timer id or unique prefix
        id: String,
    },
    /// Stop a timer and move it to history
    Stop {
        /// Timer id or unique prefix
        id: String,
    },
    /// Show active timers
    Status {
        /// Print the state snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Follow a running timer's elapsed time
    Watch {
        /// Timer id or unique prefix
        id: String,
    },
    /// Show completed activities grouped by day
    History {
        /// Print groups as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete one history entry
    Delete {
        /// History id or unique prefix
        id: String,
    },
    /// Delete all history
    Clear,
    /// Summarize history with the AI service
    Summary {
        #[command(flatten)]
        args: commands::summary::SummaryArgs,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("TIMESHEET_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Start { description } => commands::timer::start(&description.join(" ")),
        Commands::Pause { id } => commands::timer::pause(&id),
        Commands::Resume { id } => commands::timer::resume(&id),
        Commands::Stop { id } => commands::timer::stop(&id),
        Commands::Status { json } => commands::timer::status(json),
        Commands::Watch { id } => commands::watch::run(&id),
        Commands::History { json } => commands::history::list(json),
        Commands::Delete { id } => commands::history::delete(&id),
        Commands::Clear => commands::history::clear(),
        Commands::Summary { args } => commands::summary::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
