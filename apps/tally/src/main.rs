//! Tally - basic arithmetic calculator with a persistent calculation
//! history
//!
//! Runs the full-screen keypad UI by default; `tally console` starts the
//! line-oriented console loop instead, and `tally history` prints every
//! recorded calculation. The database (and its schema) is initialized
//! before any front-end starts; a storage failure at startup is fatal.

mod console;
mod keypad;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tally_store::{init_schema, CalculationStore, FailureJournal, SqliteClient, SqliteStore};
use tracing::debug;

#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Tally - a basic calculator that remembers every calculation")]
struct Cli {
    /// SQLite database path
    #[arg(long, env = "TALLY_DB_PATH", default_value = "data/calculations.db")]
    db_path: PathBuf,

    /// Failure journal path
    #[arg(long, default_value = tally_store::DEFAULT_JOURNAL_PATH)]
    journal_path: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Line-oriented console calculator
    Console,
    /// Print every recorded calculation
    History,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Initialize logging; stderr keeps log lines out of the keypad UI
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Storage bootstrap runs before any front-end; failure here is fatal
    let client = match SqliteClient::open(&cli.db_path).await {
        Ok(client) => client,
        Err(err) => {
            eprintln!(
                "Failed to open calculation database {}: {}",
                cli.db_path.display(),
                err
            );
            std::process::exit(1);
        },
    };
    if let Err(err) = init_schema(client.pool()).await {
        eprintln!("Failed to initialize database schema: {}", err);
        std::process::exit(1);
    }
    debug!("storage ready at {}", cli.db_path.display());

    let store = Arc::new(SqliteStore::new(client));
    let journal = FailureJournal::new(&cli.journal_path);

    match cli.command {
        Some(Commands::Console) => console::run(store, journal).await,
        Some(Commands::History) => print_history(store.as_ref()).await,
        None => keypad::run(store, journal).await,
    }
}

async fn print_history(store: &SqliteStore) -> Result<()> {
    let lines = store.list_all().await?;
    if lines.is_empty() {
        println!("No calculations recorded yet.");
    } else {
        for line in &lines {
            println!("{line}");
        }
    }
    Ok(())
}
