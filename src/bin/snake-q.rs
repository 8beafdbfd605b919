//! snake-q CLI - Train and inspect a tabular Q-learning Snake agent
//!
//! Logging goes through `tracing`; set `RUST_LOG` to adjust verbosity
//! (default `snake_q=info,warn`).

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "snake-q")]
#[command(version, about = "Tabular Q-learning agent for the Snake game", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the agent, resuming from its snapshot when one exists
    Train(Box<snake_q::cli::commands::train::TrainArgs>),

    /// Summarize a saved value table
    Inspect(snake_q::cli::commands::inspect::InspectArgs),
}

fn init_logging() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("snake_q=info,warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> Result<()> {
    init_logging()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => snake_q::cli::commands::train::execute(*args),
        Commands::Inspect(args) => snake_q::cli::commands::inspect::execute(args),
    }
}
