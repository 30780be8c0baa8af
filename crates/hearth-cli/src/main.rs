//! Hearth CLI
//!
//! Thin terminal frontend over hearth-core: a typing-animation demo, a
//! warranty calculator, and a seeded dashboard preview.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use hearth_core::config::Config;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hearth", version, about = "Household life management from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Animate example prompts with the typing effect
    Typing {
        /// How long to run the animation
        #[arg(long, default_value_t = 20)]
        seconds: u64,
    },
    /// Compute a warranty end date and remaining coverage
    Warranty {
        /// Purchase date (YYYY-MM-DD)
        #[arg(long)]
        date: chrono::NaiveDate,
        /// Warranty period length
        #[arg(long)]
        period: u32,
        /// Period unit: months or years
        #[arg(long, default_value = "months")]
        unit: hearth_core::WarrantyUnit,
    },
    /// Show a dashboard snapshot over seeded sample data
    Dashboard,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = Config::load()?;
    let cli = Cli::parse();

    match cli.command {
        Command::Typing { seconds } => commands::run_typing(&config, seconds).await,
        Command::Warranty { date, period, unit } => commands::run_warranty(date, period, unit),
        Command::Dashboard => commands::run_dashboard().await,
    }
}
