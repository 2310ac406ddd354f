//! # Itinerary Organizer
//!
//! Entry point: turns raw tour and transfer notes into a formatted day-by-day
//! itinerary using a hosted LLM (OpenRouter or Google Gemini).
//!
//! ## Modes
//! - Organize (default): `-i FILE`, `-i -` or `--sample`, with `-d` for duration
//! - `models`, `durations`, `config`: inspection commands
//! - `completions`: shell completion scripts

mod cli;
mod core;
mod run;

use clap::{CommandFactory, Parser};
use dotenv::dotenv;

use cli::{Args, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv().ok();

    let args = Args::parse();
    run::init_logger(&args);

    match &args.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = Args::command();
            cli::generate(*shell, &mut cmd, core::app::NAME, &mut std::io::stdout());
        }
        Some(Commands::Durations) => core::cli::run_durations(),
        Some(Commands::Config) => core::cli::run_config(args.provider),
        Some(Commands::Models { query, all, json }) => {
            let config = core::config::load(args.provider).unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            });
            core::cli::run_models(&config, query.as_deref(), *all, *json).await;
        }
        None => run::run_organize(&args).await,
    }

    Ok(())
}
