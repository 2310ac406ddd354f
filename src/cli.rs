//! CLI definitions: argument parsing, subcommands, and help text.

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

use crate::core::config::ProviderKind;
use crate::core::duration::DEFAULT_DURATION;

pub use clap_complete::generate;

const AFTER_HELP: &str = "\
EXAMPLES:
  itinerary-organizer -i trip.txt                 Organize a 3N 4D trip from a file
  itinerary-organizer -i - -d \"5N 6D\"             Read components from stdin
  itinerary-organizer --sample --show-prompt      Print the prompt for the built-in sample
  itinerary-organizer --sample --provider gemini  Use Google Gemini instead of OpenRouter
  itinerary-organizer models --query llama        Show matching catalog models and the selection
  itinerary-organizer config                      Show provider, endpoints, and key status
  itinerary-organizer completions zsh             Generate zsh completions
";

/// Command-line arguments for the application.
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Turn raw tour and transfer notes into a day-by-day itinerary",
    after_help = AFTER_HELP
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// File with the raw itinerary components ('-' reads stdin)
    #[arg(short = 'i', long, value_name = "FILE", conflicts_with = "sample")]
    pub input: Option<String>,

    /// Use the built-in Singapore sample components
    #[arg(long)]
    pub sample: bool,

    /// Trip duration: a preset (see `durations`) or any custom label
    #[arg(short = 'd', long, default_value = DEFAULT_DURATION)]
    pub duration: String,

    /// LLM provider (overrides ITINERARY_PROVIDER)
    #[arg(long, value_enum, global = true)]
    pub provider: Option<ProviderKind>,

    /// Use this model and skip catalog selection
    #[arg(short = 'm', long, help = "Model ID (e.g. openai/gpt-4o-mini)")]
    pub model: Option<String>,

    /// Print the prompt that would be sent, then exit without calling the API
    #[arg(long)]
    pub show_prompt: bool,

    /// Increase log verbosity (use multiple times for debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce log output (errors only)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show catalog models, their suitability, and which one would be selected
    Models {
        /// Filter models by id or modality
        #[arg(long)]
        query: Option<String>,
        /// Include unsuitable models with the reason they were rejected
        #[arg(long)]
        all: bool,
        /// Print the listed models as JSON
        #[arg(long)]
        json: bool,
    },
    /// List preset trip durations
    Durations,
    /// Show provider, endpoints, model source, and API key status
    Config,
    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        #[arg(value_parser = clap::value_parser!(Shell))]
        shell: Shell,
    },
}

impl Args {
    /// Log level based on -v/-q flags: error, warn, info, or debug.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose >= 2 {
            "debug"
        } else if self.verbose >= 1 {
            "info"
        } else {
            "warn"
        }
    }
}
