//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// PackSmart - travel packing assistant
#[derive(Parser)]
#[command(
    name = "ps",
    about = "Packing lists, forecasts and 'did you forget' checks for your next trip",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute (defaults to the REPL)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Plan a trip: forecast, packing list and images
    Plan {
        /// Where you are going, e.g. "Paris, France"
        destination: String,

        /// Trip type (beach, business, city, hiking, camping, ski, ...)
        #[arg(short = 't', long = "type")]
        trip_type: String,

        /// Trip length in days
        #[arg(short, long)]
        days: u32,

        /// Do not record this trip in history
        #[arg(long)]
        no_history: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Ask what you might have forgotten
    Forgot {
        /// Where you are going
        destination: String,

        /// Trip type
        #[arg(short = 't', long = "type")]
        trip_type: String,

        /// Trip length in days
        #[arg(short, long)]
        days: u32,

        /// Items already packed, comma separated
        #[arg(short, long, value_delimiter = ',')]
        items: Vec<String>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Browse or clear past trips
    History {
        #[command(subcommand)]
        command: HistoryCommand,
    },

    /// Interactive session
    Repl,

    /// Print the effective configuration
    Config,
}

/// History subcommands
#[derive(Debug, Subcommand)]
pub enum HistoryCommand {
    /// List recent trips, newest first
    List,

    /// Show one trip
    Show {
        /// Entry ID (from `history list`)
        id: String,
    },

    /// Delete all history
    Clear,
}

/// Output format for plan and forgot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

/// Path of the log file written by the `ps` binary
pub fn get_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("packsmart")
        .join("logs")
        .join("packsmart.log")
}
