//! CLI argument parsing for historystore

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hs")]
#[command(author, version, about = "Inspect a bounded history log", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// History directory (overrides config)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// History file name inside the directory (overrides config)
    #[arg(short, long)]
    pub file: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List entries, newest first
    List {
        /// Print raw JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Print a single entry as JSON
    Show {
        /// Entry ID
        #[arg(required = true)]
        id: String,
    },

    /// Remove every entry
    Clear,

    /// Print the path of the history file
    Path,
}
