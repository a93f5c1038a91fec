use chrono::{Local, TimeZone};
use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;

use historystore::HistoryLog;
use historystore::cli::{Cli, Command};
use historystore::config::Config;

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();
    Ok(())
}

/// One-line label for an entry: the `destination` field when the record has one
fn summarize(record: &serde_json::Value) -> String {
    record
        .get("tripParameters")
        .and_then(|t| t.get("destination"))
        .or_else(|| record.get("destination"))
        .and_then(|d| d.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| "-".to_string())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(dir) = cli.dir {
        config.dir = dir;
    }
    if let Some(file) = cli.file {
        config.file_name = file;
    }

    info!("historystore starting");

    let log: HistoryLog<serde_json::Value> = HistoryLog::open(&config.dir, &config.file_name)
        .context(format!("Failed to open history in {}", config.dir.display()))?
        .with_capacity(config.capacity);

    match cli.command {
        Command::List { json } => {
            let entries = log.list();
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if entries.is_empty() {
                println!("No history entries");
            } else {
                for entry in entries {
                    let when = Local
                        .timestamp_millis_opt(entry.timestamp)
                        .single()
                        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_else(|| entry.timestamp.to_string());
                    println!("{} {} {}", entry.id.yellow(), when.dimmed(), summarize(&entry.record));
                }
            }
        }
        Command::Show { id } => match log.get(&id) {
            Some(entry) => println!("{}", serde_json::to_string_pretty(&entry)?),
            None => return Err(eyre::eyre!("Entry not found: {}", id)),
        },
        Command::Clear => {
            log.clear();
            println!("{} Cleared history: {}", "✓".green(), log.path().display());
        }
        Command::Path => {
            println!("{}", log.path().display());
        }
    }

    Ok(())
}
