//! PackSmart - travel packing assistant
//!
//! CLI entry point.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result, eyre};
use tracing::{debug, info};

use packsmart::cli::{Cli, Command, HistoryCommand, OutputFormat, get_log_path};
use packsmart::config::Config;
use packsmart::domain::{PackingItem, TripParameters};
use packsmart::history::open_history;
use packsmart::planner::{ForgottenItemReconciler, PackingOrchestrator, merge_additions};
use packsmart::session::PackingSession;
use packsmart::{create_collaborators, render, repl};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_path = get_log_path();
    let log_dir = log_path.parent().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!("PackSmart loaded config: backend={}", config.backend);

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::Plan {
            destination,
            trip_type,
            days,
            no_history,
            format,
        }) => {
            let params = TripParameters::new(destination, trip_type, days)?;
            cmd_plan(&config, params, !no_history, format).await
        }
        Some(Command::Forgot {
            destination,
            trip_type,
            days,
            items,
            format,
        }) => {
            let params = TripParameters::new(destination, trip_type, days)?;
            cmd_forgot(&config, &params, items, format).await
        }
        Some(Command::History { command }) => cmd_history(&config, command),
        Some(Command::Config) => {
            print!("{}", serde_yaml::to_string(&config).context("Failed to serialize config")?);
            Ok(())
        }
        Some(Command::Repl) | None => repl::run_interactive(&config).await,
    }
}

async fn cmd_plan(config: &Config, params: TripParameters, record: bool, format: OutputFormat) -> Result<()> {
    config.validate()?;
    let collaborators = create_collaborators(config).context("Failed to set up collaborators")?;
    let orchestrator = PackingOrchestrator::from_collaborators(&collaborators);

    let mut session = PackingSession::new();
    let ticket = session.begin_plan(params);
    let result = orchestrator.plan_trip(&ticket.params).await;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text if !result.is_failure() => {
            render::print_trip_header(&ticket.params);
            render::print_forecast(&result.weather);
            println!("{}", "Packing list:".bright_cyan());
            render::print_item_list(&result.items);
            render::print_images(&result.images);
        }
        OutputFormat::Text => {}
    }

    if let Some(failure) = &result.failure {
        return Err(match &failure.detail {
            Some(detail) => eyre!("{} ({})", failure.message, detail),
            None => eyre!("{}", failure.message),
        });
    }

    session.apply_plan(&ticket, result);
    if record && let Some(snapshot) = session.snapshot() {
        let history = open_history(config)?;
        let entries = history.append(snapshot);
        debug!(entries = entries.len(), "cmd_plan: recorded trip");
    }
    Ok(())
}

async fn cmd_forgot(config: &Config, params: &TripParameters, items: Vec<String>, format: OutputFormat) -> Result<()> {
    config.validate()?;
    let collaborators = create_collaborators(config).context("Failed to set up collaborators")?;
    let reconciler = ForgottenItemReconciler::new(collaborators.forgotten.clone());

    let items: Vec<String> = items.into_iter().map(|i| i.trim().to_string()).filter(|i| !i.is_empty()).collect();
    let result = reconciler.reconcile_forgotten(params, &items).await;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }
    if let Some(failure) = result.failure {
        return Err(eyre!("{}", failure.message));
    }
    if format == OutputFormat::Json {
        return Ok(());
    }

    let mut live: Vec<PackingItem> = items.into_iter().map(PackingItem::custom).collect();
    let packed = live.len();
    let outcome = merge_additions(&mut live, result.additions);
    render::print_merge_outcome(outcome);
    for item in &live[packed..] {
        println!("  {} {}", "+".bright_green(), item.name);
    }
    Ok(())
}

fn cmd_history(config: &Config, command: HistoryCommand) -> Result<()> {
    let history = open_history(config)?;
    match command {
        HistoryCommand::List => render::print_history(&history.list()),
        HistoryCommand::Show { id } => {
            let entry = history.get(&id).ok_or_else(|| eyre!("Entry not found: {}", id))?;
            render::print_history_entry(&entry);
        }
        HistoryCommand::Clear => {
            history.clear();
            println!("History cleared.");
        }
    }
    Ok(())
}
