//! REPL session management

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use crate::collab::Collaborators;
use crate::domain::TripParameters;
use crate::history::{TripHistory, TripHistoryEntry};
use crate::planner::{ForgottenItemReconciler, PackingOrchestrator};
use crate::render;
use crate::session::PackingSession;

/// Interactive REPL session
pub struct ReplSession {
    orchestrator: PackingOrchestrator,
    reconciler: ForgottenItemReconciler,
    history: Option<TripHistory>,
    packing: PackingSession,
}

/// What the main loop should do after a command
#[derive(Debug, PartialEq, Eq)]
enum SlashResult {
    Continue,
    Quit,
}

impl ReplSession {
    /// Create a new REPL session
    pub fn new(collaborators: &Collaborators, history: Option<TripHistory>) -> Self {
        Self {
            orchestrator: PackingOrchestrator::from_collaborators(collaborators),
            reconciler: ForgottenItemReconciler::new(collaborators.forgotten.clone()),
            history,
            packing: PackingSession::new(),
        }
    }

    /// Run the REPL main loop
    pub async fn run(&mut self) -> Result<()> {
        self.print_welcome();

        // Create readline editor for proper line editing
        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        loop {
            let readline = rl.readline(&format!("{} ", ">".bright_green()));

            match readline {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }

                    let _ = rl.add_history_entry(input);

                    if self.handle_input(input).await == SlashResult::Quit {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C - just show new prompt
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D - exit
                    println!();
                    break;
                }
                Err(err) => {
                    return Err(eyre::eyre!("Readline error: {}", err));
                }
            }
        }

        println!("Safe travels!");
        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "PackSmart Interactive".bright_cyan().bold());
        println!("Start with {}", "/plan 5 beach Cancun".yellow());
        println!("Type {} for help, {} to quit", "/help".yellow(), "/quit".yellow());
        println!();
    }

    /// Dispatch one line of input
    ///
    /// Text without a leading slash is added to the list as a custom item.
    async fn handle_input(&mut self, input: &str) -> SlashResult {
        if !input.starts_with('/') {
            self.add_item(input);
            return SlashResult::Continue;
        }

        let (cmd, args) = input.split_once(char::is_whitespace).unwrap_or((input, ""));
        let args = args.trim();
        debug!(%cmd, %args, "handle_input: slash command");

        match cmd {
            "/help" | "/h" => self.print_help(),
            "/quit" | "/q" | "/exit" => return SlashResult::Quit,
            "/plan" | "/p" => self.plan(args).await,
            "/add" | "/a" => self.add_item(args),
            "/rm" | "/remove" => self.remove_item(args),
            "/toggle" | "/t" => self.toggle_item(args),
            "/forgot" | "/f" => self.forgot().await,
            "/list" | "/l" => render::print_session_items(&self.packing),
            "/weather" | "/w" => match self.packing.weather() {
                Some(weather) => render::print_forecast(weather),
                None => println!("{}", "No forecast yet. Plan a trip first.".dimmed()),
            },
            "/images" => match self.packing.images() {
                Some(images) => render::print_images(images),
                None => println!("{}", "No images yet. Plan a trip first.".dimmed()),
            },
            "/history" => self.show_history(),
            "/restore" => self.restore(args),
            "/clear-history" => self.clear_history(),
            _ => {
                println!("{} Unknown command: {}", "?".yellow(), cmd);
                println!("Type {} for available commands", "/help".yellow());
            }
        }
        SlashResult::Continue
    }

    fn print_help(&self) {
        println!();
        println!("{}", "Available Commands:".bright_cyan());
        println!("  {:34} Plan a trip", "/plan <days> <type> <destination>".yellow());
        println!("  {:34} Add your own item (or just type it)", "/add <item>".yellow());
        println!("  {:34} Remove item number n", "/rm <n>".yellow());
        println!("  {:34} Mark item n packed or unpacked", "/toggle <n>".yellow());
        println!("  {:34} Check for commonly forgotten items", "/forgot".yellow());
        println!("  {:34} Show the packing list", "/list".yellow());
        println!("  {:34} Show the forecast", "/weather".yellow());
        println!("  {:34} Show destination images", "/images".yellow());
        println!("  {:34} Show recent trips", "/history".yellow());
        println!("  {:34} Reopen a trip from history", "/restore <n|id>".yellow());
        println!("  {:34} Delete all history", "/clear-history".yellow());
        println!("  {:34} Exit", "/quit".yellow());
        println!();
    }

    /// `/plan <days> <type> <destination...>`
    async fn plan(&mut self, args: &str) {
        let mut parts = args.splitn(3, char::is_whitespace);
        let (Some(days), Some(trip_type), Some(destination)) = (parts.next(), parts.next(), parts.next()) else {
            println!("{} /plan <days> <type> <destination>", "Usage:".yellow());
            return;
        };
        let Ok(days) = days.parse::<u32>() else {
            println!("{} '{}' is not a number of days", "Error:".red().bold(), days);
            return;
        };
        let params = match TripParameters::new(destination, trip_type, days) {
            Ok(params) => params,
            Err(e) => {
                println!("{} {}", "Error:".red().bold(), e);
                return;
            }
        };

        let ticket = self.packing.begin_plan(params);
        println!("{}", format!("Planning {}...", ticket.params).dimmed());
        let result = self.orchestrator.plan_trip(&ticket.params).await;
        if !self.packing.apply_plan(&ticket, result) {
            return;
        }

        if let Some(failure) = self.packing.last_failure() {
            render::print_failure(failure);
            return;
        }

        render::print_trip_header(&ticket.params);
        if let Some(weather) = self.packing.weather() {
            render::print_forecast(weather);
        }
        render::print_session_items(&self.packing);
        self.record_trip();
    }

    fn record_trip(&self) {
        if let (Some(history), Some(record)) = (&self.history, self.packing.snapshot()) {
            history.append(record);
        }
    }

    fn add_item(&mut self, name: &str) {
        match self.packing.add_item(name) {
            Ok(item) => println!("{} Added {}", "+".bright_green(), item.name),
            Err(e) => println!("{} {}", "!".yellow(), e),
        }
    }

    /// Resolve a 1-based list number to an item id
    fn item_id(&self, arg: &str) -> Option<String> {
        let number = arg.parse::<usize>().ok()?;
        let items = self.packing.display_items();
        number
            .checked_sub(1)
            .and_then(|index| items.get(index))
            .map(|item| item.id.clone())
    }

    fn remove_item(&mut self, arg: &str) {
        match self.item_id(arg) {
            Some(id) if self.packing.remove_item(&id) => println!("{} Removed item {}", "-".bright_red(), arg),
            _ => println!("{} No item number '{}'. See {}", "!".yellow(), arg, "/list".yellow()),
        }
    }

    fn toggle_item(&mut self, arg: &str) {
        let toggled = self.item_id(arg).and_then(|id| self.packing.toggle_item(&id));
        match toggled {
            Some(true) => println!("{} Packed item {}", "✓".bright_green(), arg),
            Some(false) => println!("{} Unpacked item {}", "○".normal(), arg),
            None => println!("{} No item number '{}'. See {}", "!".yellow(), arg, "/list".yellow()),
        }
    }

    async fn forgot(&mut self) {
        let (trip, names) = match self.packing.forgotten_request() {
            Ok(request) => request,
            Err(e) => {
                println!("{} {}", "!".yellow(), e);
                return;
            }
        };

        println!("{}", "Checking for commonly forgotten items...".dimmed());
        let result = self.reconciler.reconcile_forgotten(&trip, &names).await;
        match self.packing.apply_forgotten(result) {
            Ok(outcome) => render::print_merge_outcome(outcome),
            Err(failure) => render::print_failure(&failure),
        }
    }

    fn history_entries(&self) -> Vec<TripHistoryEntry> {
        self.history.as_ref().map(|h| h.list()).unwrap_or_default()
    }

    fn show_history(&self) {
        if self.history.is_none() {
            println!("{}", "History is unavailable.".dimmed());
            return;
        }
        render::print_history(&self.history_entries());
    }

    /// `/restore <n|id>`
    fn restore(&mut self, arg: &str) {
        let entries = self.history_entries();
        let entry = match arg.parse::<usize>() {
            Ok(number) => number.checked_sub(1).and_then(|index| entries.get(index)),
            Err(_) => entries.iter().find(|e| e.id == arg),
        };

        match entry {
            Some(entry) => {
                self.packing.restore(entry);
                render::print_trip_header(&entry.record.trip_parameters);
                if let Some(weather) = self.packing.weather() {
                    render::print_forecast(weather);
                }
                render::print_session_items(&self.packing);
            }
            None => println!("{} No history entry '{}'. See {}", "!".yellow(), arg, "/history".yellow()),
        }
    }

    fn clear_history(&mut self) {
        if let Some(history) = &self.history {
            history.clear();
            println!("{}", "History cleared.".dimmed());
        }
    }
}
