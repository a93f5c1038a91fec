//! Terminal output for plans, lists and history

use chrono::{Local, TimeZone};
use colored::Colorize;

use crate::domain::{Failure, ForecastSet, ImageSet, PackingItem, TripParameters};
use crate::history::TripHistoryEntry;
use crate::planner::MergeOutcome;
use crate::session::PackingSession;

pub fn print_trip_header(trip: &TripParameters) {
    println!();
    println!("{}", format!("Packing for {}", trip).bright_cyan().bold());
}

pub fn print_forecast(forecast: &ForecastSet) {
    println!("{}", "Weather:".bright_cyan());
    for point in forecast.points() {
        let temperature = if point.has_temperature() {
            point.temperature.bright_white().bold()
        } else {
            point.temperature.dimmed()
        };
        println!("  {:10} {:>6}  {}", point.label.as_str().yellow(), temperature, point.description);
    }
}

pub fn print_images(images: &ImageSet) {
    println!(
        "{} {} of {} generated",
        "Images:".bright_cyan(),
        images.real_count(),
        images.as_slice().len()
    );
    for (index, image) in images.iter().enumerate() {
        if image.is_placeholder {
            println!("  {}. {}", index + 1, image.alt_text.dimmed());
        } else {
            println!("  {}. {} ({})", index + 1, image.alt_text, source_preview(&image.source_data).dimmed());
        }
    }
}

/// Data URIs are long; show their media type and size only
fn source_preview(source: &str) -> String {
    match source.split_once(',') {
        Some((header, data)) if source.starts_with("data:") => format!("{}, {} bytes", header, data.len()),
        _ => source.to_string(),
    }
}

fn print_item(number: usize, item: &PackingItem) {
    let check = if item.packed { "[x]".green() } else { "[ ]".normal() };
    let name = if item.packed {
        item.name.dimmed().strikethrough()
    } else {
        item.name.normal()
    };
    println!("  {:>3}. {} {}", number, check, name);
}

/// A plain numbered list, as returned by a one-shot plan
pub fn print_item_list(items: &[PackingItem]) {
    if items.is_empty() {
        println!("  {}", "(no items)".dimmed());
        return;
    }
    for (index, item) in items.iter().enumerate() {
        print_item(index + 1, item);
    }
}

/// The session list, suggestions then user items, numbered for /toggle and /rm
pub fn print_session_items(session: &PackingSession) {
    let items = session.display_items();
    if items.is_empty() {
        println!("{}", "Your packing list is empty.".dimmed());
        return;
    }

    let suggestions = session.suggestions().count();
    println!(
        "{} {}/{} packed",
        "Packing list:".bright_cyan(),
        session.packed_count(),
        items.len()
    );
    for (index, item) in items.iter().enumerate() {
        if index == 0 && suggestions > 0 {
            println!("  {}", "Suggested".yellow());
        }
        if index == suggestions {
            println!("  {}", "Your items".yellow());
        }
        print_item(index + 1, item);
    }
}

pub fn print_failure(failure: &Failure) {
    println!("{} {}", "Error:".red().bold(), failure.message);
    if let Some(detail) = &failure.detail {
        println!("  {}", detail.dimmed());
    }
}

pub fn print_merge_outcome(outcome: MergeOutcome) {
    match outcome {
        MergeOutcome::Added(_) => println!("{} {}", "+".bright_green(), outcome),
        MergeOutcome::AllGood | MergeOutcome::NoNewItems => println!("{} {}", "✓".bright_green(), outcome),
    }
}

pub fn format_timestamp(millis: i64) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(time) => time.format("%Y-%m-%d %H:%M").to_string(),
        None => millis.to_string(),
    }
}

pub fn print_history(entries: &[TripHistoryEntry]) {
    if entries.is_empty() {
        println!("{}", "No trips in history.".dimmed());
        return;
    }
    println!("{}", "Recent trips:".bright_cyan());
    for (index, entry) in entries.iter().enumerate() {
        println!(
            "  {:>2}. {}  {}  {} ({} items)",
            index + 1,
            entry.id.dimmed(),
            format_timestamp(entry.timestamp),
            entry.record.trip_parameters,
            entry.record.items.len()
        );
    }
}

pub fn print_history_entry(entry: &TripHistoryEntry) {
    let record = &entry.record;
    print_trip_header(&record.trip_parameters);
    println!("{} {}", "Saved:".dimmed(), format_timestamp(entry.timestamp));
    if let Some(weather) = &record.weather {
        print_forecast(weather);
    }
    println!("{}", "Packing list:".bright_cyan());
    print_item_list(&record.items);
}
