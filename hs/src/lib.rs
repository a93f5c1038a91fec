//! HistoryStore - bounded newest-first history log
//!
//! Keeps the most recent records of some serializable type in a single JSON
//! file. The log is a ring with a fixed capacity: appending prepends the new
//! entry and evicts the oldest once the cap is reached.
//!
//! # Layout
//!
//! ```text
//! <dir>/
//! └── <file_name>          # JSON array, newest first, at most `capacity` entries
//! ```
//!
//! Persistence is best-effort. A failed write is logged and swallowed, and
//! the caller still receives the in-memory view of the attempted update. A
//! missing or unreadable file reads as an empty log.
//!
//! # Example
//!
//! ```ignore
//! use historystore::HistoryLog;
//!
//! let log: HistoryLog<serde_json::Value> = HistoryLog::open(".history", "trips.json")?;
//! let entries = log.append(serde_json::json!({ "destination": "Paris" }));
//! assert_eq!(entries.len(), 1);
//! ```

pub mod cli;
pub mod config;
mod store;

pub use store::{HistoryEntry, HistoryError, HistoryLog, Record};

/// Default number of entries retained
pub const DEFAULT_CAPACITY: usize = 10;

/// Default history file name
pub const DEFAULT_FILE_NAME: &str = "history.json";
