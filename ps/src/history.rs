//! Trip history records
//!
//! Completed plans are appended to a [`historystore::HistoryLog`]. Images are
//! never persisted; a restored trip shows placeholders.

use eyre::{Context, Result};
use historystore::{HistoryEntry, HistoryLog, Record};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::domain::{ForecastSet, ImageSet, PackingItem, TripParameters};

/// History file inside `history.dir`
pub const HISTORY_FILE_NAME: &str = "packsmart-trip-history.json";

/// Snapshot of one planned trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRecord {
    pub trip_parameters: TripParameters,
    pub items: Vec<PackingItem>,
    pub weather: Option<ForecastSet>,
    /// Always `None` once stored
    pub images: Option<ImageSet>,
}

impl Record for TripRecord {
    fn prepare_for_storage(&mut self) {
        self.images = None;
    }
}

pub type TripHistory = HistoryLog<TripRecord>;
pub type TripHistoryEntry = HistoryEntry<TripRecord>;

/// Open the trip history configured in `config`
pub fn open_history(config: &Config) -> Result<TripHistory> {
    debug!(dir = %config.history.dir.display(), "open_history: called");
    HistoryLog::open(&config.history.dir, HISTORY_FILE_NAME)
        .context(format!("Failed to open history in {}", config.history.dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(destination: &str) -> TripRecord {
        TripRecord {
            trip_parameters: TripParameters::new(destination, "city", 3).unwrap(),
            items: vec![PackingItem::suggestion("Phone"), PackingItem::custom("Camera")],
            weather: Some(ForecastSet::unavailable(destination)),
            images: Some(ImageSet::placeholders(destination)),
        }
    }

    #[test]
    fn test_stored_layout() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.history.dir = temp.path().to_path_buf();

        let history = open_history(&config).unwrap();
        let entries = history.append(record("Paris"));
        assert_eq!(entries.len(), 1);
        assert!(entries[0].record.images.is_none());

        let raw = std::fs::read_to_string(temp.path().join(HISTORY_FILE_NAME)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let entry = &json[0];
        assert!(entry["id"].is_string());
        assert!(entry["timestamp"].is_i64());
        assert_eq!(entry["tripParameters"]["destination"], "Paris");
        assert_eq!(entry["tripParameters"]["tripType"], "city");
        assert_eq!(entry["items"][1]["isSuggestion"], false);
        assert!(entry["images"].is_null());
    }

    #[test]
    fn test_round_trip() {
        let temp = TempDir::new().unwrap();
        let history: TripHistory = HistoryLog::open(temp.path(), HISTORY_FILE_NAME).unwrap();
        history.append(record("Rome"));
        history.append(record("Oslo"));

        let entries = history.list();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].record.trip_parameters.destination, "Oslo");
        assert_eq!(entries[1].record.items.len(), 2);
        assert_eq!(entries[1].record.weather, Some(ForecastSet::unavailable("Rome")));
    }
}
