//! Trip parameters submitted by the user

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shortest accepted destination, in characters after trimming
pub const MIN_DESTINATION_LEN: usize = 2;

/// Longest accepted trip, in days
pub const MAX_DURATION_DAYS: u32 = 365;

/// Trip types offered by the CLI; any non-empty string is accepted
pub const KNOWN_TRIP_TYPES: &[&str] = &["beach", "business", "city", "hiking", "camping", "ski", "adventure", "family"];

/// Validation failures for trip parameters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TripError {
    #[error("Destination must be at least 2 characters")]
    DestinationTooShort,

    #[error("Please select a trip type")]
    MissingTripType,

    #[error("Duration must be between 1 and 365 days (got {0})")]
    DurationOutOfRange(u32),
}

/// One planning session's inputs
///
/// Immutable once built. `new` validates; the planner itself assumes the
/// values are already valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripParameters {
    pub destination: String,
    pub trip_type: String,
    /// Length of the trip in days
    pub duration: u32,
}

impl TripParameters {
    /// Build validated trip parameters
    ///
    /// Destination and trip type are trimmed.
    pub fn new(destination: impl Into<String>, trip_type: impl Into<String>, duration: u32) -> Result<Self, TripError> {
        let destination = destination.into().trim().to_string();
        let trip_type = trip_type.into().trim().to_string();

        if destination.chars().count() < MIN_DESTINATION_LEN {
            return Err(TripError::DestinationTooShort);
        }
        if trip_type.is_empty() {
            return Err(TripError::MissingTripType);
        }
        if !(1..=MAX_DURATION_DAYS).contains(&duration) {
            return Err(TripError::DurationOutOfRange(duration));
        }

        Ok(Self {
            destination,
            trip_type,
            duration,
        })
    }
}

impl std::fmt::Display for TripParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let unit = if self.duration == 1 { "day" } else { "days" };
        write!(f, "{} ({}, {} {})", self.destination, self.trip_type, self.duration, unit)
    }
}
