//! Three-point weather forecast

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Temperature value used when none is known
pub const TEMPERATURE_UNAVAILABLE: &str = "N/A";

/// Description used in every point of the fetch-failed forecast
pub const FETCH_FAILED_DESCRIPTION: &str = "Could not fetch weather data";

/// Which day a forecast point describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForecastLabel {
    Yesterday,
    Today,
    Tomorrow,
}

impl ForecastLabel {
    /// Labels in their fixed order
    pub const ORDER: [Self; 3] = [Self::Yesterday, Self::Today, Self::Tomorrow];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yesterday => "Yesterday",
            Self::Today => "Today",
            Self::Tomorrow => "Tomorrow",
        }
    }
}

impl std::fmt::Display for ForecastLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single day's forecast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub label: ForecastLabel,
    pub description: String,
    /// e.g. "22°C", or [`TEMPERATURE_UNAVAILABLE`]
    pub temperature: String,
}

impl ForecastPoint {
    pub fn has_temperature(&self) -> bool {
        self.temperature != TEMPERATURE_UNAVAILABLE
    }

    /// Description with the temperature appended when one is known
    pub fn summary(&self) -> String {
        if self.has_temperature() {
            format!("{} {}", self.description, self.temperature)
        } else {
            self.description.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Forecast points out of order: expected {expected}, found {found}")]
pub struct ForecastOrderError {
    expected: ForecastLabel,
    found: ForecastLabel,
}

/// Yesterday, today and tomorrow for one destination
///
/// Always exactly three points in label order. Construction assigns the
/// labels, and deserialization rejects anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawForecastSet")]
pub struct ForecastSet {
    pub destination: String,
    forecasts: [ForecastPoint; 3],
}

#[derive(Deserialize)]
struct RawForecastSet {
    destination: String,
    forecasts: [ForecastPoint; 3],
}

impl TryFrom<RawForecastSet> for ForecastSet {
    type Error = ForecastOrderError;

    fn try_from(raw: RawForecastSet) -> Result<Self, Self::Error> {
        for (point, expected) in raw.forecasts.iter().zip(ForecastLabel::ORDER) {
            if point.label != expected {
                return Err(ForecastOrderError {
                    expected,
                    found: point.label,
                });
            }
        }
        Ok(Self {
            destination: raw.destination,
            forecasts: raw.forecasts,
        })
    }
}

impl ForecastSet {
    /// Build a forecast from `(description, temperature)` pairs ordered
    /// yesterday, today, tomorrow
    pub fn new(destination: impl Into<String>, days: [(String, String); 3]) -> Self {
        let mut days = days.into_iter();
        let forecasts = ForecastLabel::ORDER.map(|label| {
            let (description, temperature) = days.next().unwrap_or_default();
            ForecastPoint {
                label,
                description,
                temperature,
            }
        });
        Self {
            destination: destination.into(),
            forecasts,
        }
    }

    /// The forecast shown when the lookup could not be completed
    pub fn unavailable(destination: impl Into<String>) -> Self {
        let day = || (FETCH_FAILED_DESCRIPTION.to_string(), TEMPERATURE_UNAVAILABLE.to_string());
        Self::new(destination, [day(), day(), day()])
    }

    pub fn points(&self) -> &[ForecastPoint; 3] {
        &self.forecasts
    }

    pub fn yesterday(&self) -> &ForecastPoint {
        &self.forecasts[0]
    }

    /// The point that feeds list generation
    pub fn today(&self) -> &ForecastPoint {
        &self.forecasts[1]
    }

    pub fn tomorrow(&self) -> &ForecastPoint {
        &self.forecasts[2]
    }
}
