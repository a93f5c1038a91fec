//! Static forecast table
//!
//! Stands in for a real weather API: a fixed three-day forecast for a
//! handful of destinations and a generic one for everywhere else.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::{CollaboratorError, ForecastLookup};
use crate::domain::ForecastSet;

/// (key, [(description, temperature); yesterday, today, tomorrow])
type Entry = (&'static str, [(&'static str, &'static str); 3]);

const TABLE: &[Entry] = &[
    (
        "paris",
        [
            ("Overcast with light rain", "19°C"),
            ("Partly cloudy with a chance of light showers in the evening", "22°C"),
            ("Sunny intervals", "23°C"),
        ],
    ),
    (
        "tokyo",
        [
            ("Humid with scattered clouds", "27°C"),
            ("Sunny and warm, perfect for sightseeing", "28°C"),
            ("Hot with afternoon haze", "30°C"),
        ],
    ),
    (
        "new york",
        [
            ("Breezy and clear", "20°C"),
            ("Cooler with a chance of rain, bring a jacket", "18°C"),
            ("Showers clearing by afternoon", "17°C"),
        ],
    ),
    (
        "london",
        [
            ("Overcast", "14°C"),
            ("Overcast with intermittent drizzle", "15°C"),
            ("Light rain", "13°C"),
        ],
    ),
    (
        "bali",
        [
            ("Hot and humid", "31°C"),
            ("Hot and humid with afternoon thunderstorms likely", "30°C"),
            ("Thunderstorms", "29°C"),
        ],
    ),
    (
        "rome",
        [
            ("Sunny", "26°C"),
            ("Sunny and pleasant, ideal for exploring ancient ruins", "25°C"),
            ("Clear skies", "27°C"),
        ],
    ),
    (
        "barcelona",
        [
            ("Sunny with a sea breeze", "26°C"),
            ("Warm and sunny, don't forget your sunglasses", "27°C"),
            ("Mostly sunny", "28°C"),
        ],
    ),
    (
        "berlin",
        [
            ("Cloudy", "18°C"),
            ("Mild with a mix of sun and clouds", "20°C"),
            ("Light showers", "17°C"),
        ],
    ),
    (
        "sydney",
        [
            ("Clear and breezy", "22°C"),
            ("Sunny skies, great for beach activities", "24°C"),
            ("Partly cloudy", "23°C"),
        ],
    ),
    (
        "dubai",
        [
            ("Very hot and hazy", "39°C"),
            ("Very hot, stay hydrated and seek shade", "38°C"),
            ("Scorching sun", "40°C"),
        ],
    ),
    (
        "reykjavik",
        [
            ("Windy with drizzle", "7°C"),
            ("Chilly and windy, pack warm layers", "8°C"),
            ("Cold with sleet showers", "5°C"),
        ],
    ),
    (
        "cancun",
        [
            ("Hot with passing showers", "30°C"),
            ("Hot and sunny, perfect beach weather", "29°C"),
            ("Sunny and humid", "31°C"),
        ],
    ),
    (
        "amsterdam",
        [
            ("Drizzle", "16°C"),
            ("Cloudy with a chance of showers, an umbrella might be useful", "17°C"),
            ("Breezy with sunny spells", "18°C"),
        ],
    ),
    (
        "mount everest",
        [
            ("Whiteout conditions", "-25°C"),
            ("Extremely cold and snowy, specialized gear required", "-20°C"),
            ("Heavy snow and high winds", "-22°C"),
        ],
    ),
    (
        "sahara desert",
        [
            ("Scorching by day, cold at night", "41°C"),
            ("Scorching hot during the day, cold at night", "40°C"),
            ("Clear and dry", "42°C"),
        ],
    ),
];

/// Forecast lookup backed by a fixed table
#[derive(Debug, Clone, Default)]
pub struct StaticForecastTable {
    delay: Duration,
}

impl StaticForecastTable {
    /// Answer immediately
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait `ms` milliseconds before answering, like a network call would
    pub fn with_delay_ms(ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(ms),
        }
    }

    /// Table key: first comma-separated segment, trimmed and lowercased
    ///
    /// "Paris, France" and " PARIS" both map to "paris".
    fn key(destination: &str) -> String {
        destination.split(',').next().unwrap_or_default().trim().to_lowercase()
    }

    /// Resolve without the simulated delay
    pub fn resolve(destination: &str) -> ForecastSet {
        let key = Self::key(destination);
        match TABLE.iter().find(|(k, _)| *k == key) {
            Some(&(_, days)) => ForecastSet::new(destination, days.map(|(d, t)| (d.to_string(), t.to_string()))),
            None => {
                debug!(%destination, "resolve: no table entry, using generic forecast");
                ForecastSet::new(
                    destination,
                    [
                        (format!("Mild conditions in {}", destination), "19°C".to_string()),
                        (
                            format!(
                                "Pleasant weather expected in {}. Pack for moderate temperatures.",
                                destination
                            ),
                            "20°C".to_string(),
                        ),
                        ("Similar conditions expected".to_string(), "21°C".to_string()),
                    ],
                )
            }
        }
    }
}

#[async_trait]
impl ForecastLookup for StaticForecastTable {
    async fn lookup_forecast(&self, destination: &str) -> Result<ForecastSet, CollaboratorError> {
        debug!(%destination, delay_ms = self.delay.as_millis() as u64, "lookup_forecast: called");
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(Self::resolve(destination))
    }
}
