//! Offline backend
//!
//! Rule-based list generation and forgotten-item checks that need no API
//! key. Output is deterministic for a given input.

use std::collections::HashSet;

use async_trait::async_trait;
use tracing::debug;

use super::{
    CollaboratorError, ForgottenCheckInput, ForgottenItemCheck, ImageLookup, ListGenerationInput, ListGenerator,
};
use crate::domain::{ImageResource, normalize_name};

const ESSENTIALS: &[&str] = &["Phone", "Wallet", "Passport/ID", "Phone charger", "Toiletries"];

/// Below this many degrees Celsius, pack warm layers
const COLD_BELOW_C: i32 = 10;

/// At or above this many degrees Celsius, pack for heat
const HOT_FROM_C: i32 = 28;

const WET_WORDS: &[&str] = &["rain", "shower", "drizzle", "thunderstorm", "sleet"];

fn trip_type_items(trip_type: &str) -> &'static [&'static str] {
    match normalize_name(trip_type).as_str() {
        "beach" => &["Swimsuit", "Beach towel", "Sunscreen", "Flip-flops", "Sun hat"],
        "business" => &["Laptop", "Laptop charger", "Business attire", "Dress shoes", "Notebook"],
        "hiking" => &["Hiking boots", "Backpack", "Water bottle", "First aid kit", "Trail snacks"],
        "ski" => &["Ski jacket", "Ski pants", "Goggles", "Thermal base layers", "Gloves"],
        "camping" => &["Tent", "Sleeping bag", "Headlamp", "Camping stove", "Insect repellent"],
        "city" => &["Comfortable walking shoes", "Day bag", "Portable power bank"],
        "adventure" => &["Sturdy shoes", "Backpack", "First aid kit", "Headlamp"],
        "family" => &["Snacks", "Travel games", "First aid kit", "Wet wipes"],
        _ => &["Comfortable shoes", "Day bag"],
    }
}

fn commonly_forgotten(trip_type: &str) -> &'static [&'static str] {
    match normalize_name(trip_type).as_str() {
        "beach" => &["Sunscreen", "After-sun lotion"],
        "business" => &["Laptop", "Laptop charger", "Business cards"],
        "hiking" => &["Blister plasters", "Headlamp"],
        "ski" => &["Lip balm", "Hand warmers"],
        "camping" => &["Insect repellent", "Matches"],
        "city" => &["Portable power bank"],
        _ => &[],
    }
}

const ALWAYS_FORGOTTEN: &[&str] = &[
    "Phone charger",
    "Travel adapter",
    "Medications",
    "Toothbrush",
    "Reusable water bottle",
];

/// Pull the last "NN°C" reading out of a weather summary
fn parse_celsius(weather: &str) -> Option<i32> {
    weather
        .split_whitespace()
        .filter_map(|token| {
            token
                .trim_start_matches(|c: char| !c.is_ascii_digit() && c != '-')
                .trim_end_matches(|c: char| !c.is_alphanumeric())
                .strip_suffix("°C")
                .and_then(|n| n.parse::<i32>().ok())
        })
        .last()
}

/// Order-preserving list that drops names it has already seen
#[derive(Default)]
struct NameList {
    seen: HashSet<String>,
    names: Vec<String>,
}

impl NameList {
    fn push(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.seen.insert(normalize_name(&name)) {
            self.names.push(name);
        }
    }

    fn extend<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        for name in names {
            self.push(name);
        }
    }
}

/// Rule-based initial packing list
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineListGenerator;

impl OfflineListGenerator {
    fn build(input: &ListGenerationInput) -> Vec<String> {
        let mut list = NameList::default();
        list.extend(ESSENTIALS.iter().copied());

        let sets = input.duration.clamp(1, 10);
        list.push(format!("T-shirts (x{})", sets));
        list.push(format!("Underwear (x{})", sets));
        list.push(format!("Socks (x{})", sets));
        list.push("Sleepwear");
        if input.duration >= 4 {
            list.push("Laundry bag");
        }

        list.extend(trip_type_items(&input.trip_type).iter().copied());

        let weather = input.destination_weather.to_lowercase();
        if WET_WORDS.iter().any(|w| weather.contains(w)) {
            list.extend(["Umbrella", "Rain jacket"]);
        }
        let celsius = parse_celsius(&input.destination_weather);
        if celsius.is_some_and(|c| c < COLD_BELOW_C) || weather.contains("snow") {
            list.extend(["Warm jacket", "Thermal layers", "Gloves", "Beanie"]);
        }
        if celsius.is_some_and(|c| c >= HOT_FROM_C) || weather.contains("sunny") {
            list.extend(["Sunscreen", "Sunglasses", "Reusable water bottle"]);
        }

        list.names
    }
}

#[async_trait]
impl ListGenerator for OfflineListGenerator {
    async fn generate_list(&self, input: &ListGenerationInput) -> Result<Vec<String>, CollaboratorError> {
        debug!(trip_type = %input.trip_type, duration = input.duration, "generate_list: called");
        Ok(Self::build(input))
    }
}

/// Rule-based "did you forget" check
///
/// Suggests common oversights the user does not already have.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineForgottenCheck;

impl OfflineForgottenCheck {
    fn build(input: &ForgottenCheckInput) -> Vec<String> {
        if input.packed_items.is_empty() {
            return Vec::new();
        }

        let present: HashSet<String> = input.packed_items.iter().map(|n| normalize_name(n)).collect();
        let mut candidates = NameList::default();
        candidates.extend(ALWAYS_FORGOTTEN.iter().copied());
        candidates.extend(commonly_forgotten(&input.trip_type).iter().copied());
        if input.duration >= 7 {
            candidates.push("Laundry bag");
        }

        candidates
            .names
            .into_iter()
            .filter(|name| !present.contains(&normalize_name(name)))
            .collect()
    }
}

#[async_trait]
impl ForgottenItemCheck for OfflineForgottenCheck {
    async fn check_forgotten(&self, input: &ForgottenCheckInput) -> Result<Vec<String>, CollaboratorError> {
        debug!(trip_type = %input.trip_type, packed = input.packed_items.len(), "check_forgotten: called");
        Ok(Self::build(input))
    }
}

/// Offline image lookup: produces nothing, the planner pads with placeholders
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineImageLookup;

#[async_trait]
impl ImageLookup for OfflineImageLookup {
    async fn generate_images(&self, destination: &str) -> Result<Vec<ImageResource>, CollaboratorError> {
        debug!(%destination, "generate_images: offline backend, no images");
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_input(trip_type: &str, duration: u32, weather: &str) -> ListGenerationInput {
        ListGenerationInput {
            trip_type: trip_type.to_string(),
            duration,
            destination_weather: weather.to_string(),
        }
    }

    fn check_input(trip_type: &str, duration: u32, packed: &[&str]) -> ForgottenCheckInput {
        ForgottenCheckInput {
            trip_type: trip_type.to_string(),
            duration,
            packed_items: packed.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_parse_celsius() {
        assert_eq!(parse_celsius("Sunny intervals 23°C"), Some(23));
        assert_eq!(parse_celsius("Extremely cold and snowy -20°C"), Some(-20));
        assert_eq!(parse_celsius("Could not fetch weather data"), None);
        assert_eq!(parse_celsius("Extremely hot, scorching sun (40°C+)"), Some(40));
        assert_eq!(parse_celsius("Freezing wind, feels like (-5°C)."), Some(-5));
    }

    #[tokio::test]
    async fn test_list_always_has_essentials() {
        let names = OfflineListGenerator
            .generate_list(&list_input("city", 2, "Mild 20°C"))
            .await
            .unwrap();
        assert_eq!(&names[..2], &["Phone", "Wallet"]);
        assert!(names.contains(&"Comfortable walking shoes".to_string()));
        assert!(names.contains(&"T-shirts (x2)".to_string()));
        assert!(!names.contains(&"Laundry bag".to_string()));
    }

    #[test]
    fn test_list_weather_rules() {
        let rainy = OfflineListGenerator::build(&list_input("city", 3, "Overcast with intermittent drizzle 15°C"));
        assert!(rainy.contains(&"Umbrella".to_string()));
        assert!(!rainy.contains(&"Sunscreen".to_string()));

        let cold = OfflineListGenerator::build(&list_input("city", 3, "Chilly and windy 8°C"));
        assert!(cold.contains(&"Warm jacket".to_string()));

        let hot = OfflineListGenerator::build(&list_input("business", 3, "Very hot 38°C"));
        assert!(hot.contains(&"Sunglasses".to_string()));
    }

    #[test]
    fn test_list_has_no_duplicate_names() {
        // beach + sunny both add Sunscreen; ski + cold both add Gloves
        for (trip_type, weather) in [("beach", "Hot and sunny 29°C"), ("ski", "Heavy snow -22°C")] {
            let names = OfflineListGenerator::build(&list_input(trip_type, 12, weather));
            let unique: HashSet<_> = names.iter().map(|n| normalize_name(n)).collect();
            assert_eq!(unique.len(), names.len(), "{trip_type}");
        }
    }

    #[test]
    fn test_list_is_deterministic() {
        let input = list_input("hiking", 5, "Light showers 17°C");
        assert_eq!(OfflineListGenerator::build(&input), OfflineListGenerator::build(&input));
    }

    #[tokio::test]
    async fn test_forgotten_skips_present_items() {
        let names = OfflineForgottenCheck
            .check_forgotten(&check_input("beach", 5, &["passport", "SUNSCREEN ", "Toothbrush"]))
            .await
            .unwrap();
        assert!(names.contains(&"After-sun lotion".to_string()));
        assert!(names.contains(&"Travel adapter".to_string()));
        assert!(!names.iter().any(|n| normalize_name(n) == "sunscreen"));
        assert!(!names.iter().any(|n| normalize_name(n) == "toothbrush"));
    }

    #[test]
    fn test_forgotten_business_suggests_laptop() {
        let names = OfflineForgottenCheck::build(&check_input("business", 2, &["Suit"]));
        assert!(names.contains(&"Laptop".to_string()));
    }

    #[test]
    fn test_forgotten_empty_list_yields_nothing() {
        assert!(OfflineForgottenCheck::build(&check_input("beach", 5, &[])).is_empty());
    }

    #[tokio::test]
    async fn test_offline_images_empty() {
        assert!(OfflineImageLookup.generate_images("Paris").await.unwrap().is_empty());
    }
}
