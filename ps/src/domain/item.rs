//! Packing list items and name normalization

use serde::{Deserialize, Serialize};

use super::id::generate_id;

/// Key used wherever two item names are compared: trimmed and lowercased
///
/// "Passport", " passport " and "PASSPORT" all normalize to "passport".
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// One entry on the packing list
///
/// Identity is `id`; two items are duplicates when their normalized names
/// match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub packed: bool,
    /// True when the item came from the planner rather than the user
    #[serde(default)]
    pub is_suggestion: bool,
}

impl PackingItem {
    /// An item proposed by list generation or the forgotten-item check
    pub fn suggestion(name: impl Into<String>) -> Self {
        Self::build(name.into(), true)
    }

    /// An item the user typed in
    pub fn custom(name: impl Into<String>) -> Self {
        Self::build(name.into(), false)
    }

    fn build(name: String, is_suggestion: bool) -> Self {
        Self {
            id: generate_id("item", &name),
            name,
            packed: false,
            is_suggestion,
        }
    }

    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }

    /// Flip `packed`, returning the new value
    pub fn toggle(&mut self) -> bool {
        self.packed = !self.packed;
        self.packed
    }
}
