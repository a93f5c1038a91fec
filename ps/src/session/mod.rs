//! Active packing state
//!
//! [`PackingSession`] owns the list the user is working on. Plans replace it
//! wholesale; forgotten-item additions are merged into it; user edits go
//! straight through. A generation counter fences plan results so a slow,
//! superseded plan can never overwrite a newer one.

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{
    Failure, ForecastSet, ImageSet, PackingItem, PackingSessionResult, ReconcileResult, TripParameters, normalize_name,
};
use crate::history::{TripHistoryEntry, TripRecord};
use crate::planner::{MergeOutcome, merge_additions};

/// Why a user-entered item was not added
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemRejection {
    #[error("Item name cannot be empty")]
    EmptyName,

    #[error("'{0}' is already on your list")]
    DuplicateItem(String),
}

/// Why a forgotten-item pass cannot start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("Plan a trip first")]
    NoActiveTrip,

    #[error("Your packing list is empty")]
    EmptyList,
}

/// Proof that a plan was started; hand it back with the result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanTicket {
    generation: u64,
    pub params: TripParameters,
}

impl PlanTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
pub struct PackingSession {
    trip: Option<TripParameters>,
    items: Vec<PackingItem>,
    weather: Option<ForecastSet>,
    images: Option<ImageSet>,
    last_failure: Option<Failure>,
    generation: u64,
}

impl PackingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start planning `params`: the trip becomes active and the visible
    /// list, forecast and images are cleared
    pub fn begin_plan(&mut self, params: TripParameters) -> PlanTicket {
        self.generation += 1;
        debug!(%params, generation = self.generation, "begin_plan: called");
        self.trip = Some(params.clone());
        self.items.clear();
        self.weather = None;
        self.images = None;
        self.last_failure = None;
        PlanTicket {
            generation: self.generation,
            params,
        }
    }

    /// Install a plan result
    ///
    /// Returns false, leaving the session untouched, when `ticket` has been
    /// superseded by a later `begin_plan` or `restore`.
    pub fn apply_plan(&mut self, ticket: &PlanTicket, result: PackingSessionResult) -> bool {
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "apply_plan: stale result discarded"
            );
            return false;
        }
        self.items = result.items;
        self.weather = Some(result.weather);
        self.images = Some(result.images);
        self.last_failure = result.failure;
        true
    }

    /// Add a user item
    pub fn add_item(&mut self, name: &str) -> Result<&PackingItem, ItemRejection> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ItemRejection::EmptyName);
        }
        let key = normalize_name(name);
        if let Some(existing) = self.items.iter().find(|i| i.normalized_name() == key) {
            return Err(ItemRejection::DuplicateItem(existing.name.clone()));
        }

        let index = self.items.len();
        self.items.push(PackingItem::custom(name));
        debug!(%name, "add_item: added");
        Ok(&self.items[index])
    }

    /// Remove an item by id; false if no such item
    pub fn remove_item(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        before != self.items.len()
    }

    /// Toggle `packed` on an item, returning the new state
    pub fn toggle_item(&mut self, id: &str) -> Option<bool> {
        self.items.iter_mut().find(|i| i.id == id).map(PackingItem::toggle)
    }

    pub fn trip(&self) -> Option<&TripParameters> {
        self.trip.as_ref()
    }

    pub fn items(&self) -> &[PackingItem] {
        &self.items
    }

    pub fn weather(&self) -> Option<&ForecastSet> {
        self.weather.as_ref()
    }

    pub fn images(&self) -> Option<&ImageSet> {
        self.images.as_ref()
    }

    pub fn last_failure(&self) -> Option<&Failure> {
        self.last_failure.as_ref()
    }

    /// Planner-suggested items, in list order
    pub fn suggestions(&self) -> impl Iterator<Item = &PackingItem> {
        self.items.iter().filter(|i| i.is_suggestion)
    }

    /// User-added items, in list order
    pub fn custom_items(&self) -> impl Iterator<Item = &PackingItem> {
        self.items.iter().filter(|i| !i.is_suggestion)
    }

    /// Suggestions then user items, the order lists are shown and numbered in
    pub fn display_items(&self) -> Vec<&PackingItem> {
        self.suggestions().chain(self.custom_items()).collect()
    }

    pub fn packed_count(&self) -> usize {
        self.items.iter().filter(|i| i.packed).count()
    }

    /// Everything a forgotten-item pass needs, if one may run now
    pub fn forgotten_request(&self) -> Result<(TripParameters, Vec<String>), GateError> {
        let trip = self.trip.as_ref().ok_or(GateError::NoActiveTrip)?;
        if self.items.is_empty() {
            return Err(GateError::EmptyList);
        }
        let names = self.items.iter().map(|i| i.name.clone()).collect();
        Ok((trip.clone(), names))
    }

    /// Merge a forgotten-item result into the live list
    ///
    /// A failed result leaves the list untouched and comes back as `Err`.
    pub fn apply_forgotten(&mut self, result: ReconcileResult) -> Result<MergeOutcome, Failure> {
        if let Some(failure) = result.failure {
            return Err(failure);
        }
        let outcome = merge_additions(&mut self.items, result.additions);
        info!(%outcome, "Merged forgotten items");
        Ok(outcome)
    }

    /// Record of the active trip for the history log
    ///
    /// None when no trip is active or the last plan failed.
    pub fn snapshot(&self) -> Option<TripRecord> {
        if self.last_failure.is_some() {
            return None;
        }
        let trip = self.trip.clone()?;
        Some(TripRecord {
            trip_parameters: trip,
            items: self.items.clone(),
            weather: self.weather.clone(),
            images: self.images.clone(),
        })
    }

    /// Re-activate a trip from history
    ///
    /// Any plan still in flight is superseded. Images come back as
    /// placeholders since they are not stored.
    pub fn restore(&mut self, entry: &TripHistoryEntry) {
        self.generation += 1;
        let record = &entry.record;
        let destination = &record.trip_parameters.destination;
        debug!(id = %entry.id, %destination, "restore: called");

        self.images = Some(
            record
                .images
                .clone()
                .unwrap_or_else(|| ImageSet::placeholders(destination)),
        );
        self.trip = Some(record.trip_parameters.clone());
        self.items = record.items.clone();
        self.weather = record.weather.clone();
        self.last_failure = None;
    }
}
