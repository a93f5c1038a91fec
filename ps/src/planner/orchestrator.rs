//! Packing suggestion orchestrator

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::collab::{CollaboratorError, Collaborators, ForecastLookup, ImageLookup, ListGenerationInput, ListGenerator};
use crate::domain::{Failure, ImageSet, PackingItem, PackingSessionResult, TripParameters};

/// Shown to the user when any part of planning fails
pub const PLAN_FAILED_MESSAGE: &str = "Failed to get packing suggestions. Please try again.";

/// Sequences the collaborators for one trip
///
/// Forecast first, then list generation and image lookup side by side.
#[derive(Clone)]
pub struct PackingOrchestrator {
    forecast: Arc<dyn ForecastLookup>,
    lists: Arc<dyn ListGenerator>,
    images: Arc<dyn ImageLookup>,
}

impl PackingOrchestrator {
    pub fn new(forecast: Arc<dyn ForecastLookup>, lists: Arc<dyn ListGenerator>, images: Arc<dyn ImageLookup>) -> Self {
        Self {
            forecast,
            lists,
            images,
        }
    }

    pub fn from_collaborators(collaborators: &Collaborators) -> Self {
        Self::new(
            collaborators.forecast.clone(),
            collaborators.lists.clone(),
            collaborators.images.clone(),
        )
    }

    /// Produce a packing list, forecast and images for `params`
    ///
    /// Never fails: if any collaborator errors, partial results are dropped
    /// and the uniform failure result comes back instead.
    pub async fn plan_trip(&self, params: &TripParameters) -> PackingSessionResult {
        debug!(%params, "plan_trip: called");
        match self.try_plan(params).await {
            Ok(result) => {
                info!(
                    destination = %params.destination,
                    items = result.items.len(),
                    images = result.images.real_count(),
                    "Planned trip"
                );
                result
            }
            Err(e) => {
                warn!(destination = %params.destination, error = %e, "plan_trip: collaborator failed");
                PackingSessionResult::failed(
                    &params.destination,
                    Failure::new(PLAN_FAILED_MESSAGE).with_detail(e.to_string()),
                )
            }
        }
    }

    async fn try_plan(&self, params: &TripParameters) -> Result<PackingSessionResult, CollaboratorError> {
        let weather = self.forecast.lookup_forecast(&params.destination).await?;

        let input = ListGenerationInput {
            trip_type: params.trip_type.clone(),
            duration: params.duration,
            destination_weather: weather.today().summary(),
        };
        debug!(destination_weather = %input.destination_weather, "try_plan: forecast resolved");

        let (names, images) = tokio::join!(
            self.lists.generate_list(&input),
            self.images.generate_images(&params.destination)
        );
        let names = names?;
        let images = images?;

        Ok(PackingSessionResult {
            items: names.into_iter().map(PackingItem::suggestion).collect(),
            weather,
            images: ImageSet::padded(&params.destination, images),
            failure: None,
        })
    }
}
