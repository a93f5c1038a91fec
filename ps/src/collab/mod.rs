//! Collaborators the planner depends on
//!
//! Each is a single-method async trait held as `Arc<dyn ...>`, so the
//! planner can be shared and tests can swap in mocks. Two backends exist:
//! [`offline`] (deterministic rules, the default) and [`llm_backed`].

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::config::{Backend, Config};
use crate::domain::{ForecastSet, ImageResource};
use crate::llm::{self, LlmError};
use crate::prompts::PromptLoader;

pub mod llm_backed;
pub mod offline;
mod weather;

pub use llm_backed::{LlmForgottenCheck, LlmImageGenerator, LlmListGenerator};
pub use offline::{OfflineForgottenCheck, OfflineImageLookup, OfflineListGenerator};
pub use weather::StaticForecastTable;

/// Errors a collaborator can report to the planner
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("LLM request failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Prompt rendering failed: {0}")]
    Prompt(String),

    #[error("Collaborator returned unusable output: {0}")]
    InvalidOutput(String),

    #[error("Collaborator unavailable: {0}")]
    Unavailable(String),
}

impl CollaboratorError {
    /// Check if retrying the same call could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            CollaboratorError::Llm(e) => e.is_retryable(),
            CollaboratorError::Unavailable(_) => true,
            CollaboratorError::Prompt(_) | CollaboratorError::InvalidOutput(_) => false,
        }
    }
}

/// Input to list generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListGenerationInput {
    pub trip_type: String,
    pub duration: u32,
    /// Today's forecast, e.g. "Sunny intervals 23°C"
    pub destination_weather: String,
}

/// Input to the forgotten-item check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForgottenCheckInput {
    pub trip_type: String,
    pub duration: u32,
    pub packed_items: Vec<String>,
}

/// Destination to three-point forecast
///
/// Unknown destinations resolve to a generic forecast rather than an error.
#[async_trait]
pub trait ForecastLookup: Send + Sync {
    async fn lookup_forecast(&self, destination: &str) -> Result<ForecastSet, CollaboratorError>;
}

/// Trip details to an initial list of item names
#[async_trait]
pub trait ListGenerator: Send + Sync {
    async fn generate_list(&self, input: &ListGenerationInput) -> Result<Vec<String>, CollaboratorError>;
}

/// Trip details plus current names to names likely missing
///
/// The result may be empty and may overlap the current names.
#[async_trait]
pub trait ForgottenItemCheck: Send + Sync {
    async fn check_forgotten(&self, input: &ForgottenCheckInput) -> Result<Vec<String>, CollaboratorError>;
}

/// Destination to up to five images
///
/// Per-image failures stay inside the implementation; the planner pads
/// whatever comes back.
#[async_trait]
pub trait ImageLookup: Send + Sync {
    async fn generate_images(&self, destination: &str) -> Result<Vec<ImageResource>, CollaboratorError>;
}

/// The full set of collaborators for one backend
#[derive(Clone)]
pub struct Collaborators {
    pub forecast: Arc<dyn ForecastLookup>,
    pub lists: Arc<dyn ListGenerator>,
    pub forgotten: Arc<dyn ForgottenItemCheck>,
    pub images: Arc<dyn ImageLookup>,
}

/// Build the collaborators selected by `config.backend`
///
/// The forecast table is shared by both backends.
pub fn create_collaborators(config: &Config) -> Result<Collaborators, LlmError> {
    debug!(backend = %config.backend, "create_collaborators: called");
    let forecast: Arc<dyn ForecastLookup> = Arc::new(StaticForecastTable::with_delay_ms(
        config.weather.simulated_delay_ms,
    ));

    match config.backend {
        Backend::Offline => Ok(Collaborators {
            forecast,
            lists: Arc::new(OfflineListGenerator),
            forgotten: Arc::new(OfflineForgottenCheck),
            images: Arc::new(OfflineImageLookup),
        }),
        Backend::Llm => {
            let client = llm::create_client(&config.llm)?;
            let prompts = Arc::new(PromptLoader::new(config.prompts.dir.clone()));
            let max_tokens = config.llm.max_tokens;
            Ok(Collaborators {
                forecast,
                lists: Arc::new(LlmListGenerator::new(client.clone(), prompts.clone(), max_tokens)),
                forgotten: Arc::new(LlmForgottenCheck::new(client.clone(), prompts, max_tokens)),
                images: Arc::new(LlmImageGenerator::new(client, config.llm.image_size.clone())),
            })
        }
    }
}
