//! PackSmart - travel packing assistant
//!
//! Given a destination, trip type and duration, PackSmart builds a packing
//! checklist, shows a three-day forecast and gathers destination imagery.
//! A later "did you forget" pass proposes additions that are merged into
//! the live list without clobbering anything the user changed.
//!
//! # Core Concepts
//!
//! - **All or nothing planning**: if any collaborator fails, the plan comes
//!   back in one uniform failure shape, never half-filled
//! - **Case-insensitive identity**: two items are the same item when their
//!   trimmed, lowercased names match
//! - **Fixed shapes**: forecasts always have three points and image sets
//!   always have five slots
//! - **Swappable collaborators**: forecast, list, forgotten-item and image
//!   sources are async traits with offline and LLM backends
//!
//! # Modules
//!
//! - [`domain`] - Trip, forecast, image and item types
//! - [`collab`] - Collaborator traits and backends
//! - [`planner`] - Orchestrator, reconciler and merge policy
//! - [`session`] - The active packing list
//! - [`history`] - Trip records stored in a bounded log
//! - [`llm`] - OpenAI-compatible client
//! - [`prompts`] - Handlebars prompt templates
//! - [`config`] - Configuration types and loading
//! - [`cli`] / [`repl`] / [`render`] - Command-line surface

pub mod cli;
pub mod collab;
pub mod config;
pub mod domain;
pub mod history;
pub mod llm;
pub mod planner;
pub mod prompts;
pub mod render;
pub mod repl;
pub mod session;

pub use collab::{Collaborators, create_collaborators};
pub use config::Config;
pub use domain::{
    Failure, ForecastSet, ImageSet, PackingItem, PackingSessionResult, ReconcileResult, TripParameters,
    normalize_name,
};
pub use planner::{ForgottenItemReconciler, MergeOutcome, PackingOrchestrator, merge_additions};
pub use session::PackingSession;
