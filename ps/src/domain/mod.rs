//! Domain types for PackSmart
//!
//! - [`TripParameters`] - what the user asked for
//! - [`ForecastSet`] - fixed three-point forecast
//! - [`ImageSet`] - fixed five-slot image set
//! - [`PackingItem`] - one list entry, deduplicated by [`normalize_name`]
//! - [`PackingSessionResult`] / [`ReconcileResult`] - planner outputs

mod forecast;
pub mod id;
mod image;
mod item;
mod result;
mod trip;

pub use forecast::{
    FETCH_FAILED_DESCRIPTION, ForecastLabel, ForecastOrderError, ForecastPoint, ForecastSet, TEMPERATURE_UNAVAILABLE,
};
pub use id::generate_id;
pub use image::{IMAGE_SET_SIZE, ImageResource, ImageSet, PLACEHOLDER_DATA_URI};
pub use item::{PackingItem, normalize_name};
pub use result::{Failure, PackingSessionResult, ReconcileResult};
pub use trip::{KNOWN_TRIP_TYPES, MAX_DURATION_DAYS, MIN_DESTINATION_LEN, TripError, TripParameters};
