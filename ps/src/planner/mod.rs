//! The packing pipeline
//!
//! [`PackingOrchestrator`] turns trip parameters into a fresh packing list,
//! [`ForgottenItemReconciler`] proposes additions later, and
//! [`merge_additions`] folds those additions into a live list without
//! clobbering user edits.

mod merge;
mod orchestrator;
mod reconcile;

pub use merge::{MergeOutcome, merge_additions};
pub use orchestrator::{PLAN_FAILED_MESSAGE, PackingOrchestrator};
pub use reconcile::{FORGOTTEN_FAILED_MESSAGE, ForgottenItemReconciler};
