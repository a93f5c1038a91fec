//! Forgotten-item reconciler

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::collab::{ForgottenCheckInput, ForgottenItemCheck};
use crate::domain::{Failure, PackingItem, ReconcileResult, TripParameters};

/// Shown to the user when the forgotten-item check fails
pub const FORGOTTEN_FAILED_MESSAGE: &str = "Failed to get forgotten item suggestions. Please try again.";

/// Asks the forgotten-item check for additions
///
/// Additions are returned unfiltered; deduplication against the live list
/// is [`merge_additions`](super::merge_additions)'s job.
#[derive(Clone)]
pub struct ForgottenItemReconciler {
    check: Arc<dyn ForgottenItemCheck>,
}

impl ForgottenItemReconciler {
    pub fn new(check: Arc<dyn ForgottenItemCheck>) -> Self {
        Self { check }
    }

    /// Run the check for `params` against the names currently on the list
    ///
    /// An empty `current_names` is passed through as-is.
    pub async fn reconcile_forgotten(&self, params: &TripParameters, current_names: &[String]) -> ReconcileResult {
        debug!(%params, current = current_names.len(), "reconcile_forgotten: called");
        let input = ForgottenCheckInput {
            trip_type: params.trip_type.clone(),
            duration: params.duration,
            packed_items: current_names.to_vec(),
        };

        match self.check.check_forgotten(&input).await {
            Ok(names) => {
                info!(suggested = names.len(), "Forgotten-item check complete");
                ReconcileResult {
                    additions: names.into_iter().map(PackingItem::suggestion).collect(),
                    failure: None,
                }
            }
            Err(e) => {
                warn!(error = %e, "reconcile_forgotten: check failed");
                ReconcileResult::failed(Failure::new(FORGOTTEN_FAILED_MESSAGE).with_detail(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::collab::{CollaboratorError, OfflineForgottenCheck};

    struct BrokenCheck;

    #[async_trait]
    impl ForgottenItemCheck for BrokenCheck {
        async fn check_forgotten(&self, _input: &ForgottenCheckInput) -> Result<Vec<String>, CollaboratorError> {
            Err(CollaboratorError::InvalidOutput("not a list".to_string()))
        }
    }

    #[tokio::test]
    async fn test_reconcile_maps_to_suggestions() {
        let reconciler = ForgottenItemReconciler::new(Arc::new(OfflineForgottenCheck));
        let params = TripParameters::new("Bali", "beach", 7).unwrap();

        let result = reconciler
            .reconcile_forgotten(&params, &["Swimsuit".to_string()])
            .await;
        assert!(result.failure.is_none());
        assert!(!result.additions.is_empty());
        assert!(result.additions.iter().all(|i| i.is_suggestion && !i.packed));
    }

    #[tokio::test]
    async fn test_reconcile_failure() {
        let reconciler = ForgottenItemReconciler::new(Arc::new(BrokenCheck));
        let params = TripParameters::new("Bali", "beach", 7).unwrap();

        let result = reconciler.reconcile_forgotten(&params, &[]).await;
        assert!(result.additions.is_empty());
        assert_eq!(result.failure.unwrap().message, FORGOTTEN_FAILED_MESSAGE);
    }
}
