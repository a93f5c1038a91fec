//! Results handed back by the planner

use serde::{Deserialize, Serialize};

use super::{ForecastSet, ImageSet, PackingItem};

/// User-facing description of something that went wrong
///
/// `message` is safe to show as-is; `detail` carries the underlying error
/// text for logs and verbose output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Failure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Everything one `plan_trip` call produces
///
/// A new plan supersedes the previous result wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingSessionResult {
    pub items: Vec<PackingItem>,
    pub weather: ForecastSet,
    pub images: ImageSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<Failure>,
}

impl PackingSessionResult {
    /// The uniform failure shape: no items, the fetch-failed forecast,
    /// placeholder images
    pub fn failed(destination: &str, failure: Failure) -> Self {
        Self {
            items: Vec::new(),
            weather: ForecastSet::unavailable(destination),
            images: ImageSet::placeholders(destination),
            failure: Some(failure),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }
}

/// Output of one forgotten-item pass
///
/// `additions` is not filtered against the live list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileResult {
    pub additions: Vec<PackingItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<Failure>,
}

impl ReconcileResult {
    pub fn failed(failure: Failure) -> Self {
        Self {
            additions: Vec::new(),
            failure: Some(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FETCH_FAILED_DESCRIPTION, IMAGE_SET_SIZE, TEMPERATURE_UNAVAILABLE};

    #[test]
    fn test_failed_result_shape() {
        let result = PackingSessionResult::failed("Paris", Failure::new("Failed"));
        assert!(result.is_failure());
        assert!(result.items.is_empty());
        assert_eq!(result.images.real_count(), 0);
        assert_eq!(result.images.as_slice().len(), IMAGE_SET_SIZE);
        for point in result.weather.points() {
            assert_eq!(point.description, FETCH_FAILED_DESCRIPTION);
            assert_eq!(point.temperature, TEMPERATURE_UNAVAILABLE);
        }
    }

    #[test]
    fn test_failure_display_hides_detail() {
        let failure = Failure::new("Something broke").with_detail("HTTP 500");
        assert_eq!(failure.to_string(), "Something broke");
        assert_eq!(failure.detail.as_deref(), Some("HTTP 500"));
    }

    #[test]
    fn test_failed_reconcile_has_no_additions() {
        let result = ReconcileResult::failed(Failure::new("nope"));
        assert!(result.additions.is_empty());
        assert!(result.failure.is_some());
    }
}
