//
//  fecru-client
//  api/crucible/reviews.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Review types for the Crucible API group.
//!
//! Covers the request shape for review creation, the review data returned
//! by lifecycle operations, and the structured conflict payload the
//! complete-review endpoint delivers at HTTP 409.

use serde::{Deserialize, Serialize};

/// A review's permanent identifier (e.g. `CR-42`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermId {
    /// The identifier string.
    pub id: String,
}

/// Request data for creating a review.
///
/// Serialized inside the `reviewData` envelope the create endpoint
/// expects. Optional fields are omitted from the wire entirely when
/// `None`, which the endpoint treats as "use the project default".
///
/// # Example
///
/// ```rust
/// use fecru_client::api::crucible::reviews::CreateReviewRequest;
///
/// let request = CreateReviewRequest {
///     project_key: "CR-DEFAULT".to_string(),
///     name: "Fix the widget".to_string(),
///     description: Some("Please look at the widget".to_string()),
///     allow_reviewers_to_join: None,
/// };
///
/// let wire = serde_json::to_value(&request).unwrap();
/// assert!(wire.get("allowReviewersToJoin").is_none());
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct CreateReviewRequest {
    /// Key of the Crucible project the review belongs to.
    #[serde(rename = "projectKey")]
    pub project_key: String,

    /// Review title.
    pub name: String,

    /// Optional longer description shown on the review page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether reviewers may add themselves.
    #[serde(rename = "allowReviewersToJoin")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_reviewers_to_join: Option<bool>,
}

/// A review as returned by the review lifecycle endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewData {
    /// Permanent identifier of the review.
    #[serde(rename = "permaId")]
    pub perma_id: PermId,

    /// Review title.
    pub name: String,

    /// Lifecycle state (`Draft`, `Review`, `Closed`, `Abandoned`, ...).
    #[serde(default)]
    pub state: Option<String>,

    /// Key of the owning project.
    #[serde(rename = "projectKey")]
    #[serde(default)]
    pub project_key: Option<String>,
}

/// An item (file under review) as returned by the add-file endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewItem {
    /// Permanent identifier of the item within its review.
    #[serde(rename = "permId")]
    #[serde(default)]
    pub perm_id: Option<PermId>,

    /// Path of the file the item points at.
    #[serde(rename = "toPath")]
    #[serde(default)]
    pub to_path: Option<String>,
}

/// The structured conflict payload of a blocked review transition.
///
/// Delivered at HTTP 409 by the complete-review endpoint instead of the
/// generic `{code, message}` error. Callers check for this shape before
/// falling back to the generic path; `failedConditions` is required so a
/// generic error body does not pass as a conflict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewTransitionFailure {
    /// The conditions that blocked the transition.
    #[serde(rename = "failedConditions")]
    pub failed_conditions: Vec<FailedCondition>,
}

/// One condition that blocked a review transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedCondition {
    /// Machine-readable key of the failed condition.
    #[serde(rename = "resultKey")]
    #[serde(default)]
    pub result_key: Option<String>,

    /// Human-readable explanation.
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_data_decodes() {
        let review: ReviewData = serde_json::from_str(
            r#"{"permaId": {"id": "CR-7"}, "name": "Fix", "state": "Review"}"#,
        )
        .unwrap();
        assert_eq!(review.perma_id.id, "CR-7");
        assert_eq!(review.state.as_deref(), Some("Review"));
    }

    #[test]
    fn test_transition_failure_decodes_conditions() {
        let failure: ReviewTransitionFailure = serde_json::from_str(
            r#"{"failedConditions": [
                {"resultKey": "allReviewersCompleted", "message": "2 reviewers incomplete"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(failure.failed_conditions.len(), 1);
        assert_eq!(
            failure.failed_conditions[0].result_key.as_deref(),
            Some("allReviewersCompleted")
        );
    }

    #[test]
    fn test_generic_error_body_is_not_a_transition_failure() {
        let outcome = serde_json::from_str::<ReviewTransitionFailure>(
            r#"{"code": "IllegalState", "message": "review closed"}"#,
        );
        assert!(outcome.is_err());
    }

    #[test]
    fn test_create_request_omits_absent_options() {
        let request = CreateReviewRequest {
            project_key: "CR".to_string(),
            name: "n".to_string(),
            description: None,
            allow_reviewers_to_join: None,
        };
        let wire = serde_json::to_value(&request).unwrap();
        assert!(wire.get("description").is_none());
        assert_eq!(wire.get("projectKey").unwrap(), "CR");
    }
}
