//
//  fecru-client
//  api/crucible/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Crucible Code Review API
//!
//! Endpoint methods for the Crucible sibling API, rooted at
//! `/rest-service`. Covers the repository lookups and the review lifecycle:
//! creation, transitions, reviewer management, file attachment, and
//! deletion.
//!
//! Review completion is the one operation with a second error shape: a 409
//! carries a structured [`ReviewTransitionFailure`](reviews::ReviewTransitionFailure)
//! listing the conditions that blocked the transition, and it is checked
//! before the generic `{code, message}` path.

pub mod repositories;
pub mod reviews;

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::api::common::ApiError;
use crate::connector::ClientCore;
use crate::uri::UriBuilder;

use repositories::{Repository, RepositoryList};
use reviews::{CreateReviewRequest, ReviewData, ReviewItem, ReviewTransitionFailure};

/// The Crucible API group.
///
/// Obtained from [`Connector::crucible`](crate::Connector::crucible); holds
/// a shared handle to the connector core and may be used concurrently with
/// the other groups.
pub struct CrucibleApi {
    core: Arc<ClientCore>,
}

impl CrucibleApi {
    pub(crate) fn new(core: Arc<ClientCore>) -> Self {
        Self { core }
    }

    fn service(&self) -> UriBuilder {
        UriBuilder::new(self.core.base()).add_segment("rest-service")
    }

    /// Fetches one repository by name.
    ///
    /// `GET /rest-service/repositories-v1/{name}`, success on 200.
    pub async fn get_repository(&self, name: &str) -> Result<Repository, ApiError> {
        let url = self
            .service()
            .add_segment("repositories-v1")
            .add_segment(name)
            .render();
        let envelope = self
            .core
            .transport()
            .fetch(
                "crucible.getRepository",
                &url,
                &self.core.handlers(),
                &self.core.json_options(),
            )
            .await?;
        envelope.expect_result(200)
    }

    /// Lists the repositories visible to the authenticated user.
    ///
    /// `GET /rest-service/repositories-v1`, success on 200. The remote
    /// wraps the list in a `repoData` envelope; this method unwraps it.
    pub async fn list_repositories(&self) -> Result<Vec<Repository>, ApiError> {
        let url = self.service().add_segment("repositories-v1").render();
        let envelope = self
            .core
            .transport()
            .fetch(
                "crucible.listRepositories",
                &url,
                &self.core.handlers(),
                &self.core.json_options(),
            )
            .await?;
        envelope
            .expect_result::<RepositoryList>(200)
            .map(|list| list.repo_data)
    }

    /// Creates a review from the supplied request data.
    ///
    /// `POST /rest-service/reviews-v1`, success on 201 with the created
    /// review as the body. The request is wrapped in the `reviewData`
    /// envelope the endpoint expects.
    pub async fn create_review(
        &self,
        review: &CreateReviewRequest,
    ) -> Result<ReviewData, ApiError> {
        let url = self.service().add_segment("reviews-v1").render();
        let body = serde_json::json!({ "reviewData": review });
        let envelope = self
            .core
            .transport()
            .create(
                "crucible.createReview",
                &url,
                &self.core.handlers(),
                &self.core.json_options(),
                &body,
            )
            .await?;
        envelope.expect_result(201)
    }

    /// Completes a review, moving it to the closed state.
    ///
    /// `POST /rest-service/reviews-v1/{id}/complete`, success on 200 or
    /// 204. A 409 means the transition was blocked by business rules; the
    /// structured violation payload is surfaced as
    /// [`ApiError::Conflict`], checked before the generic error path.
    pub async fn complete_review(
        &self,
        review_id: &str,
        ignore_warnings: bool,
    ) -> Result<(), ApiError> {
        let url = self
            .service()
            .add_segment("reviews-v1")
            .add_segment(review_id)
            .add_segment("complete")
            .set_parameter("ignoreWarnings", ignore_warnings.to_string())
            .render();
        let envelope = self
            .core
            .transport()
            .create(
                "crucible.completeReview",
                &url,
                &self.core.handlers(),
                &self.core.json_options(),
                &Value::Null,
            )
            .await?;

        match envelope.status() {
            200 | 204 => Ok(()),
            409 => {
                if let Some(failure) = envelope.conflict::<ReviewTransitionFailure>(409) {
                    debug!(
                        review = review_id,
                        conditions = failure.failed_conditions.len(),
                        "review transition blocked"
                    );
                    return Err(ApiError::Conflict(
                        envelope.raw_body().cloned().unwrap_or(Value::Null),
                    ));
                }
                Err(ApiError::Domain(envelope.error("Unable to complete review")))
            }
            _ => Err(ApiError::Domain(envelope.error("Unable to complete review"))),
        }
    }

    /// Abandons an open review.
    ///
    /// `POST /rest-service/reviews-v1/{id}/transition?action=action:abandonReview`,
    /// success on 200 with the updated review data.
    pub async fn abandon_review(&self, review_id: &str) -> Result<ReviewData, ApiError> {
        let url = self
            .service()
            .add_segment("reviews-v1")
            .add_segment(review_id)
            .add_segment("transition")
            .set_parameter("action", "action:abandonReview")
            .render();
        let envelope = self
            .core
            .transport()
            .create(
                "crucible.abandonReview",
                &url,
                &self.core.handlers(),
                &self.core.json_options(),
                &Value::Null,
            )
            .await?;
        envelope.expect_result(200)
    }

    /// Permanently deletes a closed or abandoned review.
    ///
    /// `DELETE /rest-service/reviews-v1/{id}`, success on 204 only.
    pub async fn delete_review(&self, review_id: &str) -> Result<(), ApiError> {
        let url = self
            .service()
            .add_segment("reviews-v1")
            .add_segment(review_id)
            .render();
        let envelope = self
            .core
            .transport()
            .delete(
                "crucible.deleteReview",
                &url,
                &self.core.handlers(),
                &self.core.json_options(),
            )
            .await?;
        envelope.expect_empty(&[204])
    }

    /// Adds a reviewer to a review.
    ///
    /// `POST /rest-service/reviews-v1/{id}/reviewers` with the username as
    /// the body. Success on 204 only — unlike the group-membership
    /// endpoint, a 304 here is not accepted as "already present".
    pub async fn add_reviewer(&self, review_id: &str, username: &str) -> Result<(), ApiError> {
        let url = self
            .service()
            .add_segment("reviews-v1")
            .add_segment(review_id)
            .add_segment("reviewers")
            .render();
        let envelope = self
            .core
            .transport()
            .create(
                "crucible.addReviewer",
                &url,
                &self.core.handlers(),
                &self.core.json_options(),
                &Value::String(username.to_string()),
            )
            .await?;
        envelope.expect_empty(&[204])
    }

    /// Attaches a file to a review as a streamed multipart upload.
    ///
    /// `POST /rest-service/reviews-v1/{id}/addFile`, success on 200 with
    /// the created review item as the body.
    pub async fn add_review_file(
        &self,
        review_id: &str,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<ReviewItem, ApiError> {
        let url = self
            .service()
            .add_segment("reviews-v1")
            .add_segment(review_id)
            .add_segment("addFile")
            .render();
        let envelope = self
            .core
            .transport()
            .upload_file(
                "crucible.addReviewFile",
                &url,
                &self.core.handlers(),
                &self.core.json_options(),
                file_name,
                content,
            )
            .await?;
        envelope.expect_result(200)
    }

    /// Removes an item from a review.
    ///
    /// `GET /rest-service/reviews-v1/{id}/reviewitems/{itemId}`, success on
    /// 200 or 204.
    // TODO: this has always gone out as GET even though the endpoint is
    // delete-shaped; verify the server's behavior for DELETE before
    // changing the verb.
    pub async fn remove_review_item(
        &self,
        review_id: &str,
        item_id: &str,
    ) -> Result<(), ApiError> {
        let url = self
            .service()
            .add_segment("reviews-v1")
            .add_segment(review_id)
            .add_segment("reviewitems")
            .add_segment(item_id)
            .render();
        let envelope = self
            .core
            .transport()
            .fetch(
                "crucible.removeReviewItem",
                &url,
                &self.core.handlers(),
                &self.core.json_options(),
            )
            .await?;
        envelope.expect_empty(&[200, 204])
    }
}
