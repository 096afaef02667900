//
//  fecru-client
//  api/fecru/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Common Administration API
//!
//! Endpoint methods for the shared FeCru administration API, rooted at
//! `/rest-service-fecru`. This is the sibling that carries the paged list
//! endpoints and the user/group administration operations (and, internally,
//! the login exchange the [`AuthRegistry`](crate::auth::AuthRegistry)
//! drives).

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::common::{ApiError, PagedResponse};
use crate::connector::ClientCore;
use crate::uri::UriBuilder;

/// A repository as returned by the admin repository list.
///
/// Distinct from the Crucible-side
/// [`Repository`](crate::api::crucible::repositories::Repository): the admin
/// API exposes the indexing configuration rather than the review-side view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminRepository {
    /// Unique repository name.
    pub name: String,

    /// SCM type of the repository (`git`, `svn`, `hg`, ...).
    #[serde(rename = "type")]
    #[serde(default)]
    pub scm_type: Option<String>,

    /// Whether the repository is enabled for indexing.
    #[serde(default)]
    pub enabled: bool,
}

/// The common administration API group.
///
/// Obtained from [`Connector::fecru`](crate::Connector::fecru).
pub struct FecruApi {
    core: Arc<ClientCore>,
}

impl FecruApi {
    pub(crate) fn new(core: Arc<ClientCore>) -> Self {
        Self { core }
    }

    fn service(&self) -> UriBuilder {
        UriBuilder::new(self.core.base()).add_segment("rest-service-fecru")
    }

    /// Lists configured repositories, one page at a time.
    ///
    /// `GET /rest-service-fecru/admin/repositories?start=&limit=`, success
    /// on 200 with the offset-paged envelope. Omitted parameters fall back
    /// to the server defaults. Use
    /// [`PagedResponse::next_start`](crate::api::common::PagedResponse::next_start)
    /// to continue.
    pub async fn list_repositories(
        &self,
        start: Option<u32>,
        limit: Option<u32>,
    ) -> Result<PagedResponse<AdminRepository>, ApiError> {
        let url = self
            .service()
            .add_segment("admin/repositories")
            .set_parameter_opt("start", start.map(|s| s.to_string()))
            .set_parameter_opt("limit", limit.map(|l| l.to_string()))
            .render();
        let envelope = self
            .core
            .transport()
            .fetch(
                "fecru.listRepositories",
                &url,
                &self.core.handlers(),
                &self.core.json_options(),
            )
            .await?;
        envelope.expect_result(200)
    }

    /// Adds a user to a group.
    ///
    /// `PUT /rest-service-fecru/admin/groups/{name}/users` with
    /// `{"name": username}` as the body. Success on 204, and also on 304 —
    /// this endpoint reports an already-present member as "not modified"
    /// and callers treat that as success.
    pub async fn add_user_to_group(&self, group: &str, username: &str) -> Result<(), ApiError> {
        let url = self
            .service()
            .add_segment("admin/groups")
            .add_segment(group)
            .add_segment("users")
            .render();
        let body = serde_json::json!({ "name": username });
        let envelope = self
            .core
            .transport()
            .replace(
                "fecru.addUserToGroup",
                &url,
                &self.core.handlers(),
                &self.core.json_options(),
                &body,
            )
            .await?;
        envelope.expect_empty(&[204, 304])
    }
}
