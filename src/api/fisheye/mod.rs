//
//  fecru-client
//  api/fisheye/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Fisheye SCM Indexing API
//!
//! Endpoint methods for the Fisheye sibling API, rooted at
//! `/rest-service-fe`. Covers the indexed-repository view and changeset
//! data. The changeset list is the crate's large-payload endpoint: its
//! response is spooled through a temporary file by
//! [`Transport::load_file`](crate::api::transport::Transport::load_file)
//! instead of being buffered at the HTTP layer.

use std::sync::Arc;

use serde::Deserialize;

use crate::api::common::ApiError;
use crate::connector::ClientCore;
use crate::uri::UriBuilder;

/// A repository as indexed by Fisheye.
#[derive(Debug, Clone, Deserialize)]
pub struct FisheyeRepository {
    /// Unique repository name.
    pub name: String,

    /// Whether the index is currently available for queries.
    #[serde(default)]
    pub available: bool,
}

/// Wrapper envelope of the Fisheye repository list endpoint.
#[derive(Debug, Clone, Deserialize)]
struct FisheyeRepositoryList {
    #[serde(default)]
    repository: Vec<FisheyeRepository>,
}

/// One changeset in an indexed repository.
#[derive(Debug, Clone, Deserialize)]
pub struct Changeset {
    /// Changeset identifier (commit hash or revision number).
    pub csid: String,

    /// Author of the changeset.
    #[serde(default)]
    pub author: Option<String>,

    /// Commit message.
    #[serde(default)]
    pub comment: Option<String>,

    /// Branch the changeset was committed on, when the SCM has branches.
    #[serde(default)]
    pub branch: Option<String>,
}

/// The identifiers of a (possibly very large) changeset window.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangesetIdList {
    /// The changeset identifiers, oldest first.
    #[serde(default)]
    pub csids: Vec<String>,
}

/// The Fisheye API group.
///
/// Obtained from [`Connector::fisheye`](crate::Connector::fisheye).
pub struct FisheyeApi {
    core: Arc<ClientCore>,
}

impl FisheyeApi {
    pub(crate) fn new(core: Arc<ClientCore>) -> Self {
        Self { core }
    }

    fn service(&self) -> UriBuilder {
        UriBuilder::new(self.core.base()).add_segment("rest-service-fe")
    }

    /// Lists the repositories Fisheye has indexed.
    ///
    /// `GET /rest-service-fe/repositories-v1`, success on 200. The remote
    /// wraps the list in a `repository` envelope; this method unwraps it.
    pub async fn list_repositories(&self) -> Result<Vec<FisheyeRepository>, ApiError> {
        let url = self.service().add_segment("repositories-v1").render();
        let envelope = self
            .core
            .transport()
            .fetch(
                "fisheye.listRepositories",
                &url,
                &self.core.handlers(),
                &self.core.json_options(),
            )
            .await?;
        envelope
            .expect_result::<FisheyeRepositoryList>(200)
            .map(|list| list.repository)
    }

    /// Fetches one changeset by identifier.
    ///
    /// `GET /rest-service-fe/revisionData-v1/changeset/{repository}/{csid}`,
    /// success on 200.
    pub async fn get_changeset(
        &self,
        repository: &str,
        csid: &str,
    ) -> Result<Changeset, ApiError> {
        let url = self
            .service()
            .add_segment("revisionData-v1/changeset")
            .add_segment(repository)
            .add_segment(csid)
            .render();
        let envelope = self
            .core
            .transport()
            .fetch(
                "fisheye.getChangeset",
                &url,
                &self.core.handlers(),
                &self.core.json_options(),
            )
            .await?;
        envelope.expect_result(200)
    }

    /// Lists changeset identifiers for a repository.
    ///
    /// `GET /rest-service-fe/revisionData-v1/changesetList/{repository}`,
    /// optionally filtered by `path` and capped by `maxReturn`. Changeset
    /// lists can run to hundreds of thousands of identifiers, so the body
    /// is spooled to a temporary file rather than buffered in memory;
    /// the file is removed before this method returns.
    pub async fn list_changesets(
        &self,
        repository: &str,
        path: Option<&str>,
        max_return: Option<u32>,
    ) -> Result<ChangesetIdList, ApiError> {
        let url = self
            .service()
            .add_segment("revisionData-v1/changesetList")
            .add_segment(repository)
            .set_parameter_opt("path", path)
            .set_parameter_opt("maxReturn", max_return.map(|m| m.to_string()))
            .render();
        let envelope = self
            .core
            .transport()
            .load_file(
                "fisheye.listChangesets",
                &url,
                &self.core.handlers(),
                &self.core.json_options(),
            )
            .await?;
        envelope.expect_result(200)
    }
}
