//
//  fecru-client
//  api/crucible/repositories.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Repository types for the Crucible API group.

use serde::{Deserialize, Serialize};

/// A repository as returned by `/rest-service/repositories-v1`.
///
/// # Fields
///
/// * `name` - Unique repository name, also the path key for lookups
/// * `repo_type` - SCM type (`git`, `svn`, `hg`, ...); absent on some older
///   server versions
/// * `enabled` - Whether indexing is enabled for the repository
///
/// # Example
///
/// ```rust
/// use fecru_client::api::crucible::repositories::Repository;
///
/// let repo: Repository =
///     serde_json::from_str(r#"{"name": "repo1", "type": "git"}"#).unwrap();
/// assert_eq!(repo.name, "repo1");
/// assert_eq!(repo.repo_type.as_deref(), Some("git"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    /// Unique repository name.
    pub name: String,

    /// SCM type of the repository (`git`, `svn`, `hg`, ...).
    #[serde(rename = "type")]
    #[serde(default)]
    pub repo_type: Option<String>,

    /// Whether indexing is enabled. Defaults to `false` when absent.
    #[serde(default)]
    pub enabled: bool,
}

/// Wrapper envelope of the repository list endpoint.
///
/// The remote wraps the list in a `repoData` field; callers receive the
/// unwrapped `Vec<Repository>`.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryList {
    /// The wrapped repository list.
    #[serde(rename = "repoData")]
    #[serde(default)]
    pub repo_data: Vec<Repository>,
}
