//
//  fecru-client
//  connector.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Connector Facade
//!
//! This module provides [`Connector`], the entry point of the crate. A
//! connector owns the connection configuration and credentials, constructs
//! the shared transport/auth/options core, and hands out the three sibling
//! API groups that consume it.
//!
//! ## Token Bootstrap
//!
//! With `use_access_token` enabled (the default), construction fires the
//! login exchange without awaiting it. Requests issued immediately after
//! construction may therefore race the exchange and go out with only the
//! basic handler — accepted behavior, since basic credentials remain valid
//! either way. Applications that want the stronger guarantee await
//! [`ready`](Connector::ready) before their first call.
//!
//! ## Example
//!
//! ```rust,no_run
//! use fecru_client::{Connector, ConnectorConfig};
//!
//! # async fn example() -> Result<(), fecru_client::ApiError> {
//! let connector = Connector::new(
//!     ConnectorConfig::new("https://fecru.example.com", "jane", "secret"),
//! )?;
//!
//! // Optional: wait for the bearer token before the first call.
//! connector.ready().await;
//!
//! let repo = connector.crucible().get_repository("repo1").await?;
//! println!("{} is a {} repository", repo.name, repo.repo_type.unwrap_or_default());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tokio::sync::watch;

use crate::api::common::ApiError;
use crate::api::crucible::CrucibleApi;
use crate::api::fecru::FecruApi;
use crate::api::fisheye::FisheyeApi;
use crate::api::transport::Transport;
use crate::auth::{AuthHandler, AuthRegistry};
use crate::config::ConnectorConfig;
use crate::options::{RequestOptions, RequestOptionsFactory};

/// The shared core every API group holds a handle to.
///
/// Owns the base URL, the transport, the auth registry, and the options
/// factory. Groups clone the `Arc`, so arbitrarily many calls across all
/// three groups share one connection pool and one token slot.
pub(crate) struct ClientCore {
    base: String,
    transport: Transport,
    auth: AuthRegistry,
    options: RequestOptionsFactory,
}

impl ClientCore {
    /// The base URL (host plus optional web context), without a trailing
    /// slash.
    pub(crate) fn base(&self) -> &str {
        &self.base
    }

    pub(crate) fn transport(&self) -> &Transport {
        &self.transport
    }

    /// The ordered handler list for one request, token preferred.
    pub(crate) fn handlers(&self) -> Vec<AuthHandler> {
        self.auth.auth_handlers()
    }

    /// Fresh JSON-in/JSON-out options for one request.
    pub(crate) fn json_options(&self) -> RequestOptions {
        self.options.options()
    }
}

/// The FeCru connector: configuration, credentials, and the three API
/// groups.
///
/// Cheap to share: the connector itself is a thin handle over the shared
/// core. All operations are independent asynchronous calls; nothing here
/// serializes them.
pub struct Connector {
    core: Arc<ClientCore>,
    ready: watch::Receiver<bool>,
}

impl Connector {
    /// Builds a connector from the supplied configuration.
    ///
    /// Construction is synchronous apart from one side effect: when
    /// `use_access_token` is enabled, the initial login exchange is spawned
    /// fire-and-forget (which requires a running Tokio runtime). A failed
    /// exchange is logged and swallowed; the connector then runs in
    /// credential-only mode until [`refresh_access_token`](Self::refresh_access_token)
    /// is called again.
    ///
    /// # Errors
    ///
    /// [`ApiError::InvalidUrl`] when the configured host does not parse,
    /// [`ApiError::Transport`] when the HTTP client cannot be built.
    pub fn new(config: ConnectorConfig) -> Result<Self, ApiError> {
        let base = config.base_url()?;
        let transport = Transport::new(config.ignore_tls_errors)?;
        let auth = AuthRegistry::new(
            &base,
            &config.username,
            &config.password,
            transport.http_client().clone(),
        );
        let core = Arc::new(ClientCore {
            base,
            transport,
            auth,
            options: RequestOptionsFactory::new(config.ignore_tls_errors),
        });

        let (ready_tx, ready_rx) = watch::channel(false);
        if config.use_access_token {
            let core = Arc::clone(&core);
            tokio::spawn(async move {
                core.auth.refresh_access_token().await;
                let _ = ready_tx.send(true);
            });
        } else {
            let _ = ready_tx.send(true);
        }

        Ok(Self {
            core,
            ready: ready_rx,
        })
    }

    /// Completes once the construction-time login exchange has finished
    /// (successfully or not).
    ///
    /// Optional: the connector is usable immediately after construction;
    /// awaiting this merely closes the window where early requests go out
    /// with only the basic handler. Returns immediately when token auth is
    /// disabled.
    pub async fn ready(&self) {
        let mut ready = self.ready.clone();
        if *ready.borrow() {
            return;
        }
        while ready.changed().await.is_ok() {
            if *ready.borrow() {
                return;
            }
        }
    }

    /// Re-runs the login exchange.
    ///
    /// For callers observing repeated authentication failures. Idempotent
    /// and safe to call concurrently; the last successful completion wins,
    /// and failures leave the connector in credential-only mode.
    pub async fn refresh_access_token(&self) {
        self.core.auth.refresh_access_token().await;
    }

    /// The common administration API group (`/rest-service-fecru`).
    pub fn fecru(&self) -> FecruApi {
        FecruApi::new(Arc::clone(&self.core))
    }

    /// The Crucible code review API group (`/rest-service`).
    pub fn crucible(&self) -> CrucibleApi {
        CrucibleApi::new(Arc::clone(&self.core))
    }

    /// The Fisheye SCM indexing API group (`/rest-service-fe`).
    pub fn fisheye(&self) -> FisheyeApi {
        FisheyeApi::new(Arc::clone(&self.core))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::crucible::reviews::ReviewTransitionFailure;

    fn connector_for(server: &mockito::ServerGuard) -> Connector {
        let config =
            ConnectorConfig::new(&server.url(), "jane", "secret").with_access_token(false);
        Connector::new(config).expect("connector construction")
    }

    #[tokio::test]
    async fn test_get_repository_end_to_end() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rest-service/repositories-v1/repo1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"name": "repo1", "type": "git"}"#)
            .create_async()
            .await;

        let connector = connector_for(&server);
        let repo = connector.crucible().get_repository("repo1").await.unwrap();

        assert_eq!(repo.name, "repo1");
        assert_eq!(repo.repo_type.as_deref(), Some("git"));
    }

    #[tokio::test]
    async fn test_complete_review_conflict_carries_structured_payload() {
        let body = r#"{"failedConditions": [
            {"resultKey": "allReviewersCompleted", "message": "2 reviewers incomplete"}
        ]}"#;
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/rest-service/reviews-v1/CR-1/complete?ignoreWarnings=false")
            .with_status(409)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let connector = connector_for(&server);
        let outcome = connector.crucible().complete_review("CR-1", false).await;

        match outcome {
            Err(ApiError::Conflict(payload)) => {
                let failure: ReviewTransitionFailure =
                    serde_json::from_value(payload).unwrap();
                assert_eq!(failure.failed_conditions.len(), 1);
            }
            other => panic!("expected structured conflict, got ok={}", other.is_ok()),
        }
    }

    #[tokio::test]
    async fn test_complete_review_generic_conflict_body_is_a_domain_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/rest-service/reviews-v1/CR-1/complete?ignoreWarnings=false")
            .with_status(409)
            .with_header("content-type", "application/json")
            .with_body(r#"{"code": "IllegalState", "message": "review closed"}"#)
            .create_async()
            .await;

        let connector = connector_for(&server);
        let outcome = connector.crucible().complete_review("CR-1", false).await;

        match outcome {
            Err(ApiError::Domain(error)) => {
                assert_eq!(error.code, "IllegalState");
                assert_eq!(error.message, "review closed");
            }
            other => panic!("expected domain error, got ok={}", other.is_ok()),
        }
    }

    #[tokio::test]
    async fn test_complete_review_unexpected_status_degrades_to_domain_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/rest-service/reviews-v1/CR-1/complete?ignoreWarnings=true")
            .with_status(404)
            .create_async()
            .await;

        let connector = connector_for(&server);
        let outcome = connector.crucible().complete_review("CR-1", true).await;

        match outcome {
            Err(ApiError::Domain(error)) => {
                assert_eq!(error.code, "Unknown");
                assert_eq!(error.message, "Unable to complete review");
            }
            other => panic!("expected domain error, got ok={}", other.is_ok()),
        }
    }

    #[tokio::test]
    async fn test_login_exchange_upgrades_to_bearer() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/rest-service-fecru/auth/login")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"token": "tok-9"}"#)
            .create_async()
            .await;
        let guarded = server
            .mock("GET", "/rest-service/repositories-v1/repo1")
            .match_header("authorization", "Bearer tok-9")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"name": "repo1", "type": "git"}"#)
            .create_async()
            .await;

        let config = ConnectorConfig::new(&server.url(), "jane", "secret");
        let connector = Connector::new(config).unwrap();
        connector.ready().await;

        let repo = connector.crucible().get_repository("repo1").await.unwrap();
        guarded.assert_async().await;
        assert_eq!(repo.name, "repo1");
    }

    #[tokio::test]
    async fn test_paged_repository_listing() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rest-service-fecru/admin/repositories?start=0&limit=2")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"values": [{"name": "a", "type": "git", "enabled": true},
                               {"name": "b", "type": "svn", "enabled": false}],
                     "start": 0, "limit": 2, "size": 2, "lastPage": false}"#,
            )
            .create_async()
            .await;

        let connector = connector_for(&server);
        let page = connector
            .fecru()
            .list_repositories(Some(0), Some(2))
            .await
            .unwrap();

        assert_eq!(page.values.len(), 2);
        assert!(page.has_next());
        assert_eq!(page.next_start(), Some(2));
    }

    #[tokio::test]
    async fn test_add_user_to_group_treats_not_modified_as_success() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PUT", "/rest-service-fecru/admin/groups/devs/users")
            .with_status(304)
            .create_async()
            .await;

        let connector = connector_for(&server);
        let outcome = connector.fecru().add_user_to_group("devs", "jane").await;
        assert!(outcome.is_ok());
    }

    #[tokio::test]
    async fn test_changeset_list_spools_through_load_file() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "GET",
                "/rest-service-fe/revisionData-v1/changesetList/repo1?maxReturn=10",
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"csids": ["c1", "c2", "c3"]}"#)
            .create_async()
            .await;

        let connector = connector_for(&server);
        let list = connector
            .fisheye()
            .list_changesets("repo1", None, Some(10))
            .await
            .unwrap();

        assert_eq!(list.csids, vec!["c1", "c2", "c3"]);
    }

    #[test]
    fn test_invalid_host_is_rejected_at_construction() {
        // No runtime needed: the fire-and-forget spawn is never reached.
        let outcome =
            Connector::new(ConnectorConfig::new("not a url", "u", "p").with_access_token(false));
        assert!(matches!(outcome, Err(ApiError::InvalidUrl(_))));
    }
}
