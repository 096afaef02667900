//
//  fecru-client
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! This module provides credential-attachment strategies and their lifecycle
//! for the FeCru API family. All three sibling APIs share one host and one
//! authentication scheme, so a single registry serves every request.
//!
//! ## Handler Lifecycle
//!
//! The registry is a two-state machine:
//!
//! - **credential-only** (initial): a basic handler built once from the
//!   configured username and password. It lives as long as the connector and
//!   never changes.
//! - **token-preferred**: reached after a successful login exchange. A
//!   bearer-token handler is swapped in wholesale; it is replaced on each
//!   refresh and may be absent again after a failed refresh.
//!
//! [`AuthRegistry::auth_handlers`] returns the ordered list the transport
//! offers to each request: `[token, basic]` in token-preferred state,
//! `[basic]` otherwise. The basic handler is always present, which is what
//! makes a stale or absent token an acceptable race rather than a failure:
//! a request that goes out mid-refresh simply authenticates with
//! credentials.
//!
//! ## The Login Exchange
//!
//! The token endpoint is the one non-JSON request in the API family: a POST
//! of `userName=...&password=...` (form-urlencoded) to
//! `/rest-service-fecru/auth/login`, answered with a JSON body carrying the
//! bearer token. A failed exchange is logged and swallowed — the registry
//! stays in credential-only state and the connector keeps working.

use std::sync::{Mutex, PoisonError};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::uri::UriBuilder;

/// One credential-attachment strategy for an outgoing request.
///
/// # Variants
///
/// - `Basic`: username/password rendered as a pre-encoded HTTP Basic
///   `Authorization` value. Built once at connector creation, immutable.
/// - `Token`: a bearer token obtained from the login exchange, replaced
///   wholesale on each refresh. Carries the time it was obtained, for
///   diagnostics only — this layer performs no expiry tracking.
///
/// # Example
///
/// ```rust
/// use fecru_client::auth::AuthHandler;
///
/// let basic = AuthHandler::basic("jane", "secret");
/// assert!(!basic.is_token());
///
/// let token = AuthHandler::bearer("abc123");
/// assert!(token.is_token());
/// ```
#[derive(Debug, Clone)]
pub enum AuthHandler {
    /// HTTP Basic credentials.
    Basic {
        /// The pre-rendered `Authorization` header value (`Basic <base64>`).
        header: String,
    },
    /// A bearer token from the login exchange.
    Token {
        /// The token string as returned by the service.
        token: String,
        /// When the token was obtained. Diagnostics only.
        obtained_at: DateTime<Utc>,
    },
}

impl AuthHandler {
    /// Builds a basic handler from a username and password.
    pub fn basic(username: &str, password: &str) -> Self {
        let header = format!(
            "Basic {}",
            BASE64.encode(format!("{}:{}", username, password))
        );
        Self::Basic { header }
    }

    /// Builds a token handler from a bearer token string.
    pub fn bearer(token: &str) -> Self {
        Self::Token {
            token: token.to_string(),
            obtained_at: Utc::now(),
        }
    }

    /// Applies this handler's `Authorization` header to a request.
    pub fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Basic { header } => request.header(AUTHORIZATION, header),
            Self::Token { token, .. } => {
                request.header(AUTHORIZATION, format!("Bearer {}", token))
            }
        }
    }

    /// Whether this handler is the bearer-token variant.
    pub fn is_token(&self) -> bool {
        matches!(self, Self::Token { .. })
    }
}

/// JSON shape of the login exchange response.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// Holds the primary credential handler and the optional token handler, and
/// manages the asynchronous token refresh.
///
/// The token slot is the only shared mutable state in the crate. It is
/// guarded by a mutex and only ever swapped as a whole value, so concurrent
/// readers observe either the previous handler or the new one, never a
/// half-updated handler. When refreshes race, the last successful completion
/// wins.
///
/// The registry itself never fails construction and never propagates refresh
/// failures: a failed exchange clears the slot, logs at `warn`, and leaves
/// the registry serving credential-only handler lists.
pub struct AuthRegistry {
    basic: AuthHandler,
    token: Mutex<Option<AuthHandler>>,
    login_url: String,
    username: String,
    password: String,
    http: Client,
}

impl AuthRegistry {
    /// Creates a registry in credential-only state.
    ///
    /// # Parameters
    ///
    /// * `base` - The connector base URL (host plus optional web context)
    /// * `username` / `password` - Credentials for the basic handler and
    ///   the login exchange
    /// * `http` - The shared HTTP client; reqwest clients are cheap handles
    ///   over one connection pool
    pub fn new(base: &str, username: &str, password: &str, http: Client) -> Self {
        let login_url = UriBuilder::new(base)
            .add_segment("rest-service-fecru/auth/login")
            .render();
        Self {
            basic: AuthHandler::basic(username, password),
            token: Mutex::new(None),
            login_url,
            username: username.to_string(),
            password: password.to_string(),
            http,
        }
    }

    /// Returns the ordered handler list for one request.
    ///
    /// Token-preferred state yields `[token, basic]`; credential-only state
    /// yields `[basic]`. The returned handlers are owned clones, so the list
    /// a request was built with stays coherent even if a refresh swaps the
    /// slot mid-flight.
    pub fn auth_handlers(&self) -> Vec<AuthHandler> {
        let token = self
            .token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        match token {
            Some(token) => vec![token, self.basic.clone()],
            None => vec![self.basic.clone()],
        }
    }

    /// Whether the registry currently holds a token handler.
    pub fn has_token(&self) -> bool {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Performs the login exchange and swaps the token slot.
    ///
    /// Idempotent and safe to call concurrently: each completion swaps the
    /// whole slot, and the last successful completion wins. On any failure —
    /// network, non-2xx, malformed body — the slot is cleared and the
    /// failure is swallowed after a `warn` log, so a single authentication
    /// hiccup never fails the connector. Callers observing repeated
    /// authentication failures simply call this again.
    pub async fn refresh_access_token(&self) {
        match self.exchange_credentials().await {
            Ok(token) => {
                debug!("login exchange succeeded, bearer token installed");
                self.store_token(Some(AuthHandler::bearer(&token)));
            }
            Err(reason) => {
                warn!(%reason, "login exchange failed, continuing with basic credentials");
                self.store_token(None);
            }
        }
    }

    async fn exchange_credentials(&self) -> Result<String, String> {
        let response = self
            .http
            .post(&self.login_url)
            .form(&[
                ("userName", self.username.as_str()),
                ("password", self.password.as_str()),
            ])
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("login endpoint answered {}", status));
        }

        let body: LoginResponse = response.json().await.map_err(|e| e.to_string())?;
        Ok(body.token)
    }

    fn store_token(&self, handler: Option<AuthHandler>) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = handler;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_for(base: &str) -> AuthRegistry {
        AuthRegistry::new(base, "jane", "secret", Client::new())
    }

    #[test]
    fn test_credential_only_state_yields_basic_only() {
        let registry = registry_for("https://fecru.example.com");
        let handlers = registry.auth_handlers();
        assert_eq!(handlers.len(), 1);
        assert!(!handlers[0].is_token());
    }

    #[test]
    fn test_token_preferred_state_yields_token_first() {
        let registry = registry_for("https://fecru.example.com");
        registry.store_token(Some(AuthHandler::bearer("abc123")));
        let handlers = registry.auth_handlers();
        assert_eq!(handlers.len(), 2);
        assert!(handlers[0].is_token());
        assert!(!handlers[1].is_token());
    }

    #[test]
    fn test_basic_header_is_prerendered() {
        let handler = AuthHandler::basic("jane", "secret");
        match handler {
            AuthHandler::Basic { header } => {
                // base64("jane:secret")
                assert_eq!(header, "Basic amFuZTpzZWNyZXQ=");
            }
            _ => panic!("expected basic handler"),
        }
    }

    #[tokio::test]
    async fn test_successful_login_installs_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/rest-service-fecru/auth/login")
            .match_header(
                "content-type",
                mockito::Matcher::Regex("application/x-www-form-urlencoded".to_string()),
            )
            .match_body("userName=jane&password=secret")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"token": "tok-1"}"#)
            .create_async()
            .await;

        let registry = registry_for(&server.url());
        registry.refresh_access_token().await;

        mock.assert_async().await;
        assert!(registry.has_token());
        assert!(registry.auth_handlers()[0].is_token());
    }

    #[tokio::test]
    async fn test_failed_login_is_swallowed_and_clears_token() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/rest-service-fecru/auth/login")
            .with_status(401)
            .create_async()
            .await;

        let registry = registry_for(&server.url());
        registry.store_token(Some(AuthHandler::bearer("stale")));
        registry.refresh_access_token().await;

        assert!(!registry.has_token());
        assert_eq!(registry.auth_handlers().len(), 1);
    }

    #[test]
    fn test_malformed_login_body_reverts_to_credential_only() {
        tokio_test::block_on(async {
            let mut server = mockito::Server::new_async().await;
            server
                .mock("POST", "/rest-service-fecru/auth/login")
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(r#"{"unexpected": true}"#)
                .create_async()
                .await;

            let registry = registry_for(&server.url());
            registry.refresh_access_token().await;

            assert!(!registry.has_token());
        });
    }
}
