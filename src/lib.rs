//
//  fecru-client
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # FeCru Client Library
//!
//! A typed async client for the Atlassian Fisheye/Crucible (FeCru) REST API
//! family: three sibling APIs sharing one host and one authentication
//! scheme.
//!
//! ## Overview
//!
//! The crate is built around four primitives that every remote call flows
//! through:
//!
//! 1. **Build the URI** — [`uri::UriBuilder`] composes ordered path
//!    segments and multi-valued query parameters with correct encoding
//! 2. **Attach authentication** — [`auth::AuthRegistry`] supplies an
//!    ordered handler list (bearer token preferred, basic credentials as
//!    the ever-present fallback)
//! 3. **Issue the verb** — [`api::transport::Transport`] provides fetch,
//!    create, replace, delete, streamed upload, and spooled download
//! 4. **Resolve the response** — [`api::envelope::ResponseEnvelope`]
//!    defers success/error disambiguation to the call site, which knows
//!    what each status means for its endpoint
//!
//! ## API Groups
//!
//! | Group | Path root | Scope |
//! |-------|-----------|-------|
//! | [`Connector::fecru`] | `/rest-service-fecru` | Common administration |
//! | [`Connector::crucible`] | `/rest-service` | Code review |
//! | [`Connector::fisheye`] | `/rest-service-fe` | SCM indexing |
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
//! for repo in connector.crucible().list_repositories().await? {
//!     println!("{}", repo.name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Model
//!
//! Every operation resolves with a typed success value or fails with an
//! [`ApiError`]: transport failures pass the underlying error through
//! unchanged, completed-but-unexpected exchanges become domain errors
//! (degrading to an `Unknown` default rather than panicking), and the
//! handful of endpoints with a structured 409 surface it as a conflict.

/// Request-URI composition: ordered segments, multi-valued parameters,
/// percent-encoding, repeat/join render modes.
pub mod uri;

/// Authentication handlers and their lifecycle: the basic-credential
/// bootstrap, the bearer-token upgrade, and the swallowed-failure refresh.
pub mod auth;

/// Per-request options (media types, TLS-validation flag) and their
/// factory.
pub mod options;

/// Connector configuration supplied by the embedding application.
pub mod config;

/// The transport verbs, the response envelope, shared error types, and the
/// three API groups.
pub mod api;

/// The connector facade owning the shared core.
pub mod connector;

/// Re-export of the crate entry point.
pub use connector::Connector;

/// Re-export of the connector configuration.
pub use config::ConnectorConfig;

/// Re-export of the crate error type.
pub use api::common::ApiError;

/// Re-export of the structured domain-error shape.
pub use api::common::DomainError;

/// Client version constant, derived from Cargo.toml at compile time.
///
/// Sent as part of the `User-Agent` header on every request.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
