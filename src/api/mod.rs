//
//  fecru-client
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Layer
//!
//! This module provides the request/response core and the three FeCru API
//! groups built on top of it.
//!
//! ## Architecture
//!
//! Every remote call flows through the same four primitives:
//!
//! 1. A [`UriBuilder`](crate::uri::UriBuilder) assembles the target URL
//! 2. The [`AuthRegistry`](crate::auth::AuthRegistry) supplies the ordered
//!    handler list
//! 3. A [`Transport`](transport::Transport) verb operation issues the call
//! 4. The resulting [`ResponseEnvelope`](envelope::ResponseEnvelope) is
//!    resolved by the endpoint method, which knows what each status means
//!    for its endpoint
//!
//! ## API Groups
//!
//! The three sibling APIs share one host and one authentication scheme but
//! live under different path roots:
//!
//! | Group | Path root | Scope |
//! |-------|-----------|-------|
//! | [`fecru`] | `/rest-service-fecru` | Common administration API |
//! | [`crucible`] | `/rest-service` | Code review API |
//! | [`fisheye`] | `/rest-service-fe` | SCM indexing API |

/// The six HTTP verb operations producing response envelopes.
pub mod transport;

/// The status-plus-body pair and its typed extraction primitives.
pub mod envelope;

/// Shared types: the error taxonomy and the paged-response envelope.
pub mod common;

/// Common administration API group (`/rest-service-fecru`).
pub mod fecru;

/// Crucible code review API group (`/rest-service`).
pub mod crucible;

/// Fisheye SCM indexing API group (`/rest-service-fe`).
pub mod fisheye;

/// Re-export of the error and domain-error types.
pub use common::{ApiError, DomainError};

/// Re-export of the envelope every exchange resolves to.
pub use envelope::ResponseEnvelope;
