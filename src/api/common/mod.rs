//
//  fecru-client
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Common API Types
//!
//! Shared types used across the three FeCru API groups: the crate-wide
//! error enum, the structured domain-error shape returned by the remote
//! service, and the paged-response envelope (re-exported from
//! [`pagination`]).
//!
//! # Error Taxonomy
//!
//! The crate distinguishes three failure families, and they never blur:
//!
//! - **Transport failures** ([`ApiError::Transport`]) are connection, DNS,
//!   TLS, or protocol errors. They carry the raw underlying error, are never
//!   retried, and are surfaced to the caller unchanged.
//! - **Domain errors** ([`ApiError::Domain`]) are completed HTTP exchanges
//!   whose status was not what the endpoint expected for success. They carry
//!   a [`DomainError`], degrading to the `Unknown` default when the body
//!   cannot be interpreted — callers always receive *some* error object
//!   from this path, never a panic.
//! - **Structured conflicts** ([`ApiError::Conflict`]) are the second error
//!   shape a handful of endpoints return at HTTP 409 (business-rule
//!   violations such as failed review-transition conditions). The payload is
//!   carried verbatim so callers can decode the endpoint-specific shape.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod pagination;

pub use pagination::*;

/// The `code` used when the remote body could not be interpreted.
pub const UNKNOWN_ERROR_CODE: &str = "Unknown";

/// The system-wide default domain error.
///
/// Returned whenever a non-success response carries no body and the caller
/// supplied no fallback message of its own.
pub static DEFAULT_DOMAIN_ERROR: Lazy<DomainError> = Lazy::new(|| DomainError {
    code: UNKNOWN_ERROR_CODE.to_string(),
    message: "Unknown error".to_string(),
});

/// Error type for all FeCru API operations.
///
/// # Variants
///
/// | Variant | Meaning | Retried |
/// |---------|---------|---------|
/// | `Transport` | Connection, DNS, TLS, or protocol failure | Never |
/// | `Domain` | Completed exchange with an unexpected status | Never |
/// | `Conflict` | HTTP 409 carrying a structured business-rule payload | Never |
/// | `Io` | Local file I/O failure during a streamed download | Never |
/// | `InvalidUrl` | Connector configuration with an unparsable host | N/A |
///
/// # Example
///
/// ```rust
/// use fecru_client::api::common::{ApiError, DomainError};
///
/// fn describe(error: &ApiError) -> String {
///     match error {
///         ApiError::Domain(domain) => format!("service said: {}", domain),
///         ApiError::Conflict(payload) => format!("rule violation: {}", payload),
///         other => format!("{}", other),
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum ApiError {
    /// A transport-level failure: the HTTP exchange never completed.
    ///
    /// The underlying `reqwest::Error` is passed through undecoded.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// A completed exchange whose status did not match the expected
    /// success status for the endpoint.
    #[error("{0}")]
    Domain(DomainError),

    /// A structured business-rule violation delivered at HTTP 409.
    ///
    /// The payload is the raw decoded body; endpoint modules document the
    /// concrete shape (e.g. failed review-transition conditions).
    #[error("business rule violation (HTTP 409)")]
    Conflict(serde_json::Value),

    /// A local I/O failure while persisting or re-reading a streamed
    /// download.
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    /// The configured host could not be parsed as an absolute URL.
    #[error("invalid connector host: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Structured error shape returned by the FeCru service body.
///
/// Every non-success response that carries a body is expected to decode to
/// this minimal `{code, message}` shape; richer endpoint-specific error
/// payloads still include these two fields. When a body does not decode,
/// extraction degrades to [`DEFAULT_DOMAIN_ERROR`] semantics rather than
/// failing.
///
/// # Example
///
/// ```rust
/// use fecru_client::api::common::DomainError;
///
/// let error: DomainError =
///     serde_json::from_str(r#"{"code": "NotPermitted", "message": "anonymous access"}"#).unwrap();
/// assert_eq!(error.code, "NotPermitted");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainError {
    /// Machine-readable error code (e.g. `NotFound`, `IllegalState`).
    pub code: String,

    /// Human-readable description of the failure.
    pub message: String,
}

impl DomainError {
    /// Creates an `Unknown`-coded error with the given message.
    ///
    /// Used on every degradation path: absent bodies, undecodable bodies,
    /// and unexpected statuses with no recognizable error shape.
    pub fn unknown(message: &str) -> Self {
        Self {
            code: UNKNOWN_ERROR_CODE.to_string(),
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_domain_error() {
        assert_eq!(DEFAULT_DOMAIN_ERROR.code, "Unknown");
        assert_eq!(DEFAULT_DOMAIN_ERROR.message, "Unknown error");
    }

    #[test]
    fn test_unknown_constructor() {
        let error = DomainError::unknown("boom");
        assert_eq!(error.code, "Unknown");
        assert_eq!(error.message, "boom");
    }

    #[test]
    fn test_display_includes_code() {
        let error = DomainError {
            code: "NotFound".to_string(),
            message: "no such review".to_string(),
        };
        assert_eq!(format!("{}", error), "no such review (NotFound)");
    }

    #[test]
    fn test_extra_fields_are_ignored_on_decode() {
        let error: DomainError = serde_json::from_str(
            r#"{"code": "IllegalState", "message": "closed", "stacktrace": "..."}"#,
        )
        .unwrap();
        assert_eq!(error.code, "IllegalState");
    }
}
