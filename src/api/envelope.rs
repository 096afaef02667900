//
//  fecru-client
//  api/envelope.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Response Envelope
//!
//! This module provides [`ResponseEnvelope`], the status-plus-body pair
//! produced by every completed HTTP exchange before caller-side
//! interpretation.
//!
//! ## Why Resolution Is Deferred
//!
//! FeCru endpoints return different body shapes for the same URL depending
//! on the status code: a success payload on 200/201, nothing on 204, the
//! generic `{code, message}` error on most 4xx, and for a handful of
//! endpoints a second structured shape at 409. Rather than decoding a tagged
//! union up front, the transport hands back the raw pair and the call site —
//! which knows what each status means *for its endpoint* — performs the
//! extraction. The envelope is created once per exchange, is immutable, and
//! is consumed by exactly one caller.
//!
//! ## Extraction Primitives
//!
//! - [`result`](ResponseEnvelope::result): status-gated typed success
//!   extraction
//! - [`error`](ResponseEnvelope::error): generic domain-error extraction
//!   with a never-failing fallback
//! - [`conflict`](ResponseEnvelope::conflict): the second, status-specific
//!   error shape, checked before falling back to [`error`]
//! - [`expect_result`](ResponseEnvelope::expect_result) /
//!   [`expect_empty`](ResponseEnvelope::expect_empty): tagged-result
//!   wrappers over the primitives, used by the endpoint methods

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::common::{ApiError, DomainError, DEFAULT_DOMAIN_ERROR};

/// The status and decoded body of one completed HTTP exchange.
///
/// The body, when present, is a raw [`serde_json::Value`]: the transport
/// does not know — and does not pretend to know — whether it is a success
/// payload or an error payload. Callers must not interpret the body without
/// checking `status` against the status they expected for success.
///
/// # Example
///
/// ```rust
/// use fecru_client::api::envelope::ResponseEnvelope;
/// use serde_json::json;
///
/// let envelope = ResponseEnvelope::new(200, Some(json!({"name": "repo1", "type": "git"})));
///
/// #[derive(serde::Deserialize)]
/// struct Repository {
///     name: String,
/// }
///
/// let repo: Option<Repository> = envelope.result(Some(200));
/// assert_eq!(repo.unwrap().name, "repo1");
///
/// let missed: Option<Repository> = envelope.result(Some(201));
/// assert!(missed.is_none());
/// ```
#[derive(Debug, Clone)]
pub struct ResponseEnvelope {
    status: u16,
    body: Option<Value>,
}

impl ResponseEnvelope {
    /// Wraps a status code and an optional decoded body.
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }

    /// The HTTP status code of the exchange.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// The raw decoded body, if the response carried one.
    pub fn raw_body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Extracts the success payload as type `U`.
    ///
    /// Returns `None` when:
    /// - `expected` is supplied and does not equal the actual status
    ///   ("200 with body" and "204 no body" stay distinct this way),
    /// - the body is absent (a 200 with an empty body yields `None` even
    ///   when the status matched), or
    /// - the body does not deserialize as `U` — the caller picked a shape
    ///   the remote did not send for this status.
    ///
    /// With `expected` of `None` the body is extracted regardless of the
    /// actual status.
    pub fn result<U: DeserializeOwned>(&self, expected: Option<u16>) -> Option<U> {
        if let Some(expected) = expected {
            if expected != self.status {
                return None;
            }
        }
        let body = self.body.as_ref()?;
        serde_json::from_value(body.clone()).ok()
    }

    /// Extracts the generic domain error, never failing.
    ///
    /// A present body is decoded as [`DomainError`]; a body of some other
    /// shape degrades to `{code: "Unknown", message: <raw body text>}`. An
    /// absent body yields `{code: "Unknown", message: fallback_message}`.
    /// Callers on this path always receive an error object, never a panic
    /// or a secondary decode failure.
    pub fn error(&self, fallback_message: &str) -> DomainError {
        match &self.body {
            Some(body) => serde_json::from_value(body.clone())
                .unwrap_or_else(|_| DomainError::unknown(&body.to_string())),
            None => DomainError::unknown(fallback_message),
        }
    }

    /// Extracts the endpoint-specific structured shape carried at one
    /// particular status.
    ///
    /// Several endpoints deliver a business-rule violation payload at 409
    /// that is not the generic `{code, message}` shape. This accessor gates
    /// on that exact status and decodes the body as `C`; callers check it
    /// *before* falling back to [`error`](Self::error). Returns `None` when
    /// the status differs, the body is absent, or the body is not a `C`.
    pub fn conflict<C: DeserializeOwned>(&self, at_status: u16) -> Option<C> {
        if self.status != at_status {
            return None;
        }
        let body = self.body.as_ref()?;
        serde_json::from_value(body.clone()).ok()
    }

    /// Resolves the envelope to a typed success or a domain error.
    ///
    /// The tagged-result form of [`result`](Self::result): `Ok(U)` when the
    /// status matches and the body decodes, otherwise `Err(ApiError::Domain)`
    /// built from the generic error path, degrading to
    /// [`DEFAULT_DOMAIN_ERROR`] when the response carried no body.
    pub fn expect_result<U: DeserializeOwned>(&self, expected: u16) -> Result<U, ApiError> {
        self.result(Some(expected))
            .ok_or_else(|| ApiError::Domain(self.error(&DEFAULT_DOMAIN_ERROR.message)))
    }

    /// Resolves a body-less success against a per-endpoint set of accepted
    /// statuses.
    ///
    /// Endpoints disagree about which no-content statuses count as success
    /// (some accept 204 and 304, some only 204), so the accepted set is
    /// supplied by the call site rather than unified here.
    pub fn expect_empty(&self, accepted: &[u16]) -> Result<(), ApiError> {
        if accepted.contains(&self.status) {
            Ok(())
        } else {
            Err(ApiError::Domain(self.error(&DEFAULT_DOMAIN_ERROR.message)))
        }
    }
}
