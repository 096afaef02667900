//
//  fecru-client
//  options/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Per-Request Options
//!
//! This module provides [`RequestOptions`] and its factory. Options are
//! built fresh for every call from a small enumerated configuration: the
//! outgoing content type, the accepted response type, and the connector's
//! TLS-validation flag. Nothing here has state beyond the copied flag and
//! nothing here can fail.

/// The default media type for FeCru request and response bodies.
pub const APPLICATION_JSON: &str = "application/json";

/// The media type of the login exchange request body.
///
/// The token endpoint is the one place in the API family that does not
/// speak JSON on the way in: it expects `userName=...&password=...`.
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Options applied to a single HTTP exchange.
///
/// Constructed per call by [`RequestOptionsFactory`] and discarded after the
/// exchange completes; options are never retained or shared between calls.
///
/// # Fields
///
/// * `content_type` - Media type applied to the outgoing body
/// * `accept` - Media type requested for the response body
/// * `ignore_tls_errors` - Whether connections presenting untrusted
///   certificates are tolerated (copied from the connector configuration)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    /// Media type applied to the outgoing request body.
    pub content_type: String,

    /// Media type requested for the response body.
    pub accept: String,

    /// Whether to tolerate untrusted TLS certificates.
    ///
    /// This mirrors the connector-level flag; the transport bakes it into
    /// its client at construction, and the copy here is carried for
    /// diagnostics and parity with the remote connector contract.
    pub ignore_tls_errors: bool,
}

/// Factory for per-request options.
///
/// A pure function over its two media-type arguments plus the captured
/// connector TLS flag. Both media types default to JSON, which is what
/// every FeCru endpoint other than the login exchange uses.
///
/// # Example
///
/// ```rust
/// use fecru_client::options::{RequestOptionsFactory, APPLICATION_JSON};
///
/// let factory = RequestOptionsFactory::new(false);
/// let options = factory.options();
///
/// assert_eq!(options.content_type, APPLICATION_JSON);
/// assert_eq!(options.accept, APPLICATION_JSON);
/// assert!(!options.ignore_tls_errors);
/// ```
#[derive(Debug, Clone)]
pub struct RequestOptionsFactory {
    ignore_tls_errors: bool,
}

impl RequestOptionsFactory {
    /// Creates a factory capturing the connector's TLS-validation flag.
    pub fn new(ignore_tls_errors: bool) -> Self {
        Self { ignore_tls_errors }
    }

    /// Builds options with JSON for both the request and response body.
    pub fn options(&self) -> RequestOptions {
        self.options_with(APPLICATION_JSON, APPLICATION_JSON)
    }

    /// Builds options with explicit request and response media types.
    pub fn options_with(&self, request_mime_type: &str, result_mime_type: &str) -> RequestOptions {
        RequestOptions {
            content_type: request_mime_type.to_string(),
            accept: result_mime_type.to_string(),
            ignore_tls_errors: self.ignore_tls_errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_json_both_ways() {
        let options = RequestOptionsFactory::new(false).options();
        assert_eq!(options.content_type, APPLICATION_JSON);
        assert_eq!(options.accept, APPLICATION_JSON);
    }

    #[test]
    fn test_tls_flag_is_copied() {
        assert!(RequestOptionsFactory::new(true).options().ignore_tls_errors);
        assert!(!RequestOptionsFactory::new(false).options().ignore_tls_errors);
    }

    #[test]
    fn test_explicit_media_types() {
        let options = RequestOptionsFactory::new(false)
            .options_with(FORM_URLENCODED, APPLICATION_JSON);
        assert_eq!(options.content_type, FORM_URLENCODED);
        assert_eq!(options.accept, APPLICATION_JSON);
    }
}
