//
//  fecru-client
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Connector Configuration
//!
//! This module provides [`ConnectorConfig`], the construction input for a
//! [`Connector`](crate::Connector). The embedding application supplies the
//! host URL, credentials, and two behavioral flags; the crate neither reads
//! nor writes configuration files.
//!
//! ## Example
//!
//! ```rust
//! use fecru_client::config::ConnectorConfig;
//!
//! let config = ConnectorConfig::new("https://fecru.example.com:8060", "jane", "secret")
//!     .with_web_context("fecru")
//!     .with_access_token(true);
//!
//! assert_eq!(config.base_url().unwrap(), "https://fecru.example.com:8060/fecru");
//! ```

use url::Url;

use crate::api::common::ApiError;

/// Connection configuration for a FeCru instance.
///
/// # Fields
///
/// | Field | Default | Description |
/// |-------|---------|-------------|
/// | `host` | — | Scheme, host, and optional port of the instance |
/// | `web_context` | `None` | Context path inserted between host and every resource path |
/// | `username` | — | Account used for the basic handler and the login exchange |
/// | `password` | — | Password for the same account |
/// | `use_access_token` | `true` | Whether to bootstrap a bearer token at construction |
/// | `ignore_tls_errors` | `false` | Whether to tolerate untrusted TLS certificates |
#[derive(Debug, Clone)]
pub struct ConnectorConfig {
    /// Scheme, host, and optional port (e.g. `https://fecru.example.com:8060`).
    pub host: String,

    /// Optional web-context path prefix, without slashes.
    ///
    /// When present it is inserted between the host and every resource path,
    /// matching instances deployed under a servlet context.
    pub web_context: Option<String>,

    /// Username for the basic handler and the login exchange.
    pub username: String,

    /// Password for the basic handler and the login exchange.
    pub password: String,

    /// Whether to obtain a bearer token via the login exchange.
    ///
    /// When `true` (the default) the connector fires the exchange at
    /// construction and prefers the resulting token handler; basic
    /// credentials remain the fallback either way.
    pub use_access_token: bool,

    /// Whether to tolerate connections presenting untrusted certificates.
    pub ignore_tls_errors: bool,
}

impl ConnectorConfig {
    /// Creates a configuration with the defaults described above.
    pub fn new(host: &str, username: &str, password: &str) -> Self {
        Self {
            host: host.to_string(),
            web_context: None,
            username: username.to_string(),
            password: password.to_string(),
            use_access_token: true,
            ignore_tls_errors: false,
        }
    }

    /// Sets the web-context path prefix.
    pub fn with_web_context(mut self, web_context: &str) -> Self {
        self.web_context = Some(web_context.trim_matches('/').to_string());
        self
    }

    /// Enables or disables the bearer-token bootstrap.
    pub fn with_access_token(mut self, use_access_token: bool) -> Self {
        self.use_access_token = use_access_token;
        self
    }

    /// Enables or disables TLS certificate validation.
    pub fn with_ignore_tls_errors(mut self, ignore_tls_errors: bool) -> Self {
        self.ignore_tls_errors = ignore_tls_errors;
        self
    }

    /// Assembles and validates the base URL every resource path hangs off.
    ///
    /// The host must carry an explicit scheme; the optional web context is
    /// appended as a single path component. The result never ends with a
    /// slash so that segment rendering stays uniform.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] when the host cannot be parsed as an
    /// absolute URL.
    pub fn base_url(&self) -> Result<String, ApiError> {
        let parsed = Url::parse(&self.host)?;
        let mut base = parsed.as_str().trim_end_matches('/').to_string();
        if let Some(context) = &self.web_context {
            if !context.is_empty() {
                base.push('/');
                base.push_str(context);
            }
        }
        Ok(base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_without_context() {
        let config = ConnectorConfig::new("https://fecru.example.com", "u", "p");
        assert_eq!(config.base_url().unwrap(), "https://fecru.example.com");
    }

    #[test]
    fn test_base_url_with_context_and_port() {
        let config = ConnectorConfig::new("https://fecru.example.com:8060", "u", "p")
            .with_web_context("/fecru/");
        assert_eq!(
            config.base_url().unwrap(),
            "https://fecru.example.com:8060/fecru"
        );
    }

    #[test]
    fn test_host_without_scheme_is_rejected() {
        let config = ConnectorConfig::new("fecru.example.com", "u", "p");
        assert!(config.base_url().is_err());
    }

    #[test]
    fn test_defaults() {
        let config = ConnectorConfig::new("https://fecru.example.com", "u", "p");
        assert!(config.use_access_token);
        assert!(!config.ignore_tls_errors);
        assert!(config.web_context.is_none());
    }
}
