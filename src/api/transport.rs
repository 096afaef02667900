//
//  fecru-client
//  api/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Transport Operations
//!
//! This module provides [`Transport`], the owner of the HTTP client and the
//! six verb operations every endpoint method is built from: `fetch`,
//! `create`, `replace`, `delete`, `upload_file`, and `load_file`.
//!
//! ## Resolve/Reject Contract
//!
//! Every operation resolves a [`ResponseEnvelope`] for **any completed
//! HTTP exchange** — a 404 or a 500 is a resolved envelope, not an error.
//! Operations return `Err` only for transport-level failures (DNS,
//! connection refused, TLS, malformed HTTP), passed through undecoded and
//! never retried, plus local I/O failures in `load_file`.
//!
//! ## Authentication
//!
//! Each operation takes the ordered handler list the
//! [`AuthRegistry`](crate::auth::AuthRegistry) produced for the request.
//! The request goes out with the first handler; a 401 while further
//! handlers remain advances to the next one (token preferred, credentials
//! as fallback). The final response resolves normally whatever its status.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{multipart, Client, Method, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::api::common::ApiError;
use crate::api::envelope::ResponseEnvelope;
use crate::auth::AuthHandler;
use crate::options::RequestOptions;

/// The HTTP verb layer shared by all three API groups.
///
/// Owns the `reqwest::Client`, built once from the connector's TLS flag.
/// The transport keeps no per-call state: arbitrarily many operations may
/// be in flight concurrently, each producing its own envelope.
pub struct Transport {
    http: Client,
}

impl Transport {
    /// Builds the transport and its underlying HTTP client.
    ///
    /// # Parameters
    ///
    /// * `ignore_tls_errors` - When `true`, connections presenting
    ///   untrusted certificates are accepted. Off by default at the
    ///   configuration layer.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the client cannot be constructed.
    pub fn new(ignore_tls_errors: bool) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(format!("fecru-client/{}", crate::VERSION))
            .danger_accept_invalid_certs(ignore_tls_errors)
            .build()?;
        Ok(Self { http })
    }

    /// A handle to the underlying HTTP client.
    ///
    /// reqwest clients are cheap clones over a shared pool; the auth
    /// registry uses this for the login exchange so the whole connector
    /// shares one pool.
    pub fn http_client(&self) -> &Client {
        &self.http
    }

    /// Issues a GET and resolves the envelope.
    pub async fn fetch(
        &self,
        operation: &str,
        url: &str,
        handlers: &[AuthHandler],
        options: &RequestOptions,
    ) -> Result<ResponseEnvelope, ApiError> {
        let response = self
            .send_with_fallback(operation, handlers, || {
                self.prepare(Method::GET, url, options)
            })
            .await?;
        Self::into_envelope(operation, response).await
    }

    /// Issues a POST with a JSON body and resolves the envelope.
    pub async fn create<B: serde::Serialize>(
        &self,
        operation: &str,
        url: &str,
        handlers: &[AuthHandler],
        options: &RequestOptions,
        body: &B,
    ) -> Result<ResponseEnvelope, ApiError> {
        let response = self
            .send_with_fallback(operation, handlers, || {
                self.prepare(Method::POST, url, options).json(body)
            })
            .await?;
        Self::into_envelope(operation, response).await
    }

    /// Issues a PUT with a JSON body and resolves the envelope.
    ///
    /// Replace-or-update semantics; the resolve/reject contract is
    /// identical to [`fetch`](Self::fetch).
    pub async fn replace<B: serde::Serialize>(
        &self,
        operation: &str,
        url: &str,
        handlers: &[AuthHandler],
        options: &RequestOptions,
        body: &B,
    ) -> Result<ResponseEnvelope, ApiError> {
        let response = self
            .send_with_fallback(operation, handlers, || {
                self.prepare(Method::PUT, url, options).json(body)
            })
            .await?;
        Self::into_envelope(operation, response).await
    }

    /// Issues a DELETE and resolves the envelope.
    ///
    /// The body is typically absent on success; callers resolve with
    /// [`ResponseEnvelope::expect_empty`].
    pub async fn delete(
        &self,
        operation: &str,
        url: &str,
        handlers: &[AuthHandler],
        options: &RequestOptions,
    ) -> Result<ResponseEnvelope, ApiError> {
        let response = self
            .send_with_fallback(operation, handlers, || {
                self.prepare(Method::DELETE, url, options)
            })
            .await?;
        Self::into_envelope(operation, response).await
    }

    /// Issues a streamed multipart upload and resolves the envelope.
    ///
    /// The content is sent as a `file` part with the supplied file name,
    /// which is the shape the review add-file endpoint expects. The
    /// content-type of the exchange is the multipart boundary type, so the
    /// options' content type is not applied; the accept header is.
    pub async fn upload_file(
        &self,
        operation: &str,
        url: &str,
        handlers: &[AuthHandler],
        options: &RequestOptions,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<ResponseEnvelope, ApiError> {
        let response = self
            .send_with_fallback(operation, handlers, || {
                let part = multipart::Part::bytes(content.clone())
                    .file_name(file_name.to_string());
                let form = multipart::Form::new().part("file", part);
                self.http
                    .request(Method::POST, url)
                    .header(ACCEPT, &options.accept)
                    .multipart(form)
            })
            .await?;
        Self::into_envelope(operation, response).await
    }

    /// Issues a GET, spools the body through a temporary file, and resolves
    /// a synthesized-success envelope.
    ///
    /// Used for endpoints whose payloads are too large to buffer at the
    /// HTTP layer: the response stream is written chunk-wise to a uniquely
    /// named temporary file via `tokio::fs` (large spools never block a
    /// worker thread), re-read, and JSON-decoded. The envelope status
    /// is a synthesized 200 once the stream closes cleanly; the actual
    /// status is not consulted beyond the 401 handler fallback.
    ///
    /// The temporary file is removed on every exit path — success, decode
    /// failure, or I/O error — because it is owned by a scope-bound
    /// [`NamedTempFile`]. Concurrent calls never collide: each call gets a
    /// fresh path.
    ///
    /// # Errors
    ///
    /// [`ApiError::Transport`] for network failures mid-stream and
    /// [`ApiError::Io`] for temporary-file failures.
    pub async fn load_file(
        &self,
        operation: &str,
        url: &str,
        handlers: &[AuthHandler],
        options: &RequestOptions,
    ) -> Result<ResponseEnvelope, ApiError> {
        let mut response = self
            .send_with_fallback(operation, handlers, || {
                self.prepare(Method::GET, url, options)
            })
            .await?;

        let spool = NamedTempFile::new()?;
        let mut writer = tokio::fs::File::from_std(spool.reopen()?);
        while let Some(chunk) = response.chunk().await? {
            writer.write_all(&chunk).await?;
        }
        writer.flush().await?;

        let text = tokio::fs::read_to_string(spool.path()).await?;
        debug!(operation, bytes = text.len(), "download spooled and re-read");

        Ok(ResponseEnvelope::new(
            StatusCode::OK.as_u16(),
            decode_body(&text),
        ))
    }

    fn prepare(&self, method: Method, url: &str, options: &RequestOptions) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(CONTENT_TYPE, &options.content_type)
            .header(ACCEPT, &options.accept)
    }

    /// Sends the request once per handler until a non-401 response or the
    /// handler list is exhausted. An empty list sends unauthenticated once.
    async fn send_with_fallback(
        &self,
        operation: &str,
        handlers: &[AuthHandler],
        build: impl Fn() -> RequestBuilder,
    ) -> Result<Response, ApiError> {
        let mut attempt = 0;
        loop {
            let mut request = build();
            if let Some(handler) = handlers.get(attempt) {
                request = handler.apply(request);
            }

            debug!(operation, attempt, "issuing request");
            let response = request.send().await?;

            if response.status() == StatusCode::UNAUTHORIZED && attempt + 1 < handlers.len() {
                debug!(operation, "authentication rejected, trying fallback handler");
                attempt += 1;
                continue;
            }
            return Ok(response);
        }
    }

    async fn into_envelope(
        operation: &str,
        response: Response,
    ) -> Result<ResponseEnvelope, ApiError> {
        let status = response.status().as_u16();
        let text = response.text().await?;
        debug!(operation, status, "exchange completed");
        Ok(ResponseEnvelope::new(status, decode_body(&text)))
    }
}

/// Decodes a response body into the envelope's raw value.
///
/// An empty (or whitespace-only) body is absence. A body that is not JSON
/// is kept as a raw string value, so the generic-error path can still
/// surface its text instead of losing it.
fn decode_body(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(text) {
        Ok(value) => Some(value),
        Err(_) => Some(Value::String(text.to_string())),
    }
}
