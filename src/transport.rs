//! HTTP transport seam.
//!
//! Adapters never touch `reqwest` directly; they hand an [`HttpRequest`] to an
//! [`HttpTransport`] and classify the [`HttpResponse`] themselves. Production
//! code uses [`ReqwestTransport`]; tests substitute a mock.

use crate::error::{RelayError, RelayResult};
use crate::logging::log_debug;
use crate::provider::Provider;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use std::time::Duration;

/// One outbound JSON POST.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Provider the request belongs to; used to tag transport errors.
    pub provider: Provider,
    pub url: reqwest::Url,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
    pub timeout: Duration,
}

/// Status and raw body of a completed exchange, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Parsed `Retry-After` header (seconds form only).
    pub retry_after_seconds: Option<u64>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            retry_after_seconds: None,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs a single request. No retries: a paid call is never sent twice.
///
/// Implementations report network failures and timeouts as
/// [`RelayError::TransportError`]; any HTTP status, including errors, comes
/// back as `Ok(HttpResponse)`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn post_json(&self, request: HttpRequest) -> RelayResult<HttpResponse>;
}

/// [`HttpTransport`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_json(&self, request: HttpRequest) -> RelayResult<HttpResponse> {
        let HttpRequest {
            provider,
            url,
            headers,
            body,
            timeout,
        } = request;

        // The path only: Google carries its key in the query string.
        log_debug!(
            provider = %provider,
            path = %url.path(),
            timeout_secs = timeout.as_secs(),
            "Sending upstream request"
        );

        let response = self
            .client
            .post(url)
            .headers(headers)
            .json(&body)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                // Strip the URL so a keyed query string never reaches a log line.
                let e = e.without_url();
                let message = if e.is_timeout() {
                    format!("timed out after {timeout:?}")
                } else {
                    format!("network error: {e}")
                };
                RelayError::transport_error(provider, message, Some(Box::new(e)))
            })?;

        let status = response.status().as_u16();
        let retry_after_seconds = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok());

        let body = response.text().await.map_err(|e| {
            let e = e.without_url();
            let message = if e.is_timeout() {
                format!("timed out reading response after {timeout:?}")
            } else {
                format!("failed to read response body: {e}")
            };
            RelayError::transport_error(provider, message, Some(Box::new(e)))
        })?;

        log_debug!(
            provider = %provider,
            status = status,
            body_len = body.len(),
            "Received upstream response"
        );

        Ok(HttpResponse {
            status,
            retry_after_seconds,
            body,
        })
    }
}
