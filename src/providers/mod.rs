//! Provider adapters
//!
//! One adapter per upstream API family:
//!
//! - **openai**: OpenAI chat completions
//! - **anthropic**: Anthropic messages API
//! - **google**: Gemini generate-content
//! - **free_tier**: generic OpenAI-shaped proxy with degraded-mode fallback
//! - **openai_shared**: chat-completion wire types used by `openai` and `free_tier`
//!
//! ```text
//! openai_shared   <- chat-completion request/response types
//!    |      |
//! openai  free_tier
//!
//! anthropic  google   <- native wire formats
//! ```
//!
//! The helpers in this module apply one status-classification policy to
//! every paid provider.

pub mod anthropic;
pub mod free_tier;
pub mod google;
pub mod openai;
pub mod openai_shared;

pub use anthropic::AnthropicAdapter;
pub use free_tier::FreeTierAdapter;
pub use google::GoogleAdapter;
pub use openai::OpenAIAdapter;

use crate::error::{RelayError, RelayResult};
use crate::logging::log_error;
use crate::provider::Provider;
use crate::transport::HttpResponse;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Longest slice of an upstream body quoted in an error message.
const MAX_ERROR_DETAIL_CHARS: usize = 300;

/// Map a non-2xx status to the error taxonomy; 2xx passes through.
///
/// 401/403 → auth failure, 429 → rate limited, everything else → transport.
pub(crate) fn check_status(provider: Provider, response: &HttpResponse) -> RelayResult<()> {
    if response.is_success() {
        return Ok(());
    }

    let detail = upstream_error_detail(&response.body);
    match response.status {
        401 | 403 => Err(RelayError::auth_failure(
            provider,
            Some(response.status),
            detail,
        )),
        429 => Err(RelayError::rate_limited(
            provider,
            response.retry_after_seconds,
        )),
        status => Err(RelayError::transport_error(
            provider,
            format!("API error {status}: {detail}"),
            None,
        )),
    }
}

/// Pull `error.message` out of a JSON error body, or quote the raw body.
///
/// OpenAI, Anthropic and Gemini all use `{"error": {"message": ...}}`.
pub(crate) fn upstream_error_detail(body: &str) -> String {
    let structured = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            json.pointer("/error/message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        });

    match structured {
        Some(message) => message,
        None if body.trim().is_empty() => "empty response body".to_string(),
        None => body.chars().take(MAX_ERROR_DETAIL_CHARS).collect(),
    }
}

/// Decode a 2xx body into the provider's response type.
pub(crate) fn parse_body<T: DeserializeOwned>(provider: Provider, body: &str) -> RelayResult<T> {
    serde_json::from_str(body).map_err(|e| {
        log_error!(
            provider = %provider,
            error = %e,
            body_len = body.len(),
            "Failed to parse provider response"
        );
        RelayError::unparseable_response(provider, format!("invalid response body: {e}"))
    })
}

pub(crate) fn encode_body<T: Serialize>(
    provider: Provider,
    request: &T,
) -> RelayResult<serde_json::Value> {
    serde_json::to_value(request).map_err(|e| {
        RelayError::transport_error(
            provider,
            format!("failed to encode request: {e}"),
            Some(Box::new(e)),
        )
    })
}

/// `base` joined with `path`; a malformed endpoint is a transport failure.
pub(crate) fn endpoint_url(provider: Provider, base: &str, path: &str) -> RelayResult<Url> {
    let raw = format!("{}{}", base.trim_end_matches('/'), path);
    Url::parse(&raw).map_err(|e| {
        RelayError::transport_error(
            provider,
            format!("invalid endpoint URL '{raw}': {e}"),
            Some(Box::new(e)),
        )
    })
}

pub(crate) fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// Insert a secret header, marked sensitive so it is hidden from `Debug`.
pub(crate) fn insert_secret_header(
    provider: Provider,
    headers: &mut HeaderMap,
    name: HeaderName,
    value: &str,
) -> RelayResult<()> {
    let mut value = HeaderValue::from_str(value).map_err(|_| {
        RelayError::auth_failure(
            provider,
            None,
            "API key contains characters that are not allowed in an HTTP header",
        )
    })?;
    value.set_sensitive(true);
    headers.insert(name, value);
    Ok(())
}

/// `Content-Type` plus `Authorization: Bearer <key>`.
pub(crate) fn bearer_headers(provider: Provider, api_key: &str) -> RelayResult<HeaderMap> {
    let mut headers = json_headers();
    insert_secret_header(
        provider,
        &mut headers,
        AUTHORIZATION,
        &format!("Bearer {api_key}"),
    )?;
    Ok(headers)
}
