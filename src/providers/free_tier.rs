//! Free-tier proxy adapter
//!
//! Free-tier models sit behind one generic HTTP endpoint that accepts the
//! chat-completion request shape. Replies vary between proxies, so the text is
//! looked up in `choices[0].message.content`, then `output`, then `response`.
//!
//! This adapter never fails. When the endpoint is missing, unreachable or
//! answers with something unusable, [`FreeTierAdapter::invoke`] returns a
//! labelled simulated response that names the problem and echoes the prompt.

use super::openai_shared::{ChatCompletionRequest, ChatMessage};
use super::{bearer_headers, check_status, encode_body, json_headers, parse_body};
use crate::config::FreeTierConfig;
use crate::error::{RelayError, RelayResult};
use crate::logging::{log_debug, log_warn};
use crate::provider::{Provider, ProviderAdapter};
use crate::transport::{HttpRequest, HttpTransport};
use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Leading marker of every degraded-mode answer.
pub const SIMULATED_RESPONSE_MARKER: &str = "[Simulated response";

/// Field paths tried in order when extracting text from a proxy reply.
const TEXT_POINTERS: [&str; 3] = ["/choices/0/message/content", "/output", "/response"];

/// Adapter for the generic free-tier proxy.
pub struct FreeTierAdapter {
    config: FreeTierConfig,
    transport: Arc<dyn HttpTransport>,
    timeout: Duration,
}

impl FreeTierAdapter {
    pub fn new(
        config: FreeTierConfig,
        transport: Arc<dyn HttpTransport>,
        timeout: Duration,
    ) -> Self {
        Self {
            config,
            transport,
            timeout,
        }
    }

    pub(crate) fn build_request(&self, model_id: &str, prompt: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: model_id.to_string(),
            messages: vec![ChatMessage::user(prompt)],
            temperature: Some(self.config.temperature),
            max_tokens: self.config.max_tokens,
        }
    }

    /// One real call to the proxy, with no fallback.
    pub async fn try_invoke(&self, model_id: &str, prompt: &str) -> RelayResult<String> {
        let endpoint = self.config.endpoint().ok_or_else(|| {
            RelayError::transport_error(
                Provider::FreeTier,
                "no free-tier endpoint configured (set FREE_TIER_ENDPOINT)",
                None,
            )
        })?;
        let url = Url::parse(endpoint).map_err(|e| {
            RelayError::transport_error(
                Provider::FreeTier,
                format!("invalid free-tier endpoint '{endpoint}': {e}"),
                Some(Box::new(e)),
            )
        })?;

        let headers = match self.config.credential() {
            Some(key) => bearer_headers(Provider::FreeTier, key)?,
            None => json_headers(),
        };

        let request = HttpRequest {
            provider: Provider::FreeTier,
            url,
            headers,
            body: encode_body(Provider::FreeTier, &self.build_request(model_id, prompt))?,
            timeout: self.timeout,
        };

        let start = Instant::now();
        let response = self.transport.post_json(request).await?;
        check_status(Provider::FreeTier, &response)?;
        let text = extract_text(&response.body)?;

        log_debug!(
            provider = "free_tier",
            model = %model_id,
            duration_ms = start.elapsed().as_millis() as u64,
            response_chars = text.chars().count(),
            "Free-tier request completed"
        );

        Ok(text)
    }
}

pub(crate) fn extract_text(body: &str) -> RelayResult<String> {
    let json: Value = parse_body(Provider::FreeTier, body)?;
    TEXT_POINTERS
        .iter()
        .find_map(|pointer| json.pointer(pointer).and_then(Value::as_str))
        .map(str::to_string)
        .ok_or_else(|| {
            RelayError::unparseable_response(
                Provider::FreeTier,
                "none of choices[0].message.content, output, response in reply",
            )
        })
}

/// Degraded-mode answer for a failed free-tier call.
pub fn simulated_response(model_id: &str, prompt: &str, error: &RelayError) -> String {
    format!(
        "{SIMULATED_RESPONSE_MARKER}: {model_id} is unavailable ({error})]\n\n\
         You asked: {prompt}\n\n\
         The free-tier service could not be reached, so this placeholder was \
         returned instead of a model answer."
    )
}

impl std::fmt::Debug for FreeTierAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FreeTierAdapter")
            .field("config", &self.config)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[async_trait]
impl ProviderAdapter for FreeTierAdapter {
    async fn invoke(&self, model_id: &str, prompt: &str) -> RelayResult<String> {
        match self.try_invoke(model_id, prompt).await {
            Ok(text) => Ok(text),
            Err(error) => {
                log_warn!(
                    provider = "free_tier",
                    model = %model_id,
                    error_kind = %error.kind(),
                    "Free-tier call failed; answering in degraded mode"
                );
                Ok(simulated_response(model_id, prompt, &error))
            }
        }
    }

    fn provider(&self) -> Provider {
        Provider::FreeTier
    }
}
