//! Google Gemini adapter
//!
//! Calls `generateContent` with the API key as a query parameter. The prompt
//! is sent verbatim; Gemini gets no formatting preamble.

use super::{check_status, encode_body, json_headers, parse_body};
use crate::config::ProviderConfig;
use crate::error::{RelayError, RelayResult};
use crate::logging::log_debug;
use crate::provider::{Provider, ProviderAdapter};
use crate::transport::{HttpRequest, HttpTransport};
use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Gemini generate-content adapter.
pub struct GoogleAdapter {
    config: ProviderConfig,
    transport: Arc<dyn HttpTransport>,
    timeout: Duration,
}

impl GoogleAdapter {
    pub fn new(
        config: ProviderConfig,
        transport: Arc<dyn HttpTransport>,
        timeout: Duration,
    ) -> Self {
        Self {
            config,
            transport,
            timeout,
        }
    }

    pub(crate) fn build_request(prompt: &str) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: Some(prompt.to_string()),
                }],
            }],
        }
    }

    /// `{base}/v1beta/models/{model}:generateContent?key={api_key}`
    ///
    /// The model id is percent-encoded as a single path segment.
    fn build_url(&self, model_id: &str, api_key: &str) -> RelayResult<Url> {
        let base = self.config.base_url();
        let method = format!("{model_id}:generateContent");
        let mut url = Url::parse(base).map_err(|e| {
            RelayError::transport_error(
                Provider::Google,
                format!("invalid endpoint URL '{base}': {e}"),
                Some(Box::new(e)),
            )
        })?;

        url.path_segments_mut()
            .map_err(|()| {
                RelayError::transport_error(
                    Provider::Google,
                    format!("endpoint URL '{base}' cannot carry a path"),
                    None,
                )
            })?
            .pop_if_empty()
            .extend(["v1beta", "models", method.as_str()]);
        url.query_pairs_mut().append_pair("key", api_key);

        Ok(url)
    }

    pub(crate) fn extract_text(body: &str) -> RelayResult<String> {
        let response: GeminiResponse = parse_body(Provider::Google, body)?;
        let block_reason = response
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.clone());

        response.first_text().ok_or_else(|| {
            let message = match block_reason {
                Some(reason) => format!(
                    "no candidates[0].content.parts[0].text in response (prompt blocked: {reason})"
                ),
                None => "no candidates[0].content.parts[0].text in response".to_string(),
            };
            RelayError::unparseable_response(Provider::Google, message)
        })
    }
}

impl std::fmt::Debug for GoogleAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleAdapter")
            .field("config", &self.config)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[async_trait]
impl ProviderAdapter for GoogleAdapter {
    async fn invoke(&self, model_id: &str, prompt: &str) -> RelayResult<String> {
        let api_key = self
            .config
            .credential()
            .ok_or_else(|| RelayError::missing_credential(Provider::Google))?;

        let request = HttpRequest {
            provider: Provider::Google,
            url: self.build_url(model_id, api_key)?,
            headers: json_headers(),
            body: encode_body(Provider::Google, &Self::build_request(prompt))?,
            timeout: self.timeout,
        };

        let start = Instant::now();
        let response = self.transport.post_json(request).await?;
        check_status(Provider::Google, &response)?;
        let text = Self::extract_text(&response.body)?;

        log_debug!(
            provider = "google",
            model = %model_id,
            duration_ms = start.elapsed().as_millis() as u64,
            response_chars = text.chars().count(),
            "Gemini request completed"
        );

        Ok(text)
    }

    fn provider(&self) -> Provider {
        Provider::Google
    }
}

// ── Gemini wire types ──

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct GeminiPart {
    /// Absent on function-call and inline-data parts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(rename = "promptFeedback", default)]
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Clone, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Clone, Deserialize)]
struct GeminiPromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

impl GeminiResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
    }
}
