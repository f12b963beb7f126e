//! OpenAI adapter
//!
//! Sends the markdown-wrapped prompt to `/v1/chat/completions` with a bearer
//! token and returns `choices[0].message.content`.

use super::openai_shared::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use super::{bearer_headers, check_status, encode_body, endpoint_url, parse_body};
use crate::config::ProviderConfig;
use crate::error::{RelayError, RelayResult};
use crate::logging::log_debug;
use crate::prompts::wrap_with_markdown_preamble;
use crate::provider::{Provider, ProviderAdapter};
use crate::transport::{HttpRequest, HttpTransport};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};

const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// OpenAI chat completions adapter.
pub struct OpenAIAdapter {
    config: ProviderConfig,
    transport: Arc<dyn HttpTransport>,
    timeout: Duration,
}

impl OpenAIAdapter {
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

    pub(crate) fn build_request(&self, model_id: &str, prompt: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: model_id.to_string(),
            messages: vec![ChatMessage::user(wrap_with_markdown_preamble(prompt))],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }

    fn extract_text(body: &str) -> RelayResult<String> {
        let response: ChatCompletionResponse = parse_body(Provider::OpenAI, body)?;
        response.first_content().ok_or_else(|| {
            RelayError::unparseable_response(
                Provider::OpenAI,
                "no choices[0].message.content in response",
            )
        })
    }
}

impl std::fmt::Debug for OpenAIAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIAdapter")
            .field("config", &self.config)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[async_trait]
impl ProviderAdapter for OpenAIAdapter {
    async fn invoke(&self, model_id: &str, prompt: &str) -> RelayResult<String> {
        let api_key = self
            .config
            .credential()
            .ok_or_else(|| RelayError::missing_credential(Provider::OpenAI))?;

        let request = HttpRequest {
            provider: Provider::OpenAI,
            url: endpoint_url(Provider::OpenAI, self.config.base_url(), CHAT_COMPLETIONS_PATH)?,
            headers: bearer_headers(Provider::OpenAI, api_key)?,
            body: encode_body(Provider::OpenAI, &self.build_request(model_id, prompt))?,
            timeout: self.timeout,
        };

        let start = Instant::now();
        let response = self.transport.post_json(request).await?;
        check_status(Provider::OpenAI, &response)?;
        let text = Self::extract_text(&response.body)?;

        log_debug!(
            provider = "openai",
            model = %model_id,
            duration_ms = start.elapsed().as_millis() as u64,
            response_chars = text.chars().count(),
            "OpenAI request completed"
        );

        Ok(text)
    }

    fn provider(&self) -> Provider {
        Provider::OpenAI
    }
}
