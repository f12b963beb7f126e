//! Anthropic adapter implementation

use super::types::{AnthropicContentBlock, AnthropicMessage, AnthropicRequest, AnthropicResponse};
use crate::config::ProviderConfig;
use crate::error::{RelayError, RelayResult};
use crate::logging::log_debug;
use crate::prompts::{wrap_with_markdown_preamble, ANTHROPIC_SYSTEM_PROMPT};
use crate::provider::{Provider, ProviderAdapter};
use crate::providers::{
    check_status, encode_body, endpoint_url, insert_secret_header, json_headers, parse_body,
};
use crate::transport::{HttpRequest, HttpTransport};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::sync::Arc;
use std::time::{Duration, Instant};

const MESSAGES_PATH: &str = "/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic Claude adapter
pub struct AnthropicAdapter {
    config: ProviderConfig,
    transport: Arc<dyn HttpTransport>,
    timeout: Duration,
}

impl AnthropicAdapter {
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

    /// Messages API request: wrapped prompt as a single text block plus the
    /// fixed system instruction.
    pub(crate) fn build_request(&self, model_id: &str, prompt: &str) -> AnthropicRequest {
        AnthropicRequest {
            model: model_id.to_string(),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            system: ANTHROPIC_SYSTEM_PROMPT.to_string(),
            messages: vec![AnthropicMessage {
                role: "user".to_string(),
                content: vec![AnthropicContentBlock::Text {
                    text: wrap_with_markdown_preamble(prompt),
                }],
            }],
        }
    }

    /// `x-api-key` and `anthropic-version`, as the official SDK sends them.
    fn build_headers(api_key: &str) -> RelayResult<HeaderMap> {
        let mut headers = json_headers();
        insert_secret_header(
            Provider::Anthropic,
            &mut headers,
            HeaderName::from_static("x-api-key"),
            api_key,
        )?;
        headers.insert(
            HeaderName::from_static("anthropic-version"),
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );
        Ok(headers)
    }

    pub(crate) fn extract_text(body: &str) -> RelayResult<String> {
        let response: AnthropicResponse = parse_body(Provider::Anthropic, body)?;
        let stop_reason = response.stop_reason.clone();
        response.first_text().ok_or_else(|| {
            RelayError::unparseable_response(
                Provider::Anthropic,
                format!(
                    "no text block in content (stop_reason: {})",
                    stop_reason.as_deref().unwrap_or("none")
                ),
            )
        })
    }
}

impl std::fmt::Debug for AnthropicAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicAdapter")
            .field("config", &self.config)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[async_trait]
impl ProviderAdapter for AnthropicAdapter {
    async fn invoke(&self, model_id: &str, prompt: &str) -> RelayResult<String> {
        let api_key = self
            .config
            .credential()
            .ok_or_else(|| RelayError::missing_credential(Provider::Anthropic))?;

        let request = HttpRequest {
            provider: Provider::Anthropic,
            url: endpoint_url(Provider::Anthropic, self.config.base_url(), MESSAGES_PATH)?,
            headers: Self::build_headers(api_key)?,
            body: encode_body(Provider::Anthropic, &self.build_request(model_id, prompt))?,
            timeout: self.timeout,
        };

        let start = Instant::now();
        let response = self.transport.post_json(request).await?;
        check_status(Provider::Anthropic, &response)?;
        let text = Self::extract_text(&response.body)?;

        log_debug!(
            provider = "anthropic",
            model = %model_id,
            duration_ms = start.elapsed().as_millis() as u64,
            response_chars = text.chars().count(),
            "Anthropic request completed"
        );

        Ok(text)
    }

    fn provider(&self) -> Provider {
        Provider::Anthropic
    }
}
