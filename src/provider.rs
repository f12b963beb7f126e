//! Provider identity and the adapter contract shared by every upstream API.

use crate::error::RelayResult;
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

/// One upstream LLM API family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    /// OpenAI chat completions API.
    OpenAI,
    /// Anthropic messages API.
    Anthropic,
    /// Google Gemini generate-content API.
    Google,
    /// Generic OpenAI-shaped proxy serving free-tier models.
    FreeTier,
}

impl Provider {
    /// Paid providers in resolver precedence order.
    pub const PAID: [Provider; 3] = [Provider::OpenAI, Provider::Anthropic, Provider::Google];

    pub fn name(&self) -> &'static str {
        match self {
            Provider::OpenAI => "openai",
            Provider::Anthropic => "anthropic",
            Provider::Google => "google",
            Provider::FreeTier => "free_tier",
        }
    }

    /// Short identifier kept for callers that predate concrete model ids.
    ///
    /// Doubles as the prefix used for fallback routing.
    pub fn legacy_alias(&self) -> Option<&'static str> {
        match self {
            Provider::OpenAI => Some("gpt"),
            Provider::Anthropic => Some("claude"),
            Provider::Google => Some("gemini"),
            Provider::FreeTier => None,
        }
    }

    /// Environment variable holding this provider's credential.
    pub fn credential_env_var(&self) -> &'static str {
        match self {
            Provider::OpenAI => "GPT_API_KEY",
            Provider::Anthropic => "CLAUDE_API_KEY",
            Provider::Google => "GEMINI_API_KEY",
            Provider::FreeTier => "FREE_TIER_API_KEY",
        }
    }

    /// Cheap shape check on a credential. Does not contact the provider.
    pub fn credential_looks_valid(&self, key: &str) -> bool {
        let key = key.trim();
        if key.is_empty() {
            return false;
        }
        match self {
            Provider::OpenAI => key.starts_with("sk-"),
            Provider::Anthropic => key.starts_with("sk-ant-"),
            Provider::Google => key.starts_with("AIza"),
            Provider::FreeTier => true,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A routing decision: which provider to call and with which upstream model id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub provider: Provider,
    pub model_id: String,
}

impl Route {
    pub fn new(provider: Provider, model_id: impl Into<String>) -> Self {
        Self {
            provider,
            model_id: model_id.into(),
        }
    }
}

/// A single upstream API behind the relay.
///
/// Implementations never panic and never leak a transport error type; every
/// failure comes back as a [`RelayError`](crate::RelayError).
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Send `prompt` to `model_id` and return the normalized answer text.
    async fn invoke(&self, model_id: &str, prompt: &str) -> RelayResult<String>;

    fn provider(&self) -> Provider;
}
