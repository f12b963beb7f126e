use crate::catalog::{self, UseCase};
use crate::config::{ConfigError, RelayConfig};
use crate::error::RelayResult;
use crate::logging::{log_debug, log_info};
use crate::provider::{Provider, ProviderAdapter, Route};
use crate::providers::{AnthropicAdapter, FreeTierAdapter, GoogleAdapter, OpenAIAdapter};
use crate::resolver::resolve;
use crate::transport::{HttpTransport, ReqwestTransport};
use futures_util::future::join_all;
use std::sync::Arc;

/// Entry point for routing prompts to models.
///
/// Holds one adapter per provider, all sharing the same transport and the
/// same read-only configuration. Cheap to share behind an `Arc`; every query
/// is independent.
pub struct RelayClient {
    config: Arc<RelayConfig>,
    openai: OpenAIAdapter,
    anthropic: AnthropicAdapter,
    google: GoogleAdapter,
    free_tier: FreeTierAdapter,
}

impl RelayClient {
    /// Build a client over an explicit configuration and transport.
    pub fn new(config: RelayConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let timeout = config.request_timeout;
        let client = Self {
            openai: OpenAIAdapter::new(config.openai.clone(), Arc::clone(&transport), timeout),
            anthropic: AnthropicAdapter::new(
                config.anthropic.clone(),
                Arc::clone(&transport),
                timeout,
            ),
            google: GoogleAdapter::new(config.google.clone(), Arc::clone(&transport), timeout),
            free_tier: FreeTierAdapter::new(config.free_tier.clone(), transport, timeout),
            config: Arc::new(config),
        };

        log_debug!(
            request_timeout_secs = timeout.as_secs(),
            "RelayClient created"
        );

        client
    }

    /// Create a client from environment variables with a `reqwest` transport.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the environment holds a malformed value.
    /// Missing API keys are not errors here; they surface per query.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = RelayConfig::from_env()?;
        Ok(Self::new(config, Arc::new(ReqwestTransport::new())))
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    fn adapter(&self, provider: Provider) -> &dyn ProviderAdapter {
        match provider {
            Provider::OpenAI => &self.openai,
            Provider::Anthropic => &self.anthropic,
            Provider::Google => &self.google,
            Provider::FreeTier => &self.free_tier,
        }
    }

    /// Resolve `identifier` without calling anything.
    pub fn route(&self, identifier: &str) -> RelayResult<Route> {
        resolve(identifier, &self.config)
    }

    /// Send `prompt` to the model named by `identifier`.
    ///
    /// # Errors
    ///
    /// [`RelayError::UnsupportedModel`](crate::RelayError::UnsupportedModel)
    /// when the identifier matches no provider; otherwise whatever the
    /// selected adapter reports. Free-tier models never fail.
    pub async fn query(&self, identifier: &str, prompt: &str) -> RelayResult<String> {
        let route = self.route(identifier)?;
        self.adapter(route.provider)
            .invoke(&route.model_id, prompt)
            .await
    }

    /// Like [`query`](Self::query), with failures rendered as `"Error: ..."`.
    pub async fn answer(&self, identifier: &str, prompt: &str) -> String {
        match self.query(identifier, prompt).await {
            Ok(text) => text,
            Err(e) => format!("Error: {e}"),
        }
    }

    /// Send the same prompt to several models concurrently.
    ///
    /// Results come back in input order, paired with the identifier as given.
    pub async fn query_many(
        &self,
        identifiers: &[&str],
        prompt: &str,
    ) -> Vec<(String, RelayResult<String>)> {
        log_debug!(models = identifiers.len(), "Fanning out prompt");

        let calls = identifiers.iter().map(|identifier| async move {
            let result = self.query(identifier, prompt).await;
            (identifier.to_string(), result)
        });
        join_all(calls).await
    }

    /// Best catalog model for a use case given the configured credentials.
    ///
    /// A paid pick is used only when its provider has a credential; otherwise
    /// the free recommendation is returned.
    pub fn model_for_use_case(&self, use_case: Option<UseCase>, prefer_free: bool) -> &'static str {
        let free = catalog::default_model_for_use_case(use_case, true);
        if prefer_free {
            return free;
        }

        let paid = catalog::default_model_for_use_case(use_case, false);
        let usable = catalog::model(paid)
            .map(|info| self.config.has_credential(info.provider))
            .unwrap_or(false);

        if usable {
            paid
        } else {
            log_info!(
                use_case = ?use_case,
                paid_model = paid,
                free_model = free,
                "No credential for paid recommendation; using free model"
            );
            free
        }
    }
}

impl std::fmt::Debug for RelayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayClient")
            .field("config", &self.config)
            .finish()
    }
}
