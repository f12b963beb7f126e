//! Relay configuration.
//!
//! [`RelayConfig`] is built once at startup and shared read-only afterwards.
//! [`RelayConfig::from_env`] is the only place that reads the environment;
//! adapters receive their [`ProviderConfig`] explicitly.
//!
//! A missing credential is a valid configuration. It only turns into
//! [`RelayError::MissingCredential`](crate::RelayError::MissingCredential)
//! when that provider is actually invoked.

use crate::logging::{log_debug, log_info, log_warn};
use crate::provider::Provider;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Per-request timeout used when `LLM_RELAY_TIMEOUT_SECS` is not set.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Problems detected while building or validating a [`RelayConfig`].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: '{value}' (expected a positive number of seconds)")]
    InvalidTimeout { var: &'static str, value: String },

    #[error("Model id '{id}' is listed for both {first} and {second}")]
    DuplicateModelId {
        id: String,
        first: Provider,
        second: Provider,
    },

    #[error("Model id '{id}' for {provider} must be lower-case")]
    NonCanonicalModelId { id: String, provider: Provider },

    #[error("Endpoint URL for {provider} is empty")]
    EmptyEndpoint { provider: Provider },
}

/// Immutable settings for one paid provider.
#[derive(Clone, PartialEq)]
pub struct ProviderConfig {
    pub provider: Provider,
    /// Base URL; adapters append the API path.
    pub endpoint_url: String,
    pub credential: Option<String>,
    /// Concrete id substituted for the provider's legacy alias.
    pub default_model_id: String,
    /// Allow-list: accepted model id → concrete upstream id.
    pub model_alias_table: BTreeMap<String, String>,
    pub max_tokens: u32,
    /// Sent only by providers whose request shape carries it.
    pub temperature: Option<f64>,
}

impl ProviderConfig {
    pub fn openai() -> Self {
        Self {
            provider: Provider::OpenAI,
            endpoint_url: "https://api.openai.com".to_string(),
            credential: None,
            default_model_id: "gpt-4-turbo".to_string(),
            model_alias_table: alias_table(&[
                ("gpt-4-turbo", "gpt-4-turbo"),
                ("gpt-4.5", "gpt-4.5-preview"),
            ]),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: None,
        }
    }

    pub fn anthropic() -> Self {
        Self {
            provider: Provider::Anthropic,
            endpoint_url: "https://api.anthropic.com".to_string(),
            credential: None,
            default_model_id: "claude-3-5-sonnet-20241022".to_string(),
            model_alias_table: alias_table(&[
                ("claude-3.5-sonnet", "claude-3-5-sonnet-20241022"),
                ("claude-3.7-sonnet", "claude-3-7-sonnet-20250219"),
            ]),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: Some(1.0),
        }
    }

    pub fn google() -> Self {
        Self {
            provider: Provider::Google,
            endpoint_url: "https://generativelanguage.googleapis.com".to_string(),
            credential: None,
            default_model_id: "gemini-2.0-flash".to_string(),
            model_alias_table: alias_table(&[
                ("gemini-2-pro", "gemini-2.0-pro-exp"),
                ("gemini-2-flash", "gemini-2.0-flash"),
            ]),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: None,
        }
    }

    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = Some(credential.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = endpoint_url.into();
        self
    }

    /// The credential, treating a blank value as absent.
    pub fn credential(&self) -> Option<&str> {
        self.credential
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn has_credential(&self) -> bool {
        self.credential().is_some()
    }

    /// Concrete upstream id for an allow-listed model id.
    pub fn concrete_model(&self, model_id: &str) -> Option<&str> {
        self.model_alias_table.get(model_id).map(String::as_str)
    }

    /// Endpoint without a trailing slash, ready for a path to be appended.
    pub fn base_url(&self) -> &str {
        self.endpoint_url.trim_end_matches('/')
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider", &self.provider)
            .field("endpoint_url", &self.endpoint_url)
            .field("credential", &redacted(self.credential()))
            .field("default_model_id", &self.default_model_id)
            .field("model_alias_table", &self.model_alias_table)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// Settings for the generic free-tier proxy.
#[derive(Clone, PartialEq)]
pub struct FreeTierConfig {
    /// Full URL of the proxy's chat endpoint. `None` means every free-tier
    /// call answers in degraded mode.
    pub endpoint_url: Option<String>,
    /// Free-tier models are keyless; sent as a bearer token only when set.
    pub credential: Option<String>,
    pub model_ids: BTreeSet<String>,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl Default for FreeTierConfig {
    fn default() -> Self {
        Self {
            endpoint_url: None,
            credential: None,
            model_ids: [
                "deepseek-v3",
                "deepseek-coder",
                "openchat-3.5",
                "yi-1.5-34b",
                "gecko-3",
                "gecko-2-mini",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: 0.7,
        }
    }
}

impl FreeTierConfig {
    pub fn with_endpoint(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn credential(&self) -> Option<&str> {
        self.credential
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn contains(&self, model_id: &str) -> bool {
        self.model_ids.contains(model_id)
    }
}

impl fmt::Debug for FreeTierConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FreeTierConfig")
            .field("endpoint_url", &self.endpoint_url)
            .field("credential", &redacted(self.credential()))
            .field("model_ids", &self.model_ids)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// Complete relay configuration, immutable for the process lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayConfig {
    pub openai: ProviderConfig,
    pub anthropic: ProviderConfig,
    pub google: ProviderConfig,
    pub free_tier: FreeTierConfig,
    /// Applied to every upstream call. Expiry is reported as a transport error.
    pub request_timeout: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            openai: ProviderConfig::openai(),
            anthropic: ProviderConfig::anthropic(),
            google: ProviderConfig::google(),
            free_tier: FreeTierConfig::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl RelayConfig {
    /// Settings for a paid provider; `None` for the free tier.
    pub fn provider(&self, provider: Provider) -> Option<&ProviderConfig> {
        match provider {
            Provider::OpenAI => Some(&self.openai),
            Provider::Anthropic => Some(&self.anthropic),
            Provider::Google => Some(&self.google),
            Provider::FreeTier => None,
        }
    }

    /// Whether calling `provider` can get past the credential check.
    pub fn has_credential(&self, provider: Provider) -> bool {
        self.provider(provider)
            .map(ProviderConfig::has_credential)
            .unwrap_or(true)
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `LLM_RELAY_TIMEOUT_SECS` is malformed or the
    /// resulting tables fail [`validate`](Self::validate). Missing API keys are
    /// not errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| {
            lookup(var)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();

        config.openai.credential = get(Provider::OpenAI.credential_env_var());
        config.anthropic.credential = get(Provider::Anthropic.credential_env_var());
        config.google.credential = get(Provider::Google.credential_env_var()).or_else(|| {
            let legacy = get("GEMENI_API_KEY");
            if legacy.is_some() {
                log_info!(
                    provider = "google",
                    "Using legacy GEMENI_API_KEY; rename it to GEMINI_API_KEY"
                );
            }
            legacy
        });

        if let Some(url) = get("OPENAI_BASE_URL") {
            config.openai.endpoint_url = url;
        }
        if let Some(url) = get("ANTHROPIC_BASE_URL") {
            config.anthropic.endpoint_url = url;
        }
        if let Some(url) = get("GEMINI_BASE_URL") {
            config.google.endpoint_url = url;
        }

        config.free_tier.endpoint_url = get("FREE_TIER_ENDPOINT");
        config.free_tier.credential = get(Provider::FreeTier.credential_env_var());

        if let Some(raw) = get("LLM_RELAY_TIMEOUT_SECS") {
            config.request_timeout = parse_timeout("LLM_RELAY_TIMEOUT_SECS", &raw)?;
        }

        for provider in Provider::PAID {
            if let Some(settings) = config.provider(provider) {
                if let Some(key) = settings.credential() {
                    if !provider.credential_looks_valid(key) {
                        log_warn!(
                            provider = %provider,
                            env_var = provider.credential_env_var(),
                            "API key does not have the expected format for this provider"
                        );
                    }
                }
            }
        }

        config.validate()?;

        log_debug!(
            has_openai_key = config.openai.has_credential(),
            has_anthropic_key = config.anthropic.has_credential(),
            has_google_key = config.google.has_credential(),
            has_free_tier_endpoint = config.free_tier.endpoint().is_some(),
            request_timeout_secs = config.request_timeout.as_secs(),
            "Relay configuration loaded"
        );

        Ok(config)
    }

    /// Check the routing tables for ambiguity.
    ///
    /// Every accepted model id (legacy aliases, allow-lists, free-tier ids)
    /// must be lower-case and belong to exactly one provider.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut owners: BTreeMap<&str, Provider> = Provider::PAID
            .into_iter()
            .filter_map(|p| p.legacy_alias().map(|alias| (alias, p)))
            .collect();

        let paid_ids = Provider::PAID.into_iter().filter_map(|p| self.provider(p)).flat_map(
            |settings| {
                settings
                    .model_alias_table
                    .keys()
                    .map(move |id| (id.as_str(), settings.provider))
            },
        );
        let free_ids = self
            .free_tier
            .model_ids
            .iter()
            .map(|id| (id.as_str(), Provider::FreeTier));

        for (id, provider) in paid_ids.chain(free_ids) {
            if id != id.to_lowercase() {
                return Err(ConfigError::NonCanonicalModelId {
                    id: id.to_string(),
                    provider,
                });
            }
            if let Some(first) = owners.insert(id, provider) {
                return Err(ConfigError::DuplicateModelId {
                    id: id.to_string(),
                    first,
                    second: provider,
                });
            }
        }

        for provider in Provider::PAID {
            if let Some(settings) = self.provider(provider) {
                if settings.base_url().trim().is_empty() {
                    return Err(ConfigError::EmptyEndpoint { provider });
                }
            }
        }

        Ok(())
    }
}

fn alias_table(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(id, concrete)| (id.to_string(), concrete.to_string()))
        .collect()
}

fn parse_timeout(var: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout {
            var,
            value: raw.to_string(),
        }),
    }
}

fn redacted(credential: Option<&str>) -> &'static str {
    if credential.is_some() {
        "<redacted>"
    } else {
        "<unset>"
    }
}
