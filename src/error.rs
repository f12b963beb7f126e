//! Error types for relay operations.
//!
//! Every failure inside a single query is converted into a [`RelayError`]
//! before it leaves the adapter that produced it. The variants form a closed
//! taxonomy shared by all providers:
//!
//! | Variant | Kind | Category |
//! |---------|------|----------|
//! | `MissingCredential` | `missing_credential` | Client |
//! | `AuthFailure` | `auth_failure` | Client |
//! | `RateLimited` | `rate_limited` | Transient |
//! | `TransportError` | `transport_error` | External |
//! | `UnparseableResponse` | `unparseable_response` | External |
//! | `UnsupportedModel` | `unsupported_model` | Client |
//!
//! # Example
//!
//! ```rust
//! use llm_relay::{ErrorKind, RelayError};
//!
//! let err = RelayError::unsupported_model("llama-9000");
//! assert_eq!(err.kind(), ErrorKind::UnsupportedModel);
//! assert!(err.to_string().contains("llama-9000"));
//! ```

use crate::logging::{log_error, log_warn};
use crate::provider::Provider;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

// ============================================================================
// Error categorization types
// ============================================================================

/// High-level categorization of errors for routing and handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// External service failures (provider outage, network, bad payload).
    External,

    /// Client errors the caller can fix (missing key, bad key, unknown model).
    Client,

    /// Temporary failures; worth trying again later.
    Transient,
}

/// Severity level for logging and alerting decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Action failed but system is stable.
    Error,

    /// Unexpected but recoverable situation.
    Warning,

    /// Expected failure (e.g. an unknown model id typed by a user).
    Info,
}

/// The tag of a [`RelayError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MissingCredential,
    AuthFailure,
    RateLimited,
    TransportError,
    UnparseableResponse,
    UnsupportedModel,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MissingCredential => "missing_credential",
            ErrorKind::AuthFailure => "auth_failure",
            ErrorKind::RateLimited => "rate_limited",
            ErrorKind::TransportError => "transport_error",
            ErrorKind::UnparseableResponse => "unparseable_response",
            ErrorKind::UnsupportedModel => "unsupported_model",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Relay error
// ============================================================================

/// Alias for `Result<T, RelayError>`.
pub type RelayResult<T> = std::result::Result<T, RelayError>;

/// Errors that can occur while routing and executing one query.
///
/// Build these through the constructor methods, which log the error with
/// structured fields at the appropriate level:
///
/// ```rust
/// use llm_relay::{Provider, RelayError};
///
/// let err = RelayError::missing_credential(Provider::Anthropic);
/// let err = RelayError::rate_limited(Provider::OpenAI, Some(20));
/// ```
#[derive(Error, Debug)]
pub enum RelayError {
    /// The provider has no credential configured.
    #[error("No API key configured for {provider}; set {env_var}")]
    MissingCredential {
        provider: Provider,
        env_var: &'static str,
    },

    /// The provider rejected the credential (HTTP 401/403), or the
    /// credential could not be encoded into a request at all.
    #[error("Authentication with {provider} failed: {message}")]
    AuthFailure {
        provider: Provider,
        /// HTTP status, absent when the request was never sent.
        status: Option<u16>,
        message: String,
    },

    /// The provider is throttling requests (HTTP 429).
    #[error("{provider} rate limit exceeded{}", retry_hint(.retry_after_seconds))]
    RateLimited {
        provider: Provider,
        /// Seconds from the `Retry-After` header, when the provider sent one.
        retry_after_seconds: Option<u64>,
    },

    /// Network failure, timeout, or a non-2xx status outside the cases above.
    #[error("Request to {provider} failed: {message}")]
    TransportError {
        provider: Provider,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A 2xx response that does not contain the expected field path.
    #[error("Unexpected response format from {provider}: {message}")]
    UnparseableResponse { provider: Provider, message: String },

    /// The model identifier maps to no provider.
    #[error("Unsupported model '{identifier}'")]
    UnsupportedModel { identifier: String },
}

fn retry_hint(retry_after_seconds: &Option<u64>) -> String {
    match retry_after_seconds {
        Some(secs) => format!(", retry after {secs}s"),
        None => String::new(),
    }
}

impl RelayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingCredential { .. } => ErrorKind::MissingCredential,
            Self::AuthFailure { .. } => ErrorKind::AuthFailure,
            Self::RateLimited { .. } => ErrorKind::RateLimited,
            Self::TransportError { .. } => ErrorKind::TransportError,
            Self::UnparseableResponse { .. } => ErrorKind::UnparseableResponse,
            Self::UnsupportedModel { .. } => ErrorKind::UnsupportedModel,
        }
    }

    /// The provider involved, if the failure happened after routing.
    pub fn provider(&self) -> Option<Provider> {
        match self {
            Self::MissingCredential { provider, .. }
            | Self::AuthFailure { provider, .. }
            | Self::RateLimited { provider, .. }
            | Self::TransportError { provider, .. }
            | Self::UnparseableResponse { provider, .. } => Some(*provider),
            Self::UnsupportedModel { .. } => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingCredential { .. } => ErrorCategory::Client,
            Self::AuthFailure { .. } => ErrorCategory::Client,
            Self::RateLimited { .. } => ErrorCategory::Transient,
            Self::TransportError { .. } => ErrorCategory::External,
            Self::UnparseableResponse { .. } => ErrorCategory::External,
            Self::UnsupportedModel { .. } => ErrorCategory::Client,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MissingCredential { .. } => ErrorSeverity::Warning,
            Self::AuthFailure { .. } => ErrorSeverity::Error,
            Self::RateLimited { .. } => ErrorSeverity::Warning,
            Self::TransportError { .. } => ErrorSeverity::Error,
            Self::UnparseableResponse { .. } => ErrorSeverity::Warning,
            Self::UnsupportedModel { .. } => ErrorSeverity::Info,
        }
    }

    /// Short message that is safe to show to an end user.
    ///
    /// Upstream response bodies are left out; use `Display` for the detail.
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingCredential { provider, env_var } => {
                format!("The {provider} model needs an API key. Set {env_var} and try again")
            }
            Self::AuthFailure { .. } => {
                "Invalid API key. Please check your API key".to_string()
            }
            Self::RateLimited {
                retry_after_seconds: Some(secs),
                ..
            } => format!("Service is busy. Please wait {secs} seconds and try again"),
            Self::RateLimited { .. } => {
                "You have exceeded the rate limit. Try again later".to_string()
            }
            Self::TransportError { .. } => {
                "Unable to reach the AI service. Please try again".to_string()
            }
            Self::UnparseableResponse { .. } => {
                "Received an invalid response from the AI service".to_string()
            }
            Self::UnsupportedModel { identifier } => {
                format!("Model '{identifier}' is not supported")
            }
        }
    }

    // =========================================================================
    // Constructor methods with automatic logging
    // =========================================================================

    pub fn missing_credential(provider: Provider) -> Self {
        let env_var = provider.credential_env_var();
        log_warn!(
            provider = %provider,
            env_var = env_var,
            error_type = "missing_credential",
            "Provider invoked without a credential"
        );
        Self::MissingCredential { provider, env_var }
    }

    pub fn auth_failure(
        provider: Provider,
        status: Option<u16>,
        message: impl Into<String>,
    ) -> Self {
        let message = message.into();
        log_error!(
            provider = %provider,
            status = ?status,
            error_type = "auth_failure",
            message = %message,
            "Provider authentication failed"
        );
        Self::AuthFailure {
            provider,
            status,
            message,
        }
    }

    pub fn rate_limited(provider: Provider, retry_after_seconds: Option<u64>) -> Self {
        log_warn!(
            provider = %provider,
            error_type = "rate_limited",
            retry_after_seconds = ?retry_after_seconds,
            "Provider rate limit exceeded"
        );
        Self::RateLimited {
            provider,
            retry_after_seconds,
        }
    }

    pub fn transport_error(
        provider: Provider,
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        let message = message.into();
        log_error!(
            provider = %provider,
            error_type = "transport_error",
            message = %message,
            has_source = source.is_some(),
            "Provider request failed"
        );
        Self::TransportError {
            provider,
            message,
            source,
        }
    }

    pub fn unparseable_response(provider: Provider, message: impl Into<String>) -> Self {
        let message = message.into();
        log_warn!(
            provider = %provider,
            error_type = "unparseable_response",
            message = %message,
            "Provider response format invalid"
        );
        Self::UnparseableResponse { provider, message }
    }

    pub fn unsupported_model(identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();
        log_warn!(
            identifier = %identifier,
            error_type = "unsupported_model",
            "Model identifier matched no provider"
        );
        Self::UnsupportedModel { identifier }
    }
}
