//! # llm-relay
//!
//! Route a prompt to the right LLM provider from a model identifier and get
//! back plain answer text.
//!
//! ## Key Features
//!
//! - **One identifier, one provider**: legacy aliases (`gpt`, `claude`,
//!   `gemini`), catalog ids and free-tier ids resolve deterministically
//! - **Four wire formats**: OpenAI chat completions, Anthropic messages,
//!   Gemini generate-content, and a generic free-tier proxy
//! - **One error taxonomy**: every failure is a [`RelayError`]
//! - **Injected transport**: adapters talk to an [`HttpTransport`], so tests
//!   never need the network
//!
//! ## Example
//!
//! ```rust,no_run
//! use llm_relay::RelayClient;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = RelayClient::from_env()?;
//! let text = client.query("claude-3.5-sonnet", "What is a monad?").await?;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```

#![allow(clippy::missing_errors_doc)]

// Logging utilities (re-exports tracing with log_* naming)
pub mod logging;

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod prompts;
pub mod provider;
pub mod providers;
pub mod resolver;
pub mod transport;

#[cfg(test)]
pub mod tests;

// Re-export main types
pub use catalog::{ModelInfo, UseCase};
pub use client::RelayClient;
pub use config::{ConfigError, FreeTierConfig, ProviderConfig, RelayConfig};
pub use error::{ErrorCategory, ErrorKind, ErrorSeverity, RelayError, RelayResult};
pub use provider::{Provider, ProviderAdapter, Route};
pub use providers::{AnthropicAdapter, FreeTierAdapter, GoogleAdapter, OpenAIAdapter};
pub use resolver::{resolve, MatchRule};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
