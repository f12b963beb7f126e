//! Anthropic Claude adapter
//!
//! Uses the native Messages API format.
//!
//! ## Module Organization
//!
//! - `types`: Request/response structures for the Anthropic API
//! - `provider`: Adapter implementation

mod provider;
mod types;

#[cfg(test)]
mod tests;

pub use provider::AnthropicAdapter;
