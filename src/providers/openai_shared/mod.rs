//! Shared OpenAI-compatible API structures
//!
//! The OpenAI adapter and the free-tier proxy both speak the chat-completions
//! request shape; the types live here so neither owns the other's wire format.

pub mod types;

pub use types::*;
