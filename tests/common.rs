//! Test helper utilities for llm-relay integration tests
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

// Allow dead code in test utilities - functions are used across different test files
#![allow(dead_code)]

use llm_relay::{RelayClient, RelayConfig, ReqwestTransport};
use std::sync::Arc;
use std::time::Duration;
use wiremock::MockServer;

/// Relay configuration with every paid provider pointed at `server` and keyed.
pub fn config_for(server: &MockServer) -> RelayConfig {
    let mut config = RelayConfig::default().with_request_timeout(Duration::from_secs(2));
    config.openai = config
        .openai
        .with_endpoint(server.uri())
        .with_credential("sk-test-openai");
    config.anthropic = config
        .anthropic
        .with_endpoint(server.uri())
        .with_credential("sk-ant-test");
    config.google = config
        .google
        .with_endpoint(server.uri())
        .with_credential("AIza-test");
    config
}

/// Client using the real reqwest transport.
pub fn client_with(config: RelayConfig) -> RelayClient {
    RelayClient::new(config, Arc::new(ReqwestTransport::new()))
}

pub fn openai_success(text: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": text},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
    })
}

pub fn anthropic_success(text: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "msg_1",
        "type": "message",
        "role": "assistant",
        "content": [{"type": "text", "text": text}],
        "stop_reason": "end_turn",
        "usage": {"input_tokens": 10, "output_tokens": 5}
    })
}

pub fn gemini_success(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
}
