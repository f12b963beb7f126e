//! Test helper utilities for unit tests
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

#![allow(dead_code)]

use crate::config::{FreeTierConfig, RelayConfig};
use crate::transport::{HttpRequest, HttpResponse, MockHttpTransport};
use std::collections::HashMap;
use std::sync::Arc;

/// Configuration with a well-formed key for every paid provider.
pub fn keyed_config() -> RelayConfig {
    let mut config = RelayConfig::default();
    config.openai.credential = Some("sk-test-openai".to_string());
    config.anthropic.credential = Some("sk-ant-test".to_string());
    config.google.credential = Some("AIza-test".to_string());
    config
}

/// Configuration with no credentials and no free-tier endpoint.
pub fn bare_config() -> RelayConfig {
    RelayConfig::default()
}

/// Free-tier settings pointing at a placeholder endpoint.
pub fn free_tier_with_endpoint() -> FreeTierConfig {
    FreeTierConfig::default().with_endpoint("http://free-tier.test/v1/chat")
}

/// Environment-variable lookup backed by a fixed table.
pub fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let table: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |var| table.get(var).cloned()
}

/// Transport that answers every request with the same status and body.
pub fn transport_replying(status: u16, body: &'static str) -> Arc<MockHttpTransport> {
    let mut transport = MockHttpTransport::new();
    transport
        .expect_post_json()
        .returning(move |_| Ok(HttpResponse::new(status, body)));
    Arc::new(transport)
}

/// Transport that fails the test if anything is sent.
pub fn silent_transport() -> Arc<MockHttpTransport> {
    let mut transport = MockHttpTransport::new();
    transport.expect_post_json().never();
    Arc::new(transport)
}

/// Transport that answers with the request's own URL path, for routing checks.
pub fn echo_path_transport() -> Arc<MockHttpTransport> {
    let mut transport = MockHttpTransport::new();
    transport.expect_post_json().returning(|req: HttpRequest| {
        let path = req.url.path().to_string();
        let body = serde_json::json!({
            "choices": [{"message": {"content": path.clone()}}],
            "content": [{"type": "text", "text": path.clone()}],
            "candidates": [{"content": {"parts": [{"text": path}]}}],
        });
        Ok(HttpResponse::new(200, body.to_string()))
    });
    Arc::new(transport)
}
