//! Integration Tests for Paid Provider HTTP Exchanges
//!
//! UNIT UNDER TEST: RelayClient over ReqwestTransport against mock servers
//!
//! BUSINESS RESPONSIBILITY:
//!   - Send each provider's wire format to the right path with the right auth
//!   - Normalize successful responses to plain text
//!   - Classify 401/403/429/5xx, timeouts and connection failures
//!
//! TEST COVERAGE:
//!   - OpenAI, Anthropic and Gemini success paths
//!   - Prompt wrapping differences between providers
//!   - Retry-After propagation
//!   - Request timeout and unreachable endpoints

mod common;

use common::{anthropic_success, client_with, config_for, gemini_success, openai_success};
use llm_relay::{ErrorKind, Provider, RelayError};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const MARKDOWN_MARKER: &str = "Please format your response using Markdown";

fn first_body(requests: &[Request]) -> serde_json::Value {
    serde_json::from_slice(&requests[0].body).unwrap()
}

// ============================================================================
// OpenAI
// ============================================================================

#[tokio::test]
async fn test_openai_success_sends_bearer_and_wrapped_prompt() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test-openai"))
        .and(body_partial_json(json!({"model": "gpt-4-turbo", "max_tokens": 1000})))
        .respond_with(ResponseTemplate::new(200).set_body_json(openai_success("Hello!")))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_with(config_for(&server));

    // Act
    let text = client.query("gpt", "Say hello").await.unwrap();

    // Assert
    assert_eq!(text, "Hello!");
    let body = first_body(&server.received_requests().await.unwrap());
    let content = body["messages"][0]["content"].as_str().unwrap();
    assert!(content.starts_with(MARKDOWN_MARKER));
    assert!(content.ends_with("Say hello"));
}

#[tokio::test]
async fn test_openai_unauthorized_is_auth_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
        })))
        .mount(&server)
        .await;
    let client = client_with(config_for(&server));

    let err = client.query("gpt-4-turbo", "hi").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::AuthFailure);
    assert_eq!(err.provider(), Some(Provider::OpenAI));
}

// ============================================================================
// Anthropic
// ============================================================================

#[tokio::test]
async fn test_anthropic_minimal_content_block_returns_text() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "sk-ant-test"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(json!({"model": "claude-3-5-sonnet-20241022"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"content": [{"text": "hello"}]})),
        )
        .expect(1)
        .mount(&server)
        .await;
    let client = client_with(config_for(&server));

    // Act
    let text = client.query("claude-3.5-sonnet", "hi").await.unwrap();

    // Assert
    assert_eq!(text, "hello");
}

#[tokio::test]
async fn test_anthropic_sends_system_prompt_and_text_block() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(anthropic_success("ok")))
        .mount(&server)
        .await;
    let client = client_with(config_for(&server));

    client.query("claude", "Prove it").await.unwrap();

    let body = first_body(&server.received_requests().await.unwrap());
    assert!(body["system"].as_str().unwrap().contains("LaTeX"));
    assert_eq!(body["messages"][0]["content"][0]["type"], "text");
    let text = body["messages"][0]["content"][0]["text"].as_str().unwrap();
    assert!(text.starts_with(MARKDOWN_MARKER));
}

#[tokio::test]
async fn test_anthropic_forbidden_is_auth_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;
    let client = client_with(config_for(&server));

    let err = client.query("claude-3.7-sonnet", "hi").await.unwrap_err();

    assert!(matches!(
        err,
        RelayError::AuthFailure {
            provider: Provider::Anthropic,
            status: Some(403),
            ..
        }
    ));
}

// ============================================================================
// Gemini
// ============================================================================

#[tokio::test]
async fn test_gemini_success_sends_key_as_query_and_raw_prompt() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
        .and(query_param("key", "AIza-test"))
        .and(body_json(json!({"contents": [{"parts": [{"text": "What is 2+2?"}]}]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_success("4")))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_with(config_for(&server));

    // Act
    let text = client.query("gemini", "What is 2+2?").await.unwrap();

    // Assert
    assert_eq!(text, "4");
}

#[tokio::test]
async fn test_gemini_rate_limit_carries_retry_after() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "17"))
        .mount(&server)
        .await;
    let client = client_with(config_for(&server));

    let err = client.query("gemini-2-flash", "hi").await.unwrap_err();

    assert!(matches!(
        err,
        RelayError::RateLimited {
            provider: Provider::Google,
            retry_after_seconds: Some(17)
        }
    ));
}

#[tokio::test]
async fn test_gemini_empty_candidates_is_unparseable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .mount(&server)
        .await;
    let client = client_with(config_for(&server));

    let err = client.query("gemini", "hi").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UnparseableResponse);
}

// ============================================================================
// Transport failures
// ============================================================================

#[tokio::test]
async fn test_server_error_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;
    let client = client_with(config_for(&server));

    let err = client.query("gpt", "hi").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::TransportError);
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(openai_success("late"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;
    let config = config_for(&server).with_request_timeout(Duration::from_millis(300));
    let client = client_with(config);

    // Act
    let err = client.query("gpt", "hi").await.unwrap_err();

    // Assert
    assert_eq!(err.kind(), ErrorKind::TransportError);
    assert!(err.to_string().contains("timed out"));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    let server = MockServer::start().await;
    let mut config = config_for(&server);
    config.anthropic = config.anthropic.with_endpoint("http://127.0.0.1:9");
    let client = client_with(config);

    let err = client.query("claude", "hi").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::TransportError);
    assert!(
        !err.to_string().contains("sk-ant-test"),
        "Credentials must not leak into error text"
    );
}
