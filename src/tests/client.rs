// Unit Tests for the Relay Client
//
// UNIT UNDER TEST: RelayClient
//
// BUSINESS RESPONSIBILITY:
//   - Resolves the identifier and dispatches to the matching adapter
//   - Renders failures as "Error: ..." text for callers that want a string
//   - Fans one prompt out to several models, preserving input order
//   - Picks a model for a use case based on which keys are configured
//
// TEST COVERAGE:
//   - Dispatch to each provider's endpoint
//   - Unsupported identifiers never reach the transport
//   - answer() rendering
//   - query_many ordering and independence
//   - model_for_use_case credential fallback
//   - from_env construction

use crate::catalog::UseCase;
use crate::client::RelayClient;
use crate::error::{ErrorKind, RelayError};
use crate::provider::{Provider, Route};
use crate::providers::free_tier::SIMULATED_RESPONSE_MARKER;
use crate::tests::helpers::{
    bare_config, echo_path_transport, free_tier_with_endpoint, keyed_config, silent_transport,
    transport_replying,
};
use crate::transport::{HttpResponse, MockHttpTransport};
use std::sync::Arc;

#[cfg(test)]
mod dispatch_tests {
    use super::*;

    #[tokio::test]
    async fn test_each_provider_receives_its_own_endpoint() {
        // Arrange
        let mut config = keyed_config();
        config.free_tier = free_tier_with_endpoint();
        let client = RelayClient::new(config, echo_path_transport());

        // Act & Assert
        assert_eq!(client.query("gpt", "hi").await.unwrap(), "/v1/chat/completions");
        assert_eq!(client.query("claude", "hi").await.unwrap(), "/v1/messages");
        assert_eq!(
            client.query("gemini-2-pro", "hi").await.unwrap(),
            "/v1beta/models/gemini-2.0-pro-exp:generateContent"
        );
        assert_eq!(client.query("deepseek-v3", "hi").await.unwrap(), "/v1/chat");
    }

    #[tokio::test]
    async fn test_catalog_claude_id_round_trip() {
        // Arrange
        let mut transport = MockHttpTransport::new();
        transport
            .expect_post_json()
            .withf(|req| req.body["model"] == "claude-3-5-sonnet-20241022")
            .times(1)
            .returning(|_| Ok(HttpResponse::new(200, r#"{"content":[{"text":"hello"}]}"#)));
        let client = RelayClient::new(keyed_config(), Arc::new(transport));

        // Act
        let route = client.route("claude-3.5-sonnet").unwrap();
        let text = client.query("claude-3.5-sonnet", "hi").await.unwrap();

        // Assert
        assert_eq!(
            route,
            Route::new(Provider::Anthropic, "claude-3-5-sonnet-20241022")
        );
        assert_eq!(text, "hello");
    }

    #[tokio::test]
    async fn test_free_tier_timeout_degrades_with_prompt() {
        let mut transport = MockHttpTransport::new();
        transport.expect_post_json().times(1).returning(|req| {
            Err(RelayError::transport_error(
                req.provider,
                "timed out after 30s",
                None,
            ))
        });
        let mut config = bare_config();
        config.free_tier = free_tier_with_endpoint();
        let client = RelayClient::new(config, Arc::new(transport));

        let text = client.query("yi-1.5-34b", "Summarize this").await.unwrap();

        assert!(text.starts_with(SIMULATED_RESPONSE_MARKER));
        assert!(text.contains("Summarize this"));
        assert!(text.contains("timed out"));
    }

    #[tokio::test]
    async fn test_unsupported_model_never_reaches_transport() {
        let client = RelayClient::new(keyed_config(), silent_transport());

        let err = client.query("llama-3-70b", "hi").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UnsupportedModel);
    }

    #[tokio::test]
    async fn test_missing_key_reported_before_any_request() {
        let client = RelayClient::new(bare_config(), silent_transport());

        let err = client.query("claude-3.5-sonnet", "hi").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::MissingCredential);
    }

    #[tokio::test]
    async fn test_free_tier_without_endpoint_answers_in_degraded_mode() {
        let client = RelayClient::new(bare_config(), silent_transport());

        let text = client.query("openchat-3.5", "Write a haiku").await.unwrap();

        assert!(text.starts_with(SIMULATED_RESPONSE_MARKER));
        assert!(text.contains("Write a haiku"));
    }
}

#[cfg(test)]
mod answer_tests {
    use super::*;

    #[tokio::test]
    async fn test_answer_renders_errors_as_text() {
        let client = RelayClient::new(bare_config(), silent_transport());

        let text = client.answer("mystery-model", "hi").await;

        assert_eq!(text, "Error: Unsupported model 'mystery-model'");
    }

    #[tokio::test]
    async fn test_answer_returns_text_on_success() {
        let client = RelayClient::new(
            keyed_config(),
            transport_replying(200, r#"{"choices":[{"message":{"content":"42"}}]}"#),
        );

        assert_eq!(client.answer("gpt-4-turbo", "hi").await, "42");
    }
}

#[cfg(test)]
mod fan_out_tests {
    use super::*;

    #[tokio::test]
    async fn test_query_many_preserves_order_and_isolates_failures() {
        // Arrange
        let mut config = keyed_config();
        config.free_tier = free_tier_with_endpoint();
        let client = RelayClient::new(config, echo_path_transport());

        // Act
        let results = client
            .query_many(&["claude", "unknown-model", "gpt"], "hi")
            .await;

        // Assert
        let names: Vec<&str> = results.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["claude", "unknown-model", "gpt"]);
        assert_eq!(results[0].1.as_deref().ok(), Some("/v1/messages"));
        assert!(results[1].1.is_err());
        assert_eq!(results[2].1.as_deref().ok(), Some("/v1/chat/completions"));
    }

    #[tokio::test]
    async fn test_query_many_with_no_models_is_empty() {
        let client = RelayClient::new(bare_config(), silent_transport());
        assert!(client.query_many(&[], "hi").await.is_empty());
    }
}

#[cfg(test)]
mod use_case_selection_tests {
    use super::*;

    #[test]
    fn test_paid_pick_requires_its_key() {
        // Arrange
        let keyed = RelayClient::new(keyed_config(), silent_transport());
        let bare = RelayClient::new(bare_config(), silent_transport());

        // Act & Assert
        assert_eq!(
            keyed.model_for_use_case(Some(UseCase::Programming), false),
            "claude-3.5-sonnet"
        );
        assert_eq!(
            bare.model_for_use_case(Some(UseCase::Programming), false),
            "deepseek-v3"
        );
    }

    #[test]
    fn test_prefer_free_ignores_keys() {
        let client = RelayClient::new(keyed_config(), silent_transport());
        assert_eq!(
            client.model_for_use_case(Some(UseCase::Productivity), true),
            "gecko-3"
        );
        assert_eq!(client.model_for_use_case(None, true), "deepseek-v3");
    }

    #[test]
    fn test_only_the_recommended_providers_key_matters() {
        let mut config = bare_config();
        config.openai.credential = Some("sk-only-openai".to_string());
        let client = RelayClient::new(config, silent_transport());

        assert_eq!(
            client.model_for_use_case(Some(UseCase::Math), false),
            "gpt-4-turbo"
        );
        assert_eq!(
            client.model_for_use_case(Some(UseCase::Academic), false),
            "openchat-3.5"
        );
    }
}

#[cfg(test)]
mod from_env_tests {
    use super::*;

    #[test]
    #[serial_test::serial]
    fn test_from_env_creates_client_without_keys() {
        // Arrange
        std::env::remove_var("LLM_RELAY_TIMEOUT_SECS");

        // Act
        let result = RelayClient::from_env();

        // Assert
        assert!(result.is_ok(), "Missing keys must not fail construction");
    }

    #[test]
    #[serial_test::serial]
    fn test_from_env_propagates_config_errors() {
        std::env::set_var("LLM_RELAY_TIMEOUT_SECS", "0");

        let result = RelayClient::from_env();

        assert!(result.is_err(), "Zero timeout should be rejected");

        std::env::remove_var("LLM_RELAY_TIMEOUT_SECS");
    }
}
