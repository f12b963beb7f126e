//! Tests for the Anthropic adapter
//!
//! This module contains unit tests for Anthropic-specific request building and
//! response extraction, driven through a mocked transport.


// NOTE: Real HTTP round-trips are in tests/provider_http_integration_tests.rs
