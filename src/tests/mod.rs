// Test modules for llm-relay crate
//
// Test organization follows the template pattern where each source file
// has a corresponding test file that focuses on business logic verification.

// Test helper utilities
pub mod helpers;

pub mod client;

// NOTE: Real HTTP round-trips live in tests/ (wiremock servers); the unit
// tests here drive adapters through MockHttpTransport only.
