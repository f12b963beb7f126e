//! Model identifier → provider routing.
//!
//! Resolution is a fixed sequence of checks; the first hit wins:
//!
//! 1. normalize (trim, lower-case); empty is unsupported
//! 2. legacy alias (`gpt`, `claude`, `gemini`) → provider default model
//! 3. exact allow-list match, free-tier ids included
//! 4. prefix match (`gpt*`, `claude*`, `gemini*`), id passed through
//! 5. unsupported
//!
//! Exact matches are checked before prefixes so a free-tier id that happens
//! to start with a paid prefix is never misrouted.

use crate::config::RelayConfig;
use crate::error::{RelayError, RelayResult};
use crate::logging::log_debug;
use crate::provider::{Provider, Route};

/// How an identifier was matched. Useful for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    LegacyAlias,
    AllowList,
    Prefix,
}

/// Resolve `identifier` to a provider and concrete upstream model id.
///
/// # Errors
///
/// Returns [`RelayError::UnsupportedModel`] when no rule matches.
pub fn resolve(identifier: &str, config: &RelayConfig) -> RelayResult<Route> {
    resolve_with_rule(identifier, config).map(|(route, _)| route)
}

/// Same as [`resolve`], also reporting which rule produced the route.
pub fn resolve_with_rule(
    identifier: &str,
    config: &RelayConfig,
) -> RelayResult<(Route, MatchRule)> {
    let normalized = identifier.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(RelayError::unsupported_model(identifier));
    }

    let (route, rule) = match_legacy_alias(&normalized, config)
        .map(|route| (route, MatchRule::LegacyAlias))
        .or_else(|| match_allow_list(&normalized, config).map(|r| (r, MatchRule::AllowList)))
        .or_else(|| match_prefix(&normalized).map(|r| (r, MatchRule::Prefix)))
        .ok_or_else(|| RelayError::unsupported_model(identifier))?;

    log_debug!(
        identifier = %identifier,
        provider = %route.provider,
        model_id = %route.model_id,
        rule = ?rule,
        "Resolved model identifier"
    );

    Ok((route, rule))
}

fn match_legacy_alias(id: &str, config: &RelayConfig) -> Option<Route> {
    Provider::PAID
        .into_iter()
        .find(|provider| provider.legacy_alias() == Some(id))
        .and_then(|provider| config.provider(provider))
        .map(|settings| Route::new(settings.provider, settings.default_model_id.clone()))
}

fn match_allow_list(id: &str, config: &RelayConfig) -> Option<Route> {
    let paid = Provider::PAID
        .into_iter()
        .filter_map(|provider| config.provider(provider))
        .find_map(|settings| {
            settings
                .concrete_model(id)
                .map(|concrete| Route::new(settings.provider, concrete))
        });

    paid.or_else(|| {
        config
            .free_tier
            .contains(id)
            .then(|| Route::new(Provider::FreeTier, id))
    })
}

fn match_prefix(id: &str) -> Option<Route> {
    Provider::PAID
        .into_iter()
        .find(|provider| {
            provider
                .legacy_alias()
                .is_some_and(|prefix| id.starts_with(prefix))
        })
        .map(|provider| Route::new(provider, id))
}
