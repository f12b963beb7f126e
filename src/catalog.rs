//! Model catalog and use-case recommendations.
//!
//! The catalog lists the models the relay advertises, with display metadata
//! and the paid/free split. Recommendations are ordered best-first.

use crate::provider::Provider;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Catalog id used when no use case is given and free models are preferred.
pub const DEFAULT_FREE_MODEL: &str = "deepseek-v3";
/// Catalog id used when no use case is given and paid models are preferred.
pub const DEFAULT_PAID_MODEL: &str = "claude-3.5-sonnet";

/// Display metadata for one catalog model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub vendor: &'static str,
    pub provider: Provider,
    pub is_paid: bool,
    pub description: &'static str,
}

const MODELS: [ModelInfo; 10] = [
    ModelInfo {
        id: "gpt-4-turbo",
        name: "GPT-4 Turbo",
        vendor: "OpenAI",
        provider: Provider::OpenAI,
        is_paid: true,
        description: "Powerful for programming, summarization, and creative content.",
    },
    ModelInfo {
        id: "gpt-4.5",
        name: "GPT-4.5",
        vendor: "OpenAI",
        provider: Provider::OpenAI,
        is_paid: true,
        description: "Latest OpenAI model with improved capabilities across all tasks.",
    },
    ModelInfo {
        id: "claude-3.5-sonnet",
        name: "Claude 3.5 Sonnet",
        vendor: "Anthropic",
        provider: Provider::Anthropic,
        is_paid: true,
        description: "Excels at reasoning and technical writing with strong factual accuracy.",
    },
    ModelInfo {
        id: "gemini-2-pro",
        name: "Gemini 2 Pro",
        vendor: "Google",
        provider: Provider::Google,
        is_paid: true,
        description: "Good at math and science with strong multilingual capabilities.",
    },
    ModelInfo {
        id: "deepseek-v3",
        name: "DeepSeek V3",
        vendor: "DeepSeek",
        provider: Provider::FreeTier,
        is_paid: false,
        description: "Strong at programming, math & reasoning; free tier option.",
    },
    ModelInfo {
        id: "deepseek-coder",
        name: "DeepSeek Coder",
        vendor: "DeepSeek",
        provider: Provider::FreeTier,
        is_paid: false,
        description: "Specialized for code generation and programming tasks.",
    },
    ModelInfo {
        id: "openchat-3.5",
        name: "OpenChat 3.5",
        vendor: "OpenChat",
        provider: Provider::FreeTier,
        is_paid: false,
        description: "Great for technical writing and creative content; free to use.",
    },
    ModelInfo {
        id: "yi-1.5-34b",
        name: "Yi 1.5 34B",
        vendor: "01.AI",
        provider: Provider::FreeTier,
        is_paid: false,
        description: "Strong performance on business tasks and conversational abilities.",
    },
    ModelInfo {
        id: "gecko-3",
        name: "Gecko 3",
        vendor: "Gecko",
        provider: Provider::FreeTier,
        is_paid: false,
        description: "Efficient for productivity and business applications.",
    },
    ModelInfo {
        id: "gecko-2-mini",
        name: "Gecko 2 Mini",
        vendor: "Gecko",
        provider: Provider::FreeTier,
        is_paid: false,
        description: "Optimized for multilingual tasks with efficient performance.",
    },
];

/// Every catalog model, paid first.
pub fn models() -> &'static [ModelInfo] {
    &MODELS
}

/// Look up a catalog model by id (case-insensitive).
pub fn model(id: &str) -> Option<&'static ModelInfo> {
    let id = id.trim();
    MODELS.iter().find(|m| m.id.eq_ignore_ascii_case(id))
}

/// A task category used to pick a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UseCase {
    Programming,
    TechnicalWriting,
    Math,
    Productivity,
    Science,
    CustomerSupport,
    CreativeWriting,
    Summarization,
    Multilingual,
    Academic,
}

impl UseCase {
    pub const ALL: [UseCase; 10] = [
        UseCase::Programming,
        UseCase::TechnicalWriting,
        UseCase::Math,
        UseCase::Productivity,
        UseCase::Science,
        UseCase::CustomerSupport,
        UseCase::CreativeWriting,
        UseCase::Summarization,
        UseCase::Multilingual,
        UseCase::Academic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UseCase::Programming => "programming",
            UseCase::TechnicalWriting => "technical-writing",
            UseCase::Math => "math",
            UseCase::Productivity => "productivity",
            UseCase::Science => "science",
            UseCase::CustomerSupport => "customer-support",
            UseCase::CreativeWriting => "creative-writing",
            UseCase::Summarization => "summarization",
            UseCase::Multilingual => "multilingual",
            UseCase::Academic => "academic",
        }
    }

    /// Catalog ids in preference order.
    pub fn recommended(&self, prefer_free: bool) -> &'static [&'static str] {
        let (paid, free): (&[&str], &[&str]) = match self {
            UseCase::Programming => (
                &["claude-3.5-sonnet", "gpt-4-turbo"],
                &["deepseek-v3", "deepseek-coder"],
            ),
            UseCase::TechnicalWriting => (
                &["claude-3.5-sonnet", "gpt-4.5"],
                &["openchat-3.5", "deepseek-v3"],
            ),
            UseCase::Math | UseCase::Science => (
                &["gpt-4-turbo", "claude-3.5-sonnet"],
                &["deepseek-v3", "openchat-3.5"],
            ),
            UseCase::Productivity => (
                &["gpt-4-turbo", "claude-3.5-sonnet"],
                &["gecko-3", "yi-1.5-34b"],
            ),
            UseCase::CustomerSupport | UseCase::CreativeWriting | UseCase::Summarization => (
                &["gpt-4-turbo", "claude-3.5-sonnet"],
                &["openchat-3.5", "yi-1.5-34b"],
            ),
            UseCase::Multilingual => (
                &["claude-3.5-sonnet", "gpt-4.5"],
                &["gecko-2-mini", "deepseek-v3"],
            ),
            UseCase::Academic => (
                &["claude-3.5-sonnet", "gpt-4-turbo"],
                &["openchat-3.5", "deepseek-v3"],
            ),
        };
        if prefer_free {
            free
        } else {
            paid
        }
    }
}

impl fmt::Display for UseCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown use case '{0}'")]
pub struct UnknownUseCase(pub String);

impl FromStr for UseCase {
    type Err = UnknownUseCase;

    /// Accepts `technical-writing`, `technical_writing` and `Technical Writing`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '_' | ' ' => '-',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        UseCase::ALL
            .into_iter()
            .find(|use_case| use_case.as_str() == normalized)
            .ok_or_else(|| UnknownUseCase(s.to_string()))
    }
}

/// Recommended catalog ids for a use case, best first.
pub fn recommended_models(use_case: UseCase, prefer_free: bool) -> &'static [&'static str] {
    use_case.recommended(prefer_free)
}

/// Top recommendation, or the general default when no use case is known.
pub fn default_model_for_use_case(use_case: Option<UseCase>, prefer_free: bool) -> &'static str {
    use_case
        .and_then(|u| u.recommended(prefer_free).first().copied())
        .unwrap_or(if prefer_free {
            DEFAULT_FREE_MODEL
        } else {
            DEFAULT_PAID_MODEL
        })
}
