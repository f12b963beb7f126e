//! Anthropic API request and response type definitions

use serde::{Deserialize, Serialize};

/// Anthropic Messages API request structure
#[derive(Debug, Serialize, Clone, PartialEq)]
pub(crate) struct AnthropicRequest {
    pub model: String,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    pub system: String,
    pub messages: Vec<AnthropicMessage>,
}

/// Anthropic message structure
#[derive(Debug, Serialize, Clone, PartialEq)]
pub(crate) struct AnthropicMessage {
    pub role: String,
    pub content: Vec<AnthropicContentBlock>,
}

/// Outgoing content block. The relay only ever sends text.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "type")]
pub(crate) enum AnthropicContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
}

/// Anthropic API response, reduced to what the relay reads.
///
/// Blocks are decoded loosely: a block without a `type` is accepted as long
/// as it carries `text`, and unknown block types (`tool_use`, `thinking`)
/// are skipped rather than rejected.
#[derive(Debug, Deserialize, Clone)]
pub(crate) struct AnthropicResponse {
    pub content: Vec<AnthropicResponseBlock>,
    #[serde(default)]
    pub stop_reason: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct AnthropicResponseBlock {
    #[serde(rename = "type", default)]
    pub block_type: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl AnthropicResponse {
    /// Text of the first text block.
    pub fn first_text(self) -> Option<String> {
        self.content.into_iter().find_map(|block| {
            match block.block_type.as_deref() {
                None | Some("text") => block.text,
                Some(_) => None,
            }
        })
    }
}
