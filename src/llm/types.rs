//! LLM types — provider-neutral message types and errors.
//!
//! Shared by the Anthropic and Gemini clients and by the tool flows.

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("invalid LLM config: {0}")]
    ConfigParse(String),
    /// `var` names the environment variable that should hold the key.
    #[error("LLM API key not found in ${var}")]
    MissingApiKey { var: String },
    /// Transport failure: connect, timeout, or an unreadable body.
    #[error("LLM request failed: {0}")]
    ApiRequest(String),
    /// Non-200 reply. `body` is kept for logs only.
    #[error("LLM provider returned status {status}")]
    ApiResponse { status: u16, body: String },
    #[error("unexpected LLM response: {0}")]
    ApiParse(String),
    #[error("could not build HTTP client: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// CONTENT BLOCKS
// =============================================================================

/// One block of model output. Providers tag blocks with `type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },

    /// Model reasoning. Excluded from [`Content::text`] and [`ChatResponse::text`].
    #[serde(rename = "thinking")]
    Thinking { thinking: String },

    /// Block types this crate does not read (images, tool calls, ...).
    #[serde(other)]
    Unknown,
}

/// A plain string, or blocks as returned by a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

impl Content {
    /// Text blocks concatenated; everything else dropped.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Blocks(blocks) => joined_text(blocks),
        }
    }
}

fn joined_text(blocks: &[ContentBlock]) -> String {
    blocks
        .iter()
        .filter_map(|block| match block {
            ContentBlock::Text { text } => Some(text.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("")
}

// =============================================================================
// MESSAGE TYPES
// =============================================================================

/// One conversation turn. `role` is `user` or `assistant`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: Content,
}

impl Message {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: "user".into(), content: Content::Text(text.into()) }
    }

    #[must_use]
    pub fn assistant(text: impl Into<String>) -> Self {
        Self { role: "assistant".into(), content: Content::Text(text.into()) }
    }
}

/// Provider reply, normalized across Gemini and Anthropic.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub content: Vec<ContentBlock>,
    pub model: String,
    pub stop_reason: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl ChatResponse {
    /// All text blocks joined in order.
    #[must_use]
    pub fn text(&self) -> String {
        joined_text(&self.content)
    }
}

// =============================================================================
// LLM CHAT TRAIT
// =============================================================================

/// The seam flows call through. Implemented by [`super::LlmClient`] and by
/// test doubles.
#[async_trait::async_trait]
pub trait LlmChat: Send + Sync {
    /// # Errors
    ///
    /// Returns [`LlmError`] when the provider cannot be reached, refuses the
    /// request, or replies with something unparseable.
    async fn chat(&self, max_tokens: u32, system: &str, messages: &[Message]) -> Result<ChatResponse, LlmError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
