//! Anthropic Messages API client.
//!
//! Anthropic has no JSON response mode, so requests end with an assistant
//! turn holding just `{`. The model continues from there and the parser puts
//! the brace back on the first text block, giving flows a bare object.

use serde::{Deserialize, Serialize};

use super::config::LlmTimeouts;
use super::transport::Transport;
use super::types::{ChatResponse, ContentBlock, LlmError, Message};

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const JSON_PREFILL: &str = "{";

pub struct AnthropicClient {
    transport: Transport,
    api_key: String,
}

impl AnthropicClient {
    /// # Errors
    ///
    /// Returns [`LlmError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn new(api_key: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        Ok(Self { transport: Transport::new(timeouts)?, api_key })
    }

    /// # Errors
    ///
    /// Returns [`LlmError`] on transport failure, non-200 status or a
    /// malformed body.
    pub async fn chat(
        &self,
        model: &str,
        max_tokens: u32,
        system: &str,
        messages: &[Message],
    ) -> Result<ChatResponse, LlmError> {
        let body = build_request(model, max_tokens, system, messages);
        let headers = [("x-api-key", self.api_key.as_str()), ("anthropic-version", API_VERSION)];
        let text = self.transport.post_json(API_URL, &headers, &body).await?;
        parse_response(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "str::is_empty")]
    system: &'a str,
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    model: String,
    #[serde(default)]
    stop_reason: Option<String>,
    usage: TokenUsage,
}

#[derive(Deserialize)]
struct TokenUsage {
    input_tokens: u64,
    output_tokens: u64,
}

// =============================================================================
// BUILD + PARSE
// =============================================================================

fn build_request<'a>(model: &'a str, max_tokens: u32, system: &'a str, messages: &[Message]) -> MessagesRequest<'a> {
    let mut messages = messages.to_vec();
    messages.push(Message::assistant(JSON_PREFILL));
    MessagesRequest { model, max_tokens, system, messages }
}

fn parse_response(json: &str) -> Result<ChatResponse, LlmError> {
    let parsed: MessagesResponse = serde_json::from_str(json).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let mut content: Vec<ContentBlock> = parsed
        .content
        .into_iter()
        .filter(|block| !matches!(block, ContentBlock::Unknown))
        .collect();

    if let Some(ContentBlock::Text { text }) = content.iter_mut().find(|b| matches!(b, ContentBlock::Text { .. })) {
        text.insert_str(0, JSON_PREFILL);
    }

    Ok(ChatResponse {
        content,
        model: parsed.model,
        stop_reason: parsed.stop_reason.unwrap_or_else(|| "unknown".into()),
        input_tokens: parsed.usage.input_tokens,
        output_tokens: parsed.usage.output_tokens,
    })
}

#[cfg(test)]
#[path = "anthropic_test.rs"]
mod tests;
