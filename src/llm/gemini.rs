//! Google Gemini `generateContent` client.
//!
//! Build the request, post it, parse the body in a pure function. Gemini
//! calls the assistant role `model`, takes the system prompt as a separate
//! `systemInstruction`, and is asked for `application/json` output directly.

use serde::{Deserialize, Serialize};

use super::config::LlmTimeouts;
use super::transport::Transport;
use super::types::{ChatResponse, ContentBlock, LlmError, Message};

pub struct GeminiClient {
    transport: Transport,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// # Errors
    ///
    /// Returns [`LlmError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn new(api_key: String, base_url: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        Ok(Self { transport: Transport::new(timeouts)?, api_key, base_url })
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
        let body = build_request(max_tokens, system, messages);
        let url = format!("{}/models/{model}:generateContent", self.base_url);
        let text = self
            .transport
            .post_json(&url, &[("x-goog-api-key", self.api_key.as_str())], &body)
            .await?;
        parse_response(&text, model)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<ApiContent>,
    contents: Vec<ApiContent>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct ApiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<ApiPart>,
}

#[derive(Serialize, Deserialize)]
struct ApiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    /// Set on reasoning parts by thinking models.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    thought: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    response_mime_type: &'static str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: UsageMetadata,
    model_version: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<ApiContent>,
    finish_reason: Option<String>,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
}

// =============================================================================
// BUILD + PARSE
// =============================================================================

fn build_request(max_tokens: u32, system: &str, messages: &[Message]) -> ApiRequest {
    let system_instruction = (!system.is_empty()).then(|| ApiContent {
        role: None,
        parts: vec![ApiPart { text: Some(system.to_string()), thought: false }],
    });

    let contents = messages
        .iter()
        .map(|m| ApiContent {
            role: Some(if m.role == "assistant" { "model".into() } else { "user".into() }),
            parts: vec![ApiPart { text: Some(m.content.text()), thought: false }],
        })
        .collect();

    ApiRequest {
        system_instruction,
        contents,
        generation_config: GenerationConfig { max_output_tokens: max_tokens, response_mime_type: "application/json" },
    }
}

fn parse_response(json: &str, requested_model: &str) -> Result<ChatResponse, LlmError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let candidate = api
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::ApiParse("response has no candidates".into()))?;

    let content = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|part| match (part.text, part.thought) {
            (Some(thinking), true) => Some(ContentBlock::Thinking { thinking }),
            (Some(text), false) => Some(ContentBlock::Text { text }),
            (None, _) => None,
        })
        .collect();

    Ok(ChatResponse {
        content,
        model: api.model_version.unwrap_or_else(|| requested_model.to_string()),
        stop_reason: candidate.finish_reason.unwrap_or_else(|| "unknown".into()),
        input_tokens: api.usage_metadata.prompt_token_count,
        output_tokens: api.usage_metadata.candidates_token_count,
    })
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
