//! AI tool flows — one prompt template per tool, typed in and typed out.
//!
//! DESIGN
//! ======
//! Every flow is a single LLM call: validate the input, render the prompt,
//! ask the model for one JSON object matching the flow's output shape, and
//! parse it. There is no retry, streaming or caching; a failure is returned
//! to the caller as a [`FlowError`] and the tool shows it.
//!
//! [`FlowKind`] is the name-based dispatch used by the HTTP layer: it takes
//! and returns `serde_json::Value` so routes stay generic over flows.

pub mod definitions;

use std::sync::OnceLock;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::llm::LlmChat;
use crate::llm::types::{LlmError, Message};
use definitions::*;

const DEFAULT_FLOW_MAX_TOKENS: u32 = 2048;

fn flow_max_tokens() -> u32 {
    static VALUE: OnceLock<u32> = OnceLock::new();
    *VALUE.get_or_init(|| {
        std::env::var("FLOW_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_FLOW_MAX_TOKENS)
    })
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("LLM not configured")]
    NotConfigured,
    #[error("unknown flow: {0}")]
    UnknownFlow(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
    #[error("model output did not match the expected shape: {0}")]
    MalformedOutput(String),
}

// =============================================================================
// FLOW TRAIT
// =============================================================================

/// A single prompt-template tool.
pub trait Flow {
    /// Name used in URLs, e.g. `"summarize"`.
    const NAME: &'static str;
    /// Output shape described to the model, e.g. `{"summary": string}`.
    const OUTPUT_SHAPE: &'static str;

    type Input: DeserializeOwned + Send + Sync;
    type Output: Serialize + DeserializeOwned;

    /// Role instructions for the model.
    fn instructions() -> &'static str;

    /// Reject inputs that would produce a useless prompt.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::InvalidInput`] naming the offending field.
    fn validate(input: &Self::Input) -> Result<(), FlowError>;

    fn prompt(input: &Self::Input) -> String;
}

/// Fail with `InvalidInput` when `value` is blank.
pub(crate) fn require(field: &str, value: &str) -> Result<(), FlowError> {
    if value.trim().is_empty() {
        return Err(FlowError::InvalidInput(format!("{field} must not be empty")));
    }
    Ok(())
}

fn system_prompt<F: Flow>() -> String {
    format!(
        "{}\n\nReply with exactly one JSON object of the shape {} and nothing else: no prose, no markdown fences.",
        F::instructions(),
        F::OUTPUT_SHAPE
    )
}

/// Run flow `F` against `llm`.
///
/// # Errors
///
/// Returns [`FlowError`] for invalid input, LLM failure, or output that does
/// not parse as `F::Output`.
pub async fn run<F: Flow>(llm: &dyn LlmChat, input: &F::Input) -> Result<F::Output, FlowError> {
    F::validate(input)?;

    let system = system_prompt::<F>();
    let messages = [Message::user(F::prompt(input))];
    let response = llm.chat(flow_max_tokens(), &system, &messages).await?;
    info!(
        flow = F::NAME,
        model = %response.model,
        input_tokens = response.input_tokens,
        output_tokens = response.output_tokens,
        "flow: completed"
    );

    let text = response.text();
    let json = extract_json(&text).ok_or_else(|| {
        warn!(flow = F::NAME, len = text.len(), "flow: no JSON object in model output");
        FlowError::MalformedOutput("no JSON object in model output".into())
    })?;
    serde_json::from_str(json).map_err(|e| FlowError::MalformedOutput(e.to_string()))
}

/// Slice out the JSON object in `text`, tolerating markdown fences or
/// chatter around it.
fn extract_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

// =============================================================================
// DISPATCH
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowKind {
    Chat,
    Summarize,
    Translate,
    CheckGrammar,
    Rewrite,
    DetectEmotion,
    Brainstorm,
    GenerateCode,
    GenerateStory,
    SmartSearch,
}

impl FlowKind {
    pub const ALL: [Self; 10] = [
        Self::Chat,
        Self::Summarize,
        Self::Translate,
        Self::CheckGrammar,
        Self::Rewrite,
        Self::DetectEmotion,
        Self::Brainstorm,
        Self::GenerateCode,
        Self::GenerateStory,
        Self::SmartSearch,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Chat => ChatFlow::NAME,
            Self::Summarize => SummarizeFlow::NAME,
            Self::Translate => TranslateFlow::NAME,
            Self::CheckGrammar => GrammarFlow::NAME,
            Self::Rewrite => RewriteFlow::NAME,
            Self::DetectEmotion => EmotionFlow::NAME,
            Self::Brainstorm => BrainstormFlow::NAME,
            Self::GenerateCode => CodeFlow::NAME,
            Self::GenerateStory => StoryFlow::NAME,
            Self::SmartSearch => SmartSearchFlow::NAME,
        }
    }

    /// # Errors
    ///
    /// Returns [`FlowError::UnknownFlow`] if no flow has this name.
    pub fn from_name(name: &str) -> Result<Self, FlowError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| FlowError::UnknownFlow(name.to_string()))
    }

    /// Run this flow on an untyped JSON input and return untyped output.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::InvalidInput`] if `input` does not match the
    /// flow's input shape, or any error from [`run`].
    pub async fn run_value(self, llm: &dyn LlmChat, input: serde_json::Value) -> Result<serde_json::Value, FlowError> {
        match self {
            Self::Chat => run_untyped::<ChatFlow>(llm, input).await,
            Self::Summarize => run_untyped::<SummarizeFlow>(llm, input).await,
            Self::Translate => run_untyped::<TranslateFlow>(llm, input).await,
            Self::CheckGrammar => run_untyped::<GrammarFlow>(llm, input).await,
            Self::Rewrite => run_untyped::<RewriteFlow>(llm, input).await,
            Self::DetectEmotion => run_untyped::<EmotionFlow>(llm, input).await,
            Self::Brainstorm => run_untyped::<BrainstormFlow>(llm, input).await,
            Self::GenerateCode => run_untyped::<CodeFlow>(llm, input).await,
            Self::GenerateStory => run_untyped::<StoryFlow>(llm, input).await,
            Self::SmartSearch => run_untyped::<SmartSearchFlow>(llm, input).await,
        }
    }
}

async fn run_untyped<F: Flow>(llm: &dyn LlmChat, input: serde_json::Value) -> Result<serde_json::Value, FlowError> {
    let typed: F::Input = serde_json::from_value(input).map_err(|e| FlowError::InvalidInput(e.to_string()))?;
    let output = run::<F>(llm, &typed).await?;
    serde_json::to_value(output).map_err(|e| FlowError::MalformedOutput(e.to_string()))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
