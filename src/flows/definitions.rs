//! Prompt templates and I/O shapes for each tool flow.
//!
//! Field names are camelCase on the wire to match what the dashboard tools
//! send and render.

use serde::{Deserialize, Serialize};

use super::{Flow, FlowError, require};

const ASSISTANT_PERSONA: &str = "You are Sparky, the friendly AI assistant in the Daily Spark app.";

// =============================================================================
// CHAT
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatInput {
    pub message: String,
    /// Image attachment as a `data:` URI. Image input is not supported by
    /// these flows; a request carrying one is rejected.
    #[serde(rename = "photoDataUri", default, skip_serializing_if = "Option::is_none")]
    pub photo_data_uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatOutput {
    pub response: String,
}

pub struct ChatFlow;

impl Flow for ChatFlow {
    const NAME: &'static str = "chat";
    const OUTPUT_SHAPE: &'static str = r#"{"response": string}"#;
    type Input = ChatInput;
    type Output = ChatOutput;

    fn instructions() -> &'static str {
        ASSISTANT_PERSONA
    }

    fn validate(input: &ChatInput) -> Result<(), FlowError> {
        if input.photo_data_uri.is_some() {
            return Err(FlowError::InvalidInput("photoDataUri: image attachments are not supported".into()));
        }
        require("message", &input.message)
    }

    fn prompt(input: &ChatInput) -> String {
        format!(
            "Answer the user's message in a friendly, conversational way. If asked who you are, say you are Sparky, the Daily Spark assistant.\n\nUser: {}",
            input.message
        )
    }
}

// =============================================================================
// SUMMARIZE
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeInput {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarizeOutput {
    pub summary: String,
}

pub struct SummarizeFlow;

impl Flow for SummarizeFlow {
    const NAME: &'static str = "summarize";
    const OUTPUT_SHAPE: &'static str = r#"{"summary": string}"#;
    type Input = SummarizeInput;
    type Output = SummarizeOutput;

    fn instructions() -> &'static str {
        "You write short, faithful summaries."
    }

    fn validate(input: &SummarizeInput) -> Result<(), FlowError> {
        require("text", &input.text)
    }

    fn prompt(input: &SummarizeInput) -> String {
        format!("Summarize the following text concisely, keeping its key points.\n\nText: {}", input.text)
    }
}

// =============================================================================
// TRANSLATE
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateInput {
    pub text: String,
    pub target_language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateOutput {
    pub translated_text: String,
}

pub struct TranslateFlow;

impl Flow for TranslateFlow {
    const NAME: &'static str = "translate";
    const OUTPUT_SHAPE: &'static str = r#"{"translatedText": string}"#;
    type Input = TranslateInput;
    type Output = TranslateOutput;

    fn instructions() -> &'static str {
        "You are a professional translator. Preserve meaning and tone."
    }

    fn validate(input: &TranslateInput) -> Result<(), FlowError> {
        require("text", &input.text)?;
        require("targetLanguage", &input.target_language)
    }

    fn prompt(input: &TranslateInput) -> String {
        format!("Translate the following text into {}.\n\nText: {}", input.target_language, input.text)
    }
}

// =============================================================================
// GRAMMAR
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrammarInput {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarOutput {
    pub corrected_text: String,
}

pub struct GrammarFlow;

impl Flow for GrammarFlow {
    const NAME: &'static str = "check-grammar";
    const OUTPUT_SHAPE: &'static str = r#"{"correctedText": string}"#;
    type Input = GrammarInput;
    type Output = GrammarOutput;

    fn instructions() -> &'static str {
        "You are a careful proofreader."
    }

    fn validate(input: &GrammarInput) -> Result<(), FlowError> {
        require("text", &input.text)
    }

    fn prompt(input: &GrammarInput) -> String {
        format!(
            "Fix any grammar and spelling mistakes in the text below. If it has none, return it unchanged.\n\nText: {}",
            input.text
        )
    }
}

// =============================================================================
// REWRITE
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteInput {
    pub text: String,
    pub tone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteOutput {
    pub rewritten_text: String,
}

pub struct RewriteFlow;

impl Flow for RewriteFlow {
    const NAME: &'static str = "rewrite";
    const OUTPUT_SHAPE: &'static str = r#"{"rewrittenText": string}"#;
    type Input = RewriteInput;
    type Output = RewriteOutput;

    fn instructions() -> &'static str {
        "You are an expert editor."
    }

    fn validate(input: &RewriteInput) -> Result<(), FlowError> {
        require("text", &input.text)?;
        require("tone", &input.tone)
    }

    fn prompt(input: &RewriteInput) -> String {
        format!("Rewrite the following text in a {} tone.\n\nOriginal text:\n\"{}\"", input.tone, input.text)
    }
}

// =============================================================================
// EMOTION
// =============================================================================

/// Emotions the detector may answer with.
pub const EMOTIONS: [&str; 7] = ["Joy", "Sadness", "Anger", "Surprise", "Fear", "Love", "Neutral"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionInput {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionOutput {
    pub emotion: String,
    pub emoji: String,
}

pub struct EmotionFlow;

impl Flow for EmotionFlow {
    const NAME: &'static str = "detect-emotion";
    const OUTPUT_SHAPE: &'static str = r#"{"emotion": string, "emoji": string}"#;
    type Input = EmotionInput;
    type Output = EmotionOutput;

    fn instructions() -> &'static str {
        "You classify the primary emotion expressed in a piece of text."
    }

    fn validate(input: &EmotionInput) -> Result<(), FlowError> {
        require("text", &input.text)
    }

    fn prompt(input: &EmotionInput) -> String {
        format!(
            "Pick exactly one of: {}. Also give a single emoji that represents it.\n\nText: {}",
            EMOTIONS.join(", "),
            input.text
        )
    }
}

// =============================================================================
// BRAINSTORM
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrainstormInput {
    pub topic: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrainstormOutput {
    pub ideas: Vec<String>,
}

pub struct BrainstormFlow;

impl Flow for BrainstormFlow {
    const NAME: &'static str = "brainstorm";
    const OUTPUT_SHAPE: &'static str = r#"{"ideas": [string]}"#;
    type Input = BrainstormInput;
    type Output = BrainstormOutput;

    fn instructions() -> &'static str {
        "You are a creative assistant that helps with brainstorming."
    }

    fn validate(input: &BrainstormInput) -> Result<(), FlowError> {
        require("topic", &input.topic)
    }

    fn prompt(input: &BrainstormInput) -> String {
        format!("Come up with 5 creative and varied ideas for this topic.\n\nTopic: {}", input.topic)
    }
}

// =============================================================================
// CODE
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeInput {
    pub program_description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeOutput {
    pub code: String,
}

pub struct CodeFlow;

impl Flow for CodeFlow {
    const NAME: &'static str = "generate-code";
    const OUTPUT_SHAPE: &'static str = r#"{"code": string}"#;
    type Input = CodeInput;
    type Output = CodeOutput;

    fn instructions() -> &'static str {
        "You are an expert software developer."
    }

    fn validate(input: &CodeInput) -> Result<(), FlowError> {
        require("programDescription", &input.program_description)
    }

    fn prompt(input: &CodeInput) -> String {
        format!(
            "Write working, commented code for the program described below.\n\nDescription: {}",
            input.program_description
        )
    }
}

// =============================================================================
// STORY
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryInput {
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryOutput {
    pub title: String,
    pub story: String,
}

pub struct StoryFlow;

impl Flow for StoryFlow {
    const NAME: &'static str = "generate-story";
    const OUTPUT_SHAPE: &'static str = r#"{"title": string, "story": string}"#;
    type Input = StoryInput;
    type Output = StoryOutput;

    fn instructions() -> &'static str {
        "You are a master storyteller."
    }

    fn validate(input: &StoryInput) -> Result<(), FlowError> {
        require("prompt", &input.prompt)
    }

    fn prompt(input: &StoryInput) -> String {
        format!(
            "Write an imaginative, well-structured short story with a creative title, based on this idea.\n\nIdea: {}",
            input.prompt
        )
    }
}

// =============================================================================
// SMART SEARCH
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmartSearchInput {
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmartSearchOutput {
    pub answer: String,
}

pub struct SmartSearchFlow;

impl Flow for SmartSearchFlow {
    const NAME: &'static str = "smart-search";
    const OUTPUT_SHAPE: &'static str = r#"{"answer": string}"#;
    type Input = SmartSearchInput;
    type Output = SmartSearchOutput;

    fn instructions() -> &'static str {
        "You answer questions directly and accurately."
    }

    fn validate(input: &SmartSearchInput) -> Result<(), FlowError> {
        require("query", &input.query)
    }

    fn prompt(input: &SmartSearchInput) -> String {
        format!("Answer the following query: {}", input.query)
    }
}
