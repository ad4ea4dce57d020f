//! Static tool catalog shown on the dashboard.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolCategory {
    Offline,
    Online,
    #[serde(rename = "AI")]
    Ai,
}

impl ToolCategory {
    /// Parse the category name used in URLs (`Offline`, `online`, `AI`, ...).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "offline" => Some(Self::Offline),
            "online" => Some(Self::Online),
            "ai" => Some(Self::Ai),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: ToolCategory,
    /// Pinned on the dashboard before the user has chosen any favorites.
    pub favorite_by_default: bool,
}

const fn tool(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    category: ToolCategory,
    favorite_by_default: bool,
) -> ToolInfo {
    ToolInfo { id, name, description, category, favorite_by_default }
}

use ToolCategory::{Ai, Offline, Online};

static TOOLS: &[ToolInfo] = &[
    tool("ai-chat-assistant", "AI Chat Assistant", "Engage in conversations with an intelligent AI assistant.", Ai, true),
    tool("ai-code-generator", "AI Code Generator", "Generate code snippets in various languages from descriptions.", Ai, false),
    tool("ai-image-generator", "AI Image Generator", "Create stunning images from textual descriptions.", Ai, true),
    tool("ai-summarizer", "AI Summarizer", "Get concise summaries of long texts or articles.", Ai, false),
    tool("ai-emotion-detector", "AI Emotion Detector", "Analyze text to determine the underlying emotion.", Ai, false),
    tool("ai-brainstorm-generator", "AI Idea Generator", "Generate creative ideas for any topic.", Ai, false),
    tool("ai-grammar-spell-checker", "AI Grammar & Spell Checker", "Corrects grammar and spelling mistakes in your text.", Ai, false),
    tool("ai-smart-search", "AI Smart Search", "Get direct answers to your questions, powered by web search.", Ai, false),
    tool("ai-text-rewriter", "AI Text Rewriter", "Paraphrase and rewrite text to improve clarity.", Ai, false),
    tool("ai-photo-enhancer", "AI Photo Enhancer", "Automatically improve the quality of your photos.", Ai, false),
    tool("ai-story-generator", "AI Story Generator", "Write short stories from a simple prompt.", Ai, false),
    tool("ai-voice-to-text", "AI Voice to Text", "Transcribe audio files into text.", Ai, false),
    tool("calculator", "Calculator", "Perform basic and scientific calculations.", Offline, true),
    tool("notes-notepad", "Notes / Notepad", "Quickly jot down notes, ideas, and reminders.", Offline, false),
    tool("to-do-list", "To-Do List", "Organize your tasks and manage your productivity.", Offline, false),
    tool("random-number-generator", "Random Number Generator", "Generate random numbers within a specified range.", Offline, false),
    tool("qr-barcode-scanner", "QR/Barcode Scanner", "Scan and decode QR codes and barcodes instantly.", Offline, false),
    tool("unit-converter", "Unit Converter", "Convert between various units of measurement.", Offline, false),
    tool("translator", "Translator", "Translate text between a multitude of languages.", Online, true),
    tool("weather-updates", "Weather Updates", "Get real-time weather forecasts for any location.", Online, false),
    tool("flashlight", "Flashlight", "Use your device's LED as a powerful flashlight.", Offline, false),
    tool("compass", "Compass", "Find your direction with a simple and accurate compass.", Offline, false),
    tool("news-aggregator", "News Aggregator", "Your daily news briefing from sources you trust.", Online, false),
    tool("cloud-backup-sync", "Cloud Backup/Sync", "Sync your data and settings across all devices.", Online, false),
    tool("pdf-reader", "PDF Reader", "View and manage your PDF documents on the go.", Offline, false),
    tool("voice-recorder", "Voice Recorder", "Record high-quality audio with a single tap.", Offline, false),
];

/// Every tool, in dashboard order.
#[must_use]
pub fn all_tools() -> &'static [ToolInfo] {
    TOOLS
}

#[must_use]
pub fn find_tool(id: &str) -> Option<&'static ToolInfo> {
    TOOLS.iter().find(|t| t.id == id)
}

#[must_use]
pub fn tools_in(category: ToolCategory) -> Vec<&'static ToolInfo> {
    TOOLS.iter().filter(|t| t.category == category).collect()
}

/// Ids pinned when the user has no stored favorites.
#[must_use]
pub fn default_favorites() -> Vec<&'static str> {
    TOOLS.iter().filter(|t| t.favorite_by_default).map(|t| t.id).collect()
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
