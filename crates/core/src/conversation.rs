//! Conversation types shared across crates

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::language::Language;

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Agent,
}

/// One turn in a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn agent(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Agent,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Transcript result from STT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Transcribed text
    pub text: String,
    /// Language the audio was transcribed in
    pub language: Option<Language>,
}

impl Transcript {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: None,
        }
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Check if transcript carries no usable text
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Chat message as exchanged with the summarize endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub text: String,
    pub sender: Sender,
}

/// Message sender label used on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// Structured conversation summary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSummary {
    /// Concise summary of the conversation
    pub summary: String,
    /// Key points, one or two words each
    pub key_points: Vec<String>,
    /// The flow of the conversation
    pub flow: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_empty() {
        assert!(Transcript::new("   ").is_empty());
        assert!(!Transcript::new("hello").is_empty());
    }

    #[test]
    fn test_summary_field_names() {
        let summary = ChatSummary {
            summary: "s".into(),
            key_points: vec!["loans".into()],
            flow: vec!["greeting".into()],
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("keyPoints").is_some());
        assert!(json.get("flow").is_some());
    }

    #[test]
    fn test_turn_constructors() {
        let turn = Turn::user("hi");
        assert_eq!(turn.role, TurnRole::User);
        assert_eq!(turn.content, "hi");
    }
}
