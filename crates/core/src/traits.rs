//! Trait seams for the external collaborators
//!
//! The conversation controller and HTTP handlers depend on these traits
//! rather than concrete clients, so tests can substitute stubs and the
//! fail-open policy can be exercised without a network.

use async_trait::async_trait;

use crate::conversation::{ChatMessage, ChatSummary, Transcript, Turn};
use crate::error::Result;
use crate::language::Language;
use crate::loan::LoanType;

/// Translates text into a target language
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into `target`. Implementations may return an
    /// error; callers on the conversation path fall back to the source
    /// text.
    async fn translate(&self, text: &str, target: Language) -> Result<String>;
}

/// Classifies a user utterance into a loan type
#[async_trait]
pub trait LoanClassifier: Send + Sync {
    /// Returns `None` when no loan type can be determined.
    async fn classify(&self, message: &str, language: Language) -> Result<Option<LoanType>>;
}

/// Judges whether the user indicated understanding
#[async_trait]
pub trait UnderstandingCheck: Send + Sync {
    async fn confirmed(&self, message: &str, language: Language) -> Result<bool>;
}

/// Free-form loan advisor chat
#[async_trait]
pub trait AdvisorChat: Send + Sync {
    /// Produce the next advisor reply given recent history and the new
    /// user message.
    async fn respond(&self, history: &[Turn], message: &str, language: Language)
        -> Result<String>;
}

/// Summarizes a chat transcript into structured form
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, messages: &[ChatMessage]) -> Result<ChatSummary>;
}

/// Speech-to-text service
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe a recorded utterance (WAV bytes) in the given language.
    async fn transcribe(&self, audio: &[u8], language: Language) -> Result<Transcript>;
}

/// Text-to-speech service
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Synthesize speech for `text`, returning decoded WAV clips in
    /// playback order. Long text is chunked by the implementation.
    async fn synthesize(&self, text: &str, language: Language) -> Result<Vec<Vec<u8>>>;
}
