//! Core types and traits for the loan advisor
//!
//! This crate provides foundational types used across all other crates:
//! - Loan and language types
//! - Audio frame types
//! - Conversation types
//! - Error types
//! - Trait seams for the external collaborators (LLM, STT, TTS)

pub mod audio;
pub mod conversation;
pub mod error;
pub mod language;
pub mod loan;
pub mod traits;

pub use audio::AudioFrame;
pub use conversation::{ChatMessage, ChatSummary, Sender, Transcript, Turn, TurnRole};
pub use error::{Error, Result};
pub use language::Language;
pub use loan::LoanType;
pub use traits::{
    AdvisorChat, LoanClassifier, SpeechToText, Summarizer, TextToSpeech, Translator,
    UnderstandingCheck,
};
