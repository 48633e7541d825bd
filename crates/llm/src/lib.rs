//! LLM integration for the loan advisor
//!
//! Provides an OpenAI-compatible chat-completions client and the
//! operations built on top of it: translation, loan-type classification,
//! understanding checks, free-form advisor chat, and conversation
//! summarization. Everything on the conversation path fails open.

pub mod chat;
pub mod classify;
pub mod client;
pub mod prompt;
pub mod summarize;
pub mod translate;

pub use chat::LoanAdvisorChat;
pub use classify::{LlmLoanClassifier, LlmUnderstandingCheck};
pub use client::{CompletionParams, OpenAiClient};
pub use prompt::{Message, Role};
pub use summarize::LlmSummarizer;
pub use translate::LlmTranslator;

use thiserror::Error;

/// LLM errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned status {0}")]
    ApiStatus(u16),

    #[error("Empty completion response")]
    EmptyResponse,

    #[error("Failed to parse completion: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<LlmError> for loan_advisor_core::Error {
    fn from(err: LlmError) -> Self {
        loan_advisor_core::Error::Llm(err.to_string())
    }
}
