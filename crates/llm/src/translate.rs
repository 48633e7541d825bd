//! LLM-backed translation

use std::sync::Arc;

use async_trait::async_trait;

use loan_advisor_core::{Language, Result, Translator};

use crate::client::{CompletionParams, OpenAiClient};
use crate::prompt::Message;

/// Translator backed by the chat completions API
///
/// Callers on the conversation path are expected to fall back to the
/// source text when `translate` errors; this type does not swallow
/// failures itself.
pub struct LlmTranslator {
    client: Arc<OpenAiClient>,
}

impl LlmTranslator {
    pub fn new(client: Arc<OpenAiClient>) -> Self {
        Self { client }
    }

    /// Translate arbitrary text into English, for classifier input
    pub async fn to_english(&self, text: &str, source: Language) -> Result<String> {
        if source.is_base() {
            return Ok(text.to_string());
        }

        let messages = [
            Message::system(format!(
                "You are a helpful assistant that translates text from {} to English. \
                 Translate the following text to English, maintaining the same meaning. \
                 Only respond with the translated text, nothing else.",
                source.name()
            )),
            Message::user(text),
        ];

        let translated = self
            .client
            .complete(
                &self.client.utility_model,
                &messages,
                CompletionParams::utility(200),
            )
            .await?;

        Ok(translated)
    }
}

#[async_trait]
impl Translator for LlmTranslator {
    async fn translate(&self, text: &str, target: Language) -> Result<String> {
        if target.is_base() {
            return Ok(text.to_string());
        }

        let messages = [
            Message::system(format!(
                "You are a helpful assistant that translates text to {lang}. \
                 Translate the following text to {lang}, maintaining the same formatting \
                 and structure. Only respond with the translated text, nothing else.",
                lang = target.name()
            )),
            Message::user(text),
        ];

        let translated = self
            .client
            .complete(
                &self.client.utility_model,
                &messages,
                CompletionParams::utility(1_000),
            )
            .await?;

        Ok(translated)
    }
}
