//! Conversation summarization

use std::sync::Arc;

use async_trait::async_trait;

use loan_advisor_core::{ChatMessage, ChatSummary, Result, Summarizer};

use crate::client::{CompletionParams, OpenAiClient};
use crate::prompt::Message;

/// Summarizer backed by the chat completions API
pub struct LlmSummarizer {
    client: Arc<OpenAiClient>,
}

impl LlmSummarizer {
    pub fn new(client: Arc<OpenAiClient>) -> Self {
        Self { client }
    }
}

/// Strip a Markdown code fence if the model wrapped its JSON in one
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

#[async_trait]
impl Summarizer for LlmSummarizer {
    async fn summarize(&self, messages: &[ChatMessage]) -> Result<ChatSummary> {
        let transcript = serde_json::to_string(messages)?;

        let prompt = format!(
            r#"Analyze this chat conversation and generate:
1. A concise summary
2. Key points to remember (single or two words)
3. The flow of the conversation

Return ONLY the JSON object with this structure:
{{
  "summary": "string",
  "keyPoints": ["string"],
  "flow": ["string"]
}}

Here is the chat conversation: {transcript}"#
        );

        let request = [
            Message::system(
                "You are a helpful assistant that returns structured JSON data.",
            ),
            Message::user(prompt),
        ];

        let reply = self
            .client
            .complete(
                &self.client.utility_model,
                &request,
                CompletionParams::utility(1_000),
            )
            .await
            .map_err(loan_advisor_core::Error::from)?;

        let summary: ChatSummary = serde_json::from_str(strip_code_fence(&reply))?;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn test_summary_parses_camel_case() {
        let raw = r#"{"summary":"s","keyPoints":["home loan"],"flow":["greeting","loan type"]}"#;
        let parsed: ChatSummary = serde_json::from_str(strip_code_fence(raw)).unwrap();
        assert_eq!(parsed.key_points, vec!["home loan"]);
        assert_eq!(parsed.flow.len(), 2);
    }
}
