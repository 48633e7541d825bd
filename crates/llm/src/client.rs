//! OpenAI-compatible chat completions client

use std::time::Duration;

use serde::{Deserialize, Serialize};

use loan_advisor_config::LlmConfig;

use crate::prompt::Message;
use crate::LlmError;

/// Per-call generation parameters
#[derive(Debug, Clone, Copy)]
pub struct CompletionParams {
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl CompletionParams {
    /// Deterministic-ish settings for translation and classification
    pub fn utility(max_tokens: u32) -> Self {
        Self {
            temperature: 0.3,
            max_tokens: Some(max_tokens),
        }
    }

    /// Settings for free-form advisor chat
    pub fn chat() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Chat completions client
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    /// Model for free-form advisor chat
    pub chat_model: String,
    /// Model for translation, classification, summarization
    pub utility_model: String,
}

impl OpenAiClient {
    /// Create a client from configuration
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            chat_model: config.chat_model.clone(),
            utility_model: config.utility_model.clone(),
        })
    }

    /// Run a chat completion and return the first choice's content
    pub async fn complete(
        &self,
        model: &str,
        messages: &[Message],
        params: CompletionParams,
    ) -> Result<String, LlmError> {
        let request = CompletionRequest {
            model,
            messages,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::ApiStatus(status.as_u16()));
        }

        let body: CompletionResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or(LlmError::EmptyResponse)?;

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let messages = vec![Message::system("s"), Message::user("u")];
        let request = CompletionRequest {
            model: "gpt-3.5-turbo",
            messages: &messages,
            temperature: 0.3,
            max_tokens: Some(10),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["max_tokens"], 10);
        assert_eq!(json["messages"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_max_tokens_omitted() {
        let messages = vec![Message::user("u")];
        let request = CompletionRequest {
            model: "gpt-4",
            messages: &messages,
            temperature: 0.7,
            max_tokens: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("max_tokens").is_none());
    }

    #[test]
    fn test_response_parsing() {
        let raw = r#"{"choices":[{"message":{"content":" hello "}}]}"#;
        let parsed: CompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some(" hello ")
        );
    }
}
