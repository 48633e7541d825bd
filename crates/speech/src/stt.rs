//! Speech-to-text client

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use loan_advisor_config::SpeechConfig;
use loan_advisor_core::{Language, Result, SpeechToText, Transcript};

use crate::SpeechError;

#[derive(Debug, Deserialize)]
struct SttResponse {
    transcript: Option<String>,
}

/// Speech-to-text client for the Sarvam-style API
///
/// Uploads recorded utterances as multipart form data and returns the
/// transcript text.
pub struct SarvamStt {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl SarvamStt {
    pub fn new(config: &SpeechConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(SpeechError::Http)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.stt_model.clone(),
        })
    }
}

#[async_trait]
impl SpeechToText for SarvamStt {
    async fn transcribe(&self, audio: &[u8], language: Language) -> Result<Transcript> {
        let file = reqwest::multipart::Part::bytes(audio.to_vec())
            .file_name("utterance.wav")
            .mime_str("audio/wav")
            .map_err(SpeechError::Http)?;

        let form = reqwest::multipart::Form::new()
            .part("file", file)
            .text("model", self.model.clone())
            .text("language_code", language.code())
            .text("with_timestamps", "false");

        let response = self
            .http
            .post(format!("{}/speech-to-text", self.base_url))
            .header("api-subscription-key", &self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(SpeechError::Http)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SpeechError::ApiStatus(status.as_u16()).into());
        }

        let body: SttResponse = response.json().await.map_err(SpeechError::Http)?;

        Ok(Transcript::new(body.transcript.unwrap_or_default()).with_language(language))
    }
}
