//! Text-to-speech client

use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};

use loan_advisor_config::SpeechConfig;
use loan_advisor_core::{Language, Result, TextToSpeech};

use crate::chunker::chunk_text;
use crate::SpeechError;

#[derive(Debug, Serialize)]
struct TtsRequest<'a> {
    inputs: [&'a str; 1],
    target_language_code: &'a str,
    speaker: &'a str,
    pace: f32,
    loudness: f32,
}

#[derive(Debug, Deserialize)]
struct TtsResponse {
    audios: Vec<String>,
}

/// Text-to-speech client for the Sarvam-style API
///
/// Long text is chunked on sentence boundaries before upload; chunks
/// synthesize sequentially and a failed chunk is skipped so one bad
/// request never silences the whole reply.
pub struct SarvamTts {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    speaker: String,
    pace: f32,
    loudness: f32,
    chunk_chars: usize,
}

impl SarvamTts {
    pub fn new(config: &SpeechConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(SpeechError::Http)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            speaker: config.tts_speaker.clone(),
            pace: config.tts_pace,
            loudness: config.tts_loudness,
            chunk_chars: config.tts_chunk_chars,
        })
    }

    async fn synthesize_chunk(&self, chunk: &str, language: Language) -> Result<Vec<u8>> {
        let request = TtsRequest {
            inputs: [chunk],
            target_language_code: language.code(),
            speaker: &self.speaker,
            pace: self.pace,
            loudness: self.loudness,
        };

        let response = self
            .http
            .post(format!("{}/text-to-speech", self.base_url))
            .header("api-subscription-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(SpeechError::Http)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SpeechError::ApiStatus(status.as_u16()).into());
        }

        let body: TtsResponse = response.json().await.map_err(SpeechError::Http)?;
        let encoded = body
            .audios
            .into_iter()
            .next()
            .ok_or_else(|| SpeechError::InvalidAudio("no audio in response".to_string()))?;

        BASE64
            .decode(encoded.as_bytes())
            .map_err(|e| SpeechError::InvalidAudio(e.to_string()).into())
    }
}

#[async_trait]
impl TextToSpeech for SarvamTts {
    async fn synthesize(&self, text: &str, language: Language) -> Result<Vec<Vec<u8>>> {
        let chunks = chunk_text(text, self.chunk_chars);
        let mut clips = Vec::with_capacity(chunks.len());

        for chunk in &chunks {
            match self.synthesize_chunk(chunk, language).await {
                Ok(clip) => clips.push(clip),
                Err(e) => {
                    // One bad chunk must not silence the rest of the reply
                    tracing::warn!(error = %e, "TTS chunk failed, skipping");
                }
            }
        }

        Ok(clips)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = TtsRequest {
            inputs: ["Hello"],
            target_language_code: "hi-IN",
            speaker: "meera",
            pace: 1.0,
            loudness: 1.0,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["inputs"][0], "Hello");
        assert_eq!(json["target_language_code"], "hi-IN");
        assert_eq!(json["speaker"], "meera");
    }

    #[test]
    fn test_response_parsing() {
        let parsed: TtsResponse = serde_json::from_str(r#"{"audios":["aGVsbG8="]}"#).unwrap();
        assert_eq!(parsed.audios.len(), 1);
        assert_eq!(BASE64.decode(&parsed.audios[0]).unwrap(), b"hello");
    }
}
