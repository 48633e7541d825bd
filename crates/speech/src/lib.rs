//! Speech API clients
//!
//! HTTP clients for the external speech services: multipart
//! speech-to-text upload and JSON text-to-speech with base64 WAV
//! payloads, plus sentence-aware chunking to the TTS size limit.

pub mod chunker;
pub mod stt;
pub mod tts;

pub use chunker::chunk_text;
pub use stt::SarvamStt;
pub use tts::SarvamTts;

use thiserror::Error;

/// Speech API errors
#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned status {0}")]
    ApiStatus(u16),

    #[error("Invalid audio payload: {0}")]
    InvalidAudio(String),
}

impl From<SpeechError> for loan_advisor_core::Error {
    fn from(err: SpeechError) -> Self {
        match err {
            SpeechError::InvalidAudio(msg) => loan_advisor_core::Error::Tts(msg),
            other => loan_advisor_core::Error::Stt(other.to_string()),
        }
    }
}
