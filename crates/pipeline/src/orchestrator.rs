//! Voice session orchestrator
//!
//! Owns the turn-taking recorder and the speech clients for one client
//! session. Only one recording is active at a time, and starting
//! playback always preempts recording so the agent never transcribes
//! its own voice.

use std::sync::Arc;

use parking_lot::Mutex;

use loan_advisor_core::{AudioFrame, Language, SpeechToText, TextToSpeech};

use crate::recorder::{TurnTakingRecorder, Utterance};
use crate::PipelineError;

/// Retry prompt used when an utterance yields no usable transcript
pub const RETRY_PROMPT: &str =
    "I'm sorry, I couldn't hear you clearly. Could you please try again?";

/// Outcome of transcribing an utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscribeOutcome {
    /// Usable transcript text
    Text(String),
    /// Nothing usable; the caller should speak the retry prompt
    Retry,
}

/// Per-session voice orchestrator
pub struct VoiceSession {
    recorder: Mutex<TurnTakingRecorder>,
    recording: Mutex<bool>,
    playing: Mutex<bool>,
    stt: Arc<dyn SpeechToText>,
    tts: Arc<dyn TextToSpeech>,
    language: Language,
}

impl VoiceSession {
    pub fn new(
        recorder: TurnTakingRecorder,
        stt: Arc<dyn SpeechToText>,
        tts: Arc<dyn TextToSpeech>,
        language: Language,
    ) -> Self {
        Self {
            recorder: Mutex::new(recorder),
            recording: Mutex::new(false),
            playing: Mutex::new(false),
            stt,
            tts,
            language,
        }
    }

    /// Is a recording currently active?
    pub fn is_recording(&self) -> bool {
        *self.recording.lock()
    }

    /// Is playback currently active?
    pub fn is_playing(&self) -> bool {
        *self.playing.lock()
    }

    /// Start recording; refused while playback is active
    pub fn start_recording(&self) -> Result<(), PipelineError> {
        if *self.playing.lock() {
            return Err(PipelineError::PlaybackActive);
        }
        self.recorder.lock().reset();
        *self.recording.lock() = true;
        Ok(())
    }

    /// Feed one audio frame; returns a completed utterance, if any
    ///
    /// Frames arriving while not recording are dropped.
    pub fn push_frame(&self, frame: AudioFrame) -> Option<Utterance> {
        if !*self.recording.lock() {
            return None;
        }

        let utterance = self.recorder.lock().push_frame(frame);
        if utterance.is_some() {
            *self.recording.lock() = false;
        }
        utterance
    }

    /// Adapt the recorder timeout to the previous agent reply
    pub fn adapt_to_reply(&self, reply: &str) {
        self.recorder.lock().adapt_to_reply(reply);
    }

    /// Transcribe a completed utterance
    ///
    /// Fail-open: empty utterances, transcription errors, and empty
    /// transcripts all resolve to a retry prompt, never an error.
    pub async fn transcribe(&self, utterance: &Utterance) -> TranscribeOutcome {
        if utterance.is_empty() {
            return TranscribeOutcome::Retry;
        }

        let audio = encode_wav(&utterance.samples(), sample_rate(utterance));

        match self.stt.transcribe(&audio, self.language).await {
            Ok(transcript) if !transcript.is_empty() => TranscribeOutcome::Text(transcript.text),
            Ok(_) => TranscribeOutcome::Retry,
            Err(e) => {
                tracing::warn!(error = %e, "transcription failed, prompting retry");
                TranscribeOutcome::Retry
            }
        }
    }

    /// Synthesize and begin playing an agent reply
    ///
    /// Preempts any active recording and discards its partial buffer.
    /// TTS failure degrades to silent playback (empty clip list); the
    /// reply text still reaches the user through the chat channel.
    pub async fn speak(&self, text: &str) -> Vec<Vec<u8>> {
        {
            let mut recording = self.recording.lock();
            if *recording {
                *recording = false;
                self.recorder.lock().reset();
            }
            *self.playing.lock() = true;
        }

        self.adapt_to_reply(text);

        match self.tts.synthesize(text, self.language).await {
            Ok(clips) => clips,
            Err(e) => {
                tracing::warn!(error = %e, "TTS synthesis failed, continuing without audio");
                Vec::new()
            }
        }
    }

    /// Mark playback finished so recording may resume
    pub fn playback_finished(&self) {
        *self.playing.lock() = false;
    }
}

fn sample_rate(utterance: &Utterance) -> u32 {
    utterance
        .frames
        .first()
        .map(|f| f.sample_rate)
        .unwrap_or(16_000)
}

/// Encode f32 samples as a 16-bit mono PCM WAV file
fn encode_wav(samples: &[f32], sample_rate: u32) -> Vec<u8> {
    let data_len = (samples.len() * 2) as u32;
    let mut wav = Vec::with_capacity(44 + samples.len() * 2);

    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&(sample_rate * 2).to_le_bytes());
    wav.extend_from_slice(&2u16.to_le_bytes());
    wav.extend_from_slice(&16u16.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());

    for sample in samples {
        let clamped = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        wav.extend_from_slice(&clamped.to_le_bytes());
    }

    wav
}
