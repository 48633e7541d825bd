//! Voice pipeline for the loan advisor
//!
//! Turn-taking over a raw audio stream: energy-threshold voice activity
//! detection, utterance segmentation with an adaptive hard timeout, and
//! a session orchestrator in which speech playback always preempts
//! recording.

pub mod orchestrator;
pub mod recorder;
pub mod vad;

pub use orchestrator::{TranscribeOutcome, VoiceSession};
pub use recorder::{TurnTakingRecorder, Utterance};
pub use vad::{EnergyVad, VadState};

use thiserror::Error;

/// Pipeline errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PipelineError {
    #[error("Playback is active")]
    PlaybackActive,
}
