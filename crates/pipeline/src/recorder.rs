//! Turn-taking recorder
//!
//! Segments a continuous audio stream into utterances. An utterance is
//! emitted when the speaker falls silent for the hang period, or when
//! the hard timeout fires. The timeout adapts to the length of the
//! previous agent reply so users get more time to answer longer
//! prompts; it is bounded between the configured floor and ceiling and
//! never reacts to network or processing state.

use unicode_segmentation::UnicodeSegmentation;

use loan_advisor_config::RecorderConfig;
use loan_advisor_core::AudioFrame;

use crate::vad::{EnergyVad, VadState};

/// One buffered utterance, ready for transcription
#[derive(Debug, Clone)]
pub struct Utterance {
    /// Buffered frames in arrival order
    pub frames: Vec<AudioFrame>,
    /// Total buffered duration in milliseconds
    pub duration_ms: u64,
    /// Did the buffer ever contain speech?
    pub has_speech: bool,
}

impl Utterance {
    /// Utterances with no speech content produce a retry prompt rather
    /// than an STT call.
    pub fn is_empty(&self) -> bool {
        !self.has_speech || self.frames.is_empty()
    }

    /// Concatenated PCM samples across all frames
    pub fn samples(&self) -> Vec<f32> {
        self.frames
            .iter()
            .flat_map(|f| f.samples.iter().copied())
            .collect()
    }
}

/// Turn-taking recorder over an audio frame stream
pub struct TurnTakingRecorder {
    config: RecorderConfig,
    vad: EnergyVad,
    state: VadState,
    buffer: Vec<AudioFrame>,
    /// Milliseconds of continuous silence since the last speech frame
    silence_ms: u64,
    /// Milliseconds since recording started or the last emission
    elapsed_ms: u64,
    /// Current adaptive hard timeout
    timeout_ms: u64,
    has_speech: bool,
}

impl TurnTakingRecorder {
    pub fn new(config: RecorderConfig) -> Self {
        Self {
            vad: EnergyVad::new(config.energy_threshold),
            state: VadState::Silent,
            buffer: Vec::new(),
            silence_ms: 0,
            elapsed_ms: 0,
            timeout_ms: config.base_timeout_ms,
            has_speech: false,
            config,
        }
    }

    /// Current speaking/silent state
    pub fn state(&self) -> VadState {
        self.state
    }

    /// Current hard timeout in milliseconds
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Adapt the hard timeout to the previous agent reply
    ///
    /// Longer prompts earn the user proportionally more answer time,
    /// clamped to [base, max].
    pub fn adapt_to_reply(&mut self, reply: &str) {
        let words = reply.unicode_words().count() as u64;
        let timeout = self.config.base_timeout_ms + words * self.config.per_word_timeout_ms;
        self.timeout_ms = timeout.min(self.config.max_timeout_ms);
    }

    /// Feed one frame; returns an utterance when one completes
    pub fn push_frame(&mut self, frame: AudioFrame) -> Option<Utterance> {
        let frame_ms = frame.duration_ms();
        self.elapsed_ms += frame_ms;

        match self.vad.assess(&frame) {
            VadState::Speaking => {
                self.state = VadState::Speaking;
                self.silence_ms = 0;
                self.has_speech = true;
                self.buffer.push(frame);
            }
            VadState::Silent => {
                if self.state == VadState::Speaking {
                    // Trailing silence stays in the buffer so the
                    // utterance is not clipped mid-word.
                    self.silence_ms += frame_ms;
                    self.buffer.push(frame);

                    if self.silence_ms >= self.config.silence_hang_ms {
                        return Some(self.emit());
                    }
                }
                // Leading silence is dropped.
            }
        }

        if self.elapsed_ms >= self.timeout_ms {
            return Some(self.emit());
        }

        None
    }

    /// Discard any buffered audio and reset to idle
    ///
    /// Used when playback preempts recording, so the agent's own voice
    /// never reaches transcription.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.state = VadState::Silent;
        self.silence_ms = 0;
        self.elapsed_ms = 0;
        self.has_speech = false;
    }

    fn emit(&mut self) -> Utterance {
        let frames = std::mem::take(&mut self.buffer);
        let duration_ms = frames.iter().map(|f| f.duration_ms()).sum();
        let utterance = Utterance {
            frames,
            duration_ms,
            has_speech: self.has_speech,
        };

        self.state = VadState::Silent;
        self.silence_ms = 0;
        self.elapsed_ms = 0;
        self.has_speech = false;

        utterance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RecorderConfig {
        RecorderConfig {
            energy_threshold: 0.02,
            silence_hang_ms: 300,
            base_timeout_ms: 5_000,
            per_word_timeout_ms: 200,
            max_timeout_ms: 30_000,
        }
    }

    /// 100ms frame at the given amplitude
    fn frame(amplitude: f32) -> AudioFrame {
        AudioFrame::new(vec![amplitude; 1_600], 16_000, 0)
    }

    #[test]
    fn test_emits_after_silence_hang() {
        let mut recorder = TurnTakingRecorder::new(config());

        for _ in 0..5 {
            assert!(recorder.push_frame(frame(0.5)).is_none());
        }
        assert_eq!(recorder.state(), VadState::Speaking);

        // 300ms hang = 3 silent frames
        assert!(recorder.push_frame(frame(0.0)).is_none());
        assert!(recorder.push_frame(frame(0.0)).is_none());
        let utterance = recorder.push_frame(frame(0.0)).expect("utterance");

        assert!(utterance.has_speech);
        assert_eq!(utterance.frames.len(), 8);
        assert_eq!(utterance.duration_ms, 800);
        assert_eq!(recorder.state(), VadState::Silent);
    }

    #[test]
    fn test_word_gap_does_not_split_utterance() {
        let mut recorder = TurnTakingRecorder::new(config());

        recorder.push_frame(frame(0.5));
        // 200ms gap, below the 300ms hang
        recorder.push_frame(frame(0.0));
        recorder.push_frame(frame(0.0));
        assert!(recorder.push_frame(frame(0.5)).is_none());
        assert_eq!(recorder.state(), VadState::Speaking);
    }

    #[test]
    fn test_leading_silence_dropped() {
        let mut recorder = TurnTakingRecorder::new(config());

        recorder.push_frame(frame(0.0));
        recorder.push_frame(frame(0.0));
        recorder.push_frame(frame(0.5));
        recorder.push_frame(frame(0.0));
        recorder.push_frame(frame(0.0));
        let utterance = recorder.push_frame(frame(0.0)).expect("utterance");

        // Only the speech frame and trailing silence are buffered
        assert_eq!(utterance.frames.len(), 4);
    }

    #[test]
    fn test_timeout_emits_empty_utterance() {
        let mut recorder = TurnTakingRecorder::new(config());

        let mut emitted = None;
        for _ in 0..50 {
            if let Some(u) = recorder.push_frame(frame(0.0)) {
                emitted = Some(u);
                break;
            }
        }

        let utterance = emitted.expect("timeout should emit");
        assert!(utterance.is_empty());
    }

    #[test]
    fn test_adaptive_timeout_bounds() {
        let mut recorder = TurnTakingRecorder::new(config());
        assert_eq!(recorder.timeout_ms(), 5_000);

        recorder.adapt_to_reply("please confirm");
        assert_eq!(recorder.timeout_ms(), 5_400);

        let long_reply = "word ".repeat(500);
        recorder.adapt_to_reply(&long_reply);
        assert_eq!(recorder.timeout_ms(), 30_000);

        recorder.adapt_to_reply("");
        assert_eq!(recorder.timeout_ms(), 5_000);
    }

    #[test]
    fn test_reset_discards_buffer() {
        let mut recorder = TurnTakingRecorder::new(config());

        recorder.push_frame(frame(0.5));
        recorder.reset();

        recorder.push_frame(frame(0.0));
        recorder.push_frame(frame(0.0));
        assert!(recorder.push_frame(frame(0.0)).is_none());
        assert_eq!(recorder.state(), VadState::Silent);
    }
}
