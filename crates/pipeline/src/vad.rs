//! Energy-threshold voice activity detection

use loan_advisor_core::AudioFrame;

/// Binary speaking/silent state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VadState {
    #[default]
    Silent,
    Speaking,
}

/// Frame-level voice activity detector
///
/// Classifies each frame by its mean absolute amplitude against a fixed
/// threshold. No smoothing happens here; the recorder applies the
/// silence hang that keeps word gaps from splitting utterances.
#[derive(Debug, Clone, Copy)]
pub struct EnergyVad {
    threshold: f32,
}

impl EnergyVad {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// Classify a single frame
    pub fn assess(&self, frame: &AudioFrame) -> VadState {
        if frame.mean_abs() > self.threshold {
            VadState::Speaking
        } else {
            VadState::Silent
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(amplitude: f32) -> AudioFrame {
        AudioFrame::new(vec![amplitude; 160], 16_000, 0)
    }

    #[test]
    fn test_loud_frame_is_speaking() {
        let vad = EnergyVad::new(0.02);
        assert_eq!(vad.assess(&frame(0.5)), VadState::Speaking);
    }

    #[test]
    fn test_quiet_frame_is_silent() {
        let vad = EnergyVad::new(0.02);
        assert_eq!(vad.assess(&frame(0.01)), VadState::Silent);
        assert_eq!(vad.assess(&frame(0.0)), VadState::Silent);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let vad = EnergyVad::new(0.02);
        assert_eq!(vad.assess(&frame(0.02)), VadState::Silent);
    }
}
