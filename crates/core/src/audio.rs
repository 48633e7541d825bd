//! Audio frame types for the turn-taking recorder

/// One frame of mono audio samples
#[derive(Debug, Clone)]
pub struct AudioFrame {
    /// PCM samples, normalized to [-1.0, 1.0]
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Offset from stream start in milliseconds
    pub timestamp_ms: u64,
}

impl AudioFrame {
    pub fn new(samples: Vec<f32>, sample_rate: u32, timestamp_ms: u64) -> Self {
        Self {
            samples,
            sample_rate,
            timestamp_ms,
        }
    }

    /// Mean absolute amplitude of the frame
    ///
    /// This is the energy measure the recorder thresholds on for
    /// speaking/silent decisions.
    pub fn mean_abs(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sum: f32 = self.samples.iter().map(|s| s.abs()).sum();
        sum / self.samples.len() as f32
    }

    /// Frame duration in milliseconds
    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        (self.samples.len() as u64 * 1000) / self.sample_rate as u64
    }
}
