//! Core audio types

/// A block of mono 16-bit PCM at a known sample rate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFrame {
    /// Audio samples as 16-bit PCM
    pub samples: Vec<i16>,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl AudioFrame {
    /// Create a new audio frame
    pub fn new(samples: Vec<i16>, sample_rate: u32) -> Self {
        Self { samples, sample_rate }
    }

    /// Number of samples in the frame
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True if the frame holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Get the frame duration in milliseconds
    pub fn duration_ms(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        (self.samples.len() as f64 * 1000.0) / self.sample_rate as f64
    }

    /// Consume the frame, returning its samples
    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_duration() {
        let frame = AudioFrame::new(vec![0; 160], 8000);
        assert_eq!(frame.duration_ms(), 20.0);
        assert_eq!(frame.len(), 160);
        assert!(!frame.is_empty());
        assert_eq!(AudioFrame::new(Vec::new(), 0).duration_ms(), 0.0);
    }
}
