//! Capture buffer configuration.

use crate::capture::CapturePolicy;
use crate::error::{AnalysisError, Result};

/// How much engine output to keep and when to stop stepping
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Buffer length in seconds of interleaved frames
    /// 1.0 = `sample_rate × channels` samples
    pub capacity_secs: f64,

    /// Loop termination policy
    pub policy: CapturePolicy,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            capacity_secs: 1.0,
            policy: CapturePolicy::UntilFinished,
        }
    }
}

impl CaptureConfig {
    /// Buffer capacity in interleaved samples
    pub fn capacity(&self, sample_rate_hz: f64, channels: usize) -> usize {
        (self.capacity_secs * sample_rate_hz).round() as usize * channels
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.capacity_secs > 0.0) {
            return Err(AnalysisError::Config(format!(
                "capture length must be > 0, got {}",
                self.capacity_secs
            )));
        }
        Ok(())
    }
}
