//! Built-in engine configuration and constants.

use crate::error::{AnalysisError, Result};

/// Parameters shared by the built-in engines
#[derive(Debug, Clone)]
pub struct EngineParams {
    /// Engine sample rate (Hz)
    /// Feedback plots used very high rates (5-10 MHz) to keep aliasing out
    /// of view; 44100 is the everyday default.
    pub sample_rate_hz: f64,

    /// Block size (samples per channel per step)
    pub ksmps: usize,

    /// Performance length (seconds); the engine reports completion after it
    pub duration_secs: f64,

    /// Output amplitude (linear, 1.0 = full scale)
    pub amplitude: f64,

    /// Carrier frequency (Hz)
    pub frequency_hz: f64,

    /// Feedback gain (dimensionless modulation index)
    pub feedback_gain: f64,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            sample_rate_hz: 44100.0,
            ksmps: 64,
            duration_secs: 1.0,
            amplitude: 1.0,
            frequency_hz: 500.0,
            feedback_gain: 1.0,
        }
    }
}

impl EngineParams {
    /// Total number of frames the engine performs
    pub fn total_frames(&self) -> usize {
        (self.duration_secs * self.sample_rate_hz).round() as usize
    }

    /// Validate configuration (positive rate, non-empty blocks, etc.)
    pub fn validate(&self) -> Result<()> {
        if !(self.sample_rate_hz > 0.0) {
            return Err(AnalysisError::Config(format!(
                "sample rate must be > 0, got {}",
                self.sample_rate_hz
            )));
        }
        if self.ksmps == 0 {
            return Err(AnalysisError::Config("ksmps must be >= 1".to_string()));
        }
        if !(self.duration_secs > 0.0) {
            return Err(AnalysisError::Config(format!(
                "duration must be > 0, got {}",
                self.duration_secs
            )));
        }
        if !(self.frequency_hz > 0.0) {
            return Err(AnalysisError::Config(format!(
                "frequency must be > 0, got {}",
                self.frequency_hz
            )));
        }
        Ok(())
    }
}

/// Extra settings for the stacked FM engine
#[derive(Debug, Clone)]
pub struct StackedFmParams {
    /// Modulator frequency for both stack levels (Hz)
    pub mod_frequency_hz: f64,

    /// Zero-level modulation index
    pub index0: f64,

    /// First-level modulation index
    pub index1: f64,
}

impl Default for StackedFmParams {
    fn default() -> Self {
        Self {
            mod_frequency_hz: 500.0,
            index0: 3.0,
            index1: 2.0,
        }
    }
}

/// Engine constants (compile-time)
pub mod engine_constants {
    /// Glicol block size (samples per channel per step)
    pub const GLICOL_BLOCK_SIZE: usize = 128;

    /// Cosine table length, excluding the guard point
    pub const COSINE_TABLE_SIZE: usize = 1024;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_validate() {
        assert!(EngineParams::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_ksmps_and_frequency() {
        let params = EngineParams {
            ksmps: 0,
            ..EngineParams::default()
        };
        assert!(params.validate().is_err());

        let params = EngineParams {
            frequency_hz: 0.0,
            ..EngineParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_total_frames() {
        let params = EngineParams {
            sample_rate_hz: 10000.0,
            duration_secs: 0.25,
            ..EngineParams::default()
        };
        assert_eq!(params.total_frames(), 2500);
    }
}
