//! Analysis window configuration.

use crate::error::{AnalysisError, Result};

/// Region of interest measured in carrier cycles
#[derive(Debug, Clone)]
pub struct RegionConfig {
    /// Number of cycles to show
    pub cycles: usize,

    /// Cycles to skip before the window starts (lets feedback settle)
    pub start_cycle: usize,
}

/// Short-time spectrum settings
#[derive(Debug, Clone)]
pub struct SpectrogramConfig {
    /// Frame length (samples)
    pub fft_size: usize,

    /// Frame advance (samples)
    pub hop: usize,
}

/// Overlap between consecutive frames (samples)
const FRAME_OVERLAP: usize = 128;

impl Default for SpectrogramConfig {
    fn default() -> Self {
        Self::with_fft_size(16384)
    }
}

impl SpectrogramConfig {
    /// Frames of `fft_size` overlapping by 128 samples (a frame size of 128
    /// or less steps by one sample)
    pub fn with_fft_size(fft_size: usize) -> Self {
        Self {
            fft_size,
            hop: fft_size.saturating_sub(FRAME_OVERLAP).max(1),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.fft_size == 0 {
            return Err(AnalysisError::Config("FFT size must be > 0".to_string()));
        }
        if self.hop == 0 {
            return Err(AnalysisError::Config("hop must be > 0".to_string()));
        }
        Ok(())
    }
}
