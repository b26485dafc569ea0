//! Cycle-aligned analysis windows.

use super::axis::time_axis;

/// Interleaved sample span `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionWindow {
    pub start: usize,
    pub end: usize,
}

impl RegionWindow {
    /// Interleaved length of the window
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Per-channel frame count
    pub fn frames(&self, channels: usize) -> usize {
        self.len() / channels
    }

    /// Time in seconds of each frame in the window, measured from the start
    /// of the capture
    pub fn times(&self, channels: usize, sample_rate: f64) -> Vec<f64> {
        let first = self.start / channels;
        let mut axis = time_axis(self.end / channels, sample_rate);
        axis.drain(..first.min(axis.len()));
        axis
    }
}

/// Window of `cycles` periods of `frequency_hz`, starting `start_cycle`
/// periods in. Periods are rounded to whole frames (half away from zero).
///
/// Panics if `frequency_hz` is not positive and finite or `channels` is 0.
pub fn window(
    sample_rate: f64,
    channels: usize,
    frequency_hz: f64,
    cycles: usize,
    start_cycle: usize,
) -> RegionWindow {
    assert!(
        frequency_hz.is_finite() && frequency_hz > 0.0,
        "frequency must be > 0, got {frequency_hz}"
    );
    assert!(sample_rate.is_finite() && sample_rate > 0.0, "sample rate must be > 0");
    assert!(channels >= 1, "channel count must be >= 1");

    let period = (sample_rate / frequency_hz).round() as usize;
    let start = start_cycle * channels * period;
    let end = start + cycles * channels * period;
    RegionWindow { start, end }
}
