//! Block-synchronous synthesis engines.
//!
//! The capture loop only ever sees [`EngineStepper`]: step one block, read
//! the block back, repeat until the engine reports it is done. The built-in
//! engines here exist so the pipeline can be driven without an external
//! synthesis host.

mod glicol_engine;
mod operator;
mod voices;

pub use glicol_engine::{GlicolEngine, GLICOL_COMPOSITION};
pub use operator::{CosineTable, FeedbackKind, FeedbackOperator, Oscillator};
pub use voices::{FeedbackPairEngine, StackedFmEngine};

/// Outcome of advancing an engine by one block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// More blocks follow
    Continue,
    /// The block just produced is the last of the performance
    Finished,
    /// Engine-defined failure code
    Failed(i32),
}

/// A synthesis engine driven one block (ksmps frames) at a time.
///
/// `current_block` is interleaved (sample 0 = channel 0 of frame 0, sample 1
/// = channel 1 of frame 0, ...) and is only valid between one `step` and the
/// next.
pub trait EngineStepper {
    /// Sample rate (Hz)
    fn sample_rate(&self) -> f64;

    /// Number of interleaved output channels (>= 1)
    fn channels(&self) -> usize;

    /// Frames per block (>= 1)
    fn ksmps(&self) -> usize;

    /// Advance by exactly one block
    fn step(&mut self) -> StepStatus;

    /// Most recent output block, `ksmps × channels` samples
    fn current_block(&self) -> &[f64];
}

/// Counts performed frames against a fixed score length
#[derive(Debug, Clone)]
pub(crate) struct Performance {
    total_frames: usize,
    frames_done: usize,
}

impl Performance {
    pub(crate) fn new(total_frames: usize) -> Self {
        Self {
            total_frames,
            frames_done: 0,
        }
    }

    /// Record one block and report whether the score is complete
    pub(crate) fn advance(&mut self, frames: usize) -> StepStatus {
        self.frames_done += frames;
        if self.frames_done >= self.total_frames {
            StepStatus::Finished
        } else {
            StepStatus::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_performance_finishes_on_last_block() {
        let mut perf = Performance::new(10);
        assert_eq!(perf.advance(4), StepStatus::Continue);
        assert_eq!(perf.advance(4), StepStatus::Continue);
        assert_eq!(perf.advance(4), StepStatus::Finished);
    }

    #[test]
    fn test_performance_exact_multiple() {
        let mut perf = Performance::new(8);
        assert_eq!(perf.advance(4), StepStatus::Continue);
        assert_eq!(perf.advance(4), StepStatus::Finished);
    }
}
