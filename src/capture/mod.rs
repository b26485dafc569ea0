//! Fixed-capacity capture of interleaved engine output.
//!
//! The buffer is written only by [`drive`]; once the loop returns, it is
//! handed out read-only to the channel and spectrum views.

use crate::engine::{EngineStepper, StepStatus};
use crate::error::{AnalysisError, Result};

/// When the capture loop stops stepping the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CapturePolicy {
    /// Keep stepping until the engine finishes, dropping samples past
    /// capacity
    #[default]
    UntilFinished,
    /// Stop as soon as the buffer is full (or the engine finishes first)
    UntilFull,
}

/// Pre-zeroed interleaved sample storage
#[derive(Debug, Clone)]
pub struct CaptureBuffer {
    samples: Vec<f64>,
    channels: usize,
    sample_rate: f64,
}

impl CaptureBuffer {
    pub fn new(capacity: usize, channels: usize, sample_rate: f64) -> Self {
        assert!(channels >= 1, "channel count must be >= 1");
        Self {
            samples: vec![0.0; capacity],
            channels,
            sample_rate,
        }
    }

    /// Wrap samples captured elsewhere
    pub fn from_samples(samples: Vec<f64>, channels: usize, sample_rate: f64) -> Self {
        assert!(channels >= 1, "channel count must be >= 1");
        Self {
            samples,
            channels,
            sample_rate,
        }
    }

    /// One second of interleaved output for `engine`
    pub fn for_engine(engine: &dyn EngineStepper) -> Self {
        let capacity = engine.sample_rate().round() as usize * engine.channels();
        Self::new(capacity, engine.channels(), engine.sample_rate())
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }
}

/// Copy `block` into `buffer` at `offset`, silently dropping whatever
/// would land past the end. Returns the number of samples copied.
pub fn capture(buffer: &mut [f64], offset: usize, block: &[f64]) -> usize {
    if offset >= buffer.len() {
        return 0;
    }
    let n = block.len().min(buffer.len() - offset);
    buffer[offset..offset + n].copy_from_slice(&block[..n]);
    n
}

/// Summary of one capture run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureReport {
    /// Total interleaved samples the engine produced
    pub write_offset: usize,
    /// Engine steps taken
    pub blocks: usize,
    /// Samples actually stored
    pub captured: usize,
}

/// Step `engine` block by block into `buffer`.
///
/// With [`CapturePolicy::UntilFinished`] the loop runs until the engine
/// reports completion regardless of how full the buffer is, so the engine
/// must be given a finite score. A failed step aborts the run; the failing
/// block is not copied.
pub fn drive(
    engine: &mut dyn EngineStepper,
    buffer: &mut CaptureBuffer,
    policy: CapturePolicy,
) -> Result<CaptureReport> {
    let mut report = CaptureReport {
        write_offset: 0,
        blocks: 0,
        captured: 0,
    };

    loop {
        let status = engine.step();
        report.blocks += 1;
        if let StepStatus::Failed(code) = status {
            return Err(AnalysisError::EngineStep {
                code,
                offset: report.write_offset,
            });
        }

        let block = engine.current_block();
        report.captured += capture(&mut buffer.samples, report.write_offset, block);
        report.write_offset += block.len();

        if status != StepStatus::Continue {
            break;
        }
        if policy == CapturePolicy::UntilFull && report.write_offset >= buffer.len() {
            break;
        }
    }

    log::debug!(
        "Captured {}/{} samples in {} blocks ({} produced)",
        report.captured,
        buffer.len(),
        report.blocks,
        report.write_offset
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Engine that replays a fixed list of blocks, then a final status
    struct ScriptedEngine {
        blocks: Vec<Vec<f64>>,
        last: StepStatus,
        index: usize,
        current: Vec<f64>,
    }

    impl ScriptedEngine {
        fn new(blocks: Vec<Vec<f64>>, last: StepStatus) -> Self {
            Self {
                blocks,
                last,
                index: 0,
                current: Vec::new(),
            }
        }
    }

    impl EngineStepper for ScriptedEngine {
        fn sample_rate(&self) -> f64 {
            4.0
        }

        fn channels(&self) -> usize {
            2
        }

        fn ksmps(&self) -> usize {
            2
        }

        fn step(&mut self) -> StepStatus {
            self.current = self.blocks[self.index].clone();
            self.index += 1;
            if self.index == self.blocks.len() {
                self.last
            } else {
                StepStatus::Continue
            }
        }

        fn current_block(&self) -> &[f64] {
            &self.current
        }
    }

    fn counting_blocks(count: usize, len: usize) -> Vec<Vec<f64>> {
        (0..count)
            .map(|b| (0..len).map(|i| (b * len + i) as f64 + 1.0).collect())
            .collect()
    }

    #[test]
    fn test_capture_truncates() {
        let mut buf = vec![0.0; 5];
        assert_eq!(capture(&mut buf, 0, &[1.0, 2.0, 3.0]), 3);
        assert_eq!(capture(&mut buf, 3, &[4.0, 5.0, 6.0]), 2);
        assert_eq!(capture(&mut buf, 5, &[7.0]), 0);
        assert_eq!(capture(&mut buf, 99, &[7.0]), 0);
        assert_eq!(buf, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_drive_matches_truncated_concatenation() {
        let blocks = counting_blocks(5, 4);
        let expected: Vec<f64> = blocks.concat().into_iter().take(10).collect();

        let mut engine = ScriptedEngine::new(blocks, StepStatus::Finished);
        let mut buffer = CaptureBuffer::new(10, 2, 4.0);
        let report = drive(&mut engine, &mut buffer, CapturePolicy::UntilFinished).unwrap();

        assert_eq!(buffer.samples(), expected.as_slice());
        assert_eq!(report.blocks, 5);
        assert_eq!(report.write_offset, 20);
        assert_eq!(report.captured, 10);
    }

    #[test]
    fn test_drive_leaves_unfilled_tail_zeroed() {
        let mut engine = ScriptedEngine::new(counting_blocks(2, 4), StepStatus::Finished);
        let mut buffer = CaptureBuffer::new(12, 2, 4.0);
        drive(&mut engine, &mut buffer, CapturePolicy::UntilFinished).unwrap();

        assert_eq!(&buffer.samples()[..8], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert!(buffer.samples()[8..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_drive_stops_when_full() {
        let mut engine = ScriptedEngine::new(counting_blocks(10, 4), StepStatus::Finished);
        let mut buffer = CaptureBuffer::new(10, 2, 4.0);
        let report = drive(&mut engine, &mut buffer, CapturePolicy::UntilFull).unwrap();

        assert_eq!(report.blocks, 3);
        assert!(report.write_offset <= buffer.len() + 4);
    }

    #[test]
    fn test_drive_propagates_step_failure() {
        let mut engine = ScriptedEngine::new(counting_blocks(3, 4), StepStatus::Failed(-1));
        let mut buffer = CaptureBuffer::new(16, 2, 4.0);
        let err = drive(&mut engine, &mut buffer, CapturePolicy::UntilFinished).unwrap_err();

        match err {
            AnalysisError::EngineStep { code, offset } => {
                assert_eq!(code, -1);
                assert_eq!(offset, 8);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_for_engine_holds_one_second() {
        let engine = ScriptedEngine::new(counting_blocks(1, 4), StepStatus::Finished);
        let buffer = CaptureBuffer::for_engine(&engine);
        assert_eq!(buffer.len(), 8);
        assert_eq!(buffer.channels(), 2);
        assert!(buffer.samples().iter().all(|&s| s == 0.0));
    }
}
