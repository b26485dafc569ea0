//! Finite-duration engines built from the operators in `operator.rs`.

use super::operator::{FeedbackKind, FeedbackOperator, Oscillator};
use super::{EngineStepper, Performance, StepStatus};
use crate::error::Result;
use crate::params::{EngineParams, StackedFmParams};

/// Two-channel feedback study: FM feedback on channel 0, PM feedback on
/// channel 1, both at the same carrier, amplitude and gain
pub struct FeedbackPairEngine {
    params: EngineParams,
    fm: FeedbackOperator,
    pm: FeedbackOperator,
    performance: Performance,
    block: Vec<f64>,
}

impl FeedbackPairEngine {
    pub fn new(params: &EngineParams) -> Result<Self> {
        params.validate()?;
        let sr = params.sample_rate_hz;
        Ok(Self {
            params: params.clone(),
            fm: FeedbackOperator::new(FeedbackKind::Frequency, sr, params.ksmps),
            pm: FeedbackOperator::new(FeedbackKind::Phase, sr, params.ksmps),
            performance: Performance::new(params.total_frames()),
            block: vec![0.0; params.ksmps * 2],
        })
    }
}

impl EngineStepper for FeedbackPairEngine {
    fn sample_rate(&self) -> f64 {
        self.params.sample_rate_hz
    }

    fn channels(&self) -> usize {
        2
    }

    fn ksmps(&self) -> usize {
        self.params.ksmps
    }

    fn step(&mut self) -> StepStatus {
        let EngineParams {
            amplitude,
            frequency_hz,
            feedback_gain,
            ..
        } = self.params;

        let fm = self.fm.process(amplitude, frequency_hz, feedback_gain);
        for (frame, s) in self.block.chunks_exact_mut(2).zip(fm) {
            frame[0] = *s;
        }
        let pm = self.pm.process(amplitude, frequency_hz, feedback_gain);
        for (frame, s) in self.block.chunks_exact_mut(2).zip(pm) {
            frame[1] = *s;
        }

        self.performance.advance(self.params.ksmps)
    }

    fn current_block(&self) -> &[f64] {
        &self.block
    }
}

/// Mono three-oscillator stacked FM voice
pub struct StackedFmEngine {
    params: EngineParams,
    stack: StackedFmParams,
    mod0: Oscillator,
    mod1: Oscillator,
    carrier: Oscillator,
    stage0: Vec<f64>,
    stage1: Vec<f64>,
    performance: Performance,
    block: Vec<f64>,
}

impl StackedFmEngine {
    pub fn new(params: &EngineParams, stack: &StackedFmParams) -> Result<Self> {
        params.validate()?;
        let sr = params.sample_rate_hz;
        let ksmps = params.ksmps;
        Ok(Self {
            params: params.clone(),
            stack: stack.clone(),
            mod0: Oscillator::new(sr, ksmps),
            mod1: Oscillator::new(sr, ksmps),
            carrier: Oscillator::new(sr, ksmps),
            stage0: vec![0.0; ksmps],
            stage1: vec![0.0; ksmps],
            performance: Performance::new(params.total_frames()),
            block: vec![0.0; ksmps],
        })
    }
}

impl EngineStepper for StackedFmEngine {
    fn sample_rate(&self) -> f64 {
        self.params.sample_rate_hz
    }

    fn channels(&self) -> usize {
        1
    }

    fn ksmps(&self) -> usize {
        self.params.ksmps
    }

    fn step(&mut self) -> StepStatus {
        let fm = self.stack.mod_frequency_hz;
        let (z0, z1) = (self.stack.index0, self.stack.index1);

        // s0 = fm + mod0(z0·fm, fm)
        let s0 = self.mod0.process(|_| (z0 * fm, fm));
        for (dst, s) in self.stage0.iter_mut().zip(s0) {
            *dst = fm + s;
        }

        // s1 = fc + mod1(z1·s0, s0)
        let stage0 = &self.stage0;
        let s1 = self.mod1.process(|n| (z1 * stage0[n], stage0[n]));
        for (dst, s) in self.stage1.iter_mut().zip(s1) {
            *dst = self.params.frequency_hz + s;
        }

        let amplitude = self.params.amplitude;
        let stage1 = &self.stage1;
        let out = self.carrier.process(|n| (amplitude, stage1[n]));
        self.block.copy_from_slice(out);

        self.performance.advance(self.params.ksmps)
    }

    fn current_block(&self) -> &[f64] {
        &self.block
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short_params() -> EngineParams {
        EngineParams {
            sample_rate_hz: 8000.0,
            ksmps: 16,
            duration_secs: 0.01,
            ..EngineParams::default()
        }
    }

    #[test]
    fn test_feedback_pair_block_shape() {
        let mut engine = FeedbackPairEngine::new(&short_params()).unwrap();
        assert_eq!(engine.channels(), 2);
        engine.step();
        assert_eq!(engine.current_block().len(), 32);
        // both voices start at phase 0 with full amplitude
        assert!((engine.current_block()[0] - 1.0).abs() < 1e-9);
        assert!((engine.current_block()[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_feedback_pair_finishes() {
        // 80 frames at 16 per block = 5 blocks
        let mut engine = FeedbackPairEngine::new(&short_params()).unwrap();
        let mut steps = 1;
        while engine.step() == StepStatus::Continue {
            steps += 1;
        }
        assert_eq!(steps, 5);
    }

    #[test]
    fn test_feedback_pair_channels_match_without_gain() {
        let params = EngineParams {
            feedback_gain: 0.0,
            ..short_params()
        };
        let mut engine = FeedbackPairEngine::new(&params).unwrap();
        engine.step();
        for frame in engine.current_block().chunks(2) {
            assert!((frame[0] - frame[1]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_stacked_fm_is_bounded_mono() {
        let params = EngineParams {
            amplitude: 0.5,
            ..short_params()
        };
        let mut engine = StackedFmEngine::new(&params, &StackedFmParams::default()).unwrap();
        assert_eq!(engine.channels(), 1);
        engine.step();
        let block = engine.current_block();
        assert_eq!(block.len(), 16);
        assert!((block[0] - 0.5).abs() < 1e-12);
        assert!(block.iter().all(|s| s.abs() <= 0.5 + 1e-12));
    }

    #[test]
    fn test_rejects_invalid_params() {
        let params = EngineParams {
            ksmps: 0,
            ..short_params()
        };
        assert!(FeedbackPairEngine::new(&params).is_err());
    }
}
