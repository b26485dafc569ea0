//! Glicol live-coding engine behind the stepper interface.

use glicol::Engine;

use super::{EngineStepper, Performance, StepStatus};
use crate::error::{AnalysisError, Result};
use crate::params::{engine_constants::GLICOL_BLOCK_SIZE, EngineParams};

/// Default Glicol composition: a sine carrier phase-modulated by a sine
pub const GLICOL_COMPOSITION: &str = r#"
~mod: sin 250 >> mul 300 >> add 500
o: sin ~mod >> mul 0.5
"#;

/// Stereo Glicol engine with a fixed block size and a finite score length
pub struct GlicolEngine {
    engine: Engine<GLICOL_BLOCK_SIZE>,
    sample_rate: f64,
    performance: Performance,
    block: Vec<f64>,
}

impl GlicolEngine {
    /// Compile `code` and prepare a performance of `params.duration_secs`.
    /// `params.ksmps` is ignored; Glicol always renders 128-frame blocks.
    pub fn new(code: &str, params: &EngineParams) -> Result<Self> {
        params.validate()?;
        if params.ksmps != GLICOL_BLOCK_SIZE {
            log::debug!(
                "Glicol block size is fixed at {}, ignoring ksmps={}",
                GLICOL_BLOCK_SIZE,
                params.ksmps
            );
        }

        // Glicol only runs at whole-Hz rates
        let sample_rate = params.sample_rate_hz.round();
        let mut engine = Engine::<GLICOL_BLOCK_SIZE>::new();
        engine.set_sr(sample_rate as usize);
        engine.update_with_code(code);
        engine
            .update()
            .map_err(|e| AnalysisError::Config(format!("Glicol code does not compile: {:?}", e)))?;

        Ok(Self {
            engine,
            sample_rate,
            performance: Performance::new((params.duration_secs * sample_rate).round() as usize),
            block: vec![0.0; GLICOL_BLOCK_SIZE * 2],
        })
    }
}

impl EngineStepper for GlicolEngine {
    fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    fn channels(&self) -> usize {
        2
    }

    fn ksmps(&self) -> usize {
        GLICOL_BLOCK_SIZE
    }

    fn step(&mut self) -> StepStatus {
        let (buffers, _) = self.engine.next_block(vec![]);
        for i in 0..GLICOL_BLOCK_SIZE {
            self.block[i * 2] = buffers[0][i] as f64;
            self.block[i * 2 + 1] = buffers[1][i] as f64;
        }
        self.performance.advance(GLICOL_BLOCK_SIZE)
    }

    fn current_block(&self) -> &[f64] {
        &self.block
    }
}
