//! Oscillators used by the built-in engines.

use std::f64::consts::TAU;

use crate::params::engine_constants::COSINE_TABLE_SIZE;

/// One period of cosine with a guard point for interpolation
#[derive(Debug, Clone)]
pub struct CosineTable {
    values: Vec<f64>,
}

impl Default for CosineTable {
    fn default() -> Self {
        Self::new(COSINE_TABLE_SIZE)
    }
}

impl CosineTable {
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "table size must be > 0");
        let values = (0..=size)
            .map(|n| (TAU * n as f64 / size as f64).cos())
            .collect();
        Self { values }
    }

    /// Linearly interpolated lookup; `phase` is in cycles and wraps
    pub fn lookup(&self, phase: f64) -> f64 {
        let size = self.values.len() - 1;
        let pos = wrap(phase) * size as f64;
        let index = (pos as usize).min(size - 1);
        let frac = pos - index as f64;
        let a = self.values[index];
        a + frac * (self.values[index + 1] - a)
    }
}

/// Wrap a phase into [0, 1)
fn wrap(phase: f64) -> f64 {
    let p = phase.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs
    if p >= 1.0 {
        0.0
    } else {
        p
    }
}

/// Where the operator's own output is fed back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    /// Output scaled by instantaneous frequency is added to the frequency
    Frequency,
    /// Previous output is added to the phase
    Phase,
}

/// Table-lookup cosine operator with self-feedback
#[derive(Debug, Clone)]
pub struct FeedbackOperator {
    table: CosineTable,
    kind: FeedbackKind,
    sample_rate: f64,
    phase: f64,
    feedback: f64,
    out: Vec<f64>,
}

impl FeedbackOperator {
    pub fn new(kind: FeedbackKind, sample_rate: f64, block_size: usize) -> Self {
        Self {
            table: CosineTable::default(),
            kind,
            sample_rate,
            phase: 0.0,
            feedback: 0.0,
            out: vec![0.0; block_size],
        }
    }

    /// Render one block of `amplitude`, `frequency` (Hz) and feedback `gain`
    pub fn process(&mut self, amplitude: f64, frequency: f64, gain: f64) -> &[f64] {
        for o in self.out.iter_mut() {
            let s = match self.kind {
                FeedbackKind::Frequency => {
                    let f = frequency + gain * self.feedback;
                    let s = self.table.lookup(self.phase);
                    self.phase = wrap(self.phase + f / self.sample_rate);
                    self.feedback = s * f;
                    s
                }
                FeedbackKind::Phase => {
                    let s = self.table.lookup(self.phase + gain * self.feedback);
                    self.phase = wrap(self.phase + frequency / self.sample_rate);
                    self.feedback = s;
                    s
                }
            };
            *o = amplitude * s;
        }
        &self.out
    }
}

/// Direct-cosine oscillator with per-sample amplitude and frequency
#[derive(Debug, Clone)]
pub struct Oscillator {
    sample_rate: f64,
    phase: f64,
    out: Vec<f64>,
}

impl Oscillator {
    pub fn new(sample_rate: f64, block_size: usize) -> Self {
        Self {
            sample_rate,
            phase: 0.0,
            out: vec![0.0; block_size],
        }
    }

    /// Render one block; `control(n)` yields `(amplitude, frequency)` for
    /// frame `n`
    pub fn process<F>(&mut self, control: F) -> &[f64]
    where
        F: Fn(usize) -> (f64, f64),
    {
        for (n, o) in self.out.iter_mut().enumerate() {
            let (amplitude, frequency) = control(n);
            *o = amplitude * (TAU * self.phase).cos();
            self.phase = wrap(self.phase + frequency / self.sample_rate);
        }
        &self.out
    }
}
