//! One-sided magnitude spectra.

use rustfft::{num_complex::Complex, Fft, FftPlanner};

/// Floor added before taking logs; silence maps to -120 dB
pub const EPSILON: f64 = 1e-6;

/// What the spectrum values represent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpectrumMode {
    /// Scaled magnitudes
    Raw,
    /// Magnitudes divided by their peak
    NormalizedLinear,
    /// Peak-normalised magnitudes in dB
    NormalizedDb,
    /// Scaled magnitudes in dB
    Db,
}

impl SpectrumMode {
    fn peak_normalized(self) -> bool {
        matches!(self, Self::NormalizedLinear | Self::NormalizedDb)
    }

    fn decibels(self) -> bool {
        matches!(self, Self::NormalizedDb | Self::Db)
    }
}

/// Magnitude scaling convention
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scaling {
    /// Divide by N/2, then halve the DC bin so a constant reads as its
    /// own amplitude
    HalfLength,
    /// Divide by N, DC left as is
    Length,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpectrumOptions {
    pub mode: SpectrumMode,
    pub scaling: Scaling,
    /// Divide the time-domain input by its peak |sample| before transforming
    pub pre_normalize: bool,
}

impl SpectrumOptions {
    /// Linear magnitudes, N/2 scaling with DC correction
    pub fn magnitude() -> Self {
        Self {
            mode: SpectrumMode::Raw,
            scaling: Scaling::HalfLength,
            pre_normalize: false,
        }
    }

    /// Peak-normalised dB, N/2 scaling with DC correction
    pub fn normalized_db() -> Self {
        Self {
            mode: SpectrumMode::NormalizedDb,
            ..Self::magnitude()
        }
    }

    /// dB of the peak-normalised signal, N scaling
    pub fn prenormalized_db() -> Self {
        Self {
            mode: SpectrumMode::Db,
            scaling: Scaling::Length,
            pre_normalize: true,
        }
    }
}

impl Default for SpectrumOptions {
    fn default() -> Self {
        Self::normalized_db()
    }
}

/// Magnitude per bin, `fft_len / 2 + 1` bins
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    pub bins: Vec<f64>,
    pub fft_len: usize,
}

impl Spectrum {
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Centre frequency of bin `k` (Hz)
    pub fn bin_frequency(&self, k: usize, sample_rate: f64) -> f64 {
        k as f64 * sample_rate / self.fft_len as f64
    }

    pub fn frequencies(&self, sample_rate: f64) -> Vec<f64> {
        super::axis::frequency_axis(self.bins.len(), self.fft_len, sample_rate)
    }

    /// Index and value of the largest bin
    pub fn peak(&self) -> Option<(usize, f64)> {
        self.bins
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best, (k, v)| match best {
                Some((_, b)) if b >= v => best,
                _ => Some((k, v)),
            })
    }
}

/// Compute the one-sided spectrum of `samples`.
///
/// Steps, in order: optional time-domain peak normalisation, FFT, scaling,
/// DC correction ([`Scaling::HalfLength`] only), optional peak
/// normalisation, optional `20·log10(m + EPSILON)`. Peak divisions are
/// skipped when the peak is at or below [`EPSILON`], so silence stays at the
/// floor. Empty input gives an empty spectrum.
pub fn spectrum(samples: &[f64], options: &SpectrumOptions) -> Spectrum {
    if samples.is_empty() {
        return Spectrum {
            bins: Vec::new(),
            fft_len: 0,
        };
    }
    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(samples.len());
    spectrum_with(fft.as_ref(), samples, options)
}

/// [`spectrum`] with a prepared forward transform, for repeated frames of
/// the same length.
///
/// Panics if `fft.len()` differs from `samples.len()`.
pub fn spectrum_with(fft: &dyn Fft<f64>, samples: &[f64], options: &SpectrumOptions) -> Spectrum {
    let n = samples.len();
    assert_eq!(fft.len(), n, "transform length must match input length");
    if n == 0 {
        return Spectrum {
            bins: Vec::new(),
            fft_len: 0,
        };
    }

    let gain = if options.pre_normalize {
        let peak = samples.iter().fold(0.0f64, |m, s| m.max(s.abs()));
        if peak > EPSILON {
            1.0 / peak
        } else {
            1.0
        }
    } else {
        1.0
    };

    let mut buffer: Vec<Complex<f64>> = samples
        .iter()
        .map(|&s| Complex::new(s * gain, 0.0))
        .collect();
    fft.process(&mut buffer);

    let divisor = match options.scaling {
        Scaling::HalfLength => n as f64 / 2.0,
        Scaling::Length => n as f64,
    };
    let mut bins: Vec<f64> = buffer[..n / 2 + 1]
        .iter()
        .map(|c| c.norm() / divisor)
        .collect();

    if options.scaling == Scaling::HalfLength {
        bins[0] *= 0.5;
    }

    if options.mode.peak_normalized() {
        let peak = bins.iter().fold(0.0f64, |m, &v| m.max(v));
        if peak > EPSILON {
            for v in bins.iter_mut() {
                *v /= peak;
            }
        }
    }

    if options.mode.decibels() {
        for v in bins.iter_mut() {
            *v = 20.0 * (*v + EPSILON).log10();
        }
    }

    Spectrum { bins, fft_len: n }
}
