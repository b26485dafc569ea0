//! Short-time spectra over a captured channel.

use std::f64::consts::PI;

use rustfft::FftPlanner;

use super::spectrum::{spectrum_with, Spectrum, SpectrumOptions};
use crate::params::SpectrogramConfig;

/// Sequence of windowed spectra, one per hop
#[derive(Debug, Clone)]
pub struct Spectrogram {
    pub frames: Vec<Spectrum>,
    pub fft_size: usize,
    pub hop: usize,
}

impl Spectrogram {
    /// Start time of frame `index` (seconds)
    pub fn frame_time(&self, index: usize, sample_rate: f64) -> f64 {
        (index * self.hop) as f64 / sample_rate
    }
}

/// Hann window function for FFT analysis
pub fn hann_window(index: usize, size: usize) -> f64 {
    if size < 2 {
        return 1.0;
    }
    0.5 * (1.0 - ((2.0 * PI * index as f64) / (size as f64 - 1.0)).cos())
}

/// Hann-windowed spectra of `fft_size` frames advanced by `hop`.
/// Samples that do not fill a whole frame at the end are ignored.
pub fn spectrogram(
    samples: &[f64],
    config: &SpectrogramConfig,
    options: &SpectrumOptions,
) -> Spectrogram {
    let size = config.fft_size;
    if size == 0 {
        return Spectrogram {
            frames: Vec::new(),
            fft_size: 0,
            hop: config.hop,
        };
    }
    let window: Vec<f64> = (0..size).map(|i| hann_window(i, size)).collect();
    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(size);

    let mut frames = Vec::new();
    let mut frame = vec![0.0; size];
    let mut start = 0;
    while start + size <= samples.len() {
        for ((dst, &s), &w) in frame.iter_mut().zip(&samples[start..start + size]).zip(&window) {
            *dst = s * w;
        }
        frames.push(spectrum_with(fft.as_ref(), &frame, options));
        start += config.hop;
    }

    Spectrogram {
        frames,
        fft_size: size,
        hop: config.hop,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{spectrum, SpectrumMode};

    #[test]
    fn test_hann_window() {
        let size = 1024;

        // Hann window should be 0 at edges, 1 at center
        assert!((hann_window(0, size) - 0.0).abs() < 0.01);
        assert!((hann_window(size - 1, size) - 0.0).abs() < 0.01);
        assert!((hann_window(size / 2, size) - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_frame_count() {
        let config = SpectrogramConfig { fft_size: 64, hop: 32 };
        let s = spectrogram(&[0.0; 256], &config, &SpectrumOptions::magnitude());
        assert_eq!(s.frames.len(), 7);
        assert!(s.frames.iter().all(|f| f.len() == 33));
        assert!((s.frame_time(2, 1000.0) - 0.064).abs() < 1e-12);

        let short = spectrogram(&[0.0; 63], &config, &SpectrumOptions::magnitude());
        assert!(short.frames.is_empty());

        let empty = SpectrogramConfig { fft_size: 0, hop: 1 };
        assert!(spectrogram(&[0.0; 8], &empty, &SpectrumOptions::magnitude()).frames.is_empty());
    }

    #[test]
    fn test_frames_match_single_spectra() {
        let config = SpectrogramConfig { fft_size: 32, hop: 16 };
        let samples: Vec<f64> = (0..96).map(|n| (0.3 * n as f64).sin()).collect();
        let options = SpectrumOptions::normalized_db();
        let s = spectrogram(&samples, &config, &options);
        assert_eq!(s.frames.len(), 5);

        for (i, frame) in s.frames.iter().enumerate() {
            let start = i * config.hop;
            let windowed: Vec<f64> = samples[start..start + 32]
                .iter()
                .enumerate()
                .map(|(n, x)| x * hann_window(n, 32))
                .collect();
            let expected = spectrum(&windowed, &options);
            assert_eq!(frame.fft_len, expected.fft_len);
            for (a, b) in frame.bins.iter().zip(&expected.bins) {
                assert!((a - b).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_tracks_frequency_change() {
        let sr = 1024.0;
        let config = SpectrogramConfig { fft_size: 256, hop: 256 };
        let tone = |f: f64, n: usize| (2.0 * PI * f * n as f64 / sr).sin();
        let samples: Vec<f64> = (0..512)
            .map(|n| if n < 256 { tone(64.0, n) } else { tone(128.0, n) })
            .collect();
        let options = SpectrumOptions {
            mode: SpectrumMode::Raw,
            ..SpectrumOptions::magnitude()
        };
        let s = spectrogram(&samples, &config, &options);
        assert_eq!(s.frames.len(), 2);
        assert_eq!(s.frames[0].peak().unwrap().0, 16);
        assert_eq!(s.frames[1].peak().unwrap().0, 32);
    }
}
