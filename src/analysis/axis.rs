//! Axis values for an external plotting layer.

/// Time in seconds of each of `len` per-channel frames
pub fn time_axis(len: usize, sample_rate: f64) -> Vec<f64> {
    (0..len).map(|i| i as f64 / sample_rate).collect()
}

/// Frequency in Hz of each of `bins` bins of an `fft_len`-point transform
pub fn frequency_axis(bins: usize, fft_len: usize, sample_rate: f64) -> Vec<f64> {
    (0..bins)
        .map(|k| k as f64 * sample_rate / fft_len as f64)
        .collect()
}
