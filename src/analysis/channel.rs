//! De-interleaving.

use super::region::RegionWindow;

/// Copy channel `index` out of an interleaved buffer of `count` channels.
///
/// Panics if `count` is zero or `index >= count`.
pub fn channel(buffer: &[f64], index: usize, count: usize) -> Vec<f64> {
    assert!(count >= 1, "channel count must be >= 1");
    assert!(index < count, "channel {index} out of range for {count} channels");
    buffer.iter().skip(index).step_by(count).copied().collect()
}

/// Copy channel `index` from the interleaved span covered by `window`.
///
/// The window is in interleaved sample offsets; it is clamped to the buffer.
pub fn channel_window(buffer: &[f64], index: usize, count: usize, window: RegionWindow) -> Vec<f64> {
    assert!(count >= 1, "channel count must be >= 1");
    assert!(index < count, "channel {index} out of range for {count} channels");
    let start = (window.start + index).min(buffer.len());
    let end = (window.end + index).min(buffer.len());
    buffer[start..end].iter().step_by(count).copied().collect()
}

/// Interleave equal-length channels frame by frame
pub fn interleave(channels: &[Vec<f64>]) -> Vec<f64> {
    let frames = channels.iter().map(Vec::len).min().unwrap_or(0);
    let mut out = Vec::with_capacity(frames * channels.len());
    for frame in 0..frames {
        out.extend(channels.iter().map(|c| c[frame]));
    }
    out
}
