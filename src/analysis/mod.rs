//! Read-only views over a filled capture buffer.

mod axis;
mod channel;
mod region;
mod spectrogram;
mod spectrum;

pub use axis::{frequency_axis, time_axis};
pub use channel::{channel, channel_window, interleave};
pub use region::{window, RegionWindow};
pub use spectrogram::{hann_window, spectrogram, Spectrogram};
pub use spectrum::{spectrum, spectrum_with, Scaling, Spectrum, SpectrumMode, SpectrumOptions, EPSILON};
