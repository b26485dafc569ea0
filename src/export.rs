//! Hand-off of captured audio and spectra to external tools.

use std::io::Write;
use std::path::Path;

use crate::analysis::Spectrum;
use crate::capture::CaptureBuffer;
use crate::error::{AnalysisError, Result};

/// Write the interleaved capture as a 32-bit float WAV file
pub fn write_wav(path: impl AsRef<Path>, buffer: &CaptureBuffer) -> Result<()> {
    let spec = hound::WavSpec {
        channels: buffer.channels() as u16,
        sample_rate: buffer.sample_rate().round() as u32,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path.as_ref(), spec)
        .map_err(|e| AnalysisError::Export(format!("Failed to create WAV writer: {}", e)))?;
    for &s in buffer.samples() {
        writer
            .write_sample(s as f32)
            .map_err(|e| AnalysisError::Export(format!("Failed to write sample: {}", e)))?;
    }
    writer
        .finalize()
        .map_err(|e| AnalysisError::Export(format!("Failed to finalize WAV: {}", e)))?;
    Ok(())
}

/// Write `frequency_hz,magnitude` rows, one per bin
pub fn write_spectrum_csv<W: Write>(mut out: W, spectrum: &Spectrum, sample_rate: f64) -> Result<()> {
    let io = |e: std::io::Error| AnalysisError::Export(e.to_string());
    writeln!(out, "frequency_hz,magnitude").map_err(io)?;
    for (freq, value) in spectrum.frequencies(sample_rate).iter().zip(&spectrum.bins) {
        writeln!(out, "{},{}", freq, value).map_err(io)?;
    }
    Ok(())
}
