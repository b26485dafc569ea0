//! ksmps-scope - block-synchronous capture and spectral analysis of
//! synthesis engines.
//!
//! An engine is stepped one block at a time into a fixed-capacity buffer
//! ([`capture::drive`]); the filled buffer is then viewed per channel
//! ([`analysis::channel`]), windowed by carrier cycles
//! ([`analysis::window`]) and transformed into magnitude or dB spectra
//! ([`analysis::spectrum`]).

pub mod analysis;
pub mod capture;
pub mod cli;
pub mod engine;
pub mod error;
pub mod export;
pub mod params;

#[cfg(test)]
mod tests {
    use crate::analysis::{channel, channel_window, spectrum, window, SpectrumOptions};
    use crate::capture::{drive, CaptureBuffer, CapturePolicy};
    use crate::engine::{EngineStepper, FeedbackPairEngine};
    use crate::params::EngineParams;

    #[test]
    fn test_feedback_pair_pipeline() {
        // 400 Hz at 8 kHz with no feedback: both channels are pure cosines
        let params = EngineParams {
            sample_rate_hz: 8000.0,
            ksmps: 10,
            duration_secs: 1.5,
            frequency_hz: 400.0,
            feedback_gain: 0.0,
            ..EngineParams::default()
        };
        let mut engine = FeedbackPairEngine::new(&params).unwrap();
        let mut buffer = CaptureBuffer::for_engine(&engine);
        let report = drive(&mut engine, &mut buffer, CapturePolicy::UntilFinished).unwrap();

        assert_eq!(report.write_offset, 24000);
        assert_eq!(report.captured, 16000);

        for c in 0..2 {
            let samples = channel(buffer.samples(), c, buffer.channels());
            assert_eq!(samples.len(), 8000);
            let s = spectrum(&samples, &SpectrumOptions::magnitude());
            let (k, v) = s.peak().unwrap();
            assert!((s.bin_frequency(k, engine.sample_rate()) - 400.0).abs() < 1e-9);
            assert!((v - 1.0).abs() < 1e-3);
        }

        let w = window(engine.sample_rate(), buffer.channels(), 400.0, 3, 2);
        let view = channel_window(buffer.samples(), 1, buffer.channels(), w);
        assert_eq!(view.len(), 60);
        assert!((view[0] - 1.0).abs() < 1e-3);
    }
}
