//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::analysis::{Scaling, SpectrumMode, SpectrumOptions};
use crate::capture::CapturePolicy;
use crate::engine::{
    EngineStepper, FeedbackPairEngine, GlicolEngine, StackedFmEngine, GLICOL_COMPOSITION,
};
use crate::error::{AnalysisError, Result};
use crate::params::{CaptureConfig, EngineParams, RegionConfig, SpectrogramConfig, StackedFmParams};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "ksmps-scope")]
#[command(about = "Block-accurate capture and spectrum analysis of synthesis engines", long_about = None)]
pub struct Args {
    /// Engine: feedback (default), stacked, glicol
    #[arg(long, value_name = "ENGINE", default_value = "feedback")]
    pub engine: String,

    /// Glicol code file (glicol engine only)
    #[arg(long, value_name = "PATH")]
    pub code: Option<PathBuf>,

    /// Performance length (seconds)
    #[arg(long, value_name = "SECONDS", default_value = "1")]
    pub duration: f64,

    /// Sample rate (Hz)
    #[arg(long, value_name = "HZ", default_value = "44100")]
    pub sample_rate: f64,

    /// Block size (frames per step)
    #[arg(long, value_name = "FRAMES", default_value = "64")]
    pub ksmps: usize,

    /// Output amplitude
    #[arg(long, default_value = "1")]
    pub amplitude: f64,

    /// Carrier frequency (Hz)
    #[arg(long, value_name = "HZ", default_value = "500")]
    pub frequency: f64,

    /// Feedback gain / modulation index
    #[arg(long, default_value = "1")]
    pub feedback: f64,

    /// Capture length (seconds)
    #[arg(long, value_name = "SECONDS", default_value = "1")]
    pub capture: f64,

    /// Stop stepping the engine once the capture buffer is full
    #[arg(long)]
    pub stop_when_full: bool,

    /// Carrier cycles in the time-domain window
    #[arg(long, default_value = "3")]
    pub cycles: usize,

    /// Carrier cycles to skip before the window
    #[arg(long, default_value = "0")]
    pub start_cycle: usize,

    /// Spectrum: magnitude, normalized, db (default), prenormalized-db
    #[arg(long, value_name = "MODE", default_value = "db")]
    pub spectrum: String,

    /// Short-time spectrum frame size for channel 0 (samples)
    #[arg(long, value_name = "FRAMES")]
    pub spectrogram: Option<usize>,

    /// Write the capture to a WAV file
    #[arg(long, value_name = "PATH")]
    pub wav: Option<PathBuf>,

    /// Write one CSV spectrum per channel (`<prefix>-ch<N>.csv`)
    #[arg(long, value_name = "PREFIX")]
    pub csv: Option<String>,
}

impl Args {
    pub fn engine_params(&self) -> EngineParams {
        EngineParams {
            sample_rate_hz: self.sample_rate,
            ksmps: self.ksmps,
            duration_secs: self.duration,
            amplitude: self.amplitude,
            frequency_hz: self.frequency,
            feedback_gain: self.feedback,
        }
    }

    pub fn capture_config(&self) -> CaptureConfig {
        CaptureConfig {
            capacity_secs: self.capture,
            policy: if self.stop_when_full {
                CapturePolicy::UntilFull
            } else {
                CapturePolicy::UntilFinished
            },
        }
    }

    pub fn region_config(&self) -> RegionConfig {
        RegionConfig {
            cycles: self.cycles,
            start_cycle: self.start_cycle,
        }
    }

    /// Spectrogram settings for the requested frame size, if any
    pub fn spectrogram_config(&self) -> Option<SpectrogramConfig> {
        self.spectrogram.map(SpectrogramConfig::with_fft_size)
    }

    /// Parse spectrum mode from command-line arguments
    pub fn spectrum_options(&self) -> SpectrumOptions {
        match self.spectrum.to_lowercase().as_str() {
            "magnitude" => SpectrumOptions::magnitude(),
            "normalized" => SpectrumOptions {
                mode: SpectrumMode::NormalizedLinear,
                scaling: Scaling::HalfLength,
                pre_normalize: false,
            },
            "db" => SpectrumOptions::normalized_db(),
            "prenormalized-db" => SpectrumOptions::prenormalized_db(),
            other => {
                log::warn!("Unknown spectrum mode '{}', using db", other);
                SpectrumOptions::normalized_db()
            }
        }
    }

    /// Glicol source: the `--code` file, or the built-in composition
    pub fn glicol_code(&self) -> Result<String> {
        match &self.code {
            Some(path) => std::fs::read_to_string(path).map_err(|e| {
                AnalysisError::Config(format!("cannot read {}: {}", path.display(), e))
            }),
            None => Ok(GLICOL_COMPOSITION.to_string()),
        }
    }

    /// Build the selected engine; `glicol_code` is only used by the Glicol
    /// engine, which borrows it for its lifetime
    pub fn build_engine<'a>(&self, glicol_code: &'a str) -> Result<Box<dyn EngineStepper + 'a>> {
        let params = self.engine_params();
        match self.engine.to_lowercase().as_str() {
            "stacked" => {
                log::info!("Engine: stacked FM");
                let stack = StackedFmParams {
                    mod_frequency_hz: self.frequency,
                    ..StackedFmParams::default()
                };
                Ok(Box::new(StackedFmEngine::new(&params, &stack)?))
            }
            "glicol" => {
                log::info!("Engine: Glicol");
                Ok(Box::new(GlicolEngine::new(glicol_code, &params)?))
            }
            "feedback" => {
                log::info!("Engine: FM/PM feedback pair (gain {})", self.feedback);
                Ok(Box::new(FeedbackPairEngine::new(&params)?))
            }
            other => {
                log::warn!("Unknown engine '{}', using feedback", other);
                Ok(Box::new(FeedbackPairEngine::new(&params)?))
            }
        }
    }
}
