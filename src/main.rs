//! ksmps-scope - capture a synthesis engine block by block and report its
//! spectrum per channel.

use std::fs::File;
use std::io::BufWriter;

use clap::Parser;

use ksmps_scope::analysis::{channel, channel_window, spectrogram, spectrum, window};
use ksmps_scope::capture::{drive, CaptureBuffer};
use ksmps_scope::cli::Args;
use ksmps_scope::error::{AnalysisError, Result};
use ksmps_scope::export::{write_spectrum_csv, write_wav};

fn run(args: &Args) -> Result<()> {
    let capture_config = args.capture_config();
    capture_config.validate()?;
    let region = args.region_config();
    let options = args.spectrum_options();

    let glicol_code = args.glicol_code()?;
    let mut engine = args.build_engine(&glicol_code)?;
    let sr = engine.sample_rate();
    let channels = engine.channels();
    log::info!(
        "Engine: {} Hz, {} channel(s), ksmps {}",
        sr,
        channels,
        engine.ksmps()
    );

    let mut buffer = CaptureBuffer::new(capture_config.capacity(sr, channels), channels, sr);
    let report = drive(engine.as_mut(), &mut buffer, capture_config.policy)?;
    log::info!(
        "Captured {} of {} samples over {} blocks",
        report.captured,
        buffer.len(),
        report.blocks
    );

    let region_window = window(sr, channels, args.frequency, region.cycles, region.start_cycle);
    let times = region_window.times(channels, sr);
    let (from_ms, to_ms) = match (times.first(), times.last()) {
        (Some(a), Some(b)) => (a * 1000.0, b * 1000.0),
        _ => (0.0, 0.0),
    };
    for c in 0..channels {
        let view = channel_window(buffer.samples(), c, channels, region_window);
        let peak = view.iter().fold(0.0f64, |m, s| m.max(s.abs()));
        log::info!(
            "ch{}: {} frames, {:.3}-{:.3} ms, peak |x| {:.4}",
            c,
            view.len(),
            from_ms,
            to_ms,
            peak
        );

        let samples = channel(buffer.samples(), c, channels);
        let s = spectrum(&samples, &options);
        if let Some((k, v)) = s.peak() {
            log::info!(
                "ch{}: spectral peak {:.1} Hz ({:.3})",
                c,
                s.bin_frequency(k, sr),
                v
            );
        }

        if let Some(prefix) = &args.csv {
            let path = format!("{}-ch{}.csv", prefix, c);
            let file = File::create(&path)
                .map_err(|e| AnalysisError::Export(format!("cannot create {}: {}", path, e)))?;
            write_spectrum_csv(BufWriter::new(file), &s, sr)?;
            log::info!("Wrote {}", path);
        }
    }

    if let Some(config) = args.spectrogram_config() {
        config.validate()?;
        let samples = channel(buffer.samples(), 0, channels);
        let frames = spectrogram(&samples, &config, &options);
        log::info!(
            "Spectrogram: {} frames of {} samples",
            frames.frames.len(),
            frames.fft_size
        );
        for (i, frame) in frames.frames.iter().enumerate() {
            if let Some((k, _)) = frame.peak() {
                log::debug!(
                    "{:.3} s: peak {:.1} Hz",
                    frames.frame_time(i, sr),
                    frame.bin_frequency(k, sr)
                );
            }
        }
    }

    if let Some(path) = &args.wav {
        write_wav(path, &buffer)?;
        log::info!("Wrote {}", path.display());
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
