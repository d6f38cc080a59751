//! Spectrum command implementation
//!
//! Writes the magnitude spectrum of a WAV file and reports its strongest bin.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use downrate_dsp::diagnostics::write_magnitudes;
use downrate_dsp::spectral::analyze;
use downrate_dsp::{SampleBuffer, Spectrum};
use tracing::info;

use crate::audio::read_wav;

use super::json_output::SpectrumOutput;

/// Run the spectrum command
///
/// Multi-channel input is downmixed first.
///
/// # Arguments
/// * `input` - Input WAV path
/// * `output` - Magnitude dump path
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success
pub fn run(input: &Path, output: &Path, json_output: bool) -> Result<ExitCode> {
    let result = execute(input, output)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", "Spectrum:".cyan().bold());
        println!("  {} {}", "Input:".dimmed(), result.input);
        println!("  {} {}", "Output:".dimmed(), result.output);
        println!(
            "  {} {} bins at {} Hz",
            "Bins:".dimmed(),
            result.bins,
            result.sample_rate
        );
        println!(
            "  {} bin {} ({:.1} Hz)",
            "Peak:".dimmed(),
            result.peak_bin,
            result.peak_frequency
        );
    }

    Ok(ExitCode::SUCCESS)
}

fn execute(input: &Path, output: &Path) -> Result<SpectrumOutput> {
    let audio = read_wav(input)?;
    let audio = if audio.channel_count() > 1 {
        audio.downmix()
    } else {
        audio
    };
    let samples = audio.channels.into_iter().next().unwrap_or_default();
    let buffer = SampleBuffer::new(samples, audio.sample_rate)?;
    let spectrum = analyze(&buffer).context("Spectral analysis failed")?;

    let file = File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    write_magnitudes(&mut BufWriter::new(file), &spectrum)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    let peak_bin = peak_bin(&spectrum);
    let peak_frequency = peak_bin as f64 * buffer.sample_rate() as f64 / spectrum.len() as f64;
    info!(peak_bin, peak_frequency, "analyzed");

    Ok(SpectrumOutput {
        input: input.display().to_string(),
        output: output.display().to_string(),
        sample_rate: buffer.sample_rate(),
        bins: spectrum.len(),
        peak_bin,
        peak_frequency,
    })
}

/// Index of the largest magnitude in bins `0..=N/2`.
fn peak_bin(spectrum: &Spectrum) -> usize {
    spectrum
        .magnitudes()
        .iter()
        .take(spectrum.len() / 2 + 1)
        .enumerate()
        .fold((0, f64::MIN), |best, (k, &m)| if m > best.1 { (k, m) } else { best })
        .0
}
