//! Convert command implementation
//!
//! Reads a WAV file, converts every channel to the requested rate and writes
//! the result. Optionally dumps spectral magnitudes for offline inspection.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use downrate_dsp::diagnostics::{snapshot, write_magnitudes, SpectralSnapshot};
use downrate_dsp::{ConversionRequest, DspError, SampleBuffer, Spectrum, Strategy};
use tracing::{info, warn};

use crate::audio::{read_wav, write_wav, DecodedAudio, OutputEncoding};
use crate::request::{RequestFile, RequestOptions};

use super::json_output::{error_codes, ConvertOutput, ConvertResult, JsonError};

/// Options for the convert command.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Input WAV path
    pub input: PathBuf,
    /// Output WAV path
    pub output: PathBuf,
    /// JSON request file; flags in `request` override its fields
    pub request_file: Option<PathBuf>,
    /// Request settings from flags
    pub request: RequestOptions,
    /// Average all channels to mono before converting
    pub downmix: bool,
    /// Output sample encoding
    pub encoding: OutputEncoding,
    /// Directory for magnitude dumps
    pub dump_spectra: Option<PathBuf>,
}

/// A failure tagged with the JSON error code of the step that failed.
struct StepError {
    code: &'static str,
    error: anyhow::Error,
}

trait StepContext<T> {
    fn step(self, code: &'static str) -> std::result::Result<T, StepError>;
}

impl<T> StepContext<T> for Result<T> {
    fn step(self, code: &'static str) -> std::result::Result<T, StepError> {
        self.map_err(|error| StepError { code, error })
    }
}

/// Run the convert command
///
/// # Arguments
/// * `options` - Paths, request settings and output options
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(options: &ConvertOptions, json_output: bool) -> Result<ExitCode> {
    match execute(options) {
        Ok(result) => {
            if json_output {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&ConvertOutput::success(result))?
                );
            } else {
                print_human(&result);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(StepError { code, error }) => {
            if json_output {
                let json = JsonError::from_anyhow(&error, code)
                    .with_file(options.input.display().to_string());
                println!(
                    "{}",
                    serde_json::to_string_pretty(&ConvertOutput::failure(vec![json]))?
                );
                Ok(ExitCode::from(1))
            } else {
                Err(error)
            }
        }
    }
}

fn execute(options: &ConvertOptions) -> std::result::Result<ConvertResult, StepError> {
    let mut audio = read_wav(&options.input).step(error_codes::INPUT_READ)?;
    info!(
        channels = audio.channel_count(),
        frames = audio.frames(),
        sample_rate = audio.sample_rate,
        "read input"
    );
    if options.downmix && audio.channel_count() > 1 {
        audio = audio.downmix();
    }

    let mut request_options = options.request.clone();
    if let Some(path) = &options.request_file {
        request_options.file = Some(RequestFile::load(path).step(error_codes::REQUEST)?);
    }
    let request = request_options
        .resolve(audio.sample_rate)
        .step(error_codes::REQUEST)?;
    let factor = request
        .factor()
        .map_err(anyhow::Error::from)
        .step(error_codes::REQUEST)?;

    let converted = audio
        .convert(&request)
        .context("Conversion failed")
        .step(error_codes::INTERNAL)?;

    // Output WAV is written last
    let spectra = match &options.dump_spectra {
        Some(dir) => {
            let snapshots = capture_spectra(&audio, &converted, &request)
                .step(error_codes::INTERNAL)?;
            write_spectra(dir, &snapshots).step(error_codes::OUTPUT_WRITE)?
        }
        None => Vec::new(),
    };

    let pcm_hash = write_wav(&options.output, &converted, options.encoding)
        .step(error_codes::OUTPUT_WRITE)?;

    Ok(ConvertResult {
        input: options.input.display().to_string(),
        output: options.output.display().to_string(),
        source_rate: request.source_rate,
        target_rate: request.target_rate,
        strategy: request.strategy.name().to_string(),
        filter_order: match request.strategy {
            Strategy::TimeDomain { filter_order } => Some(filter_order),
            Strategy::FrequencyDomain => None,
        },
        factor,
        channels: converted.channel_count(),
        input_frames: audio.frames(),
        output_frames: converted.frames(),
        pcm_hash,
        spectra,
    })
}

/// Spectra of one channel, tagged with its file name suffix.
struct ChannelSpectra {
    suffix: String,
    snapshot: SpectralSnapshot,
}

/// Captures original and processed spectra for every channel.
///
/// Channels too short to analyze are skipped with a warning; the dump is
/// diagnostic and never decides the outcome of a conversion.
fn capture_spectra(
    input: &DecodedAudio,
    output: &DecodedAudio,
    request: &ConversionRequest,
) -> Result<Vec<ChannelSpectra>> {
    let multi = input.channel_count() > 1;
    let mut captured = Vec::new();
    for (index, (before, after)) in input.channels.iter().zip(&output.channels).enumerate() {
        let before = SampleBuffer::new(before.clone(), input.sample_rate)?;
        let after = SampleBuffer::new(after.clone(), output.sample_rate)?;
        match snapshot(&before, &after, request) {
            Ok(snapshot) => captured.push(ChannelSpectra {
                suffix: if multi {
                    format!("_ch{}", index)
                } else {
                    String::new()
                },
                snapshot,
            }),
            Err(DspError::InsufficientSignalLength { len, min }) => warn!(
                channel = index,
                len, min, "input too short for spectral analysis; dump skipped"
            ),
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to analyze channel {}", index))
            }
        }
    }
    Ok(captured)
}

/// Writes `fft_original.dat` and `fft_processed.dat` per channel, with a
/// `_ch{N}` suffix when there is more than one channel.
fn write_spectra(dir: &Path, captured: &[ChannelSpectra]) -> Result<Vec<String>> {
    if captured.is_empty() {
        return Ok(Vec::new());
    }
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let mut written = Vec::new();
    for channel in captured {
        let original = dir.join(format!("fft_original{}.dat", channel.suffix));
        write_dump(&original, &channel.snapshot.original)?;
        written.push(original.display().to_string());

        match &channel.snapshot.processed {
            Some(spectrum) => {
                let processed = dir.join(format!("fft_processed{}.dat", channel.suffix));
                write_dump(&processed, spectrum)?;
                written.push(processed.display().to_string());
            }
            None => warn!(
                suffix = %channel.suffix,
                "output too short for spectral analysis; processed dump skipped"
            ),
        }
    }
    Ok(written)
}

fn write_dump(path: &Path, spectrum: &Spectrum) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    write_magnitudes(&mut BufWriter::new(file), spectrum)
        .with_context(|| format!("Failed to write {}", path.display()))
}

fn print_human(result: &ConvertResult) {
    println!("{}", "Converted:".cyan().bold());
    println!("  {} {}", "Input:".dimmed(), result.input);
    println!("  {} {}", "Output:".dimmed(), result.output);
    println!(
        "  {} {} Hz -> {} Hz (factor {})",
        "Rate:".dimmed(),
        result.source_rate,
        result.target_rate,
        result.factor
    );
    match result.filter_order {
        Some(order) => println!(
            "  {} {} (order {})",
            "Strategy:".dimmed(),
            result.strategy,
            order
        ),
        None => println!("  {} {}", "Strategy:".dimmed(), result.strategy),
    }
    println!(
        "  {} {} ch, {} -> {} frames",
        "Audio:".dimmed(),
        result.channels,
        result.input_frames,
        result.output_frames
    );
    println!("  {} {}", "PCM hash:".dimmed(), &result.pcm_hash[..16]);
    for path in &result.spectra {
        println!("  {} {}", "Spectrum:".dimmed(), path);
    }
    println!("{}", "Done.".green().bold());
}
