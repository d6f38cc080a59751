//! WAV decode/encode and per-channel conversion.
//!
//! The conversion core works on one mono channel at a time. Multi-channel
//! files are split into channels here, each channel is converted with the
//! same request, and the results are interleaved again on output.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;

use anyhow::{Context, Result};
use downrate_dsp::{convert, ConversionRequest, DspResult, SampleBuffer};
use tracing::debug;

/// Decoded audio, one sample vector per channel.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    /// Per-channel samples normalized to [-1.0, 1.0].
    pub channels: Vec<Vec<f64>>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl DecodedAudio {
    /// Number of channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Number of frames (samples per channel).
    pub fn frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }

    /// Averages all channels into one.
    pub fn downmix(&self) -> DecodedAudio {
        DecodedAudio {
            channels: vec![downmix(&self.channels)],
            sample_rate: self.sample_rate,
        }
    }

    /// Converts every channel with the same request.
    ///
    /// Fails on the first channel that fails; no partial result is returned.
    pub fn convert(&self, request: &ConversionRequest) -> DspResult<DecodedAudio> {
        let mut channels = Vec::with_capacity(self.channels.len());
        for (index, samples) in self.channels.iter().enumerate() {
            debug!(channel = index, frames = samples.len(), "converting channel");
            let buffer = SampleBuffer::new(samples.clone(), self.sample_rate)?;
            channels.push(convert(&buffer, request)?.into_samples());
        }
        Ok(DecodedAudio {
            channels,
            sample_rate: request.target_rate,
        })
    }
}

/// Sample encoding for written WAV files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputEncoding {
    /// 16-bit signed integer PCM.
    #[default]
    Pcm16,
    /// 32-bit IEEE float.
    Float32,
}

/// Splits interleaved frames into per-channel vectors.
///
/// A trailing partial frame is dropped.
pub fn deinterleave(samples: &[f64], channels: usize) -> Vec<Vec<f64>> {
    if channels == 0 {
        return Vec::new();
    }
    let frames = samples.len() / channels;
    let mut out = vec![Vec::with_capacity(frames); channels];
    for frame in samples.chunks_exact(channels) {
        for (channel, &sample) in out.iter_mut().zip(frame) {
            channel.push(sample);
        }
    }
    out
}

/// Interleaves per-channel vectors into frames.
///
/// Channels shorter than the first are padded with silence.
pub fn interleave(channels: &[Vec<f64>]) -> Vec<f64> {
    let frames = channels.first().map_or(0, Vec::len);
    let mut out = Vec::with_capacity(frames * channels.len());
    for i in 0..frames {
        for channel in channels {
            out.push(channel.get(i).copied().unwrap_or(0.0));
        }
    }
    out
}

/// Averages channels sample by sample.
pub fn downmix(channels: &[Vec<f64>]) -> Vec<f64> {
    let frames = channels.first().map_or(0, Vec::len);
    let count = channels.len() as f64;
    (0..frames)
        .map(|i| {
            channels
                .iter()
                .map(|c| c.get(i).copied().unwrap_or(0.0))
                .sum::<f64>()
                / count
        })
        .collect()
}

/// Reads a WAV file.
pub fn read_wav(path: &Path) -> Result<DecodedAudio> {
    let file =
        File::open(path).with_context(|| format!("Failed to open WAV file: {}", path.display()))?;
    decode_wav(BufReader::new(file))
        .with_context(|| format!("Failed to decode WAV file: {}", path.display()))
}

/// Decodes WAV data from any reader.
///
/// Integer PCM of any bit depth and 32-bit float are supported. Integer
/// samples are scaled to [-1.0, 1.0).
pub fn decode_wav<R: Read>(reader: R) -> Result<DecodedAudio> {
    let reader = hound::WavReader::new(reader).context("Invalid WAV header")?;
    let spec = reader.spec();
    if spec.channels == 0 {
        anyhow::bail!("WAV file declares zero channels");
    }

    let interleaved: Vec<f64> = match spec.sample_format {
        hound::SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f64 / max_val))
                .collect::<Result<_, _>>()
                .context("Failed to read integer samples")?
        }
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<Result<_, _>>()
            .context("Failed to read float samples")?,
    };

    debug!(
        channels = spec.channels,
        sample_rate = spec.sample_rate,
        bits = spec.bits_per_sample,
        samples = interleaved.len(),
        "decoded WAV"
    );

    Ok(DecodedAudio {
        channels: deinterleave(&interleaved, spec.channels as usize),
        sample_rate: spec.sample_rate,
    })
}

/// Writes a WAV file and returns the BLAKE3 hash of its sample data.
pub fn write_wav(path: &Path, audio: &DecodedAudio, encoding: OutputEncoding) -> Result<String> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create WAV file: {}", path.display()))?;
    encode_wav(BufWriter::new(file), audio, encoding)
        .with_context(|| format!("Failed to write WAV file: {}", path.display()))
}

/// Encodes audio as WAV and returns the BLAKE3 hash of the sample bytes.
///
/// Samples are clamped to [-1.0, 1.0] before encoding.
pub fn encode_wav<W: Write + Seek>(
    writer: W,
    audio: &DecodedAudio,
    encoding: OutputEncoding,
) -> Result<String> {
    let channels = u16::try_from(audio.channel_count())
        .context("Too many channels for a WAV file")?;
    let spec = match encoding {
        OutputEncoding::Pcm16 => hound::WavSpec {
            channels,
            sample_rate: audio.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        },
        OutputEncoding::Float32 => hound::WavSpec {
            channels,
            sample_rate: audio.sample_rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        },
    };

    let mut wav = hound::WavWriter::new(writer, spec)?;
    let mut hasher = blake3::Hasher::new();
    for sample in interleave(&audio.channels) {
        let clamped = sample.clamp(-1.0, 1.0);
        match encoding {
            OutputEncoding::Pcm16 => {
                let value = (clamped * i16::MAX as f64).round() as i16;
                hasher.update(&value.to_le_bytes());
                wav.write_sample(value)?;
            }
            OutputEncoding::Float32 => {
                let value = clamped as f32;
                hasher.update(&value.to_le_bytes());
                wav.write_sample(value)?;
            }
        }
    }
    wav.finalize()?;

    Ok(hasher.finalize().to_hex().to_string())
}
