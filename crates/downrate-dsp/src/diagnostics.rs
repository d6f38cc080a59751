//! Spectral magnitude dumps for offline inspection.
//!
//! Nothing here is part of the conversion contract. The plain-text format is
//! one magnitude per line, bin 0 first.

use std::io::{self, Write};

use tracing::debug;

use crate::buffer::SampleBuffer;
use crate::error::{DspError, DspResult};
use crate::request::{ConversionRequest, Strategy};
use crate::spectral::{self, Spectrum};

/// Writes `|X[k]|` for every bin, one value per line.
pub fn write_magnitudes<W: Write>(writer: &mut W, spectrum: &Spectrum) -> io::Result<()> {
    for magnitude in spectrum.magnitudes() {
        writeln!(writer, "{}", magnitude)?;
    }
    writer.flush()
}

/// Magnitudes captured before and after a conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralSnapshot {
    /// Spectrum of the input buffer.
    pub original: Spectrum,
    /// Spectrum after processing, if one could be computed.
    ///
    /// For frequency-domain requests this is the truncated spectrum. For
    /// time-domain requests it is the spectrum of the output buffer, absent
    /// when the output is shorter than [`spectral::MIN_ANALYSIS_LEN`].
    pub processed: Option<Spectrum>,
}

/// Captures the spectra around a conversion of `input` into `output`.
///
/// # Errors
/// Fails like [`spectral::analyze`] on the input buffer.
pub fn snapshot(
    input: &SampleBuffer,
    output: &SampleBuffer,
    request: &ConversionRequest,
) -> DspResult<SpectralSnapshot> {
    let original = spectral::analyze(input)?;
    let processed = match request.strategy {
        Strategy::FrequencyDomain => Some(spectral::truncate(
            &original,
            request.source_rate,
            request.target_rate,
        )?),
        Strategy::TimeDomain { .. } => match spectral::analyze(output) {
            Ok(spectrum) => Some(spectrum),
            Err(DspError::InsufficientSignalLength { len, min }) => {
                debug!(len, min, "output too short for a processed spectrum");
                None
            }
            Err(err) => return Err(err),
        },
    };
    Ok(SpectralSnapshot {
        original,
        processed,
    })
}
