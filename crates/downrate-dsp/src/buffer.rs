//! Mono PCM sample buffers.

use crate::error::{DspError, DspResult};

/// Mono PCM audio at a fixed sample rate.
///
/// Samples are normalized floating point values. A buffer is never mutated
/// after construction; every transformation yields a new buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    samples: Vec<f64>,
    sample_rate: u32,
}

impl SampleBuffer {
    /// Creates a buffer, validating the rate and sample values.
    ///
    /// # Errors
    /// * `InvalidParameter` if `sample_rate` is zero
    /// * `NumericDegenerate` if any sample is NaN or infinite
    pub fn new(samples: Vec<f64>, sample_rate: u32) -> DspResult<Self> {
        if sample_rate == 0 {
            return Err(DspError::invalid_param("sample_rate", "must be positive"));
        }
        crate::error::ensure_finite(&samples, "input")?;
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Wraps samples that a pipeline stage has already checked.
    pub(crate) fn from_parts(samples: Vec<f64>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Returns the samples.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Returns the sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Consumes the buffer and returns its samples.
    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }

    /// Returns the same samples tagged with another rate.
    pub(crate) fn with_rate(self, sample_rate: u32) -> Self {
        Self {
            samples: self.samples,
            sample_rate,
        }
    }
}
