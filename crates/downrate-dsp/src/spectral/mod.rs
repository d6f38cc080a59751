//! Frequency-domain rate reduction.
//!
//! A real buffer is transformed to its spectrum, bins above the target
//! Nyquist are zeroed while keeping conjugate pairs intact, and the spectrum
//! is transformed back to real samples.

mod analyzer;
mod resampler;
mod synthesizer;


pub use analyzer::{analyze, MIN_ANALYSIS_LEN};
pub use resampler::{cutoff_bin, truncate};
pub use synthesizer::synthesize;

use rustfft::num_complex::Complex;

/// Complex spectrum of a buffer, one bin per input sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    bins: Vec<Complex<f64>>,
}

impl Spectrum {
    /// Wraps raw bins.
    pub fn from_bins(bins: Vec<Complex<f64>>) -> Self {
        Self { bins }
    }

    /// Returns the bins.
    pub fn bins(&self) -> &[Complex<f64>] {
        &self.bins
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Returns true if the spectrum has no bins.
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Magnitude `|X[k]|` of every bin.
    pub fn magnitudes(&self) -> Vec<f64> {
        self.bins.iter().map(|c| c.norm()).collect()
    }

    /// True if bin `k` and bin `N - k` are conjugates for every `k`.
    pub fn is_conjugate_symmetric(&self, tolerance: f64) -> bool {
        let n = self.bins.len();
        (1..n).all(|k| (self.bins[k] - self.bins[n - k].conj()).norm() <= tolerance)
            && self.bins.first().map_or(true, |dc| dc.im.abs() <= tolerance)
    }

    /// Consumes the spectrum and returns its bins.
    pub fn into_bins(self) -> Vec<Complex<f64>> {
        self.bins
    }
}
