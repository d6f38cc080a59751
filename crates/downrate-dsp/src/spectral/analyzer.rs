//! Forward transform of real sample buffers.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;
use tracing::debug;

use super::Spectrum;
use crate::buffer::SampleBuffer;
use crate::error::{DspError, DspResult};

/// Shortest buffer accepted for spectral analysis.
///
/// Below this resolution truncation cannot meaningfully separate the target
/// passband from the stopband.
pub const MIN_ANALYSIS_LEN: usize = 512;

/// Computes `X[k] = sum_n x[n] * exp(-2*pi*i*k*n/N)` for every `k < N`.
///
/// The transform is unnormalized; [`super::synthesize`] applies the `1/N`.
///
/// # Errors
/// * `InsufficientSignalLength` if the buffer is shorter than
///   [`MIN_ANALYSIS_LEN`]
/// * `NumericDegenerate` if the transform produces non-finite bins
pub fn analyze(buffer: &SampleBuffer) -> DspResult<Spectrum> {
    let n = buffer.len();
    if n < MIN_ANALYSIS_LEN {
        return Err(DspError::InsufficientSignalLength {
            len: n,
            min: MIN_ANALYSIS_LEN,
        });
    }

    let mut bins: Vec<Complex<f64>> = buffer
        .samples()
        .iter()
        .map(|&s| Complex::new(s, 0.0))
        .collect();

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);
    let mut scratch = vec![Complex::new(0.0, 0.0); fft.get_inplace_scratch_len()];
    fft.process_with_scratch(&mut bins, &mut scratch);

    if bins.iter().any(|c| !(c.re.is_finite() && c.im.is_finite())) {
        return Err(DspError::degenerate("forward transform"));
    }

    debug!(len = n, "analyzed spectrum");
    Ok(Spectrum::from_bins(bins))
}
