//! Inverse transform back to real samples.

use rustfft::FftPlanner;
use tracing::debug;

use super::Spectrum;
use crate::buffer::SampleBuffer;
use crate::error::{ensure_finite, DspError, DspResult};

/// Computes `x[n] = (1/N) * sum_k X[k] * exp(2*pi*i*k*n/N)` and keeps the
/// real part.
///
/// Residual imaginary parts from rounding are discarded. The result is tagged
/// with `sample_rate`; synthesis alone never changes the sample count.
///
/// # Errors
/// * `InvalidParameter` if `sample_rate` is zero
/// * `NumericDegenerate` if the transform produces non-finite samples
pub fn synthesize(spectrum: &Spectrum, sample_rate: u32) -> DspResult<SampleBuffer> {
    if sample_rate == 0 {
        return Err(DspError::invalid_param("sample_rate", "must be positive"));
    }
    let n = spectrum.len();
    if n == 0 {
        return Ok(SampleBuffer::from_parts(Vec::new(), sample_rate));
    }

    let mut bins = spectrum.bins().to_vec();
    let mut planner = FftPlanner::<f64>::new();
    let ifft = planner.plan_fft_inverse(n);
    let mut scratch = vec![Default::default(); ifft.get_inplace_scratch_len()];
    ifft.process_with_scratch(&mut bins, &mut scratch);

    let scale = n as f64;
    let samples: Vec<f64> = bins.iter().map(|c| c.re / scale).collect();
    ensure_finite(&samples, "inverse transform")?;

    debug!(len = n, sample_rate, "synthesized samples");
    Ok(SampleBuffer::from_parts(samples, sample_rate))
}
