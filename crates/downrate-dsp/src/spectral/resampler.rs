//! Brick-wall spectral truncation.

use rustfft::num_complex::Complex;
use tracing::debug;

use super::Spectrum;
use crate::error::{DspError, DspResult};

/// First bin removed when reducing `original_rate` to `target_rate`.
///
/// `floor(target_rate * len / (2 * original_rate))`, computed in integer
/// arithmetic.
pub fn cutoff_bin(len: usize, original_rate: u32, target_rate: u32) -> usize {
    if original_rate == 0 {
        return 0;
    }
    let numerator = u128::from(target_rate) * len as u128;
    let denominator = 2 * u128::from(original_rate);
    (numerator / denominator) as usize
}

/// Zeroes every bin at or above the target Nyquist.
///
/// A bin `k` is kept when `min(k, N - k) < cutoff_bin`, so each retained bin's
/// conjugate partner is retained too and the inverse transform stays real.
/// A cutoff of zero silences the spectrum. The spectrum passes through when
/// `2 * cutoff_bin >= N` or the target rate is at or above the original. For
/// odd `N` that is stricter than `cutoff_bin >= N / 2`: with `N = 513` and a
/// cutoff of 256, bins 256 and 257 are still zeroed so they stay a pair.
///
/// # Errors
/// `InvalidParameter` if `original_rate` is zero or `target_rate` exceeds it.
pub fn truncate(spectrum: &Spectrum, original_rate: u32, target_rate: u32) -> DspResult<Spectrum> {
    if original_rate == 0 {
        return Err(DspError::invalid_param("original_rate", "must be positive"));
    }
    if target_rate > original_rate {
        return Err(DspError::invalid_param(
            "target_rate",
            format!(
                "{} Hz exceeds the original rate of {} Hz",
                target_rate, original_rate
            ),
        ));
    }

    let n = spectrum.len();
    let cutoff = cutoff_bin(n, original_rate, target_rate);
    debug!(len = n, cutoff, original_rate, target_rate, "truncating spectrum");

    if target_rate == original_rate || 2 * cutoff >= n {
        return Ok(spectrum.clone());
    }

    let bins: Vec<Complex<f64>> = spectrum
        .bins()
        .iter()
        .enumerate()
        .map(|(k, &bin)| {
            if k.min(n - k) < cutoff {
                bin
            } else {
                Complex::new(0.0, 0.0)
            }
        })
        .collect();

    Ok(Spectrum::from_bins(bins))
}
