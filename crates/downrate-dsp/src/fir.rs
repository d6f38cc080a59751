//! Windowed-sinc FIR low-pass design.
//!
//! Taps approximate the ideal low-pass impulse response (a sinc) truncated
//! to `filter_order + 1` samples and tapered with a Hamming window to limit
//! passband ripple and stopband leakage.

use std::f64::consts::PI;

use tracing::debug;

use crate::error::{DspError, DspResult};

/// FIR filter taps, `filter_order + 1` long.
///
/// Taps are symmetric around the centre, giving a linear-phase filter.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCoefficients {
    taps: Vec<f64>,
}

impl FilterCoefficients {
    /// Wraps an arbitrary tap vector.
    ///
    /// # Errors
    /// * `InvalidParameter` if `taps` is empty
    /// * `NumericDegenerate` if any tap is not finite
    pub fn from_taps(taps: Vec<f64>) -> DspResult<Self> {
        if taps.is_empty() {
            return Err(DspError::invalid_param("taps", "must not be empty"));
        }
        crate::error::ensure_finite(&taps, "filter design")?;
        Ok(Self { taps })
    }

    /// Returns the taps.
    pub fn taps(&self) -> &[f64] {
        &self.taps
    }

    /// Number of taps.
    pub fn len(&self) -> usize {
        self.taps.len()
    }

    /// Returns true if there are no taps.
    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    /// Filter order (tap count minus one).
    pub fn order(&self) -> usize {
        self.taps.len() - 1
    }

    /// Sum of the taps, i.e. the filter's gain at DC.
    pub fn dc_gain(&self) -> f64 {
        self.taps.iter().sum()
    }
}

/// Hamming window weight for tap `i` of a filter of the given order.
#[inline]
fn hamming(i: usize, filter_order: usize) -> f64 {
    0.54 - 0.46 * (2.0 * PI * i as f64 / filter_order as f64).cos()
}

/// Designs a Hamming-windowed sinc low-pass filter.
///
/// The centre of the impulse response sits at `filter_order / 2`. For an even
/// order that is a whole tap, which takes the sinc's peak value (the normalized
/// cutoff). For an odd order the centre falls between two taps and every tap
/// is a windowed sinc sample; the result is still symmetric.
///
/// # Arguments
/// * `filter_order` - Filter order; the result has `filter_order + 1` taps
/// * `cutoff_frequency` - Cutoff in Hz, `0 < cutoff < sampling_rate / 2`
/// * `sampling_rate` - Sample rate in Hz
///
/// # Errors
/// `InvalidParameter` for a zero order, a non-positive sampling rate, or a
/// cutoff outside `(0, sampling_rate / 2)`.
pub fn design_lowpass(
    filter_order: usize,
    cutoff_frequency: f64,
    sampling_rate: f64,
) -> DspResult<FilterCoefficients> {
    if filter_order == 0 {
        return Err(DspError::invalid_param("filter_order", "must be positive"));
    }
    if !(sampling_rate.is_finite() && sampling_rate > 0.0) {
        return Err(DspError::invalid_param(
            "sampling_rate",
            format!("must be positive, got {}", sampling_rate),
        ));
    }
    let nyquist = sampling_rate / 2.0;
    if !(cutoff_frequency.is_finite() && cutoff_frequency > 0.0) {
        return Err(DspError::invalid_param(
            "cutoff_frequency",
            format!("must be positive, got {}", cutoff_frequency),
        ));
    }
    if cutoff_frequency >= nyquist {
        return Err(DspError::invalid_param(
            "cutoff_frequency",
            format!(
                "{} Hz is at or above the Nyquist frequency ({} Hz)",
                cutoff_frequency, nyquist
            ),
        ));
    }

    let norm_cutoff = cutoff_frequency / nyquist;
    let centre = filter_order as f64 / 2.0;

    let taps: Vec<f64> = (0..=filter_order)
        .map(|i| {
            let offset = i as f64 - centre;
            if offset == 0.0 {
                norm_cutoff
            } else {
                let sinc = (PI * norm_cutoff * offset).sin() / (PI * offset);
                sinc * hamming(i, filter_order)
            }
        })
        .collect();

    debug!(
        filter_order,
        cutoff_frequency, sampling_rate, norm_cutoff, "designed low-pass taps"
    );

    FilterCoefficients::from_taps(taps)
}
