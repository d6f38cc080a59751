//! Integer-stride decimation.
//!
//! No anti-aliasing is performed here. Callers must low-pass the signal
//! first, which is why both conversion strategies filter before decimating.

use crate::buffer::SampleBuffer;
use crate::error::{DspError, DspResult};

/// Keeps `x[0], x[factor], x[2*factor], ...`.
///
/// The output holds `ceil(len / factor)` samples and keeps the input's sample
/// rate tag; relabelling is the caller's decision. A factor of 1 is the
/// identity.
///
/// # Errors
/// `InvalidParameter` if `factor` is zero.
pub fn decimate(input: &SampleBuffer, factor: usize) -> DspResult<SampleBuffer> {
    if factor == 0 {
        return Err(DspError::invalid_param("factor", "must be at least 1"));
    }
    let samples: Vec<f64> = input.samples().iter().step_by(factor).copied().collect();
    Ok(SampleBuffer::from_parts(samples, input.sample_rate()))
}

/// Integer decimation factor for a rate pair, rounded to the nearest integer.
///
/// # Errors
/// `InvalidParameter` if either rate is zero or `target_rate` exceeds
/// `source_rate`.
pub fn decimation_factor(source_rate: u32, target_rate: u32) -> DspResult<usize> {
    if source_rate == 0 {
        return Err(DspError::invalid_param("source_rate", "must be positive"));
    }
    if target_rate == 0 {
        return Err(DspError::invalid_param("target_rate", "must be positive"));
    }
    if target_rate > source_rate {
        return Err(DspError::invalid_param(
            "target_rate",
            format!(
                "{} Hz exceeds the source rate of {} Hz",
                target_rate, source_rate
            ),
        ));
    }
    let source = u64::from(source_rate);
    let target = u64::from(target_rate);
    // Round half up in integer arithmetic
    let factor = (2 * source + target) / (2 * target);
    Ok(factor as usize)
}
