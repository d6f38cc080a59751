//! Conversion entry point.
//!
//! Runs one of the two strategies described by a [`ConversionRequest`]:
//!
//! - **Time domain**: design a low-pass at `target_rate / 2`, convolve, then
//!   decimate.
//! - **Frequency domain**: analyze, truncate above the target Nyquist,
//!   synthesize, then decimate.
//!
//! Both end with the same decimation step, so the output of either strategy
//! holds `ceil(len / factor)` samples and is tagged with `target_rate`.

use tracing::{debug, warn};

use crate::buffer::SampleBuffer;
use crate::convolve::{convolve_with, ConvolutionMethod};
use crate::decimate::decimate;
use crate::error::{DspError, DspResult};
use crate::fir::design_lowpass;
use crate::request::{ConversionRequest, Strategy};
use crate::spectral;

/// Converts `input` to `request.target_rate`.
///
/// Errors from any stage are returned unchanged; no partial output is
/// produced.
///
/// # Errors
/// * `InvalidParameter` if the request is invalid or the buffer's rate does
///   not match `request.source_rate`
/// * `InsufficientSignalLength` for frequency-domain requests on buffers
///   shorter than [`spectral::MIN_ANALYSIS_LEN`]
/// * `NumericDegenerate` if any stage produces non-finite values
pub fn convert(input: &SampleBuffer, request: &ConversionRequest) -> DspResult<SampleBuffer> {
    convert_with(input, request, ConvolutionMethod::Auto)
}

/// Like [`convert`], with an explicit convolution method for the time-domain
/// strategy.
pub fn convert_with(
    input: &SampleBuffer,
    request: &ConversionRequest,
    method: ConvolutionMethod,
) -> DspResult<SampleBuffer> {
    request.validate()?;
    if input.sample_rate() != request.source_rate {
        return Err(DspError::invalid_param(
            "source_rate",
            format!(
                "request says {} Hz but the buffer is tagged {} Hz",
                request.source_rate,
                input.sample_rate()
            ),
        ));
    }

    let factor = request.factor()?;
    if !request.is_integer_ratio() {
        warn!(
            source_rate = request.source_rate,
            target_rate = request.target_rate,
            factor,
            effective_rate = request.source_rate as f64 / factor as f64,
            "non-integer rate ratio rounded"
        );
    }
    debug!(
        strategy = request.strategy.name(),
        len = input.len(),
        factor,
        "converting"
    );

    let filtered = match request.strategy {
        Strategy::TimeDomain { filter_order } => {
            let coeffs = design_lowpass(
                filter_order,
                request.target_rate as f64 / 2.0,
                request.source_rate as f64,
            )?;
            convolve_with(input, &coeffs, method)?
        }
        Strategy::FrequencyDomain => {
            let spectrum = spectral::analyze(input)?;
            let truncated =
                spectral::truncate(&spectrum, request.source_rate, request.target_rate)?;
            spectral::synthesize(&truncated, request.source_rate)?
        }
    };

    let output = decimate(&filtered, factor)?.with_rate(request.target_rate);
    debug!(len = output.len(), rate = output.sample_rate(), "converted");
    Ok(output)
}
