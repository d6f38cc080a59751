//! Causal FIR convolution.
//!
//! The output has the same length as the input. Samples before the start of
//! the buffer are treated as zero:
//!
//! ```text
//! y[n] = sum_{k=0}^{min(n, M-1)} h[k] * x[n-k]
//! ```

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;
use tracing::debug;

use crate::buffer::SampleBuffer;
use crate::error::{ensure_finite, DspResult};
use crate::fir::FilterCoefficients;

/// Tap count above which [`ConvolutionMethod::Auto`] switches to FFT.
pub const FFT_TAP_THRESHOLD: usize = 128;

/// FFT block size as a multiple of the tap count, before rounding up to a
/// power of two.
const OLA_BLOCK_FACTOR: usize = 4;

/// How to evaluate the convolution sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConvolutionMethod {
    /// Direct O(L·M) summation.
    Direct,
    /// Block overlap-add FFT, O(L log M) with scratch bounded by the filter
    /// length.
    Fft,
    /// FFT when the filter has more than [`FFT_TAP_THRESHOLD`] taps.
    #[default]
    Auto,
}

impl ConvolutionMethod {
    fn resolve(self, taps: usize) -> Self {
        match self {
            ConvolutionMethod::Auto if taps > FFT_TAP_THRESHOLD => ConvolutionMethod::Fft,
            ConvolutionMethod::Auto => ConvolutionMethod::Direct,
            other => other,
        }
    }
}

/// Convolves `input` with `coeffs` using the given method.
///
/// Both methods produce the same output up to floating point rounding.
pub fn convolve_with(
    input: &SampleBuffer,
    coeffs: &FilterCoefficients,
    method: ConvolutionMethod,
) -> DspResult<SampleBuffer> {
    let method = method.resolve(coeffs.len());
    debug!(
        len = input.len(),
        taps = coeffs.len(),
        ?method,
        "convolving"
    );
    let output = match method {
        ConvolutionMethod::Fft => fft_convolve(input.samples(), coeffs.taps()),
        _ => direct_convolve(input.samples(), coeffs.taps()),
    };
    ensure_finite(&output, "convolution")?;
    Ok(SampleBuffer::from_parts(output, input.sample_rate()))
}

/// Convolves `input` with `coeffs` by direct summation.
pub fn convolve(input: &SampleBuffer, coeffs: &FilterCoefficients) -> DspResult<SampleBuffer> {
    convolve_with(input, coeffs, ConvolutionMethod::Direct)
}

/// Convolves `input` with `coeffs` through the frequency domain.
pub fn convolve_fft(input: &SampleBuffer, coeffs: &FilterCoefficients) -> DspResult<SampleBuffer> {
    convolve_with(input, coeffs, ConvolutionMethod::Fft)
}

fn direct_convolve(x: &[f64], h: &[f64]) -> Vec<f64> {
    (0..x.len())
        .map(|n| {
            let last = n.min(h.len() - 1);
            (0..=last).map(|k| h[k] * x[n - k]).sum::<f64>()
        })
        .collect()
}

fn fft_convolve(x: &[f64], h: &[f64]) -> Vec<f64> {
    if x.is_empty() {
        return Vec::new();
    }

    // Overlap-add: each block's linear convolution is exactly `size` long,
    // so nothing wraps around.
    let size = (OLA_BLOCK_FACTOR * h.len()).next_power_of_two();
    let block_len = size - h.len() + 1;

    let mut planner = FftPlanner::<f64>::new();
    let forward = planner.plan_fft_forward(size);
    let inverse = planner.plan_fft_inverse(size);
    let mut scratch = vec![
        Complex::new(0.0, 0.0);
        forward
            .get_inplace_scratch_len()
            .max(inverse.get_inplace_scratch_len())
    ];

    let mut kernel = padded(h, size);
    forward.process_with_scratch(&mut kernel, &mut scratch);

    let scale = size as f64;
    let mut output = vec![0.0; x.len()];
    let mut block = vec![Complex::new(0.0, 0.0); size];
    for (index, chunk) in x.chunks(block_len).enumerate() {
        let start = index * block_len;
        for (slot, &v) in block.iter_mut().zip(chunk) {
            *slot = Complex::new(v, 0.0);
        }
        block[chunk.len()..].fill(Complex::new(0.0, 0.0));

        forward.process_with_scratch(&mut block, &mut scratch);
        for (b, k) in block.iter_mut().zip(kernel.iter()) {
            *b *= *k;
        }
        inverse.process_with_scratch(&mut block, &mut scratch);

        for (y, c) in output[start..].iter_mut().zip(block.iter()) {
            *y += c.re / scale;
        }
    }
    output
}

fn padded(values: &[f64], size: usize) -> Vec<Complex<f64>> {
    let mut out: Vec<Complex<f64>> = values.iter().map(|&v| Complex::new(v, 0.0)).collect();
    out.resize(size, Complex::new(0.0, 0.0));
    out
}
