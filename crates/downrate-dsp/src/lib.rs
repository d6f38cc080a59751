//! Downrate DSP Core
//!
//! This crate reduces the sample rate of mono PCM audio while suppressing
//! content above the new Nyquist limit.
//!
//! # Overview
//!
//! Two strategies are supported, selected through [`Strategy`] on a
//! [`ConversionRequest`]:
//!
//! - **Time domain** - Hamming-windowed sinc FIR low-pass, causal
//!   convolution, then integer decimation
//! - **Frequency domain** - forward transform, brick-wall truncation that
//!   keeps conjugate pairs intact, inverse transform, then integer decimation
//!
//! Every operation is a pure function over buffers. Nothing is cached
//! between calls and transform scratch memory lives only for the call that
//! uses it.
//!
//! # Example
//!
//! ```
//! use downrate_dsp::{convert, ConversionRequest, SampleBuffer};
//!
//! let samples: Vec<f64> = (0..4800)
//!     .map(|i| (2.0 * std::f64::consts::PI * 440.0 * i as f64 / 48000.0).sin())
//!     .collect();
//! let input = SampleBuffer::new(samples, 48000).unwrap();
//!
//! let request = ConversionRequest::time_domain(48000, 16000, 64);
//! let output = convert(&input, &request).unwrap();
//!
//! assert_eq!(output.sample_rate(), 16000);
//! assert_eq!(output.len(), 1600);
//! ```
//!
//! # Crate Structure
//!
//! - [`convert()`] - Main entry point, runs either strategy
//! - [`fir`] - Windowed-sinc low-pass design
//! - [`convolve`] - Direct and FFT convolution
//! - [`decimate`] - Integer-stride decimation
//! - [`spectral`] - Forward transform, truncation, inverse transform
//! - [`diagnostics`] - Plain-text magnitude dumps

pub mod buffer;
pub mod convert;
pub mod convolve;
pub mod decimate;
pub mod diagnostics;
pub mod error;
pub mod fir;
pub mod request;
pub mod spectral;

// Re-export main types at crate root
pub use buffer::SampleBuffer;
pub use convert::{convert, convert_with};
pub use convolve::ConvolutionMethod;
pub use error::{DspError, DspResult};
pub use fir::{design_lowpass, FilterCoefficients};
pub use request::{ConversionRequest, RatioPolicy, Strategy};
pub use spectral::Spectrum;
