//! Property-based tests for the conversion building blocks.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p downrate-dsp --test proptest_properties
//! ```

use proptest::prelude::*;

use downrate_dsp::convolve::{convolve, convolve_fft};
use downrate_dsp::decimate::decimate;
use downrate_dsp::spectral::{analyze, synthesize, truncate, MIN_ANALYSIS_LEN};
use downrate_dsp::{convert, design_lowpass, ConversionRequest, RatioPolicy, SampleBuffer};

fn samples(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0f64..1.0, min_len..max_len)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Designed filters have order + 1 taps and are symmetric.
    #[test]
    fn filter_taps_symmetric(
        order in 1usize..200,
        cutoff_fraction in 0.01f64..0.49,
        rate in 1000u32..96000,
    ) {
        let rate = rate as f64;
        let coeffs = design_lowpass(order, cutoff_fraction * rate, rate).unwrap();
        prop_assert_eq!(coeffs.len(), order + 1);
        let taps = coeffs.taps();
        for i in 0..=order {
            prop_assert!((taps[i] - taps[order - i]).abs() < 1e-12);
        }
    }

    /// Cutoffs at or above Nyquist are always rejected.
    #[test]
    fn cutoff_at_or_above_nyquist_rejected(
        order in 1usize..64,
        excess in 0.0f64..10000.0,
        rate in 1000u32..96000,
    ) {
        let rate = rate as f64;
        prop_assert!(design_lowpass(order, rate / 2.0 + excess, rate).is_err());
    }

    /// An impulse at `p` reproduces the taps shifted to start at `p`.
    #[test]
    fn impulse_reproduces_shifted_taps(
        order in 1usize..48,
        len in 1usize..200,
        position_seed in 0usize..1000,
    ) {
        let position = position_seed % len;
        let mut input = vec![0.0; len];
        input[position] = 1.0;
        let input = SampleBuffer::new(input, 8000).unwrap();
        let coeffs = design_lowpass(order, 1000.0, 8000.0).unwrap();
        let output = convolve(&input, &coeffs).unwrap();

        prop_assert_eq!(output.len(), len);
        for (n, &y) in output.samples().iter().enumerate() {
            let expected = if n >= position {
                coeffs.taps().get(n - position).copied().unwrap_or(0.0)
            } else {
                0.0
            };
            prop_assert!((y - expected).abs() < 1e-12);
        }
    }

    /// FFT convolution agrees with direct summation.
    #[test]
    fn fft_convolution_matches_direct(
        input in samples(1, 400),
        order in 1usize..160,
    ) {
        let input = SampleBuffer::new(input, 16000).unwrap();
        let coeffs = design_lowpass(order, 3000.0, 16000.0).unwrap();
        let direct = convolve(&input, &coeffs).unwrap();
        let fft = convolve_fft(&input, &coeffs).unwrap();
        for (a, b) in direct.samples().iter().zip(fft.samples()) {
            prop_assert!((a - b).abs() < 1e-9);
        }
    }

    /// Decimation keeps every factor-th sample and ceil(len / factor) of them.
    #[test]
    fn decimation_picks_every_nth(input in samples(0, 300), factor in 1usize..20) {
        let input = SampleBuffer::new(input, 44100).unwrap();
        let output = decimate(&input, factor).unwrap();
        prop_assert_eq!(output.len(), (input.len() + factor - 1) / factor);
        for (i, &y) in output.samples().iter().enumerate() {
            prop_assert_eq!(y, input.samples()[i * factor]);
        }
    }

    /// Analysis followed by synthesis reconstructs the buffer.
    #[test]
    fn spectral_round_trip(input in samples(MIN_ANALYSIS_LEN, 1300)) {
        let input = SampleBuffer::new(input, 22050).unwrap();
        let restored = synthesize(&analyze(&input).unwrap(), 22050).unwrap();
        prop_assert_eq!(restored.len(), input.len());
        for (a, b) in input.samples().iter().zip(restored.samples()) {
            prop_assert!((a - b).abs() < 1e-9);
        }
    }

    /// Truncated spectra stay conjugate symmetric.
    #[test]
    fn truncation_preserves_symmetry(
        input in samples(MIN_ANALYSIS_LEN, 1100),
        target in 0u32..=48000,
    ) {
        let input = SampleBuffer::new(input, 48000).unwrap();
        let truncated = truncate(&analyze(&input).unwrap(), 48000, target).unwrap();
        prop_assert!(truncated.is_conjugate_symmetric(1e-9));
    }

    /// Both strategies produce ceil(len / factor) samples at the target rate.
    #[test]
    fn conversion_output_shape(
        input in samples(MIN_ANALYSIS_LEN, 1500),
        target in 1000u32..=48000,
        frequency_domain in any::<bool>(),
    ) {
        let input = SampleBuffer::new(input, 48000).unwrap();
        let request = if frequency_domain || target == 48000 {
            ConversionRequest::frequency_domain(48000, target)
        } else {
            ConversionRequest::time_domain(48000, target, 32)
        }
        .with_ratio_policy(RatioPolicy::Nearest);

        let factor = request.factor().unwrap();
        let output = convert(&input, &request).unwrap();
        prop_assert_eq!(output.sample_rate(), target);
        prop_assert_eq!(output.len(), (input.len() + factor - 1) / factor);
    }
}
