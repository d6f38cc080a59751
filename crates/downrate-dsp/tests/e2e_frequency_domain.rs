//! End-to-end tests for the frequency-domain strategy.

use downrate_dsp::spectral::{analyze, synthesize, truncate};
use downrate_dsp::{convert, ConversionRequest, DspError, SampleBuffer};

const SOURCE_RATE: u32 = 8000;
const TARGET_RATE: u32 = 4000;
const LEN: usize = 4096;

fn sine(freq: f64, rate: u32, len: usize) -> SampleBuffer {
    let samples = (0..len)
        .map(|i| (2.0 * std::f64::consts::PI * freq * i as f64 / rate as f64).sin())
        .collect();
    SampleBuffer::new(samples, rate).unwrap()
}

/// Peak magnitude normalized so a full-scale on-bin sine reads 1.0.
fn peak_amplitude(buffer: &SampleBuffer) -> (usize, f64) {
    let spectrum = analyze(buffer).unwrap();
    let half = spectrum.len() / 2;
    spectrum.magnitudes()[..half]
        .iter()
        .enumerate()
        .map(|(k, &m)| (k, 2.0 * m / spectrum.len() as f64))
        .fold((0, 0.0), |best, cur| if cur.1 > best.1 { cur } else { best })
}

#[test]
fn test_tone_below_new_nyquist_keeps_peak() {
    // 500 Hz sits on bin 256 of the input and of the halved output
    let input = sine(500.0, SOURCE_RATE, LEN);
    let (in_bin, in_peak) = peak_amplitude(&input);

    let request = ConversionRequest::frequency_domain(SOURCE_RATE, TARGET_RATE);
    let output = convert(&input, &request).unwrap();
    assert_eq!(output.len(), LEN / 2);
    assert_eq!(output.sample_rate(), TARGET_RATE);

    let (out_bin, out_peak) = peak_amplitude(&output);
    assert_eq!(in_bin, 256);
    assert_eq!(out_bin, 256);
    assert!((in_peak - 1.0).abs() < 1e-9);
    assert!((out_peak - in_peak).abs() < 1e-6, "peak {}", out_peak);
}

#[test]
fn test_tone_above_new_nyquist_removed() {
    let input = sine(3000.0, SOURCE_RATE, LEN);
    let request = ConversionRequest::frequency_domain(SOURCE_RATE, TARGET_RATE);
    let output = convert(&input, &request).unwrap();

    let (_, out_peak) = peak_amplitude(&output);
    assert!(out_peak < 1e-9, "residual {}", out_peak);
}

#[test]
fn test_mixture_keeps_only_low_tone() {
    let low = sine(500.0, SOURCE_RATE, LEN);
    let high = sine(3000.0, SOURCE_RATE, LEN);
    let mixed: Vec<f64> = low
        .samples()
        .iter()
        .zip(high.samples())
        .map(|(a, b)| 0.5 * a + 0.5 * b)
        .collect();
    let input = SampleBuffer::new(mixed, SOURCE_RATE).unwrap();

    let output = convert(&input, &ConversionRequest::frequency_domain(SOURCE_RATE, TARGET_RATE))
        .unwrap();

    // Output equals the decimated low tone at half amplitude
    for (i, &y) in output.samples().iter().enumerate() {
        let expected = 0.5 * low.samples()[i * 2];
        assert!((y - expected).abs() < 1e-9, "sample {}", i);
    }
}

#[test]
fn test_same_rate_round_trip() {
    let input = sine(1234.5, SOURCE_RATE, 1000);
    let output =
        convert(&input, &ConversionRequest::frequency_domain(SOURCE_RATE, SOURCE_RATE)).unwrap();
    assert_eq!(output.len(), input.len());
    for (a, b) in input.samples().iter().zip(output.samples()) {
        assert!((a - b).abs() < 1e-9);
    }
}

#[test]
fn test_zero_target_spectrum_synthesizes_silence() {
    let input = sine(440.0, SOURCE_RATE, 600);
    let silenced = truncate(&analyze(&input).unwrap(), SOURCE_RATE, 0).unwrap();
    let samples = synthesize(&silenced, SOURCE_RATE).unwrap();
    assert!(samples.samples().iter().all(|&x| x == 0.0));
}

#[test]
fn test_short_input_rejected() {
    let input = sine(440.0, SOURCE_RATE, 511);
    let err =
        convert(&input, &ConversionRequest::frequency_domain(SOURCE_RATE, TARGET_RATE)).unwrap_err();
    assert_eq!(err, DspError::InsufficientSignalLength { len: 511, min: 512 });
}
