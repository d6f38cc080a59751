//! JSON output types for machine-readable CLI output.
//!
//! These types back the `--json` flag on every command.

use downrate_dsp::DspError;
use serde::{Deserialize, Serialize};

/// Error codes for CLI operations.
///
/// Conversion errors pass through the core's `DSP_XXX` codes; everything
/// else uses a `CLI_XXX` code.
pub mod error_codes {
    /// Input file could not be read or decoded
    pub const INPUT_READ: &str = "CLI_001";
    /// Request file could not be read or parsed, or no target rate was given
    pub const REQUEST: &str = "CLI_002";
    /// Output file could not be written
    pub const OUTPUT_WRITE: &str = "CLI_003";
    /// Any other failure
    pub const INTERNAL: &str = "CLI_004";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "DSP_002")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// File the error relates to (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
        }
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Builds an error from an `anyhow` chain.
    ///
    /// Core errors keep their own code; others get `fallback_code`.
    pub fn from_anyhow(err: &anyhow::Error, fallback_code: &str) -> Self {
        let code = err
            .chain()
            .find_map(|cause| cause.downcast_ref::<DspError>())
            .map_or(fallback_code, |e| e.code());
        Self::new(code, format!("{:#}", err))
    }
}

/// Result details for a successful `convert`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConvertResult {
    /// Input WAV path
    pub input: String,
    /// Output WAV path
    pub output: String,
    /// Input sample rate in Hz
    pub source_rate: u32,
    /// Output sample rate in Hz
    pub target_rate: u32,
    /// Strategy name ("time_domain" or "frequency_domain")
    pub strategy: String,
    /// FIR order (time domain only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_order: Option<usize>,
    /// Decimation factor
    pub factor: usize,
    /// Number of channels written
    pub channels: usize,
    /// Frames read
    pub input_frames: usize,
    /// Frames written
    pub output_frames: usize,
    /// BLAKE3 hash of the encoded output samples
    pub pcm_hash: String,
    /// Magnitude dump files written
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spectra: Vec<String>,
}

/// JSON output for the `convert` command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConvertOutput {
    /// Whether the conversion succeeded
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Conversion details (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ConvertResult>,
}

impl ConvertOutput {
    /// Creates a successful output.
    pub fn success(result: ConvertResult) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    /// Creates a failed output.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }
}

/// JSON output for the `design` command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DesignOutput {
    /// Filter order
    pub filter_order: usize,
    /// Cutoff frequency in Hz
    pub cutoff: f64,
    /// Sample rate in Hz
    pub sample_rate: f64,
    /// Filter gain at DC
    pub dc_gain: f64,
    /// Filter taps
    pub taps: Vec<f64>,
}

/// JSON output for the `spectrum` command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpectrumOutput {
    /// Input WAV path
    pub input: String,
    /// Magnitude dump path
    pub output: String,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of bins written
    pub bins: usize,
    /// Strongest bin below Nyquist
    pub peak_bin: usize,
    /// Frequency of the strongest bin in Hz
    pub peak_frequency: f64,
}
