//! Error types for the conversion core.

use thiserror::Error;

/// Result type for DSP operations.
pub type DspResult<T> = Result<T, DspError>;

/// Errors that can occur during rate conversion.
///
/// Every error is recoverable by the caller. Operations fail atomically and
/// never return partial output alongside an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DspError {
    /// A rate, order, factor or cutoff is outside its valid range.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// The buffer is too short for spectral analysis.
    #[error("signal too short for spectral analysis: {len} samples (minimum {min})")]
    InsufficientSignalLength {
        /// Length of the rejected buffer.
        len: usize,
        /// Required minimum length.
        min: usize,
    },

    /// A computation produced NaN or infinite values.
    #[error("non-finite values produced during {stage}")]
    NumericDegenerate {
        /// Pipeline stage that produced the values.
        stage: String,
    },
}

impl DspError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates a numeric degenerate error for the given stage.
    pub fn degenerate(stage: impl Into<String>) -> Self {
        Self::NumericDegenerate {
            stage: stage.into(),
        }
    }

    /// Stable machine-readable code for reports.
    pub fn code(&self) -> &'static str {
        match self {
            DspError::InvalidParameter { .. } => "DSP_001",
            DspError::InsufficientSignalLength { .. } => "DSP_002",
            DspError::NumericDegenerate { .. } => "DSP_003",
        }
    }
}

/// Fails with [`DspError::NumericDegenerate`] if any value is not finite.
pub(crate) fn ensure_finite(values: &[f64], stage: &str) -> DspResult<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(DspError::degenerate(stage))
    }
}
