//! Conversion request types.

use serde::{Deserialize, Serialize};

use crate::error::{DspError, DspResult};

/// How the low-pass step of a conversion is realized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Strategy {
    /// Windowed-sinc FIR filter, convolution, then decimation.
    TimeDomain {
        /// FIR order; the filter has `filter_order + 1` taps.
        filter_order: usize,
    },
    /// Forward transform, brick-wall truncation, inverse transform, then
    /// decimation.
    FrequencyDomain,
}

impl Strategy {
    /// Short name used in logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::TimeDomain { .. } => "time_domain",
            Strategy::FrequencyDomain => "frequency_domain",
        }
    }
}

/// What to do when `source_rate / target_rate` is not a whole number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioPolicy {
    /// Reject non-integer ratios.
    #[default]
    Exact,
    /// Decimate by the ratio rounded to the nearest integer.
    Nearest,
}

/// A single rate conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConversionRequest {
    /// Rate of the input buffer in Hz.
    pub source_rate: u32,
    /// Desired output rate in Hz, at most `source_rate`.
    pub target_rate: u32,
    /// Filtering strategy.
    pub strategy: Strategy,
    /// Handling of non-integer rate ratios (default: exact).
    #[serde(default)]
    pub ratio_policy: RatioPolicy,
}

impl ConversionRequest {
    /// Creates a time-domain request.
    pub fn time_domain(source_rate: u32, target_rate: u32, filter_order: usize) -> Self {
        Self {
            source_rate,
            target_rate,
            strategy: Strategy::TimeDomain { filter_order },
            ratio_policy: RatioPolicy::default(),
        }
    }

    /// Creates a frequency-domain request.
    pub fn frequency_domain(source_rate: u32, target_rate: u32) -> Self {
        Self {
            source_rate,
            target_rate,
            strategy: Strategy::FrequencyDomain,
            ratio_policy: RatioPolicy::default(),
        }
    }

    /// Sets the ratio policy.
    pub fn with_ratio_policy(mut self, ratio_policy: RatioPolicy) -> Self {
        self.ratio_policy = ratio_policy;
        self
    }

    /// Checks every parameter rule.
    ///
    /// # Errors
    /// `InvalidParameter` for a zero rate, a target above the source, a zero
    /// filter order, or a non-integer ratio under [`RatioPolicy::Exact`].
    pub fn validate(&self) -> DspResult<()> {
        if self.source_rate == 0 {
            return Err(DspError::invalid_param("source_rate", "must be positive"));
        }
        if self.target_rate == 0 {
            return Err(DspError::invalid_param("target_rate", "must be positive"));
        }
        if self.target_rate > self.source_rate {
            return Err(DspError::invalid_param(
                "target_rate",
                format!(
                    "{} Hz exceeds the source rate of {} Hz",
                    self.target_rate, self.source_rate
                ),
            ));
        }
        if let Strategy::TimeDomain { filter_order: 0 } = self.strategy {
            return Err(DspError::invalid_param("filter_order", "must be positive"));
        }
        if self.ratio_policy == RatioPolicy::Exact && !self.is_integer_ratio() {
            return Err(DspError::invalid_param(
                "target_rate",
                format!(
                    "{} Hz does not divide {} Hz evenly; use the nearest ratio policy to round",
                    self.target_rate, self.source_rate
                ),
            ));
        }
        Ok(())
    }

    /// True if the source rate is a whole multiple of the target rate.
    pub fn is_integer_ratio(&self) -> bool {
        self.target_rate != 0 && self.source_rate % self.target_rate == 0
    }

    /// Decimation factor, `round(source_rate / target_rate)`.
    pub fn factor(&self) -> DspResult<usize> {
        crate::decimate::decimation_factor(self.source_rate, self.target_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_time_domain_serde() {
        let request = ConversionRequest::time_domain(48000, 16000, 64);
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"type\":\"time_domain\""));
        assert!(json.contains("\"filter_order\":64"));

        let parsed: ConversionRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, request);
    }

    #[test]
    fn test_parse_frequency_domain_with_default_policy() {
        let json = r#"{
            "source_rate": 44100,
            "target_rate": 22050,
            "strategy": { "type": "frequency_domain" }
        }"#;
        let parsed: ConversionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, ConversionRequest::frequency_domain(44100, 22050));
        assert_eq!(parsed.ratio_policy, RatioPolicy::Exact);
    }

    #[test]
    fn test_parse_nearest_policy() {
        let json = r#"{
            "source_rate": 8000,
            "target_rate": 3000,
            "strategy": { "type": "time_domain", "filter_order": 32 },
            "ratio_policy": "nearest"
        }"#;
        let parsed: ConversionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.ratio_policy, RatioPolicy::Nearest);
        assert!(parsed.validate().is_ok());
        assert_eq!(parsed.factor().unwrap(), 3);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let json = r#"{
            "source_rate": 8000,
            "target_rate": 4000,
            "strategy": { "type": "frequency_domain" },
            "quality": "high"
        }"#;
        assert!(serde_json::from_str::<ConversionRequest>(json).is_err());
    }

    #[test]
    fn test_validate_ok() {
        assert!(ConversionRequest::time_domain(48000, 16000, 64)
            .validate()
            .is_ok());
        assert!(ConversionRequest::frequency_domain(8000, 8000)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_rates() {
        assert!(ConversionRequest::frequency_domain(0, 0).validate().is_err());
        assert!(ConversionRequest::frequency_domain(8000, 0)
            .validate()
            .is_err());
        assert!(ConversionRequest::frequency_domain(8000, 16000)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_filter_order() {
        let err = ConversionRequest::time_domain(8000, 4000, 0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, DspError::InvalidParameter { ref name, .. } if name == "filter_order"));
    }

    #[test]
    fn test_validate_exact_ratio() {
        let request = ConversionRequest::time_domain(8000, 3000, 32);
        assert!(!request.is_integer_ratio());
        assert!(request.validate().is_err());
        assert!(request
            .with_ratio_policy(RatioPolicy::Nearest)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_strategy_name() {
        assert_eq!(
            Strategy::TimeDomain { filter_order: 8 }.name(),
            "time_domain"
        );
        assert_eq!(Strategy::FrequencyDomain.name(), "frequency_domain");
    }
}
