//! Building conversion requests from flags and request files.
//!
//! A request file is JSON with the same fields as
//! [`downrate_dsp::ConversionRequest`], all optional:
//!
//! ```json
//! {
//!   "target_rate": 16000,
//!   "strategy": { "type": "time_domain", "filter_order": 64 },
//!   "ratio_policy": "exact"
//! }
//! ```
//!
//! The source rate always comes from the decoded input. Command-line flags
//! override file fields.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use downrate_dsp::{ConversionRequest, RatioPolicy, Strategy};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Filter order used when neither a flag nor a request file gives one.
pub const DEFAULT_FILTER_ORDER: usize = 64;

/// Strategy selector for the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// FIR low-pass, convolution, decimation
    Time,
    /// Spectral truncation, decimation
    Frequency,
}

/// Ratio policy selector for the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RatioArg {
    /// Reject rates that do not divide the source rate
    Exact,
    /// Round the decimation factor to the nearest integer
    Nearest,
}

impl From<RatioArg> for RatioPolicy {
    fn from(arg: RatioArg) -> Self {
        match arg {
            RatioArg::Exact => RatioPolicy::Exact,
            RatioArg::Nearest => RatioPolicy::Nearest,
        }
    }
}

/// Contents of a request file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestFile {
    /// Expected input rate; checked against the decoded file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_rate: Option<u32>,
    /// Output rate in Hz.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_rate: Option<u32>,
    /// Conversion strategy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<Strategy>,
    /// Ratio policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio_policy: Option<RatioPolicy>,
}

impl RequestFile {
    /// Loads a request file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read request file: {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse request file: {}", path.display()))
    }
}

/// Request settings gathered from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Parsed request file, if one was given.
    pub file: Option<RequestFile>,
    /// `--target-rate`
    pub target_rate: Option<u32>,
    /// `--strategy`
    pub strategy: Option<StrategyArg>,
    /// `--filter-order`
    pub filter_order: Option<usize>,
    /// `--ratio`
    pub ratio: Option<RatioArg>,
}

impl RequestOptions {
    /// Resolves the options into a validated request for an input at
    /// `source_rate`.
    pub fn resolve(&self, source_rate: u32) -> Result<ConversionRequest> {
        let file = self.file.clone().unwrap_or_default();

        if let Some(expected) = file.source_rate {
            if expected != source_rate {
                warn!(
                    expected,
                    actual = source_rate,
                    "request file source rate differs from input; using input rate"
                );
            }
        }

        let target_rate = self
            .target_rate
            .or(file.target_rate)
            .context("No target rate given; pass --target-rate or set target_rate in the request file")?;

        let file_order = match file.strategy {
            Some(Strategy::TimeDomain { filter_order }) => Some(filter_order),
            _ => None,
        };
        let strategy = match (self.strategy, file.strategy) {
            (Some(StrategyArg::Time), _) => Strategy::TimeDomain {
                filter_order: self
                    .filter_order
                    .or(file_order)
                    .unwrap_or(DEFAULT_FILTER_ORDER),
            },
            (Some(StrategyArg::Frequency), _) => Strategy::FrequencyDomain,
            (None, Some(Strategy::TimeDomain { filter_order })) => Strategy::TimeDomain {
                filter_order: self.filter_order.unwrap_or(filter_order),
            },
            (None, Some(Strategy::FrequencyDomain)) => Strategy::FrequencyDomain,
            (None, None) => Strategy::TimeDomain {
                filter_order: self.filter_order.unwrap_or(DEFAULT_FILTER_ORDER),
            },
        };
        if strategy == Strategy::FrequencyDomain && self.filter_order.is_some() {
            warn!("--filter-order has no effect with the frequency strategy");
        }

        let ratio_policy = self
            .ratio
            .map(RatioPolicy::from)
            .or(file.ratio_policy)
            .unwrap_or_default();

        let request = ConversionRequest {
            source_rate,
            target_rate,
            strategy,
            ratio_policy,
        };
        request.validate()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_flags_only() {
        let options = RequestOptions {
            target_rate: Some(16000),
            strategy: Some(StrategyArg::Frequency),
            ..Default::default()
        };
        assert_eq!(
            options.resolve(48000).unwrap(),
            ConversionRequest::frequency_domain(48000, 16000)
        );
    }

    #[test]
    fn test_defaults_to_time_domain() {
        let options = RequestOptions {
            target_rate: Some(24000),
            ..Default::default()
        };
        assert_eq!(
            options.resolve(48000).unwrap(),
            ConversionRequest::time_domain(48000, 24000, DEFAULT_FILTER_ORDER)
        );
    }

    #[test]
    fn test_file_fields_used() {
        let file: RequestFile = serde_json::from_str(
            r#"{
                "target_rate": 3000,
                "strategy": { "type": "time_domain", "filter_order": 40 },
                "ratio_policy": "nearest"
            }"#,
        )
        .unwrap();
        let options = RequestOptions {
            file: Some(file),
            ..Default::default()
        };
        assert_eq!(
            options.resolve(8000).unwrap(),
            ConversionRequest::time_domain(8000, 3000, 40).with_ratio_policy(RatioPolicy::Nearest)
        );
    }

    #[test]
    fn test_flags_override_file() {
        let file = RequestFile {
            target_rate: Some(8000),
            strategy: Some(Strategy::TimeDomain { filter_order: 40 }),
            ..Default::default()
        };
        let options = RequestOptions {
            file: Some(file),
            target_rate: Some(4000),
            filter_order: Some(100),
            ..Default::default()
        };
        assert_eq!(
            options.resolve(16000).unwrap(),
            ConversionRequest::time_domain(16000, 4000, 100)
        );
    }

    #[test]
    fn test_missing_target_rate() {
        let err = RequestOptions::default().resolve(44100).unwrap_err();
        assert!(err.to_string().contains("target rate"));
    }

    #[test]
    fn test_invalid_request_rejected() {
        let options = RequestOptions {
            target_rate: Some(3000),
            ..Default::default()
        };
        let err = options.resolve(8000).unwrap_err();
        assert!(err.downcast_ref::<downrate_dsp::DspError>().is_some());
    }

    #[test]
    fn test_request_file_rejects_unknown_fields() {
        assert!(serde_json::from_str::<RequestFile>(r#"{"quality": 3}"#).is_err());
    }

    #[test]
    fn test_load_request_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.json");
        fs::write(
            &path,
            r#"{"target_rate": 11025, "strategy": {"type": "frequency_domain"}}"#,
        )
        .unwrap();

        let file = RequestFile::load(&path).unwrap();
        assert_eq!(file.target_rate, Some(11025));
        assert_eq!(file.strategy, Some(Strategy::FrequencyDomain));
        assert!(RequestFile::load(&dir.path().join("missing.json")).is_err());
    }
}
