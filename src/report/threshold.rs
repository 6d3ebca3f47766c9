//! Coverage threshold evaluation.
//!
//! Decides whether the global summary meets the configured minimum for the
//! selected metric.

use crate::aggregator::Summary;
use crate::utils::error::ConfigError;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coverage percentage used to gate the build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Block coverage
    #[default]
    Block,
    /// Statement coverage
    Stmt,
}

impl FromStr for Metric {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "block" => Ok(Metric::Block),
            "stmt" => Ok(Metric::Stmt),
            other => Err(ConfigError::InvalidMetric(other.to_string())),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Metric::Block => "block",
            Metric::Stmt => "stmt",
        })
    }
}

impl Metric {
    /// Selected coverage of a summary, `None` when undefined
    pub fn coverage_of(self, summary: &Summary) -> Option<f64> {
        match self {
            Metric::Block => summary.block_coverage,
            Metric::Stmt => summary.stmt_coverage,
        }
    }
}

/// Outcome of a threshold check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdStatus {
    /// Threshold is 0 or negative
    Disabled,
    Passed,
    Failed,
    /// No blocks (or statements) to measure; counts as a failure
    Undefined,
}

/// Result of threshold validation
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdResult {
    pub status: ThresholdStatus,
    pub metric: Metric,
    pub threshold: f64,
    pub coverage: Option<f64>,
}

impl ThresholdResult {
    pub fn passed(&self) -> bool {
        matches!(self.status, ThresholdStatus::Disabled | ThresholdStatus::Passed)
    }

    /// Signed distance from the threshold, when both sides are known
    pub fn delta(&self) -> Option<f64> {
        match self.status {
            ThresholdStatus::Disabled => None,
            _ => self.coverage.map(|coverage| coverage - self.threshold),
        }
    }

    /// One-line human readable description
    pub fn summary(&self) -> String {
        match self.status {
            ThresholdStatus::Disabled => "Coverage threshold disabled".to_string(),
            ThresholdStatus::Undefined => format!(
                "FAILED: {} coverage is undefined (nothing to measure), threshold {:.2}%",
                self.metric, self.threshold
            ),
            ThresholdStatus::Passed | ThresholdStatus::Failed => {
                let verdict = if self.passed() { "PASSED" } else { "FAILED" };
                format!(
                    "{}: {} coverage {:.2}% (threshold {:.2}%, {:+.2}%)",
                    verdict,
                    self.metric,
                    self.coverage.unwrap_or_default(),
                    self.threshold,
                    self.delta().unwrap_or_default()
                )
            }
        }
    }
}

/// Check the global summary against a threshold
///
/// **Public** - main entry point for threshold evaluation
///
/// # Arguments
/// * `total` - Global summary of the report
/// * `metric` - Coverage percentage to compare
/// * `threshold` - Minimum percentage, `<= 0` disables the check
///
/// # Returns
/// Passes iff the selected coverage is `>= threshold`. An undefined coverage
/// (zero denominator) fails an enabled threshold.
pub fn evaluate_threshold(total: &Summary, metric: Metric, threshold: f64) -> ThresholdResult {
    let coverage = metric.coverage_of(total);

    let status = if threshold <= 0.0 {
        ThresholdStatus::Disabled
    } else {
        match coverage {
            Some(value) if value >= threshold => ThresholdStatus::Passed,
            Some(_) => ThresholdStatus::Failed,
            None => {
                warn!(
                    "{} coverage is undefined, failing threshold of {:.2}%",
                    metric, threshold
                );
                ThresholdStatus::Undefined
            }
        }
    };

    debug!(
        "Threshold check: metric={} threshold={} coverage={:?} -> {:?}",
        metric, threshold, coverage, status
    );

    ThresholdResult {
        status,
        metric,
        threshold,
        coverage,
    }
}
