//! Configuration for mode counting, search and bootstrap

use serde::{Deserialize, Serialize};
use silverman_core::{Error, Result};
use silverman_kde::{EvaluationGrid, ResamplingScheme};
use std::time::Duration;

/// Default number of density evaluation points
pub const DEFAULT_RESOLUTION: usize = 1000;

/// Default grid padding beyond the sample range, in bandwidths
pub const DEFAULT_MARGIN_BANDWIDTHS: f64 = 3.0;

/// Default number of bootstrap iterations
pub const DEFAULT_SIMULATIONS: usize = 100;

/// How the bandwidth grid is searched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SearchStrategy {
    /// Binary search trusting that mode count never increases with bandwidth
    #[default]
    Binary,
    /// Binary search that falls back to a linear scan if the probed counts
    /// contradict monotonicity
    BinaryVerified,
    /// Scan every grid bandwidth from low to high
    Linear,
}

impl SearchStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::BinaryVerified => "binary_verified",
            Self::Linear => "linear",
        }
    }
}

/// What a bootstrap run does when an iteration raises an error
///
/// A synthetic sample whose search finds no bandwidth is not an error; it is
/// recorded as [`CriticalBandwidth::NotFound`](crate::CriticalBandwidth::NotFound)
/// under either policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// Stop and return the first error (in iteration order)
    #[default]
    Abort,
    /// Record the iteration as failed and continue
    Record,
}

/// Complete configuration of a Silverman mode test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SilvermanConfig {
    /// Number of points the density is evaluated at
    pub resolution: usize,
    /// Evaluation grid padding beyond the sample range, in bandwidths
    pub margin_bandwidths: f64,
    pub strategy: SearchStrategy,
    pub resampling: ResamplingScheme,
    pub failure_policy: FailurePolicy,
    /// Base seed for bootstrap iterations; drawn at random when absent
    pub seed: Option<u64>,
    /// Wall-clock limit for one bootstrap run
    pub time_limit: Option<Duration>,
}

impl Default for SilvermanConfig {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            margin_bandwidths: DEFAULT_MARGIN_BANDWIDTHS,
            strategy: SearchStrategy::default(),
            resampling: ResamplingScheme::default(),
            failure_policy: FailurePolicy::default(),
            seed: None,
            time_limit: None,
        }
    }
}

impl SilvermanConfig {
    pub fn validate(&self) -> Result<()> {
        if self.resolution < EvaluationGrid::MIN_POINTS {
            return Err(Error::InvalidParameter(format!(
                "resolution must be at least {}, got {}",
                EvaluationGrid::MIN_POINTS,
                self.resolution
            )));
        }
        if !(self.margin_bandwidths >= 0.0 && self.margin_bandwidths.is_finite()) {
            return Err(Error::InvalidParameter(format!(
                "margin must be finite and non-negative, got {}",
                self.margin_bandwidths
            )));
        }
        if self.time_limit == Some(Duration::ZERO) {
            return Err(Error::InvalidParameter(
                "time limit must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
