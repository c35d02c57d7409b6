//! Error types for the critical-bandwidth mode test
//!
//! Provides a unified error type for all silverman-* crates.

use crate::outcome::IterationOutcome;
use std::time::Duration;
use thiserror::Error;

/// Core error type for mode counting, bandwidth search and bootstrap
#[derive(Error, Debug)]
pub enum Error {
    /// Bandwidth passed to density estimation is zero, negative or not finite
    #[error("Invalid bandwidth: {0} (must be positive and finite)")]
    InvalidBandwidth(f64),

    /// Sample cannot support a kernel density estimate
    #[error("Degenerate sample: {0}")]
    DegenerateSample(String),

    /// Bandwidth grid or target mode count is unusable
    #[error("Invalid search parameters: {0}")]
    InvalidSearchParameters(String),

    /// No bandwidth on the grid produced the requested number of modes
    #[error("No bandwidth on the search grid yields exactly {target_modes} modes")]
    NotFound { target_modes: usize },

    /// Invalid configuration value
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Bootstrap run exceeded its time limit.
    ///
    /// `finished` holds `(iteration index, outcome)` for every iteration that
    /// ran to completion, in index order. Under a parallel engine the indices
    /// need not form a prefix.
    #[error("Time limit of {limit:?} exceeded after {} bootstrap iterations", .finished.len())]
    Timeout {
        limit: Duration,
        finished: Vec<(usize, IterationOutcome)>,
    },

    /// Threading or parallelization error
    #[error("Execution error: {0}")]
    Execution(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for a sample with too few observations
    pub fn too_few_observations(actual: usize) -> Self {
        Self::DegenerateSample(format!(
            "expected at least 2 observations, got {actual}"
        ))
    }

    /// Create an error for a sample whose observations are all identical
    pub fn zero_spread(value: f64) -> Self {
        Self::DegenerateSample(format!(
            "all observations equal {value}; at least two distinct values are required"
        ))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::DegenerateSample(format!("{context} contains NaN or infinite values"))
    }

    /// Whether this error means the search grid produced no match
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
