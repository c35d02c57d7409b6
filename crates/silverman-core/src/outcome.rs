//! Outcomes of critical-bandwidth searches and bootstrap iterations

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a critical-bandwidth search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CriticalBandwidth {
    /// Smallest grid bandwidth at which the target mode count was observed
    Found(f64),
    /// No grid bandwidth produced the target mode count
    NotFound,
}

impl CriticalBandwidth {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The bandwidth, if one was found
    pub fn value(&self) -> Option<f64> {
        match *self {
            Self::Found(h) => Some(h),
            Self::NotFound => None,
        }
    }

    /// The bandwidth, or [`Error::NotFound`] naming the target mode count
    pub fn found_or_err(&self, target_modes: usize) -> Result<f64> {
        self.value().ok_or(Error::NotFound { target_modes })
    }
}

impl From<CriticalBandwidth> for Option<f64> {
    fn from(value: CriticalBandwidth) -> Self {
        value.value()
    }
}

impl fmt::Display for CriticalBandwidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found(h) => write!(f, "{h:.4}"),
            Self::NotFound => write!(f, "not found"),
        }
    }
}

/// What happened in one bootstrap iteration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IterationOutcome {
    /// The synthetic sample was searched
    Completed {
        /// Critical bandwidth of the synthetic sample
        critical_bandwidth: CriticalBandwidth,
        /// Modes of the synthetic sample at the reference critical bandwidth
        modes_at_reference: usize,
    },
    /// The iteration raised an error and the run was configured to continue
    Failed { reason: String },
}

impl IterationOutcome {
    pub fn critical_bandwidth(&self) -> Option<CriticalBandwidth> {
        match self {
            Self::Completed {
                critical_bandwidth, ..
            } => Some(*critical_bandwidth),
            Self::Failed { .. } => None,
        }
    }

    pub fn modes_at_reference(&self) -> Option<usize> {
        match self {
            Self::Completed {
                modes_at_reference, ..
            } => Some(*modes_at_reference),
            Self::Failed { .. } => None,
        }
    }
}
