//! Core types for mode counting and critical-bandwidth results

use serde::{Deserialize, Serialize};
pub use silverman_core::outcome::{CriticalBandwidth, IterationOutcome};
use statrs::statistics::Statistics;
use std::fmt;
use std::time::Duration;

/// A local maximum of a density estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mode {
    /// x-coordinate of the maximum on the evaluation grid
    pub location: f64,
    /// Density value at the maximum
    pub height: f64,
}

impl Mode {
    pub fn new(location: f64, height: f64) -> Self {
        Self { location, height }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mode(location={:.3}, height={:.4})", self.location, self.height)
    }
}

/// Modes of a density estimate at one bandwidth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeReport {
    bandwidth: f64,
    modes: Vec<Mode>,
    antimodes: Vec<f64>,
}

impl ModeReport {
    /// Create a new mode report; `modes` must be ordered by location
    pub fn new(bandwidth: f64, modes: Vec<Mode>, antimodes: Vec<f64>) -> Self {
        Self {
            bandwidth,
            modes,
            antimodes,
        }
    }

    /// Bandwidth the density was estimated with
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Get the number of detected modes
    pub fn mode_count(&self) -> usize {
        self.modes.len()
    }

    /// Get the detected modes in increasing order of location
    pub fn modes(&self) -> &[Mode] {
        &self.modes
    }

    /// Locations of the modes in increasing order
    pub fn locations(&self) -> Vec<f64> {
        self.modes.iter().map(|m| m.location).collect()
    }

    /// Locations of the density minima lying between the first and last mode
    pub fn antimodes(&self) -> &[f64] {
        &self.antimodes
    }

    /// Check if the density is unimodal
    pub fn is_unimodal(&self) -> bool {
        self.modes.len() == 1
    }

    /// Check if the density is multimodal
    pub fn is_multimodal(&self) -> bool {
        self.modes.len() > 1
    }
}

impl fmt::Display for ModeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ModeReport({} modes at h={:.4})",
            self.mode_count(),
            self.bandwidth
        )
    }
}

/// Result of a bootstrap run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootstrapResult {
    /// Critical bandwidth of the original sample
    pub reference_bandwidth: f64,
    /// Target mode count
    pub target_modes: usize,
    /// Seed iteration `i` derived its random source from (`seed + i`)
    pub seed: u64,
    /// One entry per iteration, in iteration order
    pub iterations: Vec<IterationOutcome>,
    /// Wall-clock time of the run
    pub elapsed: Duration,
}

impl BootstrapResult {
    /// Number of iterations performed
    pub fn len(&self) -> usize {
        self.iterations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.iterations.is_empty()
    }

    /// Critical bandwidths of completed iterations, in iteration order
    pub fn critical_bandwidths(&self) -> Vec<CriticalBandwidth> {
        self.iterations
            .iter()
            .filter_map(IterationOutcome::critical_bandwidth)
            .collect()
    }

    /// Found bandwidths only
    pub fn found_bandwidths(&self) -> Vec<f64> {
        self.iterations
            .iter()
            .filter_map(|it| it.critical_bandwidth().and_then(|h| h.value()))
            .collect()
    }

    /// Mode counts of completed iterations at the reference bandwidth
    pub fn mode_counts(&self) -> Vec<usize> {
        self.iterations
            .iter()
            .filter_map(IterationOutcome::modes_at_reference)
            .collect()
    }

    /// Summary statistics over the run
    pub fn summary(&self) -> BootstrapSummary {
        let found = self.found_bandwidths();
        let failed = self
            .iterations
            .iter()
            .filter(|it| matches!(it, IterationOutcome::Failed { .. }))
            .count();

        let (mean, std_dev, min, max) = if found.is_empty() {
            (None, None, None, None)
        } else {
            let sd = if found.len() > 1 {
                Some(found.iter().std_dev())
            } else {
                None
            };
            (
                Some(found.iter().mean()),
                sd,
                Some(Statistics::min(found.iter())),
                Some(Statistics::max(found.iter())),
            )
        };

        BootstrapSummary {
            iterations: self.iterations.len(),
            found: found.len(),
            not_found: self.iterations.len() - found.len() - failed,
            failed,
            mean,
            std_dev,
            min,
            max,
        }
    }
}

impl fmt::Display for BootstrapResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BootstrapResult({} iterations, k={}, reference h={:.4})",
            self.len(),
            self.target_modes,
            self.reference_bandwidth
        )
    }
}

/// Summary statistics for a bootstrap run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootstrapSummary {
    pub iterations: usize,
    pub found: usize,
    pub not_found: usize,
    pub failed: usize,
    /// Mean of found bandwidths
    pub mean: Option<f64>,
    /// Sample standard deviation of found bandwidths (needs two or more)
    pub std_dev: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl fmt::Display for BootstrapSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Iterations: {}, found: {}, not found: {}, failed: {}",
            self.iterations, self.found, self.not_found, self.failed
        )?;
        if let Some(mean) = self.mean {
            write!(f, ", mean h: {mean:.4}")?;
        }
        Ok(())
    }
}
