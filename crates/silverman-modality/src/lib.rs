//! Silverman's critical-bandwidth test for multimodality
//!
//! A Gaussian kernel density estimate has fewer modes the wider its
//! bandwidth. The *critical bandwidth* for `k` modes is the smallest
//! bandwidth at which the estimate has exactly `k` modes: a large value means
//! the data needs heavy smoothing before it looks `k`-modal, which is evidence
//! for more than `k` modes.
//!
//! # Components
//!
//! 1. [`ModeCounter`]: counts and locates the modes of a density estimate at
//!    one bandwidth
//! 2. [`CriticalBandwidthSearch`]: binary search for the critical bandwidth
//!    over the grid `h_i = i * step`, `i = 0 .. floor(max / step) - 1`
//! 3. [`BootstrapStabilityEstimator`]: smoothed bootstrap of the critical
//!    bandwidth, resampling from the density estimate at the original
//!    critical bandwidth
//!
//! [`SilvermanTestBuilder`] wires the three together from a
//! [`SilvermanConfig`].
//!
//! # Examples
//!
//! ## Critical bandwidth
//!
//! ```rust
//! use silverman_modality::{default_test, CriticalBandwidth};
//!
//! let data = [
//!     20.77, 22.56, 22.71, 22.99, 26.39, 27.08, 27.32, 27.33, 27.57, 27.81, 28.69,
//!     29.36, 30.25, 31.89, 32.88, 33.23, 33.28, 33.40, 33.52, 33.83, 33.95, 34.82,
//! ];
//!
//! let test = default_test();
//! let h = test.find_critical_bandwidth(&data, 10.0, 0.01, 2).unwrap();
//! assert!(matches!(h, CriticalBandwidth::Found(v) if (v - 1.84).abs() < 1e-9));
//!
//! let report = test.count_modes(&data, 1.84).unwrap();
//! assert_eq!(report.mode_count(), 2);
//! ```
//!
//! ## Bootstrap
//!
//! ```rust
//! use silverman_modality::{SilvermanTestBuilder, ResamplingScheme};
//!
//! let data = [1.0, 1.3, 0.8, 1.1, 5.0, 5.2, 4.9, 5.4];
//! let test = SilvermanTestBuilder::new()
//!     .resampling(ResamplingScheme::VarianceCorrected)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let result = test
//!     .bootstrap_critical_bandwidths(&data, 5.0, 0.05, 2, 10)
//!     .unwrap();
//! assert_eq!(result.len(), 10);
//! println!("{}", result.summary());
//! ```

pub mod bootstrap;
pub mod builder;
pub mod config;
pub mod counter;
pub mod grid;
pub mod recorder;
pub mod search;
pub mod traits;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_data;

// Re-exports
pub use bootstrap::BootstrapStabilityEstimator;
pub use builder::{default_test, test_with_seed, SilvermanTest, SilvermanTestBuilder};
pub use config::{
    FailurePolicy, SearchStrategy, SilvermanConfig, DEFAULT_MARGIN_BANDWIDTHS,
    DEFAULT_RESOLUTION, DEFAULT_SIMULATIONS,
};
pub use counter::ModeCounter;
pub use grid::BandwidthGrid;
pub use recorder::{NullRecorder, Probe, ProbeLog, SearchRecorder};
pub use search::CriticalBandwidthSearch;
pub use traits::ModeCounting;
pub use types::{
    BootstrapResult, BootstrapSummary, CriticalBandwidth, IterationOutcome, Mode, ModeReport,
};

pub use silverman_core::{Error, Result};
pub use silverman_kde::{ResamplingScheme, Sample};

// Convenience functions
/// Count the modes of `data`'s density estimate at `bandwidth` with default
/// settings
pub fn count_modes(data: &[f64], bandwidth: f64) -> Result<ModeReport> {
    default_test().count_modes(data, bandwidth)
}

/// Critical bandwidth of `data` for `target_modes` modes with default settings
pub fn find_critical_bandwidth(
    data: &[f64],
    search_max: f64,
    search_step: f64,
    target_modes: usize,
) -> Result<CriticalBandwidth> {
    default_test().find_critical_bandwidth(data, search_max, search_step, target_modes)
}

/// Bootstrap the critical bandwidth with default settings and a fresh seed
pub fn bootstrap_critical_bandwidths(
    data: &[f64],
    search_max: f64,
    search_step: f64,
    target_modes: usize,
    simulations: usize,
) -> Result<BootstrapResult> {
    default_test().bootstrap_critical_bandwidths(
        data,
        search_max,
        search_step,
        target_modes,
        simulations,
    )
}
