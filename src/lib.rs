//! Silverman's critical-bandwidth test for multimodality
//!
//! Facade over the workspace crates:
//!
//! - [`common`]: error type, execution engines, numeric helpers
//! - [`kde`]: Gaussian kernel density estimation and extrema detection
//! - [`modality`]: mode counting, critical-bandwidth search and bootstrap
//!
//! The most used items are re-exported at the top level.
//!
//! ```rust
//! use silverman_stats::find_critical_bandwidth;
//!
//! let data = [0.0, 0.2, -0.1, 0.1, 8.0, 8.3, 7.9, 8.1];
//! let h = find_critical_bandwidth(&data, 10.0, 0.05, 1).unwrap();
//! assert!(h.is_found());
//! ```

pub use silverman_core as common;
pub use silverman_kde as kde;
pub use silverman_modality as modality;

pub use silverman_modality::{
    bootstrap_critical_bandwidths, count_modes, default_test, find_critical_bandwidth,
    test_with_seed, BandwidthGrid, BootstrapResult, BootstrapStabilityEstimator,
    BootstrapSummary, CriticalBandwidth, CriticalBandwidthSearch, Error, FailurePolicy,
    IterationOutcome, Mode, ModeCounter, ModeCounting, ModeReport, ProbeLog, ResamplingScheme,
    Result, Sample, SearchRecorder, SearchStrategy, SilvermanConfig, SilvermanTest,
    SilvermanTestBuilder,
};
