//! Core traits for mode counting

use crate::types::ModeReport;
use silverman_core::Result;
use silverman_kde::Sample;

/// Counts the modes of a density estimate at a given bandwidth
///
/// The critical-bandwidth search only talks to this trait, so it can be driven
/// by any counting procedure, including scripted counters in tests.
pub trait ModeCounting {
    /// Count and locate the modes of `sample`'s density at `bandwidth`.
    ///
    /// Must be a pure function of its arguments.
    fn count_modes(&self, sample: &Sample, bandwidth: f64) -> Result<ModeReport>;
}

impl<C: ModeCounting + ?Sized> ModeCounting for &C {
    fn count_modes(&self, sample: &Sample, bandwidth: f64) -> Result<ModeReport> {
        (**self).count_modes(sample, bandwidth)
    }
}
