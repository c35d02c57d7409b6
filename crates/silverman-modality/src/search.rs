//! Critical-bandwidth search over a bandwidth grid
//!
//! The critical bandwidth for `k` modes is the smallest grid bandwidth at
//! which the density estimate has exactly `k` modes. Larger bandwidths smooth
//! more, so the mode count is expected to fall as the bandwidth grows, and a
//! binary search over the grid finds the boundary in `O(log N)` counts.

use crate::config::SearchStrategy;
use crate::counter::ModeCounter;
use crate::grid::BandwidthGrid;
use crate::recorder::{NullRecorder, SearchRecorder};
use crate::traits::ModeCounting;
use crate::types::CriticalBandwidth;
use silverman_core::{Error, Result};
use silverman_kde::Sample;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::{debug, instrument, warn};

/// Finds the smallest grid bandwidth producing a target number of modes
#[derive(Debug, Clone)]
pub struct CriticalBandwidthSearch<C = ModeCounter> {
    counter: C,
    strategy: SearchStrategy,
}

impl Default for CriticalBandwidthSearch<ModeCounter> {
    fn default() -> Self {
        Self::new(ModeCounter::default())
    }
}

impl<C: ModeCounting> CriticalBandwidthSearch<C> {
    pub fn new(counter: C) -> Self {
        Self {
            counter,
            strategy: SearchStrategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn counter(&self) -> &C {
        &self.counter
    }

    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }

    /// Search `grid` for the critical bandwidth of `sample` with
    /// `target_modes` modes.
    ///
    /// Returns [`CriticalBandwidth::NotFound`] when no grid bandwidth yields
    /// exactly `target_modes` modes; that is a normal outcome, not an error.
    ///
    /// # Errors
    /// `InvalidSearchParameters` if `target_modes` is zero; any error raised
    /// by the mode counter.
    pub fn find(
        &self,
        sample: &Sample,
        grid: &BandwidthGrid,
        target_modes: usize,
    ) -> Result<CriticalBandwidth> {
        self.find_recorded(sample, grid, target_modes, &NullRecorder)
    }

    /// Like [`find`](Self::find), reporting every evaluated grid point to
    /// `recorder`.
    #[instrument(
        skip(self, sample, grid, recorder),
        fields(n = sample.len(), grid_len = grid.len(), strategy = self.strategy.name())
    )]
    pub fn find_recorded<R: SearchRecorder + ?Sized>(
        &self,
        sample: &Sample,
        grid: &BandwidthGrid,
        target_modes: usize,
        recorder: &R,
    ) -> Result<CriticalBandwidth> {
        if target_modes == 0 {
            return Err(Error::InvalidSearchParameters(
                "target mode count must be at least 1".to_string(),
            ));
        }

        // a Gaussian KDE never has more modes than distinct observations
        if target_modes > sample.distinct_count() {
            debug!(
                target_modes,
                distinct = sample.distinct_count(),
                "target exceeds distinct values"
            );
            if recorder.is_enabled() {
                recorder.record_outcome(CriticalBandwidth::NotFound);
            }
            return Ok(CriticalBandwidth::NotFound);
        }

        let mut probes = Probes::new(&self.counter, sample, grid, recorder);
        let outcome = match self.strategy {
            SearchStrategy::Binary => binary_search(&mut probes, target_modes)?,
            SearchStrategy::Linear => linear_scan(&mut probes, target_modes)?,
            SearchStrategy::BinaryVerified => {
                let outcome = binary_search(&mut probes, target_modes)?;
                if let Some((lower, higher)) = probes.violation {
                    warn!(
                        lower_index = lower.0,
                        lower_modes = lower.1,
                        higher_index = higher.0,
                        higher_modes = higher.1,
                        "mode count increased with bandwidth; falling back to linear scan"
                    );
                    if recorder.is_enabled() {
                        recorder
                            .record_fallback(SearchStrategy::BinaryVerified, SearchStrategy::Linear);
                    }
                    linear_scan(&mut probes, target_modes)?
                } else {
                    outcome
                }
            }
        };

        debug!(%outcome, evaluations = probes.counts.len(), "search finished");
        if recorder.is_enabled() {
            recorder.record_outcome(outcome);
        }
        Ok(outcome)
    }
}

/// Memoised mode counts for one search call
struct Probes<'a, C, R: ?Sized> {
    counter: &'a C,
    sample: &'a Sample,
    grid: &'a BandwidthGrid,
    recorder: &'a R,
    counts: BTreeMap<usize, usize>,
    /// First observed pair `(index, count)` where the higher index has more modes
    violation: Option<((usize, usize), (usize, usize))>,
}

impl<'a, C: ModeCounting, R: SearchRecorder + ?Sized> Probes<'a, C, R> {
    fn new(counter: &'a C, sample: &'a Sample, grid: &'a BandwidthGrid, recorder: &'a R) -> Self {
        Self {
            counter,
            sample,
            grid,
            recorder,
            counts: BTreeMap::new(),
            violation: None,
        }
    }

    /// Mode count at grid index `i`, or `None` for the zero bandwidth
    fn count(&mut self, i: usize) -> Result<Option<usize>> {
        if !self.grid.is_usable(i) {
            return Ok(None);
        }
        if let Some(&count) = self.counts.get(&i) {
            return Ok(Some(count));
        }

        let bandwidth = self.grid.value(i);
        let count = self
            .counter
            .count_modes(self.sample, bandwidth)?
            .mode_count();
        debug!(index = i, bandwidth, modes = count, "probe");
        if self.recorder.is_enabled() {
            self.recorder.record_probe(i, bandwidth, count);
        }

        if self.violation.is_none() {
            self.violation = self.find_violation(i, count);
        }
        self.counts.insert(i, count);
        Ok(Some(count))
    }

    fn find_violation(&self, i: usize, count: usize) -> Option<((usize, usize), (usize, usize))> {
        let below = self
            .counts
            .range(..i)
            .find(|&(_, &c)| c < count)
            .map(|(&j, &c)| ((j, c), (i, count)));
        below.or_else(|| {
            self.counts
                .range(i + 1..)
                .find(|&(_, &c)| c > count)
                .map(|(&j, &c)| ((i, count), (j, c)))
        })
    }

    /// Where the count at `i` sits relative to `target`; the zero bandwidth
    /// is infinitely peaked and always above it.
    fn compare(&mut self, i: usize, target: usize) -> Result<Ordering> {
        Ok(match self.count(i)? {
            Some(count) => count.cmp(&target),
            None => Ordering::Greater,
        })
    }
}

fn binary_search<C, R>(probes: &mut Probes<'_, C, R>, target: usize) -> Result<CriticalBandwidth>
where
    C: ModeCounting,
    R: SearchRecorder + ?Sized,
{
    let mut start = 0usize;
    let mut end = probes.grid.len() - 1;

    while start <= end {
        let mid = start + (end - start) / 2;
        match probes.compare(mid, target)? {
            Ordering::Equal => {
                let previous_matches = match mid.checked_sub(1) {
                    Some(prev) => probes.count(prev)? == Some(target),
                    None => false,
                };
                if !previous_matches {
                    return Ok(CriticalBandwidth::Found(probes.grid.value(mid)));
                }
                end = mid - 1;
            }
            Ordering::Greater => start = mid + 1,
            Ordering::Less => match mid.checked_sub(1) {
                Some(prev) => end = prev,
                None => break,
            },
        }
    }

    Ok(CriticalBandwidth::NotFound)
}

fn linear_scan<C, R>(probes: &mut Probes<'_, C, R>, target: usize) -> Result<CriticalBandwidth>
where
    C: ModeCounting,
    R: SearchRecorder + ?Sized,
{
    for i in 1..probes.grid.len() {
        if probes.count(i)? == Some(target) {
            return Ok(CriticalBandwidth::Found(probes.grid.value(i)));
        }
    }
    Ok(CriticalBandwidth::NotFound)
}
