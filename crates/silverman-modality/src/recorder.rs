//! Recording interface for critical-bandwidth searches
//!
//! The search calls these methods as it probes the bandwidth grid so callers
//! can inspect which bandwidths were evaluated and in what order.

use crate::config::SearchStrategy;
use crate::types::CriticalBandwidth;
use std::sync::Mutex;

/// Trait for observing the stages of a critical-bandwidth search
pub trait SearchRecorder {
    /// Record one evaluated grid point
    fn record_probe(&self, index: usize, bandwidth: f64, mode_count: usize);

    /// Record that the search switched strategy, e.g. a verified binary
    /// search falling back to a linear scan
    fn record_fallback(&self, _from: SearchStrategy, _to: SearchStrategy) {}

    /// Record the final result
    fn record_outcome(&self, outcome: CriticalBandwidth);

    /// Whether the search should report to this recorder at all; when false
    /// no `record_*` method is called
    fn is_enabled(&self) -> bool {
        true
    }
}

impl<R: SearchRecorder + ?Sized> SearchRecorder for &R {
    fn record_probe(&self, index: usize, bandwidth: f64, mode_count: usize) {
        (**self).record_probe(index, bandwidth, mode_count)
    }

    fn record_fallback(&self, from: SearchStrategy, to: SearchStrategy) {
        (**self).record_fallback(from, to)
    }

    fn record_outcome(&self, outcome: CriticalBandwidth) {
        (**self).record_outcome(outcome)
    }

    fn is_enabled(&self) -> bool {
        (**self).is_enabled()
    }
}

/// Recorder that does nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRecorder;

impl SearchRecorder for NullRecorder {
    fn record_probe(&self, _index: usize, _bandwidth: f64, _mode_count: usize) {}

    fn record_outcome(&self, _outcome: CriticalBandwidth) {}

    fn is_enabled(&self) -> bool {
        false
    }
}

/// One evaluated grid point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Probe {
    pub index: usize,
    pub bandwidth: f64,
    pub mode_count: usize,
}

/// In-memory recorder keeping every probe in evaluation order
#[derive(Debug, Default)]
pub struct ProbeLog {
    probes: Mutex<Vec<Probe>>,
    fallbacks: Mutex<Vec<(SearchStrategy, SearchStrategy)>>,
    outcome: Mutex<Option<CriticalBandwidth>>,
}

impl ProbeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Probes in the order they were evaluated
    pub fn probes(&self) -> Vec<Probe> {
        self.probes.lock().map(|p| p.clone()).unwrap_or_default()
    }

    /// Grid indices in the order they were evaluated
    pub fn indices(&self) -> Vec<usize> {
        self.probes().iter().map(|p| p.index).collect()
    }

    pub fn fallbacks(&self) -> Vec<(SearchStrategy, SearchStrategy)> {
        self.fallbacks.lock().map(|f| f.clone()).unwrap_or_default()
    }

    /// Final result of the last recorded search
    pub fn outcome(&self) -> Option<CriticalBandwidth> {
        self.outcome.lock().ok().and_then(|o| *o)
    }

    pub fn clear(&self) {
        if let Ok(mut probes) = self.probes.lock() {
            probes.clear();
        }
        if let Ok(mut fallbacks) = self.fallbacks.lock() {
            fallbacks.clear();
        }
        if let Ok(mut outcome) = self.outcome.lock() {
            *outcome = None;
        }
    }
}

impl SearchRecorder for ProbeLog {
    fn record_probe(&self, index: usize, bandwidth: f64, mode_count: usize) {
        if let Ok(mut probes) = self.probes.lock() {
            probes.push(Probe {
                index,
                bandwidth,
                mode_count,
            });
        }
    }

    fn record_fallback(&self, from: SearchStrategy, to: SearchStrategy) {
        if let Ok(mut fallbacks) = self.fallbacks.lock() {
            fallbacks.push((from, to));
        }
    }

    fn record_outcome(&self, outcome: CriticalBandwidth) {
        if let Ok(mut slot) = self.outcome.lock() {
            *slot = Some(outcome);
        }
    }
}
