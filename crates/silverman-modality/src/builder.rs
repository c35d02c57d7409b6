use crate::bootstrap::BootstrapStabilityEstimator;
use crate::config::{FailurePolicy, SearchStrategy, SilvermanConfig};
use crate::counter::ModeCounter;
use crate::grid::BandwidthGrid;
use crate::recorder::{NullRecorder, SearchRecorder};
use crate::search::CriticalBandwidthSearch;
use crate::types::{BootstrapResult, CriticalBandwidth, ModeReport};
use silverman_core::{ExecutionEngine, Result, SequentialEngine};
use silverman_kde::{GaussianKdeEstimator, ResamplingScheme, Sample};
use std::time::Duration;

/// Builder for configuring and creating Silverman tests.
///
/// Setters only record values; everything is validated in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct SilvermanTestBuilder<E = SequentialEngine> {
    config: SilvermanConfig,
    engine: E,
}

impl Default for SilvermanTestBuilder<SequentialEngine> {
    fn default() -> Self {
        Self::new()
    }
}

impl SilvermanTestBuilder<SequentialEngine> {
    /// Creates a builder with default configuration and sequential execution.
    pub fn new() -> Self {
        Self::from_config(SilvermanConfig::default())
    }

    /// Starts from an existing configuration, e.g. one read from JSON.
    pub fn from_config(config: SilvermanConfig) -> Self {
        Self {
            config,
            engine: SequentialEngine,
        }
    }
}

impl<E: ExecutionEngine> SilvermanTestBuilder<E> {
    /// Sets the number of density evaluation points used to count modes.
    pub fn resolution(mut self, resolution: usize) -> Self {
        self.config.resolution = resolution;
        self
    }

    /// Sets how far beyond the sample range the density is evaluated,
    /// in bandwidths.
    pub fn margin(mut self, margin_bandwidths: f64) -> Self {
        self.config.margin_bandwidths = margin_bandwidths;
        self
    }

    pub fn strategy(mut self, strategy: SearchStrategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    pub fn resampling(mut self, resampling: ResamplingScheme) -> Self {
        self.config.resampling = resampling;
        self
    }

    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.config.failure_policy = policy;
        self
    }

    /// Fixes the bootstrap base seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn time_limit(mut self, limit: Duration) -> Self {
        self.config.time_limit = Some(limit);
        self
    }

    /// Runs bootstrap iterations on `engine`.
    pub fn engine<E2: ExecutionEngine>(self, engine: E2) -> SilvermanTestBuilder<E2> {
        SilvermanTestBuilder {
            config: self.config,
            engine,
        }
    }

    /// Builds the configured test.
    ///
    /// # Errors
    /// `InvalidParameter` if the configuration is invalid.
    pub fn build(self) -> Result<SilvermanTest<E>> {
        self.config.validate()?;
        let counter = ModeCounter::gaussian()
            .with_resolution(self.config.resolution)?
            .with_margin(self.config.margin_bandwidths)?;
        Ok(SilvermanTest::assemble(counter, self.config, self.engine))
    }
}

/// A configured critical-bandwidth test
#[derive(Debug, Clone)]
pub struct SilvermanTest<E = SequentialEngine> {
    config: SilvermanConfig,
    bootstrap: BootstrapStabilityEstimator<ModeCounter, GaussianKdeEstimator, E>,
}

impl<E: ExecutionEngine> SilvermanTest<E> {
    fn assemble(counter: ModeCounter, config: SilvermanConfig, engine: E) -> Self {
        let search = CriticalBandwidthSearch::new(counter).with_strategy(config.strategy);
        let mut bootstrap = BootstrapStabilityEstimator::new(search, GaussianKdeEstimator, engine)
            .with_resampling(config.resampling)
            .with_failure_policy(config.failure_policy);
        if let Some(seed) = config.seed {
            bootstrap = bootstrap.with_seed(seed);
        }
        if let Some(limit) = config.time_limit {
            bootstrap = bootstrap.with_time_limit(limit);
        }
        Self { config, bootstrap }
    }

    pub fn config(&self) -> &SilvermanConfig {
        &self.config
    }

    pub fn search(&self) -> &CriticalBandwidthSearch<ModeCounter> {
        self.bootstrap.search()
    }

    pub fn bootstrap(&self) -> &BootstrapStabilityEstimator<ModeCounter, GaussianKdeEstimator, E> {
        &self.bootstrap
    }

    /// Count and locate the modes of the density estimate of `data` at
    /// `bandwidth`.
    pub fn count_modes(&self, data: &[f64], bandwidth: f64) -> Result<ModeReport> {
        self.search().counter().count_modes_in(data, bandwidth)
    }

    /// Smallest bandwidth on the grid `(0, search_max, search_step)` at which
    /// the density of `data` has exactly `target_modes` modes.
    pub fn find_critical_bandwidth(
        &self,
        data: &[f64],
        search_max: f64,
        search_step: f64,
        target_modes: usize,
    ) -> Result<CriticalBandwidth> {
        self.find_critical_bandwidth_recorded(
            data,
            search_max,
            search_step,
            target_modes,
            &NullRecorder,
        )
    }

    /// Like [`find_critical_bandwidth`](Self::find_critical_bandwidth),
    /// reporting every evaluated grid point to `recorder`.
    pub fn find_critical_bandwidth_recorded<R: SearchRecorder + ?Sized>(
        &self,
        data: &[f64],
        search_max: f64,
        search_step: f64,
        target_modes: usize,
        recorder: &R,
    ) -> Result<CriticalBandwidth> {
        let grid = BandwidthGrid::new(search_max, search_step)?;
        let sample = Sample::try_from(data)?;
        self.search()
            .find_recorded(&sample, &grid, target_modes, recorder)
    }

    /// Bootstrap the critical bandwidth of `data` over `simulations`
    /// synthetic samples.
    pub fn bootstrap_critical_bandwidths(
        &self,
        data: &[f64],
        search_max: f64,
        search_step: f64,
        target_modes: usize,
        simulations: usize,
    ) -> Result<BootstrapResult> {
        let grid = BandwidthGrid::new(search_max, search_step)?;
        let sample = Sample::try_from(data)?;
        self.bootstrap
            .run(&sample, &grid, target_modes, simulations)
    }
}

/// Test with default configuration, sequential execution and a fresh seed
/// per bootstrap run.
pub fn default_test() -> SilvermanTest {
    SilvermanTest::assemble(
        ModeCounter::gaussian(),
        SilvermanConfig::default(),
        SequentialEngine,
    )
}

/// Test with default configuration and a fixed bootstrap seed.
pub fn test_with_seed(seed: u64) -> SilvermanTest {
    let config = SilvermanConfig {
        seed: Some(seed),
        ..Default::default()
    };
    SilvermanTest::assemble(ModeCounter::gaussian(), config, SequentialEngine)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::ProbeLog;
    use crate::test_data::chondrite;
    use approx::assert_relative_eq;
    use silverman_core::Error;

    #[test]
    fn test_builder_pattern() {
        let test = SilvermanTestBuilder::new()
            .resolution(2000)
            .margin(4.0)
            .strategy(SearchStrategy::BinaryVerified)
            .resampling(ResamplingScheme::VarianceCorrected)
            .failure_policy(FailurePolicy::Record)
            .seed(99)
            .build()
            .unwrap();

        assert_eq!(test.config().resolution, 2000);
        assert_eq!(test.search().counter().resolution(), 2000);
        assert_eq!(test.search().counter().margin(), 4.0);
        assert_eq!(test.search().strategy(), SearchStrategy::BinaryVerified);
        assert_eq!(test.config().seed, Some(99));
    }

    #[test]
    fn test_build_validates() {
        assert!(matches!(
            SilvermanTestBuilder::new().resolution(1).build(),
            Err(Error::InvalidParameter(_))
        ));
        assert!(SilvermanTestBuilder::new().margin(-1.0).build().is_err());
        assert!(SilvermanTestBuilder::new()
            .time_limit(Duration::ZERO)
            .build()
            .is_err());
    }

    #[test]
    fn test_default_test_on_chondrite() {
        let test = default_test();
        let data = chondrite();

        let h = test.find_critical_bandwidth(&data, 10.0, 0.01, 2).unwrap();
        assert_relative_eq!(h.value().unwrap(), 1.84, epsilon = 1e-9);

        let report = test.count_modes(&data, 1.84).unwrap();
        assert_eq!(report.mode_count(), 2);
        assert!((report.locations()[0] - 27.9).abs() < 0.1);
        assert!((report.locations()[1] - 33.2).abs() < 0.1);
    }

    #[test]
    fn test_recorded_search() {
        let log = ProbeLog::new();
        let h = default_test()
            .find_critical_bandwidth_recorded(&chondrite(), 10.0, 0.01, 2, &log)
            .unwrap();
        assert_eq!(log.outcome(), Some(h));
        assert_eq!(log.indices().first(), Some(&499));
    }

    #[test]
    fn test_invalid_search_parameters() {
        let test = default_test();
        let data = chondrite();
        for (max, step, k) in [(0.0, 0.01, 2), (10.0, 0.0, 2), (10.0, 0.01, 0), (0.005, 0.01, 1)] {
            assert!(matches!(
                test.find_critical_bandwidth(&data, max, step, k),
                Err(Error::InvalidSearchParameters(_))
            ));
        }
    }

    #[test]
    fn test_seeded_test_bootstrap() {
        let a = test_with_seed(5)
            .bootstrap_critical_bandwidths(&chondrite(), 10.0, 0.01, 2, 3)
            .unwrap();
        let b = test_with_seed(5)
            .bootstrap_critical_bandwidths(&chondrite(), 10.0, 0.01, 2, 3)
            .unwrap();
        assert_eq!(a.seed, 5);
        assert_eq!(a.iterations, b.iterations);
    }
}
