//! Smoothed bootstrap of the critical bandwidth
//!
//! The original sample's critical bandwidth `h_crit` is computed once. Each
//! iteration then draws a synthetic sample of the same size from the density
//! estimate at `h_crit`, counts its modes at `h_crit` and searches it for its
//! own critical bandwidth. The spread of the synthetic critical bandwidths
//! shows how stable `h_crit` is; the share of synthetic samples with more than
//! `k` modes at `h_crit` is the usual Silverman significance estimate.
//!
//! Iteration `i` seeds its random source with `seed + i`, so a fixed seed
//! gives the same result whichever execution engine runs the iterations.

use crate::config::FailurePolicy;
use crate::counter::ModeCounter;
use crate::grid::BandwidthGrid;
use crate::search::CriticalBandwidthSearch;
use crate::traits::ModeCounting;
use crate::types::{BootstrapResult, IterationOutcome};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use silverman_core::{Error, ExecutionEngine, Result, SequentialEngine};
use silverman_kde::{DensityEstimator, DensityModel, GaussianKdeEstimator, ResamplingScheme, Sample};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

/// Bootstrap estimator for the stability of the critical bandwidth
#[derive(Debug, Clone)]
pub struct BootstrapStabilityEstimator<
    C = ModeCounter,
    D = GaussianKdeEstimator,
    E = SequentialEngine,
> {
    search: CriticalBandwidthSearch<C>,
    estimator: D,
    engine: E,
    resampling: ResamplingScheme,
    failure_policy: FailurePolicy,
    seed: Option<u64>,
    time_limit: Option<Duration>,
}

impl Default for BootstrapStabilityEstimator {
    fn default() -> Self {
        Self::new(
            CriticalBandwidthSearch::default(),
            GaussianKdeEstimator,
            SequentialEngine,
        )
    }
}

impl<C, D, E> BootstrapStabilityEstimator<C, D, E>
where
    C: ModeCounting + Sync,
    D: DensityEstimator + Sync,
    D::Model: Sync,
    E: ExecutionEngine,
{
    /// Creates an estimator resampling from `estimator` and searching with
    /// `search`, running iterations on `engine`.
    pub fn new(search: CriticalBandwidthSearch<C>, estimator: D, engine: E) -> Self {
        Self {
            search,
            estimator,
            engine,
            resampling: ResamplingScheme::default(),
            failure_policy: FailurePolicy::default(),
            seed: None,
            time_limit: None,
        }
    }

    pub fn with_resampling(mut self, resampling: ResamplingScheme) -> Self {
        self.resampling = resampling;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Fix the base seed; without one a seed is drawn per run
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Run on a different execution engine
    pub fn with_engine<E2: ExecutionEngine>(self, engine: E2) -> BootstrapStabilityEstimator<C, D, E2> {
        BootstrapStabilityEstimator {
            search: self.search,
            estimator: self.estimator,
            engine,
            resampling: self.resampling,
            failure_policy: self.failure_policy,
            seed: self.seed,
            time_limit: self.time_limit,
        }
    }

    pub fn search(&self) -> &CriticalBandwidthSearch<C> {
        &self.search
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Run `simulations` bootstrap iterations.
    ///
    /// # Errors
    /// - `InvalidParameter` if `simulations` is zero
    /// - `InvalidSearchParameters` for a zero target mode count
    /// - `NotFound` if the original sample has no critical bandwidth on `grid`
    /// - `Timeout` if the time limit expires before all iterations started;
    ///   the error carries every iteration that did finish
    /// - under [`FailurePolicy::Abort`], the error of the lowest-index failing
    ///   iteration. A failure only cancels iterations with a higher index, so
    ///   on any engine every earlier iteration has run (or was stopped by the
    ///   time limit).
    #[instrument(
        skip(self, sample, grid),
        fields(n = sample.len(), grid_len = grid.len(), parallel = self.engine.is_parallel())
    )]
    pub fn run(
        &self,
        sample: &Sample,
        grid: &BandwidthGrid,
        target_modes: usize,
        simulations: usize,
    ) -> Result<BootstrapResult> {
        if simulations == 0 {
            return Err(Error::InvalidParameter(
                "number of simulations must be at least 1".to_string(),
            ));
        }
        let start = Instant::now();

        let reference = self
            .search
            .find(sample, grid, target_modes)?
            .found_or_err(target_modes)?;
        let model = self.estimator.fit(sample, reference)?;
        let seed = self.seed.unwrap_or_else(|| rand::thread_rng().gen());
        debug!(reference, seed, "resampling from reference density");

        // lowest iteration index that failed under `Abort`
        let first_failure = AtomicUsize::new(usize::MAX);

        let slots: Vec<Option<Result<IterationOutcome>>> =
            self.engine.execute_batch(simulations, |i| {
                if i > first_failure.load(Ordering::Relaxed) {
                    return None;
                }
                if let Some(limit) = self.time_limit {
                    if start.elapsed() > limit {
                        return None;
                    }
                }

                let outcome = self.iteration(
                    &model,
                    sample.len(),
                    grid,
                    target_modes,
                    reference,
                    seed.wrapping_add(i as u64),
                );
                Some(match (outcome, self.failure_policy) {
                    (Err(e), FailurePolicy::Record) => {
                        warn!(iteration = i, error = %e, "bootstrap iteration failed");
                        Ok(IterationOutcome::Failed {
                            reason: e.to_string(),
                        })
                    }
                    (Err(e), FailurePolicy::Abort) => {
                        first_failure.fetch_min(i, Ordering::Relaxed);
                        Err(e)
                    }
                    (ok, _) => ok,
                })
            });

        let mut finished = Vec::with_capacity(simulations);
        let mut skipped = false;
        for (i, slot) in slots.into_iter().enumerate() {
            match slot {
                Some(outcome) => finished.push((i, outcome?)),
                None => skipped = true,
            }
        }
        if skipped {
            if let Some(limit) = self.time_limit {
                warn!(finished = finished.len(), simulations, "bootstrap time limit exceeded");
                return Err(Error::Timeout { limit, finished });
            }
        }
        let iterations = finished.into_iter().map(|(_, outcome)| outcome).collect();

        let result = BootstrapResult {
            reference_bandwidth: reference,
            target_modes,
            seed,
            iterations,
            elapsed: start.elapsed(),
        };
        debug!(summary = %result.summary(), "bootstrap finished");
        Ok(result)
    }

    fn iteration(
        &self,
        model: &D::Model,
        size: usize,
        grid: &BandwidthGrid,
        target_modes: usize,
        reference: f64,
        seed: u64,
    ) -> Result<IterationOutcome> {
        let mut rng = StdRng::seed_from_u64(seed);
        let synthetic = Sample::new(model.draw(size, self.resampling, &mut rng))?;

        let modes_at_reference = self
            .search
            .counter()
            .count_modes(&synthetic, reference)?
            .mode_count();
        let critical_bandwidth = self.search.find(&synthetic, grid, target_modes)?;

        Ok(IterationOutcome::Completed {
            critical_bandwidth,
            modes_at_reference,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_data::{chondrite, evenly_spaced};
    use crate::types::CriticalBandwidth;
    use silverman_core::ExecutionStrategy;
    use silverman_kde::GaussianKde;

    fn chondrite_sample() -> Sample {
        Sample::new(chondrite()).unwrap()
    }

    #[test]
    fn test_seeded_run_is_reproducible() {
        let grid = BandwidthGrid::new(10.0, 0.01).unwrap();
        let estimator = BootstrapStabilityEstimator::default().with_seed(7);

        let a = estimator.run(&chondrite_sample(), &grid, 2, 5).unwrap();
        let b = estimator.run(&chondrite_sample(), &grid, 2, 5).unwrap();

        assert_eq!(a.len(), 5);
        assert_eq!(a.seed, 7);
        assert!((a.reference_bandwidth - 1.84).abs() < 1e-9);
        assert_eq!(a.iterations, b.iterations);
        assert_eq!(a.mode_counts().len(), 5);
    }

    #[test]
    fn test_unseeded_run_reports_its_seed() {
        let grid = BandwidthGrid::new(10.0, 0.01).unwrap();
        let first = BootstrapStabilityEstimator::default()
            .run(&chondrite_sample(), &grid, 1, 2)
            .unwrap();

        let replay = BootstrapStabilityEstimator::default()
            .with_seed(first.seed)
            .run(&chondrite_sample(), &grid, 1, 2)
            .unwrap();
        assert_eq!(first.iterations, replay.iterations);
    }

    #[test]
    fn test_zero_simulations() {
        let grid = BandwidthGrid::new(10.0, 0.01).unwrap();
        assert!(matches!(
            BootstrapStabilityEstimator::default().run(&chondrite_sample(), &grid, 2, 0),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_reference_not_found() {
        let sample = Sample::new(evenly_spaced(10)).unwrap();
        let grid = BandwidthGrid::new(2.0, 0.01).unwrap();
        assert!(matches!(
            BootstrapStabilityEstimator::default()
                .with_seed(1)
                .run(&sample, &grid, 11, 3),
            Err(Error::NotFound { target_modes: 11 })
        ));
    }

    #[test]
    fn test_timeout() {
        let grid = BandwidthGrid::new(10.0, 0.01).unwrap();
        let result = BootstrapStabilityEstimator::default()
            .with_seed(3)
            .with_time_limit(Duration::from_nanos(1))
            .run(&chondrite_sample(), &grid, 2, 10);
        match result {
            Err(Error::Timeout { limit, finished }) => {
                assert_eq!(limit, Duration::from_nanos(1));
                assert!(finished.is_empty());
            }
            other => panic!("expected Timeout, got {other:?}"),
        }
    }

    /// Runs iterations one at a time, pausing before each after the first
    #[derive(Debug, Clone, Copy)]
    struct Throttled(Duration);

    impl ExecutionEngine for Throttled {
        fn execute_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
        where
            F: Fn(usize) -> R + Sync + Send,
            R: Send,
        {
            (0..count)
                .map(|i| {
                    if i > 0 {
                        std::thread::sleep(self.0);
                    }
                    f(i)
                })
                .collect()
        }

        fn strategy(&self) -> ExecutionStrategy {
            ExecutionStrategy::Sequential
        }

        fn num_threads(&self) -> usize {
            1
        }
    }

    #[test]
    fn test_timeout_keeps_finished_iterations() {
        let sample = Sample::new(evenly_spaced(10)).unwrap();
        let grid = BandwidthGrid::new(2.0, 0.01).unwrap();
        let full = BootstrapStabilityEstimator::default()
            .with_seed(21)
            .run(&sample, &grid, 10, 3)
            .unwrap();

        let result = BootstrapStabilityEstimator::default()
            .with_engine(Throttled(Duration::from_millis(400)))
            .with_seed(21)
            .with_time_limit(Duration::from_millis(200))
            .run(&sample, &grid, 10, 3);
        match result {
            Err(Error::Timeout { finished, .. }) => {
                assert_eq!(finished, vec![(0, full.iterations[0].clone())]);
            }
            other => panic!("expected Timeout, got {other:?}"),
        }
    }

    /// Runs iterations from the last index down, returning results in index order
    #[derive(Debug, Clone, Copy)]
    struct Reversed;

    impl ExecutionEngine for Reversed {
        fn execute_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
        where
            F: Fn(usize) -> R + Sync + Send,
            R: Send,
        {
            let mut results: Vec<R> = (0..count).rev().map(f).collect();
            results.reverse();
            results
        }

        fn strategy(&self) -> ExecutionStrategy {
            ExecutionStrategy::Parallel
        }

        fn num_threads(&self) -> usize {
            2
        }
    }

    /// Density whose draws are a single random value repeated
    #[derive(Debug, Clone, Copy)]
    struct Constant;

    struct ConstantModel(GaussianKde);

    impl DensityModel for ConstantModel {
        fn bandwidth(&self) -> f64 {
            self.0.bandwidth()
        }

        fn sample(&self) -> &Sample {
            self.0.sample()
        }

        fn density_at(&self, x: f64) -> f64 {
            self.0.density_at(x)
        }

        fn draw<R: Rng + ?Sized>(&self, n: usize, _: ResamplingScheme, rng: &mut R) -> Vec<f64> {
            vec![rng.gen::<f64>(); n]
        }
    }

    impl DensityEstimator for Constant {
        type Model = ConstantModel;

        fn fit(&self, sample: &Sample, bandwidth: f64) -> Result<ConstantModel> {
            Ok(ConstantModel(GaussianKdeEstimator.fit(sample, bandwidth)?))
        }
    }

    #[test]
    fn test_abort_reports_lowest_failing_iteration() {
        // every iteration fails with a message naming its own drawn value
        let expected = Error::zero_spread(StdRng::seed_from_u64(5).gen::<f64>()).to_string();

        let estimator =
            BootstrapStabilityEstimator::new(CriticalBandwidthSearch::default(), Constant, Reversed)
                .with_seed(5);
        let err = estimator
            .run(&chondrite_sample(), &BandwidthGrid::new(10.0, 0.01).unwrap(), 2, 4)
            .unwrap_err();
        assert_eq!(err.to_string(), expected);

        let sequential = estimator.with_engine(SequentialEngine);
        let err = sequential
            .run(&chondrite_sample(), &BandwidthGrid::new(10.0, 0.01).unwrap(), 2, 4)
            .unwrap_err();
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn test_not_found_iterations_are_values() {
        // ten unit-spaced points reach ten modes only near the smallest bandwidths;
        // synthetic samples drawn at that bandwidth often fall short
        let sample = Sample::new(evenly_spaced(10)).unwrap();
        let grid = BandwidthGrid::new(2.0, 0.01).unwrap();
        let result = BootstrapStabilityEstimator::default()
            .with_seed(11)
            .run(&sample, &grid, 10, 8)
            .unwrap();

        assert_eq!(result.len(), 8);
        assert_eq!(result.critical_bandwidths().len(), 8);
        let summary = result.summary();
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.found + summary.not_found, 8);
        assert!(result
            .critical_bandwidths()
            .contains(&CriticalBandwidth::NotFound));
    }
}
