use crate::config::{DEFAULT_MARGIN_BANDWIDTHS, DEFAULT_RESOLUTION};
use crate::traits::ModeCounting;
use crate::types::{Mode, ModeReport};
use silverman_core::{Error, Result};
use tracing::warn;
use silverman_kde::{
    local_maxima_indices, local_minima_indices, DensityEstimator, DensityModel, EvaluationGrid,
    GaussianKdeEstimator, Sample,
};

/// Counts the modes of a kernel density estimate.
///
/// The density is evaluated at `resolution` evenly spaced points covering the
/// sample range padded by `margin` bandwidths on each side, and every point
/// strictly higher than both neighbours is a mode.
///
/// # Resolution
///
/// The count is only as good as the evaluation grid. If the grid spacing is
/// comparable to the bandwidth, two nearby maxima can fall between grid points
/// and merge, or a single maximum can straddle two equal grid values and be
/// missed. Either effect can make the count non-monotone in the bandwidth,
/// which breaks the assumption the binary search relies on. Keep the spacing
/// `(range + 2 * margin * h) / (resolution - 1)` well below the smallest
/// bandwidth searched, or use
/// [`SearchStrategy::BinaryVerified`](crate::SearchStrategy::BinaryVerified).
/// A count taken on a grid coarser than the bandwidth logs a warning.
#[derive(Debug, Clone)]
pub struct ModeCounter<E = GaussianKdeEstimator> {
    estimator: E,
    resolution: usize,
    margin: f64,
}

impl ModeCounter<GaussianKdeEstimator> {
    /// Gaussian counter with default resolution and margin
    pub fn gaussian() -> Self {
        Self::new(GaussianKdeEstimator)
    }
}

impl Default for ModeCounter<GaussianKdeEstimator> {
    fn default() -> Self {
        Self::gaussian()
    }
}

impl<E: DensityEstimator> ModeCounter<E> {
    /// Creates a counter around `estimator` with default resolution and margin.
    pub fn new(estimator: E) -> Self {
        Self {
            estimator,
            resolution: DEFAULT_RESOLUTION,
            margin: DEFAULT_MARGIN_BANDWIDTHS,
        }
    }

    /// Sets the number of evaluation points.
    ///
    /// # Errors
    /// `InvalidParameter` below [`EvaluationGrid::MIN_POINTS`].
    pub fn with_resolution(mut self, resolution: usize) -> Result<Self> {
        if resolution < EvaluationGrid::MIN_POINTS {
            return Err(Error::InvalidParameter(format!(
                "resolution must be at least {}, got {resolution}",
                EvaluationGrid::MIN_POINTS
            )));
        }
        self.resolution = resolution;
        Ok(self)
    }

    /// Sets the grid padding in bandwidths.
    pub fn with_margin(mut self, margin: f64) -> Result<Self> {
        if !(margin >= 0.0 && margin.is_finite()) {
            return Err(Error::InvalidParameter(format!(
                "margin must be finite and non-negative, got {margin}"
            )));
        }
        self.margin = margin;
        Ok(self)
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    /// Count modes of raw observations.
    ///
    /// The bandwidth is checked before the sample, so a bad bandwidth is
    /// reported even when the sample is also unusable.
    pub fn count_modes_in(&self, values: &[f64], bandwidth: f64) -> Result<ModeReport> {
        check_bandwidth(bandwidth)?;
        let sample = Sample::try_from(values)?;
        self.count_modes(&sample, bandwidth)
    }
}

impl<E: DensityEstimator> ModeCounting for ModeCounter<E> {
    fn count_modes(&self, sample: &Sample, bandwidth: f64) -> Result<ModeReport> {
        check_bandwidth(bandwidth)?;

        let model = self.estimator.fit(sample, bandwidth)?;
        let grid = EvaluationGrid::spanning(sample, bandwidth, self.resolution, self.margin)?;
        if grid.spacing() > bandwidth {
            warn!(
                spacing = grid.spacing(),
                bandwidth,
                resolution = self.resolution,
                "evaluation grid is coarser than the bandwidth; nearby modes may merge"
            );
        }
        let density = model.evaluate(grid.points());

        let peaks = local_maxima_indices(&density);
        let modes: Vec<Mode> = peaks
            .iter()
            .map(|&i| Mode::new(grid.x(i), density[i]))
            .collect();

        let antimodes = match (peaks.first(), peaks.last()) {
            (Some(&first), Some(&last)) if first < last => local_minima_indices(&density)
                .into_iter()
                .filter(|&i| i > first && i < last)
                .map(|i| grid.x(i))
                .collect(),
            _ => Vec::new(),
        };

        Ok(ModeReport::new(bandwidth, modes, antimodes))
    }
}

fn check_bandwidth(bandwidth: f64) -> Result<()> {
    if bandwidth > 0.0 && bandwidth.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidBandwidth(bandwidth))
    }
}
