//! Core traits for density estimation

use crate::sample::Sample;
use rand::Rng;
use serde::{Deserialize, Serialize};
use silverman_core::Result;

/// How synthetic observations are drawn from a fitted density
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResamplingScheme {
    /// Pick an observation uniformly and add kernel noise scaled by the bandwidth.
    #[default]
    Smoothed,
    /// Smoothed draw rescaled towards the sample mean so that the synthetic
    /// sample keeps the original sample variance (Silverman 1981).
    VarianceCorrected,
}

/// A density model fitted to a sample with a fixed bandwidth
pub trait DensityModel {
    /// The bandwidth the model was fitted with
    fn bandwidth(&self) -> f64;

    /// The sample the model was fitted to
    fn sample(&self) -> &Sample;

    /// Density at a single point
    fn density_at(&self, x: f64) -> f64;

    /// Density at every point of `grid`
    fn evaluate(&self, grid: &[f64]) -> Vec<f64> {
        grid.iter().map(|&x| self.density_at(x)).collect()
    }

    /// Draw `n` synthetic observations from the fitted density
    fn draw<R: Rng + ?Sized>(&self, n: usize, scheme: ResamplingScheme, rng: &mut R) -> Vec<f64>;
}

/// Fits density models with an explicit bandwidth
pub trait DensityEstimator {
    type Model: DensityModel;

    /// Fit a model to an already validated sample with the given bandwidth.
    ///
    /// # Errors
    /// `InvalidBandwidth` for a non-positive or non-finite bandwidth.
    fn fit(&self, sample: &Sample, bandwidth: f64) -> Result<Self::Model>;

    /// Kernel name for logging
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
