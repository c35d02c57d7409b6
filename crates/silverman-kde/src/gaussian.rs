//! Gaussian kernel density estimator

use crate::sample::Sample;
use crate::traits::{DensityEstimator, DensityModel, ResamplingScheme};
use rand::Rng;
use rand_distr::StandardNormal;
use silverman_core::math::standard_normal_pdf;
use silverman_core::{Error, Result};

/// Estimator producing [`GaussianKde`] models.
///
/// The bandwidth is always explicit; there is no rule-of-thumb selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct GaussianKdeEstimator;

impl DensityEstimator for GaussianKdeEstimator {
    type Model = GaussianKde;

    fn fit(&self, sample: &Sample, bandwidth: f64) -> Result<GaussianKde> {
        GaussianKde::new(sample.clone(), bandwidth)
    }

    fn name(&self) -> &'static str {
        "gaussian"
    }
}

/// Gaussian kernel density estimate
///
/// `f(x) = 1 / (n h) * Σ φ((x - x_i) / h)` with `φ` the standard normal density.
#[derive(Debug, Clone)]
pub struct GaussianKde {
    sample: Sample,
    bandwidth: f64,
    norm: f64,
}

impl GaussianKde {
    /// Fit to an already validated sample.
    pub fn new(sample: Sample, bandwidth: f64) -> Result<Self> {
        if !(bandwidth > 0.0 && bandwidth.is_finite()) {
            return Err(Error::InvalidBandwidth(bandwidth));
        }
        let norm = (sample.len() as f64 * bandwidth).recip();
        Ok(Self {
            sample,
            bandwidth,
            norm,
        })
    }

    /// Consume the model and return its sample
    pub fn into_sample(self) -> Sample {
        self.sample
    }

    fn draw_smoothed<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<f64> {
        let data = self.sample.as_slice();
        (0..n)
            .map(|_| {
                let centre = data[rng.gen_range(0..data.len())];
                let eps: f64 = rng.sample(StandardNormal);
                centre + self.bandwidth * eps
            })
            .collect()
    }

    fn draw_variance_corrected<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<f64> {
        let mean = self.sample.mean();
        let sd = self.sample.std_dev();
        let shrink = (1.0 + (self.bandwidth / sd).powi(2)).sqrt().recip();
        self.draw_smoothed(n, rng)
            .into_iter()
            .map(|y| mean + (y - mean) * shrink)
            .collect()
    }
}

impl DensityModel for GaussianKde {
    fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    fn sample(&self) -> &Sample {
        &self.sample
    }

    fn density_at(&self, x: f64) -> f64 {
        let inv_h = self.bandwidth.recip();
        let sum: f64 = self
            .sample
            .as_slice()
            .iter()
            .map(|&xi| standard_normal_pdf((x - xi) * inv_h))
            .sum();
        sum * self.norm
    }

    fn draw<R: Rng + ?Sized>(&self, n: usize, scheme: ResamplingScheme, rng: &mut R) -> Vec<f64> {
        match scheme {
            ResamplingScheme::Smoothed => self.draw_smoothed(n, rng),
            ResamplingScheme::VarianceCorrected => self.draw_variance_corrected(n, rng),
        }
    }
}
