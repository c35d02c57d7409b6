//! Evaluation grids for density curves

use crate::sample::Sample;
use silverman_core::math::linspace;
use silverman_core::{Error, Result};

/// Evenly spaced points at which a fitted density is evaluated.
///
/// The grid covers the sample range widened by `margin` bandwidths on each
/// side, so that the density has decayed towards zero at both ends and every
/// mode lies strictly inside the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationGrid {
    points: Vec<f64>,
}

impl EvaluationGrid {
    /// Minimum number of points; fewer cannot contain an interior point.
    pub const MIN_POINTS: usize = 3;

    /// Grid of `points` values over `[min - margin*h, max + margin*h]`.
    pub fn spanning(sample: &Sample, bandwidth: f64, points: usize, margin: f64) -> Result<Self> {
        if points < Self::MIN_POINTS {
            return Err(Error::InvalidParameter(format!(
                "evaluation grid needs at least {} points, got {points}",
                Self::MIN_POINTS
            )));
        }
        if !(margin >= 0.0 && margin.is_finite()) {
            return Err(Error::InvalidParameter(format!(
                "grid margin must be finite and non-negative, got {margin}"
            )));
        }
        if !(bandwidth > 0.0 && bandwidth.is_finite()) {
            return Err(Error::InvalidBandwidth(bandwidth));
        }

        let pad = margin * bandwidth;
        Ok(Self {
            points: linspace(sample.min() - pad, sample.max() + pad, points),
        })
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Distance between neighbouring points
    pub fn spacing(&self) -> f64 {
        self.points[1] - self.points[0]
    }

    /// x-coordinate of grid index `i`
    pub fn x(&self, i: usize) -> f64 {
        self.points[i]
    }
}
