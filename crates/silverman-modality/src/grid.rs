//! The discretised bandwidth axis searched for the critical bandwidth

use silverman_core::math::floor_ratio;
use silverman_core::{Error, Result};

/// Candidate bandwidths `h_i = i * step` for `i = 0 .. len - 1`,
/// `len = floor(max / step)`.
///
/// The grid is derived, never stored: only the step and the cardinality are
/// kept. `h_0` is zero, which is not a usable kernel bandwidth; searches
/// treat it as the fully peaked limit of the density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandwidthGrid {
    max: f64,
    step: f64,
    len: usize,
}

impl BandwidthGrid {
    /// Build the grid for `(0, max, step)`.
    ///
    /// # Errors
    /// `InvalidSearchParameters` if either bound is not positive and finite
    /// or the grid would have no candidates.
    pub fn new(max: f64, step: f64) -> Result<Self> {
        if !(max > 0.0 && max.is_finite()) {
            return Err(Error::InvalidSearchParameters(format!(
                "search maximum must be positive and finite, got {max}"
            )));
        }
        if !(step > 0.0 && step.is_finite()) {
            return Err(Error::InvalidSearchParameters(format!(
                "search step must be positive and finite, got {step}"
            )));
        }
        let len = floor_ratio(max, step).unwrap_or(0);
        if len == 0 {
            return Err(Error::InvalidSearchParameters(format!(
                "grid (0, {max}, {step}) has no candidate bandwidths"
            )));
        }
        Ok(Self { max, step, len })
    }

    /// Number of grid points
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false: construction rejects empty grids
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Bandwidth at grid index `i`
    #[inline]
    pub fn value(&self, i: usize) -> f64 {
        i as f64 * self.step
    }

    /// Whether index `i` is a usable (strictly positive) bandwidth
    #[inline]
    pub fn is_usable(&self, i: usize) -> bool {
        self.value(i) > 0.0
    }

    /// Index of the grid point nearest to `bandwidth`, if it lies on the grid
    pub fn index_of(&self, bandwidth: f64) -> Option<usize> {
        let i = (bandwidth / self.step).round();
        if i < 0.0 || i >= self.len as f64 {
            return None;
        }
        let i = i as usize;
        ((self.value(i) - bandwidth).abs() <= 1e-9 * self.step.max(bandwidth.abs()))
            .then_some(i)
    }

    /// Iterate over all grid bandwidths in increasing order
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len).map(move |i| self.value(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cardinality() {
        assert_eq!(BandwidthGrid::new(10.0, 0.01).unwrap().len(), 1000);
        assert_eq!(BandwidthGrid::new(1.0, 1.0).unwrap().len(), 1);
        assert_eq!(BandwidthGrid::new(0.3, 0.1).unwrap().len(), 3);
        assert_eq!(BandwidthGrid::new(2.5, 1.0).unwrap().len(), 2);
    }

    #[test]
    fn test_values_are_strictly_increasing() {
        let grid = BandwidthGrid::new(10.0, 0.01).unwrap();
        assert_eq!(grid.value(0), 0.0);
        assert!(!grid.is_usable(0));
        assert!(grid.is_usable(1));
        assert_relative_eq!(grid.value(184), 1.84, epsilon = 1e-12);
        assert_relative_eq!(grid.value(999), 9.99, epsilon = 1e-12);

        let values: Vec<f64> = grid.iter().collect();
        assert_eq!(values.len(), 1000);
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_index_of() {
        let grid = BandwidthGrid::new(10.0, 0.01).unwrap();
        assert_eq!(grid.index_of(grid.value(184)), Some(184));
        assert_eq!(grid.index_of(1.84), Some(184));
        assert_eq!(grid.index_of(1.845), None);
        assert_eq!(grid.index_of(10.0), None);
        assert_eq!(grid.index_of(-0.01), None);
    }

    #[test]
    fn test_invalid_parameters() {
        for (max, step) in [
            (0.0, 0.1),
            (-1.0, 0.1),
            (1.0, 0.0),
            (1.0, -0.1),
            (f64::NAN, 0.1),
            (1.0, f64::INFINITY),
            (0.5, 1.0),
        ] {
            assert!(
                matches!(
                    BandwidthGrid::new(max, step),
                    Err(Error::InvalidSearchParameters(_))
                ),
                "({max}, {step}) should be rejected"
            );
        }
    }
}
