//! Validated univariate samples

use num_traits::ToPrimitive;
use ordered_float::OrderedFloat;
use silverman_core::{Error, Result};
use statrs::statistics::Statistics;
use std::collections::BTreeSet;
use std::sync::Arc;

/// An ordered, immutable sequence of finite observations that can support a
/// kernel density estimate.
///
/// Construction guarantees at least two observations, all finite, with at
/// least two distinct values. Order is preserved so that resampling with a
/// seeded random source is reproducible.
///
/// Observations are shared, so cloning a `Sample` (as fitting a density model
/// does) never copies or re-validates them.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    values: Arc<[f64]>,
    min: f64,
    max: f64,
}

impl Sample {
    /// Validate and wrap `values`.
    ///
    /// # Errors
    /// [`Error::DegenerateSample`] if there are fewer than two observations,
    /// any observation is NaN or infinite, or all observations are equal.
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.len() < 2 {
            return Err(Error::too_few_observations(values.len()));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(Error::non_finite("sample"));
        }

        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if min == max {
            return Err(Error::zero_spread(min));
        }

        Ok(Self {
            values: values.into(),
            min,
            max,
        })
    }

    /// Validate a slice of any primitive numeric type.
    pub fn from_values<T: ToPrimitive>(values: &[T]) -> Result<Self> {
        let converted = values
            .iter()
            .map(|v| {
                v.to_f64().ok_or_else(|| {
                    Error::DegenerateSample("value not representable as f64".to_string())
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        Self::new(converted)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.values.to_vec()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    pub fn mean(&self) -> f64 {
        self.values.iter().mean()
    }

    /// Sample standard deviation (n - 1 denominator)
    pub fn std_dev(&self) -> f64 {
        self.values.iter().std_dev()
    }

    /// Number of distinct observed values.
    ///
    /// As the bandwidth of a Gaussian KDE tends to zero, the density has one
    /// mode per distinct value, so this is the largest mode count any
    /// bandwidth can produce.
    pub fn distinct_count(&self) -> usize {
        self.values
            .iter()
            .map(|&v| OrderedFloat(v))
            .collect::<BTreeSet<_>>()
            .len()
    }
}

impl AsRef<[f64]> for Sample {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

impl TryFrom<Vec<f64>> for Sample {
    type Error = Error;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::new(values)
    }
}

impl TryFrom<&[f64]> for Sample {
    type Error = Error;

    fn try_from(values: &[f64]) -> Result<Self> {
        Self::new(values.to_vec())
    }
}
