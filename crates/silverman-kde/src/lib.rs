//! Gaussian kernel density estimation for mode counting
//!
//! This crate supplies the two collaborators the critical-bandwidth search
//! treats as black boxes:
//!
//! 1. A kernel density estimator with an explicit bandwidth
//!    ([`GaussianKdeEstimator`] / [`GaussianKde`]) that can evaluate the
//!    fitted density on a grid and draw synthetic samples from it
//! 2. A strict local-maxima detector for uniformly sampled values
//!    ([`local_maxima_indices`])
//!
//! # Example
//!
//! ```rust
//! use silverman_kde::{
//!     local_maxima_indices, DensityEstimator, DensityModel, EvaluationGrid, GaussianKdeEstimator,
//!     Sample,
//! };
//!
//! let sample = Sample::new(vec![1.0, 1.2, 0.9, 6.0, 6.3, 5.8]).unwrap();
//! let kde = GaussianKdeEstimator.fit(&sample, 0.5).unwrap();
//! let grid = EvaluationGrid::spanning(kde.sample(), 0.5, 500, 3.0).unwrap();
//! let density = kde.evaluate(grid.points());
//!
//! assert_eq!(local_maxima_indices(&density).len(), 2);
//! ```

pub mod extrema;
pub mod gaussian;
pub mod grid;
pub mod sample;
pub mod traits;

pub use extrema::{local_maxima_indices, local_minima_indices};
pub use gaussian::{GaussianKde, GaussianKdeEstimator};
pub use grid::EvaluationGrid;
pub use sample::Sample;
pub use traits::{DensityEstimator, DensityModel, ResamplingScheme};
