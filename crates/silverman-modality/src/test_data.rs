//! Test data for critical-bandwidth tests
//!
//! Fixed reference data plus seeded generators, so tests across the crate use
//! the same samples.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal, Uniform};

/// Silica content (%) of 22 chondrite meteors, the data set Silverman's 1981
/// paper uses to illustrate the test. Its critical bandwidth for two modes
/// on the grid `(0, 10, 0.01)` is 1.84.
pub fn chondrite() -> Vec<f64> {
    vec![
        20.77, 22.56, 22.71, 22.99, 26.39, 27.08, 27.32, 27.33, 27.57, 27.81, 28.69, 29.36, 30.25,
        31.89, 32.88, 33.23, 33.28, 33.40, 33.52, 33.83, 33.95, 34.82,
    ]
}

/// `n` points one unit apart: `0, 1, .., n - 1`
pub fn evenly_spaced(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}

/// `n` draws from N(0, 1)
pub fn unimodal_normal(n: usize, seed: u64) -> Vec<f64> {
    mixture_normal(&[0.0], &[1.0], &[1.0], n, Some(seed))
}

/// `n` draws split evenly between N(-5, 1) and N(5, 1)
pub fn bimodal_separated(n: usize, seed: u64) -> Vec<f64> {
    mixture_normal(&[-5.0, 5.0], &[1.0, 1.0], &[1.0, 1.0], n, Some(seed))
}

/// Creates a sample from a mixture of normal distributions
///
/// Weights are normalised; without a seed the generator is seeded from
/// system entropy.
pub fn mixture_normal(
    means: &[f64],
    stds: &[f64],
    weights: &[f64],
    n: usize,
    seed: Option<u64>,
) -> Vec<f64> {
    assert_eq!(means.len(), stds.len());
    assert_eq!(means.len(), weights.len());
    assert!(!means.is_empty());

    let total_weight: f64 = weights.iter().sum();
    let mut cumulative = Vec::with_capacity(weights.len());
    let mut acc = 0.0;
    for &w in weights {
        acc += w / total_weight;
        cumulative.push(acc);
    }

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let uniform = Uniform::new(0.0, 1.0);
    let components: Vec<Normal<f64>> = means
        .iter()
        .zip(stds)
        .map(|(&mean, &std)| Normal::new(mean, std).unwrap())
        .collect();

    (0..n)
        .map(|_| {
            let u = uniform.sample(&mut rng);
            let component = cumulative
                .iter()
                .position(|&c| u < c)
                .unwrap_or(components.len() - 1);
            components[component].sample(&mut rng)
        })
        .collect()
}
