//! Mathematical utilities shared by the density and search crates

/// `1 / sqrt(2π)`, the normalising constant of the standard normal density
pub const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Tolerance absorbed when flooring a ratio of two floating-point values.
///
/// `0.3 / 0.1` evaluates to `2.9999999999999996`; without the tolerance the
/// floor would drop a grid point.
pub const RATIO_TOLERANCE: f64 = 1e-9;

/// Standard normal probability density at `z`
#[inline]
pub fn standard_normal_pdf(z: f64) -> f64 {
    FRAC_1_SQRT_2PI * (-0.5 * z * z).exp()
}

/// Normal density with mean `mu` and standard deviation `sigma` at `x`
#[inline]
pub fn normal_pdf(x: f64, mu: f64, sigma: f64) -> f64 {
    standard_normal_pdf((x - mu) / sigma) / sigma
}

/// `n` evenly spaced points from `start` to `end` inclusive.
///
/// Points are computed as `start + i * step` rather than by accumulation so
/// that the last point equals `end` up to a single rounding.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + i as f64 * step).collect()
        }
    }
}

/// `floor(numerator / denominator)` with [`RATIO_TOLERANCE`] applied.
///
/// Returns `None` if the ratio is not finite or negative.
pub fn floor_ratio(numerator: f64, denominator: f64) -> Option<usize> {
    let ratio = numerator / denominator;
    if !ratio.is_finite() || ratio < 0.0 {
        return None;
    }
    Some((ratio + RATIO_TOLERANCE).floor() as usize)
}
