//! Local extrema on uniformly sampled sequences

/// Indices `i` with `values[i - 1] < values[i] > values[i + 1]`.
///
/// Only interior points qualify and both comparisons are strict, so a flat
/// top spanning several samples is not reported. Indices are increasing.
pub fn local_maxima_indices(values: &[f64]) -> Vec<usize> {
    values
        .windows(3)
        .enumerate()
        .filter(|(_, w)| w[0] < w[1] && w[1] > w[2])
        .map(|(i, _)| i + 1)
        .collect()
}

/// Indices `i` with `values[i - 1] > values[i] < values[i + 1]`.
pub fn local_minima_indices(values: &[f64]) -> Vec<usize> {
    values
        .windows(3)
        .enumerate()
        .filter(|(_, w)| w[0] > w[1] && w[1] < w[2])
        .map(|(i, _)| i + 1)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_peaks() {
        let v = [0.0, 1.0, 0.0, 2.0, 3.0, 1.0];
        assert_eq!(local_maxima_indices(&v), vec![1, 4]);
        assert_eq!(local_minima_indices(&v), vec![2]);
    }

    #[test]
    fn test_endpoints_never_reported() {
        assert!(local_maxima_indices(&[5.0, 1.0, 5.0]).is_empty());
        assert!(local_maxima_indices(&[1.0, 2.0, 3.0]).is_empty());
    }

    #[test]
    fn test_plateau_is_not_a_mode() {
        assert!(local_maxima_indices(&[0.0, 1.0, 1.0, 0.0]).is_empty());
        assert!(local_maxima_indices(&[0.0, 0.0, 0.0, 0.0]).is_empty());
    }

    #[test]
    fn test_short_inputs() {
        assert!(local_maxima_indices(&[]).is_empty());
        assert!(local_maxima_indices(&[1.0]).is_empty());
        assert!(local_maxima_indices(&[1.0, 2.0]).is_empty());
    }

    #[test]
    fn test_nan_is_never_a_peak() {
        assert!(local_maxima_indices(&[0.0, f64::NAN, 0.0]).is_empty());
    }
}
