//! Sample moments used by the bounds and backcast helpers.
//!
//! All functions return `0.0` for an empty slice; callers that need to reject
//! empty input do so before calling.

/// Arithmetic mean.
pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Population variance (divisor `n`).
pub fn variance(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    let mu = mean(xs);
    xs.iter().map(|x| (x - mu) * (x - mu)).sum::<f64>() / xs.len() as f64
}

/// Largest squared element.
pub fn max_square(xs: &[f64]) -> f64 {
    xs.iter().map(|x| x * x).fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_and_variance() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(mean(&xs), 2.5);
        assert_relative_eq!(variance(&xs), 1.25);
    }

    #[test]
    fn test_empty() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(variance(&[]), 0.0);
        assert_eq!(max_square(&[]), 0.0);
    }

    #[test]
    fn test_max_square_uses_magnitude() {
        assert_eq!(max_square(&[1.0, -3.0, 2.0]), 9.0);
    }
}
