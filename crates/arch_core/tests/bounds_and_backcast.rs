//! Integration tests for the foundation layer.
//!
//! Property tests for the variance clamp and the backcast weighting.

use arch_core::math::backcast::{ewma_weights, BACKCAST_DECAY, BACKCAST_WINDOW};
use arch_core::math::compute_backcast;
use arch_core::math::moments::{max_square, variance};
use arch_core::types::{Bounds, ErrorKind, KernelError};
use proptest::prelude::*;

#[test]
fn test_invalid_bounds_are_input_mismatch() {
    let err = Bounds::new(2.0, 1.0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InputMismatch);
    assert!(matches!(err, KernelError::InvalidBounds { .. }));
    assert!(Bounds::new(f64::NAN, 1.0).is_err());
}

#[test]
fn test_backcast_window_constants() {
    assert_eq!(BACKCAST_WINDOW, 75);
    assert_eq!(BACKCAST_DECAY, 0.94);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Clamped values always land inside the interval.
    #[test]
    fn prop_clamp_within_bounds(lower in 1e-10f64..1.0, width in 0.0f64..1e6, x in prop::num::f64::ANY) {
        let bounds = Bounds::new(lower, lower + width).unwrap();
        prop_assert!(bounds.contains(bounds.clamp(x)));
    }

    /// Values already inside are returned unchanged.
    #[test]
    fn prop_clamp_identity_inside(lower in 1e-10f64..1.0, t in 0.0f64..0.99) {
        let bounds = Bounds::new(lower, lower * 100.0).unwrap();
        let x = lower + t * (bounds.upper() - lower);
        prop_assert_eq!(bounds.clamp(x), x);
    }

    /// Residual-derived bounds bracket the sample variance and backcast.
    #[test]
    fn prop_residual_bounds_bracket_sample(resids in prop::collection::vec(-10.0f64..10.0, 2..200)) {
        let bounds = Bounds::from_residuals(&resids).unwrap();
        prop_assert!(bounds.lower() > 0.0);
        prop_assert!(bounds.upper() >= 1e7 * (1.0 + max_square(&resids)) * (1.0 - 1e-12));
        prop_assert!(bounds.lower() <= variance(&resids).max(f64::MIN_POSITIVE));

        let backcast = compute_backcast(&resids).unwrap();
        prop_assert!(backcast >= 0.0);
        prop_assert!(backcast <= max_square(&resids) * (1.0 + 1e-12));
    }

    /// Backcast weights sum to one for any window length.
    #[test]
    fn prop_weights_normalised(len in 1usize..200) {
        let total: f64 = ewma_weights(len, BACKCAST_DECAY).iter().sum();
        prop_assert!((total - 1.0).abs() < 1e-12);
    }
}
