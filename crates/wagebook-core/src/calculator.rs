//! Salary calculator: total pay from hourly rate and hours worked.

/// Compute the total pay for one day, rounded to a whole currency unit.
///
/// Rounding is half away from zero. Inputs are normalized to be non-negative
/// before they get here, so for every reachable input this is the same as
/// rounding half up. A product that is not finite yields 0.
#[must_use]
pub fn compute_total(hourly_rate: f64, work_hours: f64) -> i64 {
    let product = hourly_rate * work_hours;
    if !product.is_finite() {
        return 0;
    }
    // `as` saturates at i64 bounds.
    product.round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_rate_full_day() {
        assert_eq!(compute_total(183.0, 8.0), 1464);
    }

    #[test]
    fn half_rounds_up_for_positive_inputs() {
        assert_eq!(compute_total(183.0, 0.5), 92); // 91.5
        assert_eq!(compute_total(1.0, 2.5), 3);
        assert_eq!(compute_total(1.0, 2.49), 2);
    }

    #[test]
    fn zero_inputs_yield_zero() {
        assert_eq!(compute_total(0.0, 8.0), 0);
        assert_eq!(compute_total(183.0, 0.0), 0);
    }

    #[test]
    fn non_finite_product_yields_zero() {
        assert_eq!(compute_total(f64::INFINITY, 2.0), 0);
        assert_eq!(compute_total(f64::NAN, 2.0), 0);
    }

    proptest! {
        #[test]
        fn total_is_non_negative_and_deterministic(rate in 0.0f64..100_000.0, hours in 0.0f64..24.0) {
            let a = compute_total(rate, hours);
            let b = compute_total(rate, hours);
            prop_assert_eq!(a, b);
            prop_assert!(a >= 0);
        }

        #[test]
        fn zero_factor_annihilates(x in 0.0f64..1_000_000.0) {
            prop_assert_eq!(compute_total(0.0, x), 0);
            prop_assert_eq!(compute_total(x, 0.0), 0);
        }

        #[test]
        fn total_is_within_half_of_product(rate in 0.0f64..10_000.0, hours in 0.0f64..24.0) {
            let total = compute_total(rate, hours) as f64;
            prop_assert!((total - rate * hours).abs() <= 0.5);
        }
    }
}
