//! Element-wise comparisons of numeric values.
//!
//! Multi-component values are never reduced to a norm. A comparison holds
//! only if it holds for every component, so `[1.0, 3.0]` is neither lower
//! than nor greater than `[2.0, 2.0]`.

use num_traits::Float;

use crate::value::NumericValue;

/// Returns true if `|a_i| <= |b_i|` for every component.
///
/// Equality counts as passing, so an error estimate equal to its threshold
/// is converged.
pub fn abs_leq<V: NumericValue>(a: &V, b: &V) -> bool {
    a.all_components(b, |x, y| x.abs() <= y.abs())
}

/// Returns true if `a_i < b_i` for every component.
pub fn first_lower_than_second<V: NumericValue>(first: &V, second: &V) -> bool {
    first.all_components(second, |x, y| x < y)
}

/// Returns true if `a_i <= b_i` for every component.
pub fn first_leq_than_second<V: NumericValue>(first: &V, second: &V) -> bool {
    first.all_components(second, |x, y| x <= y)
}

/// Component-wise absolute value.
pub fn abs_value<V: NumericValue>(value: &V) -> V {
    value.map_components(Float::abs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;

    #[test]
    fn test_abs_leq_is_non_strict() {
        assert!(abs_leq(&1e-12_f64, &1e-12));
        assert!(abs_leq(&-1e-13_f64, &1e-12));
        assert!(!abs_leq(&2e-12_f64, &-1e-12));
    }

    #[test]
    fn test_abs_leq_requires_every_component() {
        assert!(abs_leq(&[1.0_f64, -2.0], &[1.0, 2.0]));
        assert!(!abs_leq(&[1.0_f64, 3.0], &[1.0, 2.0]));
        assert!(!abs_leq(
            &Complex::new(0.0_f64, 2.0),
            &Complex::new(5.0, 1.0)
        ));
    }

    #[test]
    fn test_strict_and_non_strict_ordering() {
        assert!(first_lower_than_second(&1.0_f64, &2.0));
        assert!(!first_lower_than_second(&2.0_f64, &2.0));
        assert!(first_leq_than_second(&2.0_f64, &2.0));

        // Partial order: neither dominates.
        let a = [1.0_f64, 3.0];
        let b = [2.0_f64, 2.0];
        assert!(!first_lower_than_second(&a, &b));
        assert!(!first_lower_than_second(&b, &a));
    }

    #[test]
    fn test_abs_value() {
        assert_eq!(abs_value(&vec![-1.0_f64, 2.0]), vec![1.0, 2.0]);
    }
}
