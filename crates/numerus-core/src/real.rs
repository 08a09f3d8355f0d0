//! Real scalar types.
//!
//! [`Real`] is the scalar used for integration arguments, quadrature
//! weights and accuracy thresholds. It is implemented for `f32` and `f64`.

use std::fmt::{Debug, Display, LowerExp};

use num_traits::Float;

/// A real floating-point scalar.
///
/// Every numerical constant used by the quadrature engine is introduced
/// through [`Real::lit`], so the same code runs in single and double
/// precision.
pub trait Real: Float + Debug + Display + LowerExp + Default + Send + Sync + 'static {
    /// The default convergence threshold for this precision.
    ///
    /// `1e-12` for `f64` and `1e-5` for `f32`.
    fn accuracy_goal() -> Self;

    /// Converts a literal constant to this precision.
    fn lit(value: f64) -> Self;

    /// Widens to `f64`, used for diagnostics and error payloads.
    fn to_f64_lossy(self) -> f64;
}

impl Real for f64 {
    #[inline]
    fn accuracy_goal() -> Self {
        1e-12
    }

    #[inline]
    fn lit(value: f64) -> Self {
        value
    }

    #[inline]
    fn to_f64_lossy(self) -> f64 {
        self
    }
}

impl Real for f32 {
    #[inline]
    fn accuracy_goal() -> Self {
        1e-5
    }

    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    fn lit(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn to_f64_lossy(self) -> f64 {
        f64::from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_goals() {
        assert_eq!(<f64 as Real>::accuracy_goal(), 1e-12);
        assert_eq!(<f32 as Real>::accuracy_goal(), 1e-5);
    }

    #[test]
    fn test_lit_round_trips_for_f64() {
        assert_eq!(<f64 as Real>::lit(0.5), 0.5);
        assert_eq!(<f32 as Real>::lit(0.5), 0.5_f32);
        assert_eq!(1.25_f32.to_f64_lossy(), 1.25);
    }
}
