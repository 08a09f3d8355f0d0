//! Error types for quadrature.

use numerus_core::ThresholdError;
use thiserror::Error;

/// Result type for quadrature operations.
pub type IntegrateResult<T> = Result<T, IntegrateError>;

/// Errors that can occur while integrating.
///
/// Failing to reach the requested accuracy within the subdivision budget
/// is not an error; it is reported through
/// [`ConvergenceStatus`](crate::ConvergenceStatus).
#[derive(Clone, Debug, PartialEq, Error)]
pub enum IntegrateError {
    /// Bounds are not finite or `lower > upper`.
    #[error("invalid interval [{lower}, {upper}]: bounds must be finite with lower <= upper")]
    InvalidInterval {
        /// Requested lower bound.
        lower: f64,
        /// Requested upper bound.
        upper: f64,
    },

    /// Breakpoints are not finite and non-decreasing.
    #[error("breakpoint {index} is not finite or breaks the non-decreasing order")]
    UnsortedBreakpoints {
        /// Position of the first offending breakpoint.
        index: usize,
    },

    /// The accuracy control is misconfigured.
    #[error(transparent)]
    Threshold(#[from] ThresholdError),

    /// The integrand produced NaN or an infinity.
    #[error("integrand returned a non-finite value at x = {argument}")]
    NonFiniteValue {
        /// Argument of the offending evaluation.
        argument: f64,
    },

    /// A batch evaluation returned the wrong number of values.
    #[error("batch evaluation returned {actual} values for {expected} points")]
    BatchSizeMismatch {
        /// Number of points handed to the integrand.
        expected: usize,
        /// Number of values it returned.
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use numerus_core::ThresholdKind;

    #[test]
    fn test_error_display() {
        let err = IntegrateError::InvalidInterval {
            lower: 2.0,
            upper: 1.0,
        };
        assert!(err.to_string().contains("invalid interval [2, 1]"));

        let err = IntegrateError::BatchSizeMismatch {
            expected: 30,
            actual: 29,
        };
        assert_eq!(err.to_string(), "batch evaluation returned 29 values for 30 points");

        let err: IntegrateError = ThresholdError::NonFinite {
            which: ThresholdKind::LocalAbsolute,
        }
        .into();
        assert!(err.to_string().contains("local absolute"));
    }
}
