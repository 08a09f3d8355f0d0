//! Errors raised while configuring accuracy control.

use std::fmt;

use thiserror::Error;

/// Identifies one of the four convergence thresholds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThresholdKind {
    /// Relative threshold of the per-interval check.
    LocalRelative,
    /// Absolute threshold of the per-interval check.
    LocalAbsolute,
    /// Relative threshold of the whole-range check.
    GlobalRelative,
    /// Absolute threshold of the whole-range check.
    GlobalAbsolute,
}

impl fmt::Display for ThresholdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ThresholdKind::LocalRelative => "local relative",
            ThresholdKind::LocalAbsolute => "local absolute",
            ThresholdKind::GlobalRelative => "global relative",
            ThresholdKind::GlobalAbsolute => "global absolute",
        };
        f.write_str(name)
    }
}

/// Errors from an inconsistent [`AccuracyControl`](crate::AccuracyControl).
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ThresholdError {
    /// A threshold component is NaN or infinite.
    #[error("{which} error threshold has a non-finite component")]
    NonFinite {
        /// The offending threshold.
        which: ThresholdKind,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ThresholdError::NonFinite {
            which: ThresholdKind::GlobalAbsolute,
        };
        assert_eq!(
            err.to_string(),
            "global absolute error threshold has a non-finite component"
        );
    }
}
