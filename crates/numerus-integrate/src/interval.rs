//! Interval records used by the adaptive integrator.

use numerus_core::{NumericValue, Real};

/// A sub-interval whose contribution has been computed.
#[derive(Clone, Debug, PartialEq)]
pub struct Interval<V: NumericValue> {
    /// Lower bound.
    pub lower: V::Scalar,
    /// Upper bound, strictly greater than `lower`.
    pub upper: V::Scalar,
    /// Kronrod estimate of the integral over this interval.
    pub integral: V,
    /// Empirical error estimate of `integral`.
    pub error: V,
    /// Number of bisections along this interval's lineage.
    pub subdivisions: usize,
}

/// A sub-interval waiting to be evaluated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Pending<S> {
    pub lower: S,
    pub upper: S,
    pub subdivisions: usize,
}

impl<S: Real> Pending<S> {
    pub fn root(lower: S, upper: S) -> Self {
        Self {
            lower,
            upper,
            subdivisions: 0,
        }
    }

    /// Splits at the midpoint. Returns `None` once the midpoint is no
    /// longer strictly inside the interval at working precision.
    pub fn bisect(&self) -> Option<(Self, Self)> {
        let mid = (self.lower + self.upper) * S::lit(0.5);
        if mid <= self.lower || mid >= self.upper {
            return None;
        }
        let subdivisions = self.subdivisions + 1;
        Some((
            Self {
                lower: self.lower,
                upper: mid,
                subdivisions,
            },
            Self {
                lower: mid,
                upper: self.upper,
                subdivisions,
            },
        ))
    }
}

impl<V: NumericValue> Interval<V> {
    pub(crate) fn pending(&self) -> Pending<V::Scalar> {
        Pending {
            lower: self.lower,
            upper: self.upper,
            subdivisions: self.subdivisions,
        }
    }
}
