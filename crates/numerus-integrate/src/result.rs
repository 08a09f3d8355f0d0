//! Results returned by the integrators.

use numerus_core::NumericValue;

use crate::interval::Interval;

/// How an adaptive integration ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConvergenceStatus {
    /// Every banked interval met the local thresholds and the total met
    /// the global thresholds.
    Converged,
    /// The subdivision budget ran out first. The result is the best
    /// estimate available at that point.
    SubdivisionLimitReached,
}

impl ConvergenceStatus {
    /// Returns true for [`ConvergenceStatus::Converged`].
    pub fn is_converged(self) -> bool {
        self == Self::Converged
    }
}

/// Result of [`AdaptiveIntegrator::integrate`](crate::AdaptiveIntegrator::integrate).
#[derive(Clone, Debug, PartialEq)]
pub struct Quadrature<V: NumericValue> {
    /// Approximation of the definite integral.
    pub value: V,
    /// Sum of the error estimates of all banked intervals.
    pub error_estimate: V,
    /// Whether the accuracy goals were met.
    pub status: ConvergenceStatus,
    /// Number of integrand evaluations.
    pub evaluations: usize,
    /// Number of local-phase rounds, i.e. batched evaluation calls.
    pub rounds: usize,
    /// Number of worst-interval bisections in the global phase.
    pub refinements: usize,
    /// The banked intervals in bank order. Empty when
    /// [`IntegratorConfig::keep_partition`](crate::IntegratorConfig::keep_partition)
    /// is off.
    pub partition: Vec<Interval<V>>,
}

impl<V: NumericValue> Quadrature<V> {
    /// The result for an empty range.
    pub(crate) fn empty() -> Self {
        Self {
            value: V::zero(),
            error_estimate: V::zero(),
            status: ConvergenceStatus::Converged,
            evaluations: 0,
            rounds: 0,
            refinements: 0,
            partition: Vec::new(),
        }
    }

    /// Returns true if the accuracy goals were met.
    pub fn converged(&self) -> bool {
        self.status.is_converged()
    }

    /// Deepest subdivision count in the partition.
    pub fn max_depth(&self) -> usize {
        self.partition
            .iter()
            .map(|interval| interval.subdivisions)
            .max()
            .unwrap_or(0)
    }
}

/// Result of [`AdaptiveIntegrator::non_adaptive_integral`](crate::AdaptiveIntegrator::non_adaptive_integral).
#[derive(Clone, Debug, PartialEq)]
pub struct FixedQuadrature<V> {
    /// Sum of the Kronrod estimates over all segments.
    pub integral: V,
    /// Sum of the error estimates over all segments.
    pub error_estimate: V,
    /// Number of integrand evaluations.
    pub evaluations: usize,
}
