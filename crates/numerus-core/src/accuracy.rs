//! Convergence control for adaptive algorithms.
//!
//! An [`AccuracyControl`] decides whether an error estimate is small
//! enough, both for an individual piece of work ("local") and for the
//! accumulated result ("global"). Each side has a relative and an absolute
//! threshold:
//!
//! - relative: `|error_i| <= |reference_i * relative_i|`
//! - absolute: `|error_i| <= |absolute_i|`
//!
//! Both must hold for every component. A threshold whose components are
//! all zero is inactive and always passes. When a reference component is
//! exactly zero the relative test is skipped for that component only; the
//! absolute test still applies.
//!
//! # Example
//!
//! ```
//! use numerus_core::AccuracyControl;
//!
//! let mut control = AccuracyControl::<f64>::new();
//! control
//!     .set_local_error_threshold(1e-10, 1e-10)
//!     .set_global_error_threshold(1e-8, 0.0)
//!     .set_max_subdivisions(50);
//!
//! assert!(control.locally_sufficient(&1e-11, &1.0));
//! assert!(!control.locally_sufficient(&1e-9, &1.0));
//! // absolute global check disabled by the zero threshold
//! assert!(control.global_sufficient(&1e-9, &1.0));
//! assert!(control.sub_divisions_below_max(50));
//! assert!(!control.sub_divisions_below_max(51));
//! ```

use num_traits::{Float, Zero};

use crate::compare::abs_leq;
use crate::error::{ThresholdError, ThresholdKind};
use crate::value::NumericValue;

/// Default cap on the number of bisections along one interval lineage.
pub const DEFAULT_MAX_SUBDIVISIONS: usize = 1000;

/// Relative and absolute thresholds for local and global convergence.
///
/// The `check_*` flags are derived whenever a threshold is set: a
/// threshold is active if any of its components is non-zero.
#[derive(Clone, Debug, PartialEq)]
pub struct AccuracyThresholds<V: NumericValue> {
    local_relative: V,
    local_absolute: V,
    global_relative: V,
    global_absolute: V,
    check_local_relative: bool,
    check_local_absolute: bool,
    check_global_relative: bool,
    check_global_absolute: bool,
}

fn is_active<V: NumericValue>(threshold: &V) -> bool {
    !threshold.all_zero()
}

impl<V: NumericValue> AccuracyThresholds<V> {
    /// Creates thresholds from explicit values.
    pub fn new(local_relative: V, local_absolute: V, global_relative: V, global_absolute: V) -> Self {
        Self {
            check_local_relative: is_active(&local_relative),
            check_local_absolute: is_active(&local_absolute),
            check_global_relative: is_active(&global_relative),
            check_global_absolute: is_active(&global_absolute),
            local_relative,
            local_absolute,
            global_relative,
            global_absolute,
        }
    }

    /// Uses `goal` for all four thresholds.
    pub fn uniform(goal: V) -> Self {
        Self::new(goal.clone(), goal.clone(), goal.clone(), goal)
    }

    /// Replaces the local thresholds and recomputes their flags.
    pub fn set_local(&mut self, relative: V, absolute: V) {
        self.check_local_relative = is_active(&relative);
        self.check_local_absolute = is_active(&absolute);
        self.local_relative = relative;
        self.local_absolute = absolute;
    }

    /// Replaces the global thresholds and recomputes their flags.
    pub fn set_global(&mut self, relative: V, absolute: V) {
        self.check_global_relative = is_active(&relative);
        self.check_global_absolute = is_active(&absolute);
        self.global_relative = relative;
        self.global_absolute = absolute;
    }

    /// The local relative threshold.
    pub fn local_relative(&self) -> &V {
        &self.local_relative
    }

    /// The local absolute threshold.
    pub fn local_absolute(&self) -> &V {
        &self.local_absolute
    }

    /// The global relative threshold.
    pub fn global_relative(&self) -> &V {
        &self.global_relative
    }

    /// The global absolute threshold.
    pub fn global_absolute(&self) -> &V {
        &self.global_absolute
    }

    /// Returns whether the given threshold takes part in convergence checks.
    pub fn is_active(&self, which: ThresholdKind) -> bool {
        match which {
            ThresholdKind::LocalRelative => self.check_local_relative,
            ThresholdKind::LocalAbsolute => self.check_local_absolute,
            ThresholdKind::GlobalRelative => self.check_global_relative,
            ThresholdKind::GlobalAbsolute => self.check_global_absolute,
        }
    }

    /// Checks that every threshold component is finite.
    pub fn validate(&self) -> Result<(), ThresholdError> {
        let all = [
            (ThresholdKind::LocalRelative, &self.local_relative),
            (ThresholdKind::LocalAbsolute, &self.local_absolute),
            (ThresholdKind::GlobalRelative, &self.global_relative),
            (ThresholdKind::GlobalAbsolute, &self.global_absolute),
        ];
        for (which, threshold) in all {
            if !threshold.all_finite() {
                return Err(ThresholdError::NonFinite { which });
            }
        }
        Ok(())
    }

    fn local_sufficient(&self, error: &V, reference: &V) -> bool {
        within(
            error,
            reference,
            (self.check_local_relative, &self.local_relative),
            (self.check_local_absolute, &self.local_absolute),
        )
    }

    fn global_sufficient(&self, error: &V, reference: &V) -> bool {
        within(
            error,
            reference,
            (self.check_global_relative, &self.global_relative),
            (self.check_global_absolute, &self.global_absolute),
        )
    }
}

fn within<V: NumericValue>(
    error: &V,
    reference: &V,
    (check_relative, relative): (bool, &V),
    (check_absolute, absolute): (bool, &V),
) -> bool {
    let relative_ok = !check_relative || {
        let n = error
            .num_components()
            .max(reference.num_components())
            .max(relative.num_components());
        (0..n).all(|i| {
            let r = reference.component(i);
            Zero::is_zero(&r) || error.component(i).abs() <= (r * relative.component(i)).abs()
        })
    };
    relative_ok && (!check_absolute || abs_leq(error, absolute))
}

/// Convergence checker shared between a caller and an adaptive algorithm.
///
/// The caller owns the control and configures it through the setters; the
/// algorithm queries it and reports its final estimates back through
/// [`AccuracyControl::record_error_estimate`] and
/// [`AccuracyControl::record_subdivisions`].
#[derive(Clone, Debug)]
pub struct AccuracyControl<V: NumericValue> {
    thresholds: AccuracyThresholds<V>,
    max_subdivisions: usize,
    subdivisions: usize,
    abs_error_estimate: V,
    rel_error_estimate: V,
}

impl<V: NumericValue> Default for AccuracyControl<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: NumericValue> AccuracyControl<V> {
    /// Creates a control with every threshold at the value type's
    /// accuracy goal and a subdivision cap of
    /// [`DEFAULT_MAX_SUBDIVISIONS`].
    pub fn new() -> Self {
        Self::with_thresholds(AccuracyThresholds::uniform(V::accuracy_goal()))
    }

    /// Creates a control from explicit thresholds.
    pub fn with_thresholds(thresholds: AccuracyThresholds<V>) -> Self {
        Self {
            thresholds,
            max_subdivisions: DEFAULT_MAX_SUBDIVISIONS,
            subdivisions: 0,
            abs_error_estimate: V::zero(),
            rel_error_estimate: V::zero(),
        }
    }

    /// Sets the relative and absolute local thresholds.
    ///
    /// A `Vec` or `SmallVec` threshold shorter than the values it checks is
    /// padded with zeros. Once that threshold is active, every component
    /// past its end must have an error of exactly zero, so give one entry
    /// per component.
    pub fn set_local_error_threshold(&mut self, relative: V, absolute: V) -> &mut Self {
        self.thresholds.set_local(relative, absolute);
        self
    }

    /// Sets the relative and absolute global thresholds.
    ///
    /// Short sequence thresholds are zero-padded as in
    /// [`Self::set_local_error_threshold`].
    pub fn set_global_error_threshold(&mut self, relative: V, absolute: V) -> &mut Self {
        self.thresholds.set_global(relative, absolute);
        self
    }

    /// Sets the maximum number of bisections along one lineage.
    pub fn set_max_subdivisions(&mut self, n: usize) -> &mut Self {
        self.max_subdivisions = n;
        self
    }

    /// Builder form of [`Self::set_local_error_threshold`].
    #[must_use]
    pub fn with_local_error_threshold(mut self, relative: V, absolute: V) -> Self {
        self.set_local_error_threshold(relative, absolute);
        self
    }

    /// Builder form of [`Self::set_global_error_threshold`].
    #[must_use]
    pub fn with_global_error_threshold(mut self, relative: V, absolute: V) -> Self {
        self.set_global_error_threshold(relative, absolute);
        self
    }

    /// Builder form of [`Self::set_max_subdivisions`].
    #[must_use]
    pub fn with_max_subdivisions(mut self, n: usize) -> Self {
        self.set_max_subdivisions(n);
        self
    }

    /// The configured thresholds.
    pub fn thresholds(&self) -> &AccuracyThresholds<V> {
        &self.thresholds
    }

    /// The maximum number of bisections along one lineage.
    pub fn max_subdivisions(&self) -> usize {
        self.max_subdivisions
    }

    /// Checks the configuration before an algorithm relies on it.
    pub fn validate(&self) -> Result<(), ThresholdError> {
        self.thresholds.validate()
    }

    /// Returns true if a local error estimate meets the local thresholds
    /// relative to `reference`.
    pub fn locally_sufficient(&self, error: &V, reference: &V) -> bool {
        self.thresholds.local_sufficient(error, reference)
    }

    /// Returns true if a global error estimate meets the global thresholds
    /// relative to `reference`.
    pub fn global_sufficient(&self, error: &V, reference: &V) -> bool {
        self.thresholds.global_sufficient(error, reference)
    }

    /// Returns true if `count <= max_subdivisions`.
    pub fn sub_divisions_below_max(&self, count: usize) -> bool {
        count <= self.max_subdivisions
    }

    /// Stores the error estimates of the last completed run.
    pub fn record_error_estimate(&mut self, absolute: V, relative: V) {
        self.abs_error_estimate = absolute;
        self.rel_error_estimate = relative;
    }

    /// The absolute error estimate of the last completed run.
    pub fn abs_error_estimate(&self) -> &V {
        &self.abs_error_estimate
    }

    /// The relative error estimate of the last completed run.
    pub fn rel_error_estimate(&self) -> &V {
        &self.rel_error_estimate
    }

    /// Records a subdivision depth, keeping the largest seen.
    pub fn record_subdivisions(&mut self, n: usize) {
        self.subdivisions = self.subdivisions.max(n);
    }

    /// The deepest subdivision recorded so far.
    pub fn subdivisions(&self) -> usize {
        self.subdivisions
    }
}

/// Component-wise `|error / reference|`.
///
/// A zero reference component gives zero if the error component is zero
/// and infinity otherwise.
pub fn relative_error<V: NumericValue>(error: &V, reference: &V) -> V {
    error.zip_components(reference, |e, r| {
        if Zero::is_zero(&r) {
            if Zero::is_zero(&e) {
                e
            } else {
                Float::infinity()
            }
        } else {
            (e / r).abs()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;

    #[test]
    fn test_default_uses_accuracy_goal() {
        let control = AccuracyControl::<f64>::new();
        assert_eq!(*control.thresholds().local_relative(), 1e-12);
        assert_eq!(*control.thresholds().global_absolute(), 1e-12);
        assert_eq!(control.max_subdivisions(), DEFAULT_MAX_SUBDIVISIONS);

        let control = AccuracyControl::<f32>::default();
        assert_eq!(*control.thresholds().local_absolute(), 1e-5);
    }

    #[test]
    fn test_zero_threshold_disables_check() {
        let mut control = AccuracyControl::<f64>::new();
        control.set_local_error_threshold(0.0, 1e-6);
        assert!(!control.thresholds().is_active(ThresholdKind::LocalRelative));
        assert!(control.thresholds().is_active(ThresholdKind::LocalAbsolute));
        // only the absolute check remains
        assert!(control.locally_sufficient(&1e-7, &1e-20));

        control.set_local_error_threshold(0.0, 0.0);
        assert!(control.locally_sufficient(&1e10, &1.0));
    }

    #[test]
    fn test_equality_counts_as_converged() {
        let control = AccuracyControl::<f64>::new().with_local_error_threshold(0.0, 1e-8);
        assert!(control.locally_sufficient(&1e-8, &3.0));
        assert!(control.locally_sufficient(&-1e-8, &3.0));
    }

    #[test]
    fn test_relative_check_scales_with_reference() {
        let control = AccuracyControl::<f64>::new().with_global_error_threshold(1e-3, 0.0);
        assert!(control.global_sufficient(&0.5, &1000.0));
        assert!(control.global_sufficient(&0.5, &-1000.0));
        assert!(!control.global_sufficient(&2.0, &1000.0));
    }

    #[test]
    fn test_zero_reference_skips_relative_check() {
        let control = AccuracyControl::<f64>::new().with_local_error_threshold(1e-12, 1e-3);
        assert!(control.locally_sufficient(&1e-4, &0.0));
        assert!(!control.locally_sufficient(&1e-2, &0.0));
    }

    #[test]
    fn test_short_threshold_is_zero_padded() {
        let control = AccuracyControl::<Vec<f64>>::new().with_local_error_threshold(vec![], vec![1e-6]);
        assert!(control.locally_sufficient(&vec![1e-7, 0.0], &vec![1.0, 1.0]));
        // the second component is held to an absolute error of zero
        assert!(!control.locally_sufficient(&vec![1e-7, 1e-9], &vec![1.0, 1.0]));

        let control = AccuracyControl::<Vec<f64>>::new().with_local_error_threshold(vec![], vec![1e-6, 1e-6]);
        assert!(control.locally_sufficient(&vec![1e-7, 1e-9], &vec![1.0, 1.0]));
    }

    #[test]
    fn test_every_component_must_converge() {
        let control = AccuracyControl::<[f64; 2]>::new()
            .with_local_error_threshold([0.0, 0.0], [1e-6, 1e-6]);
        assert!(control.locally_sufficient(&[1e-7, 1e-6], &[1.0, 1.0]));
        assert!(!control.locally_sufficient(&[1e-7, 1e-5], &[1.0, 1.0]));
    }

    #[test]
    fn test_partially_zero_threshold_stays_active() {
        let control = AccuracyControl::<[f64; 2]>::new()
            .with_local_error_threshold([0.0, 0.0], [1e-6, 0.0]);
        assert!(control.thresholds().is_active(ThresholdKind::LocalAbsolute));
        assert!(!control.locally_sufficient(&[0.0, 1e-9], &[1.0, 1.0]));
        assert!(control.locally_sufficient(&[1e-9, 0.0], &[1.0, 1.0]));
    }

    #[test]
    fn test_complex_parts_checked_independently() {
        let goal = Complex::new(1e-6, 1e-6);
        let control = AccuracyControl::<Complex<f64>>::new()
            .with_local_error_threshold(Complex::new(0.0, 0.0), goal);
        assert!(control.locally_sufficient(&Complex::new(1e-7, 9e-7), &Complex::new(1.0, 1.0)));
        assert!(!control.locally_sufficient(&Complex::new(1e-7, 2e-6), &Complex::new(1.0, 1.0)));
    }

    #[test]
    fn test_vec_without_thresholds_is_inactive() {
        let control = AccuracyControl::<Vec<f64>>::new();
        assert!(control.locally_sufficient(&vec![1.0, 2.0], &vec![0.0, 0.0]));
    }

    #[test]
    fn test_validate_rejects_nan() {
        let mut control = AccuracyControl::<f64>::new();
        assert!(control.validate().is_ok());
        control.set_global_error_threshold(f64::NAN, 1e-8);
        assert_eq!(
            control.validate(),
            Err(ThresholdError::NonFinite {
                which: ThresholdKind::GlobalRelative
            })
        );
    }

    #[test]
    fn test_record_subdivisions_keeps_maximum() {
        let mut control = AccuracyControl::<f64>::new();
        control.record_subdivisions(4);
        control.record_subdivisions(2);
        assert_eq!(control.subdivisions(), 4);
    }

    #[test]
    fn test_relative_error() {
        assert_eq!(relative_error(&1e-3_f64, &-2.0), 5e-4);
        assert_eq!(relative_error(&0.0_f64, &0.0), 0.0);
        assert!(relative_error(&1.0_f64, &0.0).is_infinite());
    }
}
