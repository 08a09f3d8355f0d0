//! Convenience entry points.
//!
//! These build an [`AdaptiveIntegrator`] and an [`AccuracyControl`] for
//! the common cases so callers do not have to.

use tracing::{debug, instrument};

use numerus_core::{relative_error, AccuracyControl, NumericValue, Real, DEFAULT_MAX_SUBDIVISIONS};

use crate::adaptive::{check_breakpoints, AdaptiveIntegrator};
use crate::error::IntegrateResult;
use crate::integrand::Integrand;
use crate::result::{ConvergenceStatus, Quadrature};

/// Integrates `f` over `[a, b]` with `tolerance` as every threshold.
///
/// # Example
///
/// ```
/// use numerus_integrate::quad;
///
/// let result = quad(&|x: f64| x * x, 0.0, 3.0, 1e-10).unwrap();
/// assert!((result.value - 9.0).abs() < 1e-10);
/// ```
///
/// # Errors
///
/// See [`AdaptiveIntegrator::integrate`].
pub fn quad<F: Fn(f64) -> f64>(f: &F, a: f64, b: f64, tolerance: f64) -> IntegrateResult<Quadrature<f64>> {
    quad_with_params(f, a, b, tolerance, tolerance, DEFAULT_MAX_SUBDIVISIONS)
}

/// Integrates `f` over `[a, b]` with separate absolute and relative
/// tolerances, applied both locally and globally.
///
/// # Errors
///
/// See [`AdaptiveIntegrator::integrate`].
pub fn quad_with_params<F: Fn(f64) -> f64>(
    f: &F,
    a: f64,
    b: f64,
    abs_tol: f64,
    rel_tol: f64,
    max_subdivisions: usize,
) -> IntegrateResult<Quadrature<f64>> {
    let mut control = AccuracyControl::new()
        .with_local_error_threshold(rel_tol, abs_tol)
        .with_global_error_threshold(rel_tol, abs_tol)
        .with_max_subdivisions(max_subdivisions);
    AdaptiveIntegrator::new().integrate(a, b, f, &mut control)
}

/// Integrates adaptively over each segment between consecutive
/// breakpoints and sums the results in segment order.
///
/// Useful when the integrand has kinks or jumps at known points. Every
/// segment is integrated with the thresholds of `control`; the result is
/// converged only if every segment converged. The partitions of all
/// segments are concatenated.
///
/// # Errors
///
/// [`IntegrateError::UnsortedBreakpoints`](crate::IntegrateError::UnsortedBreakpoints)
/// for bad breakpoints, otherwise as [`AdaptiveIntegrator::integrate`].
#[instrument(level = "debug", skip(f, points, control), fields(segments = points.len().saturating_sub(1)))]
pub fn quad_with_breakpoints<S, I>(
    f: &I,
    points: &[S],
    control: &mut AccuracyControl<I::Value>,
) -> IntegrateResult<Quadrature<I::Value>>
where
    S: Real,
    I: Integrand<S> + ?Sized,
{
    check_breakpoints(points)?;
    let integrator = AdaptiveIntegrator::new();

    let mut combined: Quadrature<I::Value> = Quadrature::empty();
    for segment in points.windows(2).filter(|w| w[0] < w[1]) {
        let part = integrator.integrate(segment[0], segment[1], f, control)?;
        debug!(lower = ?segment[0], upper = ?segment[1], status = ?part.status, "segment done");

        combined.value = combined.value.plus(&part.value);
        combined.error_estimate = combined.error_estimate.plus(&part.error_estimate);
        combined.evaluations += part.evaluations;
        combined.rounds += part.rounds;
        combined.refinements += part.refinements;
        if !part.converged() {
            combined.status = ConvergenceStatus::SubdivisionLimitReached;
        }
        combined.partition.extend(part.partition);
    }

    let relative = relative_error(&combined.error_estimate, &combined.value);
    control.record_error_estimate(combined.error_estimate.clone(), relative);
    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_polynomial() {
        let result = quad(&|x: f64| 3.0 * x * x, 0.0, 2.0, 1e-12).unwrap();
        assert!(result.converged());
        assert!((result.value - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_quad_with_params_honours_budget() {
        let peak = |x: f64| 1e-4 / (x * x + 1e-8);
        let result = quad_with_params(&peak, -1.0, 1.0, 1e-12, 1e-12, 2).unwrap();
        assert_eq!(result.status, ConvergenceStatus::SubdivisionLimitReached);
        assert!(result.max_depth() <= 3);
    }

    #[test]
    fn test_breakpoints_across_a_kink() {
        let f = |x: f64| (x - 1.0).abs();
        let mut control = AccuracyControl::new();
        let result = quad_with_breakpoints(&f, &[0.0, 1.0, 3.0], &mut control).unwrap();
        assert!(result.converged());
        // linear on both sides of the kink
        assert_eq!(result.rounds, 2);
        assert!((result.value - 2.5).abs() < 1e-12);
        assert_eq!(control.abs_error_estimate(), &result.error_estimate);
    }

    #[test]
    fn test_breakpoints_degenerate() {
        let mut control = AccuracyControl::<f64>::new();
        let f = |x: f64| x;
        let result = quad_with_breakpoints(&f, &[1.0], &mut control).unwrap();
        assert_eq!(result.value, 0.0);
        assert_eq!(result.evaluations, 0);
        assert!(quad_with_breakpoints(&f, &[1.0, 0.0], &mut control).is_err());
    }
}
