//! Adaptive Gauss-Kronrod integration.
//!
//! The integrator keeps a work list of pending intervals and a bank of
//! finished ones. Each local round evaluates every pending interval with
//! one batched integrand call; intervals that miss the local thresholds are
//! bisected and queued again, the rest are banked. Once the work list is
//! empty the banked total is checked against the global thresholds, and
//! while it fails the banked interval with the largest error is torn out,
//! bisected and sent back through the local phase.
//!
//! Both phases stop bisecting a lineage once its subdivision count passes
//! the budget of the [`AccuracyControl`]. The result then carries
//! [`ConvergenceStatus::SubdivisionLimitReached`] instead of silently
//! pretending to be accurate.
//!
//! # Example
//!
//! ```
//! use numerus_core::AccuracyControl;
//! use numerus_integrate::AdaptiveIntegrator;
//!
//! let integrator = AdaptiveIntegrator::<f64>::new();
//! let mut control = AccuracyControl::new();
//! let result = integrator
//!     .integrate(0.0, std::f64::consts::FRAC_PI_2, &f64::sin, &mut control)
//!     .unwrap();
//! assert!(result.converged());
//! assert!((result.value - 1.0).abs() < 1e-12);
//! ```

use tracing::{debug, instrument, trace, warn};

use numerus_core::{first_lower_than_second, relative_error, AccuracyControl, NumericValue, Real};

use crate::error::{IntegrateError, IntegrateResult};
use crate::integrand::Integrand;
use crate::interval::{Interval, Pending};
use crate::result::{ConvergenceStatus, FixedQuadrature, Quadrature};
use crate::rule::{GaussKronrod15, KRONROD_POINTS};

/// Configuration for [`AdaptiveIntegrator`].
#[derive(Clone, Debug)]
pub struct IntegratorConfig {
    /// Fail with [`IntegrateError::NonFiniteValue`] as soon as the
    /// integrand returns NaN or an infinity.
    pub reject_non_finite: bool,
    /// Return the banked intervals in [`Quadrature::partition`].
    pub keep_partition: bool,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            reject_non_finite: true,
            keep_partition: true,
        }
    }
}

/// Adaptive integrator built on the G7-K15 rule.
///
/// The integrator holds no per-call state; one instance can serve any
/// number of concurrent calls.
#[derive(Clone, Debug, Default)]
pub struct AdaptiveIntegrator<S: Real> {
    rule: GaussKronrod15<S>,
    config: IntegratorConfig,
}

/// Kronrod estimate and error estimate of one interval.
struct Estimate<V> {
    integral: V,
    error: V,
}

impl<S: Real> AdaptiveIntegrator<S> {
    /// Creates an integrator with the default configuration.
    pub fn new() -> Self {
        Self::with_config(IntegratorConfig::default())
    }

    /// Creates an integrator with an explicit configuration.
    pub fn with_config(config: IntegratorConfig) -> Self {
        Self {
            rule: GaussKronrod15::new(),
            config,
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &IntegratorConfig {
        &self.config
    }

    /// The quadrature rule in use.
    pub fn rule(&self) -> &GaussKronrod15<S> {
        &self.rule
    }

    /// Integrates `integrand` over `[lower, upper]` to the accuracy set in
    /// `control`.
    ///
    /// Failing to converge within the subdivision budget is reported in
    /// [`Quadrature::status`], not as an error. On return `control` holds
    /// the absolute and relative error estimates of the result and the
    /// deepest subdivision reached.
    ///
    /// # Errors
    ///
    /// - [`IntegrateError::Threshold`] if a threshold is not finite.
    /// - [`IntegrateError::InvalidInterval`] if a bound is not finite or
    ///   `lower > upper`.
    /// - [`IntegrateError::NonFiniteValue`] if the integrand returns NaN or
    ///   an infinity and the configuration rejects those.
    /// - [`IntegrateError::BatchSizeMismatch`] if a batch evaluation
    ///   returns the wrong number of values.
    #[instrument(level = "debug", skip(self, integrand, control))]
    pub fn integrate<I>(
        &self,
        lower: S,
        upper: S,
        integrand: &I,
        control: &mut AccuracyControl<I::Value>,
    ) -> IntegrateResult<Quadrature<I::Value>>
    where
        I: Integrand<S> + ?Sized,
    {
        control.validate()?;
        check_bounds(lower, upper)?;

        if lower == upper {
            control.record_error_estimate(I::Value::zero(), I::Value::zero());
            return Ok(Quadrature::empty());
        }

        let mut pending = vec![Pending::root(lower, upper)];
        let mut bank: Vec<Interval<I::Value>> = Vec::new();
        let mut total = I::Value::zero();
        let mut total_error = I::Value::zero();
        let mut points = Vec::with_capacity(KRONROD_POINTS);
        let mut evaluations = 0;
        let mut rounds = 0;
        let mut refinements = 0;
        let mut exhausted = false;

        loop {
            while !pending.is_empty() {
                let estimates = self.evaluate_round(&pending, integrand, &mut points)?;
                evaluations += points.len();
                rounds += 1;

                let mut queued = Vec::new();
                for (interval, estimate) in pending.drain(..).zip(estimates) {
                    let sufficient = control.locally_sufficient(&estimate.error, &estimate.integral);

                    if !sufficient && control.sub_divisions_below_max(interval.subdivisions) {
                        if let Some((left, right)) = interval.bisect() {
                            trace!(
                                lower = ?interval.lower,
                                upper = ?interval.upper,
                                depth = interval.subdivisions,
                                "bisecting"
                            );
                            queued.push(left);
                            queued.push(right);
                            continue;
                        }
                    }

                    if !sufficient {
                        // banked without meeting the local thresholds
                        exhausted = true;
                        debug!(
                            lower = ?interval.lower,
                            upper = ?interval.upper,
                            depth = interval.subdivisions,
                            "interval accepted unconverged"
                        );
                    }

                    total = total.plus(&estimate.integral);
                    total_error = total_error.plus(&estimate.error);
                    control.record_subdivisions(interval.subdivisions);
                    bank.push(Interval {
                        lower: interval.lower,
                        upper: interval.upper,
                        integral: estimate.integral,
                        error: estimate.error,
                        subdivisions: interval.subdivisions,
                    });
                }

                debug!(round = rounds, banked = bank.len(), queued = queued.len(), "local round");
                pending = queued;
            }

            if control.global_sufficient(&total_error, &total) {
                break;
            }

            let Some(worst) = worst_interval(&bank) else {
                break;
            };
            let candidate = bank[worst].pending();
            if !control.sub_divisions_below_max(candidate.subdivisions) {
                exhausted = true;
                break;
            }
            let Some((left, right)) = candidate.bisect() else {
                exhausted = true;
                break;
            };

            let removed = bank.remove(worst);
            total = total.minus(&removed.integral);
            total_error = total_error.minus(&removed.error);
            refinements += 1;
            debug!(
                refinement = refinements,
                lower = ?removed.lower,
                upper = ?removed.upper,
                depth = removed.subdivisions,
                "refining worst interval"
            );
            pending.push(left);
            pending.push(right);
        }

        let converged = !exhausted && control.global_sufficient(&total_error, &total);
        let status = if converged {
            ConvergenceStatus::Converged
        } else {
            warn!(
                max_subdivisions = control.max_subdivisions(),
                intervals = bank.len(),
                "subdivision limit reached before the accuracy goal"
            );
            ConvergenceStatus::SubdivisionLimitReached
        };

        let relative = relative_error(&total_error, &total);
        control.record_error_estimate(total_error.clone(), relative);

        debug!(evaluations, rounds, refinements, intervals = bank.len(), ?status, "integration finished");

        Ok(Quadrature {
            value: total,
            error_estimate: total_error,
            status,
            evaluations,
            rounds,
            refinements,
            partition: if self.config.keep_partition { bank } else { Vec::new() },
        })
    }

    /// Applies the rule once to every segment between consecutive
    /// breakpoints and sums the results, without subdivision or
    /// convergence checks.
    ///
    /// Fewer than two breakpoints give zero with zero error. Repeated
    /// breakpoints produce empty segments, which are skipped.
    ///
    /// # Errors
    ///
    /// - [`IntegrateError::UnsortedBreakpoints`] if a breakpoint is not
    ///   finite or smaller than its predecessor.
    /// - [`IntegrateError::NonFiniteValue`] and
    ///   [`IntegrateError::BatchSizeMismatch`] as for
    ///   [`Self::integrate`].
    #[instrument(level = "debug", skip(self, breakpoints, integrand), fields(count = breakpoints.len()))]
    pub fn non_adaptive_integral<I>(
        &self,
        breakpoints: &[S],
        integrand: &I,
    ) -> IntegrateResult<FixedQuadrature<I::Value>>
    where
        I: Integrand<S> + ?Sized,
    {
        check_breakpoints(breakpoints)?;

        let segments: Vec<Pending<S>> = breakpoints
            .windows(2)
            .filter(|w| w[0] < w[1])
            .map(|w| Pending::root(w[0], w[1]))
            .collect();

        if segments.is_empty() {
            return Ok(FixedQuadrature {
                integral: I::Value::zero(),
                error_estimate: I::Value::zero(),
                evaluations: 0,
            });
        }

        let mut points = Vec::with_capacity(segments.len() * KRONROD_POINTS);
        let estimates = self.evaluate_round(&segments, integrand, &mut points)?;

        let (integral, error_estimate) = estimates.into_iter().fold(
            (I::Value::zero(), I::Value::zero()),
            |(integral, error), estimate| (integral.plus(&estimate.integral), error.plus(&estimate.error)),
        );

        debug!(segments = segments.len(), evaluations = points.len(), "fixed partition evaluated");

        Ok(FixedQuadrature {
            integral,
            error_estimate,
            evaluations: points.len(),
        })
    }

    /// Evaluates all intervals with one batched integrand call.
    fn evaluate_round<I>(
        &self,
        intervals: &[Pending<S>],
        integrand: &I,
        points: &mut Vec<S>,
    ) -> IntegrateResult<Vec<Estimate<I::Value>>>
    where
        I: Integrand<S> + ?Sized,
    {
        points.clear();
        for interval in intervals {
            self.rule
                .push_scaled_points(interval.lower, interval.upper, points);
        }

        let values = integrand.evaluate_several_points(points);
        if values.len() != points.len() {
            return Err(IntegrateError::BatchSizeMismatch {
                expected: points.len(),
                actual: values.len(),
            });
        }
        if self.config.reject_non_finite {
            if let Some(i) = values.iter().position(|v| !v.all_finite()) {
                return Err(IntegrateError::NonFiniteValue {
                    argument: points[i].to_f64_lossy(),
                });
            }
        }

        intervals
            .iter()
            .zip(values.chunks_exact(KRONROD_POINTS))
            .map(|(interval, chunk)| {
                let f: &[I::Value; KRONROD_POINTS] =
                    chunk.try_into().map_err(|_| IntegrateError::BatchSizeMismatch {
                        expected: KRONROD_POINTS,
                        actual: chunk.len(),
                    })?;
                let length = integrand.distance(interval.upper, interval.lower);
                let estimate = self.rule.evaluate_rule(length, f);
                Ok(Estimate {
                    error: self.rule.error_estimate(&estimate),
                    integral: estimate.kronrod,
                })
            })
            .collect()
    }
}

/// Index of the banked interval with the largest error.
///
/// A later interval replaces the current maximum only if every one of its
/// error components is strictly larger, so ties keep the earlier interval.
fn worst_interval<V: NumericValue>(bank: &[Interval<V>]) -> Option<usize> {
    let (first, rest) = bank.split_first()?;
    let mut worst = 0;
    let mut max = &first.error;
    for (i, interval) in rest.iter().enumerate() {
        if first_lower_than_second(max, &interval.error) {
            worst = i + 1;
            max = &interval.error;
        }
    }
    Some(worst)
}

pub(crate) fn check_bounds<S: Real>(lower: S, upper: S) -> IntegrateResult<()> {
    if !lower.is_finite() || !upper.is_finite() || lower > upper {
        return Err(IntegrateError::InvalidInterval {
            lower: lower.to_f64_lossy(),
            upper: upper.to_f64_lossy(),
        });
    }
    Ok(())
}

pub(crate) fn check_breakpoints<S: Real>(breakpoints: &[S]) -> IntegrateResult<()> {
    for (index, x) in breakpoints.iter().enumerate() {
        let out_of_order = index > 0 && *x < breakpoints[index - 1];
        if !x.is_finite() || out_of_order {
            return Err(IntegrateError::UnsortedBreakpoints { index });
        }
    }
    Ok(())
}
