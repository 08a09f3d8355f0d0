//! Recording every evaluation an integrator makes.

use parking_lot::{Mutex, MutexGuard};

use numerus_core::Real;

use crate::integrand::Integrand;

/// Wraps an integrand and records each `(argument, value)` pair handed
/// through it, in evaluation order.
///
/// Useful for checking where an adaptive integrator spends its effort.
/// The log sits behind a mutex so the monitor can itself be wrapped in a
/// [`ParallelIntegrand`](crate::ParallelIntegrand).
#[derive(Debug)]
pub struct EvaluationMonitor<S, F: Integrand<S>>
where
    S: Real,
{
    inner: F,
    records: Mutex<Vec<(S, F::Value)>>,
}

impl<S: Real, F: Integrand<S>> EvaluationMonitor<S, F> {
    /// Starts monitoring `inner` with an empty log.
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            records: Mutex::new(Vec::new()),
        }
    }

    fn log(&self) -> MutexGuard<'_, Vec<(S, F::Value)>> {
        self.records.lock()
    }

    /// Number of evaluations recorded so far.
    pub fn evaluations(&self) -> usize {
        self.log().len()
    }

    /// Alias for [`Self::evaluations`].
    pub fn len(&self) -> usize {
        self.evaluations()
    }

    /// Returns true if nothing has been evaluated yet.
    pub fn is_empty(&self) -> bool {
        self.evaluations() == 0
    }

    /// Arguments evaluated so far, in order.
    pub fn arguments(&self) -> Vec<S> {
        self.log().iter().map(|(x, _)| *x).collect()
    }

    /// Removes and returns the log.
    pub fn take_records(&self) -> Vec<(S, F::Value)> {
        std::mem::take(&mut *self.log())
    }

    /// The wrapped integrand.
    pub fn inner(&self) -> &F {
        &self.inner
    }
}

impl<S: Real, F: Integrand<S>> Integrand<S> for EvaluationMonitor<S, F> {
    type Value = F::Value;

    fn evaluate(&self, x: S) -> Self::Value {
        let value = self.inner.evaluate(x);
        self.log().push((x, value.clone()));
        value
    }

    fn evaluate_several_points(&self, points: &[S]) -> Vec<Self::Value> {
        let values = self.inner.evaluate_several_points(points);
        self.log()
            .extend(points.iter().copied().zip(values.iter().cloned()));
        values
    }

    fn distance(&self, a: S, b: S) -> S {
        self.inner.distance(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let monitor = EvaluationMonitor::new(|x: f64| x + 1.0);
        assert!(monitor.is_empty());
        monitor.evaluate(1.0);
        monitor.evaluate_several_points(&[2.0, 3.0]);
        assert_eq!(monitor.len(), 3);
        assert_eq!(monitor.arguments(), vec![1.0, 2.0, 3.0]);
        assert_eq!(monitor.take_records(), vec![(1.0, 2.0), (2.0, 3.0), (3.0, 4.0)]);
        assert_eq!(monitor.evaluations(), 0);
    }

    #[test]
    fn test_forwards_batch_override() {
        struct Doubler;
        impl Integrand<f64> for Doubler {
            type Value = f64;
            fn evaluate(&self, x: f64) -> f64 {
                2.0 * x
            }
            fn evaluate_several_points(&self, points: &[f64]) -> Vec<f64> {
                // deliberately different from `evaluate` to observe dispatch
                points.iter().map(|x| -x).collect()
            }
            fn distance(&self, _a: f64, _b: f64) -> f64 {
                7.0
            }
        }

        let monitor = EvaluationMonitor::new(Doubler);
        assert_eq!(monitor.evaluate_several_points(&[1.0]), vec![-1.0]);
        assert_eq!(monitor.take_records(), vec![(1.0, -1.0)]);
        assert_eq!(monitor.distance(0.0, 1.0), 7.0);
    }
}
