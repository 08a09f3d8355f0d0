//! Parallel batch evaluation.
//!
//! This module provides an integrand wrapper that spreads each batch of
//! points over rayon's work-stealing pool. Values come back in point order,
//! so the integrator's summation order and therefore its results are the
//! same as for sequential evaluation.

use rayon::prelude::*;

use numerus_core::Real;

use crate::integrand::Integrand;

/// Configuration for parallel evaluation.
#[derive(Clone, Debug)]
pub struct ParallelConfig {
    /// Minimum batch size to enable parallelism. Also the size of the
    /// chunks handed to each task.
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 64,
        }
    }
}

/// Evaluates batches of points in parallel.
///
/// Large batches are split into chunks and each chunk goes through the
/// inner integrand's own [`Integrand::evaluate_several_points`], so a
/// batch override on the wrapped integrand is still used.
///
/// The wrapped function must be `Sync` since it is called from several
/// threads at once.
#[derive(Clone, Debug)]
pub struct ParallelIntegrand<F> {
    inner: F,
    config: ParallelConfig,
}

impl<F> ParallelIntegrand<F> {
    /// Wraps `inner` with the default configuration.
    pub fn new(inner: F) -> Self {
        Self::with_config(inner, ParallelConfig::default())
    }

    /// Wraps `inner` with an explicit configuration.
    pub fn with_config(inner: F, config: ParallelConfig) -> Self {
        Self { inner, config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &ParallelConfig {
        &self.config
    }

    /// Unwraps the inner integrand.
    pub fn into_inner(self) -> F {
        self.inner
    }
}

impl<S, F> Integrand<S> for ParallelIntegrand<F>
where
    S: Real,
    F: Integrand<S> + Sync,
    F::Value: Send,
{
    type Value = F::Value;

    fn evaluate(&self, x: S) -> Self::Value {
        self.inner.evaluate(x)
    }

    fn evaluate_several_points(&self, points: &[S]) -> Vec<Self::Value> {
        if points.len() < self.config.parallel_threshold {
            // Fall back to sequential for small batches
            return self.inner.evaluate_several_points(points);
        }
        let chunks: Vec<Vec<Self::Value>> = points
            .par_chunks(self.config.parallel_threshold.max(1))
            .map(|chunk| self.inner.evaluate_several_points(chunk))
            .collect();
        chunks.into_iter().flatten().collect()
    }

    fn distance(&self, a: S, b: S) -> S {
        self.inner.distance(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_preserves_order() {
        let f = ParallelIntegrand::with_config(
            |x: f64| x * 2.0,
            ParallelConfig {
                parallel_threshold: 1,
            },
        );
        let points: Vec<f64> = (0..500).map(f64::from).collect();
        let values = f.evaluate_several_points(&points);
        let expected: Vec<f64> = points.iter().map(|x| x * 2.0).collect();
        assert_eq!(values, expected);
    }

    #[test]
    fn test_inner_batch_method_is_used() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        #[derive(Default)]
        struct Counting {
            singles: AtomicUsize,
            batches: AtomicUsize,
        }

        impl Integrand<f64> for Counting {
            type Value = f64;
            fn evaluate(&self, x: f64) -> f64 {
                self.singles.fetch_add(1, Ordering::Relaxed);
                x
            }
            fn evaluate_several_points(&self, points: &[f64]) -> Vec<f64> {
                self.batches.fetch_add(1, Ordering::Relaxed);
                points.iter().map(|x| 10.0 * x).collect()
            }
        }

        let f = ParallelIntegrand::with_config(
            Counting::default(),
            ParallelConfig {
                parallel_threshold: 2,
            },
        );
        let values = f.evaluate_several_points(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(values, vec![10.0, 20.0, 30.0, 40.0, 50.0]);

        let inner = f.into_inner();
        assert_eq!(inner.singles.load(Ordering::Relaxed), 0);
        assert_eq!(inner.batches.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn test_small_batches_stay_sequential() {
        let f = ParallelIntegrand::new(|x: f64| [x, x * x]);
        assert_eq!(f.config().parallel_threshold, 64);
        assert_eq!(f.evaluate_several_points(&[2.0]), vec![[2.0, 4.0]]);
        assert_eq!(f.distance(1.0, -1.0), 2.0);
    }
}
