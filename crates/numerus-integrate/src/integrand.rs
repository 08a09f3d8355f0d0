//! Functions that can be integrated.
//!
//! Any closure `Fn(S) -> V` is an [`Integrand`]. Types that can do better
//! than one call per point, or whose argument space measures length in a
//! non-Euclidean way, implement the trait themselves and override
//! [`Integrand::evaluate_several_points`] or [`Integrand::distance`].
//!
//! # Example
//!
//! ```
//! use numerus_integrate::Integrand;
//!
//! /// Evaluates a polynomial with Horner's scheme, many points at a time.
//! struct Polynomial(Vec<f64>);
//!
//! impl Integrand<f64> for Polynomial {
//!     type Value = f64;
//!
//!     fn evaluate(&self, x: f64) -> f64 {
//!         self.0.iter().rev().fold(0.0, |acc, &c| acc * x + c)
//!     }
//!
//!     fn evaluate_several_points(&self, points: &[f64]) -> Vec<f64> {
//!         let mut acc = vec![0.0; points.len()];
//!         for &c in self.0.iter().rev() {
//!             for (a, &x) in acc.iter_mut().zip(points) {
//!                 *a = *a * x + c;
//!             }
//!         }
//!         acc
//!     }
//! }
//!
//! let p = Polynomial(vec![1.0, 0.0, 3.0]);
//! assert_eq!(p.evaluate_several_points(&[0.0, 1.0, 2.0]), vec![1.0, 4.0, 13.0]);
//! ```

use numerus_core::{NumericValue, Real};

/// A function of one real argument with a scalar or multi-component value.
pub trait Integrand<S: Real> {
    /// The value type produced at each point.
    type Value: NumericValue<Scalar = S>;

    /// Evaluates the function at `x`.
    fn evaluate(&self, x: S) -> Self::Value;

    /// Evaluates the function at every point, preserving order.
    ///
    /// The integrator hands all points of one refinement round to a single
    /// call. The default loops over [`Integrand::evaluate`].
    fn evaluate_several_points(&self, points: &[S]) -> Vec<Self::Value> {
        points.iter().map(|&x| self.evaluate(x)).collect()
    }

    /// Length of the interval between `a` and `b`.
    ///
    /// Defaults to `|a - b|`.
    fn distance(&self, a: S, b: S) -> S {
        (a - b).abs()
    }
}

impl<S, V, F> Integrand<S> for F
where
    S: Real,
    V: NumericValue<Scalar = S>,
    F: Fn(S) -> V,
{
    type Value = V;

    #[inline]
    fn evaluate(&self, x: S) -> V {
        self(x)
    }
}
