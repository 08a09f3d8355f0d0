//! Values produced by integrands.
//!
//! A [`NumericValue`] is either a plain scalar or an ordered collection of
//! scalar components. All arithmetic the quadrature engine performs on a
//! value (addition, scaling by a weight, comparisons) goes through this
//! trait and is applied component by component.
//!
//! # Implementations
//!
//! | Type | Components |
//! |------|------------|
//! | `f32`, `f64` | the value itself |
//! | `Complex<S>` | real part, imaginary part |
//! | `[S; N]` | the `N` entries |
//! | `Vec<S>`, `SmallVec<[S; N]>` | the entries, zero-padded |
//!
//! Variable-length sequences behave as if they were padded with zeros to
//! the length of the other operand. The empty sequence is therefore the
//! additive identity, which lets the engine start its running totals
//! before the first evaluation tells it how many components there are.

use std::fmt::Debug;

use num_complex::Complex;
use num_traits::{Float, Zero};
use smallvec::SmallVec;

use crate::real::Real;

/// A scalar or multi-component value with element-wise arithmetic.
pub trait NumericValue: Clone + Debug + Send + Sync {
    /// The scalar type of every component.
    type Scalar: Real;

    /// The additive identity.
    fn zero() -> Self;

    /// The default convergence threshold for this value type.
    ///
    /// Variable-length sequences have no meaningful default and return the
    /// empty sequence, which disables every check using it.
    fn accuracy_goal() -> Self;

    /// Number of stored components.
    fn num_components(&self) -> usize;

    /// Reads component `index`, or zero past the end.
    fn component(&self, index: usize) -> Self::Scalar;

    /// Applies `f` to every component.
    #[must_use]
    fn map_components<F>(&self, f: F) -> Self
    where
        F: FnMut(Self::Scalar) -> Self::Scalar;

    /// Combines two values component by component.
    #[must_use]
    fn zip_components<F>(&self, other: &Self, f: F) -> Self
    where
        F: FnMut(Self::Scalar, Self::Scalar) -> Self::Scalar;

    /// Returns true if `pred` holds for every pair of components.
    fn all_components<F>(&self, other: &Self, mut pred: F) -> bool
    where
        F: FnMut(Self::Scalar, Self::Scalar) -> bool,
    {
        let n = self.num_components().max(other.num_components());
        (0..n).all(|i| pred(self.component(i), other.component(i)))
    }

    /// Returns true if `pred` holds for at least one component.
    fn any_component<F>(&self, mut pred: F) -> bool
    where
        F: FnMut(Self::Scalar) -> bool,
    {
        (0..self.num_components()).any(|i| pred(self.component(i)))
    }

    /// Component-wise sum.
    #[must_use]
    fn plus(&self, other: &Self) -> Self {
        self.zip_components(other, |a, b| a + b)
    }

    /// Component-wise difference.
    #[must_use]
    fn minus(&self, other: &Self) -> Self {
        self.zip_components(other, |a, b| a - b)
    }

    /// Multiplies every component by `factor`.
    #[must_use]
    fn scaled(&self, factor: Self::Scalar) -> Self {
        self.map_components(|a| a * factor)
    }

    /// Returns true if every component is exactly zero.
    fn all_zero(&self) -> bool {
        !self.any_component(|c| !Zero::is_zero(&c))
    }

    /// Returns true if every component is finite.
    fn all_finite(&self) -> bool {
        !self.any_component(|c| !Float::is_finite(c))
    }
}

macro_rules! impl_scalar_value {
    ($($t:ty),*) => {
        $(
            impl NumericValue for $t {
                type Scalar = $t;

                #[inline]
                fn zero() -> Self {
                    0.0
                }

                #[inline]
                fn accuracy_goal() -> Self {
                    <$t as Real>::accuracy_goal()
                }

                #[inline]
                fn num_components(&self) -> usize {
                    1
                }

                #[inline]
                fn component(&self, index: usize) -> $t {
                    if index == 0 { *self } else { 0.0 }
                }

                #[inline]
                fn map_components<F>(&self, mut f: F) -> Self
                where
                    F: FnMut($t) -> $t,
                {
                    f(*self)
                }

                #[inline]
                fn zip_components<F>(&self, other: &Self, mut f: F) -> Self
                where
                    F: FnMut($t, $t) -> $t,
                {
                    f(*self, *other)
                }
            }
        )*
    };
}

impl_scalar_value!(f32, f64);

impl<S: Real> NumericValue for Complex<S> {
    type Scalar = S;

    fn zero() -> Self {
        Complex::new(S::zero(), S::zero())
    }

    fn accuracy_goal() -> Self {
        Complex::new(S::accuracy_goal(), S::accuracy_goal())
    }

    fn num_components(&self) -> usize {
        2
    }

    fn component(&self, index: usize) -> S {
        match index {
            0 => self.re,
            1 => self.im,
            _ => S::zero(),
        }
    }

    fn map_components<F>(&self, mut f: F) -> Self
    where
        F: FnMut(S) -> S,
    {
        Complex::new(f(self.re), f(self.im))
    }

    fn zip_components<F>(&self, other: &Self, mut f: F) -> Self
    where
        F: FnMut(S, S) -> S,
    {
        Complex::new(f(self.re, other.re), f(self.im, other.im))
    }
}

impl<S: Real, const N: usize> NumericValue for [S; N] {
    type Scalar = S;

    fn zero() -> Self {
        [S::zero(); N]
    }

    fn accuracy_goal() -> Self {
        [S::accuracy_goal(); N]
    }

    fn num_components(&self) -> usize {
        N
    }

    fn component(&self, index: usize) -> S {
        self.get(index).copied().unwrap_or_else(S::zero)
    }

    fn map_components<F>(&self, mut f: F) -> Self
    where
        F: FnMut(S) -> S,
    {
        std::array::from_fn(|i| f(self[i]))
    }

    fn zip_components<F>(&self, other: &Self, mut f: F) -> Self
    where
        F: FnMut(S, S) -> S,
    {
        std::array::from_fn(|i| f(self[i], other[i]))
    }
}

/// Zips two slices, padding the shorter one with zeros.
fn zip_padded<S, F, C>(a: &[S], b: &[S], mut f: F) -> C
where
    S: Real,
    F: FnMut(S, S) -> S,
    C: FromIterator<S>,
{
    let n = a.len().max(b.len());
    (0..n)
        .map(|i| {
            let x = a.get(i).copied().unwrap_or_else(S::zero);
            let y = b.get(i).copied().unwrap_or_else(S::zero);
            f(x, y)
        })
        .collect()
}

impl<S: Real> NumericValue for Vec<S> {
    type Scalar = S;

    fn zero() -> Self {
        Vec::new()
    }

    fn accuracy_goal() -> Self {
        Vec::new()
    }

    fn num_components(&self) -> usize {
        self.len()
    }

    fn component(&self, index: usize) -> S {
        self.get(index).copied().unwrap_or_else(S::zero)
    }

    fn map_components<F>(&self, f: F) -> Self
    where
        F: FnMut(S) -> S,
    {
        self.iter().copied().map(f).collect()
    }

    fn zip_components<F>(&self, other: &Self, f: F) -> Self
    where
        F: FnMut(S, S) -> S,
    {
        zip_padded(self, other, f)
    }
}

impl<S: Real, const N: usize> NumericValue for SmallVec<[S; N]> {
    type Scalar = S;

    fn zero() -> Self {
        SmallVec::new()
    }

    fn accuracy_goal() -> Self {
        SmallVec::new()
    }

    fn num_components(&self) -> usize {
        self.len()
    }

    fn component(&self, index: usize) -> S {
        self.get(index).copied().unwrap_or_else(S::zero)
    }

    fn map_components<F>(&self, f: F) -> Self
    where
        F: FnMut(S) -> S,
    {
        self.iter().copied().map(f).collect()
    }

    fn zip_components<F>(&self, other: &Self, f: F) -> Self
    where
        F: FnMut(S, S) -> S,
    {
        zip_padded(self, other, f)
    }
}
