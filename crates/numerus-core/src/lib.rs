//! # numerus-core
//!
//! Numeric foundations for the numerus quadrature toolkit.
//!
//! This crate provides:
//! - [`Real`]: the scalar used for arguments, weights and thresholds
//! - [`NumericValue`]: scalar and multi-component integrand results with
//!   element-wise arithmetic
//! - [`AccuracyControl`]: local and global convergence criteria with a
//!   subdivision budget
//!
//! ## Design Principles
//!
//! - **Element-wise semantics**: a multi-component value has converged only
//!   when every component has converged; complex numbers are treated as two
//!   independent real components
//! - **Zero disables**: a threshold of zero switches its check off instead
//!   of demanding an exact result

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod accuracy;
pub mod compare;
pub mod error;
pub mod real;
pub mod value;

mod proptests;

pub use accuracy::{relative_error, AccuracyControl, AccuracyThresholds, DEFAULT_MAX_SUBDIVISIONS};
pub use compare::{abs_leq, abs_value, first_leq_than_second, first_lower_than_second};
pub use error::{ThresholdError, ThresholdKind};
pub use real::Real;
pub use value::NumericValue;
