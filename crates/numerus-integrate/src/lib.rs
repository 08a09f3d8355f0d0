//! # numerus-integrate
//!
//! Adaptive numerical integration of functions of one real variable.
//!
//! This crate provides:
//! - The embedded 7-point Gauss / 15-point Kronrod rule
//! - [`AdaptiveIntegrator`]: local bisection followed by global
//!   worst-interval refinement, driven by an [`AccuracyControl`]
//! - Fixed-partition integration over caller-supplied breakpoints
//! - Integrand wrappers for parallel batch evaluation and for recording
//!   evaluations
//!
//! ## Design Principles
//!
//! - **Batched evaluation**: every refinement round hands all of its points
//!   to the integrand in one call
//! - **Explicit status**: running out of subdivisions is reported, never
//!   silently returned as if converged
//! - **Deterministic**: contributions are summed in interval order, so
//!   repeated and parallel runs agree bit for bit
//!
//! [`AccuracyControl`]: numerus_core::AccuracyControl

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod adaptive;
pub mod api;
pub mod error;
pub mod integrand;
pub mod interval;
pub mod monitor;
pub mod parallel;
pub mod result;
pub mod rule;

mod proptests;

pub use adaptive::{AdaptiveIntegrator, IntegratorConfig};
pub use api::{quad, quad_with_breakpoints, quad_with_params};
pub use error::{IntegrateError, IntegrateResult};
pub use integrand::Integrand;
pub use interval::Interval;
pub use monitor::EvaluationMonitor;
pub use parallel::{ParallelConfig, ParallelIntegrand};
pub use result::{ConvergenceStatus, FixedQuadrature, Quadrature};
pub use rule::{GaussKronrod15, RuleEstimate, GAUSS_POINTS, KRONROD_POINTS};
