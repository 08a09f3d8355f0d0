//! # Numerus
//!
//! Adaptive numerical quadrature with configurable accuracy control.
//!
//! ## Features
//!
//! - **Gauss-Kronrod 7-15**: embedded rule with an empirical error estimate
//! - **Two-phase adaptivity**: local bisection, then global refinement of
//!   the worst interval
//! - **Multi-component integrands**: scalars, complex numbers, arrays,
//!   `Vec` and `SmallVec`, converged component by component
//! - **Batched evaluation**: integrands may evaluate many points per call,
//!   optionally in parallel
//!
//! ## Quick Start
//!
//! ```rust
//! use numerus::prelude::*;
//!
//! let mut control = AccuracyControl::new();
//! control.set_max_subdivisions(200);
//!
//! let result = AdaptiveIntegrator::new()
//!     .integrate(0.0, 2.0, &|x: f64| x, &mut control)
//!     .unwrap();
//! assert!(result.converged());
//! assert!((result.value - 2.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use numerus_core as core;
pub use numerus_integrate as integrate;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use numerus_core::{AccuracyControl, NumericValue, Real};
    pub use numerus_integrate::{
        quad, quad_with_breakpoints, quad_with_params, AdaptiveIntegrator, ConvergenceStatus, Integrand,
        IntegratorConfig, ParallelIntegrand, Quadrature,
    };
}
