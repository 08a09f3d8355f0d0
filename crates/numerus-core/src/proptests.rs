//! Property-based tests for value arithmetic and convergence checks.
