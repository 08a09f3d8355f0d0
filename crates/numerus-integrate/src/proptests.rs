//! Property-based tests for adaptive integration.
