//! Mathematical utilities for the solver

/// Exact binomial coefficients and lazy subset generation
pub mod combinatorics;
/// Win-rate and progress percentages
pub mod probability;
