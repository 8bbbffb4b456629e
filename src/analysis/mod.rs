//! Aggregation of enumeration results and target selection

/// Smart target-range selection from a score histogram
pub mod selection;
/// Retained solution records
pub mod solutions;
/// Aggregate statistics over in-range placements
pub mod statistics;
