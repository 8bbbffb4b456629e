//! Exhaustive solver and level generator for a bomb-placement puzzle
//!
//! The solver enumerates every bomb placement crossed with every switch
//! state of a level, scores each one against its neighbours and aggregates
//! the results into heatmaps and histograms. The builder draws random
//! levels, solves them, and keeps those whose win rate lands in a window.

#![forbid(unsafe_code)]

/// Placement enumeration, scoring, star conditions and background solving
pub mod algorithm;
/// Aggregated statistics, retained solutions and target-range selection
pub mod analysis;
/// Random level generation tuned to a win-rate window
pub mod builder;
/// Input/output operations, wire messages and error handling
pub mod io;
/// Combinatorics and percentage helpers
pub mod math;
/// Grid layout and cell adjacency
pub mod spatial;

pub use io::error::{MinesetterError, Result};
