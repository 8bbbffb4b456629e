//! Spatial data structures for level grids
//!
//! This module contains:
//! - Grid geometry and cell-role validation
//! - Per-branch open-cell adjacency

/// Grid geometry and fixed cell roles
pub mod grid;
/// Eight-directional adjacency computation
pub mod neighbors;

pub use grid::{CellRole, LevelGrid};
pub use neighbors::{Adjacency, compute_neighbors};
