//! Fixed-size bitset over grid cell ids

use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset for tracking which cells are occupied
///
/// Uses 0-based cell ids matching the row-major grid numbering. Ids outside
/// the grid are ignored on insert and report absent on lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellBitset {
    bits: BitVec,
}

impl CellBitset {
    /// Create a bitset with no cells present
    pub fn new(total_cells: usize) -> Self {
        Self {
            bits: bitvec![0; total_cells],
        }
    }

    /// Create a bitset from a list of cell ids
    pub fn from_cells(cells: &[usize], total_cells: usize) -> Self {
        let mut bitset = Self::new(total_cells);
        bitset.extend(cells);
        bitset
    }

    /// Insert a cell id
    pub fn insert(&mut self, cell: usize) {
        if cell < self.bits.len() {
            self.bits.set(cell, true);
        }
    }

    /// Insert every cell id of a slice
    pub fn extend(&mut self, cells: &[usize]) {
        for &cell in cells {
            self.insert(cell);
        }
    }

    /// Test cell membership
    pub fn contains(&self, cell: usize) -> bool {
        self.bits.get(cell).as_deref() == Some(&true)
    }

    /// Remove every cell, keeping the capacity
    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    /// Test if no cells are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count cells in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Number of cell ids the set can hold
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Extract all cell ids in ascending order
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }
}

impl fmt::Display for CellBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CellBitset({} cells: {:?})", self.count(), self.to_vec())
    }
}
