//! Eight-directional adjacency over the open cells of one switch branch

use bitvec::prelude::*;

/// Precomputed open neighbours of every cell for one effective block set
///
/// Blocked cells have no neighbours and never appear as a neighbour.
#[derive(Debug, Clone)]
pub struct Adjacency {
    neighbors: Vec<Vec<usize>>,
    open: BitVec,
}

impl Adjacency {
    /// Open cells at Chebyshev distance 1 from `cell`
    pub fn neighbors_of(&self, cell: usize) -> &[usize] {
        self.neighbors.get(cell).map_or(&[], Vec::as_slice)
    }

    /// Whether the cell is open in this branch
    pub fn is_open(&self, cell: usize) -> bool {
        self.open.get(cell).as_deref() == Some(&true)
    }

    /// Total number of grid cells, open or not
    pub fn total_cells(&self) -> usize {
        self.neighbors.len()
    }

    /// Iterate open cell ids in ascending order
    pub fn open_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.open.iter_ones()
    }
}

/// Compute the open 8-neighbourhood of every cell
///
/// Must be recomputed whenever the effective block set changes, i.e. once per
/// switch branch.
pub fn compute_neighbors(rows: usize, cols: usize, blocked: &BitSlice) -> Adjacency {
    let total = rows * cols;
    let is_blocked = |cell: usize| blocked.get(cell).as_deref() == Some(&true);

    let mut open = bitvec![0; total];
    let mut neighbors = vec![Vec::new(); total];

    for cell in 0..total {
        if is_blocked(cell) {
            continue;
        }
        open.set(cell, true);

        let row = cell / cols;
        let col = cell % cols;
        let Some(list) = neighbors.get_mut(cell) else {
            continue;
        };
        for dr in -1_i64..=1 {
            for dc in -1_i64..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let r = row as i64 + dr;
                let c = col as i64 + dc;
                if r < 0 || c < 0 || r >= rows as i64 || c >= cols as i64 {
                    continue;
                }
                let neighbor = r as usize * cols + c as usize;
                if !is_blocked(neighbor) {
                    list.push(neighbor);
                }
            }
        }
    }

    Adjacency { neighbors, open }
}
