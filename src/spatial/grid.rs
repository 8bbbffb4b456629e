//! Level grid geometry and fixed cell roles
//!
//! A grid is `rows × cols` cells indexed row-major from 0. Every cell is either
//! open, a permanent block, a switch (open or closed per enumeration branch),
//! or a forced bomb. The three special role sets never overlap.

use bitvec::prelude::*;
use serde::{Deserialize, Serialize};

use crate::io::error::{MinesetterError, Result, invalid_parameter};

/// Upper bound on switches, so a branch mask always fits in a `u64`
pub const MAX_SWITCHES_PER_GRID: usize = 32;

/// Role a cell plays for the whole lifetime of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellRole {
    /// Free cell that may receive a bomb or display a value
    Open,
    /// Permanently closed cell
    Block,
    /// Cell that is open or closed depending on the switch branch
    Switch,
    /// Cell that always holds a normal bomb
    ForcedBomb,
}

impl CellRole {
    const fn label(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Block => "block",
            Self::Switch => "switch",
            Self::ForcedBomb => "forced bomb",
        }
    }
}

/// Immutable grid description shared by every branch of one enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelGrid {
    rows: usize,
    cols: usize,
    blocks: Vec<usize>,
    switches: Vec<usize>,
    forced_bombs: Vec<usize>,
    roles: Vec<CellRole>,
}

impl LevelGrid {
    /// Build a grid, validating cell ids and role exclusivity
    ///
    /// Duplicate ids inside one list are collapsed; the first occurrence keeps
    /// its position (switch order defines the branch bit order).
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero, an id is outside the grid,
    /// a cell is claimed by two roles, or there are too many switches
    pub fn new(
        rows: usize,
        cols: usize,
        blocks: &[usize],
        switches: &[usize],
        forced_bombs: &[usize],
    ) -> Result<Self> {
        if rows == 0 {
            return Err(invalid_parameter("rows", &rows, &"grid needs at least one row"));
        }
        if cols == 0 {
            return Err(invalid_parameter("cols", &cols, &"grid needs at least one column"));
        }

        let total_cells = rows * cols;
        let mut roles = vec![CellRole::Open; total_cells];

        let blocks = assign_role(&mut roles, blocks, CellRole::Block)?;
        let switches = assign_role(&mut roles, switches, CellRole::Switch)?;
        let forced_bombs = assign_role(&mut roles, forced_bombs, CellRole::ForcedBomb)?;

        if switches.len() > MAX_SWITCHES_PER_GRID {
            return Err(invalid_parameter(
                "switches",
                &switches.len(),
                &format!("at most {MAX_SWITCHES_PER_GRID} switches are supported"),
            ));
        }

        Ok(Self {
            rows,
            cols,
            blocks,
            switches,
            forced_bombs,
            roles,
        })
    }

    /// Number of rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells, `rows * cols`
    pub const fn total_cells(&self) -> usize {
        self.rows * self.cols
    }

    /// Permanently blocked cells
    pub fn blocks(&self) -> &[usize] {
        &self.blocks
    }

    /// Switch cells in branch-bit order
    pub fn switches(&self) -> &[usize] {
        &self.switches
    }

    /// Cells that always contain a normal bomb
    pub fn forced_bombs(&self) -> &[usize] {
        &self.forced_bombs
    }

    /// Role of a cell, `None` if the id lies outside the grid
    pub fn role(&self, cell: usize) -> Option<CellRole> {
        self.roles.get(cell).copied()
    }

    /// Cells usable for free placement when every switch is open
    ///
    /// `total − |blocks| − |forced bombs|`, the `M` of the analytical count.
    pub const fn available_cells(&self) -> usize {
        self.total_cells() - self.blocks.len() - self.forced_bombs.len()
    }

    /// Row and column of a cell
    pub const fn coordinates(&self, cell: usize) -> (usize, usize) {
        (cell / self.cols, cell % self.cols)
    }

    /// Switches closed in the branch identified by `mask`
    ///
    /// Bit `j` of the mask closes `switches()[j]`.
    pub fn closed_switches(&self, mask: u64) -> Vec<usize> {
        self.switches
            .iter()
            .enumerate()
            .filter(|&(bit, _)| (mask >> bit) & 1 == 1)
            .map(|(_, &cell)| cell)
            .collect()
    }

    /// Effective block set for one branch: static blocks plus closed switches
    pub fn blocked_cells(&self, closed_switches: &[usize]) -> BitVec {
        let mut blocked = bitvec![0; self.total_cells()];
        for &cell in self.blocks.iter().chain(closed_switches) {
            if cell < blocked.len() {
                blocked.set(cell, true);
            }
        }
        blocked
    }

    /// Cells available for free placement in one branch, ascending
    pub fn placement_pool(&self, blocked: &BitSlice) -> Vec<usize> {
        (0..self.total_cells())
            .filter(|&cell| {
                blocked.get(cell).as_deref() != Some(&true)
                    && self.role(cell) != Some(CellRole::ForcedBomb)
            })
            .collect()
    }
}

fn assign_role(roles: &mut [CellRole], cells: &[usize], role: CellRole) -> Result<Vec<usize>> {
    let total_cells = roles.len();
    let mut assigned = Vec::with_capacity(cells.len());

    for &cell in cells {
        let Some(slot) = roles.get_mut(cell) else {
            return Err(MinesetterError::InvalidCell {
                cell,
                total_cells,
                role: role.label(),
            });
        };
        match *slot {
            CellRole::Open => {
                *slot = role;
                assigned.push(cell);
            }
            existing if existing == role => {}
            existing => {
                return Err(MinesetterError::OverlappingCell {
                    cell,
                    first: existing.label(),
                    second: role.label(),
                });
            }
        }
    }

    Ok(assigned)
}
