//! Placement scoring over one occupied-cell bitset
//!
//! Every bomb adds its weight to each open neighbour that is not itself a
//! bomb. The same pass feeds the total score and the per-cell values, so the
//! two can never disagree.

use serde::{Deserialize, Serialize};

use crate::algorithm::bitset::CellBitset;
use crate::spatial::Adjacency;

/// The three placeable bomb categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BombKind {
    /// Adds 1 to each open neighbour; forced bombs are normal bombs
    Normal,
    /// Adds 2 to each open neighbour
    Power,
    /// Subtracts 1 from each open neighbour
    Negative,
}

impl BombKind {
    /// All kinds in enumeration order
    pub const ALL: [Self; 3] = [Self::Normal, Self::Power, Self::Negative];

    /// Contribution to each affected neighbour
    pub const fn weight(self) -> i32 {
        match self {
            Self::Normal => 1,
            Self::Power => 2,
            Self::Negative => -1,
        }
    }
}

/// Score of one placement together with the value shown in every cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreCard {
    /// Sum of all bomb contributions
    pub score: i64,
    /// Displayed value per cell; `None` for bombs and closed cells
    pub cell_values: Vec<Option<i32>>,
}

impl ScoreCard {
    /// Number of open non-bomb cells showing zero
    pub fn empty_cells(&self) -> usize {
        self.cell_values
            .iter()
            .filter(|value| **value == Some(0))
            .count()
    }
}

/// Reusable scorer for many placements on the same grid
///
/// Keeps the occupied bitset and value buffer between calls so the inner
/// enumeration loop does not allocate.
#[derive(Debug, Clone)]
pub struct Scorer {
    forced_bombs: Vec<usize>,
    occupied: CellBitset,
    values: Vec<i32>,
}

impl Scorer {
    /// Create a scorer for a grid of `total_cells` with fixed forced bombs
    pub fn new(total_cells: usize, forced_bombs: &[usize]) -> Self {
        Self {
            forced_bombs: forced_bombs.to_vec(),
            occupied: CellBitset::new(total_cells),
            values: vec![0; total_cells],
        }
    }

    /// Score a placement without materialising cell values
    pub fn score(
        &mut self,
        adjacency: &Adjacency,
        normal: &[usize],
        power: &[usize],
        negative: &[usize],
    ) -> i64 {
        self.accumulate(adjacency, normal, power, negative, false)
    }

    /// Score a placement and report every open cell's value
    pub fn score_with_values(
        &mut self,
        adjacency: &Adjacency,
        normal: &[usize],
        power: &[usize],
        negative: &[usize],
    ) -> ScoreCard {
        let score = self.accumulate(adjacency, normal, power, negative, true);

        let cell_values = self
            .values
            .iter()
            .enumerate()
            .map(|(cell, &value)| {
                (adjacency.is_open(cell) && !self.occupied.contains(cell)).then_some(value)
            })
            .collect();

        ScoreCard { score, cell_values }
    }

    /// Cells holding any bomb in the most recently scored placement
    ///
    /// Forced bombs included.
    pub const fn occupied(&self) -> &CellBitset {
        &self.occupied
    }

    fn accumulate(
        &mut self,
        adjacency: &Adjacency,
        normal: &[usize],
        power: &[usize],
        negative: &[usize],
        track_values: bool,
    ) -> i64 {
        self.occupied.clear();
        self.occupied.extend(&self.forced_bombs);
        self.occupied.extend(normal);
        self.occupied.extend(power);
        self.occupied.extend(negative);

        if track_values {
            self.values.fill(0);
        }

        let groups = [
            (BombKind::Normal, self.forced_bombs.as_slice()),
            (BombKind::Normal, normal),
            (BombKind::Power, power),
            (BombKind::Negative, negative),
        ];

        let mut score = 0_i64;
        for (kind, cells) in groups {
            let weight = kind.weight();
            for &bomb in cells {
                for &neighbor in adjacency.neighbors_of(bomb) {
                    if self.occupied.contains(neighbor) {
                        continue;
                    }
                    score += i64::from(weight);
                    if track_values && let Some(value) = self.values.get_mut(neighbor) {
                        *value += weight;
                    }
                }
            }
        }
        score
    }
}

/// Score a single placement from scratch
///
/// Convenience wrapper over [`Scorer`] for one-off evaluation.
pub fn score_solution(
    normal: &[usize],
    power: &[usize],
    negative: &[usize],
    forced_bombs: &[usize],
    adjacency: &Adjacency,
) -> ScoreCard {
    let mut scorer = Scorer::new(adjacency.total_cells(), forced_bombs);
    scorer.score_with_values(adjacency, normal, power, negative)
}
