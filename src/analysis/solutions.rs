//! Retained solution records

use serde::{Deserialize, Serialize};

/// One in-range placement kept for display or export
///
/// Bomb lists hold free-pool cells only; forced bombs are implied by the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionRecord {
    /// Cells holding normal bombs
    pub normal_bombs: Vec<usize>,
    /// Cells holding power bombs
    pub power_bombs: Vec<usize>,
    /// Cells holding negative bombs
    pub negative_bombs: Vec<usize>,
    /// Placement score
    #[serde(rename = "sum")]
    pub score: i64,
    /// Satisfaction of each star slot
    pub condition_status: [bool; 3],
    /// Switches closed in this placement's branch
    #[serde(rename = "switchState")]
    pub closed_switches: Vec<usize>,
}

impl SolutionRecord {
    /// Whether every star slot is satisfied
    pub fn is_perfect(&self) -> bool {
        self.condition_status.iter().all(|&satisfied| satisfied)
    }

    /// Every placed bomb cell, ascending and deduplicated
    pub fn placement_ids(&self) -> Vec<usize> {
        let mut ids: Vec<usize> = self
            .normal_bombs
            .iter()
            .chain(&self.power_bombs)
            .chain(&self.negative_bombs)
            .copied()
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

/// Bounded collector of solution records in discovery order
///
/// Perfect solutions are kept even once the bound is reached.
#[derive(Debug, Clone)]
pub struct SolutionTracker {
    solutions: Vec<SolutionRecord>,
    max_solutions: usize,
}

impl SolutionTracker {
    /// Create a tracker keeping up to `max_solutions` ordinary records
    pub const fn new(max_solutions: usize) -> Self {
        Self {
            solutions: Vec::new(),
            max_solutions,
        }
    }

    /// Whether a record with the given perfection would be kept
    pub const fn accepts(&self, is_perfect: bool) -> bool {
        is_perfect || self.solutions.len() < self.max_solutions
    }

    /// Offer a record, returning whether it was kept
    pub fn add(&mut self, solution: SolutionRecord, is_perfect: bool) -> bool {
        if self.accepts(is_perfect) {
            self.solutions.push(solution);
            return true;
        }
        false
    }

    /// Records kept so far
    pub fn solutions(&self) -> &[SolutionRecord] {
        &self.solutions
    }

    /// Number of records kept
    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    /// Whether nothing has been kept
    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    /// Consume the tracker, yielding its records
    pub fn into_solutions(self) -> Vec<SolutionRecord> {
        self.solutions
    }
}
