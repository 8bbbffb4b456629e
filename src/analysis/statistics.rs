//! Aggregate statistics over every in-range placement of one solve
//!
//! Accumulation is append-only: each recorded placement bumps a handful of
//! counters and nothing is ever recomputed.

use ndarray::{Array2, ShapeError};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::algorithm::scoring::{BombKind, ScoreCard};
use crate::analysis::solutions::SolutionRecord;
use crate::io::wire::as_string;
use crate::math::probability::win_rate_percent;

/// How an enumeration run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Termination {
    /// Every placement was visited
    Completed,
    /// The analysis cap was reached; statistics are partial
    Capped,
    /// A cancellation token fired; statistics are partial
    Cancelled,
}

/// Per-cell bomb frequencies, one grid per bomb kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "HeatmapData", try_from = "HeatmapData")]
pub struct Heatmap {
    normal: Array2<u64>,
    power: Array2<u64>,
    negative: Array2<u64>,
}

/// Flat row-major form of [`Heatmap`] used on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HeatmapData {
    rows: usize,
    cols: usize,
    normal: Vec<u64>,
    power: Vec<u64>,
    negative: Vec<u64>,
}

impl From<Heatmap> for HeatmapData {
    fn from(heatmap: Heatmap) -> Self {
        let (rows, cols) = heatmap.normal.dim();
        Self {
            rows,
            cols,
            normal: heatmap.normal.iter().copied().collect(),
            power: heatmap.power.iter().copied().collect(),
            negative: heatmap.negative.iter().copied().collect(),
        }
    }
}

impl TryFrom<HeatmapData> for Heatmap {
    type Error = ShapeError;

    fn try_from(data: HeatmapData) -> Result<Self, Self::Error> {
        let shape = (data.rows, data.cols);
        Ok(Self {
            normal: Array2::from_shape_vec(shape, data.normal)?,
            power: Array2::from_shape_vec(shape, data.power)?,
            negative: Array2::from_shape_vec(shape, data.negative)?,
        })
    }
}

impl Heatmap {
    /// Create an all-zero heatmap for a `rows × cols` grid
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            normal: Array2::zeros((rows, cols)),
            power: Array2::zeros((rows, cols)),
            negative: Array2::zeros((rows, cols)),
        }
    }

    const fn layer(&self, kind: BombKind) -> &Array2<u64> {
        match kind {
            BombKind::Normal => &self.normal,
            BombKind::Power => &self.power,
            BombKind::Negative => &self.negative,
        }
    }

    fn position(&self, cell: usize) -> (usize, usize) {
        let cols = self.normal.ncols().max(1);
        (cell / cols, cell % cols)
    }

    /// Count one bomb of `kind` at `cell`
    pub fn record(&mut self, kind: BombKind, cell: usize) {
        let position = self.position(cell);
        let layer = match kind {
            BombKind::Normal => &mut self.normal,
            BombKind::Power => &mut self.power,
            BombKind::Negative => &mut self.negative,
        };
        if let Some(count) = layer.get_mut(position) {
            *count += 1;
        }
    }

    /// How often `cell` held a bomb of `kind`
    pub fn count(&self, kind: BombKind, cell: usize) -> u64 {
        self.layer(kind)
            .get(self.position(cell))
            .copied()
            .unwrap_or(0)
    }

    /// How often `cell` held a bomb of any kind
    pub fn total_at(&self, cell: usize) -> u64 {
        BombKind::ALL
            .iter()
            .map(|&kind| self.count(kind, cell))
            .sum()
    }

    /// The full grid of counts for one kind
    pub const fn grid(&self, kind: BombKind) -> &Array2<u64> {
        self.layer(kind)
    }
}

/// How often a switch was open and closed across recorded placements
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchCounts {
    /// Placements with the switch open
    pub on: u64,
    /// Placements with the switch closed
    pub off: u64,
}

/// Placement counts for each of the eight star-satisfaction outcomes
///
/// Buckets are disjoint, so they always sum to the number of recorded
/// placements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionTally {
    /// Only the first condition held
    #[serde(rename = "C1_Only")]
    pub c1_only: u64,
    /// Only the second condition held
    #[serde(rename = "C2_Only")]
    pub c2_only: u64,
    /// Only the third condition held
    #[serde(rename = "C3_Only")]
    pub c3_only: u64,
    /// First and second held
    #[serde(rename = "C1_C2")]
    pub c1_c2: u64,
    /// First and third held
    #[serde(rename = "C1_C3")]
    pub c1_c3: u64,
    /// Second and third held
    #[serde(rename = "C2_C3")]
    pub c2_c3: u64,
    /// All three held
    #[serde(rename = "C1_C2_C3")]
    pub c1_c2_c3: u64,
    /// None held
    #[serde(rename = "None")]
    pub none: u64,
}

impl ConditionTally {
    /// Classify one satisfaction vector into its bucket
    pub const fn record(&mut self, status: [bool; 3]) {
        let bucket = match status {
            [false, false, false] => &mut self.none,
            [true, false, false] => &mut self.c1_only,
            [false, true, false] => &mut self.c2_only,
            [false, false, true] => &mut self.c3_only,
            [true, true, false] => &mut self.c1_c2,
            [true, false, true] => &mut self.c1_c3,
            [false, true, true] => &mut self.c2_c3,
            [true, true, true] => &mut self.c1_c2_c3,
        };
        *bucket += 1;
    }

    /// Sum over all eight buckets
    pub const fn total(&self) -> u64 {
        self.c1_only
            + self.c2_only
            + self.c3_only
            + self.c1_c2
            + self.c1_c3
            + self.c2_c3
            + self.c1_c2_c3
            + self.none
    }

    /// Placements satisfying the given slot, alone or with others
    pub const fn satisfied(&self, slot: usize) -> u64 {
        match slot {
            0 => self.c1_only + self.c1_c2 + self.c1_c3 + self.c1_c2_c3,
            1 => self.c2_only + self.c1_c2 + self.c2_c3 + self.c1_c2_c3,
            2 => self.c3_only + self.c1_c3 + self.c2_c3 + self.c1_c2_c3,
            _ => 0,
        }
    }
}

/// Everything one solve learned about its search space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStatistics {
    /// In-range placements recorded, never above the analysis cap
    #[serde(rename = "enumeratedCount", with = "as_string")]
    pub total_enumerated: u64,
    /// Placements per score
    pub score_histogram: BTreeMap<i64, u64>,
    /// Per-cell bomb frequencies
    pub heatmap: Heatmap,
    /// Per-cell frequency of each displayed value
    pub cell_value_histogram: Vec<BTreeMap<i32, u64>>,
    /// Frequency of each displayed value over all cells
    pub global_value_histogram: BTreeMap<i32, u64>,
    /// Placements per number of zero-valued open cells
    pub empty_cell_histogram: BTreeMap<usize, u64>,
    /// Open/closed counts per switch cell
    pub switch_histogram: BTreeMap<usize, SwitchCounts>,
    /// Star-satisfaction outcomes
    pub condition_tally: ConditionTally,
    /// Size of the full unfiltered search space
    #[serde(rename = "totalCombinations", with = "as_string")]
    pub estimated_total_combinations: BigUint,
    /// Retained placements in discovery order
    #[serde(rename = "solutions")]
    pub retained_solutions: Vec<SolutionRecord>,
    /// How the run ended
    pub termination: Termination,
}

impl AggregateStatistics {
    /// Create empty statistics for one run
    pub fn new(rows: usize, cols: usize, switches: &[usize], estimated: BigUint) -> Self {
        Self {
            total_enumerated: 0,
            score_histogram: BTreeMap::new(),
            heatmap: Heatmap::new(rows, cols),
            cell_value_histogram: vec![BTreeMap::new(); rows * cols],
            global_value_histogram: BTreeMap::new(),
            empty_cell_histogram: BTreeMap::new(),
            switch_histogram: switches
                .iter()
                .map(|&cell| (cell, SwitchCounts::default()))
                .collect(),
            condition_tally: ConditionTally::default(),
            estimated_total_combinations: estimated,
            retained_solutions: Vec::new(),
            termination: Termination::Completed,
        }
    }

    /// Record one in-range placement's score and bomb cells
    ///
    /// Forced bombs count toward the normal heatmap.
    pub fn record_placement(
        &mut self,
        score: i64,
        forced_bombs: &[usize],
        normal: &[usize],
        power: &[usize],
        negative: &[usize],
    ) {
        self.total_enumerated += 1;
        *self.score_histogram.entry(score).or_insert(0) += 1;

        for &cell in forced_bombs.iter().chain(normal) {
            self.heatmap.record(BombKind::Normal, cell);
        }
        for &cell in power {
            self.heatmap.record(BombKind::Power, cell);
        }
        for &cell in negative {
            self.heatmap.record(BombKind::Negative, cell);
        }
    }

    /// Record the displayed value of every open non-bomb cell
    pub fn record_cell_values(&mut self, card: &ScoreCard) {
        for (cell, value) in card.cell_values.iter().enumerate() {
            let Some(value) = *value else { continue };
            if let Some(histogram) = self.cell_value_histogram.get_mut(cell) {
                *histogram.entry(value).or_insert(0) += 1;
            }
            *self.global_value_histogram.entry(value).or_insert(0) += 1;
        }
        *self.empty_cell_histogram.entry(card.empty_cells()).or_insert(0) += 1;
    }

    /// Record the position of every switch for one placement
    pub fn record_switches(&mut self, closed_switches: &[usize]) {
        for (cell, counts) in &mut self.switch_histogram {
            if closed_switches.contains(cell) {
                counts.off += 1;
            } else {
                counts.on += 1;
            }
        }
    }

    /// Record one star-satisfaction vector
    pub const fn record_conditions(&mut self, status: [bool; 3]) {
        self.condition_tally.record(status);
    }

    /// Percentage of the full search space that was recorded
    pub fn win_rate_percent(&self) -> f64 {
        win_rate_percent(
            &BigUint::from(self.total_enumerated),
            &self.estimated_total_combinations,
        )
    }

    /// Lowest and highest recorded score
    pub fn score_bounds(&self) -> Option<(i64, i64)> {
        let low = self.score_histogram.keys().next()?;
        let high = self.score_histogram.keys().next_back()?;
        Some((*low, *high))
    }

    /// Whether some recorded placement showed at least one zero cell
    pub fn has_empty_cells(&self) -> bool {
        self.empty_cell_histogram
            .iter()
            .any(|(&count, &frequency)| count > 0 && frequency > 0)
    }

    /// Whether the run visited every placement
    pub fn is_complete(&self) -> bool {
        self.termination == Termination::Completed
    }
}
