//! Level file export and import
//!
//! The level document is what a game client loads: grid size, bomb counts,
//! target range, fixed cells, star conditions and one known solution.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::algorithm::conditions::{CellRequirement, StarCondition, StarSlots, SwitchRequirement};
use crate::algorithm::solver::SolveRequest;
use crate::analysis::statistics::AggregateStatistics;
use crate::builder::generation::GeneratedLevel;
use crate::io::error::{Result, WithPath};

/// Fixed state of a non-open cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CellState {
    /// Permanent block
    Block,
    /// Toggle switch
    Switch,
    /// Forced bomb
    Bomb,
}

/// One fixed cell of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialCell {
    /// Cell id
    pub id: usize,
    /// Fixed state
    pub state: CellState,
}

/// Bomb cells of one known solution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelSolution {
    /// Every bomb cell, ascending
    pub placement_ids: Vec<usize>,
}

/// Star conditions keyed by type
///
/// At most one condition per type survives; when two slots share a type the
/// later one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelStarConditions {
    /// Exact score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get_score: Option<i64>,
    /// Cells that must hold bombs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_bomb_at: Option<Vec<usize>>,
    /// Value some cell must show
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub any_cell_value: Option<i32>,
    /// Values specific cells must show
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_values: Option<Vec<CellRequirement>>,
    /// Number of zero cells
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty_cells_count: Option<usize>,
    /// Required switch positions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_switches: Option<Vec<SwitchRequirement>>,
}

impl LevelStarConditions {
    /// Flatten slots into the keyed form
    pub fn from_slots(slots: &StarSlots) -> Self {
        let mut keyed = Self::default();
        for condition in slots.iter().flatten() {
            match condition.clone() {
                StarCondition::ExactScore { value } => keyed.get_score = Some(value),
                StarCondition::BombAtCells { cells } => keyed.place_bomb_at = Some(cells),
                StarCondition::AnyCellEquals { value } => keyed.any_cell_value = Some(value),
                StarCondition::CellEquals { requirements } => {
                    keyed.cell_values = Some(requirements);
                }
                StarCondition::EmptyCellCount { value } => keyed.empty_cells_count = Some(value),
                StarCondition::SwitchState { requirements } => {
                    keyed.set_switches = Some(requirements);
                }
            }
        }
        keyed
    }

    /// Rebuild slots in a fixed type order, keeping the first three
    pub fn to_slots(&self) -> StarSlots {
        let conditions = [
            self.get_score.map(|value| StarCondition::ExactScore { value }),
            self.place_bomb_at
                .clone()
                .map(|cells| StarCondition::BombAtCells { cells }),
            self.any_cell_value
                .map(|value| StarCondition::AnyCellEquals { value }),
            self.cell_values
                .clone()
                .map(|requirements| StarCondition::CellEquals { requirements }),
            self.empty_cells_count
                .map(|value| StarCondition::EmptyCellCount { value }),
            self.set_switches
                .clone()
                .map(|requirements| StarCondition::SwitchState { requirements }),
        ];

        let mut slots = StarSlots::default();
        for (slot, condition) in slots.iter_mut().zip(conditions.into_iter().flatten()) {
            *slot = Some(condition);
        }
        slots
    }

    /// Whether no condition is set
    pub const fn is_empty(&self) -> bool {
        self.get_score.is_none()
            && self.place_bomb_at.is_none()
            && self.any_cell_value.is_none()
            && self.cell_values.is_none()
            && self.empty_cells_count.is_none()
            && self.set_switches.is_none()
    }
}

/// Exported level document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelFile {
    /// Level identifier
    pub remote_id: String,
    /// Grid width
    pub grid_columns: usize,
    /// Grid height
    pub grid_rows: usize,
    /// Normal bombs to place
    pub nrm_bomb_count: usize,
    /// Power bombs to place
    pub pls_bomb_count: usize,
    /// Negative bombs to place
    pub ngt_bomb_count: usize,
    /// Lowest winning score
    pub target_min: i64,
    /// Highest winning score
    pub target_max: i64,
    /// Lowest score among retained solutions
    #[serde(default)]
    pub min_possible_target: Option<i64>,
    /// Highest score among retained solutions
    #[serde(default)]
    pub max_possible_target: Option<i64>,
    /// Blocks, switches and forced bombs, ascending by id
    #[serde(default)]
    pub initial_cells: Vec<InitialCell>,
    /// Star conditions keyed by type
    #[serde(default)]
    pub star_conditions: LevelStarConditions,
    /// First retained solution
    #[serde(default)]
    pub solution: Option<LevelSolution>,
}

impl LevelFile {
    /// Build a level from a solved request
    pub fn from_solve(
        remote_id: &str,
        request: &SolveRequest,
        stats: &AggregateStatistics,
    ) -> Self {
        let mut initial_cells: Vec<InitialCell> = Vec::new();
        let roles = [
            (&request.blocks, CellState::Block),
            (&request.switches, CellState::Switch),
            (&request.forced_bombs, CellState::Bomb),
        ];
        for (cells, state) in roles {
            for &id in cells {
                if !initial_cells.iter().any(|cell| cell.id == id) {
                    initial_cells.push(InitialCell { id, state });
                }
            }
        }
        initial_cells.sort_by_key(|cell| cell.id);

        let scores = stats.retained_solutions.iter().map(|solution| solution.score);
        let solution = stats.retained_solutions.first().map(|best| LevelSolution {
            placement_ids: best.placement_ids(),
        });

        Self {
            remote_id: remote_id.to_string(),
            grid_columns: request.cols,
            grid_rows: request.rows,
            nrm_bomb_count: request.normal_count,
            pls_bomb_count: request.power_count,
            ngt_bomb_count: request.negative_count,
            target_min: request.score_min,
            target_max: request.score_max,
            min_possible_target: scores.clone().min(),
            max_possible_target: scores.max(),
            initial_cells,
            star_conditions: LevelStarConditions::from_slots(&request.star_conditions),
            solution,
        }
    }

    /// Build a level from an accepted generation result
    pub fn from_generated(remote_id: &str, level: &GeneratedLevel) -> Self {
        Self::from_solve(remote_id, &level.request, &level.statistics)
    }

    /// Solve request that reproduces this level's verification
    pub fn to_request(&self) -> SolveRequest {
        let mut request = SolveRequest::new(self.grid_rows, self.grid_columns);
        for cell in &self.initial_cells {
            let target = match cell.state {
                CellState::Block => &mut request.blocks,
                CellState::Switch => &mut request.switches,
                CellState::Bomb => &mut request.forced_bombs,
            };
            target.push(cell.id);
        }
        request.normal_count = self.nrm_bomb_count;
        request.power_count = self.pls_bomb_count;
        request.negative_count = self.ngt_bomb_count;
        request.score_min = self.target_min;
        request.score_max = self.target_max;
        request.star_conditions = self.star_conditions.to_slots();
        request
    }

    /// Read a level from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a level document
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).with_path(path, "read level")?;
        serde_json::from_str(&text).with_path(path, "parse level")
    }

    /// Write the level as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails
    pub fn write(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self).with_path(path, "encode level")?;
        fs::write(path, text).with_path(path, "write level")
    }
}

/// Input accepted by the solve command
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum SolveInput {
    Request(SolveRequest),
    Level(LevelFile),
}

/// Load a solve request from either a raw request or a level document
///
/// # Errors
///
/// Returns an error if the file cannot be read or matches neither format
pub fn load_request(path: &Path) -> Result<SolveRequest> {
    let text = fs::read_to_string(path).with_path(path, "read solve input")?;
    let input: SolveInput = serde_json::from_str(&text).with_path(path, "parse solve input")?;
    Ok(match input {
        SolveInput::Request(request) => request,
        SolveInput::Level(level) => level.to_request(),
    })
}

/// Write any serializable value as pretty-printed JSON
///
/// # Errors
///
/// Returns an error if encoding or writing fails
pub fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let text = serde_json::to_string_pretty(value).with_path(path, "encode json")?;
    fs::write(path, text).with_path(path, "write json")
}
