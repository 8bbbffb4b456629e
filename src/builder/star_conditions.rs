//! Star condition generation from full-scan statistics
//!
//! A condition is only worth a star when some placements satisfy it and fewer
//! than half do. Candidates are drawn from the first solve's statistics, so
//! each generated condition is known to be reachable.

use log::{debug, warn};
use rand::Rng;

use crate::algorithm::conditions::{
    CellRequirement, ConditionKind, StarCondition, StarSlots, SwitchPosition, SwitchRequirement,
};
use crate::algorithm::solver::SolveRequest;
use crate::analysis::statistics::AggregateStatistics;
use crate::builder::settings::BuilderSettings;
use crate::io::configuration::{CONDITION_ATTEMPTS_PER_KIND, TRIVIAL_CONDITION_PERCENT};
use crate::math::probability::frequency_percent;
use crate::spatial::CellRole;

/// Condition kinds worth trying for a target configuration
///
/// Exact score needs a range wider than one score, zero-cell conditions need
/// some placement with a zero cell, and switch conditions need switches.
pub fn candidate_kinds(
    settings: &BuilderSettings,
    request: &SolveRequest,
    full_scan: &AggregateStatistics,
) -> Vec<ConditionKind> {
    let has_empty_cells = full_scan.has_empty_cells();

    ConditionKind::ALL
        .into_iter()
        .filter(|&kind| settings.allows(kind))
        .filter(|&kind| match kind {
            ConditionKind::ExactScore => request.score_min != request.score_max,
            ConditionKind::AnyCellEquals | ConditionKind::EmptyCellCount => {
                if !has_empty_cells {
                    warn!("{kind} disabled: no empty cells found in solutions");
                }
                has_empty_cells
            }
            ConditionKind::SwitchState => !request.switches.is_empty(),
            ConditionKind::BombAtCells | ConditionKind::CellEquals => true,
        })
        .collect()
}

/// Fill up to three star slots for `request`
///
/// Each kind that fails to yield a condition is dropped for the rest of the
/// call. Generation gives up after a fixed number of tries per kind.
pub fn generate_conditions<R: Rng>(
    settings: &BuilderSettings,
    request: &SolveRequest,
    full_scan: &AggregateStatistics,
    rng: &mut R,
) -> StarSlots {
    let mut slots = StarSlots::default();
    let kinds = candidate_kinds(settings, request, full_scan);
    if kinds.is_empty() {
        warn!("No valid condition types available");
        return slots;
    }

    let mut failed: Vec<ConditionKind> = Vec::new();
    let mut filled = 0;
    let max_attempts = kinds.len() * CONDITION_ATTEMPTS_PER_KIND;

    for _ in 0..max_attempts {
        if filled == slots.len() {
            break;
        }

        let remaining: Vec<ConditionKind> = kinds
            .iter()
            .copied()
            .filter(|kind| !failed.contains(kind))
            .collect();
        let Some(kind) = pick(&remaining, rng) else {
            warn!("All condition types failed, generated {filled} conditions");
            break;
        };

        match generate_condition(kind, request, full_scan, rng) {
            Some(condition) => {
                debug!("Condition added: {condition} ({}/{})", filled + 1, slots.len());
                if let Some(slot) = slots.get_mut(filled) {
                    *slot = Some(condition);
                }
                filled += 1;
            }
            None => {
                failed.push(kind);
                warn!(
                    "{kind} failed and removed from pool, {} types remain",
                    remaining.len() - 1
                );
            }
        }
    }

    if filled < slots.len() {
        warn!("Only {filled} valid conditions generated (target: {})", slots.len());
    }
    slots
}

/// Draw one condition of `kind`, or `None` if no suitable instance exists
pub fn generate_condition<R: Rng>(
    kind: ConditionKind,
    request: &SolveRequest,
    full_scan: &AggregateStatistics,
    rng: &mut R,
) -> Option<StarCondition> {
    let total = full_scan.total_enumerated;
    if total == 0 {
        return None;
    }
    let worthwhile = move |count: u64| {
        count > 0 && frequency_percent(count, total) < TRIVIAL_CONDITION_PERCENT
    };

    match kind {
        ConditionKind::ExactScore => {
            if request.score_min >= request.score_max {
                return None;
            }
            let scores: Vec<i64> = full_scan
                .score_histogram
                .range(request.score_min..=request.score_max)
                .filter(|&(_, &count)| worthwhile(count))
                .map(|(&score, _)| score)
                .collect();
            pick(&scores, rng).map(|value| StarCondition::ExactScore { value })
        }
        ConditionKind::BombAtCells => {
            let grid = request.grid().ok()?;
            let cells: Vec<usize> = (0..grid.total_cells())
                .filter(|&cell| {
                    !matches!(
                        grid.role(cell),
                        Some(CellRole::Block | CellRole::ForcedBomb) | None
                    )
                })
                .filter(|&cell| worthwhile(full_scan.heatmap.total_at(cell)))
                .collect();
            pick(&cells, rng).map(|cell| StarCondition::BombAtCells { cells: vec![cell] })
        }
        ConditionKind::AnyCellEquals => {
            let values: Vec<i32> = full_scan
                .global_value_histogram
                .iter()
                .filter(|&(_, &count)| worthwhile(count))
                .map(|(&value, _)| value)
                .collect();
            pick(&values, rng).map(|value| StarCondition::AnyCellEquals { value })
        }
        ConditionKind::CellEquals => {
            let pairs: Vec<CellRequirement> = full_scan
                .cell_value_histogram
                .iter()
                .enumerate()
                .flat_map(|(id, histogram)| {
                    histogram
                        .iter()
                        .filter(move |&(_, &count)| worthwhile(count))
                        .map(move |(&value, _)| CellRequirement { id, value })
                })
                .collect();
            pick(&pairs, rng).map(|pair| StarCondition::CellEquals {
                requirements: vec![pair],
            })
        }
        ConditionKind::EmptyCellCount => {
            let counts: Vec<usize> = full_scan
                .empty_cell_histogram
                .iter()
                .filter(|&(_, &frequency)| worthwhile(frequency))
                .map(|(&count, _)| count)
                .collect();
            pick(&counts, rng).map(|value| StarCondition::EmptyCellCount { value })
        }
        ConditionKind::SwitchState => {
            let states: Vec<SwitchRequirement> = full_scan
                .switch_histogram
                .iter()
                .flat_map(|(&id, counts)| {
                    [(SwitchPosition::On, counts.on), (SwitchPosition::Off, counts.off)]
                        .into_iter()
                        .filter(move |&(_, count)| worthwhile(count))
                        .map(move |(state, _)| SwitchRequirement { id, state })
                })
                .collect();
            pick(&states, rng).map(|choice| StarCondition::SwitchState {
                requirements: vec![choice],
            })
        }
    }
}

fn pick<T: Clone, R: Rng>(items: &[T], rng: &mut R) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.random_range(0..items.len())).cloned()
}
