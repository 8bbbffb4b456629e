//! Random level configurations with proportional down-scaling
//!
//! Structural elements (blocks, switches, forced bombs) share a budget of half
//! the grid. When the drawn counts do not fit, every category shrinks by the
//! same factor instead of the first one taking everything.

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::algorithm::solver::SolveRequest;
use crate::builder::settings::{BuilderSettings, CountRange};
use crate::io::configuration::{
    CATEGORY_SHARE_LIMIT, MAX_GENERATED_SWITCHES, STRUCTURAL_BUDGET_RATIO,
};

/// Scale desired counts down by one shared factor when they exceed `limit`
///
/// Counts are truncated after scaling, so the result never sums above
/// `limit`. Desires that already fit are only truncated.
pub fn proportional_scale(desires: &[f64], limit: f64) -> Vec<usize> {
    let total: f64 = desires.iter().sum();
    let scale = if total > limit && total > 0.0 {
        limit / total
    } else {
        1.0
    };
    desires
        .iter()
        .map(|desire| (desire * scale).floor().max(0.0) as usize)
        .collect()
}

fn draw<R: Rng>(range: Option<CountRange>, rng: &mut R) -> f64 {
    range.map_or(0.0, |range| range.sample(rng) as f64)
}

/// Draw a random base configuration for the first solve of an attempt
///
/// The request has an unbounded score range, no star conditions, and asks for
/// per-cell value statistics so conditions can be derived from it.
pub fn generate_config<R: Rng>(settings: &BuilderSettings, rng: &mut R) -> SolveRequest {
    let cols = settings.grid_columns.sample(rng).max(1);
    let rows = settings.grid_rows.sample(rng).max(1);
    let total_cells = cols * rows;
    let structural_budget = (total_cells as f64 * STRUCTURAL_BUDGET_RATIO).floor();
    let category_cap = CATEGORY_SHARE_LIMIT * structural_budget;

    let mut cells: Vec<usize> = (0..total_cells).collect();
    cells.shuffle(rng);

    let blocks_desire = draw(settings.blocks, rng);
    let switches_desire = draw(settings.switches, rng).min(MAX_GENERATED_SWITCHES as f64);
    let forced_desire = draw(settings.forced_bombs, rng);
    let structural: Vec<f64> = [blocks_desire, switches_desire, forced_desire]
        .iter()
        .map(|desire| desire.min(category_cap))
        .collect();
    let structural_counts = proportional_scale(&structural, structural_budget);

    let mut remaining = cells.into_iter();
    let mut take = |count: usize| -> Vec<usize> { remaining.by_ref().take(count).collect() };
    let blocks = take(structural_counts.first().copied().unwrap_or(0));
    let switches = take(structural_counts.get(1).copied().unwrap_or(0));
    let forced_bombs = take(structural_counts.get(2).copied().unwrap_or(0));

    let bomb_capacity = total_cells - blocks.len() - forced_bombs.len();
    let bomb_desires = [
        draw(settings.normal_bombs, rng),
        draw(settings.power_bombs, rng),
        draw(settings.negative_bombs, rng),
    ];
    let bomb_counts = proportional_scale(&bomb_desires, bomb_capacity as f64);

    let mut request = SolveRequest::new(rows, cols);
    request.blocks = blocks;
    request.switches = switches;
    request.forced_bombs = forced_bombs;
    request.normal_count = bomb_counts.first().copied().unwrap_or(0);
    request.power_count = bomb_counts.get(1).copied().unwrap_or(0);
    request.negative_count = bomb_counts.get(2).copied().unwrap_or(0);
    request.max_retained_solutions = settings.max_retained_solutions;
    request.max_enumerated_cap = settings.analysis_limit;
    request.analyze_cell_values = true;

    debug!(
        "Generated {cols}x{rows} grid: blocks {:?}, switches {:?}, forced {:?}, bombs {}/{}/{}",
        request.blocks,
        request.switches,
        request.forced_bombs,
        request.normal_count,
        request.power_count,
        request.negative_count
    );
    request
}
