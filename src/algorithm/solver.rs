//! Exhaustive enumeration of bomb placements across switch branches
//!
//! For every switch on/off mask the solver walks all normal-bomb subsets of
//! the free pool, then power-bomb subsets of what remains, then negative-bomb
//! subsets of the rest. Each leaf is scored once and, when its score lies in
//! the requested range, fed into the aggregate statistics.

use log::{debug, info, warn};
use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::algorithm::conditions::{
    ConditionContext, StarSlots, configured_count, evaluate, star_slots,
};
use crate::algorithm::scoring::Scorer;
use crate::algorithm::worker::CancellationToken;
use crate::analysis::solutions::{SolutionRecord, SolutionTracker};
use crate::analysis::statistics::{AggregateStatistics, Termination};
use crate::io::configuration::{
    DEFAULT_MAX_ENUMERATED, DEFAULT_MAX_RETAINED_SOLUTIONS, PROGRESS_THROTTLE,
};
use crate::io::error::{Result, invalid_parameter};
use crate::math::combinatorics::{Combinations, binomial};
use crate::math::probability::progress_percent;
use crate::spatial::{LevelGrid, compute_neighbors};

// Leaves between cancellation checks inside the innermost loop
const CANCEL_CHECK_MASK: u64 = 0xFFF;

/// Number of bombs of each kind to place
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BombBudget {
    /// Normal bombs, +1 per open neighbour
    pub normal: usize,
    /// Power bombs, +2 per open neighbour
    pub power: usize,
    /// Negative bombs, −1 per open neighbour
    pub negative: usize,
}

impl BombBudget {
    /// Bombs placed per leaf
    pub const fn total(&self) -> usize {
        self.normal + self.power + self.negative
    }
}

/// Complete input of one solve
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveRequest {
    /// Grid rows
    pub rows: usize,
    /// Grid columns
    pub cols: usize,
    /// Permanently blocked cells
    #[serde(default)]
    pub blocks: Vec<usize>,
    /// Cells that always hold a normal bomb
    #[serde(default)]
    pub forced_bombs: Vec<usize>,
    /// Switch cells, in branch-bit order
    #[serde(default)]
    pub switches: Vec<usize>,
    /// Normal bombs to place
    #[serde(default)]
    pub normal_count: usize,
    /// Power bombs to place
    #[serde(default)]
    pub power_count: usize,
    /// Negative bombs to place
    #[serde(default)]
    pub negative_count: usize,
    /// Lowest in-range score, inclusive
    #[serde(default = "unbounded_min")]
    pub score_min: i64,
    /// Highest in-range score, inclusive
    #[serde(default = "unbounded_max")]
    pub score_max: i64,
    /// Ordinary solutions kept in the result
    #[serde(default = "default_retained")]
    pub max_retained_solutions: usize,
    /// Ceiling on recorded in-range placements
    #[serde(default = "default_cap")]
    pub max_enumerated_cap: u64,
    /// Up to three star conditions
    #[serde(default, with = "star_slots")]
    pub star_conditions: StarSlots,
    /// Collect per-cell value statistics even without conditions
    #[serde(default)]
    pub analyze_cell_values: bool,
}

const fn unbounded_min() -> i64 {
    i64::MIN
}

const fn unbounded_max() -> i64 {
    i64::MAX
}

const fn default_retained() -> usize {
    DEFAULT_MAX_RETAINED_SOLUTIONS
}

const fn default_cap() -> u64 {
    DEFAULT_MAX_ENUMERATED
}

impl SolveRequest {
    /// Request for an empty grid with no bombs and default limits
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            blocks: Vec::new(),
            forced_bombs: Vec::new(),
            switches: Vec::new(),
            normal_count: 0,
            power_count: 0,
            negative_count: 0,
            score_min: i64::MIN,
            score_max: i64::MAX,
            max_retained_solutions: DEFAULT_MAX_RETAINED_SOLUTIONS,
            max_enumerated_cap: DEFAULT_MAX_ENUMERATED,
            star_conditions: StarSlots::default(),
            analyze_cell_values: false,
        }
    }

    /// Bomb counts as a budget
    pub const fn budget(&self) -> BombBudget {
        BombBudget {
            normal: self.normal_count,
            power: self.power_count,
            negative: self.negative_count,
        }
    }

    /// Validated grid described by this request
    ///
    /// # Errors
    ///
    /// Returns an error if a cell id is out of range or claimed twice
    pub fn grid(&self) -> Result<LevelGrid> {
        LevelGrid::new(
            self.rows,
            self.cols,
            &self.blocks,
            &self.switches,
            &self.forced_bombs,
        )
    }

    /// Whether the score range admits every score
    pub const fn is_unbounded(&self) -> bool {
        self.score_min == i64::MIN && self.score_max == i64::MAX
    }
}

/// Size of the full unfiltered search space
///
/// Sums `C(S,x) · C(M−x,N1) · C(M−x−N1,N2) · C(M−x−N1−N2,N3)` over the number
/// `x` of closed switches, where `M` is the free pool with every switch open.
/// Zero when the pool cannot hold the budget.
pub fn estimate_total_combinations(
    available_cells: usize,
    switch_count: usize,
    budget: &BombBudget,
) -> BigUint {
    if available_cells < budget.total() {
        return BigUint::zero();
    }

    let m = available_cells as i64;
    let s = switch_count as i64;
    let n1 = budget.normal as i64;
    let n2 = budget.power as i64;
    let n3 = budget.negative as i64;

    (0..=s)
        .map(|x| {
            binomial(s, x)
                * binomial(m - x, n1)
                * binomial(m - x - n1, n2)
                * binomial(m - x - n1 - n2, n3)
        })
        .sum()
}

/// Progress notification from a running solve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveEvent<'a> {
    /// Analytical search-space size, emitted once before enumeration
    Estimate(&'a BigUint),
    /// Processed share of the search space in percent
    Progress(u8),
}

/// Rate-limited progress counter
struct ProgressTracker<'a> {
    estimated: &'a BigUint,
    processed: BigUint,
    last_emit: Instant,
}

impl<'a> ProgressTracker<'a> {
    fn new(estimated: &'a BigUint) -> Self {
        Self {
            estimated,
            processed: BigUint::zero(),
            last_emit: Instant::now(),
        }
    }

    fn advance(&mut self, leaves: BigUint) -> Option<u8> {
        self.processed += leaves;
        if self.last_emit.elapsed() < PROGRESS_THROTTLE {
            return None;
        }
        self.last_emit = Instant::now();
        Some(progress_percent(&self.processed, self.estimated))
    }
}

/// Enumeration engine for one validated request
#[derive(Debug, Clone)]
pub struct Solver {
    request: SolveRequest,
    grid: LevelGrid,
    cancellation: Option<CancellationToken>,
}

impl Solver {
    /// Validate a request and prepare a solver for it
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is invalid or the score range is inverted
    pub fn new(request: SolveRequest) -> Result<Self> {
        let grid = request.grid()?;
        if request.score_min > request.score_max {
            return Err(invalid_parameter(
                "scoreMin",
                &request.score_min,
                &format!("must not exceed scoreMax ({})", request.score_max),
            ));
        }
        Ok(Self {
            request,
            grid,
            cancellation: None,
        })
    }

    /// Stop early when `token` fires
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// The request being solved
    pub const fn request(&self) -> &SolveRequest {
        &self.request
    }

    /// The validated grid
    pub const fn grid(&self) -> &LevelGrid {
        &self.grid
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    /// Enumerate every placement and aggregate the in-range ones
    ///
    /// Emits one [`SolveEvent::Estimate`] first, then throttled
    /// [`SolveEvent::Progress`] updates. A cancelled run returns the partial
    /// statistics with [`Termination::Cancelled`].
    pub fn run<F>(&self, mut on_event: F) -> AggregateStatistics
    where
        F: FnMut(SolveEvent<'_>),
    {
        let grid = &self.grid;
        let request = &self.request;
        let budget = request.budget();
        let available = grid.available_cells();
        let switches = grid.switches();

        let estimated = estimate_total_combinations(available, switches.len(), &budget);
        debug!(
            "Solver inputs: M={available}, S={}, N1={}, N2={}, N3={}",
            switches.len(),
            budget.normal,
            budget.power,
            budget.negative
        );
        info!("Estimated combinations: {estimated}");
        on_event(SolveEvent::Estimate(&estimated));

        let mut stats = AggregateStatistics::new(
            grid.rows(),
            grid.cols(),
            switches,
            estimated.clone(),
        );
        let mut tracker = SolutionTracker::new(request.max_retained_solutions);

        let termination = if available < budget.total() {
            debug!("Free pool of {available} cells cannot hold {} bombs", budget.total());
            Termination::Completed
        } else {
            self.enumerate(&estimated, &mut stats, &mut tracker, &mut on_event)
        };

        match termination {
            Termination::Completed => on_event(SolveEvent::Progress(100)),
            Termination::Capped => {
                warn!(
                    "Analysis cap of {} reached, statistics are partial",
                    request.max_enumerated_cap
                );
                on_event(SolveEvent::Progress(100));
            }
            Termination::Cancelled => debug!("Solve cancelled"),
        }

        stats.retained_solutions = tracker.into_solutions();
        stats.termination = termination;
        stats
    }

    fn enumerate<F>(
        &self,
        estimated: &BigUint,
        stats: &mut AggregateStatistics,
        tracker: &mut SolutionTracker,
        on_event: &mut F,
    ) -> Termination
    where
        F: FnMut(SolveEvent<'_>),
    {
        let grid = &self.grid;
        let request = &self.request;
        let budget = request.budget();
        let forced = grid.forced_bombs();
        let slots = &request.star_conditions;
        let has_conditions = configured_count(slots) > 0;
        let needs_values = has_conditions || request.analyze_cell_values;

        let mut scorer = Scorer::new(grid.total_cells(), forced);
        let mut progress = ProgressTracker::new(estimated);
        let mut leaves: u64 = 0;
        let branch_count: u64 = 1 << grid.switches().len();

        for mask in 0..branch_count {
            if self.is_cancelled() {
                return Termination::Cancelled;
            }

            let closed = grid.closed_switches(mask);
            let blocked = grid.blocked_cells(&closed);
            let adjacency = compute_neighbors(grid.rows(), grid.cols(), &blocked);
            let pool = grid.placement_pool(&blocked);
            if pool.len() < budget.total() {
                continue;
            }

            for normal in Combinations::new(&pool, budget.normal) {
                let after_normal = without(&pool, &normal);

                for power in Combinations::new(&after_normal, budget.power) {
                    let after_power = without(&after_normal, &power);

                    let branch_leaves =
                        binomial(after_power.len() as i64, budget.negative as i64);
                    if let Some(percent) = progress.advance(branch_leaves) {
                        on_event(SolveEvent::Progress(percent));
                    }
                    if self.is_cancelled() {
                        return Termination::Cancelled;
                    }

                    for negative in Combinations::new(&after_power, budget.negative) {
                        leaves += 1;
                        if leaves & CANCEL_CHECK_MASK == 0 && self.is_cancelled() {
                            return Termination::Cancelled;
                        }

                        let score = scorer.score(&adjacency, &normal, &power, &negative);
                        if score < request.score_min || score > request.score_max {
                            continue;
                        }
                        if stats.total_enumerated >= request.max_enumerated_cap {
                            return Termination::Capped;
                        }

                        stats.record_placement(score, forced, &normal, &power, &negative);
                        stats.record_switches(&closed);

                        let mut status = [false; 3];
                        if needs_values {
                            let card =
                                scorer.score_with_values(&adjacency, &normal, &power, &negative);
                            stats.record_cell_values(&card);

                            if has_conditions {
                                let ctx = ConditionContext {
                                    score,
                                    occupied: scorer.occupied(),
                                    cell_values: &card.cell_values,
                                    empty_cells: card.empty_cells(),
                                    closed_switches: &closed,
                                };
                                for (satisfied, slot) in status.iter_mut().zip(slots) {
                                    *satisfied = evaluate(slot.as_ref(), &ctx);
                                }
                            }
                        }
                        stats.record_conditions(status);

                        let perfect = status.iter().all(|&satisfied| satisfied);
                        if tracker.accepts(perfect) {
                            tracker.add(
                                SolutionRecord {
                                    normal_bombs: normal.clone(),
                                    power_bombs: power.clone(),
                                    negative_bombs: negative,
                                    score,
                                    condition_status: status,
                                    closed_switches: closed.clone(),
                                },
                                perfect,
                            );
                        }
                    }
                }
            }
        }

        Termination::Completed
    }
}

/// Items of `pool` not present in `chosen`, keeping order
fn without(pool: &[usize], chosen: &[usize]) -> Vec<usize> {
    pool.iter()
        .copied()
        .filter(|cell| !chosen.contains(cell))
        .collect()
}
