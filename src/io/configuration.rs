//! Solver and builder constants and runtime configuration defaults

use std::time::Duration;

// Solver limits
/// Default number of solutions kept in a solve result
pub const DEFAULT_MAX_RETAINED_SOLUTIONS: usize = 5_000;

/// Default ceiling on in-range placements counted by one solve
pub const DEFAULT_MAX_ENUMERATED: u64 = 100_000_000;

/// Number of star-condition slots a level carries
pub const STAR_SLOT_COUNT: usize = 3;

// Progress reporting
/// Minimum interval between two progress messages
pub const PROGRESS_THROTTLE: Duration = Duration::from_millis(100);

/// How long a waiting caller blocks before rechecking its cancellation token
pub const WORKER_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 50;

// Builder heuristics
/// Hard ceiling on switches in a generated level
pub const MAX_GENERATED_SWITCHES: usize = 5;

/// Largest share of the structural budget one category may take
pub const CATEGORY_SHARE_LIMIT: f64 = 0.6;

/// Fraction of the grid that blocks, switches and forced bombs may fill together
pub const STRUCTURAL_BUDGET_RATIO: f64 = 0.5;

// Conditions satisfied this often are too easy to be worth a star
/// Upper bound, in percent, on how often a generated condition may hold
pub const TRIVIAL_CONDITION_PERCENT: f64 = 50.0;

/// Generation attempts allowed per candidate condition kind
pub const CONDITION_ATTEMPTS_PER_KIND: usize = 3;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default number of accepted levels before the builder stops
pub const DEFAULT_STOP_AFTER: usize = 1;

// Output settings
/// Default directory for generated level files
pub const DEFAULT_OUTPUT_DIR: &str = "levels";

/// Prefix of generated level file names
pub const LEVEL_FILE_PREFIX: &str = "level";

/// Suffix added to solve report file names
pub const REPORT_SUFFIX: &str = "_report";
