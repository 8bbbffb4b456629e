//! Closed-loop level generation tuned to a win-rate window
//!
//! Each attempt draws a random configuration, solves it in full, picks the
//! score range whose share of the search space fits the window, attaches star
//! conditions, and solves again to verify. Attempts repeat until enough
//! levels are accepted or the run is cancelled.

use log::{info, warn};
use num_bigint::BigUint;
use num_traits::Zero;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;
use std::thread;
use std::time::{Duration, Instant};

use crate::algorithm::conditions::StarSlots;
use crate::algorithm::solver::SolveRequest;
use crate::algorithm::worker::{CancellationToken, WorkerManager};
use crate::analysis::selection::{TargetRange, select_target};
use crate::analysis::statistics::AggregateStatistics;
use crate::builder::config_generator::generate_config;
use crate::builder::settings::BuilderSettings;
use crate::builder::star_conditions::generate_conditions;
use crate::io::error::{MinesetterError, Result};
use crate::io::wire::SolverMessage;
use crate::math::probability::win_rate_percent;

/// Stage of one generation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptPhase {
    /// Drawing a random configuration
    GeneratingBaseConfig,
    /// Solving with an unbounded score range
    FullScan,
    /// Choosing the target score range
    SelectingTarget,
    /// Solving the final configuration
    Verifying,
}

impl fmt::Display for AttemptPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::GeneratingBaseConfig => "generating",
            Self::FullScan => "full scan",
            Self::SelectingTarget => "selecting target",
            Self::Verifying => "verifying",
        };
        f.write_str(label)
    }
}

/// Why an attempt produced no level
#[derive(Debug, Clone, PartialEq)]
pub enum RejectReason {
    /// The full scan found no placement at all
    NoSolutions,
    /// No score range fits the win-rate window
    NoTargetRange,
    /// Verification found no placement in the target range
    NoValidSolutions,
    /// Verified win rate fell outside the window
    WinRateOutOfRange {
        /// Measured win rate in percent
        win_rate: f64,
    },
    /// A solve failed
    SolveFailed {
        /// Failure description
        message: String,
    },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSolutions => write!(f, "no solutions found in full scan"),
            Self::NoTargetRange => write!(f, "no suitable target found"),
            Self::NoValidSolutions => write!(f, "no solutions in target range"),
            Self::WinRateOutOfRange { win_rate } => {
                write!(f, "win rate {win_rate:.2}% outside the requested window")
            }
            Self::SolveFailed { message } => write!(f, "solve failed: {message}"),
        }
    }
}

/// A configuration that passed verification
#[derive(Debug, Clone)]
pub struct GeneratedLevel {
    /// Attempt number that produced the level, starting at 1
    pub attempt: usize,
    /// Final configuration with target range and star conditions
    pub request: SolveRequest,
    /// Verification statistics
    pub statistics: AggregateStatistics,
    /// Target chosen from the full scan
    pub target: TargetRange,
    /// Verified win rate in percent
    pub win_rate: f64,
}

/// Notification from the generation loop
#[derive(Debug, Clone, Copy)]
pub enum BuilderEvent<'a> {
    /// A new attempt drew its base configuration
    AttemptStarted {
        /// Attempt number
        attempt: usize,
        /// Base configuration
        request: &'a SolveRequest,
    },
    /// The attempt moved to another stage
    Phase {
        /// Attempt number
        attempt: usize,
        /// New stage
        phase: AttemptPhase,
    },
    /// Progress message from the running solve
    Solver(&'a SolverMessage),
    /// A target score range was chosen
    TargetChosen {
        /// Attempt number
        attempt: usize,
        /// Chosen range
        target: TargetRange,
    },
    /// Star conditions were generated
    ConditionsChosen {
        /// Attempt number
        attempt: usize,
        /// Generated slots
        conditions: &'a StarSlots,
    },
    /// Verification finished
    Verified {
        /// Attempt number
        attempt: usize,
        /// Placements in the target range
        valid: u64,
        /// Size of the full search space
        total: &'a BigUint,
        /// Measured win rate in percent
        win_rate: f64,
    },
    /// A level was accepted
    Accepted(&'a GeneratedLevel),
    /// The attempt was rejected
    Rejected {
        /// Attempt number
        attempt: usize,
        /// Why
        reason: &'a RejectReason,
    },
}

/// Outcome of a generation run
#[derive(Debug, Clone)]
pub struct BuildSummary {
    /// Attempts started
    pub attempts: usize,
    /// Accepted levels in acceptance order
    pub levels: Vec<GeneratedLevel>,
    /// Wall time of the run
    pub elapsed: Duration,
    /// Whether the run stopped on cancellation
    pub cancelled: bool,
}

enum AttemptOutcome {
    Accepted(Box<GeneratedLevel>),
    Rejected(RejectReason),
}

/// Win-rate driven level generator
#[derive(Debug)]
pub struct AiBuilder {
    settings: BuilderSettings,
    rng: StdRng,
    workers: WorkerManager,
    cancel: CancellationToken,
}

impl AiBuilder {
    /// Create a builder after validating its settings
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are malformed or their minimums
    /// cannot fit the largest grid
    pub fn new(settings: BuilderSettings, seed: u64) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            rng: StdRng::seed_from_u64(seed),
            workers: WorkerManager::new(),
            cancel: CancellationToken::new(),
        })
    }

    /// Settings in use
    pub const fn settings(&self) -> &BuilderSettings {
        &self.settings
    }

    /// Token that stops the loop and any in-flight solve
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run attempts until `stop_after` levels are accepted
    ///
    /// Also stops on cancellation or after `max_attempts`. Solve failures
    /// reject the attempt and the loop continues.
    pub fn run<F>(&mut self, mut observer: F) -> BuildSummary
    where
        F: FnMut(BuilderEvent<'_>),
    {
        let start = Instant::now();
        let mut attempts = 0;
        let mut levels = Vec::new();
        let mut cancelled = false;

        info!(
            "Engine started, target win rate {}% - {}%",
            self.settings.min_win_percent, self.settings.max_win_percent
        );

        while levels.len() < self.settings.stop_after {
            if self.cancel.is_cancelled() {
                cancelled = true;
                break;
            }
            if let Some(limit) = self.settings.max_attempts
                && attempts >= limit
            {
                warn!("Giving up after {attempts} attempts");
                break;
            }
            attempts += 1;

            let reason = match self.attempt(attempts, &mut observer) {
                Ok(AttemptOutcome::Accepted(level)) => {
                    info!(
                        "Attempt #{attempts} accepted: target [{}, {}], win rate {:.2}%",
                        level.target.min, level.target.max, level.win_rate
                    );
                    observer(BuilderEvent::Accepted(&level));
                    levels.push(*level);
                    thread::yield_now();
                    continue;
                }
                Ok(AttemptOutcome::Rejected(reason)) => reason,
                Err(MinesetterError::Cancelled) => {
                    cancelled = true;
                    break;
                }
                Err(err) => RejectReason::SolveFailed {
                    message: err.to_string(),
                },
            };

            warn!("Attempt #{attempts} rejected: {reason}");
            observer(BuilderEvent::Rejected {
                attempt: attempts,
                reason: &reason,
            });
            thread::yield_now();
        }

        self.workers.terminate();
        let elapsed = start.elapsed();
        info!(
            "Found {} level(s) in {attempts} attempts, {:.1}s",
            levels.len(),
            elapsed.as_secs_f64()
        );

        BuildSummary {
            attempts,
            levels,
            elapsed,
            cancelled,
        }
    }

    fn attempt<F>(&mut self, attempt: usize, observer: &mut F) -> Result<AttemptOutcome>
    where
        F: FnMut(BuilderEvent<'_>),
    {
        observer(BuilderEvent::Phase {
            attempt,
            phase: AttemptPhase::GeneratingBaseConfig,
        });
        let base = generate_config(&self.settings, &mut self.rng);
        observer(BuilderEvent::AttemptStarted {
            attempt,
            request: &base,
        });

        observer(BuilderEvent::Phase {
            attempt,
            phase: AttemptPhase::FullScan,
        });
        let full_scan = self.workers.run(base.clone(), &self.cancel, |message| {
            observer(BuilderEvent::Solver(message));
        })?;

        let total = full_scan.estimated_total_combinations.clone();
        if total.is_zero() || full_scan.score_histogram.is_empty() {
            return Ok(AttemptOutcome::Rejected(RejectReason::NoSolutions));
        }

        observer(BuilderEvent::Phase {
            attempt,
            phase: AttemptPhase::SelectingTarget,
        });
        let Some(target) = select_target(
            &full_scan.score_histogram,
            &total,
            self.settings.min_win_percent,
            self.settings.max_win_percent,
        ) else {
            return Ok(AttemptOutcome::Rejected(RejectReason::NoTargetRange));
        };
        observer(BuilderEvent::TargetChosen { attempt, target });

        let mut request = base;
        request.score_min = target.min;
        request.score_max = target.max;
        request.analyze_cell_values = false;
        request.star_conditions =
            generate_conditions(&self.settings, &request, &full_scan, &mut self.rng);
        observer(BuilderEvent::ConditionsChosen {
            attempt,
            conditions: &request.star_conditions,
        });

        observer(BuilderEvent::Phase {
            attempt,
            phase: AttemptPhase::Verifying,
        });
        let statistics = self.workers.run(request.clone(), &self.cancel, |message| {
            observer(BuilderEvent::Solver(message));
        })?;

        let valid = statistics.total_enumerated;
        let win_rate = win_rate_percent(&BigUint::from(valid), &total);
        observer(BuilderEvent::Verified {
            attempt,
            valid,
            total: &total,
            win_rate,
        });

        if valid == 0 {
            return Ok(AttemptOutcome::Rejected(RejectReason::NoValidSolutions));
        }
        if win_rate < self.settings.min_win_percent || win_rate > self.settings.max_win_percent {
            return Ok(AttemptOutcome::Rejected(RejectReason::WinRateOutOfRange {
                win_rate,
            }));
        }

        Ok(AttemptOutcome::Accepted(Box::new(GeneratedLevel {
            attempt,
            request,
            statistics,
            target,
            win_rate,
        })))
    }
}
