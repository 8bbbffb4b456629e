//! Command-line interface for solving levels and generating new ones

use clap::{ArgAction, Parser, Subcommand};
use log::{LevelFilter, info};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::algorithm::worker::SolveWorker;
use crate::analysis::statistics::AggregateStatistics;
use crate::builder::generation::{AiBuilder, BuildSummary, BuilderEvent};
use crate::builder::settings::BuilderSettings;
use crate::io::configuration::{DEFAULT_OUTPUT_DIR, DEFAULT_SEED, LEVEL_FILE_PREFIX, REPORT_SUFFIX};
use crate::io::error::{Result, WithPath};
use crate::io::level::{LevelFile, load_request, write_json};
use crate::io::progress::ProgressManager;

#[derive(Parser)]
#[command(name = "minesetter")]
#[command(
    author,
    version,
    about = "Solve bomb-placement puzzle levels and generate new ones for a target win rate"
)]
/// Command-line arguments for the solver and level generator
pub struct Cli {
    /// Operation to run
    #[command(subcommand)]
    pub command: Command,

    /// Increase log detail (repeatable)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress output and informational logs
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Enumerate every placement of a level and print its statistics
    Solve {
        /// Level document or raw solve request (JSON)
        #[arg(value_name = "LEVEL")]
        input: PathBuf,

        /// Solutions to retain
        #[arg(long)]
        max_solutions: Option<usize>,

        /// Stop after this many in-range placements
        #[arg(long)]
        cap: Option<u64>,

        /// Collect per-cell value statistics
        #[arg(long)]
        analyze_cells: bool,

        /// Write the full statistics as JSON, next to LEVEL when FILE is omitted
        #[arg(long, value_name = "FILE")]
        report: Option<Option<PathBuf>>,
    },

    /// Generate levels whose win rate falls in a window
    Generate {
        /// Builder settings (JSON); defaults when omitted
        #[arg(long, value_name = "FILE")]
        settings: Option<PathBuf>,

        /// Random seed for reproducible generation
        #[arg(short, long, default_value_t = DEFAULT_SEED)]
        seed: u64,

        /// Accepted levels to produce
        #[arg(long)]
        stop_after: Option<usize>,

        /// Lowest acceptable win rate in percent
        #[arg(long)]
        min_win: Option<f64>,

        /// Highest acceptable win rate in percent
        #[arg(long)]
        max_win: Option<f64>,

        /// Give up after this many attempts
        #[arg(long)]
        max_attempts: Option<usize>,

        /// Directory for generated level files
        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,
    },
}

impl Cli {
    /// Log level implied by the verbosity flags
    pub const fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Warn;
        }
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Runs the selected subcommand with progress display
pub struct CommandRunner {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl CommandRunner {
    /// Create a runner for parsed arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);
        Self {
            cli,
            progress_manager,
        }
    }

    /// Execute the subcommand
    ///
    /// # Errors
    ///
    /// Returns an error if input cannot be loaded, a solve fails, settings
    /// are infeasible, or output cannot be written
    pub fn run(&mut self) -> Result<()> {
        let outcome = match &self.cli.command {
            Command::Solve {
                input,
                max_solutions,
                cap,
                analyze_cells,
                report,
            } => {
                let report = report
                    .as_ref()
                    .map(|path| path.clone().unwrap_or_else(|| report_path(input)));
                self.solve(input, *max_solutions, *cap, *analyze_cells, report.as_deref())
            }
            Command::Generate {
                settings,
                seed,
                stop_after,
                min_win,
                max_win,
                max_attempts,
                output_dir,
            } => {
                let mut builder_settings = match settings {
                    Some(path) => BuilderSettings::load(path)?,
                    None => BuilderSettings::default(),
                };
                if let Some(stop_after) = stop_after {
                    builder_settings.stop_after = *stop_after;
                }
                if let Some(min_win) = min_win {
                    builder_settings.min_win_percent = *min_win;
                }
                if let Some(max_win) = max_win {
                    builder_settings.max_win_percent = *max_win;
                }
                if max_attempts.is_some() {
                    builder_settings.max_attempts = *max_attempts;
                }
                let seed = *seed;
                let output_dir = output_dir.clone();
                self.generate(builder_settings, seed, &output_dir)
            }
        };

        if outcome.is_err()
            && let Some(ref pm) = self.progress_manager
        {
            pm.finish();
        }
        outcome
    }

    fn solve(
        &self,
        input: &Path,
        max_solutions: Option<usize>,
        cap: Option<u64>,
        analyze_cells: bool,
        report: Option<&Path>,
    ) -> Result<()> {
        let mut request = load_request(input)?;
        if let Some(max_solutions) = max_solutions {
            request.max_retained_solutions = max_solutions;
        }
        if let Some(cap) = cap {
            request.max_enumerated_cap = cap;
        }
        request.analyze_cell_values |= analyze_cells;

        if let Some(ref pm) = self.progress_manager {
            pm.start_solve(&input.file_name().unwrap_or_default().to_string_lossy());
        }

        let handle = SolveWorker::spawn(request)?;
        let stats = handle.wait(|message| {
            if let Some(ref pm) = self.progress_manager {
                pm.handle_message(message);
            }
        })?;

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }
        write_solve_summary(&mut io::stdout().lock(), &stats)?;

        if let Some(path) = report {
            write_json(&stats, path)?;
            info!("Report written to {}", path.display());
        }
        Ok(())
    }

    fn generate(&mut self, settings: BuilderSettings, seed: u64, output_dir: &Path) -> Result<()> {
        let stop_after = settings.stop_after;
        let mut builder = AiBuilder::new(settings, seed)?;
        fs::create_dir_all(output_dir).with_path(output_dir, "create output directory")?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.track_levels(stop_after);
        }

        let progress = self.progress_manager.as_ref();
        let summary = builder.run(|event| {
            let Some(pm) = progress else { return };
            match event {
                BuilderEvent::Phase { attempt, phase } => pm.set_phase(attempt, phase),
                BuilderEvent::Solver(message) => pm.handle_message(message),
                BuilderEvent::Accepted(level) => pm.level_accepted(level.win_rate),
                _ => {}
            }
        });

        for (index, level) in summary.levels.iter().enumerate() {
            let name = level_name(seed, index);
            let path = output_dir.join(format!("{name}.json"));
            LevelFile::from_generated(&name, level).write(&path)?;
            info!("Level written to {}", path.display());
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }
        write_build_summary(&mut io::stdout().lock(), &summary)
    }
}

/// File stem of the `index`-th level generated with `seed`
pub fn level_name(seed: u64, index: usize) -> String {
    format!("{LEVEL_FILE_PREFIX}_{seed}_{:03}", index + 1)
}

/// Default report path next to a level file
pub fn report_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default();
    let report_name = format!("{}{REPORT_SUFFIX}.json", stem.to_string_lossy());

    if let Some(parent) = input.parent() {
        parent.join(report_name)
    } else {
        PathBuf::from(report_name)
    }
}

/// Write a human-readable solve summary
///
/// # Errors
///
/// Returns an error if writing to `out` fails
pub fn write_solve_summary<W: Write>(out: &mut W, stats: &AggregateStatistics) -> Result<()> {
    let tally = &stats.condition_tally;
    writeln!(out, "Total combinations: {}", stats.estimated_total_combinations)?;
    writeln!(
        out,
        "Enumerated: {} ({:?})",
        stats.total_enumerated, stats.termination
    )?;
    writeln!(out, "Win rate: {:.2}%", stats.win_rate_percent())?;
    if let Some((low, high)) = stats.score_bounds() {
        writeln!(out, "Score range: {low} to {high}")?;
    }
    writeln!(
        out,
        "Conditions: C1={} C2={} C3={} all={} none={}",
        tally.satisfied(0),
        tally.satisfied(1),
        tally.satisfied(2),
        tally.c1_c2_c3,
        tally.none
    )?;
    writeln!(out, "Retained solutions: {}", stats.retained_solutions.len())?;
    Ok(())
}

/// Write a human-readable generation summary
///
/// # Errors
///
/// Returns an error if writing to `out` fails
pub fn write_build_summary<W: Write>(out: &mut W, summary: &BuildSummary) -> Result<()> {
    writeln!(
        out,
        "Found {} level(s) in {} attempt(s), {:.1}s{}",
        summary.levels.len(),
        summary.attempts,
        summary.elapsed.as_secs_f64(),
        if summary.cancelled { " (cancelled)" } else { "" }
    )?;
    for level in &summary.levels {
        writeln!(
            out,
            "  attempt #{}: {}x{} target [{}, {}] win rate {:.2}%",
            level.attempt,
            level.request.cols,
            level.request.rows,
            level.target.min,
            level.target.max,
            level.win_rate
        )?;
    }
    Ok(())
}
