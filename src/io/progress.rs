//! Terminal progress display for solves and generation runs

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use num_bigint::BigUint;
use std::sync::LazyLock;

use crate::builder::generation::AttemptPhase;
use crate::io::configuration::PROGRESS_BAR_WIDTH;
use crate::io::wire::SolverMessage;

static SOLVE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "{{msg}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos:>3}}% {{prefix}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static LEVEL_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Levels: [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Coordinates the solve bar and the accepted-levels bar
pub struct ProgressManager {
    multi_progress: MultiProgress,
    solve_bar: ProgressBar,
    level_bar: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a manager with an idle solve bar
    pub fn new() -> Self {
        let multi_progress = MultiProgress::new();
        let solve_bar = multi_progress.add(ProgressBar::new(100));
        solve_bar.set_style(SOLVE_STYLE.clone());
        Self {
            multi_progress,
            solve_bar,
            level_bar: None,
        }
    }

    /// Show a bar counting accepted levels up to `target`
    pub fn track_levels(&mut self, target: usize) {
        let bar = ProgressBar::new(target as u64);
        bar.set_style(LEVEL_STYLE.clone());
        self.level_bar = Some(self.multi_progress.insert(0, bar));
    }

    /// Reset the solve bar for a new solve
    pub fn start_solve(&self, label: &str) {
        self.solve_bar.set_position(0);
        self.solve_bar.set_message(label.to_string());
        self.solve_bar.set_prefix(String::new());
    }

    /// Show the attempt and stage currently running
    pub fn set_phase(&self, attempt: usize, phase: AttemptPhase) {
        self.start_solve(&format!("#{attempt} {phase}"));
    }

    /// Show the size of the search space
    pub fn set_estimate(&self, total: &BigUint) {
        self.solve_bar.set_prefix(format!("of {total} combinations"));
    }

    /// Move the solve bar
    pub fn set_percent(&self, percent: u8) {
        self.solve_bar.set_position(u64::from(percent.min(100)));
    }

    /// Apply a solver message to the solve bar
    pub fn handle_message(&self, message: &SolverMessage) {
        match message {
            SolverMessage::Estimate { total_combinations } => self.set_estimate(total_combinations),
            SolverMessage::Progress { percent } => self.set_percent(*percent),
            SolverMessage::Done(_) => self.set_percent(100),
            SolverMessage::Error { message } => {
                self.solve_bar.set_message(format!("failed: {message}"));
            }
        }
    }

    /// Count one accepted level
    pub fn level_accepted(&self, win_rate: f64) {
        if let Some(ref bar) = self.level_bar {
            bar.inc(1);
            bar.set_message(format!("last win rate {win_rate:.2}%"));
        }
    }

    /// Clear every bar
    pub fn finish(&self) {
        self.solve_bar.finish_and_clear();
        if let Some(ref bar) = self.level_bar {
            bar.finish_with_message("done");
        }
        let _ = self.multi_progress.clear();
    }
}
