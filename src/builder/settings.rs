//! Builder settings: ranges the generator draws from and acceptance criteria

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::algorithm::conditions::ConditionKind;
use crate::io::configuration::{
    DEFAULT_MAX_ENUMERATED, DEFAULT_MAX_RETAINED_SOLUTIONS, DEFAULT_STOP_AFTER,
};
use crate::io::error::{MinesetterError, Result, WithPath, invalid_parameter};

/// Inclusive range of counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    /// Smallest allowed count
    pub min: usize,
    /// Largest allowed count
    pub max: usize,
}

impl CountRange {
    /// Range from `min` to `max`, inclusive
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Range containing only `count`
    pub const fn exactly(count: usize) -> Self {
        Self {
            min: count,
            max: count,
        }
    }

    /// Draw a count uniformly from the range
    pub fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        if self.max <= self.min {
            return self.min;
        }
        rng.random_range(self.min..=self.max)
    }

    fn validate(&self, parameter: &'static str) -> Result<()> {
        if self.min > self.max {
            return Err(invalid_parameter(
                parameter,
                &format!("{}..={}", self.min, self.max),
                &"minimum exceeds maximum",
            ));
        }
        Ok(())
    }
}

/// Everything the generation loop needs to know
///
/// Categories set to `None` are disabled and always get zero elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuilderSettings {
    /// Grid width range
    pub grid_columns: CountRange,
    /// Grid height range
    pub grid_rows: CountRange,
    /// Permanent block count range
    pub blocks: Option<CountRange>,
    /// Switch count range
    pub switches: Option<CountRange>,
    /// Forced bomb count range
    pub forced_bombs: Option<CountRange>,
    /// Normal bomb count range
    pub normal_bombs: Option<CountRange>,
    /// Power bomb count range
    pub power_bombs: Option<CountRange>,
    /// Negative bomb count range
    pub negative_bombs: Option<CountRange>,
    /// Analysis cap passed to every solve
    pub analysis_limit: u64,
    /// Solutions retained per solve
    pub max_retained_solutions: usize,
    /// Lowest acceptable win rate in percent
    pub min_win_percent: f64,
    /// Highest acceptable win rate in percent
    pub max_win_percent: f64,
    /// Accepted levels after which the loop stops
    pub stop_after: usize,
    /// Star condition kinds the generator may use
    pub allowed_conditions: Vec<ConditionKind>,
    /// Attempts after which the loop gives up
    pub max_attempts: Option<usize>,
}

impl Default for BuilderSettings {
    fn default() -> Self {
        Self {
            grid_columns: CountRange::new(4, 5),
            grid_rows: CountRange::new(4, 5),
            blocks: Some(CountRange::new(0, 2)),
            switches: Some(CountRange::new(0, 1)),
            forced_bombs: None,
            normal_bombs: Some(CountRange::new(2, 3)),
            power_bombs: Some(CountRange::new(0, 1)),
            negative_bombs: None,
            analysis_limit: DEFAULT_MAX_ENUMERATED,
            max_retained_solutions: DEFAULT_MAX_RETAINED_SOLUTIONS,
            min_win_percent: 10.0,
            max_win_percent: 30.0,
            stop_after: DEFAULT_STOP_AFTER,
            allowed_conditions: ConditionKind::ALL.to_vec(),
            max_attempts: None,
        }
    }
}

impl BuilderSettings {
    /// Load settings from a JSON file; absent fields take their defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).with_path(path, "read settings")?;
        serde_json::from_str(&text).with_path(path, "parse settings")
    }

    /// Whether a star condition kind may be generated
    pub fn allows(&self, kind: ConditionKind) -> bool {
        self.allowed_conditions.contains(&kind)
    }

    /// Check every range before any work is spent
    ///
    /// # Errors
    ///
    /// Returns [`MinesetterError::InfeasibleConfiguration`] when the summed
    /// minimums cannot fit the largest grid, or an invalid parameter error
    /// for malformed ranges
    pub fn validate(&self) -> Result<()> {
        self.grid_columns.validate("gridColumns")?;
        self.grid_rows.validate("gridRows")?;
        if self.grid_columns.min == 0 || self.grid_rows.min == 0 {
            return Err(invalid_parameter(
                "grid",
                &format!("{}x{}", self.grid_columns.min, self.grid_rows.min),
                &"grid dimensions must be at least 1",
            ));
        }

        let categories = [
            ("normalBombs", self.normal_bombs),
            ("powerBombs", self.power_bombs),
            ("negativeBombs", self.negative_bombs),
            ("blocks", self.blocks),
            ("switches", self.switches),
            ("forcedBombs", self.forced_bombs),
        ];
        let mut required = 0;
        for (name, range) in categories {
            if let Some(range) = range {
                range.validate(name)?;
                required += range.min;
            }
        }

        if !(0.0..=100.0).contains(&self.min_win_percent) {
            return Err(invalid_parameter(
                "minWinPercent",
                &self.min_win_percent,
                &"must lie within 0..=100",
            ));
        }
        if !(0.0..=100.0).contains(&self.max_win_percent) {
            return Err(invalid_parameter(
                "maxWinPercent",
                &self.max_win_percent,
                &"must lie within 0..=100",
            ));
        }
        if self.min_win_percent > self.max_win_percent {
            return Err(invalid_parameter(
                "minWinPercent",
                &self.min_win_percent,
                &format!("exceeds maxWinPercent ({})", self.max_win_percent),
            ));
        }
        if self.stop_after == 0 {
            return Err(invalid_parameter("stopAfter", &self.stop_after, &"must be at least 1"));
        }

        let capacity = self.grid_columns.max * self.grid_rows.max;
        if required > capacity {
            return Err(MinesetterError::InfeasibleConfiguration { required, capacity });
        }
        Ok(())
    }
}
