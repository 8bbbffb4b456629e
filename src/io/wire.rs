//! Messages exchanged between a solve worker and its caller

use num_bigint::BigUint;
use serde::Serialize;

use crate::algorithm::solver::SolveEvent;
use crate::analysis::statistics::AggregateStatistics;

/// Payload of the terminal `done` message
pub type SolveReport = AggregateStatistics;

/// One message from a running solve
///
/// Per run: one `estimate`, any number of `progress`, then exactly one of
/// `done` or `error`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SolverMessage {
    /// Analytical size of the search space, sent before enumeration
    Estimate {
        /// Exact number of combinations
        #[serde(rename = "totalCombinations", with = "as_string")]
        total_combinations: BigUint,
    },
    /// Share of the search space processed so far
    Progress {
        /// Percentage in `0..=100`
        percent: u8,
    },
    /// Final statistics
    Done(Box<SolveReport>),
    /// The solve failed and produced no statistics
    Error {
        /// Description of the failure
        message: String,
    },
}

impl SolverMessage {
    /// Whether no further messages follow this one
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Done(_) | Self::Error { .. })
    }
}

impl From<SolveEvent<'_>> for SolverMessage {
    fn from(event: SolveEvent<'_>) -> Self {
        match event {
            SolveEvent::Estimate(total) => Self::Estimate {
                total_combinations: total.clone(),
            },
            SolveEvent::Progress(percent) => Self::Progress { percent },
        }
    }
}

/// Serde adapter encoding a number as a decimal string
///
/// Keeps arbitrary-precision counts exact in JSON consumers that parse every
/// number as a double.
pub mod as_string {
    use serde::de::{Deserializer, Error};
    use serde::ser::Serializer;
    use serde::Deserialize;
    use std::fmt::Display;
    use std::str::FromStr;

    /// Serialize through `Display`
    ///
    /// # Errors
    ///
    /// Propagates serializer failures
    pub fn serialize<T: Display, S: Serializer>(
        value: &T,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    /// Deserialize through `FromStr`
    ///
    /// # Errors
    ///
    /// Fails when the string is not a valid number
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(Error::custom)
    }
}
