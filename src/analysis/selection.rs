//! Target score range selection for a requested win-rate window
//!
//! Scans every contiguous run of distinct scores, keeps the runs whose share
//! of the full search space falls inside the window, and picks the middle
//! candidate. Front candidates tend to be narrow, back candidates wide.

use num_bigint::BigUint;
use num_traits::Zero;
use std::collections::BTreeMap;

use crate::math::probability::win_rate_percent;

/// Contiguous score range and the share of the search space it covers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetRange {
    /// Lowest score in the range, inclusive
    pub min: i64,
    /// Highest score in the range, inclusive
    pub max: i64,
    /// Percentage of all combinations scoring inside the range
    pub win_rate: f64,
}

/// Every contiguous score range whose win rate lies in `[min_win, max_win]`
///
/// Ranges come out ordered by start score, then by end score. The running
/// sum for a fixed start only grows, so the scan for that start stops once
/// it exceeds `max_win`.
pub fn candidate_ranges(
    histogram: &BTreeMap<i64, u64>,
    total_combinations: &BigUint,
    min_win: f64,
    max_win: f64,
) -> Vec<TargetRange> {
    if total_combinations.is_zero() {
        return Vec::new();
    }

    let scores: Vec<(i64, u64)> = histogram
        .iter()
        .map(|(&score, &count)| (score, count))
        .collect();
    let mut ranges = Vec::new();

    for (start, &(low, _)) in scores.iter().enumerate() {
        let mut cumulative = BigUint::zero();

        for &(high, count) in scores.iter().skip(start) {
            cumulative += count;
            let win_rate = win_rate_percent(&cumulative, total_combinations);

            if win_rate >= min_win && win_rate <= max_win {
                ranges.push(TargetRange {
                    min: low,
                    max: high,
                    win_rate,
                });
            }
            if win_rate > max_win {
                break;
            }
        }
    }

    ranges
}

/// Pick the middle candidate range, or `None` when no range fits
pub fn select_target(
    histogram: &BTreeMap<i64, u64>,
    total_combinations: &BigUint,
    min_win: f64,
    max_win: f64,
) -> Option<TargetRange> {
    let ranges = candidate_ranges(histogram, total_combinations, min_win, max_win);
    log::debug!("Found {} valid range combinations", ranges.len());
    ranges.get(ranges.len() / 2).copied()
}
