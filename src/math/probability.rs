//! Win-rate and progress percentages over exact integer counts

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

/// Percentage of `total` covered by `count`, truncated to two decimals
///
/// Computed as `floor(count * 10000 / total) / 100` on exact integers so very
/// large search spaces keep their precision until the final conversion.
/// Returns 0 when `total` is zero.
pub fn win_rate_percent(count: &BigUint, total: &BigUint) -> f64 {
    if total.is_zero() {
        return 0.0;
    }
    let scaled: BigUint = count * BigUint::from(10_000_u32) / total;
    scaled.to_f64().map_or(f64::INFINITY, |value| value / 100.0)
}

/// Share of `total` observations that `count` represents, in percent
pub fn frequency_percent(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}

/// Progress percentage of `processed` over `total`, clamped to 100
pub fn progress_percent(processed: &BigUint, total: &BigUint) -> u8 {
    if total.is_zero() {
        return 0;
    }
    let percent: BigUint = processed * BigUint::from(100_u32) / total;
    percent.to_u8().map_or(100, |value| value.min(100))
}
