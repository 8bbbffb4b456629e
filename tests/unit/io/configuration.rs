//! Tests for configuration constants consistency

#[cfg(test)]
mod tests {
    use minesetter::io::configuration::{
        CATEGORY_SHARE_LIMIT, CONDITION_ATTEMPTS_PER_KIND, DEFAULT_MAX_ENUMERATED,
        DEFAULT_MAX_RETAINED_SOLUTIONS, MAX_GENERATED_SWITCHES, PROGRESS_THROTTLE,
        STAR_SLOT_COUNT, STRUCTURAL_BUDGET_RATIO, TRIVIAL_CONDITION_PERCENT,
        WORKER_POLL_INTERVAL,
    };
    use minesetter::spatial::grid::MAX_SWITCHES_PER_GRID;

    // Tests solver limits keep the retained list below the analysis cap
    // Verified by setting the retained default above the cap
    #[test]
    fn test_solver_limits() {
        assert_eq!(DEFAULT_MAX_RETAINED_SOLUTIONS, 5_000);
        assert_eq!(DEFAULT_MAX_ENUMERATED, 100_000_000);
        assert!((DEFAULT_MAX_RETAINED_SOLUTIONS as u64) < DEFAULT_MAX_ENUMERATED);
        assert_eq!(STAR_SLOT_COUNT, 3);
    }

    // Tests builder fractions stay inside their meaningful ranges
    // Verified by raising the category share above one
    #[test]
    fn test_builder_fractions() {
        assert!(CATEGORY_SHARE_LIMIT > 0.0 && CATEGORY_SHARE_LIMIT <= 1.0);
        assert!(STRUCTURAL_BUDGET_RATIO > 0.0 && STRUCTURAL_BUDGET_RATIO <= 1.0);
        assert!(TRIVIAL_CONDITION_PERCENT > 0.0 && TRIVIAL_CONDITION_PERCENT <= 100.0);
        assert!(CONDITION_ATTEMPTS_PER_KIND >= 1);
        assert!(MAX_GENERATED_SWITCHES <= MAX_SWITCHES_PER_GRID);
    }

    // Tests waiting callers poll faster than progress is throttled
    // Verified by swapping the two intervals
    #[test]
    fn test_timing_constants() {
        assert!(WORKER_POLL_INTERVAL <= PROGRESS_THROTTLE);
        assert!(!PROGRESS_THROTTLE.is_zero());
    }
}
