//! Tests for retained solution records

#[cfg(test)]
mod tests {
    use minesetter::analysis::solutions::{SolutionRecord, SolutionTracker};

    fn record(score: i64, status: [bool; 3]) -> SolutionRecord {
        SolutionRecord {
            normal_bombs: vec![5, 1],
            power_bombs: vec![3],
            negative_bombs: vec![1],
            score,
            condition_status: status,
            closed_switches: vec![7],
        }
    }

    // Tests placement ids merge every bomb list sorted and deduplicated
    // Verified by returning the concatenation unsorted
    #[test]
    fn test_placement_ids() {
        assert_eq!(record(0, [false; 3]).placement_ids(), vec![1, 3, 5]);
    }

    // Tests perfection needs all three slots
    // Verified by using any() instead of all()
    #[test]
    fn test_is_perfect() {
        assert!(record(0, [true; 3]).is_perfect());
        assert!(!record(0, [true, true, false]).is_perfect());
    }

    // Tests the bound applies to ordinary records but not perfect ones
    // Verified by applying the bound before the perfection check
    #[test]
    fn test_tracker_bound() {
        let mut tracker = SolutionTracker::new(2);
        assert!(tracker.is_empty());

        assert!(tracker.add(record(1, [false; 3]), false));
        assert!(tracker.add(record(2, [false; 3]), false));
        assert!(!tracker.accepts(false));
        assert!(!tracker.add(record(3, [false; 3]), false));
        assert!(tracker.add(record(4, [true; 3]), true));

        assert_eq!(tracker.len(), 3);
        let scores: Vec<i64> = tracker.solutions().iter().map(|s| s.score).collect();
        assert_eq!(scores, vec![1, 2, 4]);
        assert_eq!(tracker.into_solutions().len(), 3);
    }

    // Tests the JSON field names of a record
    // Verified by dropping the sum rename
    #[test]
    fn test_record_json_shape() {
        let json = serde_json::to_value(record(9, [true, false, true])).unwrap();
        assert_eq!(json["sum"], 9);
        assert_eq!(json["normalBombs"], serde_json::json!([5, 1]));
        assert_eq!(json["conditionStatus"], serde_json::json!([true, false, true]));
        assert_eq!(json["switchState"], serde_json::json!([7]));
    }
}
