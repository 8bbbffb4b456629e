//! Tests for aggregate statistics accumulation

#[cfg(test)]
mod tests {
    use minesetter::algorithm::scoring::{BombKind, ScoreCard};
    use minesetter::analysis::statistics::{
        AggregateStatistics, ConditionTally, Heatmap, Termination,
    };
    use num_bigint::BigUint;

    // Tests forced bombs land in the normal heatmap alongside free bombs
    // Verified by recording forced bombs into no layer
    #[test]
    fn test_record_placement_heatmap() {
        let mut stats = AggregateStatistics::new(2, 2, &[], BigUint::from(4_u32));
        stats.record_placement(3, &[0], &[1], &[2], &[3]);
        stats.record_placement(3, &[0], &[2], &[], &[]);

        assert_eq!(stats.total_enumerated, 2);
        assert_eq!(stats.score_histogram.get(&3), Some(&2));
        assert_eq!(stats.heatmap.count(BombKind::Normal, 0), 2);
        assert_eq!(stats.heatmap.count(BombKind::Normal, 2), 1);
        assert_eq!(stats.heatmap.count(BombKind::Power, 2), 1);
        assert_eq!(stats.heatmap.count(BombKind::Negative, 3), 1);
        assert_eq!(stats.heatmap.total_at(2), 2);
        assert!((stats.win_rate_percent() - 50.0).abs() < 1e-9);
    }

    // Tests cell values feed per-cell, global and empty-cell histograms
    // Verified by counting bomb cells as zero-valued
    #[test]
    fn test_record_cell_values() {
        let mut stats = AggregateStatistics::new(1, 3, &[], BigUint::from(1_u32));
        let card = ScoreCard {
            score: 1,
            cell_values: vec![None, Some(1), Some(0)],
        };
        stats.record_cell_values(&card);
        stats.record_cell_values(&card);

        assert!(stats.cell_value_histogram[0].is_empty());
        assert_eq!(stats.cell_value_histogram[1].get(&1), Some(&2));
        assert_eq!(stats.global_value_histogram.get(&0), Some(&2));
        assert_eq!(stats.empty_cell_histogram.get(&1), Some(&2));
        assert!(stats.has_empty_cells());
    }

    // Tests switch counters split by branch
    // Verified by swapping the on and off counters
    #[test]
    fn test_record_switches() {
        let mut stats = AggregateStatistics::new(2, 2, &[1, 3], BigUint::from(1_u32));
        stats.record_switches(&[3]);
        stats.record_switches(&[]);

        let first = stats.switch_histogram[&1];
        let second = stats.switch_histogram[&3];
        assert_eq!((first.on, first.off), (2, 0));
        assert_eq!((second.on, second.off), (1, 1));
    }

    // Tests the tally places each vector in exactly one bucket
    // Verified by letting C1_C2_C3 also count toward C1_C2
    #[test]
    fn test_condition_tally_buckets() {
        let mut tally = ConditionTally::default();
        for bits in 0_u8..8 {
            let status = [bits & 1 != 0, bits & 2 != 0, bits & 4 != 0];
            tally.record(status);
        }

        assert_eq!(tally.total(), 8);
        assert_eq!(tally.none, 1);
        assert_eq!(tally.c1_c2_c3, 1);
        assert_eq!(tally.satisfied(0), 4);
        assert_eq!(tally.satisfied(2), 4);
        assert_eq!(tally.satisfied(3), 0);

        let json = serde_json::to_value(tally).unwrap();
        assert_eq!(json["C1_C2_C3"], 1);
        assert_eq!(json["None"], 1);
    }

    // Tests score bounds and the empty defaults
    // Verified by reading bounds from the first key twice
    #[test]
    fn test_score_bounds() {
        let mut stats = AggregateStatistics::new(1, 1, &[], BigUint::from(0_u32));
        assert_eq!(stats.score_bounds(), None);
        assert!(!stats.has_empty_cells());
        assert!(stats.is_complete());
        assert!(stats.win_rate_percent().abs() < f64::EPSILON);

        stats.record_placement(-2, &[], &[], &[], &[]);
        stats.record_placement(5, &[], &[], &[], &[]);
        assert_eq!(stats.score_bounds(), Some((-2, 5)));

        stats.termination = Termination::Capped;
        assert!(!stats.is_complete());
    }

    // Tests heatmaps travel as flat row-major arrays and come back intact
    // Verified by serialising the arrays column-major
    #[test]
    fn test_heatmap_json() {
        let mut heatmap = Heatmap::new(2, 3);
        heatmap.record(BombKind::Power, 4);
        let json = serde_json::to_value(&heatmap).unwrap();
        assert_eq!(json["rows"], 2);
        assert_eq!(json["power"], serde_json::json!([0, 0, 0, 0, 1, 0]));
        assert_eq!(heatmap.grid(BombKind::Power)[[1, 1]], 1);

        let back: Heatmap = serde_json::from_value(json).unwrap();
        assert_eq!(back, heatmap);

        let broken = serde_json::json!({
            "rows": 2, "cols": 2, "normal": [0], "power": [0], "negative": [0]
        });
        assert!(serde_json::from_value::<Heatmap>(broken).is_err());
    }

    // Tests big counts are string-encoded in the report
    // Verified by serialising the estimate as a number
    #[test]
    fn test_statistics_json_strings() {
        let stats = AggregateStatistics::new(1, 2, &[], BigUint::from(10_u32).pow(30));
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["totalCombinations"], "1000000000000000000000000000000");
        assert_eq!(json["enumeratedCount"], "0");
        assert_eq!(json["termination"], "completed");

        let back: AggregateStatistics = serde_json::from_value(json).unwrap();
        assert_eq!(back, stats);
    }
}
