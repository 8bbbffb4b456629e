//! Tests for placement scoring and displayed cell values

#[cfg(test)]
mod tests {
    use bitvec::prelude::*;
    use minesetter::algorithm::scoring::{BombKind, Scorer, score_solution};
    use minesetter::spatial::compute_neighbors;
    use proptest::prelude::*;

    // Tests the forced centre bomb plus a corner bomb scores 7 + 2
    // Verified by letting bombs contribute to occupied neighbours
    #[test]
    fn test_forced_centre_with_corner_bomb() {
        let adjacency = compute_neighbors(3, 3, &bitvec![0; 9]);
        let card = score_solution(&[0], &[], &[], &[4], &adjacency);

        assert_eq!(card.score, 9);
        assert_eq!(card.cell_values[0], None);
        assert_eq!(card.cell_values[4], None);
        assert_eq!(card.cell_values[1], Some(2));
        assert_eq!(card.cell_values[3], Some(2));
        assert_eq!(card.cell_values[8], Some(1));
    }

    // Tests the forced centre bomb plus an edge bomb scores 7 + 4
    // Verified by skipping forced bombs in the score pass
    #[test]
    fn test_forced_centre_with_edge_bomb() {
        let adjacency = compute_neighbors(3, 3, &bitvec![0; 9]);
        let card = score_solution(&[1], &[], &[], &[4], &adjacency);
        assert_eq!(card.score, 11);
    }

    // Tests power and negative weights
    // Verified by swapping the power and negative weights
    #[test]
    fn test_bomb_weights() {
        assert_eq!(BombKind::Normal.weight(), 1);
        assert_eq!(BombKind::Power.weight(), 2);
        assert_eq!(BombKind::Negative.weight(), -1);

        let adjacency = compute_neighbors(1, 3, &bitvec![0; 3]);
        let power = score_solution(&[], &[0], &[], &[], &adjacency);
        assert_eq!(power.score, 2);
        assert_eq!(power.cell_values, vec![None, Some(2), Some(0)]);

        let mixed = score_solution(&[], &[0], &[2], &[], &adjacency);
        assert_eq!(mixed.score, 1);
        assert_eq!(mixed.cell_values, vec![None, Some(1), None]);
    }

    // Tests blocked cells show no value and receive no contribution
    // Verified by reporting values for closed cells
    #[test]
    fn test_blocked_cells_have_no_value() {
        let mut blocked = bitvec![0; 4];
        blocked.set(1, true);
        let adjacency = compute_neighbors(2, 2, &blocked);

        let card = score_solution(&[0], &[], &[], &[], &adjacency);
        assert_eq!(card.cell_values, vec![None, None, Some(1), Some(1)]);
        assert_eq!(card.score, 2);
        assert_eq!(card.empty_cells(), 0);
    }

    // Tests empty cells count only zero-valued open cells
    // Verified by counting None as empty
    #[test]
    fn test_empty_cell_count() {
        let adjacency = compute_neighbors(1, 4, &bitvec![0; 4]);
        let card = score_solution(&[0], &[], &[], &[], &adjacency);
        assert_eq!(card.cell_values, vec![None, Some(1), Some(0), Some(0)]);
        assert_eq!(card.empty_cells(), 2);
    }

    // Tests a reused scorer matches fresh scoring and tracks occupancy
    // Verified by not clearing the occupied set between calls
    #[test]
    fn test_scorer_reuse() {
        let adjacency = compute_neighbors(3, 3, &bitvec![0; 9]);
        let mut scorer = Scorer::new(9, &[4]);

        let first = scorer.score(&adjacency, &[0], &[], &[]);
        let second = scorer.score(&adjacency, &[8], &[], &[]);
        assert_eq!(first, 9);
        assert_eq!(second, 9);
        assert_eq!(scorer.occupied().to_vec(), vec![4, 8]);
    }

    proptest! {
        // Tests the total score always equals the sum of displayed values
        // Verified by building the value map from a different bomb set
        #[test]
        fn test_score_equals_value_sum(
            picks in proptest::sample::subsequence((0_usize..16).collect::<Vec<_>>(), 0..8),
            split in 0_usize..8,
        ) {
            let adjacency = compute_neighbors(4, 4, &bitvec![0; 16]);
            let forced: Vec<usize> = picks.iter().copied().take(1).collect();
            let rest: Vec<usize> = picks.iter().copied().skip(1).collect();
            let cut = split.min(rest.len());
            let (normal, others) = rest.split_at(cut);
            let half = others.len() / 2;
            let (power, negative) = others.split_at(half);

            let card = score_solution(normal, power, negative, &forced, &adjacency);
            let sum: i64 = card.cell_values.iter().flatten().map(|&value| i64::from(value)).sum();
            prop_assert_eq!(card.score, sum);

            let mut scorer = Scorer::new(16, &forced);
            prop_assert_eq!(scorer.score(&adjacency, normal, power, negative), card.score);
        }
    }
}
