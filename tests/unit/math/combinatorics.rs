//! Tests for binomial coefficients and k-subset enumeration

#[cfg(test)]
mod tests {
    use minesetter::math::combinatorics::{Combinations, binomial};
    use num_bigint::BigUint;
    use proptest::prelude::*;

    // Tests known binomial values including the symmetric reduction
    // Verified by dropping the min(r, n - r) reduction and the upper-bound check
    #[test]
    fn test_binomial_known_values() {
        assert_eq!(binomial(9, 2), BigUint::from(36_u32));
        assert_eq!(binomial(10, 0), BigUint::from(1_u32));
        assert_eq!(binomial(10, 10), BigUint::from(1_u32));
        assert_eq!(binomial(10, 7), binomial(10, 3));
        assert_eq!(binomial(52, 5), BigUint::from(2_598_960_u32));
    }

    // Tests out-of-domain arguments return zero
    // Verified by removing the guard for r > n and negative inputs
    #[test]
    fn test_binomial_outside_domain_is_zero() {
        assert_eq!(binomial(3, 4), BigUint::from(0_u32));
        assert_eq!(binomial(-1, 0), BigUint::from(0_u32));
        assert_eq!(binomial(5, -2), BigUint::from(0_u32));
    }

    // Tests values beyond u64 stay exact
    // Verified by accumulating into a fixed-width integer
    #[test]
    fn test_binomial_exceeds_u64() {
        let value = binomial(100, 50);
        assert_eq!(
            value.to_string(),
            "100891344545564193334812497256"
        );
    }

    // Tests subsets are produced in lexicographic index order
    // Verified by resetting the suffix to the pivot value instead of successors
    #[test]
    fn test_combinations_lexicographic_order() {
        let items = [10, 20, 30, 40];
        let subsets: Vec<Vec<i32>> = Combinations::new(&items, 2).collect();
        assert_eq!(
            subsets,
            vec![
                vec![10, 20],
                vec![10, 30],
                vec![10, 40],
                vec![20, 30],
                vec![20, 40],
                vec![30, 40],
            ]
        );
    }

    // Tests k = 0 yields one empty subset and k > n yields none
    // Verified by removing the exhausted flag after the empty subset
    #[test]
    fn test_combinations_edge_sizes() {
        let items = [1_usize, 2, 3];
        let empty: Vec<Vec<usize>> = Combinations::new(&items, 0).collect();
        assert_eq!(empty, vec![Vec::<usize>::new()]);

        assert_eq!(Combinations::new(&items, 4).count(), 0);
        assert_eq!(Combinations::new(&items, 3).count(), 1);

        let none: [usize; 0] = [];
        assert_eq!(Combinations::new(&none, 0).count(), 1);
    }

    // Tests reset restarts the sequence from the first subset
    // Verified by leaving the started flag set on reset
    #[test]
    fn test_combinations_reset() {
        let items = [1_u8, 2, 3];
        let mut combinations = Combinations::new(&items, 2);
        assert_eq!(combinations.by_ref().count(), 3);
        assert_eq!(combinations.next(), None);

        combinations.reset();
        assert_eq!(combinations.next(), Some(vec![1, 2]));
        assert_eq!(combinations.count(), 2);
    }

    proptest! {
        // Tests the subset count always equals the binomial coefficient
        // Verified by skipping the final combination in advance()
        #[test]
        fn test_combination_count_matches_binomial(n in 0_usize..10, k in 0_usize..12) {
            let items: Vec<usize> = (0..n).collect();
            let count = Combinations::new(&items, k).count();
            prop_assert_eq!(BigUint::from(count), binomial(n as i64, k as i64));
        }

        // Tests every subset is strictly increasing with no duplicates
        // Verified by allowing repeated indices after the pivot
        #[test]
        fn test_combinations_are_strictly_increasing(n in 1_usize..8, k in 1_usize..5) {
            let items: Vec<usize> = (0..n).collect();
            for subset in Combinations::new(&items, k) {
                prop_assert_eq!(subset.len(), k);
                prop_assert!(subset.windows(2).all(|pair| pair[0] < pair[1]));
            }
        }
    }
}
