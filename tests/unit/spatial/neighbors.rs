//! Tests for open-cell adjacency

#[cfg(test)]
mod tests {
    use bitvec::prelude::*;
    use minesetter::spatial::neighbors::compute_neighbors;

    // Tests corner, edge and centre neighbourhood sizes on an open grid
    // Verified by including the cell itself as a neighbour
    #[test]
    fn test_open_grid_neighbour_counts() {
        let blocked = bitvec![0; 9];
        let adjacency = compute_neighbors(3, 3, &blocked);

        assert_eq!(adjacency.neighbors_of(0), &[1, 3, 4]);
        assert_eq!(adjacency.neighbors_of(1).len(), 5);
        assert_eq!(adjacency.neighbors_of(4).len(), 8);
        assert_eq!(adjacency.total_cells(), 9);
        assert_eq!(adjacency.open_cells().count(), 9);
    }

    // Tests blocked cells neither have nor are neighbours
    // Verified by skipping the neighbour-side block check
    #[test]
    fn test_blocked_cells_are_excluded() {
        let mut blocked = bitvec![0; 9];
        blocked.set(4, true);
        let adjacency = compute_neighbors(3, 3, &blocked);

        assert!(!adjacency.is_open(4));
        assert!(adjacency.neighbors_of(4).is_empty());
        assert_eq!(adjacency.neighbors_of(0), &[1, 3]);
        assert!(adjacency.open_cells().all(|cell| cell != 4));
    }

    // Tests rows do not wrap into each other
    // Verified by computing neighbours on the flat index only
    #[test]
    fn test_no_wrap_between_rows() {
        let blocked = bitvec![0; 8];
        let adjacency = compute_neighbors(2, 4, &blocked);

        assert_eq!(adjacency.neighbors_of(3), &[2, 6, 7]);
        assert_eq!(adjacency.neighbors_of(4), &[0, 1, 5]);
    }

    // Tests out-of-range lookups are empty rather than panicking
    // Verified by indexing the neighbour table directly
    #[test]
    fn test_out_of_range_lookup() {
        let adjacency = compute_neighbors(1, 1, &bitvec![0; 1]);
        assert!(adjacency.neighbors_of(5).is_empty());
        assert!(!adjacency.is_open(5));
        assert!(adjacency.neighbors_of(0).is_empty());
    }
}
