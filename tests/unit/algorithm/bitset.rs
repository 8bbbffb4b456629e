//! Tests for the cell occupancy bitset

#[cfg(test)]
mod tests {
    use minesetter::algorithm::bitset::CellBitset;

    // Tests insertion, membership and ordered extraction
    // Verified by returning ids in insertion order
    #[test]
    fn test_bitset_basic_operations() {
        let mut set = CellBitset::new(10);
        assert!(set.is_empty());

        set.insert(7);
        set.insert(2);
        set.insert(7);

        assert!(set.contains(2));
        assert!(set.contains(7));
        assert!(!set.contains(3));
        assert_eq!(set.count(), 2);
        assert_eq!(set.to_vec(), vec![2, 7]);
        assert_eq!(set.capacity(), 10);
    }

    // Tests out-of-range ids are ignored instead of panicking
    // Verified by calling set() without the bounds check
    #[test]
    fn test_bitset_ignores_out_of_range() {
        let mut set = CellBitset::from_cells(&[1, 42], 4);
        set.insert(4);
        assert_eq!(set.to_vec(), vec![1]);
        assert!(!set.contains(42));
    }

    // Tests clear keeps capacity but drops every member
    // Verified by replacing clear with a fresh empty bitset
    #[test]
    fn test_bitset_clear() {
        let mut set = CellBitset::from_cells(&[0, 1, 2], 5);
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.capacity(), 5);

        set.extend(&[3, 4]);
        assert_eq!(set.count(), 2);
    }

    // Tests display output lists the cells
    // Verified by printing the raw bit vector
    #[test]
    fn test_bitset_display() {
        let set = CellBitset::from_cells(&[3, 1], 6);
        assert_eq!(set.to_string(), "CellBitset(2 cells: [1, 3])");
    }
}
