//! Tests for grid construction, roles and per-branch placement pools

#[cfg(test)]
mod tests {
    use minesetter::MinesetterError;
    use minesetter::spatial::grid::{CellRole, LevelGrid, MAX_SWITCHES_PER_GRID};

    // Tests role assignment and the derived cell counts
    // Verified by forgetting to subtract forced bombs from available cells
    #[test]
    fn test_grid_roles_and_counts() {
        let grid = LevelGrid::new(3, 4, &[0], &[5, 6], &[11]).unwrap();

        assert_eq!(grid.total_cells(), 12);
        assert_eq!(grid.available_cells(), 10);
        assert_eq!(grid.role(0), Some(CellRole::Block));
        assert_eq!(grid.role(5), Some(CellRole::Switch));
        assert_eq!(grid.role(11), Some(CellRole::ForcedBomb));
        assert_eq!(grid.role(1), Some(CellRole::Open));
        assert_eq!(grid.role(12), None);
        assert_eq!(grid.coordinates(7), (1, 3));
    }

    // Tests duplicate ids collapse while keeping first-occurrence order
    // Verified by pushing duplicates into the role list
    #[test]
    fn test_grid_collapses_duplicates() {
        let grid = LevelGrid::new(2, 2, &[], &[3, 1, 3], &[]).unwrap();
        assert_eq!(grid.switches(), &[3, 1]);
    }

    // Tests invalid dimensions and ids are rejected
    // Verified by removing the bounds check in role assignment
    #[test]
    fn test_grid_rejects_invalid_input() {
        assert!(matches!(
            LevelGrid::new(0, 3, &[], &[], &[]),
            Err(MinesetterError::InvalidParameter { parameter: "rows", .. })
        ));
        assert!(matches!(
            LevelGrid::new(2, 2, &[4], &[], &[]),
            Err(MinesetterError::InvalidCell { cell: 4, total_cells: 4, .. })
        ));
    }

    // Tests a cell claimed by two roles is an error
    // Verified by letting later roles overwrite earlier ones
    #[test]
    fn test_grid_rejects_overlap() {
        let result = LevelGrid::new(3, 3, &[4], &[], &[4]);
        assert!(matches!(
            result,
            Err(MinesetterError::OverlappingCell { cell: 4, first: "block", second: "forced bomb" })
        ));
    }

    // Tests the switch limit keeps masks within a u64
    // Verified by comparing against the wrong limit
    #[test]
    fn test_grid_switch_limit() {
        let switches: Vec<usize> = (0..=MAX_SWITCHES_PER_GRID).collect();
        assert!(LevelGrid::new(6, 6, &[], &switches, &[]).is_err());

        let allowed: Vec<usize> = (0..MAX_SWITCHES_PER_GRID).collect();
        assert!(LevelGrid::new(6, 6, &[], &allowed, &[]).is_ok());
    }

    // Tests mask bits select switches in list order
    // Verified by reversing the bit order
    #[test]
    fn test_closed_switches_follow_mask_bits() {
        let grid = LevelGrid::new(3, 3, &[], &[2, 7, 5], &[]).unwrap();
        assert!(grid.closed_switches(0).is_empty());
        assert_eq!(grid.closed_switches(0b001), vec![2]);
        assert_eq!(grid.closed_switches(0b110), vec![7, 5]);
        assert_eq!(grid.closed_switches(0b111), vec![2, 7, 5]);
    }

    // Tests the placement pool drops blocks, closed switches and forced bombs
    // Verified by leaving forced bombs in the pool
    #[test]
    fn test_placement_pool_excludes_unavailable_cells() {
        let grid = LevelGrid::new(2, 3, &[0], &[4], &[5]).unwrap();

        let open_branch = grid.blocked_cells(&grid.closed_switches(0));
        assert_eq!(grid.placement_pool(&open_branch), vec![1, 2, 3, 4]);

        let closed_branch = grid.blocked_cells(&grid.closed_switches(1));
        assert!(closed_branch[4]);
        assert_eq!(grid.placement_pool(&closed_branch), vec![1, 2, 3]);
    }
}
