//! Tests for the coordinate mapping.

use std::collections::HashSet;

use proptest::prelude::*;

use super::*;

#[test]
fn test_zero_board_size_is_rejected() {
    assert_eq!(
        CoordinateMapping::generate(0),
        Err(QueensError::InvalidBoardSize(0))
    );
}

#[test]
fn test_single_cell_board() {
    let mapping = generate_mapping(1).unwrap();
    assert_eq!(mapping.len(), 1);
    assert_eq!(mapping.coordinate(0), Some(BoardCoordinate::new(1, 1)));
    assert_eq!(mapping.row_groups(), vec![vec![0]]);
    assert_eq!(mapping.column_groups(), vec![vec![0]]);
    assert_eq!(mapping.diagonal_groups(), vec![vec![0], vec![0]]);
}

#[test]
fn test_row_major_order() {
    let mapping = generate_mapping(3).unwrap();
    let cells: Vec<(i64, i64)> = mapping
        .coordinates()
        .iter()
        .map(|c| (c.row(), c.column()))
        .collect();
    assert_eq!(
        cells,
        vec![
            (1, 1),
            (1, 2),
            (1, 3),
            (2, 1),
            (2, 2),
            (2, 3),
            (3, 1),
            (3, 2),
            (3, 3),
        ]
    );
}

#[test]
fn test_groups_for_three_by_three() {
    let mapping = generate_mapping(3).unwrap();
    assert_eq!(
        mapping.row_groups(),
        vec![vec![0, 1, 2], vec![3, 4, 5], vec![6, 7, 8]]
    );
    assert_eq!(
        mapping.column_groups(),
        vec![vec![0, 3, 6], vec![1, 4, 7], vec![2, 5, 8]]
    );

    let diagonals = mapping.diagonal_groups();
    // 2n - 1 minor diagonals followed by 2n - 1 major diagonals.
    assert_eq!(diagonals.len(), 10);
    // row - col = -2 is the top-right corner.
    assert_eq!(diagonals[0], vec![2]);
    // row - col = 0 is the main diagonal.
    assert_eq!(diagonals[2], vec![0, 4, 8]);
    // row + col = 4 is the anti-diagonal.
    assert_eq!(diagonals[7], vec![2, 4, 6]);
}

#[test]
fn test_generation_is_deterministic() {
    assert_eq!(generate_mapping(6).unwrap(), generate_mapping(6).unwrap());
}

#[test]
fn test_out_of_board_lookup() {
    let mapping = generate_mapping(4).unwrap();
    assert_eq!(mapping.index_of(BoardCoordinate::new(0, 1)), None);
    assert_eq!(mapping.index_of(BoardCoordinate::new(1, 5)), None);
    assert_eq!(mapping.coordinate(16), None);
}

#[test]
fn test_coordinate_display() {
    assert_eq!(BoardCoordinate::new(3, -1).to_string(), "(3, -1)");
    assert_eq!(BoardCoordinate::from((2, 4)), BoardCoordinate::new(2, 4));
}

proptest! {
    #[test]
    fn prop_mapping_is_a_bijection(n in 1usize..=24) {
        let mapping = generate_mapping(n).unwrap();
        prop_assert_eq!(mapping.len(), n * n);

        let unique: HashSet<BoardCoordinate> = mapping.coordinates().iter().copied().collect();
        prop_assert_eq!(unique.len(), n * n);

        for (index, cell) in mapping.iter() {
            prop_assert!(cell.is_within(n));
            prop_assert_eq!(mapping.index_of(cell), Some(index));
        }
    }

    #[test]
    fn prop_every_cell_has_one_group_per_axis(n in 1usize..=12) {
        let mapping = generate_mapping(n).unwrap();
        let count = |groups: Vec<Vec<VariableIndex>>| {
            let mut seen = vec![0usize; n * n];
            for group in groups {
                for index in group {
                    seen[index] += 1;
                }
            }
            seen
        };

        prop_assert!(count(mapping.row_groups()).iter().all(|&c| c == 1));
        prop_assert!(count(mapping.column_groups()).iter().all(|&c| c == 1));
        // One minor and one major diagonal per cell.
        prop_assert!(count(mapping.diagonal_groups()).iter().all(|&c| c == 2));
    }
}
