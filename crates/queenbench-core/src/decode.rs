//! Decoding solver assignments into queen placements.

use crate::assignment::Assignment;
use crate::board::{CoordinateMapping, Placement};

/// Converts an assignment into the occupied cells.
///
/// Walks the mapping in index order and keeps every cell whose variable is
/// exactly 1. Missing indices and any other value are treated as empty.
/// The result follows mapping order, never the assignment's insertion order.
///
/// # Examples
///
/// ```
/// use queenbench_core::{decode, generate_mapping, Assignment, BoardCoordinate};
///
/// let mapping = generate_mapping(3).unwrap();
/// let assignment = Assignment::from_active([7, 0]).with_value(4, 2);
///
/// assert_eq!(
///     decode(&assignment, &mapping),
///     vec![BoardCoordinate::new(1, 1), BoardCoordinate::new(3, 2)]
/// );
/// ```
pub fn decode(assignment: &Assignment, mapping: &CoordinateMapping) -> Placement {
    mapping
        .iter()
        .filter(|(index, _)| assignment.is_active(*index))
        .map(|(_, cell)| cell)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardCoordinate;

    #[test]
    fn test_empty_assignment_decodes_to_empty_placement() {
        let mapping = CoordinateMapping::generate(4).unwrap();
        assert!(decode(&Assignment::new(), &mapping).is_empty());
    }

    #[test]
    fn test_indices_beyond_the_board_are_ignored() {
        let mapping = CoordinateMapping::generate(2).unwrap();
        let assignment = Assignment::from_active([3, 4, 100]);
        assert_eq!(
            decode(&assignment, &mapping),
            vec![BoardCoordinate::new(2, 2)]
        );
    }

    #[test]
    fn test_full_assignment_decodes_every_cell() {
        let mapping = CoordinateMapping::generate(3).unwrap();
        let assignment = Assignment::from_values(&[1; 9]);
        assert_eq!(decode(&assignment, &mapping), mapping.coordinates());
    }
}
