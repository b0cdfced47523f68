//! Solver-style assignments for placements.

use queenbench_core::{Assignment, BoardCoordinate, CoordinateMapping};

/// Assignment with exactly the variables of `placement` set to 1.
///
/// Cells outside the mapping are skipped.
pub fn assignment_for(placement: &[BoardCoordinate], mapping: &CoordinateMapping) -> Assignment {
    placement
        .iter()
        .filter_map(|&cell| mapping.index_of(cell))
        .map(|index| (index, true))
        .collect()
}
