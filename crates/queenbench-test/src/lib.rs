//! Shared test fixtures for queenbench crates.
//!
//! This crate provides known placements and assignment helpers for testing.
//! It depends only on `queenbench-core`, so `queenbench-core` tests cannot use
//! it without pulling in a second copy of the core types.
//!
//! - [`placements`] - Known N-Queens solutions and broken placements
//! - [`assignments`] - Solver-style assignments built from placements
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! queenbench-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```
//! use queenbench_test::{assignment_for, four_queens_solution};
//! use queenbench_core::generate_mapping;
//!
//! let mapping = generate_mapping(4).unwrap();
//! let assignment = assignment_for(&four_queens_solution(), &mapping);
//! assert_eq!(assignment.active_count(), 4);
//! ```

pub mod assignments;
pub mod placements;

// Re-export commonly used fixtures at crate root for convenience
pub use assignments::assignment_for;
pub use placements::{
    diagonal_conflict_placement, eight_queens_solution, four_queens_solution,
    mirrored_four_queens_solution, placement, placement_from_rows, row_conflict_placement,
};
