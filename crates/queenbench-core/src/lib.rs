//! queenbench Core - N-Queens QUBO encoding and validation pipeline
//!
//! This crate provides the combinatorial heart of the benchmark:
//! - Coordinate mapping between variable indices and board cells
//! - Penalty encoding of the placement rules into a quadratic binary model
//! - Decoding of solver assignments back into queen placements
//! - Validation with a fixed conflict taxonomy
//! - Selection of the reported candidate from an annealing response
//!
//! # Example
//!
//! ```
//! use queenbench_core::{build_model, decode, validate, Assignment, PenaltyWeights, ReasonSummary};
//!
//! let encoded = build_model(4, &PenaltyWeights::default()).unwrap();
//!
//! // Cells (1,2), (2,4), (3,1), (4,3) in row-major index order.
//! let assignment = Assignment::from_active([1, 7, 8, 14]);
//! assert_eq!(encoded.model().energy(&assignment), 0.0);
//!
//! let placement = decode(&assignment, encoded.mapping());
//! let verdict = validate(&placement, 4).unwrap();
//! assert!(verdict.is_valid());
//! assert_eq!(verdict.reason(), ReasonSummary::Ok);
//! ```

pub mod assignment;
pub mod board;
pub mod decode;
pub mod encoder;
pub mod error;
pub mod model;
pub mod outcome;
pub mod penalty;
pub mod selection;
pub mod validation;

pub use assignment::Assignment;
pub use board::{generate_mapping, BoardCoordinate, CoordinateMapping, Placement, VariableIndex};
pub use decode::decode;
pub use encoder::{add_at_most_one_penalty, add_equality_penalty, build_model, EncodedModel};
pub use error::{QueensError, Result};
pub use model::{QuadraticModel, QuadraticModelBuilder, QuadraticTerms, VariablePair};
pub use outcome::{Outcome, OutcomeStatus};
pub use penalty::PenaltyWeights;
pub use selection::{select_candidate, Candidate};
pub use validation::{validate, OccupancyCounts, ReasonSummary, ValidationVerdict, Violation};
