//! Input-validation errors for the planning core.
//!
//! Only malformed input is an error. A target with no reachable landing zone,
//! or one the fleet cannot serve, is reported inside the plan instead.

use crate::models::GridCoord;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("terrain grid is empty")]
    EmptyGrid,

    #[error("terrain row {row} has {found} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("label grid is {labels:?} but elevation grid is {elevations:?}")]
    ShapeMismatch {
        labels: (usize, usize),
        elevations: (usize, usize),
    },

    #[error("elevation at {coord} is not a finite number")]
    NonFiniteElevation { coord: GridCoord },

    #[error("coordinate {coord} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        coord: GridCoord,
        rows: usize,
        cols: usize,
    },

    #[error("source {coord} is on a blocked cell")]
    BlockedSource { coord: GridCoord },

    #[error("fleet parameter `{name}` must be positive and finite, got {value}")]
    InvalidFleetParam { name: &'static str, value: f64 },

    #[error("unknown terrain label code {0}")]
    InvalidLabel(i8),
}
