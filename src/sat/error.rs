//! Error taxonomy for formula construction and search

use thiserror::Error;

/// Errors raised while building or searching a formula.
///
/// A deadline hit during minimization is not an error; it is reported through
/// [`MinimizeOutcome::proven_optimal`](super::MinimizeOutcome).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SatError {
    /// Field construction with a non-positive width or height.
    #[error("invalid field dimensions {width}x{height}")]
    InvalidDimension { width: i32, height: i32 },

    /// Two fields (or a field and a pattern) whose sizes are incompatible.
    #[error("incompatible dimensions: {left_width}x{left_height} vs {right_width}x{right_height}")]
    DimensionMismatch {
        left_width: i32,
        left_height: i32,
        right_width: i32,
        right_height: i32,
    },

    /// Storage for a field's cell variables could not be reserved.
    #[error("cannot reserve storage for {cells} cell variables")]
    AllocationFailure { cells: usize },

    /// The accumulated formula is unsatisfiable.
    #[error("formula is unsatisfiable")]
    Infeasible,

    /// The engine answered something outside {SAT, UNSAT}.
    #[error("solver returned an unexpected status during {operation}")]
    EngineFailure { operation: &'static str },
}
