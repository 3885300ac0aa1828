//! SAT formula construction and search components

pub mod allocator;
pub mod constraints;
pub mod engine;
pub mod error;
pub mod field;
pub mod minimize;
pub mod transition;

#[cfg(test)]
pub(crate) mod testing;

pub use allocator::VariableAllocator;
pub use constraints::{Clause, PatternConstraintEncoder};
pub use engine::{CadicalEngine, SatEngine, SolveStatus};
pub use error::SatError;
pub use field::LiteralField;
pub use minimize::{MinimizeOutcome, PopulationMinimizer};
pub use transition::TransitionEncoder;
