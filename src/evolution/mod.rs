//! Reachability problems over evolution histories

pub mod problem;
pub mod solution;
pub mod validator;

pub use problem::EvolutionProblem;
pub use solution::{MinimizationSummary, Solution, SolutionStats};
pub use validator::{SolutionValidator, StepReport, ValidationReport};
