//! Game of Life reachability via incremental SAT solving
//!
//! This library decides whether one Game of Life generation evolves into
//! another by encoding the transition rule as CNF clauses and driving an
//! incremental SAT engine. On top of plain reachability it can search, among
//! all valid histories, for one minimizing the number of live cells in a
//! chosen generation.

pub mod config;
pub mod evolution;
pub mod life;
pub mod pattern;
pub mod sat;
pub mod utils;

pub use config::Settings;
pub use evolution::{EvolutionProblem, Solution};

use anyhow::Result;

/// Main entry point: solve the reachability problem described by `settings`
pub fn solve_pattern(settings: Settings) -> Result<Solution> {
    let problem = EvolutionProblem::new(settings)?;
    problem.solve()
}
