//! Solution representation

use crate::life::Grid;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A satisfying history: one concrete grid per generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    /// Earliest generation first.
    pub generations: Vec<Grid>,
    #[serde(skip)]
    pub solve_time: Duration,
    pub stats: SolutionStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionStats {
    pub variables: usize,
    pub clauses: usize,
    /// Live cells per generation, aligned with `generations`.
    pub alive_counts: Vec<usize>,
    pub minimization: Option<MinimizationSummary>,
}

/// What the population minimizer achieved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinimizationSummary {
    /// Generation whose population was minimized.
    pub generation: usize,
    /// Live cells of the first model, before branching.
    pub initial_alive: usize,
    pub final_alive: usize,
    /// False when the deadline cut the search short.
    pub proven_optimal: bool,
    pub solve_calls: usize,
    pub improvements: usize,
}

impl Solution {
    pub fn new(
        generations: Vec<Grid>,
        solve_time: Duration,
        variables: usize,
        clauses: usize,
        minimization: Option<MinimizationSummary>,
    ) -> Self {
        let alive_counts = generations.iter().map(Grid::living_count).collect();
        Self {
            generations,
            solve_time,
            stats: SolutionStats {
                variables,
                clauses,
                alive_counts,
                minimization,
            },
        }
    }

    /// The earliest generation
    pub fn initial(&self) -> &Grid {
        &self.generations[0]
    }

    /// The latest generation
    pub fn final_grid(&self) -> &Grid {
        self.generations.last().expect("a solution has generations")
    }

    /// Number of evolution steps in the history
    pub fn steps(&self) -> usize {
        self.generations.len() - 1
    }
}
