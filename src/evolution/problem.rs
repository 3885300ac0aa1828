//! Reachability problem construction and solving

use super::solution::{MinimizationSummary, Solution};
use crate::config::Settings;
use crate::life::Grid;
use crate::pattern::{load_pattern_from_file, Pattern};
use crate::sat::{
    CadicalEngine, LiteralField, PatternConstraintEncoder, PopulationMinimizer, SatEngine,
    SatError, SolveStatus, TransitionEncoder, VariableAllocator,
};
use anyhow::{Context, Result};
use std::time::{Duration, Instant};

/// A reachability question: which histories of `evolutions` steps are
/// consistent with the loaded pattern?
pub struct EvolutionProblem {
    settings: Settings,
    pattern: Pattern,
}

impl EvolutionProblem {
    /// Create a problem, loading the pattern from the configured file
    pub fn new(settings: Settings) -> Result<Self> {
        let pattern = load_pattern_from_file(
            &settings.input.pattern_file,
            settings.input.border_inference,
        )
        .context("failed to load pattern")?;

        Ok(Self { settings, pattern })
    }

    /// Create a problem with an explicit pattern (useful for testing)
    pub fn with_pattern(settings: Settings, pattern: Pattern) -> Self {
        Self { settings, pattern }
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Build the formula, solve it, optionally minimize, and read back every
    /// generation.
    pub fn solve(&self) -> Result<Solution> {
        let start = Instant::now();
        let sim = &self.settings.simulation;
        let steps = sim.evolutions;

        println!("-- building formula for {} evolution steps...", steps);

        let mut engine = CadicalEngine::new();
        let mut allocator = VariableAllocator::new();
        let mut fields: Vec<LiteralField> = Vec::with_capacity(steps + 1);

        for g in 0..=steps {
            let growth = if sim.grow {
                (if sim.backwards { steps - g } else { g }) as i32
            } else {
                0
            };
            let field = LiteralField::new(
                self.pattern.width() + 2 * growth,
                self.pattern.height() + 2 * growth,
                &mut allocator,
                &mut engine,
            )?;

            if let Some(prev) = fields.last() {
                for clause in TransitionEncoder::encode_step(prev, &field)? {
                    engine.add_clause(&clause);
                }
            }
            fields.push(field);
        }

        let pinned = if sim.backwards { steps } else { 0 };
        println!("-- pinning pattern on generation {}...", pinned);
        for clause in PatternConstraintEncoder::apply(&fields[pinned], &self.pattern)? {
            engine.add_clause(&clause);
        }

        println!(
            "-- formula has {} variables and {} clauses",
            engine.variable_count(),
            engine.clause_count()
        );

        if engine.simplify() == SolveStatus::Unsatisfiable {
            return Err(SatError::Infeasible.into());
        }

        println!("-- solving formula...");
        match engine.solve() {
            SolveStatus::Satisfiable => {}
            SolveStatus::Unsatisfiable => return Err(SatError::Infeasible.into()),
            SolveStatus::Unknown => {
                return Err(SatError::EngineFailure { operation: "solve" }.into())
            }
        }

        let minimization = if self.settings.solver.minimize {
            Some(self.minimize(&mut engine, &fields)?)
        } else {
            None
        };

        let mut generations = Vec::with_capacity(fields.len());
        for field in &fields {
            generations.push(extract_grid(&engine, field)?);
        }

        Ok(Solution::new(
            generations,
            start.elapsed(),
            engine.variable_count(),
            engine.clause_count(),
            minimization,
        ))
    }

    fn minimize(
        &self,
        engine: &mut CadicalEngine,
        fields: &[LiteralField],
    ) -> Result<MinimizationSummary> {
        let generation = self.settings.solver.minimize_generation;
        let deadline = match self.settings.solver.timeout_seconds {
            0 => None,
            seconds => Some(Instant::now() + Duration::from_secs(seconds)),
        };

        println!("-- minimizing live cells of generation {}...", generation);
        let outcome = PopulationMinimizer::minimize(engine, &fields[generation], deadline)?;
        println!(
            "-- population {} -> {} ({})",
            outcome.base_alive_count,
            outcome.alive_count,
            if outcome.proven_optimal {
                "proven minimal"
            } else {
                "best effort"
            }
        );

        Ok(MinimizationSummary {
            generation,
            initial_alive: outcome.base_alive_count,
            final_alive: outcome.alive_count,
            proven_optimal: outcome.proven_optimal,
            solve_calls: outcome.solve_calls,
            improvements: outcome.improvements,
        })
    }
}

/// Read one generation back from the engine's model.
fn extract_grid(engine: &dyn SatEngine, field: &LiteralField) -> Result<Grid> {
    let mut grid = Grid::new(field.width() as usize, field.height() as usize);
    for y in 0..field.height() {
        for x in 0..field.width() {
            grid.set(y as usize, x as usize, engine.value(field.lit(x, y)))?;
        }
    }
    Ok(grid)
}
