//! Branch-and-bound population minimization over one generation's field

use super::engine::{SatEngine, SolveStatus};
use super::error::SatError;
use super::field::LiteralField;
use std::time::Instant;

/// Score penalty for a branch whose subtree was already partially explored,
/// so fresh branches win ties.
const EXPLORATION_BONUS: f64 = 0.125;

/// Result of a minimization run.
#[derive(Debug, Clone)]
pub struct MinimizeOutcome {
    /// Row-major cell assignment of the minimized field.
    pub assignment: Vec<bool>,
    /// Live cells in the final incumbent.
    pub alive_count: usize,
    /// Live cells in the very first model, before any branching.
    pub base_alive_count: usize,
    /// True when the search space was exhausted; false when the deadline cut
    /// the search short and the incumbent is best-effort.
    pub proven_optimal: bool,
    /// Branch solve calls issued (excluding the initial and final solves).
    pub solve_calls: usize,
    /// Number of strict incumbent improvements.
    pub improvements: usize,
}

/// One explored branching point of the search.
///
/// A branch becomes "visited" once its whole subtree is exhausted; the
/// subtree is dropped at that moment since it carries no further
/// information. A node is visited when both branches are.
#[derive(Debug, Default)]
struct DecisionNode {
    negative_visited: bool,
    positive_visited: bool,
    negative: Option<Box<DecisionNode>>,
    positive: Option<Box<DecisionNode>>,
}

impl DecisionNode {
    fn is_visited(&self) -> bool {
        self.negative_visited && self.positive_visited
    }

    fn branch_visited(&self, positive: bool) -> bool {
        if positive {
            self.positive_visited
        } else {
            self.negative_visited
        }
    }

    /// Whether anything below this branch has been explored already
    fn branch_explored(&self, positive: bool) -> bool {
        if positive {
            self.positive_visited || self.positive.is_some()
        } else {
            self.negative_visited || self.negative.is_some()
        }
    }

    fn child_mut(&mut self, positive: bool) -> &mut DecisionNode {
        let slot = if positive {
            &mut self.positive
        } else {
            &mut self.negative
        };
        slot.get_or_insert_with(Box::default)
    }

    fn mark_visited(&mut self, positive: bool) {
        if positive {
            self.positive_visited = true;
            self.positive = None;
        } else {
            self.negative_visited = true;
            self.negative = None;
        }
    }
}

/// What a descent into one branch produced.
enum Descent {
    /// The incumbent improved; unwind to the top and restart the pass.
    Improved,
    /// The subtree holds nothing better than the incumbent.
    Exhausted,
    /// The wall-clock budget elapsed.
    DeadlineReached,
}

#[derive(Debug, Clone, Copy)]
struct Cell {
    lit: i32,
    x: i32,
    y: i32,
}

/// Finds a satisfying assignment minimizing the live-cell count of one field.
///
/// The search assumes cell literals one by one in row-major order, guided by
/// a predictive score, caches exhausted branches in a [`DecisionNode`] tree,
/// and restarts the visiting pass whenever the incumbent improves. It is an
/// anytime procedure: a deadline hit yields the best incumbent found so far.
pub struct PopulationMinimizer<'a> {
    engine: &'a mut dyn SatEngine,
    cells: Vec<Cell>,
    /// Cell index by `x + y * width`, for neighbor lookups while scoring.
    position_index: Vec<Option<usize>>,
    width: i32,
    height: i32,
    /// Branch decisions along the current path, indexed like `cells`.
    decided: Vec<Option<bool>>,
    /// Assumption literals of the current path, re-submitted before every
    /// solve (assumptions only apply to a single solve call).
    trail: Vec<i32>,
    incumbent: Vec<bool>,
    best_alive: usize,
    deadline: Option<Instant>,
    solve_calls: usize,
    improvements: usize,
}

impl<'a> PopulationMinimizer<'a> {
    /// Minimize the live-cell count of `field` within the already-built
    /// formula.
    ///
    /// Fails with `Infeasible` when the base formula is unsatisfiable, and
    /// with `EngineFailure` when any solve answers outside {SAT, UNSAT}.
    /// After a successful return the engine's last model matches the
    /// returned assignment.
    pub fn minimize(
        engine: &'a mut dyn SatEngine,
        field: &LiteralField,
        deadline: Option<Instant>,
    ) -> Result<MinimizeOutcome, SatError> {
        match engine.solve() {
            SolveStatus::Satisfiable => {}
            SolveStatus::Unsatisfiable => return Err(SatError::Infeasible),
            SolveStatus::Unknown => {
                return Err(SatError::EngineFailure {
                    operation: "initial solve",
                })
            }
        }

        let false_var = field.false_var();
        let mut cells = Vec::new();
        let mut position_index = vec![None; field.cell_count()];
        for y in 0..field.height() {
            for x in 0..field.width() {
                let lit = field.lit(x, y);
                if lit == false_var {
                    continue;
                }
                position_index[(x + y * field.width()) as usize] = Some(cells.len());
                cells.push(Cell { lit, x, y });
            }
        }

        let incumbent: Vec<bool> = cells.iter().map(|c| engine.value(c.lit)).collect();
        let best_alive = incumbent.iter().filter(|&&alive| alive).count();

        let mut search = Self {
            engine,
            decided: vec![None; cells.len()],
            trail: Vec::with_capacity(cells.len()),
            position_index,
            width: field.width(),
            height: field.height(),
            incumbent,
            best_alive,
            deadline,
            solve_calls: 0,
            improvements: 0,
            cells,
        };

        let base_alive_count = search.best_alive;
        let mut root = DecisionNode::default();
        let mut proven_optimal = false;

        while !search.cells.is_empty() {
            match search.descend(&mut root, 0)? {
                Descent::Improved => continue, // restart the pass from the first cell
                Descent::Exhausted => {
                    proven_optimal = true;
                    break;
                }
                Descent::DeadlineReached => break,
            }
        }
        if search.cells.is_empty() {
            proven_optimal = true;
        }

        // Replay the incumbent so later value queries reflect the result.
        for (cell, &alive) in search.cells.iter().zip(&search.incumbent) {
            search
                .engine
                .assume(if alive { cell.lit } else { -cell.lit });
        }
        match search.engine.solve() {
            SolveStatus::Satisfiable => {}
            _ => {
                return Err(SatError::EngineFailure {
                    operation: "incumbent replay",
                })
            }
        }

        Ok(MinimizeOutcome {
            assignment: search.incumbent,
            alive_count: search.best_alive,
            base_alive_count,
            proven_optimal,
            solve_calls: search.solve_calls,
            improvements: search.improvements,
        })
    }

    fn descend(&mut self, node: &mut DecisionNode, index: usize) -> Result<Descent, SatError> {
        let lit = self.cells[index].lit;

        let dead_score = self.branch_score(index, false, node);
        let alive_score = self.branch_score(index, true, node);
        let order = if dead_score <= alive_score {
            [false, true]
        } else {
            [true, false]
        };

        for &positive in &order {
            if node.branch_visited(positive) {
                continue; // exhausted earlier; skip without touching the engine
            }
            if self.deadline_reached() {
                return Ok(Descent::DeadlineReached);
            }

            self.engine.freeze(lit);
            self.trail.push(if positive { lit } else { -lit });
            self.decided[index] = Some(positive);

            let outcome = if index + 1 == self.cells.len() {
                self.solve_leaf()
            } else {
                self.descend(node.child_mut(positive), index + 1)
            };

            self.decided[index] = None;
            self.trail.pop();
            self.engine.melt(lit);

            match outcome? {
                Descent::Improved => return Ok(Descent::Improved),
                Descent::DeadlineReached => return Ok(Descent::DeadlineReached),
                Descent::Exhausted => node.mark_visited(positive),
            }
        }

        debug_assert!(node.is_visited());
        Ok(Descent::Exhausted)
    }

    /// Solve under the full decision path and compare against the incumbent.
    fn solve_leaf(&mut self) -> Result<Descent, SatError> {
        for &literal in &self.trail {
            self.engine.assume(literal);
        }
        self.solve_calls += 1;

        match self.engine.solve() {
            SolveStatus::Satisfiable => {
                let model: Vec<bool> = self.cells.iter().map(|c| self.engine.value(c.lit)).collect();
                let alive = model.iter().filter(|&&a| a).count();

                if alive < self.best_alive {
                    self.incumbent = model;
                    self.best_alive = alive;
                    self.improvements += 1;
                    Ok(Descent::Improved)
                } else {
                    Ok(Descent::Exhausted)
                }
            }
            SolveStatus::Unsatisfiable => Ok(Descent::Exhausted),
            SolveStatus::Unknown => Err(SatError::EngineFailure {
                operation: "branch solve",
            }),
        }
    }

    /// Predicted final population if `index` is decided as `positive`: the
    /// decided-alive count under that hypothesis plus an alive-probability
    /// estimate for every still-undecided cell.
    fn branch_score(&self, index: usize, positive: bool, node: &DecisionNode) -> f64 {
        let mut score = 0.0;

        for (i, cell) in self.cells.iter().enumerate() {
            let decision = if i == index {
                Some(positive)
            } else {
                self.decided[i]
            };
            match decision {
                Some(true) => score += 1.0,
                Some(false) => {}
                None => score += self.alive_estimate(cell, index, positive),
            }
        }

        if node.branch_explored(positive) {
            score += EXPLORATION_BONUS;
        }
        score
    }

    /// Alive-probability estimate for an undecided cell, derived from its
    /// already-decided neighbors: 0 at four or more alive (overpopulation),
    /// certain at exactly three (birth), even odds at two, and proportional
    /// to the alive count below that.
    fn alive_estimate(&self, cell: &Cell, hypothesis_index: usize, hypothesis: bool) -> f64 {
        let mut alive = 0u32;
        for dx in -1..=1 {
            for dy in -1i32..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let Some(neighbor) = self.cell_at(cell.x + dx, cell.y + dy) else {
                    continue;
                };
                let decision = if neighbor == hypothesis_index {
                    Some(hypothesis)
                } else {
                    self.decided[neighbor]
                };
                if decision == Some(true) {
                    alive += 1;
                }
            }
        }

        match alive {
            a if a >= 4 => 0.0,
            3 => 1.0,
            2 => 0.5,
            a => f64::from(a) / 8.0,
        }
    }

    fn cell_at(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return None;
        }
        self.position_index[(x + y * self.width) as usize]
    }

    fn deadline_reached(&self) -> bool {
        self.deadline
            .map_or(false, |deadline| Instant::now() >= deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::constraints::Clause;
    use crate::sat::engine::CadicalEngine;
    use crate::sat::testing::InstrumentedEngine;
    use crate::sat::VariableAllocator;

    #[test]
    fn test_decision_node_visits_propagate() {
        let mut node = DecisionNode::default();
        assert!(!node.is_visited());

        node.child_mut(false).mark_visited(false);
        node.child_mut(false).mark_visited(true);
        assert!(node.child_mut(false).is_visited());

        node.mark_visited(false);
        node.mark_visited(true);
        assert!(node.is_visited());

        // Exhausted subtrees are discarded.
        assert!(node.negative.is_none());
        assert!(node.positive.is_none());
    }

    #[test]
    fn test_branch_explored_tracks_partial_subtrees() {
        let mut node = DecisionNode::default();
        assert!(!node.branch_explored(true));

        node.child_mut(true);
        assert!(node.branch_explored(true));
        assert!(!node.branch_explored(false));

        node.mark_visited(false);
        assert!(node.branch_explored(false));
    }

    fn field_with_engine(
        width: i32,
        height: i32,
    ) -> (LiteralField, VariableAllocator, CadicalEngine) {
        let mut allocator = VariableAllocator::new();
        let mut engine = CadicalEngine::new();
        let field = LiteralField::new(width, height, &mut allocator, &mut engine).unwrap();
        (field, allocator, engine)
    }

    #[test]
    fn test_infeasible_formula_is_reported() {
        let (field, _allocator, mut engine) = field_with_engine(2, 1);
        let lit = field.lit(0, 0);
        engine.add_clause(&Clause::unit(lit));
        engine.add_clause(&Clause::unit(-lit));

        let result = PopulationMinimizer::minimize(&mut engine, &field, None);
        assert!(matches!(result, Err(SatError::Infeasible)));
    }

    #[test]
    fn test_minimum_found_and_proven() {
        // "At least one of the two cells is alive": the minimum is 1.
        let (field, _allocator, mut engine) = field_with_engine(2, 1);
        engine.add_clause(&Clause::binary(field.lit(0, 0), field.lit(1, 0)));

        let outcome = PopulationMinimizer::minimize(&mut engine, &field, None).unwrap();

        assert_eq!(outcome.alive_count, 1);
        assert!(outcome.proven_optimal);
        assert!(outcome.alive_count <= outcome.base_alive_count);
        assert_eq!(
            outcome.assignment.iter().filter(|&&alive| alive).count(),
            outcome.alive_count
        );
    }

    #[test]
    fn test_final_model_matches_outcome() {
        let (field, _allocator, mut engine) = field_with_engine(3, 1);
        engine.add_clause(&Clause::new(vec![
            field.lit(0, 0),
            field.lit(1, 0),
            field.lit(2, 0),
        ]));

        let outcome = PopulationMinimizer::minimize(&mut engine, &field, None).unwrap();

        // The replay solve leaves the engine's model on the incumbent.
        for (i, &alive) in outcome.assignment.iter().enumerate() {
            assert_eq!(engine.value(field.lit(i as i32, 0)), alive);
        }
        assert_eq!(outcome.alive_count, 1);
    }

    #[test]
    fn test_exhausted_branches_are_never_resolved() {
        let (field, _allocator, engine) = field_with_engine(2, 1);
        let mut engine = InstrumentedEngine::new(engine);
        engine.add_clause(&Clause::binary(field.lit(0, 0), field.lit(1, 0)));

        let outcome = PopulationMinimizer::minimize(&mut engine, &field, None).unwrap();

        // A 2-cell field has 4 leaves; every improvement re-solves the
        // improved leaf once after the restart. Anything beyond that would
        // mean a visited branch was descended again.
        assert!(outcome.solve_calls <= 4 + outcome.improvements);
        // initial + leaf solves + incumbent replay
        assert_eq!(engine.solve_calls, outcome.solve_calls + 2);
    }

    #[test]
    fn test_freeze_and_melt_are_balanced() {
        let (field, _allocator, engine) = field_with_engine(2, 2);
        let mut engine = InstrumentedEngine::new(engine);
        engine.add_clause(&Clause::binary(field.lit(0, 0), field.lit(1, 1)));

        PopulationMinimizer::minimize(&mut engine, &field, None).unwrap();

        assert_eq!(engine.freeze_calls, engine.melt_calls);
        for y in 0..2 {
            for x in 0..2 {
                assert!(!engine.inner.is_frozen(field.lit(x, y)));
            }
        }
    }

    #[test]
    fn test_expired_deadline_still_returns_base_incumbent() {
        let (field, _allocator, mut engine) = field_with_engine(2, 2);
        engine.add_clause(&Clause::unit(field.lit(0, 0)));

        let deadline = Some(Instant::now());
        let outcome = PopulationMinimizer::minimize(&mut engine, &field, deadline).unwrap();

        // No branch was tried, so the base model is reported as best-effort.
        assert!(!outcome.proven_optimal);
        assert_eq!(outcome.alive_count, outcome.base_alive_count);
        assert_eq!(outcome.solve_calls, 0);
    }
}
