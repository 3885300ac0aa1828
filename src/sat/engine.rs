//! Incremental SAT engine contract and the CaDiCaL-backed implementation

use super::constraints::Clause;
use cadical::Solver;
use std::collections::HashSet;

/// Outcome of a solve or simplify call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    Satisfiable,
    Unsatisfiable,
    /// The engine gave up or was interrupted before reaching a verdict.
    Unknown,
}

/// Contract for the external satisfiability engine.
///
/// The engine is a single-owner sequential resource: clause additions,
/// assumptions, freeze/melt hints and solves must all be issued from one
/// logical thread, in program order.
pub trait SatEngine {
    /// Permanently add a clause to the formula.
    fn add_clause(&mut self, clause: &Clause);

    /// Constrain a literal to true for the next solve call only.
    fn assume(&mut self, literal: i32);

    /// Solve the formula under the pending assumptions, consuming them.
    fn solve(&mut self) -> SolveStatus;

    /// Truth value of a literal in the last model. Literals the engine left
    /// unassigned read as false.
    fn value(&self, literal: i32) -> bool;

    /// Hint that the literal's variable must survive internal simplification.
    fn freeze(&mut self, literal: i32);

    /// Withdraw a previous freeze hint.
    fn melt(&mut self, literal: i32);

    /// Run the engine's preprocessing, which may decide UNSAT outright.
    /// Engines without a separate preprocessing entry point return
    /// [`SolveStatus::Unknown`].
    fn simplify(&mut self) -> SolveStatus {
        SolveStatus::Unknown
    }

    /// Highest variable identifier seen in any added clause
    fn variable_count(&self) -> usize;

    /// Number of clauses added so far
    fn clause_count(&self) -> usize;
}

/// SAT engine backed by CaDiCaL.
pub struct CadicalEngine {
    solver: Solver,
    /// Assumptions queued for the next solve call.
    assumptions: Vec<i32>,
    /// Variables currently marked as must-preserve. CaDiCaL keeps assumption
    /// variables usable across incremental calls on its own, so the hint is
    /// tracked here rather than forwarded.
    frozen: HashSet<i32>,
    variable_count: usize,
    clause_count: usize,
    solve_count: usize,
}

impl CadicalEngine {
    /// Create a fresh engine with an empty formula
    pub fn new() -> Self {
        Self {
            solver: Solver::new(),
            assumptions: Vec::new(),
            frozen: HashSet::new(),
            variable_count: 0,
            clause_count: 0,
            solve_count: 0,
        }
    }

    /// Number of solve calls issued so far
    pub fn solve_count(&self) -> usize {
        self.solve_count
    }

    /// Whether a variable currently carries a freeze hint
    pub fn is_frozen(&self, variable: i32) -> bool {
        self.frozen.contains(&variable.abs())
    }
}

impl Default for CadicalEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SatEngine for CadicalEngine {
    fn add_clause(&mut self, clause: &Clause) {
        debug_assert!(!clause.is_empty(), "refusing to add the empty clause");

        for &literal in &clause.literals {
            let variable = literal.unsigned_abs() as usize;
            if variable > self.variable_count {
                self.variable_count = variable;
            }
        }

        self.solver.add_clause(clause.literals.iter().copied());
        self.clause_count += 1;
    }

    fn assume(&mut self, literal: i32) {
        let variable = literal.unsigned_abs() as usize;
        if variable > self.variable_count {
            self.variable_count = variable;
        }
        self.assumptions.push(literal);
    }

    fn solve(&mut self) -> SolveStatus {
        let assumptions = std::mem::take(&mut self.assumptions);
        self.solve_count += 1;

        match self.solver.solve_with(assumptions.into_iter()) {
            Some(true) => SolveStatus::Satisfiable,
            Some(false) => SolveStatus::Unsatisfiable,
            None => SolveStatus::Unknown,
        }
    }

    fn value(&self, literal: i32) -> bool {
        debug_assert!(literal != 0, "0 is the clause terminator, not a literal");

        // Variables the solver has never seen cannot be queried; they read
        // as unassigned.
        if literal.unsigned_abs() as usize > self.variable_count {
            return false;
        }

        match self.solver.value(literal.abs()) {
            Some(assigned) => {
                if literal > 0 {
                    assigned
                } else {
                    !assigned
                }
            }
            None => false,
        }
    }

    fn freeze(&mut self, literal: i32) {
        self.frozen.insert(literal.abs());
    }

    fn melt(&mut self, literal: i32) {
        self.frozen.remove(&literal.abs());
    }

    // CaDiCaL runs inprocessing during solve; the binding exposes no separate
    // preprocessing call, so the default `simplify` (Unknown) applies.

    fn variable_count(&self) -> usize {
        self.variable_count
    }

    fn clause_count(&self) -> usize {
        self.clause_count
    }
}
