//! Engine test doubles shared by the sat module's unit tests

use super::constraints::Clause;
use super::engine::{SatEngine, SolveStatus};

/// Records every interaction and answers a fixed solve status. Used where a
/// test only cares about the clauses a component emits.
pub struct RecordingEngine {
    pub clauses: Vec<Clause>,
    pub status: SolveStatus,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self {
            clauses: Vec::new(),
            status: SolveStatus::Unknown,
        }
    }
}

impl SatEngine for RecordingEngine {
    fn add_clause(&mut self, clause: &Clause) {
        self.clauses.push(clause.clone());
    }

    fn assume(&mut self, _literal: i32) {}

    fn solve(&mut self) -> SolveStatus {
        self.status
    }

    fn value(&self, _literal: i32) -> bool {
        false
    }

    fn freeze(&mut self, _literal: i32) {}

    fn melt(&mut self, _literal: i32) {}

    fn variable_count(&self) -> usize {
        self.clauses
            .iter()
            .flat_map(|c| c.literals.iter())
            .map(|l| l.unsigned_abs() as usize)
            .max()
            .unwrap_or(0)
    }

    fn clause_count(&self) -> usize {
        self.clauses.len()
    }
}

/// Counts calls while delegating to a real engine.
pub struct InstrumentedEngine<E: SatEngine> {
    pub inner: E,
    pub solve_calls: usize,
    pub freeze_calls: usize,
    pub melt_calls: usize,
}

impl<E: SatEngine> InstrumentedEngine<E> {
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            solve_calls: 0,
            freeze_calls: 0,
            melt_calls: 0,
        }
    }
}

impl<E: SatEngine> SatEngine for InstrumentedEngine<E> {
    fn add_clause(&mut self, clause: &Clause) {
        self.inner.add_clause(clause);
    }

    fn assume(&mut self, literal: i32) {
        self.inner.assume(literal);
    }

    fn solve(&mut self) -> SolveStatus {
        self.solve_calls += 1;
        self.inner.solve()
    }

    fn value(&self, literal: i32) -> bool {
        self.inner.value(literal)
    }

    fn freeze(&mut self, literal: i32) {
        self.freeze_calls += 1;
        self.inner.freeze(literal);
    }

    fn melt(&mut self, literal: i32) {
        self.melt_calls += 1;
        self.inner.melt(literal);
    }

    fn simplify(&mut self) -> SolveStatus {
        self.inner.simplify()
    }

    fn variable_count(&self) -> usize {
        self.inner.variable_count()
    }

    fn clause_count(&self) -> usize {
        self.inner.clause_count()
    }
}
