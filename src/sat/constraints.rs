//! Clause representation and pattern constraints

use super::error::SatError;
use super::field::LiteralField;
use crate::pattern::{CellState, Pattern};

/// A SAT clause: a disjunction of literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    /// Positive for a variable, negative for its negation.
    pub literals: Vec<i32>,
}

impl Clause {
    /// Create a clause from literals
    pub fn new(literals: Vec<i32>) -> Self {
        Self { literals }
    }

    /// Create a unit clause (single literal)
    pub fn unit(literal: i32) -> Self {
        Self {
            literals: vec![literal],
        }
    }

    /// Create a binary clause (two literals)
    pub fn binary(lit1: i32, lit2: i32) -> Self {
        Self {
            literals: vec![lit1, lit2],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }
}

/// Pins a field's cells to the known parts of a loaded pattern.
pub struct PatternConstraintEncoder;

impl PatternConstraintEncoder {
    /// Emit one unit clause per known pattern cell: positive for Alive,
    /// negative for Dead. Unknown cells stay free.
    ///
    /// The resulting clauses extend the formula permanently; they are not
    /// assumptions.
    pub fn apply(field: &LiteralField, pattern: &Pattern) -> Result<Vec<Clause>, SatError> {
        if field.width() != pattern.width() || field.height() != pattern.height() {
            return Err(SatError::DimensionMismatch {
                left_width: field.width(),
                left_height: field.height(),
                right_width: pattern.width(),
                right_height: pattern.height(),
            });
        }

        let mut clauses = Vec::new();
        for y in 0..pattern.height() {
            for x in 0..pattern.width() {
                match pattern.cell(x, y) {
                    CellState::Alive => clauses.push(Clause::unit(field.lit(x, y))),
                    CellState::Dead => clauses.push(Clause::unit(-field.lit(x, y))),
                    // FixedDead border cells are left unconstrained, exactly
                    // like Unknown ones.
                    CellState::Unknown | CellState::FixedDead => {}
                }
            }
        }

        Ok(clauses)
    }
}
