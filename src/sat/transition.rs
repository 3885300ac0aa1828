//! CNF encoding of the transition rule between two generations

use super::constraints::Clause;
use super::error::SatError;
use super::field::LiteralField;
use itertools::Itertools;
use std::ops::RangeInclusive;

/// Number of cells in the Moore neighborhood.
const NEIGHBORS: usize = 8;

/// How the two field sizes relate across one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepGeometry {
    /// Same size; the footprint is extended by one ring of margin so border
    /// cells of the next field influenced by out-of-range neighbors are still
    /// constrained.
    Equal,
    /// Next field larger by one ring in each dimension; next coordinates are
    /// shifted by +1.
    Grow,
    /// Next field smaller by one ring; next coordinates shift by -1.
    Shrink,
}

impl StepGeometry {
    fn of(prev: &LiteralField, next: &LiteralField) -> Result<Self, SatError> {
        if prev.width() == next.width() && prev.height() == next.height() {
            Ok(StepGeometry::Equal)
        } else if prev.width() + 2 == next.width() && prev.height() + 2 == next.height() {
            Ok(StepGeometry::Grow)
        } else if prev.width() == next.width() + 2 && prev.height() == next.height() + 2 {
            Ok(StepGeometry::Shrink)
        } else {
            Err(SatError::DimensionMismatch {
                left_width: prev.width(),
                left_height: prev.height(),
                right_width: next.width(),
                right_height: next.height(),
            })
        }
    }

    fn offset(self) -> i32 {
        match self {
            StepGeometry::Equal => 0,
            StepGeometry::Grow => 1,
            StepGeometry::Shrink => -1,
        }
    }

    /// Coordinate ranges over the previous field's frame.
    fn ranges(self, prev: &LiteralField) -> (RangeInclusive<i32>, RangeInclusive<i32>) {
        match self {
            StepGeometry::Equal | StepGeometry::Shrink => {
                (-1..=prev.width(), -1..=prev.height())
            }
            StepGeometry::Grow => (-2..=prev.width() + 1, -2..=prev.height() + 1),
        }
    }
}

/// Emits the clauses linking two consecutive generations under the rule
/// `next = (count == 3) || (current && count == 2)`.
pub struct TransitionEncoder;

impl TransitionEncoder {
    /// Encode one evolution step from `prev` to `next`.
    ///
    /// The fields must be equal-sized, or differ by exactly one ring in each
    /// dimension; anything else fails with `DimensionMismatch`. Every
    /// processed position contributes exactly 190 clauses.
    pub fn encode_step(prev: &LiteralField, next: &LiteralField) -> Result<Vec<Clause>, SatError> {
        let geometry = StepGeometry::of(prev, next)?;
        let offset = geometry.offset();
        let (xs, ys) = geometry.ranges(prev);

        let mut clauses = Vec::new();
        for x in xs {
            for y in ys.clone() {
                let mut neighbors = [0i32; NEIGHBORS];
                let mut n = 0;
                for dx in -1..=1 {
                    for dy in -1..=1 {
                        if dx == 0 && dy == 0 {
                            continue;
                        }
                        neighbors[n] = prev.lit(x + dx, y + dy);
                        n += 1;
                    }
                }
                Self::rule(
                    prev.lit(x, y),
                    &neighbors,
                    next.lit(x + offset, y + offset),
                    &mut clauses,
                );
            }
        }

        Ok(clauses)
    }

    /// Emit the four clause groups for one cell position. Each group states a
    /// monotone fact about the alive-neighbor count; together they reproduce
    /// the transition function exactly.
    fn rule(current: i32, neighbors: &[i32; NEIGHBORS], next: i32, clauses: &mut Vec<Clause>) {
        // Underpopulation: at most 1 alive neighbor leaves the cell dead.
        // "All neighbors but one dead" implies next dead, for each choice of
        // the possibly-alive one.
        for spared in 0..NEIGHBORS {
            let condition: Vec<i32> = (0..NEIGHBORS)
                .filter(|&i| i != spared)
                .map(|i| -neighbors[i])
                .collect();
            clauses.push(Self::implication(&condition, -next));
        }

        // Status quo: exactly 2 alive neighbors keep the cell as it is.
        for pair in (0..NEIGHBORS).combinations(2) {
            let mut condition: Vec<i32> = (0..NEIGHBORS)
                .map(|i| {
                    if pair.contains(&i) {
                        neighbors[i]
                    } else {
                        -neighbors[i]
                    }
                })
                .collect();

            condition.push(current);
            clauses.push(Self::implication(&condition, next));
            condition[NEIGHBORS] = -current;
            clauses.push(Self::implication(&condition, -next));
        }

        // Birth: exactly 3 alive neighbors make the cell alive regardless of
        // its current state.
        for triple in (0..NEIGHBORS).combinations(3) {
            let condition: Vec<i32> = (0..NEIGHBORS)
                .map(|i| {
                    if triple.contains(&i) {
                        neighbors[i]
                    } else {
                        -neighbors[i]
                    }
                })
                .collect();
            clauses.push(Self::implication(&condition, next));
        }

        // Overpopulation: any 4 alive neighbors kill the cell.
        for quad in (0..NEIGHBORS).combinations(4) {
            let condition: Vec<i32> = quad.iter().map(|&i| neighbors[i]).collect();
            clauses.push(Self::implication(&condition, -next));
        }
    }

    /// Build "condition implies literal" as a disjunction: every condition
    /// literal negated, then the implied literal.
    fn implication(condition: &[i32], implied: i32) -> Clause {
        let mut literals: Vec<i32> = condition.iter().map(|&l| -l).collect();
        literals.push(implied);
        Clause::new(literals)
    }
}
