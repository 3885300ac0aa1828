//! Solution validation by direct re-simulation

use super::solution::Solution;
use crate::life::{Grid, Rules};
use crate::sat::SatError;
use anyhow::Result;
use std::fmt;

/// Verdict for one evolution step of a history.
#[derive(Debug, Clone)]
pub struct StepReport {
    pub step: usize,
    pub valid: bool,
    /// First cell (row, col) of the successor that violates the rule.
    pub first_mismatch: Option<(usize, usize)>,
}

/// Verdict for a whole history.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub steps: Vec<StepReport>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.steps.iter().all(|step| step.valid)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            if step.valid {
                writeln!(f, "step {}: VALID", step.step)?;
            } else {
                match step.first_mismatch {
                    Some((row, col)) => writeln!(
                        f,
                        "step {}: INVALID (first mismatch at row {}, col {})",
                        step.step, row, col
                    )?,
                    None => writeln!(f, "step {}: INVALID", step.step)?,
                }
            }
        }
        Ok(())
    }
}

/// Re-simulates a history and checks every step against the rule.
pub struct SolutionValidator;

impl SolutionValidator {
    /// Validate every consecutive generation pair of a solution.
    pub fn validate(solution: &Solution) -> Result<ValidationReport> {
        let mut steps = Vec::with_capacity(solution.steps());
        for (i, pair) in solution.generations.windows(2).enumerate() {
            let (valid, first_mismatch) = Self::check_step(&pair[0], &pair[1])?;
            steps.push(StepReport {
                step: i + 1,
                valid,
                first_mismatch,
            });
        }
        Ok(ValidationReport { steps })
    }

    /// Validate a single predecessor/successor pair of equal size.
    pub fn validate_pair(predecessor: &Grid, successor: &Grid) -> Result<StepReport> {
        let (valid, first_mismatch) = Self::check_step(predecessor, successor)?;
        Ok(StepReport {
            step: 1,
            valid,
            first_mismatch,
        })
    }

    fn check_step(prev: &Grid, next: &Grid) -> Result<(bool, Option<(usize, usize)>)> {
        let expected = Self::expected_successor(prev, next)?;

        for row in 0..next.height {
            for col in 0..next.width {
                if expected.get(row, col) != next.get(row, col) {
                    return Ok((false, Some((row, col))));
                }
            }
        }
        Ok((true, None))
    }

    /// Compute what `next` must look like under the rule, honoring the three
    /// size policies of the encoding.
    fn expected_successor(prev: &Grid, next: &Grid) -> Result<Grid> {
        if prev.width == next.width && prev.height == next.height {
            Ok(Rules::evolve(prev))
        } else if prev.width + 2 == next.width && prev.height + 2 == next.height {
            Ok(Rules::evolve(&prev.embedded(1)))
        } else if prev.width == next.width + 2 && prev.height == next.height + 2 {
            Rules::evolve(prev).cropped(1).ok_or_else(|| {
                SatError::DimensionMismatch {
                    left_width: prev.width as i32,
                    left_height: prev.height as i32,
                    right_width: next.width as i32,
                    right_height: next.height as i32,
                }
                .into()
            })
        } else {
            Err(SatError::DimensionMismatch {
                left_width: prev.width as i32,
                left_height: prev.height as i32,
                right_width: next.width as i32,
                right_height: next.height as i32,
            }
            .into())
        }
    }
}
