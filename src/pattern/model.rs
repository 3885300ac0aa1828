//! Pattern data model

use crate::life::Grid;
use anyhow::Result;

/// Constraint state of one pattern cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Alive,
    Dead,
    /// No constraint; the solver is free to pick either value.
    Unknown,
    /// A border cell the loader inferred to be permanently dead.
    FixedDead,
}

/// A partially-known grid of cell states. Read-only once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    width: i32,
    height: i32,
    /// Row-major, `x + y * width`.
    cells: Vec<CellState>,
}

impl Pattern {
    /// Build a pattern from row-major cell states.
    ///
    /// With `border_inference` enabled, Dead cells on the outer ring are
    /// upgraded to FixedDead.
    pub fn from_cells(
        width: i32,
        height: i32,
        mut cells: Vec<CellState>,
        border_inference: bool,
    ) -> Result<Self> {
        if width <= 0 || height <= 0 {
            anyhow::bail!("pattern dimensions must be positive, got {}x{}", width, height);
        }
        let expected = width as usize * height as usize;
        if cells.len() != expected {
            anyhow::bail!(
                "pattern cell count {} does not match {}x{}",
                cells.len(),
                width,
                height
            );
        }

        if border_inference {
            for y in 0..height {
                for x in 0..width {
                    let border = x == 0 || x == width - 1 || y == 0 || y == height - 1;
                    let index = (x + y * width) as usize;
                    if border && cells[index] == CellState::Dead {
                        cells[index] = CellState::FixedDead;
                    }
                }
            }
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// State of the cell at `(x, y)`. Panics on out-of-bounds coordinates.
    pub fn cell(&self, x: i32, y: i32) -> CellState {
        assert!(
            x >= 0 && x < self.width && y >= 0 && y < self.height,
            "pattern cell ({}, {}) out of bounds for {}x{}",
            x,
            y,
            self.width,
            self.height
        );
        self.cells[(x + y * self.width) as usize]
    }

    /// Number of cells required to be alive
    pub fn alive_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|&&c| c == CellState::Alive)
            .count()
    }

    /// Convert to a plain grid. Fails if any cell is Unknown; FixedDead
    /// converts to dead.
    pub fn to_grid(&self) -> Result<Grid> {
        let mut grid = Grid::new(self.width as usize, self.height as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                let alive = match self.cell(x, y) {
                    CellState::Alive => true,
                    CellState::Dead | CellState::FixedDead => false,
                    CellState::Unknown => {
                        anyhow::bail!("cell ({}, {}) is unknown; the pattern is not a concrete grid", x, y)
                    }
                };
                grid.set(y as usize, x as usize, alive)?;
            }
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_count_is_checked() {
        assert!(Pattern::from_cells(2, 2, vec![CellState::Dead; 3], false).is_err());
        assert!(Pattern::from_cells(2, 2, vec![CellState::Dead; 5], false).is_err());
        assert!(Pattern::from_cells(0, 2, vec![], false).is_err());
        assert!(Pattern::from_cells(2, 2, vec![CellState::Dead; 4], false).is_ok());
    }

    #[test]
    fn test_border_inference_marks_only_dead_border_cells() {
        let mut cells = vec![CellState::Dead; 9];
        cells[0] = CellState::Alive; // border, alive
        cells[4] = CellState::Dead; // center, dead
        cells[8] = CellState::Unknown; // border, unknown

        let pattern = Pattern::from_cells(3, 3, cells, true).unwrap();

        assert_eq!(pattern.cell(0, 0), CellState::Alive);
        assert_eq!(pattern.cell(1, 0), CellState::FixedDead);
        assert_eq!(pattern.cell(1, 1), CellState::Dead);
        assert_eq!(pattern.cell(2, 2), CellState::Unknown);
    }

    #[test]
    fn test_to_grid_rejects_unknown_cells() {
        let pattern =
            Pattern::from_cells(2, 1, vec![CellState::Alive, CellState::Unknown], false).unwrap();
        assert!(pattern.to_grid().is_err());

        let pattern =
            Pattern::from_cells(2, 1, vec![CellState::Alive, CellState::FixedDead], false).unwrap();
        let grid = pattern.to_grid().unwrap();
        assert!(grid.get(0, 0));
        assert!(!grid.get(0, 1));
    }
}
