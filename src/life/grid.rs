//! Grid representation

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A concrete Game of Life grid. Cells outside the grid are dead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    /// Row-major, `col + row * width`.
    pub cells: Vec<bool>,
}

impl Grid {
    /// Create an all-dead grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Create a grid from a 2D boolean array
    pub fn from_cells(cells: Vec<Vec<bool>>) -> Result<Self> {
        if cells.is_empty() {
            anyhow::bail!("grid cannot be empty");
        }

        let height = cells.len();
        let width = cells[0].len();
        if width == 0 {
            anyhow::bail!("grid width cannot be zero");
        }
        for (i, row) in cells.iter().enumerate() {
            if row.len() != width {
                anyhow::bail!("row {} has length {}, expected {}", i, row.len(), width);
            }
        }

        Ok(Self {
            width,
            height,
            cells: cells.into_iter().flatten().collect(),
        })
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        col + row * self.width
    }

    /// Cell value; out-of-bounds coordinates are dead.
    pub fn get(&self, row: usize, col: usize) -> bool {
        if row < self.height && col < self.width {
            self.cells[self.index(row, col)]
        } else {
            false
        }
    }

    pub fn set(&mut self, row: usize, col: usize, value: bool) -> Result<()> {
        if row >= self.height || col >= self.width {
            anyhow::bail!(
                "coordinates ({}, {}) out of bounds for {}x{} grid",
                row,
                col,
                self.width,
                self.height
            );
        }
        let index = self.index(row, col);
        self.cells[index] = value;
        Ok(())
    }

    /// Count living neighbors in the Moore neighborhood, dead boundary.
    pub fn count_neighbors(&self, row: usize, col: usize) -> u8 {
        let mut count = 0;
        for dr in [-1isize, 0, 1] {
            for dc in [-1isize, 0, 1] {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let r = row as isize + dr;
                let c = col as isize + dc;
                if r >= 0
                    && (r as usize) < self.height
                    && c >= 0
                    && (c as usize) < self.width
                    && self.cells[self.index(r as usize, c as usize)]
                {
                    count += 1;
                }
            }
        }
        count
    }

    /// Count total living cells
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|&cell| cell)
    }

    /// Copy this grid into the center of a larger all-dead grid, shifted by
    /// `margin` in both dimensions.
    pub fn embedded(&self, margin: usize) -> Self {
        let mut grid = Grid::new(self.width + 2 * margin, self.height + 2 * margin);
        for row in 0..self.height {
            for col in 0..self.width {
                if self.get(row, col) {
                    let index = grid.index(row + margin, col + margin);
                    grid.cells[index] = true;
                }
            }
        }
        grid
    }

    /// The inner region of this grid, `margin` cells away from every edge.
    /// Returns `None` when no such region exists.
    pub fn cropped(&self, margin: usize) -> Option<Self> {
        if self.width <= 2 * margin || self.height <= 2 * margin {
            return None;
        }
        let mut grid = Grid::new(self.width - 2 * margin, self.height - 2 * margin);
        for row in 0..grid.height {
            for col in 0..grid.width {
                let index = grid.index(row, col);
                grid.cells[index] = self.get(row + margin, col + margin);
            }
        }
        Some(grid)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                write!(f, "{}", if self.get(row, col) { 'X' } else { '.' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(3, 2);
        assert_eq!(grid.width, 3);
        assert_eq!(grid.height, 2);
        assert_eq!(grid.cells.len(), 6);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_from_cells_rejects_ragged_rows() {
        assert!(Grid::from_cells(vec![]).is_err());
        assert!(Grid::from_cells(vec![vec![]]).is_err());
        assert!(Grid::from_cells(vec![vec![true, false], vec![true]]).is_err());
    }

    #[test]
    fn test_neighbor_counting_with_dead_boundary() {
        let grid = Grid::from_cells(vec![
            vec![true, true, true],
            vec![true, false, true],
            vec![true, true, true],
        ])
        .unwrap();

        assert_eq!(grid.count_neighbors(1, 1), 8);
        assert_eq!(grid.count_neighbors(0, 0), 2); // center is dead
        assert_eq!(grid.count_neighbors(0, 1), 4);
    }

    #[test]
    fn test_embed_and_crop_are_inverse() {
        let grid = Grid::from_cells(vec![vec![true, false], vec![false, true]]).unwrap();

        let embedded = grid.embedded(1);
        assert_eq!(embedded.width, 4);
        assert_eq!(embedded.height, 4);
        assert!(embedded.get(1, 1));
        assert!(embedded.get(2, 2));
        assert_eq!(embedded.living_count(), 2);

        assert_eq!(embedded.cropped(1), Some(grid));
        assert_eq!(Grid::new(2, 2).cropped(1), None);
    }

    #[test]
    fn test_display_uses_readback_glyphs() {
        let grid = Grid::from_cells(vec![vec![false, true], vec![true, false]]).unwrap();
        assert_eq!(grid.to_string(), ".X\nX.\n");
    }
}
