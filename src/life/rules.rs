//! The automaton's update rule

use super::Grid;
use rayon::prelude::*;

/// Conway's Game of Life rules.
pub struct Rules;

impl Rules {
    /// Evolve the grid one generation forward.
    pub fn evolve(current: &Grid) -> Grid {
        let cells: Vec<bool> = (0..current.height)
            .into_par_iter()
            .flat_map_iter(|row| {
                (0..current.width).map(move |col| {
                    Self::should_be_alive(
                        current.get(row, col),
                        current.count_neighbors(row, col),
                    )
                })
            })
            .collect();

        Grid {
            width: current.width,
            height: current.height,
            cells,
        }
    }

    /// Evolve the grid for multiple generations.
    pub fn evolve_generations(mut grid: Grid, generations: usize) -> Grid {
        for _ in 0..generations {
            grid = Self::evolve(&grid);
        }
        grid
    }

    /// The transition function: alive next iff three alive neighbors, or
    /// currently alive with exactly two.
    pub fn should_be_alive(current: bool, neighbors: u8) -> bool {
        matches!((current, neighbors), (true, 2) | (_, 3))
    }

    /// Check that `predecessor` evolves into `target` in `generations` steps.
    pub fn validate_evolution(predecessor: &Grid, target: &Grid, generations: usize) -> bool {
        predecessor.width == target.width
            && predecessor.height == target.height
            && Self::evolve_generations(predecessor.clone(), generations) == *target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_still_life_block() {
        let block = Grid::from_cells(vec![
            vec![false, false, false, false],
            vec![false, true, true, false],
            vec![false, true, true, false],
            vec![false, false, false, false],
        ])
        .unwrap();

        assert_eq!(Rules::evolve(&block), block);
    }

    #[test]
    fn test_blinker_oscillates() {
        let horizontal = Grid::from_cells(vec![
            vec![false, false, false],
            vec![true, true, true],
            vec![false, false, false],
        ])
        .unwrap();
        let vertical = Grid::from_cells(vec![
            vec![false, true, false],
            vec![false, true, false],
            vec![false, true, false],
        ])
        .unwrap();

        assert_eq!(Rules::evolve(&horizontal), vertical);
        assert_eq!(Rules::evolve_generations(horizontal.clone(), 2), horizontal);
    }

    #[test]
    fn test_lone_cell_dies() {
        let mut grid = Grid::new(3, 3);
        grid.set(1, 1, true).unwrap();

        assert!(Rules::evolve(&grid).is_empty());
    }

    #[test]
    fn test_rule_table() {
        assert!(Rules::should_be_alive(true, 2));
        assert!(Rules::should_be_alive(true, 3));
        assert!(Rules::should_be_alive(false, 3));
        assert!(!Rules::should_be_alive(true, 1));
        assert!(!Rules::should_be_alive(true, 4));
        assert!(!Rules::should_be_alive(false, 2));
        assert!(!Rules::should_be_alive(false, 0));
    }

    #[test]
    fn test_validate_evolution() {
        let vertical = Grid::from_cells(vec![
            vec![false, true, false],
            vec![false, true, false],
            vec![false, true, false],
        ])
        .unwrap();
        let horizontal = Grid::from_cells(vec![
            vec![false, false, false],
            vec![true, true, true],
            vec![false, false, false],
        ])
        .unwrap();

        assert!(Rules::validate_evolution(&vertical, &horizontal, 1));
        assert!(Rules::validate_evolution(&vertical, &vertical, 2));
        assert!(!Rules::validate_evolution(&vertical, &horizontal, 2));
    }
}
