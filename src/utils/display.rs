//! Solution rendering and export

use crate::config::OutputFormat;
use crate::evolution::Solution;
use crate::life::Grid;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Formats solutions for the console and for files.
pub struct SolutionFormatter;

impl SolutionFormatter {
    /// Render a whole history, one generation after the other, with a live
    /// cell count per generation.
    pub fn format_solution(solution: &Solution, backwards: bool) -> String {
        let last = solution.steps();
        let mut output = String::new();

        for (g, grid) in solution.generations.iter().enumerate() {
            let header = match (g, backwards) {
                (0, true) => "-- Initial generation:",
                (0, false) => "-- Initial generation (from pattern):",
                (g, true) if g == last => "-- Evolves to final generation (from pattern):",
                (g, false) if g == last => "-- Evolves to final generation:",
                _ => "-- Evolves to:",
            };
            output.push_str(header);
            output.push('\n');
            output.push_str(&Self::format_grid(grid));
            output.push_str(&format!("alive: {}\n\n", solution.stats.alive_counts[g]));
        }

        output
    }

    /// Render one grid as `.`/`X` rows.
    pub fn format_grid(grid: &Grid) -> String {
        grid.to_string()
    }

    /// Write the solution into `directory`, named after the format.
    pub fn save_solution<P: AsRef<Path>>(
        solution: &Solution,
        directory: P,
        format: OutputFormat,
        backwards: bool,
    ) -> Result<PathBuf> {
        let directory = directory.as_ref();
        std::fs::create_dir_all(directory)
            .with_context(|| format!("failed to create directory: {}", directory.display()))?;

        let (name, content) = match format {
            OutputFormat::Text => (
                "solution.txt",
                Self::format_solution(solution, backwards),
            ),
            OutputFormat::Json => (
                "solution.json",
                serde_json::to_string_pretty(solution).context("failed to serialize solution")?,
            ),
        };

        let path = directory.join(name);
        std::fs::write(&path, content)
            .with_context(|| format!("failed to write solution to {}", path.display()))?;
        Ok(path)
    }
}
