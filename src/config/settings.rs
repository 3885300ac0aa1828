//! Settings for reachability runs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub simulation: SimulationConfig,
    pub solver: SolverConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of evolution steps linked by transition clauses.
    pub evolutions: usize,
    /// Pin the pattern to the last generation and search for its history
    /// (true), or pin the first generation and compute its future (false).
    pub backwards: bool,
    /// Let the board grow by one ring per step towards the unconstrained end.
    pub grow: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Search for a population-minimal model after the first solve.
    pub minimize: bool,
    /// Generation whose live cells are minimized.
    pub minimize_generation: usize,
    /// Wall-clock budget for the minimization search; 0 disables the limit.
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub pattern_file: PathBuf,
    /// Mark dead border cells of the pattern as permanently dead.
    pub border_inference: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub save_solutions: bool,
    pub output_directory: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig {
                evolutions: 1,
                backwards: true,
                grow: false,
            },
            solver: SolverConfig {
                minimize: true,
                minimize_generation: 0,
                timeout_seconds: 300,
            },
            input: InputConfig {
                pattern_file: PathBuf::from("patterns/block.txt"),
                border_inference: true,
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                save_solutions: false,
                output_directory: PathBuf::from("output/solutions"),
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings against a run
    pub fn validate(&self) -> Result<()> {
        if self.simulation.evolutions == 0 {
            anyhow::bail!("number of evolutions must be positive");
        }
        if self.solver.minimize && self.solver.minimize_generation > self.simulation.evolutions {
            anyhow::bail!(
                "minimize_generation {} exceeds the last generation {}",
                self.solver.minimize_generation,
                self.simulation.evolutions
            );
        }
        if !self.input.pattern_file.exists() {
            anyhow::bail!(
                "pattern file does not exist: {}",
                self.input.pattern_file.display()
            );
        }
        Ok(())
    }

    /// Apply command line overrides
    pub fn merge_with_cli(&mut self, overrides: &CliOverrides) {
        if let Some(ref pattern_file) = overrides.pattern_file {
            self.input.pattern_file = pattern_file.clone();
        }
        if let Some(evolutions) = overrides.evolutions {
            self.simulation.evolutions = evolutions;
        }
        if let Some(backwards) = overrides.backwards {
            self.simulation.backwards = backwards;
        }
        if let Some(grow) = overrides.grow {
            self.simulation.grow = grow;
        }
        if let Some(minimize) = overrides.minimize {
            self.solver.minimize = minimize;
        }
        if let Some(timeout) = overrides.timeout_seconds {
            self.solver.timeout_seconds = timeout;
        }
        if let Some(border_inference) = overrides.border_inference {
            self.input.border_inference = border_inference;
        }
        if let Some(ref output_dir) = overrides.output_directory {
            self.output.output_directory = output_dir.clone();
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub pattern_file: Option<PathBuf>,
    pub evolutions: Option<usize>,
    pub backwards: Option<bool>,
    pub grow: Option<bool>,
    pub minimize: Option<bool>,
    pub timeout_seconds: Option<u64>,
    pub border_inference: Option<bool>,
    pub output_directory: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_yaml_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        let mut settings = Settings::default();
        settings.simulation.evolutions = 3;
        settings.solver.timeout_seconds = 42;
        settings.output.format = OutputFormat::Json;

        settings.to_file(&path).unwrap();
        let loaded = Settings::from_file(&path).unwrap();

        assert_eq!(loaded.simulation.evolutions, 3);
        assert_eq!(loaded.solver.timeout_seconds, 42);
        assert_eq!(loaded.output.format, OutputFormat::Json);
        assert!(loaded.simulation.backwards);
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let dir = tempdir().unwrap();
        let pattern_path = dir.path().join("p.txt");
        std::fs::write(&pattern_path, "1 1 .").unwrap();

        let mut settings = Settings::default();
        settings.input.pattern_file = pattern_path;
        assert!(settings.validate().is_ok());

        settings.simulation.evolutions = 0;
        assert!(settings.validate().is_err());

        settings.simulation.evolutions = 2;
        settings.solver.minimize_generation = 3;
        assert!(settings.validate().is_err());

        settings.solver.minimize_generation = 0;
        settings.input.pattern_file = dir.path().join("missing.txt");
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut settings = Settings::default();
        let overrides = CliOverrides {
            pattern_file: Some(PathBuf::from("other.txt")),
            evolutions: Some(4),
            backwards: Some(false),
            minimize: Some(false),
            ..Default::default()
        };

        settings.merge_with_cli(&overrides);

        assert_eq!(settings.input.pattern_file, PathBuf::from("other.txt"));
        assert_eq!(settings.simulation.evolutions, 4);
        assert!(!settings.simulation.backwards);
        assert!(!settings.solver.minimize);
        // Untouched options keep their configured values.
        assert!(settings.input.border_inference);
    }
}
