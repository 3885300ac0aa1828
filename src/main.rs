//! Command line interface for the golsat solver

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use golsat::{
    config::{CliOverrides, Settings},
    evolution::{EvolutionProblem, SolutionValidator},
    pattern::load_pattern_from_file,
    sat::SatError,
    utils::SolutionFormatter,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "golsat")]
#[command(about = "Game of Life reachability via SAT solving")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a reachability problem for a pattern file
    Solve {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Pattern file (overrides config)
        #[arg(short, long)]
        pattern: Option<PathBuf>,

        /// Number of evolution steps (overrides config)
        #[arg(short, long)]
        evolutions: Option<usize>,

        /// Pin the pattern on the last generation and search its history
        #[arg(short, long)]
        backwards: Option<bool>,

        /// Grow the board by one ring per step towards the free end
        #[arg(short, long)]
        grow: Option<bool>,

        /// Minimize the live cells of the configured generation
        #[arg(short, long)]
        minimize: Option<bool>,

        /// Minimization wall-clock budget in seconds, 0 for unlimited
        #[arg(short, long)]
        timeout: Option<u64>,

        /// Treat dead pattern border cells as permanently dead
        #[arg(long)]
        border_inference: Option<bool>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check that one concrete grid evolves into another
    Validate {
        /// Pattern file holding the predecessor (no unknown cells)
        #[arg(short, long)]
        predecessor: PathBuf,

        /// Pattern file holding the successor (no unknown cells)
        #[arg(short, long)]
        successor: PathBuf,
    },

    /// Create an example configuration and pattern files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            config,
            pattern,
            evolutions,
            backwards,
            grow,
            minimize,
            timeout,
            border_inference,
            output,
        } => solve_command(
            config,
            CliOverrides {
                pattern_file: pattern,
                evolutions,
                backwards,
                grow,
                minimize,
                timeout_seconds: timeout,
                border_inference,
                output_directory: output,
            },
        ),
        Commands::Validate {
            predecessor,
            successor,
        } => validate_command(predecessor, successor),
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

fn solve_command(config_path: PathBuf, overrides: CliOverrides) -> Result<()> {
    let mut settings = if config_path.exists() {
        Settings::from_file(&config_path)
            .with_context(|| format!("failed to load config from {}", config_path.display()))?
    } else {
        println!(
            "-- config file {} not found, using defaults",
            config_path.display()
        );
        Settings::default()
    };
    settings.merge_with_cli(&overrides);
    settings.validate().context("invalid configuration")?;

    println!(
        "-- reading pattern from file: {}",
        settings.input.pattern_file.display()
    );
    let problem = EvolutionProblem::new(settings.clone())?;

    let solution = match problem.solve() {
        Ok(solution) => solution,
        Err(error) => {
            if matches!(error.downcast_ref::<SatError>(), Some(SatError::Infeasible)) {
                eprintln!(
                    "-- formula is not solvable. The selected pattern is probably too restrictive!"
                );
            }
            return Err(error);
        }
    };

    println!();
    print!(
        "{}",
        SolutionFormatter::format_solution(&solution, settings.simulation.backwards)
    );

    let report = SolutionValidator::validate(&solution)?;
    print!("{}", report);
    println!(
        "history: {}",
        if report.is_valid() { "VALID" } else { "INVALID" }
    );

    if let Some(minimization) = &solution.stats.minimization {
        println!(
            "minimized generation {}: {} -> {} live cells ({})",
            minimization.generation,
            minimization.initial_alive,
            minimization.final_alive,
            if minimization.proven_optimal {
                "proven minimal"
            } else {
                "best effort"
            }
        );
    }
    println!("solved in {:.3}s", solution.solve_time.as_secs_f64());

    if settings.output.save_solutions {
        let path = SolutionFormatter::save_solution(
            &solution,
            &settings.output.output_directory,
            settings.output.format,
            settings.simulation.backwards,
        )?;
        println!("solution saved to {}", path.display());
    }

    Ok(())
}

fn validate_command(predecessor_path: PathBuf, successor_path: PathBuf) -> Result<()> {
    let predecessor = load_pattern_from_file(&predecessor_path, false)?
        .to_grid()
        .with_context(|| format!("predecessor {} is not concrete", predecessor_path.display()))?;
    let successor = load_pattern_from_file(&successor_path, false)?
        .to_grid()
        .with_context(|| format!("successor {} is not concrete", successor_path.display()))?;

    let report = SolutionValidator::validate_pair(&predecessor, &successor)?;
    if report.valid {
        println!("VALID");
    } else {
        match report.first_mismatch {
            Some((row, col)) => println!("INVALID (first mismatch at row {}, col {})", row, col),
            None => println!("INVALID"),
        }
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    let config_dir = directory.join("config");
    let pattern_dir = directory.join("patterns");
    let output_dir = directory.join("output/solutions");

    for dir in [&config_dir, &pattern_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        let mut settings = Settings::default();
        settings.input.pattern_file = pattern_dir.join("block.txt");
        settings.to_file(&config_path)?;
        println!("created: {}", config_path.display());
    } else {
        println!("skipped: {} (already exists)", config_path.display());
    }

    let examples: [(&str, &str); 4] = [
        ("block.txt", "4 4\n....\n.XX.\n.XX.\n....\n"),
        ("blinker.txt", "3 3\n...\nXXX\n...\n"),
        ("glider.txt", "5 5\n..X..\nX.X..\n.XX..\n.....\n.....\n"),
        // A partially-known target: the border must be dead, the rest is free.
        ("probe.txt", "5 5\n.....\n.???.\n.?X?.\n.???.\n.....\n"),
    ];
    for (name, content) in examples {
        let path = pattern_dir.join(name);
        if !path.exists() || force {
            std::fs::write(&path, content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("created: {}", path.display());
        }
    }

    println!("setup complete; try: golsat solve --config {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "golsat",
            "solve",
            "--config",
            "test.yaml",
            "--evolutions",
            "3",
            "--backwards",
            "true",
        ]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from(["golsat", "validate", "-p", "a.txt", "-s", "b.txt"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_setup_command() {
        let dir = tempdir().unwrap();

        setup_command(dir.path().to_path_buf(), false).unwrap();

        assert!(dir.path().join("config/default.yaml").exists());
        assert!(dir.path().join("patterns/block.txt").exists());

        let settings = Settings::from_file(&dir.path().join("config/default.yaml")).unwrap();
        assert!(settings.validate().is_ok());
    }
}
