//! Output and formatting helpers

pub mod display;

pub use display::SolutionFormatter;
