//! Plain Game of Life simulation, used for validation and as a test oracle

pub mod grid;
pub mod rules;

pub use grid::Grid;
pub use rules::Rules;
