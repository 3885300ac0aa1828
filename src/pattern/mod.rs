//! Partially-known target patterns and their text format

pub mod loader;
pub mod model;

pub use loader::{load_pattern_from_file, parse_pattern};
pub use model::{CellState, Pattern};
