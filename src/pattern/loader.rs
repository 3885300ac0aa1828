//! Text format parsing for patterns
//!
//! The format is two whitespace-separated integers (width, height) followed
//! by exactly `width * height` cell characters in row-major order: `.` or `0`
//! for dead, `X` or `1` for alive, `?` for unknown. Every other character,
//! newlines included, acts as a separator.

use super::model::{CellState, Pattern};
use anyhow::{Context, Result};
use std::path::Path;

/// Parse a pattern from its text representation.
pub fn parse_pattern(content: &str, border_inference: bool) -> Result<Pattern> {
    let (width, rest) =
        leading_int(content).context("pattern parsing failed when reading the width")?;
    let (height, rest) =
        leading_int(rest).context("pattern parsing failed when reading the height")?;

    if width <= 0 || height <= 0 {
        anyhow::bail!("pattern dimensions must be positive, got {}x{}", width, height);
    }

    let capacity = width as usize * height as usize;
    let mut cells = Vec::with_capacity(capacity);

    for c in rest.chars() {
        let cell = match c {
            '.' | '0' => CellState::Dead,
            'X' | '1' => CellState::Alive,
            '?' => CellState::Unknown,
            _ => continue,
        };
        if cells.len() == capacity {
            anyhow::bail!(
                "pattern parsing failed: more than {} cells for a {}x{} pattern",
                capacity,
                width,
                height
            );
        }
        cells.push(cell);
    }

    if cells.len() != capacity {
        anyhow::bail!(
            "pattern parsing failed: {} cells instead of {} for a {}x{} pattern",
            cells.len(),
            capacity,
            width,
            height
        );
    }

    Pattern::from_cells(width, height, cells, border_inference)
}

/// Load a pattern from a file.
pub fn load_pattern_from_file<P: AsRef<Path>>(path: P, border_inference: bool) -> Result<Pattern> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read pattern file: {}", path.as_ref().display()))?;

    parse_pattern(&content, border_inference)
        .with_context(|| format!("failed to parse pattern file: {}", path.as_ref().display()))
}

/// Split a leading (optionally signed) integer off the input.
fn leading_int(input: &str) -> Result<(i32, &str)> {
    let rest = input.trim_start();

    let mut end = 0;
    for (i, c) in rest.char_indices() {
        if c.is_ascii_digit() || (i == 0 && c == '-') {
            end = i + c.len_utf8();
        } else {
            break;
        }
    }
    if end == 0 {
        anyhow::bail!("expected an integer");
    }

    let value: i32 = rest[..end]
        .parse()
        .with_context(|| format!("invalid integer '{}'", &rest[..end]))?;
    Ok((value, &rest[end..]))
}
