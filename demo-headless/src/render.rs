//! Text frame output
//!
//! ASCII mode prints `#` for a tree, the burn stage `-v` as a base-36 digit
//! for a burning cell, and `.` for a burned-out one. Value mode prints every
//! raw cell value instead.

use forest_fire_core::{CellState, GridState};

/// Highest burn stage with its own digit; later stages share `z`
const MAX_STAGE_DIGIT: u32 = 35;

pub fn render_ascii(grid: &GridState) -> String {
    let mut out = String::with_capacity(grid.cells().len() + grid.size());
    for row in grid.rows() {
        for &value in row {
            out.push(match grid.classify(value) {
                CellState::Tree => '#',
                CellState::Burning => burn_stage_char(value),
                CellState::Dead => '.',
            });
        }
        out.push('\n');
    }
    out
}

/// Every cell value, right-aligned so columns line up
pub fn render_values(grid: &GridState) -> String {
    let width = grid
        .tree_life()
        .to_string()
        .len()
        .max((-grid.fire_life()).to_string().len());

    let mut out = String::new();
    for row in grid.rows() {
        let line: Vec<String> = row.iter().map(|v| format!("{v:>width$}")).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

fn burn_stage_char(value: i32) -> char {
    let stage = value.unsigned_abs().min(MAX_STAGE_DIGIT);
    char::from_digit(stage, 36).unwrap_or('z')
}
