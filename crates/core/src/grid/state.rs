//! Forest grid storage
//!
//! A `GridState` stores one signed integer per cell in row-major order
//! (`row * size + col`) together with the bounds that give those integers
//! meaning:
//! - `v > 0`: living tree, `v` is its growth stage
//! - `-fire_life < v <= 0`: burning, counting down once per step
//! - `v <= -fire_life`: burned out, terminal
//!
//! Every value lies in `[-fire_life, tree_life]`.

use crate::error::{FireSpreadError, Result};
use serde::Serialize;
use std::slice::Chunks;

/// Regime of a single cell value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    /// Living tree (`v > 0`)
    Tree,
    /// Burning, counting down toward `-fire_life`
    Burning,
    /// Burned out (`v <= -fire_life`), never changes again
    Dead,
}

/// Square forest grid with its value bounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridState {
    /// Cell values in row-major order
    cells: Vec<i32>,
    /// Side length in cells
    size: usize,
    /// Maximum tree growth stage
    tree_life: i32,
    /// Length of the burn countdown
    fire_life: i32,
}

impl GridState {
    /// Create a `size × size` grid with every cell set to 0
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `size` is zero, `size²` overflows `usize`, or
    /// either lifetime is not positive.
    pub fn new(size: usize, tree_life: i32, fire_life: i32) -> Result<Self> {
        let len = validate_bounds(size, tree_life, fire_life)?;
        Ok(Self {
            cells: vec![0; len],
            size,
            tree_life,
            fire_life,
        })
    }

    /// Wrap an already-seeded row-major buffer
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the bounds are invalid, the buffer does not hold
    /// exactly `size²` values, or any value lies outside `[-fire_life, tree_life]`.
    pub fn from_cells(
        size: usize,
        tree_life: i32,
        fire_life: i32,
        cells: Vec<i32>,
    ) -> Result<Self> {
        let len = validate_bounds(size, tree_life, fire_life)?;
        if cells.len() != len {
            return Err(FireSpreadError::invalid_config(
                "cells",
                format!("expected {len} values, got {}", cells.len()),
            ));
        }
        if let Some((idx, value)) = cells
            .iter()
            .enumerate()
            .find(|&(_, &v)| !(-fire_life..=tree_life).contains(&v))
        {
            return Err(FireSpreadError::invalid_config(
                "cells",
                format!(
                    "value {value} at ({}, {}) is outside [{}, {tree_life}]",
                    idx / size,
                    idx % size,
                    -fire_life
                ),
            ));
        }
        Ok(Self {
            cells,
            size,
            tree_life,
            fire_life,
        })
    }

    /// Build a grid from engine output without re-validating bounds.
    ///
    /// The caller guarantees `cells.len() == size²`; the range is checked by the engine.
    pub(crate) fn with_cells_of(template: &Self, cells: Vec<i32>) -> Self {
        debug_assert_eq!(cells.len(), template.cells.len());
        Self {
            cells,
            size: template.size,
            tree_life: template.tree_life,
            fire_life: template.fire_life,
        }
    }

    /// Side length of the grid
    pub fn size(&self) -> usize {
        self.size
    }

    /// Maximum tree growth stage (upper value bound)
    pub fn tree_life(&self) -> i32 {
        self.tree_life
    }

    /// Length of the burn countdown (lower value bound is `-fire_life`)
    pub fn fire_life(&self) -> i32 {
        self.fire_life
    }

    /// All cell values in row-major order
    pub fn cells(&self) -> &[i32] {
        &self.cells
    }

    /// Iterate over rows, top to bottom
    pub fn rows(&self) -> Chunks<'_, i32> {
        self.cells.chunks(self.size)
    }

    /// Value at (`row`, `col`)
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if either index is `>= size`.
    pub fn get(&self, row: usize, col: usize) -> Result<i32> {
        let idx = self.index(row, col)?;
        Ok(self.cells[idx])
    }

    /// Store `value` at (`row`, `col`), clamped to `[-fire_life, tree_life]`
    ///
    /// Used by seeding and ignition. Stepping never goes through here.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if either index is `>= size`.
    pub fn set_clamped(&mut self, row: usize, col: usize, value: i32) -> Result<()> {
        let idx = self.index(row, col)?;
        self.cells[idx] = value.clamp(-self.fire_life, self.tree_life);
        Ok(())
    }

    /// Regime of the cell at (`row`, `col`)
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if either index is `>= size`.
    pub fn cell_state(&self, row: usize, col: usize) -> Result<CellState> {
        Ok(self.classify(self.get(row, col)?))
    }

    /// Regime a value falls into under this grid's bounds
    pub fn classify(&self, value: i32) -> CellState {
        if value > 0 {
            CellState::Tree
        } else if value > -self.fire_life {
            CellState::Burning
        } else {
            CellState::Dead
        }
    }

    /// Whether `value` is in the burning regime
    #[inline]
    pub fn is_burning(&self, value: i32) -> bool {
        (1 - self.fire_life..=0).contains(&value)
    }

    /// Whether `value` lies in `[-fire_life, tree_life]`
    #[inline]
    pub fn in_range(&self, value: i32) -> bool {
        (-self.fire_life..=self.tree_life).contains(&value)
    }

    /// Count cells per regime
    pub fn stats(&self) -> GridStats {
        let mut stats = GridStats::default();
        for &value in &self.cells {
            match self.classify(value) {
                CellState::Tree => stats.trees += 1,
                CellState::Burning => stats.burning += 1,
                CellState::Dead => stats.dead += 1,
            }
        }
        stats
    }

    /// Row-major index of (`row`, `col`)
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if either index is `>= size`.
    pub fn index(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.size || col >= self.size {
            return Err(FireSpreadError::OutOfBounds {
                row,
                col,
                size: self.size,
            });
        }
        Ok(row * self.size + col)
    }
}

/// Check grid bounds without allocating, returning the cell count `size²`
///
/// # Errors
///
/// Returns `InvalidConfig` naming the first offending parameter.
pub(crate) fn validate_bounds(size: usize, tree_life: i32, fire_life: i32) -> Result<usize> {
    if size == 0 {
        return Err(FireSpreadError::invalid_config("size", "must be positive, got 0"));
    }
    let Some(len) = size.checked_mul(size) else {
        return Err(FireSpreadError::invalid_config(
            "size",
            format!("{size}x{size} cells do not fit in memory"),
        ));
    };
    if tree_life <= 0 {
        return Err(FireSpreadError::invalid_config(
            "tree_life",
            format!("must be positive, got {tree_life}"),
        ));
    }
    if fire_life <= 0 {
        return Err(FireSpreadError::invalid_config(
            "fire_life",
            format!("must be positive, got {fire_life}"),
        ));
    }
    Ok(len)
}

/// Per-regime cell counts for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GridStats {
    /// Living trees
    pub trees: usize,
    /// Cells still counting down
    pub burning: usize,
    /// Burned-out cells
    pub dead: usize,
}

impl GridStats {
    /// Total number of cells counted
    pub fn total(&self) -> usize {
        self.trees + self.burning + self.dead
    }

    /// No cell is burning, so further steps cannot change the grid
    pub fn is_extinguished(&self) -> bool {
        self.burning == 0
    }
}
