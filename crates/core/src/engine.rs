//! Fire spread engine
//!
//! Advances a [`GridState`] by one discrete step. Each step:
//! 1. collects the burning cells (`-fire_life < v <= 0`) of the *input* grid
//! 2. marks every in-bounds cell reached from a burning cell through the kernel
//!    as exposed (targets falling off the grid are dropped, i.e. zero padding)
//! 3. applies the decay transition to each exposed cell and copies the rest
//! 4. range-checks the output before handing it back
//!
//! Exposure is derived from the input only, so the result does not depend on
//! the order cells are visited in. Grids are never mutated in place; every
//! operation returns a fresh grid.

use crate::error::{FireSpreadError, Result};
use crate::grid::{CellState, GridState};
use crate::kernel::Kernel;
use serde::{Deserialize, Serialize};

/// What exposure does to a living tree
///
/// Burning cells always decay by one when exposed and dead cells never change;
/// the policies only differ for `Tree` cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExposurePolicy {
    /// Exposed trees are untouched; only [`FireSpreadEngine::ignite`] starts a fire
    #[default]
    Shielded,
    /// An exposed tree becomes a freshly ignited cell (value 0) without decaying
    /// in the same step
    Ignite,
    /// An exposed tree loses one growth stage per step and catches fire when it
    /// reaches 0
    Erode,
}

/// Counts gathered while computing one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepCounts {
    /// Cells burning in the input grid
    pub burning: usize,
    /// Cells within kernel range of at least one burning cell
    pub exposed: usize,
    /// Trees that entered the burning regime this step
    pub ignited: usize,
    /// Cells that reached the dead value this step
    pub extinguished: usize,
}

/// Result of one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// The next grid
    pub grid: GridState,
    /// What happened on the way there
    pub counts: StepCounts,
}

/// Stateless step/ignite operations parameterised by an [`ExposurePolicy`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FireSpreadEngine {
    exposure: ExposurePolicy,
}

impl FireSpreadEngine {
    /// Engine applying `exposure` to trees within reach of fire
    pub fn new(exposure: ExposurePolicy) -> Self {
        Self { exposure }
    }

    /// Configured tree exposure policy
    pub fn exposure(&self) -> ExposurePolicy {
        self.exposure
    }

    /// Compute the next grid
    ///
    /// # Errors
    ///
    /// Returns `InternalInvariant` if a transition produced a value outside
    /// `[-fire_life, tree_life]`. No grid is returned in that case.
    pub fn step(&self, grid: &GridState, kernel: &Kernel) -> Result<GridState> {
        self.step_detailed(grid, kernel).map(|outcome| outcome.grid)
    }

    /// Compute the next grid and report what happened
    ///
    /// # Errors
    ///
    /// Same as [`FireSpreadEngine::step`].
    pub fn step_detailed(&self, grid: &GridState, kernel: &Kernel) -> Result<StepOutcome> {
        let exposed = Self::exposure_map(grid, kernel);
        let input = grid.cells();
        let mut output = input.to_vec();

        let mut exposed_count = 0;
        let mut ignited = 0;
        let mut extinguished = 0;
        for (idx, next) in output.iter_mut().enumerate() {
            if !exposed[idx] {
                continue;
            }
            let before = input[idx];
            let after = self.transition(grid, before);
            *next = after;

            exposed_count += 1;
            match (grid.classify(before), grid.classify(after)) {
                (CellState::Tree, CellState::Burning) => ignited += 1,
                (CellState::Burning, CellState::Dead) => extinguished += 1,
                _ => {}
            }
        }

        verify_range(grid, &output)?;

        Ok(StepOutcome {
            counts: StepCounts {
                burning: input.iter().filter(|&&v| grid.is_burning(v)).count(),
                exposed: exposed_count,
                ignited,
                extinguished,
            },
            grid: GridState::with_cells_of(grid, output),
        })
    }

    /// Row-major mask of cells within kernel range of a burning cell
    ///
    /// Equivalent to convolving the burning indicator with the kernel and
    /// thresholding at `> 0`.
    pub fn exposure_map(grid: &GridState, kernel: &Kernel) -> Vec<bool> {
        let size = grid.size();
        let mut exposed = vec![false; size * size];

        for (idx, &value) in grid.cells().iter().enumerate() {
            if !grid.is_burning(value) {
                continue;
            }
            let (row, col) = (idx / size, idx % size);
            for &(dr, dc) in kernel.offsets() {
                if let Some(target) = offset_index(row, col, dr, dc, size) {
                    exposed[target] = true;
                }
            }
        }

        exposed
    }

    /// Copy of `grid` with (`row`, `col`) set to 0, the first burning value
    ///
    /// Nothing spreads until the next [`FireSpreadEngine::step`].
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if either index is `>= size`.
    pub fn ignite(grid: &GridState, row: usize, col: usize) -> Result<GridState> {
        let mut next = grid.clone();
        next.set_clamped(row, col, 0)?;
        Ok(next)
    }

    /// New value of an exposed cell
    fn transition(&self, grid: &GridState, value: i32) -> i32 {
        match grid.classify(value) {
            CellState::Dead => value,
            CellState::Burning => value - 1,
            CellState::Tree => match self.exposure {
                ExposurePolicy::Shielded => value,
                ExposurePolicy::Ignite => 0,
                ExposurePolicy::Erode => value - 1,
            },
        }
    }
}

/// Index of `(row + dr, col + dc)` if it lands inside a `size × size` grid
#[inline]
fn offset_index(row: usize, col: usize, dr: isize, dc: isize, size: usize) -> Option<usize> {
    let r = row.checked_add_signed(dr)?;
    let c = col.checked_add_signed(dc)?;
    if r < size && c < size {
        Some(r * size + c)
    } else {
        None
    }
}

fn verify_range(grid: &GridState, cells: &[i32]) -> Result<()> {
    let size = grid.size();
    if let Some(idx) = cells.iter().position(|&v| !grid.in_range(v)) {
        return Err(FireSpreadError::InternalInvariant {
            row: idx / size,
            col: idx % size,
            value: cells[idx],
            min: -grid.fire_life(),
            max: grid.tree_life(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(size: usize, value: i32, tree_life: i32, fire_life: i32) -> GridState {
        GridState::from_cells(size, tree_life, fire_life, vec![value; size * size]).unwrap()
    }

    #[test]
    fn test_center_fire_counts_down_and_neighbours_stay() {
        let mut grid = uniform(3, 3, 5, 2);
        grid.set_clamped(1, 1, 0).unwrap();
        let kernel = Kernel::disk(1).unwrap();
        let engine = FireSpreadEngine::default();

        let first = engine.step(&grid, &kernel).unwrap();
        assert_eq!(first.cells(), &[3, 3, 3, 3, -1, 3, 3, 3, 3]);

        let second = engine.step(&first, &kernel).unwrap();
        assert_eq!(second.cells(), &[3, 3, 3, 3, -2, 3, 3, 3, 3]);

        let third = engine.step(&second, &kernel).unwrap();
        assert_eq!(third, second);
    }

    #[test]
    fn test_exposure_map_clips_at_edges() {
        let mut grid = uniform(3, 4, 5, 2);
        grid.set_clamped(0, 0, 0).unwrap();
        let kernel = Kernel::disk(1).unwrap();

        let exposed = FireSpreadEngine::exposure_map(&grid, &kernel);
        assert_eq!(
            exposed,
            vec![true, true, false, true, false, false, false, false, false]
        );
    }

    #[test]
    fn test_exposure_follows_offset_direction() {
        // Offset (0, 1) only: fire exposes the cell to its right, never to its left
        let pattern = vec![vec![0, 0, 0], vec![0, 0, 1], vec![0, 0, 0]];
        let kernel = Kernel::custom(&pattern).unwrap();
        let mut grid = uniform(3, 4, 5, 3);
        grid.set_clamped(1, 1, 0).unwrap();

        let exposed = FireSpreadEngine::exposure_map(&grid, &kernel);
        assert!(exposed[grid.index(1, 2).unwrap()]);
        assert!(!exposed[grid.index(1, 0).unwrap()]);
        assert!(!exposed[grid.index(1, 1).unwrap()]);
    }

    #[test]
    fn test_kernel_without_center_stops_self_decay() {
        let pattern = vec![vec![0, 0, 0], vec![0, 0, 1], vec![0, 0, 0]];
        let kernel = Kernel::custom(&pattern).unwrap();
        let mut grid = uniform(3, 4, 5, 3);
        grid.set_clamped(1, 1, 0).unwrap();

        let next = FireSpreadEngine::default().step(&grid, &kernel).unwrap();
        assert_eq!(next.get(1, 1), Ok(0));
    }

    #[test]
    fn test_ignite_policy_converts_exposed_trees() {
        let mut grid = uniform(3, 4, 5, 2);
        grid.set_clamped(1, 1, 0).unwrap();
        let kernel = Kernel::disk(1).unwrap();
        let engine = FireSpreadEngine::new(ExposurePolicy::Ignite);

        let outcome = engine.step_detailed(&grid, &kernel).unwrap();
        assert_eq!(outcome.grid.cells(), &[4, 0, 4, 0, -1, 0, 4, 0, 4]);
        assert_eq!(
            outcome.counts,
            StepCounts {
                burning: 1,
                exposed: 5,
                ignited: 4,
                extinguished: 0
            }
        );
    }

    #[test]
    fn test_erode_policy_wears_down_exposed_trees() {
        let mut grid = uniform(3, 2, 5, 2);
        grid.set_clamped(1, 1, 0).unwrap();
        let kernel = Kernel::disk(1).unwrap();
        let engine = FireSpreadEngine::new(ExposurePolicy::Erode);

        let first = engine.step(&grid, &kernel).unwrap();
        assert_eq!(first.cells(), &[2, 1, 2, 1, -1, 1, 2, 1, 2]);

        let second = engine.step(&first, &kernel).unwrap();
        assert_eq!(second.cells(), &[2, 0, 2, 0, -2, 0, 2, 0, 2]);
    }

    #[test]
    fn test_extinguished_count() {
        let grid = GridState::from_cells(1, 5, 2, vec![-1]).unwrap();
        let kernel = Kernel::disk(0).unwrap();
        let outcome = FireSpreadEngine::default()
            .step_detailed(&grid, &kernel)
            .unwrap();
        assert_eq!(outcome.grid.cells(), &[-2]);
        assert_eq!(outcome.counts.extinguished, 1);
    }

    #[test]
    fn test_ignite_sets_single_cell() {
        let grid = uniform(3, 4, 5, 2);
        let lit = FireSpreadEngine::ignite(&grid, 1, 1).unwrap();
        assert_eq!(lit.cells(), &[4, 4, 4, 4, 0, 4, 4, 4, 4]);
        // Input untouched
        assert!(grid.cells().iter().all(|&v| v == 4));
    }

    #[test]
    fn test_ignite_out_of_bounds() {
        let grid = uniform(3, 4, 5, 2);
        assert_eq!(
            FireSpreadEngine::ignite(&grid, 1, 3),
            Err(FireSpreadError::OutOfBounds {
                row: 1,
                col: 3,
                size: 3
            })
        );
    }

    #[test]
    fn test_offset_index() {
        assert_eq!(offset_index(0, 0, -1, 0, 3), None);
        assert_eq!(offset_index(2, 2, 1, 0, 3), None);
        assert_eq!(offset_index(1, 0, 0, -1, 3), None);
        assert_eq!(offset_index(1, 1, 1, -1, 3), Some(6));
        assert_eq!(offset_index(1, 1, 1, 1, 3), Some(8));
    }

    #[test]
    fn test_verify_range_reports_offending_cell() {
        let grid = uniform(2, 1, 5, 2);
        let err = verify_range(&grid, &[1, 1, 6, 1]).unwrap_err();
        assert_eq!(
            err,
            FireSpreadError::InternalInvariant {
                row: 1,
                col: 0,
                value: 6,
                min: -2,
                max: 5
            }
        );
    }
}
