//! Owned simulation facade
//!
//! `ForestFireSimulation` holds exactly one grid, the kernel resolved from the
//! configuration and the engine. Each call to [`ForestFireSimulation::update`]
//! replaces the grid wholesale with the engine's output; nothing else keeps a
//! reference to old frames.

use crate::config::SimulationConfig;
use crate::engine::{ExposurePolicy, FireSpreadEngine, StepCounts};
use crate::error::{FireSpreadError, Result};
use crate::grid::{GridState, GridStats};
use crate::kernel::Kernel;
use tracing::{debug, info};

/// A forest, its spread kernel and a frame counter
#[derive(Debug, Clone)]
pub struct ForestFireSimulation {
    grid: GridState,
    kernel: Kernel,
    engine: FireSpreadEngine,
    frame: u64,
}

impl ForestFireSimulation {
    /// Start from a seeded grid
    ///
    /// # Arguments
    ///
    /// * `config` - Bounds, kernel and exposure policy
    /// * `initial` - Seeded grid; its bounds must match `config`
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the kernel spec is invalid or the grid's size
    /// or lifetimes differ from the configuration.
    pub fn new(config: &SimulationConfig, initial: GridState) -> Result<Self> {
        if initial.size() != config.forest_size
            || initial.tree_life() != config.tree_life
            || initial.fire_life() != config.fire_life
        {
            return Err(FireSpreadError::invalid_config(
                "initial",
                format!(
                    "grid is {}x{} with lives ({}, {}), config expects {}x{} with ({}, {})",
                    initial.size(),
                    initial.size(),
                    initial.tree_life(),
                    initial.fire_life(),
                    config.forest_size,
                    config.forest_size,
                    config.tree_life,
                    config.fire_life
                ),
            ));
        }

        let kernel = config.build_kernel()?;
        let engine = FireSpreadEngine::new(config.exposure);

        info!(
            "Forest fire simulation initialized: {}x{} grid, kernel of {} offsets, exposure={:?}",
            initial.size(),
            initial.size(),
            kernel.len(),
            engine.exposure()
        );

        Ok(Self {
            grid: initial,
            kernel,
            engine,
            frame: 0,
        })
    }

    /// Start from an all-zero grid sized by `config`
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for invalid bounds or kernel spec.
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        Self::new(config, config.empty_grid()?)
    }

    /// Advance one frame, returning the step's counts
    ///
    /// # Errors
    ///
    /// Returns `InternalInvariant` if the engine produced an out-of-range cell;
    /// the current grid is kept in that case.
    pub fn update(&mut self) -> Result<StepCounts> {
        let outcome = self.engine.step_detailed(&self.grid, &self.kernel)?;
        self.grid = outcome.grid;
        self.frame += 1;

        let counts = outcome.counts;
        debug!(
            "Frame {}: burning={}, exposed={}, ignited={}, extinguished={}",
            self.frame, counts.burning, counts.exposed, counts.ignited, counts.extinguished
        );

        Ok(counts)
    }

    /// Set (`row`, `col`) burning; it starts spreading on the next update
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if either index is `>= size`.
    pub fn ignite(&mut self, row: usize, col: usize) -> Result<()> {
        self.grid = FireSpreadEngine::ignite(&self.grid, row, col)?;
        debug!("Ignited cell ({}, {}) at frame {}", row, col, self.frame);
        Ok(())
    }

    /// Advance until nothing burns or `max_frames` frames have run
    ///
    /// # Returns
    ///
    /// Number of frames advanced
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`ForestFireSimulation::update`].
    pub fn run(&mut self, max_frames: u64) -> Result<u64> {
        let mut advanced = 0;
        while advanced < max_frames && !self.is_extinguished() {
            self.update()?;
            advanced += 1;
        }

        if self.is_extinguished() {
            let stats = self.stats();
            info!(
                "Fire extinguished at frame {}: {} trees left, {} cells burned",
                self.frame, stats.trees, stats.dead
            );
        }

        Ok(advanced)
    }

    /// Current grid
    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    /// Spread kernel in use
    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    /// Tree exposure policy in use
    pub fn exposure(&self) -> ExposurePolicy {
        self.engine.exposure()
    }

    /// Frames advanced so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Per-regime counts of the current grid
    pub fn stats(&self) -> GridStats {
        self.grid.stats()
    }

    /// No cell is burning
    pub fn is_extinguished(&self) -> bool {
        self.stats().is_extinguished()
    }
}
