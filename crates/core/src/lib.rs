//! Forest Fire Spread Core Library
//!
//! A deterministic cellular model of fire moving through a square forest.
//! Each cell holds one signed integer:
//! - `v > 0`: a living tree at growth stage `v`
//! - `-fire_life < v <= 0`: a burning cell counting down once per step
//! - `v <= -fire_life`: burned-out ground that never changes again
//!
//! ## Pipeline
//!
//! Every step, the engine finds the burning cells, expands them through a
//! spread [`Kernel`] (a disk or a custom 0/1 pattern) to find the exposed
//! cells, and applies the decay transition to those. Grids are values: each
//! step returns a new [`GridState`] and leaves its input untouched.
//!
//! ```rust
//! use forest_fire_core::{FireSpreadEngine, GridState, Kernel};
//!
//! let mut grid = GridState::new(3, 5, 2)?;
//! for row in 0..3 {
//!     for col in 0..3 {
//!         grid.set_clamped(row, col, 3)?;
//!     }
//! }
//! let grid = FireSpreadEngine::ignite(&grid, 1, 1)?;
//! let next = FireSpreadEngine::default().step(&grid, &Kernel::disk(1)?)?;
//! assert_eq!(next.get(1, 1)?, -1);
//! # Ok::<(), forest_fire_core::FireSpreadError>(())
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod kernel;
pub mod simulation;

// Re-export main types
pub use config::{ConfigError, SimulationConfig};
pub use engine::{ExposurePolicy, FireSpreadEngine, StepCounts, StepOutcome};
pub use error::{FireSpreadError, Result};
pub use grid::{CellState, GridState, GridStats};
pub use kernel::{Kernel, KernelSpec};
pub use simulation::ForestFireSimulation;
