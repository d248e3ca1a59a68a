//! Simulation configuration
//!
//! Loaded from JSON; every field is optional and falls back to the defaults
//! below (100×100 forest, trees up to 50, 10-step burn, radius-3 disk).

use crate::engine::ExposurePolicy;
use crate::error::FireSpreadError;
use crate::grid::state::validate_bounds;
use crate::grid::GridState;
use crate::kernel::{Kernel, KernelSpec};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default forest side length in cells
pub const DEFAULT_FOREST_SIZE: usize = 100;
/// Default maximum tree growth stage
pub const DEFAULT_TREE_LIFE: i32 = 50;
/// Default burn countdown length
pub const DEFAULT_FIRE_LIFE: i32 = 10;

/// Everything needed to build a simulation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Side length of the square forest
    pub forest_size: usize,
    /// Maximum tree growth stage
    pub tree_life: i32,
    /// Burn countdown length
    pub fire_life: i32,
    /// Spread kernel
    pub kernel: KernelSpec,
    /// What exposure does to living trees
    pub exposure: ExposurePolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            forest_size: DEFAULT_FOREST_SIZE,
            tree_life: DEFAULT_TREE_LIFE,
            fire_life: DEFAULT_FIRE_LIFE,
            kernel: KernelSpec::default(),
            exposure: ExposurePolicy::default(),
        }
    }
}

impl SimulationConfig {
    /// Parse and validate a JSON document
    ///
    /// # Errors
    ///
    /// Returns `ParseFailed` for malformed JSON and `Invalid` when the values
    /// fail validation.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON file
    ///
    /// # Errors
    ///
    /// Returns `LoadFailed` if the file cannot be read, otherwise the same
    /// errors as [`SimulationConfig::from_json_str`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents =
            fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed(e.to_string()))?;
        Self::from_json_str(&contents)
    }

    /// Check the grid bounds and kernel shape without allocating a grid
    ///
    /// # Errors
    ///
    /// Returns `Invalid` wrapping the first `InvalidConfig` found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_bounds(self.forest_size, self.tree_life, self.fire_life)?;
        self.build_kernel()?;
        Ok(())
    }

    /// Resolve the kernel spec into offsets
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for a negative radius or a malformed pattern.
    pub fn build_kernel(&self) -> crate::Result<Kernel> {
        Kernel::from_spec(&self.kernel)
    }

    /// Zeroed grid with this configuration's bounds
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the size or either lifetime is not positive.
    pub fn empty_grid(&self) -> crate::Result<GridState> {
        GridState::new(self.forest_size, self.tree_life, self.fire_life)
    }
}

/// Errors that can occur while loading a configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the file
    LoadFailed(String),
    /// Failed to parse the file contents
    ParseFailed(String),
    /// Parsed values are unusable
    Invalid(FireSpreadError),
}

impl From<FireSpreadError> for ConfigError {
    fn from(err: FireSpreadError) -> Self {
        ConfigError::Invalid(err)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::LoadFailed(msg) => write!(f, "Failed to load config: {msg}"),
            ConfigError::ParseFailed(msg) => write!(f, "Failed to parse config: {msg}"),
            ConfigError::Invalid(err) => write!(f, "Invalid config: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Invalid(err) => Some(err),
            ConfigError::LoadFailed(_) | ConfigError::ParseFailed(_) => None,
        }
    }
}
