//! Spread kernels
//!
//! A kernel is the fixed set of relative offsets through which fire reaches
//! neighbouring cells in one step. Exposure radiates outward from burning
//! cells: a burning cell at `(r, c)` exposes `(r + dr, c + dc)` for every
//! offset `(dr, dc)`. This is the same as convolving the burning-indicator
//! grid with the kernel's indicator and thresholding at `> 0`.
//!
//! Two construction modes exist:
//! - [`Kernel::disk`]: filled circle, `dr² + dc² <= radius²`
//! - [`Kernel::custom`]: odd × odd 0/1 pattern, centred on its middle entry

use crate::error::{FireSpreadError, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default disk radius of the spread neighbourhood
pub const DEFAULT_RADIUS: i32 = 3;

/// Largest accepted disk radius (about 206k offsets)
pub const MAX_RADIUS: i32 = 256;

/// How the spread kernel is chosen, resolved once at start-up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KernelSpec {
    /// Filled disk of the given radius
    Disk {
        /// Radius in cells, `0..=MAX_RADIUS`
        radius: i32,
    },
    /// Explicit 0/1 pattern, odd length on both sides
    Custom {
        /// Pattern rows, top to bottom
        pattern: Vec<Vec<i32>>,
    },
}

impl Default for KernelSpec {
    fn default() -> Self {
        Self::Disk {
            radius: DEFAULT_RADIUS,
        }
    }
}

/// Immutable set of spread offsets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kernel {
    /// `(dr, dc)` offsets, sorted row-major and free of duplicates
    offsets: Vec<(isize, isize)>,
}

impl Kernel {
    /// Filled disk of `radius` cells
    ///
    /// Includes every integer offset with `dr² + dc² <= radius²`. A radius of 0
    /// yields only the centre, so fire counts down in place without spreading.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `radius` is negative or above [`MAX_RADIUS`].
    pub fn disk(radius: i32) -> Result<Self> {
        if !(0..=MAX_RADIUS).contains(&radius) {
            return Err(FireSpreadError::invalid_config(
                "radius",
                format!("must be in [0, {MAX_RADIUS}], got {radius}"),
            ));
        }

        let r = radius as isize;
        let r_sq = i64::from(radius) * i64::from(radius);
        let mut offsets = Vec::new();
        for dr in -r..=r {
            for dc in -r..=r {
                let dist_sq = (dr as i64) * (dr as i64) + (dc as i64) * (dc as i64);
                if dist_sq <= r_sq {
                    offsets.push((dr, dc));
                }
            }
        }

        Ok(Self { offsets })
    }

    /// Kernel from a 0/1 pattern matrix
    ///
    /// Every nonzero entry at `(r, c)` contributes the offset
    /// `(r - rows / 2, c - cols / 2)`, so the middle entry maps to `(0, 0)`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the pattern is empty, ragged, or has an even
    /// number of rows or columns.
    pub fn custom(pattern: &[Vec<i32>]) -> Result<Self> {
        let rows = pattern.len();
        let cols = pattern.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(FireSpreadError::invalid_config("pattern", "must not be empty"));
        }
        if let Some(bad) = pattern.iter().position(|row| row.len() != cols) {
            return Err(FireSpreadError::invalid_config(
                "pattern",
                format!(
                    "must be rectangular: row {bad} has {} entries, expected {cols}",
                    pattern[bad].len()
                ),
            ));
        }
        if rows % 2 == 0 || cols % 2 == 0 {
            return Err(FireSpreadError::invalid_config(
                "pattern",
                format!("needs odd side lengths to have a centre, got {rows}x{cols}"),
            ));
        }

        let center_r = (rows / 2) as isize;
        let center_c = (cols / 2) as isize;
        let offsets: Vec<(isize, isize)> = pattern
            .iter()
            .enumerate()
            .flat_map(|(r, row)| {
                row.iter()
                    .enumerate()
                    .filter(|&(_, &v)| v != 0)
                    .map(move |(c, _)| (r as isize - center_r, c as isize - center_c))
            })
            .collect();

        let kernel = Self { offsets };
        if !kernel.contains_center() {
            warn!(
                "Spread pattern {}x{} has no centre entry; burning cells only decay when a neighbour exposes them",
                rows, cols
            );
        }
        Ok(kernel)
    }

    /// Build the kernel described by `spec`
    ///
    /// # Errors
    ///
    /// Propagates `InvalidConfig` from [`Kernel::disk`] or [`Kernel::custom`].
    pub fn from_spec(spec: &KernelSpec) -> Result<Self> {
        match spec {
            KernelSpec::Disk { radius } => Self::disk(*radius),
            KernelSpec::Custom { pattern } => Self::custom(pattern),
        }
    }

    /// All offsets, row-major
    pub fn offsets(&self) -> &[(isize, isize)] {
        &self.offsets
    }

    /// Number of offsets
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// An empty kernel exposes nothing
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Whether `(0, 0)` is one of the offsets
    pub fn contains_center(&self) -> bool {
        self.offsets.binary_search(&(0, 0)).is_ok()
    }

    /// Largest `|dr|` or `|dc|` over all offsets
    pub fn reach(&self) -> usize {
        self.offsets
            .iter()
            .map(|&(dr, dc)| dr.unsigned_abs().max(dc.unsigned_abs()))
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disk_radius_zero_is_center_only() {
        let kernel = Kernel::disk(0).unwrap();
        assert_eq!(kernel.offsets(), &[(0, 0)]);
        assert!(kernel.contains_center());
        assert_eq!(kernel.reach(), 0);
    }

    #[test]
    fn test_disk_radius_one_is_plus_shape() {
        let kernel = Kernel::disk(1).unwrap();
        assert_eq!(kernel.offsets(), &[(-1, 0), (0, -1), (0, 0), (0, 1), (1, 0)]);
    }

    #[test]
    fn test_disk_sizes_match_morphological_disk() {
        assert_eq!(Kernel::disk(2).unwrap().len(), 13);
        assert_eq!(Kernel::disk(3).unwrap().len(), 29);
        assert_eq!(Kernel::disk(3).unwrap().reach(), 3);
    }

    #[test]
    fn test_disk_rejects_negative_radius() {
        assert!(matches!(
            Kernel::disk(-1),
            Err(FireSpreadError::InvalidConfig {
                parameter: "radius",
                ..
            })
        ));
    }

    #[test]
    fn test_disk_radius_is_capped() {
        assert!(Kernel::disk(MAX_RADIUS).is_ok());
        assert!(matches!(
            Kernel::disk(MAX_RADIUS + 1),
            Err(FireSpreadError::InvalidConfig {
                parameter: "radius",
                ..
            })
        ));
    }

    #[test]
    fn test_custom_offsets_are_centered() {
        let pattern = vec![vec![0, 1, 0], vec![0, 1, 1], vec![0, 0, 0]];
        let kernel = Kernel::custom(&pattern).unwrap();
        assert_eq!(kernel.offsets(), &[(-1, 0), (0, 0), (0, 1)]);
    }

    #[test]
    fn test_custom_non_square_pattern() {
        let pattern = vec![vec![1, 0, 0, 0, 1]];
        let kernel = Kernel::custom(&pattern).unwrap();
        assert_eq!(kernel.offsets(), &[(0, -2), (0, 2)]);
        assert!(!kernel.contains_center());
    }

    #[test]
    fn test_custom_rejects_bad_shapes() {
        assert!(Kernel::custom(&[]).is_err());
        assert!(Kernel::custom(&[vec![]]).is_err());
        assert!(Kernel::custom(&[vec![1, 1], vec![1, 1]]).is_err());
        assert!(Kernel::custom(&[vec![1, 1, 1], vec![1], vec![1, 1, 1]]).is_err());
    }

    #[test]
    fn test_all_zero_pattern_is_empty() {
        let kernel = Kernel::custom(&[vec![0]]).unwrap();
        assert!(kernel.is_empty());
    }

    #[test]
    fn test_from_spec() {
        let kernel = Kernel::from_spec(&KernelSpec::default()).unwrap();
        assert_eq!(kernel, Kernel::disk(DEFAULT_RADIUS).unwrap());

        let spec = KernelSpec::Custom {
            pattern: vec![vec![1]],
        };
        assert_eq!(Kernel::from_spec(&spec).unwrap().offsets(), &[(0, 0)]);
    }
}
