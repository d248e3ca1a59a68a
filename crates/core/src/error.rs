//! Error types shared by the grid, kernel and engine modules.

use std::fmt;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FireSpreadError>;

/// Errors reported by grid construction, kernel construction and stepping.
///
/// None of these are transient: the engine performs no I/O, so every failure
/// is either a configuration/usage error or an engine bug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FireSpreadError {
    /// A constructor received an unusable parameter (size, lifetimes, kernel shape).
    InvalidConfig {
        /// Name of the offending parameter (e.g. `"size"`, `"radius"`, `"pattern"`)
        parameter: &'static str,
        /// Human-readable description of the constraint that was violated
        reason: String,
    },
    /// A cell index lies outside `[0, size)`.
    OutOfBounds {
        /// Requested row
        row: usize,
        /// Requested column
        col: usize,
        /// Side length of the grid that was indexed
        size: usize,
    },
    /// A transition produced a value outside `[min, max]`.
    ///
    /// Indicates a bug in the engine; the step that detected it is aborted.
    InternalInvariant {
        /// Row of the offending cell
        row: usize,
        /// Column of the offending cell
        col: usize,
        /// Value the transition produced
        value: i32,
        /// Lower bound (`-fire_life`)
        min: i32,
        /// Upper bound (`tree_life`)
        max: i32,
    },
}

impl FireSpreadError {
    /// Create an `InvalidConfig` error for `parameter` with a custom message.
    pub fn invalid_config(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            parameter,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FireSpreadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FireSpreadError::InvalidConfig { parameter, reason } => {
                write!(f, "Invalid configuration for '{parameter}': {reason}")
            }
            FireSpreadError::OutOfBounds { row, col, size } => {
                write!(f, "Cell ({row}, {col}) is outside the {size}x{size} grid")
            }
            FireSpreadError::InternalInvariant {
                row,
                col,
                value,
                min,
                max,
            } => write!(
                f,
                "Cell ({row}, {col}) left the valid range [{min}, {max}] with value {value}"
            ),
        }
    }
}

impl std::error::Error for FireSpreadError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = FireSpreadError::invalid_config("size", "must be positive, got 0");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for 'size': must be positive, got 0"
        );

        let err = FireSpreadError::OutOfBounds {
            row: 7,
            col: 2,
            size: 5,
        };
        assert_eq!(err.to_string(), "Cell (7, 2) is outside the 5x5 grid");

        let err = FireSpreadError::InternalInvariant {
            row: 1,
            col: 1,
            value: -11,
            min: -10,
            max: 50,
        };
        assert!(err.to_string().contains("[-10, 50]"));
    }
}
