//! Grid storage for the forest state

pub mod state;

// Re-export main types
pub use state::{CellState, GridState, GridStats};
