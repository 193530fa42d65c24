//! Error taxonomy for layout generation and batch assembly.

use thiserror::Error;

use crate::types::GridCoordinate;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapGenError {
    #[error("unrecognized map condition '{tag}' (expected 1P1G, 1P2G or 2P2G)")]
    InvalidCondition { tag: String },

    #[error(
        "no cell satisfies the target constraints for condition '{condition}' \
         (target1 at {target1}, minimum separation {min_distance})"
    )]
    NoFeasibleTarget { condition: String, target1: GridCoordinate, min_distance: u32 },

    #[error("coordinate {coordinate} falls outside a {grid_size}x{grid_size} grid")]
    OutOfBounds { coordinate: GridCoordinate, grid_size: i32 },

    #[error("grid size {size} is not usable: {reason}")]
    InvalidGridSize { size: i64, reason: &'static str },

    #[error("invalid generator parameters: {reason}")]
    InvalidParameters { reason: String },
}

impl MapGenError {
    /// Whether a fresh attempt with new random draws could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NoFeasibleTarget { .. })
    }
}

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("trial {trial_index} ({condition}) failed")]
    Generation {
        trial_index: usize,
        condition: String,
        #[source]
        source: MapGenError,
    },

    #[error(
        "trial {trial_index} ({condition}) produced no feasible layout after {attempts} attempts"
    )]
    RetriesExhausted {
        trial_index: usize,
        condition: String,
        attempts: u32,
        #[source]
        last_error: MapGenError,
    },
}

impl BatchError {
    pub fn trial_index(&self) -> usize {
        match self {
            Self::Generation { trial_index, .. } | Self::RetriesExhausted { trial_index, .. } => {
                *trial_index
            }
        }
    }
}
