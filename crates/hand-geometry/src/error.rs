//! Landmark Error Types

use thiserror::Error;

/// Errors raised while validating landmark input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LandmarkError {
    /// A hand entry did not carry the full landmark set
    #[error("Invalid landmark count: expected {expected}, got {actual}")]
    InvalidLandmarkCount { expected: usize, actual: usize },
}
