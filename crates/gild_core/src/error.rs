//! Error types for scene construction.

use thiserror::Error;

/// Errors raised while building or selecting scenes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("scene index {index} out of range (expected 0..{count})")]
    SceneIndex { index: usize, count: usize },

    #[error("triangle list is full ({capacity} triangles)")]
    TriangleCapacity { capacity: usize },
}
