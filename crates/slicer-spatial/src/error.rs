//! Error types for spatial indexes.

use thiserror::Error;

/// Errors that can occur when building or querying a spatial index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpatialError {
    /// Too few triangles to build a branching hierarchy; the root would be a
    /// single leaf. Callers can fall back to a linear index.
    #[error("Too few triangles for a hierarchy: got {count}, need at least {minimum}")]
    TooFewPrimitives {
        /// Number of triangles supplied.
        count: usize,
        /// Minimum number of triangles required.
        minimum: usize,
    },

    /// The index was queried before `build` was called.
    #[error("Spatial index is uninitialized; call build first")]
    Uninitialized,
}
