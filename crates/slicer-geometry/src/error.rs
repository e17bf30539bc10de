//! Error types for geometric operations.

use nalgebra::Point3;
use thiserror::Error;

/// Errors that can occur in geometric routines.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A polygon with fewer than three vertices was passed where an area is
    /// required.
    #[error("Polygon has {count} vertices (at least 3 required)")]
    InvalidPolygon {
        /// Number of vertices the offending polygon had.
        count: usize,
    },

    /// An edge classified as straddling the plane failed to produce an
    /// intersection point. Indicates an inconsistent classification and is
    /// not recoverable.
    #[error("Edge ({v0:?} -> {v1:?}) classified as straddling z = {z} produced no intersection")]
    DegenerateIntersection {
        /// Lower edge endpoint.
        v0: Point3<f32>,
        /// Upper edge endpoint.
        v1: Point3<f32>,
        /// Plane height of the failed intersection.
        z: f32,
    },
}

/// Result type for geometric operations.
pub type GeometryResult<T> = std::result::Result<T, GeometryError>;
