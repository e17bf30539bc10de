//! Error types for the slicing pipeline.

use std::path::PathBuf;

use thiserror::Error;

use slicer_geometry::{GeometryError, QuantizedPoint2};
use slicer_spatial::SpatialError;

/// Errors that can occur while slicing a mesh.
#[derive(Debug, Error)]
pub enum SliceError {
    /// A geometric routine failed (invalid polygon, degenerate
    /// intersection).
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// The spatial index failed (too few triangles, queried before build).
    #[error(transparent)]
    Spatial(#[from] SpatialError),

    /// A cross-section vertex has more than two incident segments; the
    /// source mesh is not a closed 2-manifold at this height.
    #[error("Vertex ({}, {}) has more than two incident segments; mesh is not manifold", .vertex.qx, .vertex.qy)]
    NonManifoldVertex {
        /// The offending lattice vertex.
        vertex: QuantizedPoint2,
    },

    /// A cross-section vertex was left with fewer than two neighbors after
    /// all segments were consumed; the contour through it cannot close.
    #[error("Vertex ({}, {}) has {count} incident segment(s) (expected 2); mesh is not manifold", .vertex.qx, .vertex.qy)]
    DanglingVertex {
        /// The offending lattice vertex.
        vertex: QuantizedPoint2,
        /// Number of neighbors found.
        count: usize,
    },

    /// Slice thickness must be positive and finite.
    #[error("Invalid slice thickness: {0} (must be > 0)")]
    InvalidThickness(f32),

    /// Quantization epsilon must be positive and finite.
    #[error("Invalid quantization epsilon: {0} (must be > 0)")]
    InvalidQuantizationEpsilon(f32),

    /// Classification epsilon must be non-negative and finite.
    #[error("Invalid classification epsilon: {0} (must be >= 0)")]
    InvalidClassificationEpsilon(f32),

    /// IO error during export.
    #[error("Failed to write to {path}: {source}")]
    IoWrite {
        /// The path that failed.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for slicing operations.
pub type SliceResult<T> = std::result::Result<T, SliceError>;
