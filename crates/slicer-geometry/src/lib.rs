//! Geometric foundations for mesh slicing.
//!
//! This crate provides the value types and plane-intersection routines the
//! slicing pipeline is built on:
//!
//! - [`Triangle`], [`Segment2`]/[`Segment3`], [`Polygon2`]/[`Polygon3`] - concrete geometry
//! - [`Aabb2`]/[`Aabb3`] - axis-aligned bounding boxes
//! - [`QuantizedPoint2`]/[`QuantizedSegment2`] - fixed-point lattice coordinates
//!   with exact equality, hashing, and ordering
//! - [`segment_plane`]/[`triangle_plane`]/[`plane_segments`] - intersection with a
//!   horizontal plane `z = Z`
//! - [`clip`] - convex polygon clipping against a horizontal plane
//!
//! # Coordinate System
//!
//! Uses a **right-handed coordinate system**:
//! - X: width (left/right)
//! - Y: depth (front/back)
//! - Z: height (up/down, slicing direction)
//!
//! All coordinates are `f32`. Non-finite values are not supported.
//!
//! # Quantization
//!
//! Cross-sections are assembled by snapping intersection points to an integer
//! lattice of configurable spacing ε (see [`QuantizedPoint2`]). Two
//! independently computed endpoints within ε of each other collapse to the
//! same lattice vertex, which is what turns a bag of per-triangle segments
//! into a shared vertex set.
//!
//! # Example
//!
//! ```
//! use slicer_geometry::{plane_segments, unit_cube};
//!
//! let cube = unit_cube();
//! let segments = plane_segments(&cube, 0.5, 1e-4, 0.0).unwrap();
//! assert!(!segments.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod bounds;
mod clip;
mod error;
mod intersect;
mod polygon;
mod quantize;
mod ray;
mod segment;
mod shapes;
mod triangle;

pub use bounds::{Aabb2, Aabb3};
pub use clip::{clip, KeepRegion};
pub use error::{GeometryError, GeometryResult};
pub use intersect::{classify_vertex, plane_segments, segment_plane, triangle_plane, PlaneSide};
pub use polygon::{Polygon2, Polygon3};
pub use quantize::{QuantizedPoint2, QuantizedSegment2};
pub use ray::{Ray2, Ray3};
pub use segment::{Segment2, Segment3};
pub use shapes::{cube_triangles, unit_cube};
pub use triangle::Triangle;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector2, Vector3};
