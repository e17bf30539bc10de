//! Mesh slicing: horizontal cross-sections as polygons with holes.
//!
//! This crate stitches the plane-query and intersection primitives into the
//! full slicing pipeline. For each slice height the spatial index is asked
//! for candidate triangles, the triangle/plane segments are deduplicated on
//! a quantization lattice, assembled into a 2-regular adjacency, walked
//! into closed outlines, and nested into shells and holes with canonical
//! winding.
//!
//! # Pipeline
//!
//! - [`build_adjacency`] - segments into a manifold vertex adjacency
//! - [`walk_outlines`] - adjacency into closed outlines
//! - [`OutlineHierarchy`] - outlines into nested polygons with holes
//! - [`slice`] / [`slice_parallel`] / [`slice_at`] - the whole pipeline per
//!   height
//! - [`export_slice_svg`] - render a layer for inspection
//!
//! # Guarantees
//!
//! - Slices are ordered by ascending z; polygons within a slice follow the
//!   containment forest depth-first.
//! - Shell vertices are counter-clockwise (positive signed area), hole
//!   vertices clockwise.
//! - Non-manifold cross-sections fail loudly with the offending vertex;
//!   nothing is repaired or retried.
//!
//! # Example
//!
//! ```
//! use slicer_core::{slice, SliceParams};
//! use slicer_geometry::{cube_triangles, Point3};
//! use slicer_spatial::{Bvh, SpatialIndex, SplitStrategy};
//!
//! let mut index = Bvh::new(SplitStrategy::SurfaceAreaHeuristic);
//! index.build(cube_triangles(
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(10.0, 10.0, 10.0),
//! ))
//! .unwrap();
//!
//! let slices = slice(&index, &SliceParams::default().with_thickness(2.0)).unwrap();
//! assert_eq!(slices.len(), 5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod adjacency;
mod error;
mod export;
mod hierarchy;
mod outline;
mod params;
mod slicer;

pub use adjacency::{build_adjacency, ManifoldAdjacency};
pub use error::{SliceError, SliceResult};
pub use export::{export_slice_svg, write_slice_svg, SvgExportParams};
pub use hierarchy::{is_inside, OutlineHierarchy};
pub use outline::{
    signed_area, walk_outlines, OutlineWithWinding, RelativeWinding, SliceOutline,
};
pub use params::SliceParams;
pub use slicer::{slice, slice_at, slice_heights, slice_parallel, Slice};
